//! Chebyshev series evaluation for ephemeris interpolation
//!
//! Each SPK record stores, per coordinate, the coefficients of a Chebyshev
//! expansion over a normalized time variable `x ∈ [-1, 1]`.

use crate::jplephem::errors::{JplephemError, Result};

/// A borrowed Chebyshev series `f(x) = Σ cₖ·Tₖ(x)`
///
/// Coefficients are ordered from lowest to highest degree and are read
/// straight out of the memory-mapped kernel without copying.
#[derive(Debug, Clone, Copy)]
pub struct ChebyshevSeries<'a> {
    coefficients: &'a [f64],
}

impl<'a> ChebyshevSeries<'a> {
    pub fn new(coefficients: &'a [f64]) -> Self {
        Self { coefficients }
    }

    /// Value of the series at `x` (Clenshaw recurrence)
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.coefficients.len();
        if n == 0 {
            return 0.0;
        }

        let two_x = 2.0 * x;
        let mut b1 = 0.0;
        let mut b2 = 0.0;
        for &c in self.coefficients[1..].iter().rev() {
            let b0 = c + two_x * b1 - b2;
            b2 = b1;
            b1 = b0;
        }
        self.coefficients[0] + x * b1 - b2
    }

    /// Value and first derivative with respect to `x`, in one pass
    ///
    /// Uses `T'ₙ = 2·Tₙ₋₁ + 2x·T'ₙ₋₁ − T'ₙ₋₂`.
    pub fn evaluate_with_derivative(&self, x: f64) -> (f64, f64) {
        let coefficients = self.coefficients;
        match coefficients.len() {
            0 => return (0.0, 0.0),
            1 => return (coefficients[0], 0.0),
            _ => {}
        }

        let (mut t_prev, mut t_curr) = (1.0, x);
        let (mut d_prev, mut d_curr) = (0.0, 1.0);
        let mut value = coefficients[0] + coefficients[1] * x;
        let mut derivative = coefficients[1];

        for &c in &coefficients[2..] {
            let t_next = 2.0 * x * t_curr - t_prev;
            let d_next = 2.0 * t_curr + 2.0 * x * d_curr - d_prev;
            value += c * t_next;
            derivative += c * d_next;
            t_prev = t_curr;
            t_curr = t_next;
            d_prev = d_curr;
            d_curr = d_next;
        }

        (value, derivative)
    }

    /// Get the degree of the series
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

/// Map `time` onto `[-1, 1]` for a record centred on `midpoint` with half-width `radius`
///
/// Values a rounding error outside the interval are clamped; anything further
/// out is an error.
pub fn normalize_time(time: f64, midpoint: f64, radius: f64) -> Result<f64> {
    if radius <= 0.0 {
        return Err(JplephemError::InvalidFormat(format!(
            "record radius must be positive, got {radius}"
        )));
    }

    let normalized = (time - midpoint) / radius;
    if normalized.abs() > 1.0 + 1e-9 {
        return Err(JplephemError::InvalidFormat(format!(
            "time {time} falls outside record [{}, {}]",
            midpoint - radius,
            midpoint + radius
        )));
    }

    Ok(normalized.clamp(-1.0, 1.0))
}
