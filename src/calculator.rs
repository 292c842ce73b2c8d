//! The sidereal position calculator
//!
//! A calculator owns an ephemeris provider and an immutable set of
//! [`CalculatorSettings`]. Every query recomputes from scratch:
//!
//! 1. the civil reading becomes an [`Instant`] (UT, TT, TDB)
//! 2. each configured graha is looked up (nodes analytically, the rest from
//!    the provider) as a tropical longitude of date
//! 3. the ayanamsha is subtracted and the result mapped to rashi, nakshatra
//!    and pada
//!
//! Ketu is always derived from Rahu as the exactly opposite point. If any
//! lookup fails the whole snapshot fails.

use chrono::NaiveDateTime;
use log::{debug, info};
use serde::Serialize;

use crate::coordinates::angle::{normalize_degrees, Dms};
use crate::coordinates::EclipticCoordinates;
use crate::ephemeris::EphemerisProvider;
use crate::time::{fixed_offset, CivilTime, Instant};
use crate::vedic::ayanamsha::ayanamsha_deg;
use crate::vedic::graha::ALL_GRAHAS;
use crate::vedic::lunar_nodes::rahu_state;
use crate::vedic::{nakshatra_from_longitude, rashi_from_longitude, AyanamshaSystem, Graha, Nakshatra, NodeMode, Panchang, Rashi};
use crate::Result;

pub use crate::vedic::{nakshatra_index, opposite_node, pada, sign_index, to_sidereal, to_tropical};

/// Everything that selects how a calculation is done
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSettings {
    pub ayanamsha: AyanamshaSystem,
    pub node_mode: NodeMode,
    /// Offset of the civil zone from UTC, minutes east
    pub utc_offset_minutes: i32,
    /// Grahas reported, in output order
    pub bodies: Vec<Graha>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            ayanamsha: AyanamshaSystem::default(),
            node_mode: NodeMode::default(),
            utc_offset_minutes: crate::constants::IST_OFFSET_MINUTES,
            bodies: ALL_GRAHAS.to_vec(),
        }
    }
}

/// One graha's sidereal placement at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub graha: Graha,
    /// Longitude of date in degrees, before the ayanamsha is removed
    pub tropical_longitude: f64,
    /// Sidereal longitude in degrees, `[0, 360)`
    pub longitude: f64,
    pub latitude: f64,
    pub distance_au: Option<f64>,
    /// Degrees per day in longitude
    pub speed: f64,
    pub retrograde: bool,
    pub rashi: Rashi,
    pub degrees_in_rashi: f64,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub nakshatra_lord: Graha,
}

impl Position {
    fn from_longitudes(graha: Graha, tropical: f64, sidereal: f64, state: &EclipticCoordinates) -> Self {
        let (rashi, degrees_in_rashi) = rashi_from_longitude(sidereal);
        let nakshatra = nakshatra_from_longitude(sidereal);
        Self {
            graha,
            tropical_longitude: tropical,
            longitude: sidereal,
            latitude: state.latitude,
            distance_au: state.distance_au,
            speed: state.speed,
            retrograde: state.speed < 0.0,
            rashi,
            degrees_in_rashi,
            nakshatra: nakshatra.nakshatra,
            pada: nakshatra.pada,
            nakshatra_lord: nakshatra.nakshatra.lord(),
        }
    }

    /// 0-based sign index
    pub fn sign_index(&self) -> u8 {
        self.rashi.index()
    }

    /// Degrees within the rashi as degrees, minutes and seconds
    pub fn dms_in_rashi(&self) -> Dms {
        Dms::from_degrees(self.degrees_in_rashi)
    }
}

/// Result of one calculation pass
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time: CivilTime,
    pub instant: Instant,
    pub provider: String,
    pub ayanamsha_system: AyanamshaSystem,
    /// Ayanamsha in degrees
    pub ayanamsha: f64,
    pub node_mode: NodeMode,
    pub positions: Vec<Position>,
    pub panchang: Panchang,
}

impl Snapshot {
    pub fn position(&self, graha: Graha) -> Option<&Position> {
        self.positions.iter().find(|p| p.graha == graha)
    }
}

pub struct SiderealCalculator<E> {
    provider: E,
    settings: CalculatorSettings,
}

impl<E: EphemerisProvider> SiderealCalculator<E> {
    pub fn new(provider: E, settings: CalculatorSettings) -> Self {
        info!(
            "calculator: provider={} ayanamsha={} node={} offset={}min",
            provider.name(),
            settings.ayanamsha,
            settings.node_mode,
            settings.utc_offset_minutes
        );
        Self { provider, settings }
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    pub fn provider(&self) -> &E {
        &self.provider
    }

    /// Civil reading in the configured zone
    pub fn civil_time(&self, local: NaiveDateTime) -> Result<CivilTime> {
        Ok(CivilTime::new(local, fixed_offset(self.settings.utc_offset_minutes)?))
    }

    /// Instant for a wall-clock reading in the configured zone
    pub fn instant_for(&self, local: NaiveDateTime) -> Result<Instant> {
        Ok(self.civil_time(local)?.to_instant())
    }

    /// Ayanamsha in degrees for the configured system
    pub fn ayanamsha(&self, instant: &Instant) -> f64 {
        ayanamsha_deg(self.settings.ayanamsha, instant.centuries_tdb())
    }

    /// Sidereal placement of one graha
    pub fn position(&self, graha: Graha, instant: &Instant) -> Result<Position> {
        let ayanamsha = self.ayanamsha(instant);
        self.position_with(graha, instant, ayanamsha)
    }

    fn position_with(&self, graha: Graha, instant: &Instant, ayanamsha: f64) -> Result<Position> {
        let position = match graha {
            Graha::Rahu | Graha::Ketu => {
                let state = rahu_state(instant.centuries_tdb(), self.settings.node_mode);
                let tropical = normalize_degrees(state.longitude);
                let rahu = Position::from_longitudes(Graha::Rahu, tropical, to_sidereal(tropical, ayanamsha), &state);
                if graha == Graha::Rahu {
                    rahu
                } else {
                    Position::from_longitudes(
                        Graha::Ketu,
                        opposite_node(rahu.tropical_longitude),
                        opposite_node(rahu.longitude),
                        &state,
                    )
                }
            }
            _ => {
                let state = self.provider.ecliptic_state(graha, instant)?;
                let tropical = normalize_degrees(state.longitude);
                Position::from_longitudes(graha, tropical, to_sidereal(tropical, ayanamsha), &state)
            }
        };

        debug!(
            "{graha}: sidereal {:.6}° {} {:.4}° {} pada {}{}",
            position.longitude,
            position.rashi.name(),
            position.degrees_in_rashi,
            position.nakshatra,
            position.pada,
            if position.retrograde { " (R)" } else { "" }
        );
        Ok(position)
    }

    /// All configured positions plus the panchang for a civil reading
    pub fn snapshot(&self, time: &CivilTime) -> Result<Snapshot> {
        let instant = time.to_instant();
        let ayanamsha = self.ayanamsha(&instant);
        debug!(
            "{time}: JD(UT) {:.6}, ΔT {:.2}s, ayanamsha {:.6}°",
            instant.jd_ut, instant.delta_t, ayanamsha
        );

        let positions = self
            .settings
            .bodies
            .iter()
            .map(|&graha| self.position_with(graha, &instant, ayanamsha))
            .collect::<Result<Vec<_>>>()?;

        let longitude_of = |graha: Graha| -> Result<f64> {
            match positions.iter().find(|p| p.graha == graha) {
                Some(p) => Ok(p.longitude),
                None => Ok(self.position_with(graha, &instant, ayanamsha)?.longitude),
            }
        };
        let panchang = Panchang::new(time, longitude_of(Graha::Moon)?, longitude_of(Graha::Sun)?);

        Ok(Snapshot {
            time: *time,
            instant,
            provider: self.provider.name().to_string(),
            ayanamsha_system: self.settings.ayanamsha,
            ayanamsha,
            node_mode: self.settings.node_mode,
            positions,
            panchang,
        })
    }

    /// Snapshot for the current system time in the configured zone
    pub fn snapshot_now(&self) -> Result<Snapshot> {
        let now = CivilTime::now(self.settings.utc_offset_minutes)?;
        self.snapshot(&now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::angular_difference;
    use crate::ephemeris::AnalyticEphemeris;
    use crate::framelib::nutation_longitude_deg;
    use approx::assert_relative_eq;

    fn calculator(ayanamsha: AyanamshaSystem) -> SiderealCalculator<AnalyticEphemeris> {
        let settings = CalculatorSettings {
            ayanamsha,
            ..CalculatorSettings::default()
        };
        SiderealCalculator::new(AnalyticEphemeris::new(), settings)
    }

    #[test]
    fn test_default_settings() {
        let settings = CalculatorSettings::default();
        assert_eq!(settings.ayanamsha, AyanamshaSystem::Lahiri);
        assert_eq!(settings.node_mode, NodeMode::Mean);
        assert_eq!(settings.utc_offset_minutes, 330);
        assert_eq!(settings.bodies.len(), 9);
        assert_eq!(settings.bodies[0], Graha::Sun);
        assert_eq!(settings.bodies[8], Graha::Ketu);
    }

    #[test]
    fn test_sun_at_j2000_is_in_dhanu() {
        // Tropical 280.38° less Lahiri 23.85° is 256.5°: Dhanu, Purva Ashadha
        let calc = calculator(AyanamshaSystem::Lahiri);
        let instant = calc
            .instant_for(NaiveDateTime::parse_from_str("2000-01-01 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap())
            .unwrap();
        let sun = calc.position(Graha::Sun, &instant).unwrap();
        assert_relative_eq!(sun.longitude, 256.53, epsilon = 0.05);
        assert_eq!(sun.rashi, Rashi::Dhanu);
        assert_eq!(sun.nakshatra, Nakshatra::PurvaAshadha);
        assert!(!sun.retrograde);
    }

    #[test]
    fn test_true_lahiri_shifts_sidereal_by_nutation() {
        let instant = Instant::from_jd_ut(2_460_000.5);
        let dpsi = nutation_longitude_deg(instant.centuries_tdb());
        assert!(dpsi.abs() > 1e-3);

        for graha in [Graha::Sun, Graha::Jupiter, Graha::Rahu] {
            let mean = calculator(AyanamshaSystem::Lahiri).position(graha, &instant).unwrap();
            let truth = calculator(AyanamshaSystem::TrueLahiri).position(graha, &instant).unwrap();
            assert_relative_eq!(mean.tropical_longitude, truth.tropical_longitude, epsilon = 1e-12);
            assert_relative_eq!(angular_difference(truth.longitude, mean.longitude), dpsi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ketu_mirrors_rahu() {
        let calc = calculator(AyanamshaSystem::Lahiri);
        let instant = Instant::from_jd_ut(2_455_000.5);
        let rahu = calc.position(Graha::Rahu, &instant).unwrap();
        let ketu = calc.position(Graha::Ketu, &instant).unwrap();
        assert_eq!(ketu.longitude, opposite_node(rahu.longitude));
        assert_eq!(ketu.retrograde, rahu.retrograde);
        assert!(rahu.retrograde);
        assert_eq!(rahu.distance_au, None);
    }
}
