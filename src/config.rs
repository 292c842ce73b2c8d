//! TOML configuration for the calculator
//!
//! Every key is optional:
//!
//! ```toml
//! ayanamsha = "lahiri"
//! node = "mean"
//! utc_offset_minutes = 330
//! bodies = ["sun", "moon", "mars", "mercury", "jupiter", "venus", "saturn", "rahu", "ketu"]
//! kernel = "de440s.bsp"
//! ```
//!
//! Without `kernel` the analytic ephemeris is used. A relative kernel path
//! is resolved against the directory of the config file.

use log::info;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculator::CalculatorSettings;
use crate::constants::IST_OFFSET_MINUTES;
use crate::ephemeris::{AnalyticEphemeris, EphemerisError, EphemerisProvider, SpkEphemeris};
use crate::time::fixed_offset;
use crate::vedic::graha::ALL_GRAHAS;
use crate::vedic::{AyanamshaSystem, Graha, NodeMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    ayanamsha: Option<String>,
    #[serde(default)]
    node: Option<String>,
    #[serde(default = "default_offset")]
    utc_offset_minutes: i32,
    #[serde(default)]
    bodies: Option<Vec<String>>,
    #[serde(default)]
    kernel: Option<PathBuf>,
}

fn default_offset() -> i32 {
    IST_OFFSET_MINUTES
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ayanamsha: AyanamshaSystem,
    pub node: NodeMode,
    pub utc_offset_minutes: i32,
    pub bodies: Vec<Graha>,
    /// SPK kernel to read; `None` selects the analytic ephemeris
    pub kernel: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ayanamsha: AyanamshaSystem::default(),
            node: NodeMode::default(),
            utc_offset_minutes: IST_OFFSET_MINUTES,
            bodies: ALL_GRAHAS.to_vec(),
            kernel: None,
        }
    }
}

impl Config {
    /// Read and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let (Some(kernel), Some(dir)) = (&config.kernel, path.parent()) {
            if kernel.is_relative() {
                config.kernel = Some(dir.join(kernel));
            }
        }
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: ConfigToml = toml::from_str(text)?;
        Self::validate(raw)
    }

    fn validate(raw: ConfigToml) -> Result<Self> {
        let ConfigToml {
            ayanamsha,
            node,
            utc_offset_minutes,
            bodies,
            kernel,
        } = raw;

        let ayanamsha = match ayanamsha {
            Some(name) => name.parse().map_err(ConfigError::Invalid)?,
            None => AyanamshaSystem::default(),
        };
        let node = match node {
            Some(name) => name.parse().map_err(ConfigError::Invalid)?,
            None => NodeMode::default(),
        };
        fixed_offset(utc_offset_minutes).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let bodies = match bodies {
            None => ALL_GRAHAS.to_vec(),
            Some(names) => {
                let mut bodies = Vec::with_capacity(names.len());
                for name in &names {
                    let graha: Graha = name.parse().map_err(ConfigError::Invalid)?;
                    if bodies.contains(&graha) {
                        return Err(ConfigError::Invalid(format!("{graha} listed twice in bodies")));
                    }
                    bodies.push(graha);
                }
                if bodies.is_empty() {
                    return Err(ConfigError::Invalid("bodies must not be empty".to_string()));
                }
                bodies
            }
        };

        Ok(Self {
            ayanamsha,
            node,
            utc_offset_minutes,
            bodies,
            kernel,
        })
    }

    pub fn into_settings(self) -> CalculatorSettings {
        CalculatorSettings {
            ayanamsha: self.ayanamsha,
            node_mode: self.node,
            utc_offset_minutes: self.utc_offset_minutes,
            bodies: self.bodies,
        }
    }

    /// The ephemeris this config selects
    pub fn provider(&self) -> std::result::Result<Box<dyn EphemerisProvider>, EphemerisError> {
        match &self.kernel {
            Some(path) => Ok(Box::new(SpkEphemeris::open(path)?)),
            None => {
                info!("no kernel configured, using the analytic ephemeris");
                Ok(Box::new(AnalyticEphemeris::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.clone().into_settings(), CalculatorSettings::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            ayanamsha = "kp"
            node = "true"
            utc_offset_minutes = 0
            bodies = ["moon", "rahu", "ketu"]
            kernel = "/data/de440s.bsp"
            "#,
        )
        .unwrap();
        assert_eq!(config.ayanamsha, AyanamshaSystem::Krishnamurti);
        assert_eq!(config.node, NodeMode::True);
        assert_eq!(config.utc_offset_minutes, 0);
        assert_eq!(config.bodies, vec![Graha::Moon, Graha::Rahu, Graha::Ketu]);
        assert_eq!(config.kernel, Some(PathBuf::from("/data/de440s.bsp")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str("ayanamsha = \"galactic\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("node = \"osculating\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("utc_offset_minutes = 100000"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("utc_offset_minutes = 2147483647"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("bodies = [\"sun\", \"sun\"]"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(Config::from_toml_str("bodies = []"), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_toml_str("colour = \"red\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_resolves_kernel_next_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grahaghadi.toml");
        fs::write(&path, "kernel = \"de.bsp\"\nnode = \"true\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.kernel, Some(dir.path().join("de.bsp")));
        assert!(config.kernel.as_ref().unwrap().is_absolute());
        assert_eq!(config.node, NodeMode::True);

        fs::write(&path, "kernel = \"/data/de440s.bsp\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.kernel, Some(PathBuf::from("/data/de440s.bsp")));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match Config::load(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
