//! Configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::consts::{ARC_MIN_RADIUS, DEFAULT_PREFERRED_RADIUS, HIT_TOLERANCE_PX, PREFERRED_RADIUS_MAX, PREFERRED_RADIUS_MIN};

pub const ENV_HIT_TOLERANCE: &str = "COMPASS_HIT_TOLERANCE_PX";
pub const ENV_RADIUS_MIN: &str = "COMPASS_RADIUS_MIN";
pub const ENV_RADIUS_MAX: &str = "COMPASS_RADIUS_MAX";
pub const ENV_DEFAULT_RADIUS: &str = "COMPASS_DEFAULT_RADIUS";
pub const ENV_RADIUS_FILE: &str = "COMPASS_RADIUS_FILE";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("radius bounds inverted: min {min} > max {max}")]
    RadiusBounds { min: f64, max: f64 },
    #[error("radius min {min} must exceed {floor}")]
    RadiusMinTooSmall { min: f64, floor: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompassConfig {
    /// Maximum distance, in pixels, for a selection pick to land.
    pub hit_tolerance: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Preferred radius when nothing is stored.
    pub default_radius: f64,
    /// JSON file backing the preferred radius. `None` keeps it in memory.
    pub radius_file: Option<PathBuf>,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: HIT_TOLERANCE_PX,
            radius_min: PREFERRED_RADIUS_MIN,
            radius_max: PREFERRED_RADIUS_MAX,
            default_radius: DEFAULT_PREFERRED_RADIUS,
            radius_file: None,
        }
    }
}

impl CompassConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `COMPASS_HIT_TOLERANCE_PX`: default 8
    /// - `COMPASS_RADIUS_MIN`: default 1
    /// - `COMPASS_RADIUS_MAX`: default 10000
    /// - `COMPASS_DEFAULT_RADIUS`: default 100
    /// - `COMPASS_RADIUS_FILE`: no default; the radius is not persisted
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a value that is not a finite non-negative
    /// number, when the radius bounds are inverted, or when the minimum
    /// radius is too small for an arc.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// See [`CompassConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let hit_tolerance = parse_number(ENV_HIT_TOLERANCE, get(ENV_HIT_TOLERANCE), defaults.hit_tolerance)?;
        let radius_min = parse_number(ENV_RADIUS_MIN, get(ENV_RADIUS_MIN), defaults.radius_min)?;
        let radius_max = parse_number(ENV_RADIUS_MAX, get(ENV_RADIUS_MAX), defaults.radius_max)?;
        let default_radius = parse_number(ENV_DEFAULT_RADIUS, get(ENV_DEFAULT_RADIUS), defaults.default_radius)?;
        let radius_file = get(ENV_RADIUS_FILE).map(PathBuf::from);

        if radius_min <= ARC_MIN_RADIUS {
            return Err(ConfigError::RadiusMinTooSmall { min: radius_min, floor: ARC_MIN_RADIUS });
        }
        if radius_min > radius_max {
            return Err(ConfigError::RadiusBounds { min: radius_min, max: radius_max });
        }

        Ok(Self { hit_tolerance, radius_min, radius_max, default_radius, radius_file })
    }
}

fn parse_number(var: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}
