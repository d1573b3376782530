//! Data-driven simulation parameters.
//!
//! Mirrors the tunables in [`crate::config`] as a [`SimParams`] resource so a
//! JSON file can override any subset of them. Fields missing from the file
//! keep their defaults.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    AUTOPLAY_ATTEMPTS, AUTOPLAY_FAST_FACTOR, AUTOPLAY_INTERVAL_TICKS, AUTOPLAY_RETOOL_TICKS,
    AUTOPLAY_VOLUME, CONSTRUCTION_RATE, CONSTRUCTION_STEP, FORBIDDEN_DIVISOR, MAX_HEIGHT,
};
use crate::constraint::ForbiddenNumber;

/// Environment variable naming a JSON parameter file.
pub const PARAMS_ENV: &str = "CWTN_PARAMS";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub forbidden_divisor: u32,
    pub max_height: u8,
    pub construction_step: f32,
    pub construction_rate: f32,
    pub autoplay_interval_ticks: u64,
    pub autoplay_retool_ticks: u64,
    pub autoplay_attempts: u32,
    pub autoplay_fast_factor: u64,
    pub autoplay_volume: f32,
    pub rng_seed: u64,
    /// Map loaded at startup.
    pub boot_category: String,
    pub boot_index: usize,
    pub boot_autoplay: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            forbidden_divisor: FORBIDDEN_DIVISOR,
            max_height: MAX_HEIGHT,
            construction_step: CONSTRUCTION_STEP,
            construction_rate: CONSTRUCTION_RATE,
            autoplay_interval_ticks: AUTOPLAY_INTERVAL_TICKS,
            autoplay_retool_ticks: AUTOPLAY_RETOOL_TICKS,
            autoplay_attempts: AUTOPLAY_ATTEMPTS,
            autoplay_fast_factor: AUTOPLAY_FAST_FACTOR,
            autoplay_volume: AUTOPLAY_VOLUME,
            rng_seed: 42,
            boot_category: "canvas".to_string(),
            boot_index: 2,
            boot_autoplay: true,
        }
    }
}

#[derive(Debug)]
pub enum ParamsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "cannot read parameter file: {e}"),
            ParamsError::Parse(e) => write!(f, "malformed parameter file: {e}"),
            ParamsError::Invalid(why) => write!(f, "invalid parameters: {why}"),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(e) => Some(e),
            ParamsError::Parse(e) => Some(e),
            ParamsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Parse(e)
    }
}

impl SimParams {
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: SimParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_file(path: &Path) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reads the file named by `CWTN_PARAMS`, falling back to the defaults
    /// (with a warning) when it is missing or rejected.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(PARAMS_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(params) => {
                info!("Loaded simulation parameters from {}", Path::new(&path).display());
                params
            }
            Err(e) => {
                warn!("Ignoring {}: {e}. Using defaults.", Path::new(&path).display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.forbidden_divisor < 2 {
            return Err(ParamsError::Invalid("forbidden_divisor must be at least 2"));
        }
        // Heights are a single hex digit and F marks a missing plot.
        if !(1..=14).contains(&self.max_height) {
            return Err(ParamsError::Invalid("max_height must be within 1..=14"));
        }
        if !(self.construction_step > 0.0 && self.construction_step < 1.0) {
            return Err(ParamsError::Invalid("construction_step must be within (0, 1)"));
        }
        if !(self.construction_rate > 0.0) || !self.construction_rate.is_finite() {
            return Err(ParamsError::Invalid("construction_rate must be positive"));
        }
        if self.autoplay_interval_ticks == 0
            || self.autoplay_retool_ticks == 0
            || self.autoplay_fast_factor == 0
        {
            return Err(ParamsError::Invalid("autoplay cadences must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.autoplay_volume) {
            return Err(ParamsError::Invalid("autoplay_volume must be within 0..=1"));
        }
        Ok(())
    }

    pub fn oracle(&self) -> ForbiddenNumber {
        ForbiddenNumber::new(self.forbidden_divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimParams::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = SimParams::from_json(r#"{ "forbidden_divisor": 7, "rng_seed": 9 }"#).unwrap();
        assert_eq!(params.forbidden_divisor, 7);
        assert_eq!(params.rng_seed, 9);
        assert_eq!(params.max_height, MAX_HEIGHT);
        assert_eq!(params.boot_category, "canvas");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            SimParams::from_json(r#"{ "forbidden_divisor": 1 }"#),
            Err(ParamsError::Invalid(_))
        ));
        assert!(matches!(
            SimParams::from_json(r#"{ "max_height": 15 }"#),
            Err(ParamsError::Invalid(_))
        ));
        assert!(matches!(
            SimParams::from_json(r#"{ "autoplay_interval_ticks": 0 }"#),
            Err(ParamsError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimParams::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ParamsError::Parse(_)));
        assert!(err.to_string().starts_with("malformed"));
    }

    #[test]
    fn test_json_roundtrip() {
        let params = SimParams {
            construction_rate: 4.0,
            boot_autoplay: false,
            ..SimParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(SimParams::from_json(&json).unwrap(), params);
    }
}
