//! Rig configuration: one YAML document, one section per component.
//!
//! Mirrors the launch-parameter surface of the original system as
//! strongly-typed structs validated up front, not string-keyed lookups at
//! tick time.

use crate::error::RuntimeResult;
use mc_control::{PidConfig, SetpointGenerator, Waveform};
use mc_core::ensure_positive;
use mc_plant::PlantConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Setpoint generator section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetpointConfig {
    /// Reference waveform.
    pub waveform: Waveform,
    /// Publish period (seconds). Defaults to the plant `sample_time_s`
    /// when absent.
    #[serde(default)]
    pub timer_period_s: Option<f64>,
}

/// Whole-rig configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    pub plant: PlantConfig,
    pub setpoint: SetpointConfig,
    pub controller: PidConfig,
}

impl RigConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> RuntimeResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load and parse a YAML file.
    pub fn load(path: &Path) -> RuntimeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Validate every section, failing fast on the first invalid parameter.
    pub fn validate(&self) -> RuntimeResult<()> {
        self.plant.validate()?;
        self.controller.validate()?;
        SetpointGenerator::new(self.setpoint.waveform)?;
        if let Some(period) = self.setpoint.timer_period_s {
            ensure_positive(period, "setpoint.timer_period_s must be positive")?;
        }
        Ok(())
    }

    /// Effective setpoint publish period.
    pub fn setpoint_period_s(&self) -> f64 {
        self.setpoint
            .timer_period_s
            .unwrap_or(self.plant.sample_time_s)
    }
}
