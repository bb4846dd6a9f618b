//! Configuration surface, loaded once at startup and immutable after.
//!
//! Defaults carry the bench-fitted calibration of the reference build; real
//! deployments override individual fields from a JSON file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use targeting::{DirectionModel, DistanceModel, PolicyKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Linear fit of launch distance (cm) against actuator power (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerFit {
    pub slope: f32,
    pub intercept: f32,
}

impl Default for PowerFit {
    fn default() -> Self {
        // distance = 78.102 + 0.802 * power, fitted on the bench.
        Self {
            slope: 0.802,
            intercept: 78.102,
        }
    }
}

/// Calibration constants, empirically fitted per robot build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Half of the camera's horizontal field of view, degrees.
    pub fov_half_angle_deg: f32,
    pub power_fit: PowerFit,
    /// Fixed mechanical offset added to the measured distance, cm.
    pub distance_offset_cm: f32,
    /// Ground-plane projection gain, cm·px.
    pub projection_gain: f32,
    /// Frame row where the ground plane vanishes.
    pub horizon_row: f32,
    /// Launch gearbox reduction, shaft degrees per output degree.
    pub shooter_gear_ratio: f32,
    /// Platform gearbox reduction.
    pub rotator_gear_ratio: f32,
    /// Drive power used for platform turns.
    pub turn_power: u8,
    /// Drive power of the reset stroke after a launch.
    pub reset_power: u8,
    /// Lowest power that still launches cleanly.
    pub min_power: i32,
    /// Actuator speed the power fit was recorded at, deg/s.
    pub reference_max_speed: f32,
    /// Rated speed of the installed actuator, deg/s.
    pub rated_max_speed: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            fov_half_angle_deg: 26.725,
            power_fit: PowerFit::default(),
            distance_offset_cm: 11.5,
            projection_gain: 36000.0,
            horizon_row: 60.0,
            shooter_gear_ratio: 4.630,
            rotator_gear_ratio: 5.0,
            turn_power: 40,
            reset_power: 15,
            min_power: 45,
            reference_max_speed: 900.0,
            rated_max_speed: 900.0,
        }
    }
}

/// Top-level fire-control configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FireControlConfig {
    pub policy: PolicyKind,
    /// Largest off-center angle still considered aligned, degrees.
    pub alignment_threshold_deg: f32,
    /// Stall timeout for counter-poll waits, milliseconds. Absent means wait
    /// forever, matching the original hardware behavior.
    pub stall_timeout_ms: Option<u64>,
    /// Relay telemetry over the debug channel after each shot.
    pub debug: bool,
    pub calibration: Calibration,
}

impl Default for FireControlConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Nearest,
            alignment_threshold_deg: 0.70,
            stall_timeout_ms: None,
            debug: false,
            calibration: Calibration::default(),
        }
    }
}

impl FireControlConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn direction_model(&self) -> DirectionModel {
        DirectionModel::new(self.calibration.fov_half_angle_deg)
    }

    pub fn distance_model(&self) -> DistanceModel {
        DistanceModel::new(self.calibration.projection_gain, self.calibration.horizon_row)
    }

    pub fn stall_timeout(&self) -> Option<Duration> {
        self.stall_timeout_ms.map(Duration::from_millis)
    }
}
