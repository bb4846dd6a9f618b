//! Aim-and-fire decision pipeline for the projectile turret.
//!
//! One [`FireControl`] instance owns the whole pipeline for one robot:
//! fetch targets from the perception host, pick one by policy, rotate the
//! platform until aligned, convert the target's geometry to a distance, and
//! launch with calibrated power. The loop itself never terminates the
//! process; fatal errors propagate as typed results and the console driver
//! alone decides to exit.

pub mod config;
pub mod control;
pub mod feedback;
pub mod rotator;
pub mod shooter;

pub use config::{Calibration, ConfigError, FireControlConfig, PowerFit};
pub use control::{CycleOutcome, FireControl, FireControlError};
pub use feedback::{AbortCode, LogFeedback, OperatorFeedback};
pub use rotator::Rotator;
pub use shooter::{RangeError, Shooter, ShotError};
