//! Calibrated launch actuation.

use std::time::Duration;

use hardware::{Actuator, Direction, MotorController, StallError};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Calibration;

/// Direction the launch gearbox runs for the fire stroke.
const FIRE_DIRECTION: Direction = Direction::Forward;

/// Target distance outside the launcher's reachable band.
///
/// Recoverable: the cycle ends with an operator warning and no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("target too far: power {power} exceeds 100")]
    TooFar { power: i32 },
    #[error("target too close: power {power} below minimum {min}")]
    TooClose { power: i32, min: i32 },
}

/// Errors ending a launch attempt.
#[derive(Debug, Error)]
pub enum ShotError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Stall(#[from] StallError),
}

/// Converts a target distance to a safe power level and performs one
/// calibrated launch.
pub struct Shooter<A: Actuator> {
    motor: MotorController<A>,
    calibration: Calibration,
}

impl<A: Actuator> Shooter<A> {
    pub fn new(actuator: A, calibration: Calibration, stall_timeout: Option<Duration>) -> Self {
        let motor = MotorController::new(actuator, calibration.shooter_gear_ratio, stall_timeout);
        Self { motor, calibration }
    }

    /// Invert the distance/power fit and normalize for the installed
    /// actuator's rated speed.
    pub fn power_for_distance(&self, distance_cm: f32) -> i32 {
        let c = &self.calibration;
        let corrected = distance_cm + c.distance_offset_cm;
        let raw = (corrected - c.power_fit.intercept) / c.power_fit.slope;
        let compensation = c.reference_max_speed / c.rated_max_speed;
        (raw * compensation).round() as i32
    }

    /// One calibrated launch: validate the power, run the fire stroke, then
    /// the mandatory reset stroke.
    pub fn shoot(&mut self, distance_cm: f32) -> Result<(), ShotError> {
        let power = self.power_for_distance(distance_cm);
        if power > 100 {
            return Err(RangeError::TooFar { power }.into());
        }
        if power < self.calibration.min_power {
            return Err(RangeError::TooClose {
                power,
                min: self.calibration.min_power,
            }
            .into());
        }

        let degrees = self.stroke_degrees();
        info!(distance_cm, power, degrees, "firing");
        self.motor.start(power as u8, FIRE_DIRECTION);
        self.motor.wait_for_rotation(degrees)?;
        self.motor.stop();
        self.motor.reset_counter();

        self.reset_stroke(degrees)?;
        Ok(())
    }

    /// Restore the launch gearbox to its rest position.
    ///
    /// The actuator has no absolute position sensor; the opposite stroke is
    /// the only way to guarantee a known starting state for the next shot.
    fn reset_stroke(&mut self, degrees: u32) -> Result<(), StallError> {
        debug!(degrees, "reset stroke");
        self.motor
            .start(self.calibration.reset_power, FIRE_DIRECTION.opposite());
        self.motor.wait_for_rotation(degrees)?;
        self.motor.stop();
        self.motor.reset_counter();
        Ok(())
    }

    /// Shaft degrees of one half-turn of the launch arm.
    fn stroke_degrees(&self) -> u32 {
        (180.0 / self.motor.gear_ratio()).round() as u32
    }

    pub fn actuator(&self) -> &A {
        self.motor.actuator()
    }
}
