//! Platform rotation.

use std::time::Duration;

use hardware::{Actuator, Direction, MotorController, StallError};
use tracing::debug;

use crate::config::Calibration;

/// Turns the platform by a signed angle through the rotation gearbox.
///
/// Same counter-poll actuation pattern as the shooter but with no reset
/// stroke: the rotation itself is the desired effect. There is no range
/// validation either; any angle is assumed achievable.
pub struct Rotator<A: Actuator> {
    motor: MotorController<A>,
    turn_power: u8,
}

impl<A: Actuator> Rotator<A> {
    pub fn new(actuator: A, calibration: &Calibration, stall_timeout: Option<Duration>) -> Self {
        let motor = MotorController::new(actuator, calibration.rotator_gear_ratio, stall_timeout);
        Self {
            motor,
            turn_power: calibration.turn_power,
        }
    }

    /// Turn the platform by `angle_deg`. Positive is clockwise; negative
    /// reverses direction. Angles rounding to zero shaft degrees are a no-op.
    pub fn turn(&mut self, angle_deg: f32) -> Result<(), StallError> {
        let degrees = (angle_deg.abs() * self.motor.gear_ratio()).round() as u32;
        if degrees == 0 {
            return Ok(());
        }
        let direction = if angle_deg > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };

        debug!(angle_deg, degrees, ?direction, "rotating platform");
        self.motor.start(self.turn_power, direction);
        self.motor.wait_for_rotation(degrees)?;
        self.motor.stop();
        self.motor.reset_counter();
        Ok(())
    }

    pub fn actuator(&self) -> &A {
        self.motor.actuator()
    }
}
