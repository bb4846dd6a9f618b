//! Counter-polled motor control.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::actuator::{Actuator, Direction};

/// Poll interval for the rotation counter.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// The actuator failed to reach its rotation target within the stall timeout.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("actuator stalled at {reached} of {target} deg after {waited:?}")]
pub struct StallError {
    /// Shaft degrees the wait was targeting.
    pub target: u32,
    /// Shaft degrees actually reached.
    pub reached: u32,
    /// How long the wait polled before giving up.
    pub waited: Duration,
}

/// Gearbox-aware wrapper around one [`Actuator`].
///
/// All waits are blocking counter polls since the hardware has no completion
/// interrupt. With no stall timeout configured a mechanical stall hangs the
/// wait indefinitely; callers opt into a timeout per controller.
#[derive(Debug)]
pub struct MotorController<A: Actuator> {
    actuator: A,
    gear_ratio: f32,
    stall_timeout: Option<Duration>,
}

impl<A: Actuator> MotorController<A> {
    /// # Panics
    ///
    /// Panics if `gear_ratio` is not positive.
    pub fn new(actuator: A, gear_ratio: f32, stall_timeout: Option<Duration>) -> Self {
        assert!(gear_ratio > 0.0, "gear ratio must be positive");
        Self {
            actuator,
            gear_ratio,
            stall_timeout,
        }
    }

    /// Fixed reduction between the actuator shaft and the effective output.
    pub fn gear_ratio(&self) -> f32 {
        self.gear_ratio
    }

    /// Command the actuator to run at `power` in `direction`.
    pub fn start(&mut self, power: u8, direction: Direction) {
        debug!(power, ?direction, "starting actuator");
        self.actuator.set_direction(direction);
        self.actuator.set_power(power.min(100));
    }

    /// Block until the rotation counter reaches `degrees` shaft degrees.
    ///
    /// Returns [`StallError`] if a stall timeout is configured and the
    /// counter has not reached the target in time. With no timeout this
    /// waits forever; the wait is not cancellable mid-stroke.
    pub fn wait_for_rotation(&mut self, degrees: u32) -> Result<(), StallError> {
        let started = Instant::now();
        loop {
            let reached = self.actuator.rotation_count().unsigned_abs();
            if reached >= degrees {
                return Ok(());
            }
            if let Some(timeout) = self.stall_timeout {
                if started.elapsed() >= timeout {
                    return Err(StallError {
                        target: degrees,
                        reached,
                        waited: started.elapsed(),
                    });
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Cut drive power.
    pub fn stop(&mut self) {
        self.actuator.stop();
    }

    /// Zero the rotation counter.
    pub fn reset_counter(&mut self) {
        self.actuator.reset_rotation_count();
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }
}
