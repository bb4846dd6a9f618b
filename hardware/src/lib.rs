//! Actuator drivers for the turret platform.
//!
//! The platform's motors expose no absolute position sensing, only a relative
//! rotation counter in shaft degrees. All motion is therefore open-loop:
//! command a power, poll the counter until it reaches a target, stop. The
//! [`Actuator`] trait is the seam between the control logic and the physical
//! (or simulated) motor registers.

pub mod actuator;
pub mod mock;
pub mod motor;
pub mod sim;

pub use actuator::{Actuator, Direction};
pub use motor::{MotorController, StallError};
pub use sim::SimulatedActuator;
