//! Recording test double for the actuator contract.

use std::cell::Cell;

use crate::actuator::{Actuator, Direction};

/// Everything a [`RecordingActuator`] was asked to do, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorEvent {
    SetDirection(Direction),
    SetPower(u8),
    Stop,
    ResetCounter,
}

/// Scripted actuator for tests.
///
/// While powered, the counter advances by a fixed number of shaft degrees
/// (signed by the current direction) each time it is read, so counter-poll
/// waits terminate after a handful of polls. Every command is recorded for
/// later assertions.
#[derive(Debug)]
pub struct RecordingActuator {
    events: Vec<ActuatorEvent>,
    counter: Cell<i32>,
    degrees_per_read: i32,
    power: u8,
    direction: Direction,
}

impl RecordingActuator {
    pub fn new(degrees_per_read: i32) -> Self {
        Self {
            events: Vec::new(),
            counter: Cell::new(0),
            degrees_per_read,
            power: 0,
            direction: Direction::Forward,
        }
    }

    /// An actuator whose counter never moves, for stall tests.
    pub fn stalled() -> Self {
        Self::new(0)
    }

    pub fn events(&self) -> &[ActuatorEvent] {
        &self.events
    }

    /// Current counter value without advancing it.
    pub fn counter(&self) -> i32 {
        self.counter.get()
    }
}

impl Actuator for RecordingActuator {
    fn set_power(&mut self, power: u8) {
        self.power = power;
        self.events.push(ActuatorEvent::SetPower(power));
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.events.push(ActuatorEvent::SetDirection(direction));
    }

    fn rotation_count(&self) -> i32 {
        if self.power > 0 {
            let step = match self.direction {
                Direction::Forward => self.degrees_per_read,
                Direction::Backward => -self.degrees_per_read,
            };
            self.counter.set(self.counter.get() + step);
        }
        self.counter.get()
    }

    fn stop(&mut self) {
        self.power = 0;
        self.events.push(ActuatorEvent::Stop);
    }

    fn reset_rotation_count(&mut self) {
        self.counter.set(0);
        self.events.push(ActuatorEvent::ResetCounter);
    }
}
