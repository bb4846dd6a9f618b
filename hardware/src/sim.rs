//! Kinematic actuator model for running without robot hardware.

use std::time::Instant;

use crate::actuator::{Actuator, Direction};

/// Simulated geared actuator.
///
/// Integrates shaft rotation from the commanded power over wall time with a
/// linear power-to-speed model: full power spins at `max_speed_dps` shaft
/// degrees per second. Good enough for exercising the control loop end to
/// end on a bench with no motors attached.
#[derive(Debug)]
pub struct SimulatedActuator {
    max_speed_dps: f32,
    power: u8,
    direction: Direction,
    counter_base: f32,
    running_since: Option<Instant>,
}

impl SimulatedActuator {
    pub fn new(max_speed_dps: f32) -> Self {
        Self {
            max_speed_dps,
            power: 0,
            direction: Direction::Forward,
            counter_base: 0.0,
            running_since: None,
        }
    }

    fn signed_speed(&self) -> f32 {
        let speed = self.max_speed_dps * f32::from(self.power) / 100.0;
        match self.direction {
            Direction::Forward => speed,
            Direction::Backward => -speed,
        }
    }

    fn integrated(&self) -> f32 {
        match self.running_since {
            Some(since) => self.counter_base + self.signed_speed() * since.elapsed().as_secs_f32(),
            None => self.counter_base,
        }
    }

    /// Fold elapsed rotation into the base so a state change takes effect
    /// from this instant.
    fn latch(&mut self) {
        self.counter_base = self.integrated();
        self.running_since = (self.power > 0).then(Instant::now);
    }
}

impl Actuator for SimulatedActuator {
    fn set_power(&mut self, power: u8) {
        self.latch();
        self.power = power.min(100);
        self.running_since = (self.power > 0).then(Instant::now);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.latch();
        self.direction = direction;
    }

    fn rotation_count(&self) -> i32 {
        self.integrated() as i32
    }

    fn stop(&mut self) {
        self.latch();
        self.power = 0;
        self.running_since = None;
    }

    fn reset_rotation_count(&mut self) {
        self.counter_base = 0.0;
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn spins_forward_while_powered() {
        let mut sim = SimulatedActuator::new(900.0);
        sim.set_direction(Direction::Forward);
        sim.set_power(100);
        thread::sleep(Duration::from_millis(30));
        assert!(sim.rotation_count() > 0);
    }

    #[test]
    fn backward_counts_down() {
        let mut sim = SimulatedActuator::new(900.0);
        sim.set_direction(Direction::Backward);
        sim.set_power(100);
        thread::sleep(Duration::from_millis(30));
        assert!(sim.rotation_count() < 0);
    }

    #[test]
    fn stop_freezes_the_counter() {
        let mut sim = SimulatedActuator::new(900.0);
        sim.set_power(100);
        thread::sleep(Duration::from_millis(30));
        sim.stop();
        let frozen = sim.rotation_count();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(sim.rotation_count(), frozen);
    }

    #[test]
    fn reset_zeroes_while_running() {
        let mut sim = SimulatedActuator::new(900.0);
        sim.set_power(100);
        thread::sleep(Duration::from_millis(30));
        sim.reset_rotation_count();
        assert!(sim.rotation_count() < 5);
    }
}
