//! Actuator hardware contract.

/// Spin direction of the actuator shaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Register-level contract for one geared DC actuator.
///
/// Commands are fire-and-forget register writes; the only feedback is a
/// relative rotation counter in shaft degrees, signed by spin direction.
/// There is no absolute position sensor and no completion interrupt.
pub trait Actuator {
    /// Set drive power as a percentage, 0 to 100.
    fn set_power(&mut self, power: u8);

    /// Set the spin direction for subsequent drive.
    fn set_direction(&mut self, direction: Direction);

    /// Degrees of shaft rotation since the counter was last reset.
    /// Backward rotation counts down.
    fn rotation_count(&self) -> i32;

    /// Cut drive power.
    fn stop(&mut self);

    /// Zero the rotation counter.
    fn reset_rotation_count(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_inverts() {
        assert_eq!(Direction::Forward.opposite(), Direction::Backward);
        assert_eq!(Direction::Backward.opposite(), Direction::Forward);
    }
}
