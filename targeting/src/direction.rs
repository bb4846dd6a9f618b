//! Pixel offset to platform rotation angle.

use serde::{Deserialize, Serialize};

use crate::target::{TargetBox, TargetContainer};

/// Horizontal field-of-view projection for the mounted camera.
///
/// The frame center corresponds to the platform's current heading; a pixel at
/// the frame edge corresponds to the half-angle of the field of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionModel {
    /// Half of the camera's horizontal field of view, in degrees.
    pub fov_half_angle_deg: f32,
}

impl DirectionModel {
    pub fn new(fov_half_angle_deg: f32) -> Self {
        Self { fov_half_angle_deg }
    }

    /// Angle from the current heading to `target`, in degrees.
    ///
    /// Positive means the target sits right of center and a clockwise turn is
    /// needed; exactly zero when centered. Pure function, no side effects.
    pub fn angle_to(&self, container: &TargetContainer, target: &TargetBox) -> f32 {
        let frame_middle = container.frame_middle();
        let degrees_per_pixel = self.fov_half_angle_deg / frame_middle;
        (target.middle_x() - frame_middle) * degrees_per_pixel
    }
}
