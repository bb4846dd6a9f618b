//! Calibrated ground-plane distance projection.

use serde::{Deserialize, Serialize};

use crate::target::TargetBox;

/// Similar-triangles projection from a target's bottom edge to its ground
/// distance.
///
/// Targets stand on the floor, so a closer target projects lower in the
/// frame. `horizon_row` is the row where the ground plane vanishes;
/// `projection_gain` folds camera height and focal length into one fitted
/// constant (cm·px). Both are fitted per robot build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceModel {
    /// Projection gain in cm·px.
    pub projection_gain: f32,
    /// Frame row where the ground plane vanishes.
    pub horizon_row: f32,
}

impl DistanceModel {
    pub fn new(projection_gain: f32, horizon_row: f32) -> Self {
        Self {
            projection_gain,
            horizon_row,
        }
    }

    /// Ground distance to `target` in cm.
    ///
    /// Deterministic and strictly decreasing in the target's bottom row. At
    /// or above the horizon the projection degenerates; the target is
    /// reported as unreachably far and range validation rejects it downstream.
    pub fn distance_to(&self, target: &TargetBox) -> f32 {
        let drop = target.bottom() - self.horizon_row;
        if drop <= 0.0 {
            return f32::INFINITY;
        }
        self.projection_gain / drop
    }
}
