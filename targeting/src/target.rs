//! Per-cycle detection data from the perception host.

use serde::{Deserialize, Serialize};

/// One detected candidate target as a pixel-space bounding region.
///
/// Row coordinates grow downward, so a larger `y_max` means the box sits
/// lower in the frame. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBox {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl TargetBox {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Horizontal center of the box.
    pub fn middle_x(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    /// Lowest edge of the box. Targets standing closer on the ground plane
    /// project lower in the frame.
    pub fn bottom(&self) -> f32 {
        self.y_max
    }

    /// Vertical extent of the box.
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// All targets from one perception cycle, in detection order.
///
/// Detection order carries no priority; policies impose their own. The
/// container owns its elements and is constructed fresh every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetContainer {
    frame_width: f32,
    targets: Vec<TargetBox>,
}

impl TargetContainer {
    /// Build a container for one perception cycle.
    ///
    /// # Panics
    ///
    /// Panics if `frame_width` is not positive.
    pub fn new(frame_width: f32, targets: Vec<TargetBox>) -> Self {
        assert!(frame_width > 0.0, "frame width must be positive");
        Self {
            frame_width,
            targets,
        }
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    /// Horizontal center of the frame.
    pub fn frame_middle(&self) -> f32 {
        self.frame_width / 2.0
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn target(&self, index: usize) -> Option<TargetBox> {
        self.targets.get(index).copied()
    }

    /// Targets in canonical detection order.
    pub fn targets(&self) -> &[TargetBox] {
        &self.targets
    }

    /// Defensive copy for sort-based policies. The canonical detection order
    /// is never mutated by selection.
    pub fn cloned_targets(&self) -> Vec<TargetBox> {
        self.targets.clone()
    }
}
