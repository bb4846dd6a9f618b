//! Target-selection policies.
//!
//! A policy picks exactly one target out of a [`TargetContainer`]. The
//! variant set is closed: new strategies add a variant here and a match arm
//! in [`TargetPolicy::select`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::target::{TargetBox, TargetContainer};

/// Config- and CLI-facing policy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    Nearest,
    LeastRotation,
    Random,
}

/// A target-selection strategy together with whatever state it needs.
#[derive(Debug, Clone)]
pub enum TargetPolicy {
    /// Shortest implied physical distance wins.
    Nearest,
    /// Smallest turn from the current heading wins.
    LeastRotation,
    /// Uniform draw over the detection set.
    Random(SmallRng),
}

impl TargetPolicy {
    pub fn new(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Nearest => Self::Nearest,
            PolicyKind::LeastRotation => Self::LeastRotation,
            PolicyKind::Random => Self::Random(SmallRng::from_os_rng()),
        }
    }

    /// Random policy with a fixed seed, for reproducible runs.
    pub fn random_seeded(seed: u64) -> Self {
        Self::Random(SmallRng::seed_from_u64(seed))
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Nearest => PolicyKind::Nearest,
            Self::LeastRotation => PolicyKind::LeastRotation,
            Self::Random(_) => PolicyKind::Random,
        }
    }

    /// Select one target, or `None` when the container is empty.
    ///
    /// A single-element container returns that element for every variant,
    /// including `Random`.
    pub fn select(&mut self, container: &TargetContainer) -> Option<TargetBox> {
        if container.target_count() <= 1 {
            return container.target(0);
        }

        match self {
            Self::Nearest => select_nearest(container),
            Self::LeastRotation => select_least_rotation(container),
            Self::Random(rng) => {
                let index = rng.random_range(0..container.target_count());
                container.target(index)
            }
        }
    }
}

fn select_nearest(container: &TargetContainer) -> Option<TargetBox> {
    // Lower in the frame means closer on the ground plane. Strict comparison
    // keeps the earliest detection on ties.
    let mut best = container.target(0)?;
    for candidate in &container.targets()[1..] {
        if candidate.bottom() > best.bottom() {
            best = *candidate;
        }
    }
    Some(best)
}

fn select_least_rotation(container: &TargetContainer) -> Option<TargetBox> {
    let frame_middle = container.frame_middle();

    // Sort a defensive copy; the stable sort keeps detection order on ties.
    let mut sorted = container.cloned_targets();
    sorted.sort_by(|a, b| {
        let da = (a.middle_x() - frame_middle).abs();
        let db = (b.middle_x() - frame_middle).abs();
        da.total_cmp(&db)
    });

    sorted.first().copied()
}
