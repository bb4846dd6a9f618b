//! Target selection and aiming geometry for the turret fire-control system.
//!
//! Everything in this crate is pure decision logic over the per-cycle
//! detection data delivered by the perception host: which target to engage,
//! how far to rotate the platform towards it, and how far away it stands.
//! No I/O, no actuation, no shared state beyond the random policy's own PRNG.

pub mod direction;
pub mod distance;
pub mod policy;
pub mod target;

pub use direction::DirectionModel;
pub use distance::DistanceModel;
pub use policy::{PolicyKind, TargetPolicy};
pub use target::{TargetBox, TargetContainer};
