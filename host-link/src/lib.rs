//! Packet link to the perception host.
//!
//! The host owns the camera and the detection model; the robot only ever asks
//! it for the current target set and occasionally relays a debug line back.
//! Framing is a minimal id + length prefix over any byte stream. The
//! transport itself (TCP, serial, ...) is supplied by the caller.

pub mod link;
pub mod packets;

pub use link::{HostLink, TargetSource};
pub use packets::{packet_id, LinkError, Packet};
