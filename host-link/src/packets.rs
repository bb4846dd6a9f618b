//! Wire format for the host exchange.
//!
//! Frame layout: `id: u8`, `len: u16` little-endian, then `len` payload
//! bytes. Target coordinates travel as u16 pixel values.

use targeting::{TargetBox, TargetContainer};
use thiserror::Error;

/// Packet ids on the host exchange.
pub mod packet_id {
    /// Robot to host: request the current target set. Empty payload.
    pub const TARGET_INFO_REQUEST: u8 = 0x01;
    /// Host to robot: frame width plus the detected boxes.
    pub const TARGET_DIRECTION: u8 = 0x02;
    /// Robot to host: free-form debug text, fire and forget.
    pub const DEBUG_MESSAGE: u8 = 0x03;
}

/// Bytes per encoded target box: four u16 coordinates.
const BOX_WIRE_SIZE: usize = 8;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Anything but target data on the target exchange is a protocol
    /// violation; the driver treats this as fatal.
    #[error("unexpected packet id 0x{id:02x} on the target exchange")]
    UnexpectedPacket { id: u8 },
    #[error("malformed {what} payload: {detail}")]
    Malformed { what: &'static str, detail: String },
}

impl LinkError {
    fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            what,
            detail: detail.into(),
        }
    }
}

/// One decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    TargetInfoRequest,
    TargetDirection(TargetContainer),
    DebugMessage(String),
}

impl Packet {
    pub fn id(&self) -> u8 {
        match self {
            Self::TargetInfoRequest => packet_id::TARGET_INFO_REQUEST,
            Self::TargetDirection(_) => packet_id::TARGET_DIRECTION,
            Self::DebugMessage(_) => packet_id::DEBUG_MESSAGE,
        }
    }

    /// Encode as one framed byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let payload = match self {
            Self::TargetInfoRequest => Vec::new(),
            Self::TargetDirection(container) => encode_target_direction(container),
            Self::DebugMessage(text) => text.as_bytes().to_vec(),
        };
        let mut frame = Vec::with_capacity(3 + payload.len());
        frame.push(self.id());
        frame.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        frame.extend_from_slice(&payload);
        frame
    }

    /// Decode a frame from its id and payload.
    pub fn decode(id: u8, payload: &[u8]) -> Result<Self, LinkError> {
        match id {
            packet_id::TARGET_INFO_REQUEST => Ok(Self::TargetInfoRequest),
            packet_id::TARGET_DIRECTION => decode_target_direction(payload),
            packet_id::DEBUG_MESSAGE => match String::from_utf8(payload.to_vec()) {
                Ok(text) => Ok(Self::DebugMessage(text)),
                Err(err) => Err(LinkError::malformed("debug message", err.to_string())),
            },
            id => Err(LinkError::UnexpectedPacket { id }),
        }
    }
}

fn encode_target_direction(container: &TargetContainer) -> Vec<u8> {
    let mut payload = Vec::with_capacity(3 + container.target_count() * BOX_WIRE_SIZE);
    payload.extend_from_slice(&(container.frame_width().round() as u16).to_le_bytes());
    payload.push(container.target_count() as u8);
    for target in container.targets() {
        for coord in [target.x_min, target.x_max, target.y_min, target.y_max] {
            payload.extend_from_slice(&(coord.round() as u16).to_le_bytes());
        }
    }
    payload
}

fn decode_target_direction(payload: &[u8]) -> Result<Packet, LinkError> {
    const WHAT: &str = "target direction";

    if payload.len() < 3 {
        return Err(LinkError::malformed(WHAT, "payload shorter than header"));
    }
    let frame_width = u16::from_le_bytes([payload[0], payload[1]]);
    if frame_width == 0 {
        return Err(LinkError::malformed(WHAT, "zero frame width"));
    }
    let count = payload[2] as usize;
    let expected = 3 + count * BOX_WIRE_SIZE;
    if payload.len() != expected {
        return Err(LinkError::malformed(
            WHAT,
            format!("{} targets need {expected} bytes, got {}", count, payload.len()),
        ));
    }

    let mut targets = Vec::with_capacity(count);
    for chunk in payload[3..].chunks_exact(BOX_WIRE_SIZE) {
        let x_min = u16::from_le_bytes([chunk[0], chunk[1]]) as f32;
        let x_max = u16::from_le_bytes([chunk[2], chunk[3]]) as f32;
        let y_min = u16::from_le_bytes([chunk[4], chunk[5]]) as f32;
        let y_max = u16::from_le_bytes([chunk[6], chunk[7]]) as f32;
        if x_min > x_max || y_min > y_max {
            return Err(LinkError::malformed(WHAT, "inverted box bounds"));
        }
        let target = TargetBox::new(x_min, x_max, y_min, y_max);
        if target.middle_x() > f32::from(frame_width) {
            return Err(LinkError::malformed(WHAT, "target outside the frame"));
        }
        targets.push(target);
    }

    Ok(Packet::TargetDirection(TargetContainer::new(
        f32::from(frame_width),
        targets,
    )))
}
