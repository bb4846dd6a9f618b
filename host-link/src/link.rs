//! Blocking request/response session with the perception host.

use std::io::{Read, Write};

use targeting::TargetContainer;
use tracing::{debug, trace};

use crate::packets::{LinkError, Packet};

/// Source of fresh per-cycle target data.
///
/// The control loop re-polls this after every platform rotation, since
/// turning changes what the camera sees.
pub trait TargetSource {
    /// Request and receive one fresh target set.
    fn fetch_targets(&mut self) -> Result<TargetContainer, LinkError>;

    /// Relay a debug line to the host. Fire and forget: the host never
    /// replies to these.
    fn send_debug(&mut self, message: &str) -> Result<(), LinkError>;
}

/// Packet session over any byte stream transport.
pub struct HostLink<T: Read + Write> {
    transport: T,
}

impl<T: Read + Write> HostLink<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn send(&mut self, packet: &Packet) -> Result<(), LinkError> {
        self.transport.write_all(&packet.encode())?;
        self.transport.flush()?;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<(u8, Vec<u8>), LinkError> {
        let mut header = [0u8; 3];
        self.transport.read_exact(&mut header)?;
        let len = u16::from_le_bytes([header[1], header[2]]) as usize;
        let mut payload = vec![0u8; len];
        self.transport.read_exact(&mut payload)?;
        trace!(id = header[0], len, "received frame");
        Ok((header[0], payload))
    }
}

impl<T: Read + Write> TargetSource for HostLink<T> {
    fn fetch_targets(&mut self) -> Result<TargetContainer, LinkError> {
        self.send(&Packet::TargetInfoRequest)?;
        let (id, payload) = self.read_frame()?;
        match Packet::decode(id, &payload)? {
            Packet::TargetDirection(container) => {
                debug!(targets = container.target_count(), "received target set");
                Ok(container)
            }
            other => Err(LinkError::UnexpectedPacket { id: other.id() }),
        }
    }

    fn send_debug(&mut self, message: &str) -> Result<(), LinkError> {
        self.send(&Packet::DebugMessage(message.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::packet_id;
    use std::io::{self, Cursor};
    use targeting::TargetBox;

    /// In-memory transport: reads from a scripted inbound buffer, captures
    /// everything written.
    struct Loopback {
        inbound: Cursor<Vec<u8>>,
        outbound: Vec<u8>,
    }

    impl Loopback {
        fn scripted(inbound: Vec<u8>) -> Self {
            Self {
                inbound: Cursor::new(inbound),
                outbound: Vec::new(),
            }
        }
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inbound.read(buf)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.outbound.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn fetch_sends_request_and_decodes_response() {
        let response = Packet::TargetDirection(TargetContainer::new(
            480.0,
            vec![TargetBox::new(100.0, 140.0, 200.0, 340.0)],
        ));
        let mut link = HostLink::new(Loopback::scripted(response.encode()));

        let container = link.fetch_targets().unwrap();
        assert_eq!(container.target_count(), 1);
        assert_eq!(container.frame_width(), 480.0);

        let sent = link.into_transport().outbound;
        assert_eq!(sent, Packet::TargetInfoRequest.encode());
    }

    #[test]
    fn wrong_packet_on_target_exchange_fails() {
        let stray = Packet::DebugMessage("hello".into());
        let mut link = HostLink::new(Loopback::scripted(stray.encode()));

        let err = link.fetch_targets().unwrap_err();
        assert!(matches!(
            err,
            LinkError::UnexpectedPacket {
                id: packet_id::DEBUG_MESSAGE
            }
        ));
    }

    #[test]
    fn closed_transport_surfaces_io_error() {
        let mut link = HostLink::new(Loopback::scripted(Vec::new()));
        let err = link.fetch_targets().unwrap_err();
        assert!(matches!(err, LinkError::Io(_)));
    }

    #[test]
    fn debug_relay_writes_one_frame() {
        let mut link = HostLink::new(Loopback::scripted(Vec::new()));
        link.send_debug("r: 1, a: 0.25, d: 120").unwrap();
        let sent = link.into_transport().outbound;
        assert_eq!(sent[0], packet_id::DEBUG_MESSAGE);
    }
}
