//! RCON packet structure and wire-level constants.
//!
//! A packet is `[size][id][type][payload][0x00 0x00]`, all integers
//! little-endian. The size field counts the id, type, payload, and both
//! terminator bytes — `10 + payload.len()`.

use std::borrow::Cow;

use crate::error::{RconError, Result};

/// Maximum payload size in bytes for a single packet.
///
/// 4096 is the conventional ceiling for the Source RCON protocol. Frames
/// that declare more than this are rejected on receive, and oversized
/// payloads are refused on send.
pub const MAX_PAYLOAD_SIZE: usize = 4096;

/// Bytes a frame occupies beyond its payload: id (4) + type (4) + two NUL
/// terminators. This is also the declared size of an empty packet.
pub const FRAME_OVERHEAD: usize = 10;

/// RCON packet type as it appears on the wire.
///
/// This is a newtype over the raw value rather than a closed enum because
/// the protocol reuses the value 2 for both `AUTH_RESPONSE` (clientbound)
/// and `EXECCOMMAND` (serverbound); which one a packet is follows from the
/// direction and position in the exchange, never from the value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketType(pub i32);

impl PacketType {
    /// Serverbound authentication request carrying the credential.
    pub const AUTH: PacketType = PacketType(3);

    /// Clientbound reply to an AUTH packet.
    pub const AUTH_RESPONSE: PacketType = PacketType(2);

    /// Serverbound command execution request.
    pub const EXECCOMMAND: PacketType = PacketType(2);

    /// Clientbound command output (possibly one of several).
    pub const RESPONSE_VALUE: PacketType = PacketType(0);
}

/// One RCON packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Request/response correlation id. The server echoes the id of the
    /// request it is answering; -1 in an AUTH_RESPONSE signals a rejected
    /// credential.
    pub id: i32,
    pub ptype: PacketType,
    /// Text payload as raw bytes. Server output is not guaranteed to be
    /// valid UTF-8, so the payload stays binary until [`Packet::body_text`].
    pub payload: Vec<u8>,
}

impl Packet {
    pub fn new(id: i32, ptype: PacketType, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            ptype,
            payload: payload.into(),
        }
    }

    /// Build an authentication request.
    pub fn auth(id: i32, credential: &str) -> Self {
        Self::new(id, PacketType::AUTH, credential.as_bytes())
    }

    /// Build a command execution request.
    pub fn exec(id: i32, command: &str) -> Self {
        Self::new(id, PacketType::EXECCOMMAND, command.as_bytes())
    }

    /// Declared wire size of this packet (the value of the size field).
    pub fn wire_size(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Payload decoded as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Serialize into a complete frame.
    ///
    /// # Errors
    /// Returns a protocol error if the payload exceeds [`MAX_PAYLOAD_SIZE`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(RconError::Protocol(format!(
                "payload of {} bytes exceeds maximum of {MAX_PAYLOAD_SIZE}",
                self.payload.len()
            )));
        }

        let mut buf = Vec::with_capacity(4 + self.wire_size());
        buf.extend_from_slice(&(self.wire_size() as i32).to_le_bytes());
        buf.extend_from_slice(&self.id.to_le_bytes());
        buf.extend_from_slice(&self.ptype.0.to_le_bytes());
        buf.extend_from_slice(&self.payload);
        buf.extend_from_slice(&[0, 0]);
        Ok(buf)
    }

    /// Deserialize a single complete frame.
    ///
    /// # Errors
    /// Returns a protocol error if the buffer is shorter than the declared
    /// frame, the size field is out of range, or the terminators are not
    /// both NUL. For incremental decoding over a stream use
    /// [`crate::core::codec::RconCodec`] instead.
    pub fn from_bytes(buf: &[u8]) -> Result<Packet> {
        use bytes::BytesMut;
        use tokio_util::codec::Decoder;

        let mut bytes = BytesMut::from(buf);
        match crate::core::codec::RconCodec.decode(&mut bytes)? {
            Some(packet) => Ok(packet),
            None => Err(RconError::Protocol(format!(
                "incomplete frame: {} bytes buffered",
                buf.len()
            ))),
        }
    }
}
