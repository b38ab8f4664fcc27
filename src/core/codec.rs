//! Tokio codec framing RCON packets over a byte stream.
//!
//! The decoder accumulates arbitrary chunks fed by the transport and yields
//! a packet only once the full declared frame is buffered, leaving any
//! trailing bytes in place for the next frame. Decoding a stream chunk by
//! chunk is byte-for-byte equivalent to decoding it in one piece.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::core::packet::{Packet, PacketType, FRAME_OVERHEAD, MAX_PAYLOAD_SIZE};
use crate::error::RconError;

/// Codec for RCON frames: `[size][id][type][payload][0x00 0x00]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RconCodec;

impl Decoder for RconCodec {
    type Item = Packet;
    type Error = RconError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, RconError> {
        if src.len() < 4 {
            return Ok(None);
        }

        let declared = i32::from_le_bytes([src[0], src[1], src[2], src[3]]);

        // The size field covers id + type + terminators at minimum; anything
        // below that (including zero and negative values) is malformed, and
        // anything above the ceiling is rejected before allocating.
        if declared < FRAME_OVERHEAD as i32 {
            return Err(RconError::Protocol(format!(
                "declared frame size {declared} below minimum of {FRAME_OVERHEAD}"
            )));
        }
        let declared = declared as usize;
        if declared > FRAME_OVERHEAD + MAX_PAYLOAD_SIZE {
            return Err(RconError::Protocol(format!(
                "declared frame size {declared} exceeds maximum of {}",
                FRAME_OVERHEAD + MAX_PAYLOAD_SIZE
            )));
        }

        let frame_len = 4 + declared;
        if src.len() < frame_len {
            // Need more data; reserve what the rest of the frame will take.
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        let mut frame = src.split_to(frame_len);
        frame.advance(4);
        let id = frame.get_i32_le();
        let ptype = PacketType(frame.get_i32_le());
        let payload = frame.split_to(declared - FRAME_OVERHEAD).to_vec();

        let terminators = [frame.get_u8(), frame.get_u8()];
        if terminators != [0, 0] {
            return Err(RconError::Protocol(format!(
                "frame terminators {terminators:?} are not NUL"
            )));
        }

        Ok(Some(Packet { id, ptype, payload }))
    }
}

impl Encoder<Packet> for RconCodec {
    type Error = RconError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<(), RconError> {
        if packet.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(RconError::Protocol(format!(
                "payload of {} bytes exceeds maximum of {MAX_PAYLOAD_SIZE}",
                packet.payload.len()
            )));
        }

        dst.reserve(4 + packet.wire_size());
        dst.put_i32_le(packet.wire_size() as i32);
        dst.put_i32_le(packet.id);
        dst.put_i32_le(packet.ptype.0);
        dst.put_slice(&packet.payload);
        dst.put_u8(0);
        dst.put_u8(0);
        Ok(())
    }
}
