//! Property-based tests using proptest
//!
//! These tests validate codec invariants across randomly generated
//! payloads and chunk boundaries.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::BytesMut;
use proptest::prelude::*;
use tokio_util::codec::{Decoder, Encoder};

use rcon_gateway::core::codec::RconCodec;
use rcon_gateway::core::packet::{Packet, PacketType, MAX_PAYLOAD_SIZE};

fn encode(packet: &Packet) -> BytesMut {
    let mut buf = BytesMut::new();
    RconCodec
        .encode(packet.clone(), &mut buf)
        .expect("payload within bounds");
    buf
}

// Property: any in-bounds packet round-trips through the codec
proptest! {
    #[test]
    fn prop_packet_roundtrip(
        id in any::<i32>(),
        ptype in prop_oneof![Just(0i32), Just(2), Just(3)],
        payload in prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
    ) {
        let packet = Packet::new(id, PacketType(ptype), payload.clone());
        let mut bytes = encode(&packet);

        let decoded = RconCodec.decode(&mut bytes).expect("decode").expect("complete");
        prop_assert_eq!(decoded.id, id);
        prop_assert_eq!(decoded.ptype, PacketType(ptype));
        prop_assert_eq!(decoded.payload, payload);
        prop_assert!(bytes.is_empty());
    }
}

// Property: encoding is deterministic
proptest! {
    #[test]
    fn prop_encode_deterministic(payload in prop::collection::vec(any::<u8>(), 0..1000)) {
        let packet = Packet::new(7, PacketType::RESPONSE_VALUE, payload);
        prop_assert_eq!(encode(&packet), encode(&packet));
    }
}

// Property: the size field always equals 10 + payload length
proptest! {
    #[test]
    fn prop_size_field_accurate(payload in prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE)) {
        let packet = Packet::new(1, PacketType::EXECCOMMAND, payload.clone());
        let bytes = encode(&packet);

        let declared = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        prop_assert_eq!(declared as usize, 10 + payload.len());
        prop_assert_eq!(bytes.len(), 4 + declared as usize);
    }
}

// Property: decoding a stream split at an arbitrary point is equivalent to
// decoding it whole
proptest! {
    #[test]
    fn prop_chunked_decode_equivalent(
        payload in prop::collection::vec(any::<u8>(), 0..2000),
        split_fraction in 0.0f64..1.0,
    ) {
        let packet = Packet::new(3, PacketType::RESPONSE_VALUE, payload);
        let bytes = encode(&packet);
        let split = ((bytes.len() as f64) * split_fraction) as usize;

        let mut codec = RconCodec;
        let mut buf = BytesMut::from(&bytes[..split]);
        // The prefix is always a strict subset of one frame, so the first
        // feed must ask for more data.
        prop_assert!(codec.decode(&mut buf).expect("no error").is_none());

        buf.extend_from_slice(&bytes[split..]);
        let decoded = codec.decode(&mut buf).expect("decode").expect("complete");
        prop_assert_eq!(decoded, packet);
        prop_assert!(buf.is_empty());
    }
}

// Property: random garbage never panics the decoder — it either yields a
// frame, asks for more data, or errors
proptest! {
    #[test]
    fn prop_decoder_never_panics(garbage in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut buf = BytesMut::from(&garbage[..]);
        let _ = RconCodec.decode(&mut buf);
    }
}
