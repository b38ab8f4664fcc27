use bytes::BytesMut;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rcon_gateway::core::codec::RconCodec;
use rcon_gateway::core::packet::{Packet, PacketType};
use tokio_util::codec::{Decoder, Encoder};

#[allow(clippy::unwrap_used)]
fn bench_codec_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("rcon_codec");
    let payload_sizes = [0usize, 64, 512, 4096];

    for &size in &payload_sizes {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("encode_{size}b"), |b| {
            b.iter_batched(
                || vec![0x61u8; size],
                |payload| {
                    let packet = Packet::new(1, PacketType::RESPONSE_VALUE, payload);
                    let mut buf = BytesMut::with_capacity(size + 16);
                    RconCodec.encode(packet, &mut buf).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        let mut frame = BytesMut::new();
        RconCodec
            .encode(
                Packet::new(1, PacketType::RESPONSE_VALUE, vec![0x61u8; size]),
                &mut frame,
            )
            .unwrap();
        group.bench_function(format!("decode_{size}b"), |b| {
            b.iter_batched(
                || frame.clone(),
                |mut buf| {
                    let decoded = RconCodec.decode(&mut buf).unwrap();
                    assert!(decoded.is_some());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec_encode_decode);
criterion_main!(benches);
