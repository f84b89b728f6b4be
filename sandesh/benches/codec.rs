//! Codec Benchmarks
//!
//! - Event -> protobuf event (sparse encode)
//! - protobuf events -> Event (decode)
//! - Full `Msg` serialization as written to the wire
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use prost::Message;
use sandesh::proto::Msg;
use sandesh::{Event, codec};

fn full_event(i: usize) -> Event {
    Event {
        ttl: 60.0,
        time: 1_700_000_000 + i as i64,
        host: format!("web-{:02}", i % 16),
        state: "ok".to_string(),
        service: "api latency".to_string(),
        description: "p99 over 1m".to_string(),
        double: 12.5 + i as f64,
        ..Default::default()
    }
}

fn bench_encode(c: &mut Criterion) {
    let full = full_event(0);
    let sparse = Event::new("heartbeat");

    c.bench_function("encode_full_event", |b| {
        b.iter(|| codec::encode(black_box(&full)))
    });
    c.bench_function("encode_sparse_event", |b| {
        b.iter(|| codec::encode(black_box(&sparse)))
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for count in [1usize, 100, 1000] {
        let wire: Vec<_> = (0..count).map(|i| codec::encode(&full_event(i))).collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &wire, |b, wire| {
            b.iter(|| codec::decode(black_box(wire.clone())))
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_msg");
    for count in [1usize, 100] {
        let events: Vec<Event> = (0..count).map(full_event).collect();
        let msg = Msg::with_events(codec::encode_all(&events));
        group.throughput(Throughput::Bytes(msg.encoded_len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &msg, |b, msg| {
            b.iter(|| black_box(msg).encode_to_vec())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_serialize);
criterion_main!(benches);
