//! Criterion benchmarks for the bundled codecs
//!
//! Complements the built-in runner with criterion's statistics and HTML
//! reports. Codecs that fail on the fixture are skipped.

use codec_bench::codec::CodecRegistry;
use codec_bench::value::Sample;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bench_serialize(c: &mut Criterion) {
    let registry = CodecRegistry::with_defaults().unwrap();
    let value = Sample::fixture().to_value();
    let mut group = c.benchmark_group("serialize");

    for codec in registry.list() {
        if codec.serialize(&value).is_err() {
            continue;
        }
        group.bench_with_input(BenchmarkId::from_parameter(codec.name()), &value, |b, value| {
            b.iter(|| codec.serialize(black_box(value)))
        });
    }

    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let registry = CodecRegistry::with_defaults().unwrap();
    let value = Sample::fixture().to_value();
    let mut group = c.benchmark_group("deserialize");

    for codec in registry.list() {
        let Ok(payload) = codec.serialize(&value) else {
            continue;
        };
        if codec.deserialize(&payload).is_err() {
            continue;
        }
        group.bench_with_input(BenchmarkId::from_parameter(codec.name()), &payload, |b, payload| {
            b.iter(|| codec.deserialize(black_box(payload)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_serialize, bench_deserialize);
criterion_main!(benches);
