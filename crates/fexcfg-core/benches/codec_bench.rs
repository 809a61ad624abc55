//! Criterion benchmarks for the preset codec.
//!
//! The settings screen encodes on every save and decodes on every open, so
//! these are tiny; the benchmark mainly guards against accidental allocation
//! creep in the JSON path.
//!
//! Run with:
//! ```bash
//! cargo bench --package fexcfg-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fexcfg_core::{decode, encode, encode_selection, ConfigDocument, PresetSelection};

const SAMPLE_DOC: &str = r#"{"Config":{"Multiblock":"1","TSOEnabled":"1","VectorTSOEnabled":"1","MemcpySetTSOEnabled":"1","HalfBarrierTSOEnabled":"0","X87ReducedPrecision":"1"}}"#;

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    group.bench_function("encode_names", |b| {
        b.iter(|| encode(black_box("Slowest"), black_box("Fast"), black_box("Enabled")))
    });

    group.bench_function("encode_all_selections", |b| {
        b.iter(|| {
            PresetSelection::all()
                .map(|s| encode_selection(black_box(&s)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let record = encode("Slow", "Slow", "Disabled");

    group.bench_function("decode_record", |b| b.iter(|| decode(black_box(&record))));

    group.bench_function("parse_and_decode_document", |b| {
        b.iter(|| {
            let doc = ConfigDocument::from_json(black_box(SAMPLE_DOC)).expect("valid doc");
            decode(&doc.config)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
