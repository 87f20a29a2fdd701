//! Throughput benchmarks for compressor sessions and decompressor runs

use archstream_compression::{read_data, CompressorSession};
use archstream_tests::test_utils::{generate_test_data, RecordingSink, TestDataPattern};
use archstream_types::WriterSink;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const SIZES: [(&str, usize); 3] = [("4KB", 4 * 1024), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)];

fn compress(code: i32, data: &[u8], record: usize) -> Vec<u8> {
    let mut session = CompressorSession::allocate(code, WriterSink::new(Vec::new())).unwrap();
    for piece in data.chunks(record) {
        session.write(piece).unwrap();
    }
    session.end().unwrap().into_inner()
}

/// Benchmark session writes across levels
fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for (size_name, size) in SIZES {
        let data = generate_test_data(size, TestDataPattern::Text);
        group.throughput(Throughput::Bytes(size as u64));

        for code in [0, 1, -1, 9] {
            group.bench_with_input(
                BenchmarkId::new(format!("code_{}", code), size_name),
                &data,
                |b, data| b.iter(|| black_box(compress(code, data, 8192))),
            );
        }
    }

    group.finish();
}

/// Benchmark small record writes, the pattern of a row-by-row dump
fn bench_small_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_records");
    let data = generate_test_data(256 * 1024, TestDataPattern::Text);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for record in [16, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(record), &record, |b, &record| {
            b.iter(|| {
                let mut session = CompressorSession::allocate(-1, RecordingSink::new()).unwrap();
                for piece in data.chunks(record) {
                    session.write(piece).unwrap();
                }
                black_box(session.end().unwrap().chunks().len())
            });
        });
    }

    group.finish();
}

/// Benchmark the full read loop
fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for (size_name, size) in SIZES {
        let data = generate_test_data(size, TestDataPattern::Mixed);
        let stored = compress(-1, &data, 8192);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("zlib", size_name), &stored, |b, stored| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size);
                let mut source = archstream_types::ReaderSource::new(stored.as_slice());
                read_data(-1, &mut source, &mut out).unwrap();
                black_box(out)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_small_records, bench_decompress);
criterion_main!(benches);
