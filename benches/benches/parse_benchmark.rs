//! Feed parser benchmarks.
//!
//! Run with: `cargo bench --package aastocks-bench`

use aastocks_bench::synthetic_feed;
use aastocks_fetch::SeriesParser;
use aastocks_types::PriceFrequency;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for frequency in [PriceFrequency::Hourly, PriceFrequency::Daily] {
        for rows in [100usize, 1_000, 10_000] {
            let body = synthetic_feed(frequency, rows);
            let parser = SeriesParser::new(frequency).with_year(2015);

            group.throughput(Throughput::Bytes(body.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(frequency.as_str(), rows),
                &body,
                |b, body| {
                    b.iter(|| {
                        let series = parser.parse(black_box(body.as_bytes())).unwrap();
                        black_box(series.len())
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, parse_benchmark);
criterion_main!(benches);
