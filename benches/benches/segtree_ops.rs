// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_segtree::{Aggregation, SegmentTree, Sum, SumTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
    fn range(&mut self, n: usize) -> (usize, usize) {
        let a = self.below(n);
        let b = self.below(n);
        (a.min(b), a.max(b))
    }
}

fn gen_values(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = Rng::new(seed);
    (0..n).map(|_| (rng.next_u64() % 1000) as i64).collect()
}

fn gen_ranges(n: usize, count: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = Rng::new(seed);
    (0..count).map(|_| rng.range(n)).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_024usize, 16_384, 131_072] {
        let values = gen_values(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("sum_n{}", n), |b| {
            b.iter(|| {
                let tree = SumTree::build_from(Sum, black_box(&values)).unwrap();
                black_box(tree.len());
            })
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_query");
    let n = 65_536;
    let values = gen_values(n, 0xBADC_F00D_1234_5678);
    let ranges = gen_ranges(n, 1_000, 0xC1A5_7E55_9999_ABCD);
    group.throughput(Throughput::Elements(ranges.len() as u64));
    for agg in [Aggregation::Sum, Aggregation::Min, Aggregation::Max] {
        let mut tree = SegmentTree::build_from(agg, &values).unwrap();
        group.bench_function(agg.name(), |b| {
            b.iter(|| {
                let mut acc = 0_i64;
                for &(lo, hi) in &ranges {
                    acc = acc.wrapping_add(tree.range_query(lo, hi).unwrap());
                }
                black_box(acc);
            })
        });
    }
    group.finish();
}

fn bench_update_query_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_query_mix");
    for &n in &[4_096usize, 65_536] {
        let values = gen_values(n, 0xFACE_FEED_CAFE_BABE);
        let ranges = gen_ranges(n, 1_000, 0x1234_5678_9ABC_DEF0);
        group.throughput(Throughput::Elements(ranges.len() as u64));
        for agg in [Aggregation::Sum, Aggregation::Min] {
            group.bench_function(format!("{}_n{}", agg.name(), n), |b| {
                b.iter_batched(
                    || SegmentTree::build_from(agg, &values).unwrap(),
                    |mut tree| {
                        for (i, &(lo, hi)) in ranges.iter().enumerate() {
                            if i % 2 == 0 {
                                tree.range_update(lo, hi, 3).unwrap();
                            } else {
                                black_box(tree.range_query(lo, hi).unwrap());
                            }
                        }
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let values = gen_values(64, 0x0DDB_A11C_AFE0_0001);
    let tree = SumTree::build_from(Sum, &values).unwrap();
    c.bench_function("render_n64", |b| {
        b.iter(|| black_box(tree.render().unwrap().len()))
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_query,
    bench_update_query_mix,
    bench_render,
);
criterion_main!(benches);
