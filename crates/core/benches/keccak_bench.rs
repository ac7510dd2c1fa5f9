//! Benchmark for Keccak-256 digest and nonce reduction

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use keccak_miner_core::{KeccakHasher, ReduceParams, keccak256};

fn bench_digest(c: &mut Criterion) {
    let input = [0xA5u8; 120];

    let mut group = c.benchmark_group("keccak256");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("digest_120", |b| b.iter(|| keccak256(black_box(&input))));
    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut hasher = KeccakHasher::new();
    hasher
        .load(b"benchmark header for keccak nonce search--nonce--")
        .unwrap();

    c.bench_function("reduce_1000", |b| {
        let mut start: u64 = 0;
        b.iter(|| {
            let params = ReduceParams::new(49)
                .with_range(start, start + 1000)
                .with_min_zeros(4);
            start = start.wrapping_add(1000);
            hasher.reduce(black_box(&params), |_| {}).unwrap()
        })
    });
}

criterion_group!(benches, bench_digest, bench_reduce);
criterion_main!(benches);
