// Benchmark suite for the piece table
//
// Workloads:
// - sequential typing: every insert continues the last one
// - backspace: every delete ends where the last one started
// - random inserts and mixed edits: no locality, every edit resolves
//   its position by scanning
// - clustered edits: short typing bursts at random places, the common
//   case for an editor

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use piecework::PieceTable;

const ORIGINAL: &str = "The quick brown fox jumps over the lazy dog.\n";

fn original(lines: usize) -> String {
    return ORIGINAL.repeat(lines);
}

fn random_char(rng: &mut StdRng) -> String {
    return char::from(rng.gen_range(b'a'..=b'z')).to_string();
}

// =============================================================================
// Workloads
// =============================================================================

fn sequential_typing(table: &mut PieceTable, ops: usize) {
    let mut cursor = table.len() / 2;
    for i in 0..ops {
        let c = char::from(b'a' + (i % 26) as u8);
        table.insert(c.encode_utf8(&mut [0; 4]), cursor);
        cursor += 1;
    }
}

fn backspace(table: &mut PieceTable, ops: usize) {
    let mut cursor = table.len();
    for _ in 0..ops.min(cursor) {
        table.delete(1, cursor).unwrap();
        cursor -= 1;
    }
}

fn random_inserts(table: &mut PieceTable, ops: usize, rng: &mut StdRng) {
    for _ in 0..ops {
        let pos = rng.gen_range(0..=table.len());
        table.insert(&random_char(rng), pos);
    }
}

fn mixed_operations(table: &mut PieceTable, ops: usize, rng: &mut StdRng) {
    for _ in 0..ops {
        let len = table.len();
        // 70% insert, 30% delete (typical editing pattern)
        if len == 0 || rng.gen_bool(0.7) {
            let pos = rng.gen_range(0..=len);
            table.insert(&random_char(rng), pos);
        } else {
            let pos = rng.gen_range(1..=len);
            table.delete(1, pos).unwrap();
        }
    }
}

fn clustered_edits(table: &mut PieceTable, ops: usize, rng: &mut StdRng) {
    let mut cursor = 0;
    for _ in 0..ops {
        if rng.gen_bool(0.05) {
            cursor = rng.gen_range(0..=table.len());
        }
        if cursor > 0 && rng.gen_bool(0.2) {
            table.delete(1, cursor).unwrap();
            cursor -= 1;
        } else {
            table.insert(&random_char(rng), cursor);
            cursor += 1;
        }
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_sequential_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_typing");
    let text = original(100);

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut table = PieceTable::new(&text);
                sequential_typing(&mut table, size);
                black_box(table.piece_count())
            });
        });
    }

    group.finish();
}

fn bench_backspace(c: &mut Criterion) {
    let mut group = c.benchmark_group("backspace");
    let text = original(250);

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut table = PieceTable::new(&text);
                backspace(&mut table, size);
                black_box(table.len())
            });
        });
    }

    group.finish();
}

fn bench_random_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_inserts");
    let text = original(100);

    for size in [100, 1000, 5000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut table = PieceTable::new(&text);
                let mut rng = StdRng::seed_from_u64(42);
                random_inserts(&mut table, size, &mut rng);
                black_box(table.piece_count())
            });
        });
    }

    group.finish();
}

fn bench_mixed_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_operations");
    let text = original(100);

    for size in [100, 1000, 5000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut table = PieceTable::new(&text);
                let mut rng = StdRng::seed_from_u64(42);
                mixed_operations(&mut table, size, &mut rng);
                black_box(table.len())
            });
        });
    }

    group.finish();
}

fn bench_clustered_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustered_edits");
    let text = original(100);

    for size in [1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut table = PieceTable::new(&text);
                let mut rng = StdRng::seed_from_u64(42);
                clustered_edits(&mut table, size, &mut rng);
                black_box(table.len())
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [1000, 5000] {
        let mut table = PieceTable::new(&original(100));
        let mut rng = StdRng::seed_from_u64(42);
        random_inserts(&mut table, size, &mut rng);

        group.throughput(Throughput::Elements(table.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(table.render()));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_sequential_typing,
    bench_backspace,
    bench_random_inserts,
    bench_mixed_operations,
    bench_clustered_edits,
    bench_render,
);

criterion_main!(benches);
