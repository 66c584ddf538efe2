use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use segchain::{Segment, SegmentChain};

const GIB: u64 = 1024 * 1024 * 1024;

/// A 10 GiB chain with `edits` literal insertions spread evenly over it.
fn edited_chain(edits: u64) -> SegmentChain {
    let mut chain = SegmentChain::new();
    chain
        .append(Segment::periodic(0, 10 * GIB, "Hello, World!\n").unwrap())
        .unwrap();
    let step = chain.size() / (edits + 1);
    for i in 1..=edits {
        chain.insert_literal(i * step, format!("edit_{i}")).unwrap();
    }
    chain
}

fn bench_sequential_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_insert");

    for edits in [10u64, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*edits));
        group.bench_with_input(BenchmarkId::new("literal", edits), edits, |b, &edits| {
            b.iter(|| black_box(edited_chain(edits).segments().len()));
        });
    }
    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for edits in [100u64, 1000].iter() {
        let chain = edited_chain(*edits);
        let step = chain.size() / 1000;
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::new("positions", edits), &chain, |b, chain| {
            b.iter(|| {
                for i in 0..1000 {
                    black_box(chain.locate(i * step));
                }
            });
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let chain = edited_chain(100);

    for len in [64u64, 4096, 1024 * 1024].iter() {
        group.throughput(Throughput::Bytes(*len));
        group.bench_with_input(BenchmarkId::new("periodic", len), len, |b, &len| {
            b.iter(|| black_box(chain.extract(5 * GIB, 5 * GIB + len).unwrap()));
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for edits in [10u64, 100].iter() {
        let chain = edited_chain(*edits);
        group.bench_with_input(BenchmarkId::new("every_edit", edits), &chain, |b, chain| {
            b.iter(|| black_box(chain.search(b"edit_", 0, chain.size(), false).count()));
        });
    }

    let mut fragmented = SegmentChain::new();
    for i in 0..1000u64 {
        fragmented.append_literal(format!("{i:04}ab")).unwrap();
    }
    group.bench_function("across_boundaries", |b| {
        b.iter(|| black_box(fragmented.search(b"b0", 0, fragmented.size(), false).count()));
    });
    group.finish();
}

fn bench_delete_overwrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_overwrite");
    let chain = edited_chain(1000);

    group.bench_function("delete_middle", |b| {
        b.iter(|| {
            let mut chain = chain.clone();
            chain.delete(3 * GIB, 7 * GIB).unwrap();
            black_box(chain.size())
        });
    });
    group.bench_function("overwrite_middle", |b| {
        b.iter(|| {
            let mut chain = chain.clone();
            chain
                .overwrite(Segment::homogeneous(3 * GIB, 4 * GIB, b'-').unwrap())
                .unwrap();
            black_box(chain.size())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_insert,
    bench_locate,
    bench_extract,
    bench_search,
    bench_delete_overwrite
);
criterion_main!(benches);
