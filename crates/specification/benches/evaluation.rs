use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use patternkit_specification::{Field, Specification, SpecificationBuilder};

#[derive(Debug, Clone)]
struct Order {
    total: u64,
    items: u32,
    region: &'static str,
    priority: bool,
}

fn orders(n: usize) -> Vec<Order> {
    let regions = ["eu", "us", "apac", "latam"];
    (0..n)
        .map(|i| Order {
            total: (i as u64 * 37) % 10_000,
            items: (i as u32 % 12) + 1,
            region: regions[i % regions.len()],
            priority: i % 3 == 0,
        })
        .collect()
}

fn rule() -> Specification<Order> {
    let total = Field::new("total", |o: &Order| &o.total);
    let items = Field::new("items", |o: &Order| &o.items);
    let region = Field::new("region", |o: &Order| &o.region);
    let priority = Field::new("priority", |o: &Order| &o.priority);

    let bulk = SpecificationBuilder::new()
        .between(&total, 500, 8_000)
        .greater_than(&items, 3)
        .one_of(&region, ["eu", "us"])
        .build()
        .expect("non-empty builder");

    bulk.or(&Specification::equals(&priority, true))
}

/// Evaluate a mixed AND/OR tree over growing candidate sets.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("specification_filter");
    let spec = rule();

    for size in [100usize, 1_000, 10_000] {
        let candidates = orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, xs| {
            b.iter(|| black_box(spec.filter(xs).len()));
        });
    }

    group.finish();
}

/// Compare a deep builder-folded conjunction against a single leaf.
fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("specification_depth");
    let total = Field::new("total", |o: &Order| &o.total);
    let candidates = orders(1_000);

    for depth in [1usize, 8, 32] {
        let mut builder = SpecificationBuilder::new();
        for _ in 0..depth {
            builder = builder.less_than(&total, 20_000);
        }
        let spec = builder.build().expect("non-empty builder");

        group.bench_with_input(BenchmarkId::from_parameter(depth), &candidates, |b, xs| {
            b.iter(|| black_box(spec.all_satisfy(xs)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_depth);
criterion_main!(benches);
