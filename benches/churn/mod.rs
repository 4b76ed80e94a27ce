use std::sync::Arc;

use aitree::{Interval, IntervalTree};
use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};

use crate::Lfsr;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("churn");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_insert(&mut g, n_values);
        bench_insert_remove(&mut g, n_values);
    }
}

fn generate(n_values: usize) -> Vec<Interval<u16>> {
    let mut rand = Lfsr::default();
    (0..n_values)
        .map(|_| {
            let (low, high) = rand.next_bounds();
            Interval::new(low, high)
        })
        .collect()
}

/// Build a tree of `n_values` shared-payload intervals from empty.
fn bench_insert<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let input = generate(n_values);
    let payload = Arc::new(42_usize);

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::new("insert", n_values), |b| {
        b.iter_batched(
            IntervalTree::default,
            |mut t| {
                for v in &input {
                    t.insert_interval(*v, Some(Arc::clone(&payload))).unwrap();
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}

/// Drain a populated tree by removing every interval in insertion order,
/// exercising the rebalancing remove path.
fn bench_insert_remove<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let input = generate(n_values);

    let mut full = IntervalTree::<u16, ()>::default();
    for v in &input {
        full.insert_interval(*v, None).unwrap();
    }

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::new("remove", n_values), |b| {
        b.iter_batched(
            || full.clone(),
            |mut t| {
                for v in &input {
                    assert!(t.remove(v).is_some());
                }
                assert!(t.is_empty());
                t
            },
            BatchSize::PerIteration,
        );
    });
}
