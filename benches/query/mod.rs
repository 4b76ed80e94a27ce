use std::hint::black_box;

use aitree::IntervalTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("query");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = IntervalTree::default();

    for _i in 0..n_values {
        let (low, high) = rand.next_bounds();
        t.insert(low, high, None::<std::sync::Arc<usize>>).unwrap();
    }

    bench_iter(n_values, g, &t);
    bench_overlapping(n_values, g, &t);
    bench_find_by_min_max(n_values, g, &t);
    bench_containing(n_values, g, &t);
    bench_max_high_overlapping(n_values, g, &t);
}

fn bench_iter<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &IntervalTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}

fn bench_containing<M>(
    n_values: usize,
    g: &mut BenchmarkGroup<'_, M>,
    t: &IntervalTree<u16, usize>,
) where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "containing",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| black_box(t.containing(&4242)))
    });
}

macro_rules! range_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &IntervalTree<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _));
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| black_box(t.$name(&4200, &4300)))
                });
            }
        }
    }
}

range_bench!(overlapping);
range_bench!(find_by_min_max);
range_bench!(max_high_overlapping);
