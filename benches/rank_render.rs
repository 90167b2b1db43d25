use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use worldpop::reports::rank::{rank, top_n};
use worldpop::reports::render;
use worldpop::reports::row::CityRow;

fn synthetic_cities(n: usize) -> Vec<CityRow> {
    (0..n)
        .map(|i| CityRow {
            name: format!("City {:05}", (i as u64).wrapping_mul(7919) % n as u64),
            country: format!("Country {}", i % 50),
            district: if i % 3 == 0 {
                None
            } else {
                Some(format!("District {}", i % 11))
            },
            population: (i as u64).wrapping_mul(2_654_435_761) % 10_000_000,
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let rows = synthetic_cities(5_000);
    c.bench_function("rank_5k_cities", |b| {
        b.iter(|| rank(black_box(rows.clone()), |_| true))
    });
    c.bench_function("top_10_of_5k", |b| {
        b.iter(|| top_n(rank(black_box(rows.clone()), |_| true), 10))
    });
}

fn bench_render(c: &mut Criterion) {
    let rows = rank(synthetic_cities(5_000), |_| true);
    c.bench_function("cities_csv_5k", |b| {
        b.iter(|| render::cities_csv(black_box(&rows)))
    });
}

criterion_group!(benches, bench_rank, bench_render);
criterion_main!(benches);
