//! Criterion benchmarks for the list view pipeline
//!
//! Run with: cargo bench -p aquadesk_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use aquadesk_core::list::{
    CategoryFilter, ListState, Mutation, SortDirection, ViewParams, compute_view,
};
use aquadesk_core::resources::{Reading, Resource};

const METERS: [&str; 8] = [
    "MTR-1001", "MTR-1002", "MTR-1003", "MTR-1004", "MTR-2001", "MTR-2002", "MTR-3001", "MTR-3002",
];
const STATUSES: [&str; 3] = ["Pending", "Verified", "Flagged"];
const TECHS: [&str; 4] = ["A. Moreno", "K. Osei", "J. Lind", "P. Nair"];

fn readings(count: usize) -> Vec<Reading> {
    (0..count)
        .map(|i| Reading {
            id: i as i64 + 1,
            meter_number: METERS[i % METERS.len()].to_string(),
            reading_value: ((i * 7919) % 10_000) as f64 / 10.0,
            reading_date: format!("20{:02}-{:02}-{:02}", 20 + i % 5, 1 + i % 12, 1 + i % 28),
            recorded_by: TECHS[i % TECHS.len()].to_string(),
            status: STATUSES[i % STATUSES.len()].to_string(),
        })
        .collect()
}

fn bench_compute_view(c: &mut Criterion) {
    let config = Reading::list_config();
    let mut group = c.benchmark_group("compute_view");

    for size in [100, 1_000, 10_000] {
        let items = readings(size);

        group.bench_with_input(BenchmarkId::new("default_sort", size), &items, |b, items| {
            let params = ViewParams::initial(&config);
            b.iter(|| compute_view(black_box(items), &config, black_box(&params)).total_filtered)
        });

        group.bench_with_input(BenchmarkId::new("search_and_filter", size), &items, |b, items| {
            let params = ViewParams {
                search: "mtr-2".to_string(),
                category: CategoryFilter::parse("Verified"),
                sort_key: "value",
                direction: SortDirection::Asc,
                page: 3,
                ..ViewParams::initial(&config)
            };
            b.iter(|| compute_view(black_box(items), &config, black_box(&params)).total_filtered)
        });
    }

    group.finish();
}

fn bench_bulk_delete(c: &mut Criterion) {
    let items = readings(5_000);
    let doomed: Vec<i64> = (1..=5_000).step_by(3).collect();

    c.bench_function("bulk_delete_5000", |b| {
        b.iter_batched(
            || ListState::with_items(Reading::list_config(), items.clone()),
            |mut list| list.apply_mutation(Mutation::BulkDelete(doomed.clone())),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_compute_view, bench_bulk_delete);
criterion_main!(benches);
