use criterion::{black_box, criterion_group, criterion_main, Criterion};
use table_lens::data::filter_engine::FilterEngine;
use table_lens::data::sort_engine::SortEngine;
use table_lens::data::table::Table;

fn create_test_data(rows: usize) -> Table {
    let sources = vec![
        "Kohlekraftwerk",
        "Gaskraftwerk",
        "Straßenverkehr",
        "Luftfahrt",
        "Zementindustrie",
        "Stahlerzeugung",
        "Landwirtschaft",
        "Gebäudeheizung",
        "Müllverbrennung",
        "Chemieindustrie",
    ];

    let data = (0..rows)
        .map(|i| {
            vec![
                sources[i % sources.len()].to_string(),
                format!("{},{}", (i * 37) % 10_000, i % 10),
                format!("REGION_{}", i % 16),
            ]
        })
        .collect();

    Table::new(
        vec!["Quelle".to_string(), "CO2 (t)".to_string(), "Region".to_string()],
        data,
    )
}

fn benchmark_filter(c: &mut Criterion) {
    let mut table_10k = create_test_data(10_000);
    let mut table_100k = create_test_data(100_000);

    let mut group = c.benchmark_group("filter_query");

    group.bench_function("10k_rows", |b| {
        let mut engine = FilterEngine::default();
        b.iter(|| engine.set_query(&mut table_10k, black_box("kraft")));
    });

    group.bench_function("100k_rows", |b| {
        let mut engine = FilterEngine::default();
        b.iter(|| engine.set_query(&mut table_100k, black_box("kraft")));
    });

    group.bench_function("100k_rows_no_match", |b| {
        let mut engine = FilterEngine::default();
        b.iter(|| engine.set_query(&mut table_100k, black_box("wasserstoff")));
    });

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let mut table = create_test_data(10_000);
    let engine = SortEngine::new();

    c.bench_function("sort_cycle_10k_numeric", |b| {
        b.iter(|| {
            for _ in 0..3 {
                engine.activate_column(&mut table, black_box(1));
            }
        });
    });
}

criterion_group!(benches, benchmark_filter, benchmark_sort);
criterion_main!(benches);
