//! Benchmarks for the region area pipeline.

use areakit_widgets::region_area::{
    expand_regions, intermediate_table, parse_raw_input, sum_region_areas,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn generate_input(rows: usize) -> String {
    let mut text = String::from("RE PERCENT TotalArea_ha\n");
    for i in 0..rows {
        let a = i % 37;
        let b = (i * 7) % 41;
        text.push_str(&format!("1.{a}.{b}a/1.{b}.{a} 65/35 0.{i:09}\n"));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let input = generate_input(3000);
    c.bench_function("parse_3000_rows", |b| {
        b.iter(|| parse_raw_input(black_box(&input)))
    });
}

fn bench_expand(c: &mut Criterion) {
    let rows = parse_raw_input(&generate_input(3000)).rows;
    c.bench_function("expand_3000_rows", |b| {
        b.iter(|| expand_regions(black_box(&rows)))
    });
}

fn bench_sum(c: &mut Criterion) {
    let expanded = expand_regions(&parse_raw_input(&generate_input(3000)).rows);
    c.bench_function("sum_6000_parts", |b| {
        b.iter(|| sum_region_areas(black_box(&expanded)))
    });
}

fn bench_full_pipeline_csv(c: &mut Criterion) {
    let input = generate_input(3000);
    c.bench_function("pipeline_to_csv_3000_rows", |b| {
        b.iter(|| {
            let rows = parse_raw_input(black_box(&input)).rows;
            let expanded = expand_regions(&rows);
            let _ = sum_region_areas(&expanded);
            intermediate_table(&expanded).to_csv(",")
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_expand,
    bench_sum,
    bench_full_pipeline_csv
);
criterion_main!(benches);
