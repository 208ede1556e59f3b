//! Parse and serialize throughput, tinyjson against serde_json.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tinyjson_core::parse;

const SMALL_JSON: &str = r#"{"name": "example", "version": 1, "enabled": true}"#;

const COMPANY_JSON: &str = include_str!("../tests/fixtures/company.json");

fn generate_large_json() -> String {
    let items: Vec<String> = (0..1000)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "name": "Item {i}", "price": {:.2}, "active": {}, "tags": ["a", "b\n", "c"], "meta": {{"rank": {}}}}}"#,
                i as f64 * 1.5 + 10.25,
                i % 2 == 0,
                i % 10
            )
        })
        .collect();
    format!(r#"{{"data": [{}], "total": 1000}}"#, items.join(","))
}

fn inputs() -> Vec<(&'static str, String)> {
    vec![
        ("small", SMALL_JSON.to_string()),
        ("company", COMPANY_JSON.to_string()),
        ("large", generate_large_json()),
    ]
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, text) in inputs() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("tinyjson", name), &text, |b, text| {
            b.iter(|| parse(black_box(text)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("serde_json", name), &text, |b, text| {
            b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(text)).unwrap())
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    for (name, text) in inputs() {
        let ours = parse(&text).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("tinyjson", name), &ours, |b, value| {
            b.iter(|| black_box(value).to_string())
        });
        group.bench_with_input(BenchmarkId::new("serde_json", name), &theirs, |b, value| {
            b.iter(|| serde_json::to_string(black_box(value)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_serialize);
criterion_main!(benches);
