use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
    Throughput,
};
use rcjson::{ParseOptions, Value};

fn make_tree(depth: usize, width: usize, seed: u64) -> Value {
    let node = Value::object();
    node.set_string("name", format!("node-{seed}")).unwrap();
    node.set_number("value", seed as f64 - 500.0).unwrap();
    let flags = Value::array();
    for offset in [0, 2, 4] {
        flags.push_string(format!("f{}", (seed + offset) % 5)).unwrap();
    }
    node.set("flags", flags).unwrap();
    let children = Value::array();
    if depth > 0 {
        for i in 0..width {
            children
                .push(make_tree(depth - 1, width, seed * 31 + i as u64))
                .unwrap();
        }
    }
    node.set("children", children).unwrap();
    node
}

fn make_rows(count: usize) -> Value {
    let rows = Value::array();
    for i in 0..count {
        let row = Value::object();
        row.set_number("id", i as f64).unwrap();
        row.set_string("name", format!("row-{i}")).unwrap();
        row.set("active", Value::boolean(i % 2 == 0)).unwrap();
        row.set_number("score", i as f64 * 0.75).unwrap();
        row.set_string("tag", format!("tag-{}", i % 5)).unwrap();
        rows.push(row).unwrap();
    }
    rows
}

fn bench_parse(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, text: &str) {
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function(BenchmarkId::new("rcjson", name), |b| {
        b.iter(|| black_box(rcjson::parse(black_box(text)).unwrap()));
    });

    let copying = ParseOptions::default().with_intern_strings(false);
    group.bench_function(BenchmarkId::new("rcjson-no-intern", name), |b| {
        b.iter(|| {
            black_box(rcjson::parse_with_options(black_box(text.as_bytes()), &copying).unwrap())
        });
    });

    group.bench_function(BenchmarkId::new("serde_json", name), |b| {
        b.iter(|| black_box(serde_json::from_str::<serde_json::Value>(black_box(text)).unwrap()));
    });
}

fn bench_serialize(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, value: &Value) {
    let json = value.to_json_value();
    group.bench_function(BenchmarkId::new("compact", name), |b| {
        b.iter(|| black_box(rcjson::to_string(black_box(value))));
    });
    group.bench_function(BenchmarkId::new("pretty", name), |b| {
        b.iter(|| black_box(rcjson::to_string_pretty(black_box(value))));
    });
    group.bench_function(BenchmarkId::new("serde_json", name), |b| {
        b.iter(|| black_box(serde_json::to_string(black_box(&json)).unwrap()));
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    let inputs = [
        ("tree", make_tree(4, 4, 1)),
        ("rows", make_rows(2_000)),
    ];

    let mut group = c.benchmark_group("parse");
    group.measurement_time(Duration::from_secs(5));
    for (name, value) in &inputs {
        bench_parse(&mut group, name, &rcjson::to_string_pretty(value));
    }
    group.finish();

    let mut group = c.benchmark_group("serialize");
    group.measurement_time(Duration::from_secs(5));
    for (name, value) in &inputs {
        bench_serialize(&mut group, name, value);
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
