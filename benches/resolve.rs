//! Benchmarks for graph building, load ordering and tree rendering
//!
//! Uses layered synthetic fixtures where every package depends on a few
//! packages in the next layer, so shared dependencies are common.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use depviz::graph::{DependencyGraph, GraphBuilder};
use depviz::render::{tree, TreeStyle};
use depviz::source::FixtureSource;

/// Create a layered fixture table with `layers * width` packages
fn create_layered_table(layers: usize, width: usize, fan_out: usize) -> Vec<(String, Vec<String>)> {
    let mut table = vec![(
        "root".to_string(),
        (0..width).map(|i| format!("pkg-0-{}", i)).collect(),
    )];

    for layer in 0..layers {
        for i in 0..width {
            let deps = if layer + 1 < layers {
                (0..fan_out)
                    .map(|k| format!("pkg-{}-{}", layer + 1, (i + k) % width))
                    .collect()
            } else {
                Vec::new()
            };
            table.push((format!("pkg-{}-{}", layer, i), deps));
        }
    }
    table
}

fn build(layers: usize, width: usize) -> DependencyGraph {
    let source = FixtureSource::from_table(create_layered_table(layers, width, 3));
    GraphBuilder::new(layers + 1)
        .build("root", &source)
        .unwrap()
}

/// Benchmark graph construction from a fixture source
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [100, 500, 1000, 5000].iter() {
        let source = FixtureSource::from_table(create_layered_table(10, size / 10, 3));

        group.bench_with_input(BenchmarkId::new("packages", size), size, |b, _| {
            b.iter(|| black_box(GraphBuilder::new(11).build("root", &source).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark load order resolution
fn bench_topological_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("topological_order");

    for size in [100, 500, 1000, 5000].iter() {
        let graph = build(10, size / 10);

        group.bench_with_input(BenchmarkId::new("packages", size), size, |b, _| {
            b.iter(|| black_box(graph.topological_order()));
        });
    }

    group.finish();
}

/// Benchmark tree rendering, which expands shared dependencies per path
fn bench_tree_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_render");

    for depth in [2, 4, 6].iter() {
        let graph = build(8, 20);

        group.bench_with_input(BenchmarkId::new("depth", depth), depth, |b, &depth| {
            b.iter(|| {
                let mut out = Vec::new();
                tree::write_tree(&graph, "root", depth, TreeStyle::Unicode, &mut out).unwrap();
                black_box(out)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_topological_order, bench_tree_render);
criterion_main!(benches);
