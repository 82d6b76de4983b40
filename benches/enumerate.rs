//! Criterion benchmarks for the HIST search.
//!
//! Times `find_hists` over complete graphs `K_n` for a handful of small
//! `n` — the search tree for `K_n` grows with `n` independently of any
//! particular input family, so it is a reasonable stand-in for "how does
//! the recursion scale" without needing a corpus of real-world graphs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use histg::counters::Counters;
use histg::enumerate::find_hists;
use histg::Graph;

fn complete_graph(n: u8) -> Graph {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            edges.push((u, v));
        }
    }
    Graph::from_edges(n, edges).unwrap()
}

fn bench_find_hists(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hists_complete_graph");
    for &n in &[4u8, 5, 6, 7, 8] {
        let graph = complete_graph(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                let mut counters = Counters::new();
                black_box(find_hists(graph, 0, None, false, &mut counters));
                counters.hists_this_run
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_hists);
criterion_main!(benches);
