//! Benchmarks for graph primitives.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use verikg::graph::{IndexedGraph, PathScorer, Relation, RelationSet, Triple, compute_closure};
use verikg::registry::SymbolRegistry;
use verikg::symbol::SymbolId;

/// A balanced containment tree: every node has `fanout` children.
fn tree(
    registry: &SymbolRegistry,
    depth: u32,
    fanout: usize,
) -> (IndexedGraph, SymbolId, SymbolId) {
    let part_of = registry.intern_iri("http://example.org/partOf");
    let root = registry.intern_iri("http://example.org/n0");
    let mut triples = Vec::new();
    let mut level = vec![root];
    let mut next_id = 1usize;
    for _ in 0..depth {
        let mut children = Vec::with_capacity(level.len() * fanout);
        for &parent in &level {
            for _ in 0..fanout {
                let child = registry.intern_iri(&format!("http://example.org/n{next_id}"));
                next_id += 1;
                triples.push(Triple::new(child, part_of, parent));
                children.push(child);
            }
        }
        level = children;
    }
    let leaf = *level.last().unwrap_or(&root);
    (IndexedGraph::from_triples(triples), part_of, leaf)
}

fn bench_closure(c: &mut Criterion) {
    let registry = SymbolRegistry::new();
    let (graph, part_of, leaf) = tree(&registry, 6, 4);
    let root = registry.lookup_iri("http://example.org/n0").unwrap();
    let up = RelationSet::single(Relation::forward(part_of));
    let down = RelationSet::single(Relation::backward(part_of));

    c.bench_function("closure_ancestors_depth6", |bench| {
        bench.iter(|| black_box(compute_closure(&graph, black_box(leaf), up)))
    });
    c.bench_function("closure_descendants_4096", |bench| {
        bench.iter(|| black_box(compute_closure(&graph, black_box(root), down)))
    });
}

fn bench_path(c: &mut Criterion) {
    let registry = SymbolRegistry::new();
    let (graph, _, leaf) = tree(&registry, 6, 4);
    let root = registry.lookup_iri("http://example.org/n0").unwrap();
    let scorer = PathScorer::new(2, 500);
    let deep = PathScorer::new(8, 5_000);

    c.bench_function("path_bounded_miss", |bench| {
        bench.iter(|| black_box(scorer.score(&graph, black_box(root), black_box(leaf))))
    });
    c.bench_function("path_deep_hit", |bench| {
        bench.iter(|| black_box(deep.score(&graph, black_box(leaf), black_box(root))))
    });
}

criterion_group!(benches, bench_closure, bench_path);
criterion_main!(benches);
