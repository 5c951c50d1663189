//! Cycle-safe transitive closure with memoization.
//!
//! Class hierarchies and location containment both contain cycles in real
//! data (`A containedby B`, `B containedby A`), so closures are computed with
//! an explicit work-list and a visited set. Each node is expanded at most
//! once, giving O(V + E) over the reachable subgraph.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use dashmap::DashMap;

use super::index::IndexedGraph;
use crate::symbol::SymbolId;

/// Which end of a triple to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From subject to object: `node --p--> next`.
    Forward,
    /// From object to subject: `next --p--> node`.
    Backward,
}

/// One directed edge specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub predicate: SymbolId,
    pub direction: Direction,
}

impl Relation {
    pub fn forward(predicate: SymbolId) -> Self {
        Self {
            predicate,
            direction: Direction::Forward,
        }
    }

    pub fn backward(predicate: SymbolId) -> Self {
        Self {
            predicate,
            direction: Direction::Backward,
        }
    }

    fn neighbors<'g>(&self, graph: &'g IndexedGraph, node: SymbolId) -> &'g [SymbolId] {
        match self.direction {
            Direction::Forward => graph.objects(node, Some(self.predicate)),
            Direction::Backward => graph.subjects(Some(self.predicate), node),
        }
    }
}

/// One or two relations followed together during a closure.
///
/// `Copy` and `Hash` so it can be part of the memo key without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationSet {
    first: Relation,
    second: Option<Relation>,
}

impl RelationSet {
    pub fn single(relation: Relation) -> Self {
        Self {
            first: relation,
            second: None,
        }
    }

    pub fn pair(first: Relation, second: Relation) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Relation> + '_ {
        std::iter::once(self.first).chain(self.second)
    }
}

/// Shared, immutable closure result. Ordered so callers that accumulate
/// floating-point scores over it get the same sum on every run.
pub type Closure = Arc<BTreeSet<SymbolId>>;

/// Compute the closure of `start` without caching.
///
/// `start` is part of the result only when a cycle leads back to it.
pub fn compute_closure(
    graph: &IndexedGraph,
    start: SymbolId,
    relations: RelationSet,
) -> BTreeSet<SymbolId> {
    let mut visited: HashSet<SymbolId> = HashSet::from([start]);
    let mut reached = BTreeSet::new();
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        for relation in relations.iter() {
            for &next in relation.neighbors(graph, node) {
                if next == start {
                    reached.insert(start);
                }
                if visited.insert(next) {
                    reached.insert(next);
                    stack.push(next);
                }
            }
        }
    }

    reached
}

/// Memoizing closure computer over one graph.
///
/// Keyed by `(start, relations)`. The cache is a sharded `DashMap`, so
/// workers scoring different statements that touch the same entity reuse
/// each other's results without a global lock.
pub struct ClosureComputer {
    graph: Arc<IndexedGraph>,
    cache: DashMap<(SymbolId, RelationSet), Closure>,
}

impl ClosureComputer {
    pub fn new(graph: Arc<IndexedGraph>) -> Self {
        Self {
            graph,
            cache: DashMap::new(),
        }
    }

    /// The graph closures are computed over.
    pub fn graph(&self) -> &IndexedGraph {
        &self.graph
    }

    /// Closure of `start` over `relations`, computed once per key.
    pub fn closure(&self, start: SymbolId, relations: RelationSet) -> Closure {
        let key = (start, relations);
        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit.value());
        }
        // Computed outside the shard lock; a racing worker may compute the
        // same key, and whichever lands first is kept.
        let computed = Arc::new(compute_closure(&self.graph, start, relations));
        Arc::clone(self.cache.entry(key).or_insert(computed).value())
    }

    /// Number of memoized closures.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for ClosureComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureComputer")
            .field("graph", &self.graph)
            .field("cached", &self.cached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Triple;

    fn sym(id: u64) -> SymbolId {
        SymbolId::new(id).unwrap()
    }

    fn t(s: u64, p: u64, o: u64) -> Triple {
        Triple::new(sym(s), sym(p), sym(o))
    }

    const SUB: u64 = 100;
    const PART_OF: u64 = 101;
    const CONTAINS: u64 = 102;

    fn set(ids: &[u64]) -> BTreeSet<SymbolId> {
        ids.iter().map(|&i| sym(i)).collect()
    }

    #[test]
    fn chain_closure_excludes_start() {
        // 1 ⊂ 2 ⊂ 3 ⊂ 4
        let g = IndexedGraph::from_triples([t(1, SUB, 2), t(2, SUB, 3), t(3, SUB, 4)]);
        let rel = RelationSet::single(Relation::forward(sym(SUB)));
        assert_eq!(compute_closure(&g, sym(1), rel), set(&[2, 3, 4]));
        assert!(compute_closure(&g, sym(4), rel).is_empty());
    }

    #[test]
    fn three_node_cycle_terminates() {
        let g = IndexedGraph::from_triples([t(1, SUB, 2), t(2, SUB, 3), t(3, SUB, 1)]);
        let rel = RelationSet::single(Relation::forward(sym(SUB)));
        // Start is reached again through the cycle.
        assert_eq!(compute_closure(&g, sym(1), rel), set(&[1, 2, 3]));
        assert_eq!(compute_closure(&g, sym(2), rel), set(&[1, 2, 3]));
    }

    #[test]
    fn self_loop_includes_start() {
        let g = IndexedGraph::from_triples([t(1, SUB, 1)]);
        let rel = RelationSet::single(Relation::forward(sym(SUB)));
        assert_eq!(compute_closure(&g, sym(1), rel), set(&[1]));
    }

    #[test]
    fn backward_relation_follows_subjects() {
        let g = IndexedGraph::from_triples([t(1, SUB, 2), t(2, SUB, 3)]);
        let rel = RelationSet::single(Relation::backward(sym(SUB)));
        assert_eq!(compute_closure(&g, sym(3), rel), set(&[1, 2]));
    }

    #[test]
    fn mixed_part_of_and_contains() {
        // city 1 part_of region 2; country 3 contains region 2; continent 4 contains 3.
        let g = IndexedGraph::from_triples([
            t(1, PART_OF, 2),
            t(3, CONTAINS, 2),
            t(4, CONTAINS, 3),
        ]);
        let ancestors = RelationSet::pair(
            Relation::forward(sym(PART_OF)),
            Relation::backward(sym(CONTAINS)),
        );
        let descendants = RelationSet::pair(
            Relation::forward(sym(CONTAINS)),
            Relation::backward(sym(PART_OF)),
        );
        assert_eq!(compute_closure(&g, sym(1), ancestors), set(&[2, 3, 4]));
        assert_eq!(compute_closure(&g, sym(4), descendants), set(&[1, 2, 3]));
    }

    #[test]
    fn memoized_results_are_shared_and_deterministic() {
        let g = Arc::new(IndexedGraph::from_triples([t(1, SUB, 2), t(2, SUB, 1)]));
        let closures = ClosureComputer::new(g);
        let rel = RelationSet::single(Relation::forward(sym(SUB)));

        let first = closures.closure(sym(1), rel);
        let second = closures.closure(sym(1), rel);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, set(&[1, 2]));
        assert_eq!(closures.cached(), 1);

        let other = closures.closure(sym(1), RelationSet::single(Relation::backward(sym(SUB))));
        assert_eq!(*other, set(&[1, 2]));
        assert_eq!(closures.cached(), 2);
    }

    #[test]
    fn unknown_start_has_empty_closure() {
        let closures = ClosureComputer::new(Arc::new(IndexedGraph::empty()));
        let rel = RelationSet::single(Relation::forward(sym(SUB)));
        assert!(closures.closure(sym(7), rel).is_empty());
    }
}
