//! Immutable in-memory triple store with dual indexing.
//!
//! Built once from a triple list and never mutated afterwards. Lookups by
//! (subject, predicate), (predicate, object), or either end with any
//! predicate return sorted, duplicate-free slices so every traversal over
//! the graph visits neighbors in the same order on every run.

use std::collections::{HashMap, HashSet};

use super::Triple;
use crate::symbol::SymbolId;

/// Predicate-agnostic neighbor access.
///
/// This is the only view of a graph that path search needs, which keeps
/// [`PathScorer`](super::PathScorer) testable against synthetic graphs.
pub trait Adjacency {
    /// Objects reachable from `node` through any predicate.
    fn successors(&self, node: SymbolId) -> &[SymbolId];
    /// Subjects pointing at `node` through any predicate.
    fn predecessors(&self, node: SymbolId) -> &[SymbolId];
}

/// Read-only triple store with subject- and object-keyed indices.
#[derive(Default)]
pub struct IndexedGraph {
    /// (subject, predicate) → objects.
    by_subject: HashMap<(SymbolId, SymbolId), Vec<SymbolId>>,
    /// (predicate, object) → subjects.
    by_object: HashMap<(SymbolId, SymbolId), Vec<SymbolId>>,
    /// subject → objects over any predicate.
    out_any: HashMap<SymbolId, Vec<SymbolId>>,
    /// object → subjects over any predicate.
    in_any: HashMap<SymbolId, Vec<SymbolId>>,
    /// Exact membership.
    triples: HashSet<Triple>,
    /// Sorted distinct predicates.
    predicates: Vec<SymbolId>,
    node_count: usize,
}

impl IndexedGraph {
    /// The graph with no triples. Every lookup on it returns an empty slice.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the indices from a list of triples. Duplicates are collapsed.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut graph = Self::default();
        let mut predicates = HashSet::new();
        let mut nodes = HashSet::new();

        for triple in triples {
            if !graph.triples.insert(triple) {
                continue;
            }
            let Triple {
                subject,
                predicate,
                object,
            } = triple;
            graph
                .by_subject
                .entry((subject, predicate))
                .or_default()
                .push(object);
            graph
                .by_object
                .entry((predicate, object))
                .or_default()
                .push(subject);
            graph.out_any.entry(subject).or_default().push(object);
            graph.in_any.entry(object).or_default().push(subject);
            predicates.insert(predicate);
            nodes.insert(subject);
            nodes.insert(object);
        }

        // (s, p) and (p, o) lists are already distinct because the triple set
        // filtered duplicates; the any-predicate lists are not.
        for list in graph.by_subject.values_mut().chain(graph.by_object.values_mut()) {
            list.sort_unstable();
        }
        for list in graph.out_any.values_mut().chain(graph.in_any.values_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        graph.predicates = predicates.into_iter().collect();
        graph.predicates.sort_unstable();
        graph.node_count = nodes.len();
        graph
    }

    /// Objects of `subject`, through `predicate` or through any predicate.
    pub fn objects(&self, subject: SymbolId, predicate: Option<SymbolId>) -> &[SymbolId] {
        let list = match predicate {
            Some(p) => self.by_subject.get(&(subject, p)),
            None => self.out_any.get(&subject),
        };
        list.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Subjects pointing at `object`, through `predicate` or any predicate.
    pub fn subjects(&self, predicate: Option<SymbolId>, object: SymbolId) -> &[SymbolId] {
        let list = match predicate {
            Some(p) => self.by_object.get(&(p, object)),
            None => self.in_any.get(&object),
        };
        list.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exact-triple membership, average O(1).
    pub fn contains(&self, subject: SymbolId, predicate: SymbolId, object: SymbolId) -> bool {
        self.triples.contains(&Triple::new(subject, predicate, object))
    }

    /// Number of distinct triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of distinct subjects and objects.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Distinct predicates, sorted by id.
    pub fn predicates(&self) -> &[SymbolId] {
        &self.predicates
    }
}

impl Adjacency for IndexedGraph {
    fn successors(&self, node: SymbolId) -> &[SymbolId] {
        self.objects(node, None)
    }

    fn predecessors(&self, node: SymbolId) -> &[SymbolId] {
        self.subjects(None, node)
    }
}

impl std::fmt::Debug for IndexedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedGraph")
            .field("nodes", &self.node_count)
            .field("triples", &self.len())
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
