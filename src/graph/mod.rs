//! Read-only knowledge graph primitives.
//!
//! - [`IndexedGraph`]: immutable triple store with subject- and object-keyed
//!   indices, built once per input file.
//! - [`ClosureComputer`]: memoized, cycle-safe transitive closure over one or
//!   two relations (class and location hierarchies).
//! - [`PathScorer`]: bounded bidirectional BFS used as a weak connectivity
//!   signal.
//!
//! All three only ever read the graph, so they are freely shared between
//! worker threads.

pub mod closure;
pub mod index;
pub mod path;

use serde::{Deserialize, Serialize};

use crate::symbol::SymbolId;

pub use closure::{Closure, ClosureComputer, Direction, Relation, RelationSet, compute_closure};
pub use index::{Adjacency, IndexedGraph};
pub use path::{PathOutcome, PathScorer, StopReason, score_path};

/// A triple (subject, predicate, object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// The subject of the triple.
    pub subject: SymbolId,
    /// The predicate (relation) of the triple.
    pub predicate: SymbolId,
    /// The object of the triple.
    pub object: SymbolId,
}

impl Triple {
    pub fn new(subject: SymbolId, predicate: SymbolId, object: SymbolId) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}
