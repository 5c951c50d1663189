//! Core symbol types.
//!
//! Every IRI, blank node and literal read from an input file is interned once
//! and afterwards handled as a [`SymbolId`]. Two entities are equal exactly
//! when their ids are equal. [`SymbolMeta`] keeps the textual form needed for
//! output and for label-based heuristics.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique, niche-optimized identifier for a symbol.
///
/// Uses `NonZeroU64` so that `Option<SymbolId>` is the same size as
/// `SymbolId`. Candidate statements lean on this: a missing subject,
/// predicate or object is just `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SymbolId(NonZeroU64);

impl SymbolId {
    /// Create a `SymbolId` from a raw `u64`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(SymbolId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sym:{}", self.0)
    }
}

/// Lexical category of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// An absolute IRI, stored without angle brackets.
    Iri,
    /// A blank node, stored by its local id (without `_:`).
    Blank,
    /// A literal, stored by its lexical value. Datatype and language tag are
    /// not part of its identity.
    Literal,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Iri => write!(f, "Iri"),
            SymbolKind::Blank => write!(f, "Blank"),
            SymbolKind::Literal => write!(f, "Literal"),
        }
    }
}

/// Metadata describing a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMeta {
    /// Unique identifier.
    pub id: SymbolId,
    /// What kind of term this is.
    pub kind: SymbolKind,
    /// IRI, blank node id or literal lexical value.
    pub label: String,
}

impl SymbolMeta {
    pub fn new(id: SymbolId, kind: SymbolKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
        }
    }
}

/// Thread-safe symbol ID allocator.
///
/// Produces monotonically increasing IDs starting from 1, so ids follow
/// first-seen order in the input files.
#[derive(Debug)]
pub struct AtomicSymbolAllocator {
    next: AtomicU64,
}

impl AtomicSymbolAllocator {
    /// Create a new allocator that starts from ID 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocate the next symbol ID.
    pub fn next_id(&self) -> SymbolId {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        // Starts at 1 and would need 2^64 allocations to wrap back to zero.
        SymbolId::new(raw).unwrap_or(SymbolId(NonZeroU64::MAX))
    }
}

impl Default for AtomicSymbolAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_id_niche_optimization() {
        assert_eq!(
            std::mem::size_of::<Option<SymbolId>>(),
            std::mem::size_of::<SymbolId>()
        );
    }

    #[test]
    fn symbol_id_zero_is_none() {
        assert!(SymbolId::new(0).is_none());
        assert_eq!(SymbolId::new(42).unwrap().get(), 42);
    }

    #[test]
    fn allocator_produces_sequential_ids() {
        let alloc = AtomicSymbolAllocator::new();
        assert_eq!(alloc.next_id().get(), 1);
        assert_eq!(alloc.next_id().get(), 2);
        assert_eq!(alloc.next_id().get(), 3);
    }

    #[test]
    fn symbol_id_display() {
        assert_eq!(SymbolId::new(42).unwrap().to_string(), "sym:42");
    }
}
