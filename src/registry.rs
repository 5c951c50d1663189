//! Symbol registry: interning and bidirectional label ↔ ID mapping.
//!
//! The [`SymbolRegistry`] provides O(1) lookups in both directions using two
//! `DashMap`s. Unlike free-text labels, IRIs are case-sensitive, so labels are
//! stored verbatim and keyed together with their [`SymbolKind`]: the IRI
//! `http://x` and the literal `"http://x"` are different symbols.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::symbol::{AtomicSymbolAllocator, SymbolId, SymbolKind, SymbolMeta};

/// Interning registry mapping term text to ids and back.
pub struct SymbolRegistry {
    /// Forward map: SymbolId → SymbolMeta (source of truth).
    id_to_meta: DashMap<SymbolId, SymbolMeta>,
    /// Reverse map: (kind, label) → SymbolId.
    label_to_id: DashMap<(SymbolKind, String), SymbolId>,
    allocator: AtomicSymbolAllocator,
}

impl SymbolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            id_to_meta: DashMap::new(),
            label_to_id: DashMap::new(),
            allocator: AtomicSymbolAllocator::new(),
        }
    }

    /// Return the id for `(kind, label)`, allocating one on first sight.
    pub fn intern(&self, kind: SymbolKind, label: &str) -> SymbolId {
        if let Some(id) = self.label_to_id.get(&(kind, label.to_string())) {
            return *id.value();
        }
        match self.label_to_id.entry((kind, label.to_string())) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.allocator.next_id();
                self.id_to_meta.insert(id, SymbolMeta::new(id, kind, label));
                e.insert(id);
                id
            }
        }
    }

    /// Shorthand for interning an IRI.
    pub fn intern_iri(&self, iri: &str) -> SymbolId {
        self.intern(SymbolKind::Iri, iri)
    }

    /// Look up symbol metadata by ID.
    pub fn get(&self, id: SymbolId) -> Option<SymbolMeta> {
        self.id_to_meta.get(&id).map(|r| r.value().clone())
    }

    /// Look up a symbol ID without interning.
    pub fn lookup(&self, kind: SymbolKind, label: &str) -> Option<SymbolId> {
        self.label_to_id
            .get(&(kind, label.to_string()))
            .map(|r| *r.value())
    }

    /// Look up an IRI without interning.
    pub fn lookup_iri(&self, iri: &str) -> Option<SymbolId> {
        self.lookup(SymbolKind::Iri, iri)
    }

    /// The label of a symbol, falling back to `sym:{id}`.
    pub fn resolve_label(&self, id: SymbolId) -> String {
        self.id_to_meta
            .get(&id)
            .map(|m| m.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Run `f` on the label without cloning it. Returns `None` for unknown ids.
    pub fn with_label<R>(&self, id: SymbolId, f: impl FnOnce(&str) -> R) -> Option<R> {
        self.id_to_meta.get(&id).map(|m| f(&m.label))
    }

    /// Kind of a registered symbol.
    pub fn kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.id_to_meta.get(&id).map(|m| m.kind)
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.id_to_meta.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.id_to_meta.is_empty()
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let reg = SymbolRegistry::new();
        let a = reg.intern_iri("http://example.org/Berlin");
        let b = reg.intern_iri("http://example.org/Berlin");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve_label(a), "http://example.org/Berlin");
    }

    #[test]
    fn kind_is_part_of_identity() {
        let reg = SymbolRegistry::new();
        let iri = reg.intern(SymbolKind::Iri, "x");
        let lit = reg.intern(SymbolKind::Literal, "x");
        assert_ne!(iri, lit);
        assert_eq!(reg.kind(lit), Some(SymbolKind::Literal));
    }

    #[test]
    fn iris_are_case_sensitive() {
        let reg = SymbolRegistry::new();
        let lower = reg.intern_iri("http://example.org/a");
        let upper = reg.intern_iri("http://example.org/A");
        assert_ne!(lower, upper);
    }

    #[test]
    fn lookup_does_not_intern() {
        let reg = SymbolRegistry::new();
        assert!(reg.lookup_iri("http://example.org/missing").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn unknown_id_label_falls_back() {
        let reg = SymbolRegistry::new();
        let id = SymbolId::new(99).unwrap();
        assert_eq!(reg.resolve_label(id), "sym:99");
        assert!(reg.with_label(id, str::len).is_none());
    }

    #[test]
    fn concurrent_interning_agrees() {
        let reg = Arc::new(SymbolRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|i| reg.intern_iri(&format!("http://example.org/{i}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let results: Vec<Vec<SymbolId>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results[1..] {
            assert_eq!(r, &results[0]);
        }
        assert_eq!(reg.len(), 100);
    }
}
