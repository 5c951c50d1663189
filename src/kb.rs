//! Knowledge base facade: the read-only state every rule scores against.
//!
//! Owns the reference and hierarchy graphs, the two memoizing closure
//! computers (classes over the hierarchy graph, locations over the reference
//! graph), the resolved vocabulary and the fallback path settings. Built once
//! per run and shared by reference across worker threads.

use std::sync::Arc;

use crate::config::PathConfig;
use crate::graph::{
    Closure, ClosureComputer, IndexedGraph, PathOutcome, PathScorer, Relation, RelationSet,
};
use crate::registry::SymbolRegistry;
use crate::symbol::{SymbolId, SymbolKind};
use crate::vocab::Vocabulary;

pub struct KnowledgeBase {
    registry: Arc<SymbolRegistry>,
    vocab: Vocabulary,
    reference: Arc<IndexedGraph>,
    /// Superclass closures over the hierarchy graph.
    classes: ClosureComputer,
    /// Containment closures over the reference graph.
    locations: ClosureComputer,
    superclass_rel: RelationSet,
    ancestor_rel: RelationSet,
    descendant_rel: RelationSet,
    path: PathScorer,
    path_weight: f64,
}

impl KnowledgeBase {
    pub fn new(
        registry: Arc<SymbolRegistry>,
        vocab: Vocabulary,
        reference: Arc<IndexedGraph>,
        hierarchy: Arc<IndexedGraph>,
        path: &PathConfig,
    ) -> Self {
        let superclass_rel = RelationSet::single(Relation::forward(vocab.subclass_of));
        let ancestor_rel = RelationSet::pair(
            Relation::forward(vocab.part_of),
            Relation::backward(vocab.contains),
        );
        let descendant_rel = RelationSet::pair(
            Relation::forward(vocab.contains),
            Relation::backward(vocab.part_of),
        );

        tracing::debug!(
            reference = reference.len(),
            hierarchy = hierarchy.len(),
            max_depth = path.max_depth,
            frontier_cap = path.frontier_cap,
            "building knowledge base"
        );

        Self {
            registry,
            vocab,
            locations: ClosureComputer::new(Arc::clone(&reference)),
            reference,
            classes: ClosureComputer::new(hierarchy),
            superclass_rel,
            ancestor_rel,
            descendant_rel,
            path: PathScorer::new(path.max_depth, path.frontier_cap),
            path_weight: path.weight,
        }
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn reference(&self) -> &IndexedGraph {
        &self.reference
    }

    pub fn hierarchy(&self) -> &IndexedGraph {
        self.classes.graph()
    }

    /// Objects of `subject` through `predicate` in the reference graph.
    pub fn objects(&self, subject: SymbolId, predicate: SymbolId) -> &[SymbolId] {
        self.reference.objects(subject, Some(predicate))
    }

    /// Subjects with `predicate` pointing at `object` in the reference graph.
    pub fn subjects(&self, predicate: SymbolId, object: SymbolId) -> &[SymbolId] {
        self.reference.subjects(Some(predicate), object)
    }

    // -----------------------------------------------------------------------
    // Closures
    // -----------------------------------------------------------------------

    pub fn superclasses(&self, class: SymbolId) -> Closure {
        self.classes.closure(class, self.superclass_rel)
    }

    /// Everything `location` lies within.
    pub fn location_ancestors(&self, location: SymbolId) -> Closure {
        self.locations.closure(location, self.ancestor_rel)
    }

    /// Everything lying within `location`.
    pub fn location_descendants(&self, location: SymbolId) -> Closure {
        self.locations.closure(location, self.descendant_rel)
    }

    /// Number of memoized closures, classes and locations combined.
    pub fn cached_closures(&self) -> usize {
        self.classes.cached() + self.locations.cached()
    }

    // -----------------------------------------------------------------------
    // Type checks
    // -----------------------------------------------------------------------

    /// Whether `entity` has `class` as a type, directly or via a superclass.
    pub fn has_type(&self, entity: SymbolId, class: SymbolId) -> bool {
        self.objects(entity, self.vocab.rdf_type)
            .iter()
            .any(|&t| t == class || self.superclasses(t).contains(&class))
    }

    pub fn has_any_type(&self, entity: SymbolId, classes: &[SymbolId]) -> bool {
        classes.iter().any(|&c| self.has_type(entity, c))
    }

    pub fn is_person(&self, entity: SymbolId) -> bool {
        self.has_type(entity, self.vocab.person_class)
    }

    pub fn is_location(&self, entity: SymbolId) -> bool {
        self.has_any_type(entity, &self.vocab.location_classes)
    }

    pub fn is_instrument(&self, entity: SymbolId) -> bool {
        self.has_any_type(entity, &self.vocab.instrument_classes)
    }

    /// Musician by type, or by an asserted musician profession.
    pub fn is_musician(&self, entity: SymbolId) -> bool {
        self.has_any_type(entity, &self.vocab.musician_classes)
            || self.reference.contains(
                entity,
                self.vocab.profession,
                self.vocab.musician_profession,
            )
    }

    // -----------------------------------------------------------------------
    // Labels
    // -----------------------------------------------------------------------

    /// Whether any label of `entity` contains `needle`, ignoring case. Labels
    /// are its `rdfs:label` literals, plus its own lexical value when it is
    /// itself a literal.
    pub fn label_mentions(&self, entity: SymbolId, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let mentions = |id: SymbolId| {
            self.registry.kind(id) == Some(SymbolKind::Literal)
                && self
                    .registry
                    .with_label(id, |label| label.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        };
        mentions(entity) || self.objects(entity, self.vocab.label).iter().any(|&l| mentions(l))
    }

    // -----------------------------------------------------------------------
    // Path fallback
    // -----------------------------------------------------------------------

    /// Full bidirectional search over the reference graph.
    pub fn path_outcome(&self, start: SymbolId, end: SymbolId) -> PathOutcome {
        let outcome = self.path.search(self.reference.as_ref(), start, end);
        tracing::debug!(
            %start,
            %end,
            score = outcome.score,
            stop = ?outcome.stop,
            expanded_forward = outcome.expanded_forward,
            expanded_backward = outcome.expanded_backward,
            "path search"
        );
        outcome
    }

    /// Raw bidirectional path score over the reference graph.
    pub fn path_score(&self, start: SymbolId, end: SymbolId) -> f64 {
        self.path_outcome(start, end).score
    }

    /// Path score scaled by the configured fallback weight.
    pub fn path_fallback(&self, start: SymbolId, end: SymbolId) -> f64 {
        self.path_score(start, end) * self.path_weight
    }
}

impl std::fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("reference", &self.reference)
            .field("hierarchy", self.hierarchy())
            .field("symbols", &self.registry.len())
            .field("cached_closures", &self.cached_closures())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocabularyConfig;
    use crate::graph::{StopReason, Triple};

    struct Fixture {
        registry: Arc<SymbolRegistry>,
        vocab: Vocabulary,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = Arc::new(SymbolRegistry::new());
            let vocab = Vocabulary::resolve(&VocabularyConfig::default(), &registry);
            Self { registry, vocab }
        }

        fn iri(&self, local: &str) -> SymbolId {
            self.registry.intern_iri(&format!("http://example.org/{local}"))
        }

        fn kb(&self, reference: Vec<Triple>, hierarchy: Vec<Triple>) -> KnowledgeBase {
            KnowledgeBase::new(
                Arc::clone(&self.registry),
                self.vocab.clone(),
                Arc::new(IndexedGraph::from_triples(reference)),
                Arc::new(IndexedGraph::from_triples(hierarchy)),
                &PathConfig::default(),
            )
        }
    }

    #[test]
    fn type_check_follows_superclasses() {
        let fx = Fixture::new();
        let v = &fx.vocab;
        let ada = fx.iri("Ada");
        let mathematician = fx.iri("Mathematician");
        let scientist = fx.iri("Scientist");

        let kb = fx.kb(
            vec![Triple::new(ada, v.rdf_type, mathematician)],
            vec![
                Triple::new(mathematician, v.subclass_of, scientist),
                Triple::new(scientist, v.subclass_of, v.person_class),
            ],
        );
        assert!(kb.has_type(ada, mathematician));
        assert!(kb.has_type(ada, scientist));
        assert!(kb.is_person(ada));
        assert!(!kb.is_location(ada));
    }

    #[test]
    fn cyclic_hierarchy_still_answers() {
        let fx = Fixture::new();
        let v = &fx.vocab;
        let x = fx.iri("x");
        let a = fx.iri("A");
        let b = fx.iri("B");
        let kb = fx.kb(
            vec![Triple::new(x, v.rdf_type, a)],
            vec![
                Triple::new(a, v.subclass_of, b),
                Triple::new(b, v.subclass_of, a),
            ],
        );
        assert!(kb.has_type(x, b));
        assert!(!kb.is_person(x));
    }

    #[test]
    fn location_closures_use_both_relations() {
        let fx = Fixture::new();
        let v = &fx.vocab;
        let paris = fx.iri("Paris");
        let idf = fx.iri("IleDeFrance");
        let france = fx.iri("France");
        let kb = fx.kb(
            vec![
                Triple::new(paris, v.part_of, idf),
                Triple::new(france, v.contains, idf),
            ],
            vec![],
        );
        let ancestors = kb.location_ancestors(paris);
        assert!(ancestors.contains(&idf));
        assert!(ancestors.contains(&france));
        assert!(kb.location_descendants(france).contains(&paris));
        assert!(kb.cached_closures() >= 2);
    }

    #[test]
    fn musician_by_profession() {
        let fx = Fixture::new();
        let v = &fx.vocab;
        let p = fx.iri("Player");
        let kb = fx.kb(vec![Triple::new(p, v.profession, v.musician_profession)], vec![]);
        assert!(kb.is_musician(p));
    }

    #[test]
    fn label_scan_only_reads_literals() {
        let fx = Fixture::new();
        let v = &fx.vocab;
        let thing = fx.iri("Thing");
        let female_iri = fx.iri("female_thing");
        let label = fx.registry.intern(SymbolKind::Literal, "Female Vocalist");
        let kb = fx.kb(vec![Triple::new(thing, v.label, label)], vec![]);

        assert!(kb.label_mentions(thing, "female"));
        assert!(kb.label_mentions(label, "FEMALE"));
        assert!(!kb.label_mentions(female_iri, "female"));
    }

    #[test]
    fn path_outcome_reports_how_search_ended() {
        let fx = Fixture::new();
        let (a, b, c, link) = (fx.iri("a"), fx.iri("b"), fx.iri("c"), fx.iri("link"));
        let kb = fx.kb(vec![Triple::new(a, link, b)], vec![]);

        let met = kb.path_outcome(a, b);
        assert_eq!(met.stop, StopReason::Met);
        assert_eq!(met.distance, Some(1));
        assert_eq!(met.expanded_forward, 1);
        assert_eq!(kb.path_score(a, b), met.score);

        let miss = kb.path_outcome(b, c);
        assert_eq!(miss.stop, StopReason::Exhausted);
        assert_eq!(miss.score, 0.0);
    }

    #[test]
    fn empty_graphs_degrade_quietly() {
        let fx = Fixture::new();
        let kb = fx.kb(vec![], vec![]);
        let x = fx.iri("x");
        assert!(!kb.is_person(x));
        assert!(kb.location_ancestors(x).is_empty());
        assert_eq!(kb.path_fallback(x, fx.iri("y")), 0.0);
        assert_eq!(kb.path_fallback(x, x), 0.4);
    }
}
