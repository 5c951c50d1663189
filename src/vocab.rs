//! Resolved vocabulary: the relations, classes and entities rules refer to.
//!
//! Built once from [`VocabularyConfig`] by interning every IRI, so rules
//! compare ids instead of strings. Interning (rather than looking up)
//! guarantees every entry has an id even if the loaded graphs never mention
//! it; lookups against such an id simply come back empty.

use crate::config::VocabularyConfig;
use crate::registry::SymbolRegistry;
use crate::symbol::SymbolId;

/// Typed constant registry passed explicitly into the rule catalog.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub rdf_type: SymbolId,
    pub subclass_of: SymbolId,
    pub label: SymbolId,
    pub statement: SymbolId,
    pub statement_subject: SymbolId,
    pub statement_predicate: SymbolId,
    pub statement_object: SymbolId,
    pub truth_value: SymbolId,

    pub part_of: SymbolId,
    pub contains: SymbolId,
    pub location_classes: Vec<SymbolId>,
    pub time_zones: SymbolId,
    pub time_zone_class: SymbolId,

    pub person_class: SymbolId,
    pub birth_place: SymbolId,
    pub lived_place: SymbolId,
    pub nationality: SymbolId,
    pub profession: SymbolId,
    pub gender: SymbolId,
    pub male: SymbolId,
    pub female: SymbolId,
    pub partner_relations: Vec<SymbolId>,

    pub instrument_classes: Vec<SymbolId>,
    pub musician_classes: Vec<SymbolId>,
    pub musician_profession: SymbolId,

    pub film_class: SymbolId,
    pub film_genre_class: SymbolId,
    pub film_genre: SymbolId,
    pub sequel: SymbolId,
    pub prequel: SymbolId,
}

impl Vocabulary {
    /// Intern every configured IRI.
    pub fn resolve(config: &VocabularyConfig, registry: &SymbolRegistry) -> Self {
        let iri = |s: &str| registry.intern_iri(s);
        let iris = |v: &[String]| -> Vec<SymbolId> {
            v.iter().map(|s| registry.intern_iri(s)).collect()
        };

        Self {
            rdf_type: iri(&config.rdf_type),
            subclass_of: iri(&config.subclass_of),
            label: iri(&config.label),
            statement: iri(&config.statement),
            statement_subject: iri(&config.statement_subject),
            statement_predicate: iri(&config.statement_predicate),
            statement_object: iri(&config.statement_object),
            truth_value: iri(&config.truth_value),

            part_of: iri(&config.part_of),
            contains: iri(&config.contains),
            location_classes: iris(&config.location_classes),
            time_zones: iri(&config.time_zones),
            time_zone_class: iri(&config.time_zone_class),

            person_class: iri(&config.person_class),
            birth_place: iri(&config.birth_place),
            lived_place: iri(&config.lived_place),
            nationality: iri(&config.nationality),
            profession: iri(&config.profession),
            gender: iri(&config.gender),
            male: iri(&config.male),
            female: iri(&config.female),
            partner_relations: iris(&config.partner_relations),

            instrument_classes: iris(&config.instrument_classes),
            musician_classes: iris(&config.musician_classes),
            musician_profession: iri(&config.musician_profession),

            film_class: iri(&config.film_class),
            film_genre_class: iri(&config.film_genre_class),
            film_genre: iri(&config.film_genre),
            sequel: iri(&config.sequel),
            prequel: iri(&config.prequel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_interns_configured_iris() {
        let registry = SymbolRegistry::new();
        let existing = registry.intern_iri("http://rdf.freebase.com/ns/people.person");
        let vocab = Vocabulary::resolve(&VocabularyConfig::default(), &registry);

        assert_eq!(vocab.person_class, existing);
        assert_eq!(vocab.location_classes.len(), 4);
        assert_eq!(vocab.partner_relations.len(), 2);
        assert_eq!(
            registry.resolve_label(vocab.truth_value),
            "http://swc2017.aksw.org/hasTruthValue"
        );
    }

    #[test]
    fn resolve_is_stable() {
        let registry = SymbolRegistry::new();
        let a = Vocabulary::resolve(&VocabularyConfig::default(), &registry);
        let before = registry.len();
        let b = Vocabulary::resolve(&VocabularyConfig::default(), &registry);
        assert_eq!(a.gender, b.gender);
        assert_eq!(registry.len(), before);
    }
}
