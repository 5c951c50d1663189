//! Heuristic rule catalog and dispatch.
//!
//! Each predicate family with a dedicated plausibility estimate is a
//! [`RuleKind`]. Predicates are classified by matching their IRI against a
//! configured suffix per kind, scanned in [`RuleKind::ALL`] order; the first
//! match wins. Classification is memoized per predicate id, so the string
//! scan runs once per distinct predicate rather than once per statement.
//!
//! # Dispatch policy
//!
//! 1. `(s, p, o)` is asserted in the reference graph → 1.0.
//! 2. `p` classifies as a rule kind → that rule's score.
//! 3. Otherwise → weighted bidirectional path score.

mod media;
mod people;
mod places;

use std::fmt;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::config::RuleSuffixes;
use crate::kb::KnowledgeBase;
use crate::symbol::SymbolId;

pub use media::{film_genre, instrument};
pub use people::{gender, nationality, place_of_birth};
pub use places::{location_contains, time_zone};

// ---------------------------------------------------------------------------
// Rule kinds
// ---------------------------------------------------------------------------

/// Predicate families with a dedicated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Nationality,
    PlaceOfBirth,
    Instrument,
    LocationContains,
    Gender,
    TimeZone,
    FilmGenre,
}

impl RuleKind {
    /// Dispatch order. First suffix match wins.
    pub const ALL: [RuleKind; 7] = [
        RuleKind::Nationality,
        RuleKind::PlaceOfBirth,
        RuleKind::Instrument,
        RuleKind::LocationContains,
        RuleKind::Gender,
        RuleKind::TimeZone,
        RuleKind::FilmGenre,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Nationality => "nationality",
            RuleKind::PlaceOfBirth => "place-of-birth",
            RuleKind::Instrument => "instrument",
            RuleKind::LocationContains => "location-contains",
            RuleKind::Gender => "gender",
            RuleKind::TimeZone => "time-zone",
            RuleKind::FilmGenre => "film-genre",
        }
    }

    /// The configured predicate suffix selecting this rule.
    pub fn suffix(self, suffixes: &RuleSuffixes) -> &str {
        match self {
            RuleKind::Nationality => &suffixes.nationality,
            RuleKind::PlaceOfBirth => &suffixes.place_of_birth,
            RuleKind::Instrument => &suffixes.instrument,
            RuleKind::LocationContains => &suffixes.location_contains,
            RuleKind::Gender => &suffixes.gender,
            RuleKind::TimeZone => &suffixes.time_zone,
            RuleKind::FilmGenre => &suffixes.film_genre,
        }
    }

    /// Run the rule. The result is not yet clamped.
    pub fn apply(self, subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
        match self {
            RuleKind::Nationality => nationality(subject, object, kb),
            RuleKind::PlaceOfBirth => place_of_birth(subject, object, kb),
            RuleKind::Instrument => instrument(subject, object, kb),
            RuleKind::LocationContains => location_contains(subject, object, kb),
            RuleKind::Gender => gender(subject, object, kb),
            RuleKind::TimeZone => time_zone(subject, object, kb),
            RuleKind::FilmGenre => film_genre(subject, object, kb),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// What decided a statement's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "rule")]
pub enum Basis {
    /// The exact triple is asserted in the reference graph.
    KnownFact,
    /// A dedicated heuristic rule.
    Rule(RuleKind),
    /// No rule matched; weighted path connectivity.
    PathFallback,
    /// Subject, predicate or object missing from the statement.
    Malformed,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::KnownFact => f.write_str("known-fact"),
            Basis::Rule(kind) => write!(f, "rule:{kind}"),
            Basis::PathFallback => f.write_str("path-fallback"),
            Basis::Malformed => f.write_str("malformed"),
        }
    }
}

/// A score in [0, 1] together with its basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub score: f64,
    pub basis: Basis,
}

impl Verdict {
    /// Build a verdict, clamping the score into [0, 1]. NaN becomes 0.0.
    pub fn new(score: f64, basis: Basis) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        Self { score, basis }
    }

    pub fn malformed() -> Self {
        Self::new(0.0, Basis::Malformed)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered suffix table plus per-predicate classification memo.
pub struct HeuristicCatalog {
    table: Vec<(RuleKind, String)>,
    classified: DashMap<SymbolId, Option<RuleKind>>,
}

impl HeuristicCatalog {
    pub fn new(suffixes: &RuleSuffixes) -> Self {
        let table = RuleKind::ALL
            .iter()
            .map(|&kind| (kind, kind.suffix(suffixes).to_string()))
            .collect();
        Self {
            table,
            classified: DashMap::new(),
        }
    }

    /// First rule kind whose suffix ends `predicate_iri`.
    pub fn classify_iri(&self, predicate_iri: &str) -> Option<RuleKind> {
        self.table
            .iter()
            .find(|(_, suffix)| predicate_iri.ends_with(suffix.as_str()))
            .map(|&(kind, _)| kind)
    }

    /// Memoized classification of a predicate symbol.
    pub fn classify(&self, predicate: SymbolId, kb: &KnowledgeBase) -> Option<RuleKind> {
        if let Some(hit) = self.classified.get(&predicate) {
            return *hit.value();
        }
        let kind = kb
            .registry()
            .with_label(predicate, |iri| self.classify_iri(iri))
            .flatten();
        self.classified.insert(predicate, kind);
        kind
    }

    /// Score one well-formed statement under the dispatch policy.
    pub fn check_truth(
        &self,
        kb: &KnowledgeBase,
        subject: SymbolId,
        predicate: SymbolId,
        object: SymbolId,
    ) -> Verdict {
        if kb.reference().contains(subject, predicate, object) {
            return Verdict::new(1.0, Basis::KnownFact);
        }
        match self.classify(predicate, kb) {
            Some(kind) => Verdict::new(kind.apply(subject, object, kb), Basis::Rule(kind)),
            None => Verdict::new(kb.path_fallback(subject, object), Basis::PathFallback),
        }
    }
}

impl fmt::Debug for HeuristicCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.table.iter().map(|(k, _)| k.name()).collect();
        f.debug_struct("HeuristicCatalog")
            .field("rules", &names)
            .field("classified", &self.classified.len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testkit::{Builder, approx};
    use super::*;

    #[test]
    fn classify_by_suffix_in_order() {
        let catalog = HeuristicCatalog::new(&RuleSuffixes::default());
        let fb = "http://rdf.freebase.com/ns/";
        assert_eq!(
            catalog.classify_iri(&format!("{fb}people.person.nationality")),
            Some(RuleKind::Nationality)
        );
        assert_eq!(
            catalog.classify_iri(&format!("{fb}location.location.time_zones")),
            Some(RuleKind::TimeZone)
        );
        assert_eq!(catalog.classify_iri(&format!("{fb}film.film.directed_by")), None);
    }

    #[test]
    fn first_match_wins_on_overlapping_suffixes() {
        let suffixes = RuleSuffixes {
            nationality: "nationality".into(),
            gender: "person.nationality".into(),
            ..RuleSuffixes::default()
        };
        let catalog = HeuristicCatalog::new(&suffixes);
        assert_eq!(
            catalog.classify_iri("http://x/people.person.nationality"),
            Some(RuleKind::Nationality)
        );
    }

    #[test]
    fn classification_is_memoized() {
        let b = Builder::new();
        let kb = b.build();
        let catalog = HeuristicCatalog::new(&RuleSuffixes::default());
        assert_eq!(catalog.classify(b.v.gender, &kb), Some(RuleKind::Gender));
        assert_eq!(catalog.classify(b.v.gender, &kb), Some(RuleKind::Gender));
        assert_eq!(catalog.classified.len(), 1);
    }

    #[test]
    fn known_fact_short_circuits_any_rule() {
        let mut b = Builder::new();
        // Not typed as a person, so the gender rule alone would say 0.0.
        let x = b.iri("x");
        let (gender, female) = (b.v.gender, b.v.female);
        b.fact(x, gender, female);
        let kb = b.build();
        let catalog = HeuristicCatalog::new(&RuleSuffixes::default());

        let verdict = catalog.check_truth(&kb, x, gender, female);
        assert_eq!(verdict.score, 1.0);
        assert_eq!(verdict.basis, Basis::KnownFact);
    }

    #[test]
    fn unmatched_predicate_uses_weighted_path() {
        let mut b = Builder::new();
        let (a, via, c) = (b.iri("a"), b.iri("via"), b.iri("c"));
        let unrelated = b.iri("film.film.directed_by");
        b.fact(a, via, c);
        let kb = b.build();
        let catalog = HeuristicCatalog::new(&RuleSuffixes::default());

        let verdict = catalog.check_truth(&kb, a, unrelated, c);
        assert_eq!(verdict.basis, Basis::PathFallback);
        approx(verdict.score, 0.5 * 0.4);

        let disconnected = catalog.check_truth(&kb, c, unrelated, a);
        assert_eq!(disconnected.score, 0.0);
    }

    #[test]
    fn verdict_clamps() {
        assert_eq!(Verdict::new(1.7, Basis::PathFallback).score, 1.0);
        assert_eq!(Verdict::new(-0.2, Basis::PathFallback).score, 0.0);
        assert_eq!(Verdict::new(f64::NAN, Basis::PathFallback).score, 0.0);
    }

    #[test]
    fn basis_serializes_with_rule_name() {
        let json = serde_json::to_string(&Basis::Rule(RuleKind::PlaceOfBirth)).unwrap();
        assert_eq!(json, r#"{"kind":"rule","rule":"place_of_birth"}"#);
        assert_eq!(Basis::Rule(RuleKind::TimeZone).to_string(), "rule:time-zone");
    }
}
