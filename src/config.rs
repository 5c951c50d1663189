//! Checker configuration, persisted as TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock setup: Freebase-style identifiers, fallback path search with depth
//! 2 and a 500-node frontier, weighted by 0.4.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Freebase namespace used by the default vocabulary.
pub const FREEBASE_NS: &str = "http://rdf.freebase.com/ns/";

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Predicate carrying both the asserted label and the produced score.
pub const HAS_TRUTH_VALUE: &str = "http://swc2017.aksw.org/hasTruthValue";

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Worker threads for batch scoring; 0 lets rayon decide.
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub path: PathConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub rules: RuleSuffixes,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            path: PathConfig::default(),
            vocabulary: VocabularyConfig::default(),
            rules: RuleSuffixes::default(),
        }
    }
}

impl CheckerConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scoring core cannot use.
    pub fn validate(&self) -> ConfigResult<()> {
        let weight = self.path.weight;
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::Invalid {
                message: format!("path.weight must be within [0, 1], got {weight}"),
            });
        }
        if let Some((rule, _)) = self.rules.entries().into_iter().find(|(_, s)| s.is_empty()) {
            return Err(ConfigError::Invalid {
                message: format!("rules.{rule} must not be empty: it would match every predicate"),
            });
        }
        Ok(())
    }

    /// Serialize back to TOML (used by `verikg config`).
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            message: format!("failed to serialize config: {e}"),
        })
    }
}

/// Bounds of the fallback path search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_frontier_cap")]
    pub frontier_cap: usize,
    /// Multiplier applied to the path score.
    #[serde(default = "default_path_weight")]
    pub weight: f64,
}

fn default_max_depth() -> usize {
    2
}
fn default_frontier_cap() -> usize {
    500
}
fn default_path_weight() -> f64 {
    0.4
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            frontier_cap: default_frontier_cap(),
            weight: default_path_weight(),
        }
    }
}

/// Predicate IRI suffix that selects each rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSuffixes {
    pub nationality: String,
    pub place_of_birth: String,
    pub instrument: String,
    pub location_contains: String,
    pub gender: String,
    pub time_zone: String,
    pub film_genre: String,
}

impl Default for RuleSuffixes {
    fn default() -> Self {
        Self {
            nationality: "people.person.nationality".into(),
            place_of_birth: "people.person.place_of_birth".into(),
            instrument: "music.instrument.instrumentalists".into(),
            location_contains: "location.location.contains".into(),
            gender: "people.person.gender".into(),
            time_zone: "location.location.time_zones".into(),
            film_genre: "film.film.genre".into(),
        }
    }
}

impl RuleSuffixes {
    /// `(field name, suffix)` pairs, in field order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("nationality", &self.nationality),
            ("place_of_birth", &self.place_of_birth),
            ("instrument", &self.instrument),
            ("location_contains", &self.location_contains),
            ("gender", &self.gender),
            ("time_zone", &self.time_zone),
            ("film_genre", &self.film_genre),
        ]
    }
}

/// IRIs of every relation, class and entity the rules refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    // RDF plumbing
    pub rdf_type: String,
    pub subclass_of: String,
    pub label: String,
    pub statement: String,
    pub statement_subject: String,
    pub statement_predicate: String,
    pub statement_object: String,
    pub truth_value: String,

    // Locations
    pub part_of: String,
    pub contains: String,
    pub location_classes: Vec<String>,
    pub time_zones: String,
    pub time_zone_class: String,

    // People
    pub person_class: String,
    pub birth_place: String,
    pub lived_place: String,
    pub nationality: String,
    pub profession: String,
    pub gender: String,
    pub male: String,
    pub female: String,
    pub partner_relations: Vec<String>,

    // Music
    pub instrument_classes: Vec<String>,
    pub musician_classes: Vec<String>,
    pub musician_profession: String,

    // Film
    pub film_class: String,
    pub film_genre_class: String,
    pub film_genre: String,
    pub sequel: String,
    pub prequel: String,
}

fn fb(local: &str) -> String {
    format!("{FREEBASE_NS}{local}")
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            rdf_type: format!("{RDF_NS}type"),
            subclass_of: format!("{RDFS_NS}subClassOf"),
            label: format!("{RDFS_NS}label"),
            statement: format!("{RDF_NS}Statement"),
            statement_subject: format!("{RDF_NS}subject"),
            statement_predicate: format!("{RDF_NS}predicate"),
            statement_object: format!("{RDF_NS}object"),
            truth_value: HAS_TRUTH_VALUE.into(),

            part_of: fb("location.location.containedby"),
            contains: fb("location.location.contains"),
            location_classes: vec![
                fb("location.location"),
                fb("base.locations.countries"),
                fb("location.country"),
                fb("location.citytown"),
            ],
            time_zones: fb("location.location.time_zones"),
            time_zone_class: fb("time.time_zone"),

            person_class: fb("people.person"),
            birth_place: fb("people.person.place_of_birth"),
            lived_place: fb("people.person.places_lived"),
            nationality: fb("people.person.nationality"),
            profession: fb("people.person.profession"),
            gender: fb("people.person.gender"),
            male: fb("m.05zppz"),
            female: fb("m.02zsn"),
            partner_relations: vec![
                fb("people.person.spouse_s"),
                fb("celebrities.celebrity.sexual_relationships"),
            ],

            instrument_classes: vec![fb("music.instrument"), fb("music.performance_role")],
            musician_classes: vec![
                fb("music.musician"),
                fb("music.artist"),
                fb("music.group_member"),
            ],
            musician_profession: fb("m.09jwl"),

            film_class: fb("film.film"),
            film_genre_class: fb("film.film_genre"),
            film_genre: fb("film.film.genre"),
            sequel: fb("film.film.sequel"),
            prequel: fb("film.film.prequel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: CheckerConfig = toml::from_str("").unwrap();
        assert_eq!(config, CheckerConfig::default());
        assert_eq!(config.path.max_depth, 2);
        assert_eq!(config.path.frontier_cap, 500);
        assert!((config.path.weight - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: CheckerConfig = toml::from_str(
            r#"
            threads = 4

            [path]
            frontier_cap = 50

            [vocabulary]
            male = "http://example.org/Male"
            "#,
        )
        .unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.path.frontier_cap, 50);
        assert_eq!(config.path.max_depth, 2);
        assert_eq!(config.vocabulary.male, "http://example.org/Male");
        assert_eq!(config.vocabulary.female, fb("m.02zsn"));
        assert_eq!(config.rules, RuleSuffixes::default());
    }

    #[test]
    fn toml_round_trip() {
        let config = CheckerConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: CheckerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_weight_out_of_range() {
        let mut config = CheckerConfig::default();
        config.path.weight = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_empty_suffix() {
        let mut config = CheckerConfig::default();
        config.rules.gender.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rules.gender"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = CheckerConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_reports_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "threads = [").unwrap();
        assert!(matches!(
            CheckerConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
