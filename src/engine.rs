//! Engine facade: top-level API for verikg.
//!
//! The `Engine` owns the symbol registry, the knowledge base and the fact
//! checker, and wires loading, scoring and export together.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::checker::{CandidateStatement, Evaluation, FactChecker, ScoreResult, collect_candidates};
use crate::config::CheckerConfig;
use crate::error::{CheckError, VerikgResult};
use crate::export;
use crate::graph::IndexedGraph;
use crate::heuristics::Verdict;
use crate::ingest;
use crate::kb::KnowledgeBase;
use crate::registry::SymbolRegistry;
use crate::symbol::{SymbolId, SymbolKind};
use crate::vocab::Vocabulary;

pub const DEFAULT_REFERENCE_FILE: &str = "reference-kg.nt";
pub const DEFAULT_HIERARCHY_FILE: &str = "classHierarchy.nt";
pub const DEFAULT_INPUT_FILE: &str = "fokg-sw-test-2024.nt";
pub const DEFAULT_OUTPUT_FILE: &str = "result.ttl";

/// The candidate file to read: `positional` if it names an existing file,
/// otherwise `flag`.
pub fn resolve_input(positional: Option<&Path>, flag: &Path) -> PathBuf {
    match positional {
        Some(path) if path.exists() => path.to_path_buf(),
        Some(path) => {
            tracing::warn!(
                path = %path.display(),
                fallback = %flag.display(),
                "input file not found, using --input"
            );
            flag.to_path_buf()
        }
        None => flag.to_path_buf(),
    }
}

/// Where the background graphs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSources {
    pub reference: PathBuf,
    pub hierarchy: PathBuf,
}

impl Default for GraphSources {
    fn default() -> Self {
        Self {
            reference: PathBuf::from(DEFAULT_REFERENCE_FILE),
            hierarchy: PathBuf::from(DEFAULT_HIERARCHY_FILE),
        }
    }
}

/// Outcome of a full batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub evaluation: Evaluation,
    /// Candidates missing a subject, predicate or object.
    pub malformed: usize,
    pub output: PathBuf,
}

/// Summary statistics about the loaded graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub symbols: usize,
    pub reference_triples: usize,
    pub reference_nodes: usize,
    pub reference_predicates: usize,
    pub hierarchy_triples: usize,
    pub threads: usize,
}

impl fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "symbols:              {}", self.symbols)?;
        writeln!(f, "reference triples:    {}", self.reference_triples)?;
        writeln!(f, "reference nodes:      {}", self.reference_nodes)?;
        writeln!(f, "reference predicates: {}", self.reference_predicates)?;
        writeln!(f, "hierarchy triples:    {}", self.hierarchy_triples)?;
        write!(f, "worker threads:       {}", self.threads)
    }
}

/// The verikg fact-checking engine.
pub struct Engine {
    config: CheckerConfig,
    registry: Arc<SymbolRegistry>,
    checker: FactChecker,
}

impl Engine {
    /// Load the reference and hierarchy graphs and build the engine.
    ///
    /// Unreadable graph files degrade to empty graphs.
    pub fn open(sources: &GraphSources, config: CheckerConfig) -> VerikgResult<Self> {
        let registry = Arc::new(SymbolRegistry::new());
        let reference = ingest::load_graph_or_empty(&sources.reference, &registry, "reference")?;
        let hierarchy = ingest::load_graph_or_empty(&sources.hierarchy, &registry, "hierarchy")?;
        Self::from_graphs(registry, reference, hierarchy, config)
    }

    /// Build the engine from graphs already interned into `registry`.
    pub fn from_graphs(
        registry: Arc<SymbolRegistry>,
        reference: IndexedGraph,
        hierarchy: IndexedGraph,
        config: CheckerConfig,
    ) -> VerikgResult<Self> {
        config.validate()?;
        let vocab = Vocabulary::resolve(&config.vocabulary, &registry);
        let kb = KnowledgeBase::new(
            Arc::clone(&registry),
            vocab,
            Arc::new(reference),
            Arc::new(hierarchy),
            &config.path,
        );
        let checker = FactChecker::new(Arc::new(kb), &config)?;

        tracing::info!(
            symbols = registry.len(),
            reference = checker.kb().reference().len(),
            hierarchy = checker.kb().hierarchy().len(),
            threads = checker.threads(),
            "initialized verikg engine"
        );

        Ok(Self {
            config,
            registry,
            checker,
        })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn kb(&self) -> &KnowledgeBase {
        self.checker.kb()
    }

    pub fn checker(&self) -> &FactChecker {
        &self.checker
    }

    /// Read candidate statements from an N-Triples file. A missing file is an
    /// error.
    pub fn load_candidates(&self, path: &Path) -> VerikgResult<Vec<CandidateStatement>> {
        let statements = ingest::load_graph(path, &self.registry)?;
        let candidates = collect_candidates(&statements, self.kb().vocab(), &self.registry);
        tracing::info!(
            path = %path.display(),
            candidates = candidates.len(),
            "collected candidates"
        );
        Ok(candidates)
    }

    pub fn check(&self, candidates: &[CandidateStatement]) -> ScoreResult {
        self.checker.run(candidates)
    }

    /// Score every candidate in `input`, write the results to `output` and
    /// report the deviation from the asserted labels.
    pub fn check_file(&self, input: &Path, output: &Path) -> VerikgResult<CheckReport> {
        let candidates = self.load_candidates(input)?;
        let results = self.check(&candidates);
        export::export_scores(
            output,
            &results,
            &self.registry,
            &self.config.vocabulary.truth_value,
        )?;

        let evaluation = FactChecker::evaluate(&candidates, &results);
        let malformed = candidates.iter().filter(|c| c.triple().is_none()).count();
        tracing::info!(
            deviation = evaluation.deviation,
            count = evaluation.count,
            malformed,
            "check complete"
        );
        Ok(CheckReport {
            evaluation,
            malformed,
            output: output.to_path_buf(),
        })
    }

    /// Resolve a term as written on the command line: `_:x` is a blank node,
    /// anything else an IRI, falling back to a literal.
    pub fn resolve_term(&self, text: &str) -> VerikgResult<SymbolId> {
        let found = match text.strip_prefix("_:") {
            Some(blank) => self.registry.lookup(SymbolKind::Blank, blank),
            None => self
                .registry
                .lookup_iri(text)
                .or_else(|| self.registry.lookup(SymbolKind::Literal, text)),
        };
        found.ok_or_else(|| {
            CheckError::UnknownSymbol {
                label: text.to_string(),
            }
            .into()
        })
    }

    /// Score a single triple given by its terms.
    pub fn score(&self, subject: &str, predicate: &str, object: &str) -> VerikgResult<Verdict> {
        let s = self.resolve_term(subject)?;
        let p = self.resolve_term(predicate)?;
        let o = self.resolve_term(object)?;
        Ok(self.checker.check_truth(s, p, o))
    }

    pub fn info(&self) -> EngineInfo {
        let reference = self.kb().reference();
        EngineInfo {
            symbols: self.registry.len(),
            reference_triples: reference.len(),
            reference_nodes: reference.node_count(),
            reference_predicates: reference.predicates().len(),
            hierarchy_triples: self.kb().hierarchy().len(),
            threads: self.checker.threads(),
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("checker", &self.checker)
            .finish()
    }
}
