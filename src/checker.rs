//! Batch fact checking over reified candidate statements.
//!
//! Candidates are `rdf:Statement` resources carrying `rdf:subject`,
//! `rdf:predicate`, `rdf:object` and optionally a `hasTruthValue` label.
//! [`FactChecker::run`] scores them on a dedicated rayon pool; each worker
//! folds into a local [`ScoreResult`] and the partial results are merged.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CheckerConfig;
use crate::error::{CheckError, VerikgResult};
use crate::graph::IndexedGraph;
use crate::heuristics::{HeuristicCatalog, Verdict};
use crate::kb::KnowledgeBase;
use crate::registry::SymbolRegistry;
use crate::symbol::SymbolId;
use crate::vocab::Vocabulary;

/// One reified statement to be scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateStatement {
    pub id: SymbolId,
    pub subject: Option<SymbolId>,
    pub predicate: Option<SymbolId>,
    pub object: Option<SymbolId>,
    /// Asserted truth label, if the file carries one.
    pub truth: Option<f64>,
}

impl CandidateStatement {
    /// The statement's triple, or `None` if any part is missing.
    pub fn triple(&self) -> Option<(SymbolId, SymbolId, SymbolId)> {
        Some((self.subject?, self.predicate?, self.object?))
    }
}

/// Extract candidate statements from a loaded statement graph, ordered by id.
///
/// When a property has several values the one with the lowest id is used.
/// Labels that do not parse as a number are treated as absent.
pub fn collect_candidates(
    statements: &IndexedGraph,
    vocab: &Vocabulary,
    registry: &SymbolRegistry,
) -> Vec<CandidateStatement> {
    let first = |id: SymbolId, predicate: SymbolId| {
        statements.objects(id, Some(predicate)).first().copied()
    };

    statements
        .subjects(Some(vocab.rdf_type), vocab.statement)
        .iter()
        .map(|&id| {
            let truth = first(id, vocab.truth_value).and_then(|label| {
                registry
                    .with_label(label, |text| text.trim().parse::<f64>().ok())
                    .flatten()
            });
            CandidateStatement {
                id,
                subject: first(id, vocab.statement_subject),
                predicate: first(id, vocab.statement_predicate),
                object: first(id, vocab.statement_object),
                truth,
            }
        })
        .collect()
}

/// Statement id → score, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    scores: BTreeMap<SymbolId, f64>,
}

impl ScoreResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, statement: SymbolId, score: f64) {
        self.scores.insert(statement, score);
    }

    pub fn get(&self, statement: SymbolId) -> Option<f64> {
        self.scores.get(&statement).copied()
    }

    /// Absorb another partial result. Associative and, for disjoint inputs,
    /// commutative.
    pub fn merge(mut self, other: ScoreResult) -> ScoreResult {
        if self.scores.len() < other.scores.len() {
            return other.merge(self);
        }
        self.scores.extend(other.scores);
        self
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, f64)> + '_ {
        self.scores.iter().map(|(&id, &score)| (id, score))
    }
}

/// Mean absolute deviation of produced scores from asserted labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub deviation: f64,
    /// Number of candidates compared.
    pub count: usize,
    /// How many of them carried a truth label.
    pub labelled: usize,
}

/// Scores candidate statements against a knowledge base.
pub struct FactChecker {
    kb: Arc<KnowledgeBase>,
    catalog: HeuristicCatalog,
    pool: rayon::ThreadPool,
}

impl FactChecker {
    pub fn new(kb: Arc<KnowledgeBase>, config: &CheckerConfig) -> VerikgResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("verikg-worker-{i}"))
            .build()
            .map_err(|e| CheckError::WorkerPool {
                threads: config.threads,
                message: e.to_string(),
            })?;
        tracing::debug!(threads = pool.current_num_threads(), "worker pool ready");

        Ok(Self {
            kb,
            catalog: HeuristicCatalog::new(&config.rules),
            pool,
        })
    }

    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Score one triple.
    pub fn check_truth(
        &self,
        subject: SymbolId,
        predicate: SymbolId,
        object: SymbolId,
    ) -> Verdict {
        self.catalog.check_truth(&self.kb, subject, predicate, object)
    }

    /// Score one candidate; malformed candidates get 0.0.
    pub fn verdict(&self, candidate: &CandidateStatement) -> Verdict {
        match candidate.triple() {
            Some((s, p, o)) => self.check_truth(s, p, o),
            None => {
                tracing::debug!(statement = %candidate.id, "malformed statement, scoring 0.0");
                Verdict::malformed()
            }
        }
    }

    /// Score every candidate on the worker pool.
    pub fn run(&self, candidates: &[CandidateStatement]) -> ScoreResult {
        tracing::info!(
            candidates = candidates.len(),
            threads = self.threads(),
            "scoring statements"
        );
        let result = self.pool.install(|| {
            candidates
                .par_iter()
                .fold(ScoreResult::new, |mut acc, candidate| {
                    let verdict = self.verdict(candidate);
                    tracing::debug!(
                        statement = %candidate.id,
                        score = verdict.score,
                        basis = %verdict.basis,
                        "scored"
                    );
                    acc.insert(candidate.id, verdict.score);
                    acc
                })
                .reduce(ScoreResult::new, ScoreResult::merge)
        });
        tracing::info!(
            scored = result.len(),
            cached_closures = self.kb.cached_closures(),
            "scoring complete"
        );
        result
    }

    /// Compare scores with the candidates' labels. A missing label counts as
    /// 0.0, a missing score likewise.
    pub fn evaluate(candidates: &[CandidateStatement], results: &ScoreResult) -> Evaluation {
        let count = candidates.len();
        let labelled = candidates.iter().filter(|c| c.truth.is_some()).count();
        if count == 0 {
            return Evaluation {
                deviation: 0.0,
                count,
                labelled,
            };
        }
        let total: f64 = candidates
            .iter()
            .map(|c| (results.get(c.id).unwrap_or(0.0) - c.truth.unwrap_or(0.0)).abs())
            .sum();
        Evaluation {
            deviation: total / count as f64,
            count,
            labelled,
        }
    }
}

impl std::fmt::Debug for FactChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactChecker")
            .field("kb", &self.kb)
            .field("catalog", &self.catalog)
            .field("threads", &self.threads())
            .finish()
    }
}
