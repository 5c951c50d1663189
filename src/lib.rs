// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # verikg
//!
//! A fact-checking engine that scores reified candidate statements against a
//! reference knowledge graph and a class hierarchy.
//!
//! ## Architecture
//!
//! - **Symbols** (`symbol`, `registry`): interned IRIs, blank nodes and literals
//! - **Graph primitives** (`graph`): indexed triple store, memoized transitive
//!   closure, bounded bidirectional path search
//! - **Knowledge base** (`kb`, `vocab`): type checks and location hierarchies
//!   over the loaded graphs
//! - **Heuristics** (`heuristics`): per-predicate plausibility rules with a
//!   path-connectivity fallback
//! - **Checker** (`checker`): parallel batch scoring and evaluation
//! - **I/O** (`ingest`, `export`): N-Triples in and out via oxigraph
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use verikg::config::CheckerConfig;
//! use verikg::engine::{Engine, GraphSources};
//!
//! let engine = Engine::open(&GraphSources::default(), CheckerConfig::default()).unwrap();
//! let report = engine
//!     .check_file(Path::new("fokg-sw-test-2024.nt"), Path::new("result.ttl"))
//!     .unwrap();
//! println!("deviation: {}", report.evaluation.deviation);
//! ```

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod graph;
pub mod heuristics;
pub mod ingest;
pub mod kb;
pub mod registry;
pub mod symbol;
pub mod vocab;
