//! Rich diagnostic error types for verikg.
//!
//! The scoring core never fails: closures, path search and rules always
//! produce a value. Errors only arise in the layers around it (loading input
//! files, reading configuration, writing results, building the worker pool).
//! Each of those defines its own error type with miette `#[diagnostic]`
//! derives so the CLI can print codes and help text.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for verikg.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum VerikgError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Check(#[from] CheckError),
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to open triple file: {path}")]
    #[diagnostic(
        code(verikg::load::io),
        help(
            "The file could not be opened. Check that the path exists and is \
             readable. Reference and hierarchy files may be omitted, but the \
             candidate statement file is required."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("N-Triples parse error in {path}: {message}")]
    #[diagnostic(
        code(verikg::load::parse),
        help(
            "The file is not valid N-Triples. Every line must be \
             `<subject> <predicate> <object> .` with absolute IRIs, blank nodes \
             or literals."
        )
    )]
    Parse { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(verikg::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(verikg::config::parse),
        help(
            "Check the TOML syntax. Every field is optional; omitted fields use \
             defaults. {message}"
        )
    )]
    Parse { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(verikg::config::invalid),
        help("Adjust the offending value in the config file or on the command line.")
    )]
    Invalid { message: String },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to write results to {path}")]
    #[diagnostic(
        code(verikg::export::io),
        help(
            "Check that the output directory exists and is writable, and that \
             the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} cannot be written as an RDF term: {message}")]
    #[diagnostic(
        code(verikg::export::term),
        help(
            "Result triples use the statement identifier as subject, so it must \
             be an IRI or a blank node, and the truth-value predicate must be a \
             valid absolute IRI. Check the candidate file and `vocabulary.truth_value`."
        )
    )]
    InvalidTerm { label: String, message: String },
}

// ---------------------------------------------------------------------------
// Check errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CheckError {
    #[error("failed to build worker pool with {threads} thread(s): {message}")]
    #[diagnostic(
        code(verikg::check::pool),
        help("Lower `threads` in the config (0 lets rayon pick one per core).")
    )]
    WorkerPool { threads: usize, message: String },

    #[error("unknown symbol: {label}")]
    #[diagnostic(
        code(verikg::check::unknown_symbol),
        help(
            "The IRI does not occur in any loaded graph. Pass the full IRI \
             exactly as it appears in the N-Triples files."
        )
    )]
    UnknownSymbol { label: String },
}

/// Convenience alias for functions returning verikg results.
pub type VerikgResult<T> = std::result::Result<T, VerikgError>;
