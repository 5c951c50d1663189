//! N-Triples loading.
//!
//! Files are parsed with oxigraph's streaming parser and every term is
//! interned into the shared [`SymbolRegistry`]. A literal is identified by its
//! lexical value alone; datatype and language tag are dropped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Term;

use crate::error::LoadError;
use crate::graph::{IndexedGraph, Triple};
use crate::registry::SymbolRegistry;
use crate::symbol::{SymbolId, SymbolKind};

pub type LoadResult<T> = std::result::Result<T, LoadError>;

fn intern_term(registry: &SymbolRegistry, term: Term) -> SymbolId {
    match term {
        Term::NamedNode(node) => registry.intern(SymbolKind::Iri, node.as_str()),
        Term::BlankNode(node) => registry.intern(SymbolKind::Blank, node.as_str()),
        Term::Literal(literal) => registry.intern(SymbolKind::Literal, literal.value()),
        #[allow(unreachable_patterns)]
        other => registry.intern(SymbolKind::Literal, &other.to_string()),
    }
}

/// Parse N-Triples from `reader`. `source` names the input in errors.
pub fn parse_ntriples<R: Read>(
    reader: R,
    source: &str,
    registry: &SymbolRegistry,
) -> LoadResult<Vec<Triple>> {
    let mut triples = Vec::new();
    for quad in RdfParser::from_format(RdfFormat::NTriples).for_reader(reader) {
        let quad = quad.map_err(|e| LoadError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        let subject = intern_term(registry, Term::from(quad.subject));
        let predicate = registry.intern(SymbolKind::Iri, quad.predicate.as_str());
        let object = intern_term(registry, quad.object);
        triples.push(Triple::new(subject, predicate, object));
    }
    Ok(triples)
}

/// Parse an N-Triples file.
pub fn load_triples(path: &Path, registry: &SymbolRegistry) -> LoadResult<Vec<Triple>> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let triples = parse_ntriples(BufReader::new(file), &path.display().to_string(), registry)?;
    tracing::info!(path = %path.display(), triples = triples.len(), "loaded triples");
    Ok(triples)
}

/// Parse an N-Triples file into an indexed graph.
pub fn load_graph(path: &Path, registry: &SymbolRegistry) -> LoadResult<IndexedGraph> {
    load_triples(path, registry).map(IndexedGraph::from_triples)
}

/// Like [`load_graph`], but a file that cannot be opened yields an empty
/// graph and a warning. Parse errors still fail.
pub fn load_graph_or_empty(
    path: &Path,
    registry: &SymbolRegistry,
    role: &str,
) -> LoadResult<IndexedGraph> {
    match load_graph(path, registry) {
        Err(LoadError::Io { path: shown, source }) => {
            tracing::warn!(
                role,
                path = %shown,
                error = %source,
                "graph unavailable, continuing with an empty one"
            );
            Ok(IndexedGraph::empty())
        }
        other => other,
    }
}
