//! Result export.
//!
//! Scores are written as N-Triples, one
//! `<statement> <hasTruthValue> "score"^^xsd:double` line per statement, in
//! statement id order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::vocab::xsd;
use oxigraph::model::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Triple};

use crate::checker::ScoreResult;
use crate::error::ExportError;
use crate::registry::SymbolRegistry;
use crate::symbol::{SymbolId, SymbolKind};

pub type ExportResult<T> = std::result::Result<T, ExportError>;

fn subject_node(id: SymbolId, registry: &SymbolRegistry) -> ExportResult<NamedOrBlankNode> {
    let meta = registry.get(id).ok_or_else(|| ExportError::InvalidTerm {
        label: id.to_string(),
        message: "not a registered symbol".into(),
    })?;
    let invalid = |message: String| ExportError::InvalidTerm {
        label: meta.label.clone(),
        message,
    };
    match meta.kind {
        SymbolKind::Iri => NamedNode::new(meta.label.as_str())
            .map(Into::into)
            .map_err(|e| invalid(e.to_string())),
        SymbolKind::Blank => BlankNode::new(meta.label.as_str())
            .map(Into::into)
            .map_err(|e| invalid(e.to_string())),
        SymbolKind::Literal => Err(invalid("literals cannot be subjects".into())),
    }
}

/// Serialize `results` as N-Triples into `writer` and return the writer.
pub fn write_scores<W: Write>(
    writer: W,
    results: &ScoreResult,
    registry: &SymbolRegistry,
    truth_predicate: &str,
) -> ExportResult<W> {
    let predicate = NamedNode::new(truth_predicate).map_err(|e| ExportError::InvalidTerm {
        label: truth_predicate.to_string(),
        message: e.to_string(),
    })?;
    let io = |source: std::io::Error| ExportError::Io {
        path: "<writer>".into(),
        source,
    };

    let mut serializer = RdfSerializer::from_format(RdfFormat::NTriples).for_writer(writer);
    for (id, score) in results.iter() {
        let subject = subject_node(id, registry)?;
        let value = Literal::new_typed_literal(format!("{score:?}"), xsd::DOUBLE);
        serializer
            .serialize_triple(&Triple::new(subject, predicate.clone(), value))
            .map_err(io)?;
    }
    serializer.finish().map_err(io)
}

/// Write `results` to an N-Triples file at `path`.
pub fn export_scores(
    path: &Path,
    results: &ScoreResult,
    registry: &SymbolRegistry,
    truth_predicate: &str,
) -> ExportResult<()> {
    let with_path = |source: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(with_path)?;
    let mut writer = match write_scores(BufWriter::new(file), results, registry, truth_predicate) {
        Err(ExportError::Io { source, .. }) => return Err(with_path(source)),
        other => other?,
    };
    writer.flush().map_err(with_path)?;
    tracing::info!(path = %path.display(), statements = results.len(), "wrote results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HAS_TRUTH_VALUE;

    fn sample(registry: &SymbolRegistry) -> ScoreResult {
        let mut results = ScoreResult::new();
        results.insert(registry.intern_iri("http://example.org/fact/2"), 0.25);
        results.insert(registry.intern_iri("http://example.org/fact/1"), 1.0);
        results
    }

    #[test]
    fn writes_typed_doubles_in_id_order() {
        let registry = SymbolRegistry::new();
        let results = sample(&registry);
        let bytes = write_scores(Vec::new(), &results, &registry, HAS_TRUTH_VALUE).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("<http://example.org/fact/2>"));
        assert!(lines[0].contains(r#""0.25"^^<http://www.w3.org/2001/XMLSchema#double>"#));
        assert!(lines[1].contains("<http://swc2017.aksw.org/hasTruthValue>"));
        assert!(lines[1].contains(r#""1.0"^^"#));
    }

    #[test]
    fn blank_statements_are_allowed() {
        let registry = SymbolRegistry::new();
        let mut results = ScoreResult::new();
        results.insert(registry.intern(SymbolKind::Blank, "s1"), 0.5);
        let bytes = write_scores(Vec::new(), &results, &registry, HAS_TRUTH_VALUE).unwrap();
        assert!(String::from_utf8(bytes).unwrap().starts_with("_:s1 "));
    }

    #[test]
    fn literal_statement_is_rejected() {
        let registry = SymbolRegistry::new();
        let mut results = ScoreResult::new();
        results.insert(registry.intern(SymbolKind::Literal, "oops"), 0.5);
        let err = write_scores(Vec::new(), &results, &registry, HAS_TRUTH_VALUE).unwrap_err();
        assert!(matches!(err, ExportError::InvalidTerm { .. }));
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("result.ttl");
        let registry = SymbolRegistry::new();
        export_scores(&path, &sample(&registry), &registry, HAS_TRUTH_VALUE).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
