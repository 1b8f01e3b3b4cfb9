//! N-Triples serializer.
//!
//! One triple per line with absolute IRIs. RDF collections are expanded into
//! `rdf:first`/`rdf:rest` chains over numbered blank nodes.

use super::rdf::{escape_literal, triples, Term};
use crate::model::iris::{RDF_FIRST, RDF_NIL, RDF_REST};
use crate::model::{Literal, OntologyDocument};

/// Serializes a document to an N-Triples string.
#[must_use]
pub fn to_ntriples(document: &OntologyDocument) -> String {
    let mut out = String::with_capacity(64 * 1024);
    let mut blank = 0usize;

    for t in triples(document) {
        let subject = iri(t.subject.as_str());
        let predicate = iri(t.predicate.as_str());
        match &t.object {
            Term::Iri(object) => triple(&mut out, &subject, &predicate, &iri(object.as_str())),
            Term::Literal(literal) => triple(&mut out, &subject, &predicate, &lit(literal)),
            Term::Collection(items) => {
                if items.is_empty() {
                    triple(&mut out, &subject, &predicate, &iri(RDF_NIL));
                    continue;
                }
                let nodes: Vec<String> = (0..items.len()).map(|i| format!("_:c{}", blank + i)).collect();
                blank += items.len();
                triple(&mut out, &subject, &predicate, &nodes[0]);
                for (i, item) in items.iter().enumerate() {
                    triple(&mut out, &nodes[i], &iri(RDF_FIRST), &iri(item.as_str()));
                    let rest = nodes.get(i + 1).cloned().unwrap_or_else(|| iri(RDF_NIL));
                    triple(&mut out, &nodes[i], &iri(RDF_REST), &rest);
                }
            }
        }
    }
    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push(' ');
    out.push_str(pred);
    out.push(' ');
    out.push_str(obj);
    out.push_str(" .\n");
}

fn iri(s: &str) -> String {
    format!("<{s}>")
}

fn lit(literal: &Literal) -> String {
    format!(
        "\"{}\"^^<{}>",
        escape_literal(&literal.lexical),
        literal.datatype.iri()
    )
}
