//! Turtle 1.1 serializer.
//!
//! Triples are grouped by subject. The OWL, RDF, RDFS and XSD vocabularies
//! are abbreviated with prefixes; model IRIs are always written in full.

use super::rdf::{escape_literal, triples, Term};
use crate::model::iris::{OWL, RDF, RDFS, RDF_TYPE, XSD};
use crate::model::{Datatype, Iri, Literal, OntologyDocument};

const PREFIXES: [(&str, &str); 4] = [("owl", OWL), ("rdf", RDF), ("rdfs", RDFS), ("xsd", XSD)];

/// Serializes a document to a Turtle string.
#[must_use]
pub fn to_turtle(document: &OntologyDocument) -> String {
    let mut out = String::with_capacity(64 * 1024);

    for (prefix, namespace) in PREFIXES {
        out.push_str(&format!("@prefix {prefix}: <{namespace}> .\n"));
    }
    out.push('\n');

    let triples = triples(document);
    let mut current: Option<&Iri> = None;
    for triple in &triples {
        if current == Some(&triple.subject) {
            out.push_str(" ;\n  ");
        } else {
            if current.is_some() {
                out.push_str(" .\n\n");
            }
            out.push_str(&format!("<{}>\n  ", triple.subject));
            current = Some(&triple.subject);
        }
        out.push_str(&predicate(&triple.predicate));
        out.push(' ');
        out.push_str(&object(&triple.object));
    }
    if current.is_some() {
        out.push_str(" .\n");
    }
    out
}

fn predicate(iri: &Iri) -> String {
    if iri.as_str() == RDF_TYPE {
        "a".to_owned()
    } else {
        compact(iri.as_str())
    }
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(iri) => compact(iri.as_str()),
        Term::Literal(literal) => literal_to_turtle(literal),
        Term::Collection(items) => {
            let members: Vec<String> = items.iter().map(|iri| format!("<{iri}>")).collect();
            format!("( {} )", members.join(" "))
        }
    }
}

/// Abbreviates vocabulary IRIs whose local part needs no escaping.
fn compact(iri: &str) -> String {
    for (prefix, namespace) in PREFIXES {
        if let Some(local) = iri.strip_prefix(namespace) {
            if !local.is_empty() && local.chars().all(|c| c.is_ascii_alphanumeric()) {
                return format!("{prefix}:{local}");
            }
        }
    }
    format!("<{iri}>")
}

fn literal_to_turtle(literal: &Literal) -> String {
    let lexical = escape_literal(&literal.lexical);
    match literal.datatype {
        Datatype::String => format!("\"{lexical}\""),
        Datatype::Double => format!("\"{lexical}\"^^xsd:double"),
        Datatype::AnyUri => format!("\"{lexical}\"^^xsd:anyURI"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axiom, AxiomSet};

    fn farm() -> OntologyDocument {
        let ns = |l: &str| Iri::new(format!("http://example.org/farm.owl#{l}"));
        let axioms: AxiomSet = [
            Axiom::DeclareClass(ns("Cow")),
            Axiom::DeclareDataProperty(ns("age")),
            Axiom::DataPropertyDomain {
                property: ns("age"),
                class: ns("Cow"),
            },
            Axiom::SubPropertyChainOf {
                chain: vec![ns("eats_"), ns("_eats")],
                super_property: ns("eats"),
            },
            Axiom::DataPropertyAssertion {
                property: ns("age"),
                subject: ns("cow_0"),
                value: Literal::double(4.0),
            },
        ]
        .into_iter()
        .collect();
        OntologyDocument {
            iri: Iri::new("http://example.org/farm.owl"),
            imports: Vec::new(),
            axioms,
        }
    }

    #[test]
    fn declares_prefixes_and_ontology() {
        let turtle = to_turtle(&farm());
        assert!(turtle.starts_with("@prefix owl: <http://www.w3.org/2002/07/owl#> ."));
        assert!(turtle.contains("<http://example.org/farm.owl>\n  a owl:Ontology ."));
    }

    #[test]
    fn groups_predicates_by_subject() {
        let turtle = to_turtle(&farm());
        assert!(turtle.contains(
            "<http://example.org/farm.owl#age>\n  a owl:DatatypeProperty ;\n  rdfs:domain <http://example.org/farm.owl#Cow> ."
        ));
    }

    #[test]
    fn renders_collections_and_typed_literals() {
        let turtle = to_turtle(&farm());
        assert!(turtle.contains(
            "owl:propertyChainAxiom ( <http://example.org/farm.owl#eats_> <http://example.org/farm.owl#_eats> )"
        ));
        assert!(turtle.contains("\"4.0\"^^xsd:double"));
    }
}
