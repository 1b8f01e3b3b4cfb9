//! JSON-LD 1.1 serializer.
//!
//! Produces one document with a prefix `@context` and a `@graph` holding a
//! node per subject. Property keys are full IRIs; `rdf:type` becomes
//! `@type` and collections become `@list` values.

use serde_json::{json, Map, Value};

use super::rdf::{triples, Term};
use crate::model::iris::{OWL, RDF, RDFS, RDF_TYPE, XSD};
use crate::model::OntologyDocument;

/// Serializes a document to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(document: &OntologyDocument) -> Value {
    json!({
        "@context": {
            "owl": OWL,
            "rdf": RDF,
            "rdfs": RDFS,
            "xsd": XSD
        },
        "@graph": build_graph(document)
    })
}

fn build_graph(document: &OntologyDocument) -> Value {
    let mut nodes: Vec<Map<String, Value>> = Vec::new();

    for triple in triples(document) {
        let starts_node = nodes
            .last()
            .and_then(|node| node.get("@id"))
            .and_then(Value::as_str)
            != Some(triple.subject.as_str());
        if starts_node {
            let mut node = Map::new();
            node.insert("@id".to_owned(), json!(triple.subject.as_str()));
            nodes.push(node);
        }
        let Some(node) = nodes.last_mut() else {
            continue;
        };

        let (key, value) = if triple.predicate.as_str() == RDF_TYPE {
            match &triple.object {
                Term::Iri(class) => ("@type".to_owned(), json!(class.as_str())),
                other => (RDF_TYPE.to_owned(), term_to_json(other)),
            }
        } else {
            (triple.predicate.as_str().to_owned(), term_to_json(&triple.object))
        };
        match node.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            _ => {
                node.insert(key, Value::Array(vec![value]));
            }
        }
    }

    Value::Array(nodes.into_iter().map(Value::Object).collect())
}

fn term_to_json(term: &Term) -> Value {
    match term {
        Term::Iri(iri) => json!({ "@id": iri.as_str() }),
        Term::Literal(literal) => json!({
            "@value": literal.lexical,
            "@type": literal.datatype.iri()
        }),
        Term::Collection(items) => {
            let list: Vec<Value> = items.iter().map(|iri| json!({ "@id": iri.as_str() })).collect();
            json!({ "@list": list })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axiom, AxiomSet, Iri, Literal};

    fn doc() -> OntologyDocument {
        let ns = |l: &str| Iri::new(format!("http://example.org/farm.owl#{l}"));
        OntologyDocument {
            iri: Iri::new("http://example.org/farm.owl"),
            imports: vec![Iri::new("http://example.org/base.owl")],
            axioms: AxiomSet::from_iter([
                Axiom::DeclareObjectProperty(ns("eats_")),
                Axiom::InverseFunctionalObjectProperty(ns("eats_")),
                Axiom::SubPropertyChainOf {
                    chain: vec![ns("eats_"), ns("_eats")],
                    super_property: ns("eats"),
                },
                Axiom::DataPropertyAssertion {
                    property: ns("age"),
                    subject: ns("cow_0"),
                    value: Literal::double(4.0),
                },
            ]),
        }
    }

    fn node<'a>(graph: &'a Value, id: &str) -> &'a Value {
        graph["@graph"]
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["@id"] == id)
            .unwrap()
    }

    #[test]
    fn has_context_and_graph() {
        let value = to_json_ld(&doc());
        assert_eq!(value["@context"]["owl"], OWL);
        let ontology = node(&value, "http://example.org/farm.owl");
        assert_eq!(ontology["@type"][0], "http://www.w3.org/2002/07/owl#Ontology");
        assert_eq!(
            ontology["http://www.w3.org/2002/07/owl#imports"][0]["@id"],
            "http://example.org/base.owl"
        );
    }

    #[test]
    fn one_node_per_subject_with_all_types() {
        let value = to_json_ld(&doc());
        let eats_out = node(&value, "http://example.org/farm.owl#eats_");
        assert_eq!(eats_out["@type"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn chains_use_list_and_literals_are_typed() {
        let value = to_json_ld(&doc());
        let eats = node(&value, "http://example.org/farm.owl#eats");
        let list = &eats["http://www.w3.org/2002/07/owl#propertyChainAxiom"][0]["@list"];
        assert_eq!(list.as_array().unwrap().len(), 2);
        let cow = node(&value, "http://example.org/farm.owl#cow_0");
        assert_eq!(cow["http://example.org/farm.owl#age"][0]["@value"], "4.0");
        assert_eq!(
            cow["http://example.org/farm.owl#age"][0]["@type"],
            "http://www.w3.org/2001/XMLSchema#double"
        );
    }
}
