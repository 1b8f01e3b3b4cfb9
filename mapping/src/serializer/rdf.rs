//! Lowering of axioms to RDF triples.

use std::collections::BTreeSet;

use crate::model::iris::{
    OWL_ASYMMETRIC_PROPERTY, OWL_CLASS, OWL_DATATYPE_PROPERTY, OWL_FUNCTIONAL_PROPERTY, OWL_IMPORTS,
    OWL_INVERSE_FUNCTIONAL_PROPERTY, OWL_IRREFLEXIVE_PROPERTY, OWL_NAMED_INDIVIDUAL,
    OWL_OBJECT_PROPERTY, OWL_ONTOLOGY, OWL_PROPERTY_CHAIN_AXIOM, OWL_SYMMETRIC_PROPERTY,
    RDFS_COMMENT, RDFS_DOMAIN, RDFS_RANGE, RDF_TYPE,
};
use crate::model::{Axiom, Iri, Literal, OntologyDocument};

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A named resource.
    Iri(Iri),
    /// A typed literal.
    Literal(Literal),
    /// An RDF collection of named resources.
    Collection(Vec<Iri>),
}

/// One RDF statement with a named subject and predicate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject.
    pub subject: Iri,
    /// Predicate.
    pub predicate: Iri,
    /// Object.
    pub object: Term,
}

impl Triple {
    fn new(subject: &Iri, predicate: &str, object: Term) -> Self {
        Self {
            subject: subject.clone(),
            predicate: Iri::new(predicate),
            object,
        }
    }

    fn typed(subject: &Iri, class: &str) -> Self {
        Self::new(subject, RDF_TYPE, Term::Iri(Iri::new(class)))
    }
}

/// Lowers a document to its RDF graph, ordered and free of duplicates.
///
/// The ontology header (`owl:Ontology` and `owl:imports`) comes first.
#[must_use]
pub fn triples(document: &OntologyDocument) -> Vec<Triple> {
    let mut header = vec![Triple::typed(&document.iri, OWL_ONTOLOGY)];
    for import in &document.imports {
        header.push(Triple::new(&document.iri, OWL_IMPORTS, Term::Iri(import.clone())));
    }

    let mut body = BTreeSet::new();
    for axiom in &document.axioms {
        lower(axiom, &mut body);
    }
    header.extend(body);
    header
}

fn lower(axiom: &Axiom, out: &mut BTreeSet<Triple>) {
    match axiom {
        Axiom::DeclareClass(class) => {
            out.insert(Triple::typed(class, OWL_CLASS));
        }
        Axiom::DeclareDataProperty(property) => {
            out.insert(Triple::typed(property, OWL_DATATYPE_PROPERTY));
        }
        Axiom::DeclareObjectProperty(property) => {
            out.insert(Triple::typed(property, OWL_OBJECT_PROPERTY));
        }
        Axiom::DataPropertyDomain { property, class } | Axiom::ObjectPropertyDomain { property, class } => {
            out.insert(Triple::new(property, RDFS_DOMAIN, Term::Iri(class.clone())));
        }
        Axiom::DataPropertyRange { property, datatype } => {
            out.insert(Triple::new(property, RDFS_RANGE, Term::Iri(Iri::new(datatype.iri()))));
        }
        Axiom::ObjectPropertyRange { property, class } => {
            out.insert(Triple::new(property, RDFS_RANGE, Term::Iri(class.clone())));
        }
        Axiom::FunctionalObjectProperty(property) => {
            out.insert(Triple::typed(property, OWL_FUNCTIONAL_PROPERTY));
        }
        Axiom::InverseFunctionalObjectProperty(property) => {
            out.insert(Triple::typed(property, OWL_INVERSE_FUNCTIONAL_PROPERTY));
        }
        Axiom::SymmetricObjectProperty(property) => {
            out.insert(Triple::typed(property, OWL_SYMMETRIC_PROPERTY));
        }
        Axiom::AsymmetricObjectProperty(property) => {
            out.insert(Triple::typed(property, OWL_ASYMMETRIC_PROPERTY));
        }
        Axiom::IrreflexiveObjectProperty(property) => {
            out.insert(Triple::typed(property, OWL_IRREFLEXIVE_PROPERTY));
        }
        Axiom::SubPropertyChainOf {
            chain,
            super_property,
        } => {
            out.insert(Triple::new(
                super_property,
                OWL_PROPERTY_CHAIN_AXIOM,
                Term::Collection(chain.clone()),
            ));
        }
        Axiom::Comment { subject, text } => {
            out.insert(Triple::new(subject, RDFS_COMMENT, Term::Literal(Literal::string(text.as_str()))));
        }
        Axiom::ClassAssertion { class, individual } => {
            out.insert(Triple::typed(individual, OWL_NAMED_INDIVIDUAL));
            out.insert(Triple::new(individual, RDF_TYPE, Term::Iri(class.clone())));
        }
        Axiom::ObjectPropertyAssertion {
            property,
            subject,
            object,
        } => {
            out.insert(Triple::typed(subject, OWL_NAMED_INDIVIDUAL));
            out.insert(Triple::typed(object, OWL_NAMED_INDIVIDUAL));
            out.insert(Triple::new(subject, property.as_str(), Term::Iri(object.clone())));
        }
        Axiom::DataPropertyAssertion {
            property,
            subject,
            value,
        } => {
            out.insert(Triple::typed(subject, OWL_NAMED_INDIVIDUAL));
            out.insert(Triple::new(subject, property.as_str(), Term::Literal(value.clone())));
        }
    }
}

/// Escapes a literal's lexical form for a double-quoted Turtle or
/// N-Triples string.
#[must_use]
pub fn escape_literal(lexical: &str) -> String {
    let mut out = String::with_capacity(lexical.len());
    for c in lexical.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
