//! OWL 2 structural validator.
//!
//! Checks built documents, before any serialization:
//! - Domain, range and class-assertion targets are declared classes
//! - Assertions use properties declared with the matching kind
//! - Property chain members are declared object properties
//! - Local names are legal and classes are capitalized
//! - Reified relation properties carry their characteristics
//! - Every state ontology imports the structure ontology

use std::collections::BTreeSet;

use abm_owl::{Axiom, Iri, OntologyDocument};
use regex::Regex;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "owl";

/// Entities declared by a structure ontology.
#[derive(Debug, Default)]
struct Declared<'a> {
    classes: BTreeSet<&'a Iri>,
    data_properties: BTreeSet<&'a Iri>,
    object_properties: BTreeSet<&'a Iri>,
}

impl<'a> Declared<'a> {
    fn collect(structure: &'a OntologyDocument) -> Self {
        let mut declared = Declared::default();
        for axiom in &structure.axioms {
            match axiom {
                Axiom::DeclareClass(iri) => {
                    declared.classes.insert(iri);
                }
                Axiom::DeclareDataProperty(iri) => {
                    declared.data_properties.insert(iri);
                }
                Axiom::DeclareObjectProperty(iri) => {
                    declared.object_properties.insert(iri);
                }
                _ => {}
            }
        }
        declared
    }
}

/// Validates a structure ontology and the state ontologies built against it.
pub fn validate(structure: &OntologyDocument, states: &[OntologyDocument]) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let declared = Declared::collect(structure);

    report.push(TestResult::pass(
        VALIDATOR,
        format!(
            "{} declares {} classes, {} data properties, {} object properties",
            structure.iri,
            declared.classes.len(),
            declared.data_properties.len(),
            declared.object_properties.len()
        ),
    ));

    report.push(TestResult::from_violations(
        VALIDATOR,
        "all structure axioms reference declared entities",
        "structure axioms reference undeclared entities",
        structure_targets(structure, &declared),
    ));
    report.push(TestResult::from_violations(
        VALIDATOR,
        "all local names are legal",
        "illegal local names",
        local_names(&declared),
    ));
    report.push(TestResult::from_violations(
        VALIDATOR,
        "reified relation properties are functional and inverse-functional",
        "reified relation properties lack characteristics",
        reified_characteristics(structure, &declared),
    ));

    for state in states {
        let mut violations = state_targets(state, &declared);
        if !state.imports.contains(&structure.iri) {
            violations.push(format!("{} does not import {}", state.iri, structure.iri));
        }
        report.push(TestResult::from_violations(
            VALIDATOR,
            format!("{} uses only declared vocabulary ({} axioms)", state.iri, state.axiom_count()),
            format!("{} uses undeclared vocabulary", state.iri),
            violations,
        ));
    }

    report
}

fn structure_targets(structure: &OntologyDocument, declared: &Declared<'_>) -> Vec<String> {
    let mut violations = Vec::new();
    let mut require = |set: &BTreeSet<&Iri>, iri: &Iri, what: &str| {
        if !set.contains(iri) {
            violations.push(format!("{what} {iri} is not declared"));
        }
    };
    for axiom in &structure.axioms {
        match axiom {
            Axiom::DataPropertyDomain { property, class } => {
                require(&declared.data_properties, property, "data property");
                require(&declared.classes, class, "domain class");
            }
            Axiom::DataPropertyRange { property, .. } => {
                require(&declared.data_properties, property, "data property");
            }
            Axiom::ObjectPropertyDomain { property, class } => {
                // The plain property of a reified relation is only named by
                // its chain, never declared itself.
                if !is_chain_super(structure, property) {
                    require(&declared.object_properties, property, "object property");
                }
                require(&declared.classes, class, "domain class");
            }
            Axiom::ObjectPropertyRange { property, class } => {
                if !is_chain_super(structure, property) {
                    require(&declared.object_properties, property, "object property");
                }
                require(&declared.classes, class, "range class");
            }
            Axiom::FunctionalObjectProperty(property)
            | Axiom::InverseFunctionalObjectProperty(property)
            | Axiom::SymmetricObjectProperty(property)
            | Axiom::AsymmetricObjectProperty(property)
            | Axiom::IrreflexiveObjectProperty(property) => {
                if !is_chain_super(structure, property) {
                    require(&declared.object_properties, property, "object property");
                }
            }
            Axiom::SubPropertyChainOf { chain, .. } => {
                for member in chain {
                    require(&declared.object_properties, member, "chain member");
                }
            }
            _ => {}
        }
    }
    violations
}

fn is_chain_super(structure: &OntologyDocument, property: &Iri) -> bool {
    structure.axioms.iter().any(|axiom| {
        matches!(axiom, Axiom::SubPropertyChainOf { super_property, .. } if super_property == property)
    })
}

fn state_targets(state: &OntologyDocument, declared: &Declared<'_>) -> Vec<String> {
    let mut violations = Vec::new();
    for axiom in &state.axioms {
        match axiom {
            Axiom::ClassAssertion { class, individual } if !declared.classes.contains(class) => {
                violations.push(format!("{individual} asserted in undeclared class {class}"));
            }
            Axiom::ObjectPropertyAssertion { property, subject, .. }
                if !declared.object_properties.contains(property) =>
            {
                violations.push(format!("{subject} uses undeclared object property {property}"));
            }
            Axiom::DataPropertyAssertion { property, subject, .. }
                if !declared.data_properties.contains(property) =>
            {
                violations.push(format!("{subject} uses undeclared data property {property}"));
            }
            _ => {}
        }
    }
    violations
}

fn local_names(declared: &Declared<'_>) -> Vec<String> {
    let mut violations = Vec::new();
    let (Ok(legal), Ok(lowercase_start)) = (
        Regex::new(r"^[A-Za-z0-9_.%-]+$"),
        Regex::new(r"^[a-z]"),
    ) else {
        violations.push("internal: local-name patterns failed to compile".to_owned());
        return violations;
    };

    let properties = declared.data_properties.iter().chain(&declared.object_properties);
    for iri in declared.classes.iter().chain(properties) {
        let local = iri.local_name();
        if !legal.is_match(local) {
            violations.push(format!("{iri}: illegal local name \"{local}\""));
        }
    }
    for iri in &declared.classes {
        if lowercase_start.is_match(iri.local_name()) {
            violations.push(format!("{iri}: class name starts lowercase"));
        }
    }
    violations
}

fn reified_characteristics(structure: &OntologyDocument, declared: &Declared<'_>) -> Vec<String> {
    let mut violations = Vec::new();
    for property in &declared.object_properties {
        let local = property.local_name();
        let expected = if local.len() > 1 && local.ends_with('_') {
            Axiom::InverseFunctionalObjectProperty((*property).clone())
        } else if local.len() > 1 && local.starts_with('_') {
            Axiom::FunctionalObjectProperty((*property).clone())
        } else {
            continue;
        };
        if !structure.axioms.contains(&expected) {
            violations.push(format!("{property}: missing {expected:?}"));
        }
    }
    violations
}
