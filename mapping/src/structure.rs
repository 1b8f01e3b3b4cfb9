//! Structure (schema) ontology builder.
//!
//! Reads the host's schema afresh on every build and produces the T-Box:
//! one class per agent kind, a data property per owned variable, an object
//! property per relation kind, the grid-cell vocabulary, and one data
//! property per global.
//!
//! # Reification
//!
//! A relation kind that owns variables cannot be a plain object property,
//! since the variables need a subject. It becomes a class of its own with
//! two directional properties:
//!
//! ```text
//!   Domain --eats_--> Eats --_eats--> Range
//! ```
//!
//! `eats_` is inverse-functional and `_eats` is functional, so each reified
//! individual links exactly one pair of endpoints. With the `owl2` option a
//! property chain `eats_ o _eats` is declared a sub-property of `eats`.

use tracing::{debug, info, warn};

use crate::directedness::{Directedness, DirectednessMap};
use crate::host::{
    ResolvedKind, Simulation, CELL_CLASS, LOCATION_PROPERTY, RESERVED_CELL_VARIABLES, X_PROPERTY,
    Y_PROPERTY,
};
use crate::model::{Axiom, AxiomSet, Datatype, Iri, OntologyDocument};
use crate::naming::{EntityKind, NamingPolicy};
use crate::options::OptionFlag;
use crate::session::Session;

/// Annotation placed on a relation property whose directedness is unknown.
pub const UNKNOWN_DIRECTEDNESS_COMMENT: &str = "No members of this link breed to compute directedness";

/// Name of the outgoing property of a reified relation.
#[must_use]
pub fn reify_out(relation: &str) -> String {
    format!("{relation}_")
}

/// Name of the incoming property of a reified relation.
#[must_use]
pub fn reify_in(relation: &str) -> String {
    format!("_{relation}")
}

/// Name of the class a reified relation's instances belong to.
#[must_use]
pub fn reified_class_name(relation: &str) -> String {
    let mut chars = relation.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns true if a relation kind with these owned variables is reified.
#[must_use]
pub fn is_reified(owns: &[String]) -> bool {
    !owns.is_empty()
}

/// Builds the schema ontology for one session and host.
pub struct StructureBuilder<'a> {
    session: &'a Session,
    host: &'a dyn Simulation,
}

impl<'a> StructureBuilder<'a> {
    /// Creates a builder. Nothing is read from the host until a build runs.
    #[must_use]
    pub fn new(session: &'a Session, host: &'a dyn Simulation) -> Self {
        Self { session, host }
    }

    /// Builds the complete schema axiom set.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::ModelUnset`](crate::SequencingError::ModelUnset)
    /// if no model has been declared, and
    /// [`ConfigError::InconsistentDirectedness`](crate::ConfigError::InconsistentDirectedness)
    /// if the `relations` option is set and a relation kind has both directed
    /// and undirected instances.
    pub fn axioms(&self) -> crate::Result<AxiomSet> {
        let naming = self.session.naming()?;
        let mut emitter = Emitter {
            session: self.session,
            naming: &naming,
            axioms: AxiomSet::new(),
        };

        emitter.agent_kinds(&self.host.agent_schema());
        if !self.session.has(OptionFlag::NoPatches) {
            emitter.cells(self.host.cell_owns());
        }
        let directedness = if self.session.has(OptionFlag::Relations) {
            DirectednessMap::infer(self.host)?
        } else {
            DirectednessMap::default()
        };
        for kind in self.host.relation_schema() {
            emitter.relation_kind(&kind, directedness.get(&kind.name));
        }
        emitter.globals(self.host.globals());

        info!(
            model = %naming.namespace(),
            axioms = emitter.axioms.len(),
            "structure ontology built"
        );
        Ok(emitter.axioms)
    }

    /// Builds the schema ontology with the session's imports.
    ///
    /// # Errors
    ///
    /// See [`StructureBuilder::axioms`].
    pub fn document(&self) -> crate::Result<OntologyDocument> {
        let axioms = self.axioms()?;
        Ok(OntologyDocument {
            iri: self.session.model()?.clone(),
            imports: self.session.imports().to_vec(),
            axioms,
        })
    }
}

struct Emitter<'s> {
    session: &'s Session,
    naming: &'s NamingPolicy,
    axioms: AxiomSet,
}

impl Emitter<'_> {
    fn class(&self, name: &str) -> Iri {
        self.naming.resolve(name, EntityKind::Class)
    }

    fn property(&self, name: &str) -> Iri {
        self.naming.resolve(name, EntityKind::Property)
    }

    fn agent_kinds(&mut self, kinds: &[ResolvedKind]) {
        for kind in kinds {
            self.class_and_properties(&kind.entity, &kind.owns);
        }
        debug!(kinds = kinds.len(), "agent kind axioms emitted");
    }

    fn class_and_properties(&mut self, name: &str, owns: &[String]) {
        let class = self.class(name);
        self.axioms.insert(Axiom::DeclareClass(class.clone()));
        for own in owns {
            let property = self.property(own);
            self.axioms.insert(Axiom::DeclareDataProperty(property.clone()));
            self.axioms.insert(Axiom::DataPropertyDomain {
                property,
                class: class.clone(),
            });
        }
    }

    fn cells(&mut self, cell_owns: &[String]) {
        let owns: Vec<String> = cell_owns
            .iter()
            .filter(|var| {
                !RESERVED_CELL_VARIABLES
                    .iter()
                    .any(|reserved| reserved.eq_ignore_ascii_case(var))
            })
            .cloned()
            .collect();
        self.class_and_properties(CELL_CLASS, &owns);

        // x and y carry no domain: both cells and visible agents use them.
        for name in [X_PROPERTY, Y_PROPERTY] {
            let property = self.property(name);
            self.axioms.insert(Axiom::DeclareDataProperty(property.clone()));
            self.axioms.insert(Axiom::DataPropertyRange {
                property,
                datatype: Datatype::Double,
            });
        }

        let domain = self.naming.domain(LOCATION_PROPERTY).map(|d| self.class(d));
        let range = Some(self.class(CELL_CLASS));
        self.object_property(LOCATION_PROPERTY, domain, range, true, false);
        debug!(variables = owns.len(), "cell axioms emitted");
    }

    fn object_property(
        &mut self,
        name: &str,
        domain: Option<Iri>,
        range: Option<Iri>,
        functional: bool,
        inverse_functional: bool,
    ) {
        let property = self.property(name);
        self.axioms.insert(Axiom::DeclareObjectProperty(property.clone()));
        if let Some(class) = domain {
            self.axioms.insert(Axiom::ObjectPropertyDomain {
                property: property.clone(),
                class,
            });
        }
        if let Some(class) = range {
            self.axioms.insert(Axiom::ObjectPropertyRange {
                property: property.clone(),
                class,
            });
        }
        if functional {
            self.axioms.insert(Axiom::FunctionalObjectProperty(property.clone()));
        }
        if inverse_functional {
            self.axioms.insert(Axiom::InverseFunctionalObjectProperty(property));
        }
    }

    fn relation_kind(&mut self, kind: &ResolvedKind, directedness: Directedness) {
        let relation = kind.entity.to_lowercase();
        let owl2 = self.session.has(OptionFlag::Owl2);
        let domain = self.naming.domain(&relation).map(|d| self.class(d));
        let range = self.naming.range(&relation).map(|r| self.class(r));
        let property = self.property(&relation);

        if is_reified(&kind.owns) {
            let class_name = reified_class_name(&relation);
            let class = self.class(&class_name);
            self.class_and_properties(&class_name, &kind.owns);
            self.object_property(&reify_out(&relation), domain.clone(), Some(class.clone()), false, true);
            self.object_property(&reify_in(&relation), Some(class), range.clone(), true, false);
            if owl2 {
                let chain = vec![self.property(&reify_out(&relation)), self.property(&reify_in(&relation))];
                self.axioms.insert(Axiom::SubPropertyChainOf {
                    chain,
                    super_property: property.clone(),
                });
                // A chain's super-property does not inherit domain or range.
                if let Some(class) = domain {
                    self.axioms.insert(Axiom::ObjectPropertyDomain {
                        property: property.clone(),
                        class,
                    });
                }
                if let Some(class) = range {
                    self.axioms.insert(Axiom::ObjectPropertyRange {
                        property: property.clone(),
                        class,
                    });
                }
            }
            debug!(relation = %relation, variables = kind.owns.len(), "reified relation emitted");
        } else {
            self.object_property(&relation, domain, range, false, false);
            debug!(relation = %relation, "relation property emitted");
        }

        if (!is_reified(&kind.owns) || owl2) && self.session.has(OptionFlag::Relations) {
            self.relational_attributes(property, &relation, directedness);
        }
    }

    fn relational_attributes(&mut self, property: Iri, relation: &str, directedness: Directedness) {
        let owl2 = self.session.has(OptionFlag::Owl2);
        if owl2 {
            self.axioms.insert(Axiom::IrreflexiveObjectProperty(property.clone()));
        }
        match directedness {
            Directedness::Directed => {
                if owl2 {
                    self.axioms.insert(Axiom::AsymmetricObjectProperty(property));
                }
            }
            Directedness::Undirected => {
                self.axioms.insert(Axiom::SymmetricObjectProperty(property));
            }
            Directedness::Unknown => {
                warn!(relation, "no instances to determine directedness");
                self.axioms.insert(Axiom::Comment {
                    subject: property,
                    text: UNKNOWN_DIRECTEDNESS_COMMENT.to_owned(),
                });
            }
        }
    }

    fn globals(&mut self, globals: &[String]) {
        for global in globals {
            let property = self.property(global);
            self.axioms.insert(Axiom::DeclareDataProperty(property));
        }
        debug!(globals = globals.len(), "global axioms emitted");
    }
}
