//! State (instance) ontology builder.
//!
//! One state ontology is built per snapshot of the running simulation. Its
//! IRI is the model IRI tagged with the tick, and it imports the schema
//! ontology. Individuals are minted fresh inside the state ontology's own
//! namespace; nothing links them across snapshots.

use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::host::{
    Simulation, Value, AGENT_OWN_OFFSET, CELL_CLASS, CELL_OWN_OFFSET, LOCATION_PROPERTY,
    RELATION_OWN_OFFSET, X_PROPERTY, Y_PROPERTY,
};
use crate::model::{format_double, Axiom, AxiomSet, Iri, Literal, OntologyDocument};
use crate::naming::{EntityKind, NamingPolicy};
use crate::options::OptionFlag;
use crate::session::Session;
use crate::structure::{is_reified, reified_class_name, reify_in, reify_out};
use crate::value::ValueAdapter;

/// File extensions kept at the end of a state ontology IRI.
pub const RECOGNIZED_SUFFIXES: [&str; 5] = [".owl", ".rdf", ".ttl", ".nt", ".jsonld"];

/// Derives the IRI of the state ontology for `tick`.
///
/// `http://example.org/farm.owl` at tick 3 becomes
/// `http://example.org/farm-3.0.owl`; an IRI without a recognized suffix
/// just gets `-3.0` appended. A trailing `#` or `/` stays last, so
/// `http://example.org/farm#` becomes `http://example.org/farm-3.0#`.
#[must_use]
pub fn state_iri(model: &Iri, tick: f64) -> Iri {
    let model = model.as_str();
    let (base, separator) = match model.char_indices().last() {
        Some((i, '#' | '/')) => model.split_at(i),
        _ => (model, ""),
    };
    let suffix = RECOGNIZED_SUFFIXES
        .iter()
        .find(|suffix| base.ends_with(*suffix))
        .copied()
        .unwrap_or("");
    let stem = &base[..base.len() - suffix.len()];
    Iri::new(format!("{stem}-{}{suffix}{separator}", format_double(tick)))
}

/// Builds one state ontology.
pub struct StateBuilder<'a> {
    session: &'a Session,
    host: &'a dyn Simulation,
    tick: f64,
}

impl<'a> StateBuilder<'a> {
    /// Creates a builder for the snapshot at `tick`.
    #[must_use]
    pub fn new(session: &'a Session, host: &'a dyn Simulation, tick: f64) -> Self {
        Self { session, host, tick }
    }

    /// The IRI of the state ontology.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::ModelUnset`](crate::SequencingError::ModelUnset)
    /// if no model has been declared.
    pub fn iri(&self) -> crate::Result<Iri> {
        Ok(state_iri(self.session.model()?, self.tick))
    }

    /// Builds the complete state axiom set.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::ModelUnset`](crate::SequencingError::ModelUnset)
    /// if no model has been declared, and [`ConfigError::UnknownKind`] if an
    /// agent or relation instance reports a kind the schema does not declare.
    pub fn axioms(&self) -> crate::Result<AxiomSet> {
        let naming = self.session.naming()?;
        let scope = self.iri()?;
        let mut emitter = Emitter {
            naming: &naming,
            values: ValueAdapter::new(&naming, &scope),
            scope: &scope,
            spatial: !self.session.has(OptionFlag::NoPatches),
            axioms: AxiomSet::new(),
        };

        emitter.agents(self.host)?;
        if emitter.spatial {
            emitter.cells(self.host);
        }
        emitter.relations(self.host)?;
        emitter.globals(self.host);

        info!(
            state = %scope,
            tick = self.tick,
            axioms = emitter.axioms.len(),
            "state ontology built"
        );
        Ok(emitter.axioms)
    }

    /// Builds the state ontology, importing the schema ontology.
    ///
    /// # Errors
    ///
    /// See [`StateBuilder::axioms`].
    pub fn document(&self) -> crate::Result<OntologyDocument> {
        let axioms = self.axioms()?;
        Ok(OntologyDocument {
            iri: self.iri()?,
            imports: vec![self.session.model()?.clone()],
            axioms,
        })
    }
}

struct Emitter<'s> {
    naming: &'s NamingPolicy,
    values: ValueAdapter<'s>,
    scope: &'s Iri,
    spatial: bool,
    axioms: AxiomSet,
}

impl Emitter<'_> {
    fn individual(&self, id: &str) -> Iri {
        self.naming.individual(self.scope, id)
    }

    fn property(&self, name: &str) -> Iri {
        self.naming.resolve(name, EntityKind::Property)
    }

    fn coordinates(&mut self, subject: &Iri, x: f64, y: f64) {
        for (name, value) in [(X_PROPERTY, x), (Y_PROPERTY, y)] {
            let property = self.property(name);
            self.axioms.insert(Axiom::DataPropertyAssertion {
                property,
                subject: subject.clone(),
                value: Literal::double(value),
            });
        }
    }

    /// Asserts each named variable, reading slots from `offset` onwards.
    fn variables(&mut self, subject: &Iri, owner: &str, names: &[String], slots: &[Value], offset: usize) {
        for (i, name) in names.iter().enumerate() {
            let Some(value) = slots.get(offset + i) else {
                warn!(owner, variable = %name, slot = offset + i, "variable slot missing, skipped");
                continue;
            };
            let property = self.property(name);
            let assertions = self.values.adapt(subject, &property, value);
            self.axioms.extend(assertions);
        }
    }

    fn agents(&mut self, host: &dyn Simulation) -> Result<(), ConfigError> {
        let location = self.property(LOCATION_PROPERTY);
        for agent in host.agents() {
            let kind = host
                .find_agent_kind(&agent.kind)
                .ok_or_else(|| ConfigError::UnknownKind(agent.kind.clone()))?;
            let individual = self.individual(&agent.id);
            let class = self.naming.resolve(&kind.entity, EntityKind::Class);
            self.axioms.insert(Axiom::ClassAssertion {
                class,
                individual: individual.clone(),
            });
            if !agent.hidden && self.spatial {
                let cell = self.individual(&agent.cell);
                self.axioms.insert(Axiom::ObjectPropertyAssertion {
                    property: location.clone(),
                    subject: individual.clone(),
                    object: cell,
                });
                self.coordinates(&individual, agent.xcor, agent.ycor);
            }
            self.variables(&individual, &agent.id, &kind.owns, &agent.variables, AGENT_OWN_OFFSET);
        }
        debug!(agents = host.agents().len(), "agent assertions emitted");
        Ok(())
    }

    fn cells(&mut self, host: &dyn Simulation) {
        let class = self.naming.resolve(CELL_CLASS, EntityKind::Class);
        let owns = host.cell_owns();
        let declared = owns.get(CELL_OWN_OFFSET..).unwrap_or_default();
        for cell in host.cells() {
            let individual = self.individual(&cell.id);
            self.axioms.insert(Axiom::ClassAssertion {
                class: class.clone(),
                individual: individual.clone(),
            });
            self.coordinates(&individual, cell.pxcor, cell.pycor);
            self.variables(&individual, &cell.id, declared, &cell.variables, CELL_OWN_OFFSET);
        }
        debug!(cells = host.cells().len(), "cell assertions emitted");
    }

    fn relations(&mut self, host: &dyn Simulation) -> Result<(), ConfigError> {
        for relation in host.relations() {
            let kind = host
                .find_relation_kind(&relation.kind)
                .ok_or_else(|| ConfigError::UnknownKind(relation.kind.clone()))?;
            let name = kind.entity.to_lowercase();
            let end1 = self.individual(&relation.end1);
            let end2 = self.individual(&relation.end2);

            if !is_reified(&kind.owns) {
                let property = self.property(&name);
                self.axioms.insert(Axiom::ObjectPropertyAssertion {
                    property,
                    subject: end1,
                    object: end2,
                });
                continue;
            }

            let individual = self.individual(&relation.id);
            let class = self.naming.resolve(&reified_class_name(&name), EntityKind::Class);
            let outgoing = self.property(&reify_out(&name));
            let incoming = self.property(&reify_in(&name));
            self.axioms.extend([
                Axiom::ClassAssertion {
                    class,
                    individual: individual.clone(),
                },
                Axiom::ObjectPropertyAssertion {
                    property: outgoing,
                    subject: end1,
                    object: individual.clone(),
                },
                Axiom::ObjectPropertyAssertion {
                    property: incoming,
                    subject: individual.clone(),
                    object: end2,
                },
            ]);
            self.variables(&individual, &relation.id, &kind.owns, &relation.variables, RELATION_OWN_OFFSET);
        }
        debug!(relations = host.relations().len(), "relation assertions emitted");
        Ok(())
    }

    fn globals(&mut self, host: &dyn Simulation) {
        let subject = self.naming.global_individual();
        for (i, name) in host.globals().iter().enumerate() {
            let Some(value) = host.global_value(i) else {
                warn!(global = %name, "global has no value, skipped");
                continue;
            };
            let property = self.property(name);
            let assertions = self.values.adapt(&subject, &property, value);
            self.axioms.extend(assertions);
        }
        debug!(globals = host.globals().len(), "global assertions emitted");
    }
}
