//! The command surface: one entry point per user command.
//!
//! An [`Engine`] owns the [`Session`], the persistence [`Backend`] and,
//! once attached, the host [`Simulation`]. Builds read the host afresh each
//! time and hand the finished document to the backend in a single call.

use std::path::Path;

use tracing::info;

use crate::backend::Backend;
use crate::error::{ConfigError, Error, Result};
use crate::host::{Simulation, LOCATION_PROPERTY};
use crate::model::{Iri, OntologyDocument};
use crate::session::Session;
use crate::state::StateBuilder;
use crate::structure::StructureBuilder;

/// Session state plus the host and backend it talks to.
pub struct Engine<B: Backend> {
    session: Session,
    host: Option<Box<dyn Simulation>>,
    backend: B,
}

impl<B: Backend> Engine<B> {
    /// Creates an engine with an empty session and no host attached.
    pub fn new(backend: B) -> Self {
        Self {
            session: Session::new(),
            host: None,
            backend,
        }
    }

    /// Attaches the host simulation, replacing any previous one.
    pub fn attach(&mut self, host: impl Simulation + 'static) {
        self.host = Some(Box::new(host));
    }

    /// The current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The persistence backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the engine, returning its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn host(&self) -> Result<&dyn Simulation> {
        self.host
            .as_deref()
            .ok_or_else(|| Error::Initialization("no host simulation attached".to_owned()))
    }

    /// Replaces the option configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unknown or duplicate flag, or for
    /// `none` combined with other flags.
    pub fn configure_options<I, S>(&mut self, flags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.session.set_options(flags)?;
        Ok(())
    }

    /// Declares the schema ontology IRI. Allowed once per session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sequencing`] if the model was already declared.
    pub fn declare_model(&mut self, iri: impl Into<Iri>) -> Result<()> {
        self.session.set_model(iri.into())?;
        Ok(())
    }

    /// Adds an `owl:imports` reference to the schema ontology.
    pub fn import(&mut self, iri: impl Into<Iri>) {
        self.session.add_import(iri.into());
    }

    /// Declares `kind` as the domain of `relation`. The `location` property
    /// also accepts a domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] without a host,
    /// [`Error::Sequencing`] once the model is declared, and [`Error::Config`]
    /// for an unknown relation or kind or a second domain.
    pub fn declare_domain(&mut self, relation: &str, kind: &str) -> Result<()> {
        let (relation, kind) = self.resolve_override(relation, kind, "domain", true)?;
        self.session.declare_domain(&relation, &kind)
    }

    /// Declares `kind` as the range of `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] without a host,
    /// [`Error::Sequencing`] once the model is declared, and [`Error::Config`]
    /// for an unknown relation or kind or a second range.
    pub fn declare_range(&mut self, relation: &str, kind: &str) -> Result<()> {
        let (relation, kind) = self.resolve_override(relation, kind, "range", false)?;
        self.session.declare_range(&relation, &kind)
    }

    /// Maps user-facing names to the entity names the builders look up.
    fn resolve_override(
        &self,
        relation: &str,
        kind: &str,
        which: &'static str,
        allow_location: bool,
    ) -> Result<(String, String)> {
        let host = self.host()?;
        if self.session.has_model() {
            return Err(crate::SequencingError::OverrideAfterModel {
                relation: relation.to_owned(),
                which,
            }
            .into());
        }
        let relation = if allow_location && relation.eq_ignore_ascii_case(LOCATION_PROPERTY) {
            LOCATION_PROPERTY.to_owned()
        } else {
            host.find_relation_kind(relation)
                .ok_or_else(|| ConfigError::UnknownRelation(relation.to_owned()))?
                .entity
                .to_lowercase()
        };
        let kind = host
            .find_agent_kind(kind)
            .ok_or_else(|| ConfigError::UnknownKind(kind.to_owned()))?
            .entity;
        Ok((relation, kind))
    }

    /// Builds the schema ontology without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] without a host, and otherwise the
    /// errors of [`StructureBuilder::axioms`].
    pub fn build_structure(&self) -> Result<OntologyDocument> {
        StructureBuilder::new(&self.session, self.host()?).document()
    }

    /// Builds the state ontology for `tick` without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] without a host, and otherwise the
    /// errors of [`StateBuilder::axioms`].
    pub fn build_state(&self, tick: f64) -> Result<OntologyDocument> {
        StateBuilder::new(&self.session, self.host()?, tick).document()
    }

    /// Builds the schema ontology and persists it at `location`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Engine::build_structure`], or
    /// [`Error::Backend`] if the document cannot be saved.
    pub fn write_structure(&mut self, location: impl AsRef<Path>) -> Result<OntologyDocument> {
        let document = self.build_structure()?;
        self.persist(&document, location.as_ref())?;
        Ok(document)
    }

    /// Builds the state ontology for `tick` and persists it at `location`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Engine::build_state`], or [`Error::Backend`]
    /// if the document cannot be saved.
    pub fn write_state(&mut self, location: impl AsRef<Path>, tick: f64) -> Result<OntologyDocument> {
        let document = self.build_state(tick)?;
        self.persist(&document, location.as_ref())?;
        Ok(document)
    }

    fn persist(&mut self, document: &OntologyDocument, location: &Path) -> Result<()> {
        self.backend
            .persist(document, location)
            .map_err(|source| Error::Backend {
                iri: document.iri.clone(),
                location: location.to_path_buf(),
                source,
            })?;
        info!(
            iri = %document.iri,
            location = %location.display(),
            axioms = document.axiom_count(),
            "ontology saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::host::{KindDecl, Snapshot};
    use crate::SequencingError;

    fn farm() -> Snapshot {
        Snapshot {
            breeds: vec![
                KindDecl::new("cows", Some("cow"), &[]),
                KindDecl::new("grasses", Some("grass"), &[]),
            ],
            link_breeds: vec![KindDecl::new("eats", Some("eat"), &["amount"])],
            ..Snapshot::default()
        }
    }

    #[test]
    fn commands_that_need_the_host_fail_without_it() {
        let mut engine = Engine::new(MemoryBackend::new());
        engine.declare_model("http://example.org/farm.owl").unwrap();
        assert!(matches!(engine.build_structure(), Err(Error::Initialization(_))));
        assert!(matches!(
            engine.declare_domain("eats", "cows"),
            Err(Error::Initialization(_))
        ));
    }

    #[test]
    fn overrides_are_validated_against_the_host() {
        let mut engine = Engine::new(MemoryBackend::new());
        engine.attach(farm());
        assert!(matches!(
            engine.declare_domain("sees", "cows"),
            Err(Error::Config(ConfigError::UnknownRelation(_)))
        ));
        assert!(matches!(
            engine.declare_range("EATS", "sheep"),
            Err(Error::Config(ConfigError::UnknownKind(_)))
        ));
        engine.declare_domain("EATS", "cows").unwrap();
        engine.declare_domain("location", "cow").unwrap();
        assert_eq!(engine.session().naming().err(), Some(SequencingError::ModelUnset));
        engine.declare_model("http://example.org/farm.owl").unwrap();
        let naming = engine.session().naming().unwrap();
        assert_eq!(naming.domain("eat"), Some("cow"));
        assert_eq!(naming.domain("location"), Some("cow"));
    }

    #[test]
    fn writes_persist_complete_documents() {
        let mut engine = Engine::new(MemoryBackend::new());
        engine.attach(farm());
        engine.declare_model("http://example.org/farm.owl").unwrap();
        let structure = engine.write_structure("farm.owl").unwrap();
        let state = engine.write_state("farm-1.owl", 1.0).unwrap();
        assert_eq!(state.iri.as_str(), "http://example.org/farm-1.0.owl");
        let backend = engine.into_backend();
        assert_eq!(backend.get("farm.owl"), Some(&structure));
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn failed_builds_persist_nothing() {
        let mut engine = Engine::new(MemoryBackend::new());
        engine.attach(farm());
        assert!(matches!(
            engine.write_structure("farm.owl"),
            Err(Error::Sequencing(SequencingError::ModelUnset))
        ));
        assert!(engine.backend().is_empty());
    }
}
