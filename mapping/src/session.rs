//! Per-session configuration shared by every build.
//!
//! A [`Session`] replaces process-wide mutable state: the builders borrow it
//! and never mutate it. The model IRI is set once; domain and range overrides
//! are only accepted before that.

use tracing::debug;

use crate::error::{ConfigError, SequencingError};
use crate::model::Iri;
use crate::naming::{NamingPolicy, Overrides};
use crate::options::{OptionFlag, OptionSet};

/// Options, overrides, imports, and the schema ontology's identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: OptionSet,
    overrides: Overrides,
    imports: Vec<Iri>,
    model: Option<Iri>,
}

impl Session {
    /// Creates a session with no options, overrides, imports, or model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the option configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `flags` is not a valid configuration; the
    /// previous options are then left unchanged.
    pub fn set_options<I, S>(&mut self, flags: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options = OptionSet::parse(flags)?;
        debug!(options = %self.options, "options configured");
        Ok(())
    }

    /// The current options.
    #[must_use]
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Shorthand for `self.options().has(flag)`.
    #[must_use]
    pub fn has(&self, flag: OptionFlag) -> bool {
        self.options.has(flag)
    }

    /// Declares the schema ontology IRI.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::ModelAlreadySet`] on a second call.
    pub fn set_model(&mut self, iri: Iri) -> Result<(), SequencingError> {
        if let Some(existing) = &self.model {
            return Err(SequencingError::ModelAlreadySet(existing.clone()));
        }
        debug!(model = %iri, "model declared");
        self.model = Some(iri);
        Ok(())
    }

    /// The schema ontology IRI.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::ModelUnset`] if no model has been declared.
    pub fn model(&self) -> Result<&Iri, SequencingError> {
        self.model.as_ref().ok_or(SequencingError::ModelUnset)
    }

    /// Returns true once the model IRI has been declared.
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Records `kind` as the domain of `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::OverrideAfterModel`] once the model is
    /// declared, or [`ConfigError::DuplicateDomain`] if a domain is already
    /// recorded.
    pub fn declare_domain(&mut self, relation: &str, kind: &str) -> crate::Result<()> {
        self.ensure_before_model(relation, "domain")?;
        self.overrides.set_domain(relation, kind)?;
        Ok(())
    }

    /// Records `kind` as the range of `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::OverrideAfterModel`] once the model is
    /// declared, or [`ConfigError::DuplicateRange`] if a range is already
    /// recorded.
    pub fn declare_range(&mut self, relation: &str, kind: &str) -> crate::Result<()> {
        self.ensure_before_model(relation, "range")?;
        self.overrides.set_range(relation, kind)?;
        Ok(())
    }

    fn ensure_before_model(&self, relation: &str, which: &'static str) -> Result<(), SequencingError> {
        if self.model.is_some() {
            return Err(SequencingError::OverrideAfterModel {
                relation: relation.to_owned(),
                which,
            });
        }
        Ok(())
    }

    /// Adds an `owl:imports` reference to the schema ontology.
    pub fn add_import(&mut self, iri: Iri) {
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    /// Imports of the schema ontology, in declaration order.
    #[must_use]
    pub fn imports(&self) -> &[Iri] {
        &self.imports
    }

    /// Builds the naming policy rooted at the model IRI.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::ModelUnset`] if no model has been declared.
    pub fn naming(&self) -> Result<NamingPolicy, SequencingError> {
        Ok(NamingPolicy::new(self.model()?.clone(), self.overrides.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn model_is_set_once() {
        let mut session = Session::new();
        assert_eq!(session.model(), Err(SequencingError::ModelUnset));
        session.set_model(Iri::new("http://example.org/a.owl")).unwrap();
        assert_eq!(
            session.set_model(Iri::new("http://example.org/b.owl")),
            Err(SequencingError::ModelAlreadySet(Iri::new("http://example.org/a.owl")))
        );
        assert_eq!(session.model().unwrap().as_str(), "http://example.org/a.owl");
    }

    #[test]
    fn overrides_close_when_model_is_set() {
        let mut session = Session::new();
        session.declare_domain("eats", "cow").unwrap();
        session.set_model(Iri::new("http://example.org/a.owl")).unwrap();
        let err = session.declare_range("eats", "grass").unwrap_err();
        assert!(matches!(
            err,
            Error::Sequencing(SequencingError::OverrideAfterModel { which: "range", .. })
        ));
        assert_eq!(session.naming().unwrap().domain("eats"), Some("cow"));
    }

    #[test]
    fn options_replace_rather_than_accumulate() {
        let mut session = Session::new();
        session.set_options(["owl2"]).unwrap();
        session.set_options(["relations"]).unwrap();
        assert!(!session.has(OptionFlag::Owl2));
        assert!(session.has(OptionFlag::Relations));
        assert!(session.set_options(["owl2", "owl2"]).is_err());
        assert!(session.has(OptionFlag::Relations));
    }

    #[test]
    fn imports_are_deduplicated_in_order() {
        let mut session = Session::new();
        session.add_import(Iri::new("urn:b"));
        session.add_import(Iri::new("urn:a"));
        session.add_import(Iri::new("urn:b"));
        assert_eq!(session.imports(), &[Iri::new("urn:b"), Iri::new("urn:a")]);
    }
}
