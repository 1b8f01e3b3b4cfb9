//! Error types for session commands and ontology builds.
//!
//! Every error aborts only the build or command that raised it. Nothing is
//! persisted before a build has assembled its full axiom set, so a failed
//! build never leaves a partial artifact behind.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Iri;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error raised by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine was used before the host was attached. This is an
    /// integration bug, not a user error.
    #[error("engine not initialised properly: {0}")]
    Initialization(String),

    /// A command ran before its precondition was met.
    #[error(transparent)]
    Sequencing(#[from] SequencingError),

    /// Invalid options, overrides, or inconsistent host data.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend could not create or persist the ontology.
    #[error("cannot save ontology \"{iri}\" to \"{}\": {source}", .location.display())]
    Backend {
        /// Logical IRI of the ontology being saved.
        iri: Iri,
        /// Physical location requested.
        location: PathBuf,
        /// Underlying backend failure.
        #[source]
        source: BackendError,
    },
}

/// Precondition violations between commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencingError {
    /// A build was requested before the model IRI was declared.
    #[error("the model IRI must be declared before building an ontology")]
    ModelUnset,

    /// The model IRI was declared a second time.
    #[error("the model IRI may not be declared more than once (already \"{0}\")")]
    ModelAlreadySet(Iri),

    /// A domain or range override arrived after the model IRI was declared.
    #[error("the {which} of \"{relation}\" must be declared before the model IRI")]
    OverrideAfterModel {
        /// Relation the override was declared for.
        relation: String,
        /// `"domain"` or `"range"`.
        which: &'static str,
    },
}

/// Invalid configuration or host data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option outside the fixed vocabulary.
    #[error("invalid option \"{option}\"; each option must be one of: {valid}")]
    UnknownOption {
        /// The rejected option.
        option: String,
        /// Comma-separated list of accepted options.
        valid: String,
    },

    /// The same option was given twice.
    #[error("option \"{0}\" specified (at least) twice")]
    DuplicateOption(String),

    /// The `none` sentinel was combined with another option.
    #[error("can't have option \"none\" and other options")]
    NoneWithOthers,

    /// Instances of one relation kind disagree on directedness.
    #[error("members of {0} are not consistently directed or undirected")]
    InconsistentDirectedness(String),

    /// An override names a relation kind the host does not declare.
    #[error("no such relation kind as \"{0}\"")]
    UnknownRelation(String),

    /// An override or instance names an agent kind the host does not declare.
    #[error("no such kind as \"{0}\"")]
    UnknownKind(String),

    /// A second domain was declared for the same relation.
    #[error("a domain has already been declared for \"{0}\"")]
    DuplicateDomain(String),

    /// A second range was declared for the same relation.
    #[error("a range has already been declared for \"{0}\"")]
    DuplicateRange(String),
}

/// Failures inside a persistence backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Filesystem failure while creating directories or writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON-LD rendering failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::from(ConfigError::DuplicateOption("owl2".to_owned()));
        assert_eq!(err.to_string(), "option \"owl2\" specified (at least) twice");

        let err = Error::from(SequencingError::OverrideAfterModel {
            relation: "eats".to_owned(),
            which: "domain",
        });
        assert!(err.to_string().contains("\"eats\""));
    }

    #[test]
    fn backend_error_includes_cause() {
        let err = Error::Backend {
            iri: Iri::new("http://example.org/cows.owl"),
            location: PathBuf::from("/nonexistent/cows.owl"),
            source: BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )),
        };
        let message = err.to_string();
        assert!(message.contains("http://example.org/cows.owl"));
        assert!(message.contains("denied"));
    }
}
