//! Session files.
//!
//! A session file is TOML:
//!
//! ```toml
//! model = "http://example.org/farm.owl"
//! options = ["owl2", "relations"]
//! imports = ["http://example.org/upper.owl"]
//!
//! [domains]
//! eats = "cows"
//!
//! [ranges]
//! eats = "grasses"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::backend::Backend;
use crate::engine::Engine;

/// Failure to read or parse a session file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("cannot read session file {}: {source}", .path.display())]
    Io {
        /// The session file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid session description.
    #[error("invalid session file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The commands of one session, in declarative form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Schema ontology IRI.
    pub model: Option<String>,
    /// Option flags.
    pub options: Vec<String>,
    /// IRIs imported by the schema ontology.
    pub imports: Vec<String>,
    /// Domain overrides, relation name to kind name.
    pub domains: BTreeMap<String, String>,
    /// Range overrides, relation name to kind name.
    pub ranges: BTreeMap<String, String>,
}

impl SessionConfig {
    /// Reads a session file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Io`] if the file cannot be read and
    /// [`ConfigFileError::Toml`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a session description.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Toml`] if `content` does not parse.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Replays the session against `engine`: options, imports, overrides,
    /// and finally the model IRI, since overrides close once it is set.
    ///
    /// # Errors
    ///
    /// Returns the first error any of the replayed commands raises.
    pub fn apply<B: Backend>(&self, engine: &mut Engine<B>) -> crate::Result<()> {
        engine.configure_options(&self.options)?;
        for import in &self.imports {
            engine.import(import.as_str());
        }
        for (relation, kind) in &self.domains {
            engine.declare_domain(relation, kind)?;
        }
        for (relation, kind) in &self.ranges {
            engine.declare_range(relation, kind)?;
        }
        if let Some(model) = &self.model {
            engine.declare_model(model.as_str())?;
        }
        Ok(())
    }
}
