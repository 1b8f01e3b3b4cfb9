//! Directedness pre-pass over live relation instances.
//!
//! Relation kinds do not declare whether they are directed; it is read off
//! the instances that exist when the schema is built. A kind with no
//! instances is [`Directedness::Unknown`].

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::host::Simulation;

/// Observed directedness of a relation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directedness {
    /// Every instance is directed.
    Directed,
    /// Every instance is undirected.
    Undirected,
    /// No instances exist.
    Unknown,
}

/// Directedness per relation kind, keyed by lowercased plural kind name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectednessMap {
    kinds: BTreeMap<String, Directedness>,
}

impl DirectednessMap {
    /// Scans the host's relations once and classifies every kind seen.
    ///
    /// Instances may report their kind by plural or singular name; both count
    /// towards the declared kind's plural name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InconsistentDirectedness`] if one kind has both
    /// directed and undirected instances.
    pub fn infer(host: &dyn Simulation) -> Result<Self, ConfigError> {
        let mut kinds = BTreeMap::new();
        for relation in host.relations() {
            let key = host
                .find_relation_kind(&relation.kind)
                .map_or_else(|| relation.kind.clone(), |kind| kind.name)
                .to_lowercase();
            let observed = if relation.directed {
                Directedness::Directed
            } else {
                Directedness::Undirected
            };
            match kinds.insert(key.clone(), observed) {
                Some(previous) if previous != observed => {
                    return Err(ConfigError::InconsistentDirectedness(key));
                }
                _ => {}
            }
        }
        Ok(Self { kinds })
    }

    /// Directedness of `kind`, [`Directedness::Unknown`] if no instance was seen.
    #[must_use]
    pub fn get(&self, kind: &str) -> Directedness {
        self.kinds
            .get(&kind.to_lowercase())
            .copied()
            .unwrap_or(Directedness::Unknown)
    }
}
