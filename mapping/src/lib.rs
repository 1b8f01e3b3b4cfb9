//! Agent-based model schema and state mapped to OWL 2 ontologies.
//!
//! The `abm-owl` crate translates a running agent-based simulation into two
//! kinds of ontology:
//!
//! - a **structure** ontology (T-Box) with a class per agent kind, a data
//!   property per owned variable, an object property per relation kind (or a
//!   reified class when the relation owns variables), the grid-cell
//!   vocabulary, and one data property per global;
//! - a **state** ontology (A-Box) per snapshot, asserting every agent, cell,
//!   relation instance, and global value at one tick.
//!
//! The host is read through the [`Simulation`] trait; [`Snapshot`] is a
//! JSON-deserializable implementation of it. Ontologies are built as
//! [`OntologyDocument`]s and handed to a [`Backend`] that renders Turtle,
//! N-Triples, or JSON-LD.
//!
//! # Entry Point
//!
//! ```
//! use abm_owl::{Engine, KindDecl, MemoryBackend, Snapshot};
//!
//! let mut engine = Engine::new(MemoryBackend::new());
//! engine.attach(Snapshot {
//!     breeds: vec![KindDecl::new("cows", Some("cow"), &["age"])],
//!     ..Snapshot::default()
//! });
//! engine.configure_options(["no-patches"]).unwrap();
//! engine.declare_model("http://example.org/farm.owl").unwrap();
//! let structure = engine.write_structure("farm.owl").unwrap();
//! assert!(structure.axiom_count() > 0);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod backend;
pub mod config;
pub mod directedness;
pub mod engine;
pub mod error;
pub mod host;
pub mod model;
pub mod naming;
pub mod options;
pub mod serializer;
pub mod session;
pub mod state;
pub mod structure;
pub mod value;

pub use backend::{Backend, FileBackend, MemoryBackend, RdfFormat};
pub use config::{ConfigFileError, SessionConfig};
pub use directedness::{Directedness, DirectednessMap};
pub use engine::Engine;
pub use error::{BackendError, ConfigError, Error, Result, SequencingError};
pub use host::{Cell, KindDecl, MobileAgent, Relation, Simulation, Snapshot, Value};
pub use model::{Axiom, AxiomSet, Datatype, Iri, Literal, OntologyDocument};
pub use naming::{EntityKind, NamingPolicy, Overrides};
pub use options::{OptionFlag, OptionSet};
pub use session::Session;
pub use state::{state_iri, StateBuilder};
pub use structure::StructureBuilder;
pub use value::ValueAdapter;
