//! Serializers for built ontologies.
//!
//! Every format renders the same triples, produced by [`rdf::triples`]
//! according to the OWL 2 mapping to RDF graphs:
//! - **Turtle** ([`turtle`]) for `.ttl` and `.owl` targets
//! - **N-Triples** ([`ntriples`]) for `.nt` targets, one triple per line
//! - **JSON-LD** ([`jsonld`]) for `.jsonld` and `.json` targets

pub mod jsonld;
pub mod ntriples;
pub mod rdf;
pub mod turtle;
