//! Validators, one module per standard.

pub mod owl;
pub mod rdf;
