//! abm-owl conformance suite.
//!
//! Validates the ontologies produced by the mapping engine against the
//! standards they are written in.
//!
//! # Conformance Scope
//!
//! | Artifact | Standard |
//! |----------|----------|
//! | Built documents | OWL 2 structural constraints |
//! | Turtle / `.owl` files | RDF 1.1, Turtle 1.1 |
//! | N-Triples files | RDF 1.1 N-Triples |
//! | JSON-LD files | JSON well-formedness, `@graph` shape |
//!
//! # Entry Point
//!
//! ```no_run
//! use abm_owl::{Engine, MemoryBackend, Snapshot};
//! use abm_owl_conformance::run_all;
//!
//! let mut engine = Engine::new(MemoryBackend::new());
//! engine.attach(Snapshot::default());
//! engine.declare_model("http://example.org/farm.owl")?;
//! let structure = engine.build_structure()?;
//! let state = engine.build_state(0.0)?;
//! let report = run_all(&structure, &[state], None)?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod report;
pub mod validators;

use std::path::Path;

use abm_owl::OntologyDocument;
use tracing::info;

pub use report::{ConformanceReport, Severity, TestResult};

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. OWL 2 structure of the built documents (no file I/O)
/// 2. RDF 1.1 parsing of every artifact below `artifacts`, when given
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(
    structure: &OntologyDocument,
    states: &[OntologyDocument],
    artifacts: Option<&Path>,
) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    report.extend(validators::owl::validate(structure, states));

    if let Some(artifacts) = artifacts {
        report.extend(validators::rdf::validate(artifacts)?);
    }

    info!(
        checks = report.results.len(),
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "conformance run finished"
    );
    Ok(report)
}
