//! `abm-owl`: writes OWL ontologies describing a simulation snapshot.
//!
//! **Subcommands:**
//! - `structure` writes the schema ontology (classes and properties)
//! - `state` writes the instance ontology for one tick
//! - `check` builds both and runs the conformance suite
//!
//! **Usage:**
//! ```text
//! abm-owl structure --session farm.toml --snapshot farm.json --out public/farm.owl
//! abm-owl state --session farm.toml --snapshot farm.json --tick 10 --out public/farm-10.ttl
//! abm-owl check --session farm.toml --snapshot farm.json --artifacts public
//! ```
//!
//! The output format follows the file extension: `.nt` for N-Triples,
//! `.jsonld` for JSON-LD, anything else for Turtle. Set `RUST_LOG` to change
//! log verbosity (default `info`).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use abm_owl::{Engine, FileBackend, SessionConfig, Snapshot};
use abm_owl_conformance::run_all;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Map agent-based simulation snapshots to OWL 2 ontologies.
#[derive(Parser)]
#[command(name = "abm-owl", about = "Write OWL ontologies from simulation snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the structure ontology.
    Structure {
        #[command(flatten)]
        input: Input,
        /// Output file.
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the state ontology for one tick.
    State {
        #[command(flatten)]
        input: Input,
        /// Output file.
        #[arg(long)]
        out: PathBuf,
        /// Simulation tick the snapshot was taken at.
        #[arg(long)]
        tick: f64,
    },
    /// Build both ontologies and validate them.
    Check {
        #[command(flatten)]
        input: Input,
        /// Simulation tick the snapshot was taken at.
        #[arg(long, default_value_t = 0.0)]
        tick: f64,
        /// Directory of written artifacts to parse as well.
        #[arg(long)]
        artifacts: Option<PathBuf>,
    },
}

#[derive(Args)]
struct Input {
    /// Session file (TOML): model IRI, options, imports, overrides.
    #[arg(long)]
    session: PathBuf,
    /// Host snapshot (JSON).
    #[arg(long)]
    snapshot: PathBuf,
}

impl Input {
    fn engine(&self) -> Result<Engine<FileBackend>> {
        let json = fs::read_to_string(&self.snapshot)
            .with_context(|| format!("Failed to read {}", self.snapshot.display()))?;
        let snapshot = Snapshot::from_json(&json)
            .with_context(|| format!("Failed to parse snapshot {}", self.snapshot.display()))?;
        let config = SessionConfig::load(&self.session)?;

        let mut engine = Engine::new(FileBackend::new());
        engine.attach(snapshot);
        config
            .apply(&mut engine)
            .with_context(|| format!("Failed to apply session {}", self.session.display()))?;
        Ok(engine)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Structure { input, out } => {
            let document = input.engine()?.write_structure(&out)?;
            println!("  Written: {} ({} axioms)", out.display(), document.axiom_count());
        }
        Command::State { input, out, tick } => {
            let document = input.engine()?.write_state(&out, tick)?;
            println!("  Written: {} ({} axioms)", out.display(), document.axiom_count());
        }
        Command::Check { input, tick, artifacts } => check(&input, tick, artifacts.as_deref())?,
    }
    Ok(())
}

fn check(input: &Input, tick: f64, artifacts: Option<&Path>) -> Result<()> {
    let engine = input.engine()?;
    let structure = engine.build_structure()?;
    let state = engine.build_state(tick)?;
    info!(structure = %structure.iri, state = %state.iri, "documents built");

    let report = run_all(&structure, &[state], artifacts)?;

    println!("abm-owl Conformance Report");
    println!("==========================");
    println!();
    for result in &report.results {
        println!("{result}");
    }
    println!();

    let failed = report.failure_count();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.results.len() - failed - report.warning_count(),
        report.warning_count(),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: [&str; 4] = ["--session", "farm.toml", "--snapshot", "farm.json"];

    #[test]
    fn state_requires_a_tick() {
        let args = ["abm-owl", "state", "--out", "farm-1.ttl"].into_iter().chain(INPUT);
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["abm-owl", "state", "--out", "farm-1.ttl", "--tick", "1"].into_iter().chain(INPUT);
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::State { tick, .. } if tick == 1.0));
    }

    #[test]
    fn check_defaults_to_tick_zero() {
        let args = ["abm-owl", "check"].into_iter().chain(INPUT);
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Check { tick, artifacts: None, .. } if tick == 0.0));
    }
}
