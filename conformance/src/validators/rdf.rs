//! RDF 1.1 artifact validator.
//!
//! Walks a directory of written ontologies and parses each one:
//! - `.ttl` and `.owl` files with the Turtle 1.1 parser
//! - `.nt` files with the N-Triples parser
//! - `.jsonld` and `.json` files as JSON with a non-empty `@graph`

use std::path::Path;

use anyhow::{Context, Result};
use sophia_api::source::TripleSource;
use sophia_turtle::parser::{nt, turtle};
use tracing::debug;
use walkdir::WalkDir;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "rdf";

/// Validates every RDF artifact below `artifacts`.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or a file cannot be read.
pub fn validate(artifacts: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let mut checked = 0usize;

    for entry in WalkDir::new(artifacts).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", artifacts.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let parse: fn(&str) -> std::result::Result<usize, String> = match extension {
            "ttl" | "owl" => parse_turtle,
            "nt" => parse_ntriples,
            "jsonld" | "json" => parse_json_ld,
            _ => continue,
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        checked += 1;
        let name = path.strip_prefix(artifacts).unwrap_or(path).display().to_string();
        match parse(&content) {
            Ok(0) => report.push(TestResult::warn(VALIDATOR, format!("{name} contains no triples"))),
            Ok(count) => {
                debug!(file = %name, triples = count, "artifact parsed");
                report.push(TestResult::pass(VALIDATOR, format!("{name} parses ({count} triples)")));
            }
            Err(message) => report.push(
                TestResult::fail(VALIDATOR, format!("{name} does not parse")).with_details(vec![message]),
            ),
        }
    }

    if checked == 0 {
        report.push(TestResult::warn(
            VALIDATOR,
            format!("no RDF artifacts found in {}", artifacts.display()),
        ));
    }
    Ok(report)
}

fn parse_turtle(content: &str) -> std::result::Result<usize, String> {
    let mut count = 0usize;
    turtle::parse_str(content)
        .for_each_triple(|_| count += 1)
        .map_err(|e| e.to_string())?;
    Ok(count)
}

fn parse_ntriples(content: &str) -> std::result::Result<usize, String> {
    let mut count = 0usize;
    nt::parse_str(content)
        .for_each_triple(|_| count += 1)
        .map_err(|e| e.to_string())?;
    Ok(count)
}

/// Counts node entries rather than triples: each `@graph` node stands for at
/// least its type statement.
fn parse_json_ld(content: &str) -> std::result::Result<usize, String> {
    let json: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if json.get("@context").is_none() {
        return Err("missing @context".to_owned());
    }
    let graph = json
        .get("@graph")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| "missing @graph array".to_owned())?;
    if let Some(index) = graph.iter().position(|node| node.get("@id").is_none()) {
        return Err(format!("@graph node {index} has no @id"));
    }
    Ok(graph.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn malformed_turtle_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.ttl"), "<http://a> <http://b> <http://c> .\n").unwrap();
        fs::write(dir.path().join("broken.owl"), "<http://a> <http://b> .\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let report = validate(dir.path()).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(report.results[0].message.starts_with("broken.owl"));
    }

    #[test]
    fn json_ld_needs_a_graph() {
        assert!(parse_json_ld(r#"{"@context": {}, "@graph": [{"@id": "http://a"}]}"#).is_ok());
        assert!(parse_json_ld(r#"{"@context": {}}"#).is_err());
        assert!(parse_json_ld(r#"{"@context": {}, "@graph": [{}]}"#).is_err());
    }

    #[test]
    fn empty_directory_warns() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate(dir.path()).unwrap();
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
    }
}
