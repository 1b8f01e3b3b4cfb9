//! Writing ontologies to disk through the file backend.

use std::fs;

use abm_owl::host::{AGENT_OWN_OFFSET, RELATION_OWN_OFFSET};
use abm_owl::{Engine, Error, FileBackend, KindDecl, MobileAgent, Relation, SessionConfig, Snapshot, Value};

fn slots(offset: usize, values: Vec<Value>) -> Vec<Value> {
    let mut slots = vec![Value::Number(0.0); offset];
    slots.extend(values);
    slots
}

fn farm() -> Snapshot {
    Snapshot {
        breeds: vec![KindDecl::new("cows", Some("cow"), &["age", "herd-mates"])],
        link_breeds: vec![KindDecl::new("grazes", Some("graze"), &["amount"])],
        globals: vec!["rainfall".to_owned()],
        global_values: vec![Value::Number(12.5)],
        turtles: vec![MobileAgent {
            id: "cow 0".to_owned(),
            kind: "cows".to_owned(),
            xcor: 0.0,
            ycor: 1.0,
            hidden: false,
            cell: "patch 0 1".to_owned(),
            variables: slots(
                AGENT_OWN_OFFSET,
                vec![Value::Number(3.0), Value::Agents(vec!["cow 1".to_owned()])],
            ),
        }],
        links: vec![Relation {
            id: "graze 0 1".to_owned(),
            kind: "grazes".to_owned(),
            directed: true,
            end1: "cow 0".to_owned(),
            end2: "cow 1".to_owned(),
            variables: slots(RELATION_OWN_OFFSET, vec![Value::Text("lots".to_owned())]),
        }],
        ..Snapshot::default()
    }
}

fn engine() -> Engine<FileBackend> {
    let mut engine = Engine::new(FileBackend::new());
    engine.attach(farm());
    SessionConfig::from_toml_str(
        r#"
        model = "http://example.org/farm.owl"
        options = ["owl2", "relations"]
        imports = ["http://example.org/upper.owl"]

        [domains]
        grazes = "cows"
        location = "cows"
        "#,
    )
    .unwrap()
    .apply(&mut engine)
    .unwrap();
    engine
}

#[test]
fn structure_owl_is_written_as_turtle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("farm.owl");
    engine().write_structure(&path).unwrap();

    let turtle = fs::read_to_string(&path).unwrap();
    assert!(turtle.starts_with("@prefix owl:"));
    assert!(turtle.contains("owl:imports <http://example.org/upper.owl>"));
    assert!(turtle.contains("<http://example.org/farm.owl#Cow>\n  a owl:Class ."));
    assert!(turtle.contains("owl:propertyChainAxiom"));
    assert!(turtle.contains("a owl:IrreflexiveProperty"));
    assert!(turtle.contains("a owl:AsymmetricProperty"));
}

#[test]
fn state_is_written_in_each_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine();
    for name in ["farm-2.nt", "farm-2.jsonld", "nested/farm-2.ttl"] {
        engine.write_state(dir.path().join(name), 2.0).unwrap();
    }

    let nt = fs::read_to_string(dir.path().join("farm-2.nt")).unwrap();
    assert!(nt.contains(
        "<http://example.org/farm-2.0.owl> <http://www.w3.org/2002/07/owl#imports> <http://example.org/farm.owl> ."
    ));
    assert!(nt.contains(
        "<http://example.org/farm.owl#global-environment> <http://example.org/farm.owl#rainfall> \"12.5\"^^<http://www.w3.org/2001/XMLSchema#double> ."
    ));
    assert!(nt.contains("\"http://example.org/farm-2.0.owl#cow_1\"^^<http://www.w3.org/2001/XMLSchema#anyURI>"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("farm-2.jsonld")).unwrap()).unwrap();
    assert!(json["@graph"].as_array().is_some_and(|graph| !graph.is_empty()));

    let ttl = fs::read_to_string(dir.path().join("nested/farm-2.ttl")).unwrap();
    assert!(ttl.contains("<http://example.org/farm-2.0.owl#graze_0_1>"));
}

#[test]
fn unwritable_location_is_a_backend_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();

    let err = engine().write_structure(blocker.join("farm.owl")).unwrap_err();
    assert!(matches!(err, Error::Backend { .. }));
    assert!(err.to_string().contains("http://example.org/farm.owl"));
}
