//! Property-based tests for naming, options, reification, and values.

use abm_owl::naming::local_name;
use abm_owl::{
    Axiom, EntityKind, Iri, KindDecl, NamingPolicy, OptionFlag, OptionSet, Overrides, Session,
    Snapshot, StructureBuilder, Value, ValueAdapter,
};
use proptest::prelude::*;

const MODEL: &str = "http://example.org/farm.owl";

fn schema(local: &str) -> Iri {
    Iri::new(format!("{MODEL}#{local}"))
}

// =============================================================================
// Naming Policy
// =============================================================================

proptest! {
    /// Normalizing an already-normalized class name changes nothing.
    #[test]
    fn prop_class_names_idempotent(name in "\\PC{0,24}") {
        let once = local_name(&name, EntityKind::Class);
        prop_assert_eq!(local_name(&once, EntityKind::Class), once);
    }

    /// Normalizing an already-normalized property name changes nothing.
    #[test]
    fn prop_property_names_idempotent(name in "\\PC{0,24}") {
        let once = local_name(&name, EntityKind::Property);
        prop_assert_eq!(local_name(&once, EntityKind::Property), once);
    }

    /// Two independently built policies agree on every IRI.
    #[test]
    fn prop_resolve_is_pure(name in "[a-zA-Z][a-zA-Z0-9 ?-]{0,16}") {
        let a = NamingPolicy::new(Iri::new(MODEL), Overrides::new());
        let b = NamingPolicy::new(Iri::new(MODEL), Overrides::new());
        for kind in [EntityKind::Class, EntityKind::Property] {
            prop_assert_eq!(a.resolve(&name, kind), b.resolve(&name, kind));
            prop_assert_eq!(a.resolve(&name, kind), a.resolve(&name, kind));
        }
    }

    /// Local names only use characters legal in an IRI fragment.
    #[test]
    fn prop_local_names_are_legal(name in "\\PC{0,24}") {
        for kind in [EntityKind::Class, EntityKind::Property] {
            let local = local_name(&name, kind);
            prop_assert!(!local.is_empty());
            prop_assert!(local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '%')));
        }
    }

    /// Property names are lowercase; class names start uppercase when they
    /// start with a letter.
    #[test]
    fn prop_casing(name in "[a-zA-Z][a-zA-Z0-9]{0,16}") {
        let class = local_name(&name, EntityKind::Class);
        prop_assert!(class.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert_eq!(&class[1..], &name[1..]);
        prop_assert_eq!(local_name(&name, EntityKind::Property), name.to_lowercase());
    }
}

// =============================================================================
// Option Set
// =============================================================================

proptest! {
    /// Any ordering of distinct flags parses and reports exactly those flags.
    #[test]
    fn prop_distinct_flags_parse(flags in proptest::sample::subsequence(OptionFlag::ALL.to_vec(), 0..=3).prop_shuffle()) {
        let names: Vec<&str> = flags.iter().map(|f| f.as_str()).collect();
        let set = OptionSet::parse(&names).unwrap();
        for flag in OptionFlag::ALL {
            prop_assert_eq!(set.has(flag), flags.contains(&flag));
        }
    }

    /// Repeating any flag is rejected.
    #[test]
    fn prop_repeated_flag_rejected(index in 0usize..3, position in 0usize..3) {
        let flag = OptionFlag::ALL[index].as_str();
        let mut names: Vec<&str> = OptionFlag::ALL.iter().map(|f| f.as_str()).collect();
        names.insert(position, flag);
        prop_assert!(OptionSet::parse(&names).is_err());
    }

    /// The `none` sentinel cannot be combined with any flag.
    #[test]
    fn prop_none_with_flag_rejected(index in 0usize..3, first in any::<bool>()) {
        let flag = OptionFlag::ALL[index].as_str();
        let names = if first { vec!["none", flag] } else { vec![flag, "none"] };
        prop_assert!(OptionSet::parse(&names).is_err());
    }
}

// =============================================================================
// Reification
// =============================================================================

fn structure(owns: usize, owl2: bool, overrides: bool) -> abm_owl::AxiomSet {
    let vars: Vec<String> = (0..owns).map(|i| format!("v{i}")).collect();
    let var_refs: Vec<&str> = vars.iter().map(String::as_str).collect();
    let host = Snapshot {
        breeds: vec![KindDecl::new("cows", Some("cow"), &[])],
        link_breeds: vec![KindDecl::new("eats", None, &var_refs)],
        ..Snapshot::default()
    };
    let mut session = Session::new();
    let mut flags = vec!["no-patches"];
    if owl2 {
        flags.push("owl2");
    }
    session.set_options(flags).unwrap();
    if overrides {
        session.declare_domain("eats", "cow").unwrap();
        session.declare_range("eats", "cow").unwrap();
    }
    session.set_model(Iri::new(MODEL)).unwrap();
    StructureBuilder::new(&session, &host).axioms().unwrap()
}

proptest! {
    /// Relations without variables are one object property and no class.
    #[test]
    fn prop_plain_relation(owl2 in any::<bool>(), overrides in any::<bool>()) {
        let axioms = structure(0, owl2, overrides);
        prop_assert_eq!(axioms.count_where(|a| matches!(a, Axiom::DeclareObjectProperty(_))), 1);
        prop_assert!(axioms.contains(&Axiom::DeclareObjectProperty(schema("eats"))));
        prop_assert!(!axioms.contains(&Axiom::DeclareClass(schema("Eats"))));
        prop_assert_eq!(axioms.count_where(|a| matches!(a, Axiom::SubPropertyChainOf { .. })), 0);
    }

    /// Relations with variables get one class, one data property per
    /// variable, two directional properties, and a chain only with owl2.
    #[test]
    fn prop_reified_relation(owns in 1usize..6, owl2 in any::<bool>(), overrides in any::<bool>()) {
        let axioms = structure(owns, owl2, overrides);
        prop_assert_eq!(axioms.count_where(|a| matches!(a, Axiom::DeclareClass(_))), 2);
        prop_assert!(axioms.contains(&Axiom::DeclareClass(schema("Eats"))));
        prop_assert_eq!(axioms.count_where(|a| matches!(a, Axiom::DeclareDataProperty(_))), owns);
        prop_assert_eq!(
            axioms.count_where(|a| matches!(a, Axiom::DataPropertyDomain { class, .. } if *class == schema("Eats"))),
            owns
        );
        prop_assert_eq!(axioms.count_where(|a| matches!(a, Axiom::DeclareObjectProperty(_))), 2);
        prop_assert!(axioms.contains(&Axiom::InverseFunctionalObjectProperty(schema("eats_"))));
        prop_assert!(axioms.contains(&Axiom::FunctionalObjectProperty(schema("_eats"))));
        prop_assert_eq!(
            axioms.count_where(|a| matches!(a, Axiom::SubPropertyChainOf { .. })),
            usize::from(owl2)
        );
        let plain_domain = Axiom::ObjectPropertyDomain { property: schema("eats"), class: schema("Cow") };
        let plain_range = Axiom::ObjectPropertyRange { property: schema("eats"), class: schema("Cow") };
        prop_assert_eq!(axioms.contains(&plain_domain), owl2 && overrides);
        prop_assert_eq!(axioms.contains(&plain_range), owl2 && overrides);
    }
}

// =============================================================================
// Value Adapter
// =============================================================================

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        ".*".prop_map(Value::Text),
        any::<f64>().prop_map(Value::Number),
        any::<bool>().prop_map(Value::Boolean),
        Just(Value::Nobody),
        "[a-z]{1,5} [0-9]{1,3}".prop_map(Value::Agent),
        proptest::collection::vec("[a-z]{1,5} [0-9]{1,3}", 0..4).prop_map(Value::Agents),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        proptest::collection::vec(inner, 0..4).prop_map(Value::Sequence)
    })
}

proptest! {
    /// Every value shape yields at least one assertion, all on the given
    /// subject and property.
    #[test]
    fn prop_value_adapter_is_total(value in value_strategy()) {
        let naming = NamingPolicy::new(Iri::new(MODEL), Overrides::new());
        let scope = Iri::new("http://example.org/farm-1.0.owl");
        let subject = Iri::new("http://example.org/farm-1.0.owl#cow_0");
        let property = schema("p");
        let axioms = ValueAdapter::new(&naming, &scope).adapt(&subject, &property, &value);
        prop_assert!(!axioms.is_empty());
        for axiom in &axioms {
            prop_assert!(
                matches!(axiom, Axiom::DataPropertyAssertion { property: p, subject: s, .. } if *p == property && *s == subject),
                "unexpected axiom {:?}",
                axiom
            );
        }
    }
}
