//! Naming policy: host names to ontology IRIs.
//!
//! [`NamingPolicy::resolve`] is a pure function of the name, the entity kind,
//! and the fixed ontology namespace. The structure and state builders each
//! construct their own policy from the session and still agree on every IRI.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::model::Iri;

/// Local name of the individual carrying all global variables.
pub const GLOBAL_INDIVIDUAL: &str = "global-environment";

/// Whether a name becomes a class or a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Initial letter uppercased, rest unchanged.
    Class,
    /// Fully lowercased.
    Property,
}

/// User-declared domain and range overrides, keyed by relation name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    domains: BTreeMap<String, String>,
    ranges: BTreeMap<String, String>,
}

impl Overrides {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `kind` as the domain of `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateDomain`] if a domain is already
    /// recorded for `relation`.
    pub fn set_domain(&mut self, relation: &str, kind: &str) -> Result<(), ConfigError> {
        let key = relation.to_lowercase();
        if self.domains.contains_key(&key) {
            return Err(ConfigError::DuplicateDomain(relation.to_owned()));
        }
        self.domains.insert(key, kind.to_owned());
        Ok(())
    }

    /// Records `kind` as the range of `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateRange`] if a range is already recorded
    /// for `relation`.
    pub fn set_range(&mut self, relation: &str, kind: &str) -> Result<(), ConfigError> {
        let key = relation.to_lowercase();
        if self.ranges.contains_key(&key) {
            return Err(ConfigError::DuplicateRange(relation.to_owned()));
        }
        self.ranges.insert(key, kind.to_owned());
        Ok(())
    }

    /// The declared domain of `relation`, if any.
    #[must_use]
    pub fn domain(&self, relation: &str) -> Option<&str> {
        self.domains.get(&relation.to_lowercase()).map(String::as_str)
    }

    /// The declared range of `relation`, if any.
    #[must_use]
    pub fn range(&self, relation: &str) -> Option<&str> {
        self.ranges.get(&relation.to_lowercase()).map(String::as_str)
    }
}

/// Maps host names into one ontology namespace.
#[derive(Debug, Clone)]
pub struct NamingPolicy {
    namespace: Iri,
    overrides: Overrides,
}

impl NamingPolicy {
    /// Creates a policy rooted at the schema ontology's IRI.
    #[must_use]
    pub fn new(namespace: Iri, overrides: Overrides) -> Self {
        Self {
            namespace,
            overrides,
        }
    }

    /// The schema namespace all entities live in.
    #[must_use]
    pub fn namespace(&self) -> &Iri {
        &self.namespace
    }

    /// Resolves a class or property name to its IRI.
    #[must_use]
    pub fn resolve(&self, name: &str, kind: EntityKind) -> Iri {
        join(&self.namespace, &local_name(name, kind))
    }

    /// Resolves an individual's host identifier inside `scope`, the IRI of
    /// the state ontology being built.
    #[must_use]
    pub fn individual(&self, scope: &Iri, id: &str) -> Iri {
        join(scope, &local_name(id, EntityKind::Property))
    }

    /// The individual that carries the global variables.
    #[must_use]
    pub fn global_individual(&self) -> Iri {
        join(&self.namespace, GLOBAL_INDIVIDUAL)
    }

    /// Returns true if a domain override exists for `relation`.
    #[must_use]
    pub fn has_domain(&self, relation: &str) -> bool {
        self.overrides.domain(relation).is_some()
    }

    /// The domain override for `relation`, if any.
    #[must_use]
    pub fn domain(&self, relation: &str) -> Option<&str> {
        self.overrides.domain(relation)
    }

    /// Returns true if a range override exists for `relation`.
    #[must_use]
    pub fn has_range(&self, relation: &str) -> bool {
        self.overrides.range(relation).is_some()
    }

    /// The range override for `relation`, if any.
    #[must_use]
    pub fn range(&self, relation: &str) -> Option<&str> {
        self.overrides.range(relation)
    }
}

fn join(namespace: &Iri, local: &str) -> Iri {
    let ns = namespace.as_str();
    if ns.ends_with('#') || ns.ends_with('/') {
        Iri::new(format!("{ns}{local}"))
    } else {
        Iri::new(format!("{ns}#{local}"))
    }
}

/// Normalizes `name` into a legal local name with the casing for `kind`.
#[must_use]
pub fn local_name(name: &str, kind: EntityKind) -> String {
    let legal = match kind {
        EntityKind::Class => capitalize(&legalize(&capitalize(name))),
        EntityKind::Property => legalize(&name.to_lowercase()),
    };
    if legal.is_empty() {
        "_".to_owned()
    } else {
        legal
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn legalize(name: &str) -> String {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '(' | ')' | '[' | ']' | '{' | '}' => {}
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') => out.push(c),
            // An existing percent-escape is kept so normalizing twice is a no-op.
            '%' if is_escape(&chars[i + 1..]) => out.push('%'),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02x}"));
                }
            }
        }
    }
    out
}

fn is_escape(rest: &[char]) -> bool {
    rest.len() >= 2 && rest[0].is_ascii_hexdigit() && rest[1].is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NamingPolicy {
        NamingPolicy::new(Iri::new("http://example.org/cows.owl"), Overrides::new())
    }

    #[test]
    fn classes_get_initial_capital_only() {
        let p = policy();
        assert_eq!(p.resolve("cow", EntityKind::Class).as_str(), "http://example.org/cows.owl#Cow");
        assert_eq!(p.resolve("bigCow", EntityKind::Class).local_name(), "BigCow");
    }

    #[test]
    fn properties_are_lowercased() {
        let p = policy();
        assert_eq!(p.resolve("Milk-Yield", EntityKind::Property).local_name(), "milk-yield");
    }

    #[test]
    fn illegal_characters_are_normalized() {
        assert_eq!(local_name("(eat 0 3)", EntityKind::Property), "eat_0_3");
        assert_eq!(local_name("hungry?", EntityKind::Property), "hungry%3f");
        assert_eq!(local_name("()", EntityKind::Property), "_");
    }

    #[test]
    fn namespace_separator_is_not_doubled() {
        let p = NamingPolicy::new(Iri::new("http://example.org/model#"), Overrides::new());
        assert_eq!(p.resolve("age", EntityKind::Property).as_str(), "http://example.org/model#age");
        let p = NamingPolicy::new(Iri::new("http://example.org/model/"), Overrides::new());
        assert_eq!(p.resolve("age", EntityKind::Property).as_str(), "http://example.org/model/age");
    }

    #[test]
    fn individuals_live_in_the_state_namespace() {
        let p = policy();
        let scope = Iri::new("http://example.org/cows-3.0.owl");
        assert_eq!(
            p.individual(&scope, "cow 7").as_str(),
            "http://example.org/cows-3.0.owl#cow_7"
        );
        assert_eq!(
            p.global_individual().as_str(),
            "http://example.org/cows.owl#global-environment"
        );
    }

    #[test]
    fn overrides_are_case_insensitive_and_set_once() {
        let mut overrides = Overrides::new();
        overrides.set_domain("EATS", "cow").unwrap();
        assert_eq!(
            overrides.set_domain("eats", "sheep"),
            Err(ConfigError::DuplicateDomain("eats".to_owned()))
        );
        overrides.set_range("eats", "grass").unwrap();
        let p = NamingPolicy::new(Iri::new("http://example.org/m"), overrides);
        assert!(p.has_domain("eats"));
        assert_eq!(p.domain("Eats"), Some("cow"));
        assert_eq!(p.range("eats"), Some("grass"));
        assert!(!p.has_range("sees"));
    }
}
