//! Conversion of runtime values into data-property assertions.

use crate::host::Value;
use crate::model::{Axiom, Iri, Literal};
use crate::naming::NamingPolicy;

/// Turns one variable value into one or more data-property assertions.
///
/// Agent references become `xsd:anyURI` literals naming the agent's
/// individual inside `scope`, the state ontology being built.
#[derive(Debug, Clone, Copy)]
pub struct ValueAdapter<'a> {
    naming: &'a NamingPolicy,
    scope: &'a Iri,
}

impl<'a> ValueAdapter<'a> {
    /// Creates an adapter for individuals in `scope`.
    #[must_use]
    pub fn new(naming: &'a NamingPolicy, scope: &'a Iri) -> Self {
        Self { naming, scope }
    }

    /// Asserts `value` as the value of `property` on `subject`.
    ///
    /// Always returns at least one axiom. Sequence elements become repeated
    /// assertions on the same property, so element order is not kept.
    #[must_use]
    pub fn adapt(&self, subject: &Iri, property: &Iri, value: &Value) -> Vec<Axiom> {
        let literals = match value {
            Value::Text(text) => vec![Literal::string(text.as_str())],
            Value::Number(n) => vec![Literal::double(*n)],
            Value::Sequence(items) if !items.is_empty() => {
                items.iter().map(|item| self.element(item)).collect()
            }
            Value::Agents(ids) if !ids.is_empty() => {
                ids.iter().map(|id| self.agent_uri(id)).collect()
            }
            // Empty collections fall back to their rendering so that every
            // variable is still asserted once.
            Value::Sequence(_) | Value::Agents(_) | Value::Boolean(_) | Value::Nobody | Value::Agent(_) => {
                vec![Literal::string(value.to_string())]
            }
        };
        literals
            .into_iter()
            .map(|value| Axiom::DataPropertyAssertion {
                property: property.clone(),
                subject: subject.clone(),
                value,
            })
            .collect()
    }

    fn element(&self, item: &Value) -> Literal {
        match item {
            Value::Number(n) => Literal::double(*n),
            Value::Agent(id) => self.agent_uri(id),
            other => Literal::string(other.to_string()),
        }
    }

    fn agent_uri(&self, id: &str) -> Literal {
        Literal::any_uri(&self.naming.individual(self.scope, id))
    }
}
