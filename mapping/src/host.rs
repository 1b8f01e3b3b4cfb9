//! The read-only introspection boundary to the host simulation.
//!
//! The host exposes its schema (agent kinds, relation kinds, owned variables,
//! globals) and its live state (agents, grid cells, relation instances,
//! variable values). Values cross the boundary as the closed [`Value`]
//! variant, so nothing downstream has to test runtime types.
//!
//! [`Snapshot`] is a plain-data implementation of [`Simulation`] that can be
//! deserialized from a JSON dump of the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::format_double;

/// Index of the first user-declared variable in a mobile agent's slot array.
pub const AGENT_OWN_OFFSET: usize = 13;

/// Index of the first user-declared variable in a relation's slot array.
pub const RELATION_OWN_OFFSET: usize = 10;

/// Index of the first user-declared variable in a grid cell's slot array.
pub const CELL_OWN_OFFSET: usize = 5;

/// Built-in grid cell attributes that never become ontology properties.
pub const RESERVED_CELL_VARIABLES: [&str; 5] = ["pxcor", "pycor", "pcolor", "plabel", "plabel-color"];

/// Plural name of the implicit mobile-agent kind.
pub const DEFAULT_AGENT_KIND: &str = "turtles";

/// Class name of the implicit mobile-agent kind.
pub const DEFAULT_AGENT_CLASS: &str = "Turtle";

/// Plural name of the implicit relation kind.
pub const DEFAULT_RELATION_KIND: &str = "links";

/// Property name of the implicit relation kind.
pub const DEFAULT_RELATION_PROPERTY: &str = "link";

/// Class name of grid cells.
pub const CELL_CLASS: &str = "Patch";

/// Object property linking a mobile agent to the cell it stands on.
pub const LOCATION_PROPERTY: &str = "location";

/// Data property holding an x co-ordinate.
pub const X_PROPERTY: &str = "x";

/// Data property holding a y co-ordinate.
pub const Y_PROPERTY: &str = "y";

/// Identifier of an agent, cell, or relation instance as rendered by the host
/// (for example `"cow 3"`, `"patch 0 1"`, `"(eat 0 3)"`).
pub type AgentId = String;

/// A runtime variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    /// A string.
    Text(String),
    /// A number; the host has a single floating-point numeric type.
    Number(f64),
    /// A boolean.
    Boolean(bool),
    /// The empty agent reference.
    Nobody,
    /// An ordered list of values.
    Sequence(Vec<Value>),
    /// A reference to one agent.
    Agent(AgentId),
    /// An unordered collection of agents.
    Agents(Vec<AgentId>),
}

impl fmt::Display for Value {
    /// Renders the value the way the host prints it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Nobody => f.write_str("nobody"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Agent(id) => write!(f, "({id})"),
            Value::Agents(ids) => write!(f, "(agentset, {} agents)", ids.len()),
        }
    }
}

/// Integral numbers print without a fractional part, as the host does.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else if n.is_finite() {
        format!("{n}")
    } else {
        format_double(n)
    }
}

/// Declaration of an agent kind or relation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindDecl {
    /// Plural name, as instances report their kind (e.g. `"cows"`).
    pub name: String,
    /// Singular name, if declared (e.g. `"cow"`).
    #[serde(default)]
    pub singular: Option<String>,
    /// User-declared variables, in declaration order.
    #[serde(default)]
    pub owns: Vec<String>,
}

impl KindDecl {
    /// Creates a declaration.
    pub fn new(name: impl Into<String>, singular: Option<&str>, owns: &[&str]) -> Self {
        Self {
            name: name.into(),
            singular: singular.map(str::to_owned),
            owns: owns.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// The name used for the ontology entity: the singular form when
    /// declared, otherwise the plural.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        self.singular.as_deref().unwrap_or(&self.name)
    }
}

/// A mobile agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileAgent {
    /// Host identifier.
    pub id: AgentId,
    /// Plural name of the agent's kind.
    pub kind: String,
    /// X co-ordinate.
    pub xcor: f64,
    /// Y co-ordinate.
    pub ycor: f64,
    /// Whether the agent is hidden.
    #[serde(default)]
    pub hidden: bool,
    /// Identifier of the cell the agent stands on.
    pub cell: AgentId,
    /// Full slot array: built-in slots first, then user-declared variables.
    #[serde(default)]
    pub variables: Vec<Value>,
}

/// A grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Host identifier.
    pub id: AgentId,
    /// X co-ordinate.
    pub pxcor: f64,
    /// Y co-ordinate.
    pub pycor: f64,
    /// Full slot array, aligned with [`Simulation::cell_owns`].
    #[serde(default)]
    pub variables: Vec<Value>,
}

/// A relation instance between two agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Host identifier.
    pub id: AgentId,
    /// Plural name of the relation's kind.
    pub kind: String,
    /// Whether this instance is directed.
    pub directed: bool,
    /// Source (or first) endpoint.
    pub end1: AgentId,
    /// Target (or second) endpoint.
    pub end2: AgentId,
    /// Full slot array: built-in slots first, then user-declared variables.
    #[serde(default)]
    pub variables: Vec<Value>,
}

/// A schema kind after falling back to the implicit default kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKind {
    /// Plural name instances report.
    pub name: String,
    /// Name of the ontology entity (class or property).
    pub entity: String,
    /// User-declared variables.
    pub owns: Vec<String>,
}

impl ResolvedKind {
    fn from_decl(decl: &KindDecl) -> Self {
        Self {
            name: decl.name.clone(),
            entity: decl.entity_name().to_owned(),
            owns: decl.owns.clone(),
        }
    }
}

/// Read-only access to a host simulation.
pub trait Simulation {
    /// Declared agent kinds. Empty when the model declares none.
    fn agent_kinds(&self) -> &[KindDecl];

    /// Variables of the implicit agent kind.
    fn default_agent_owns(&self) -> &[String];

    /// Declared relation kinds. Empty when the model declares none.
    fn relation_kinds(&self) -> &[KindDecl];

    /// Variables of the implicit relation kind.
    fn default_relation_owns(&self) -> &[String];

    /// All cell variables, built-in slots included.
    fn cell_owns(&self) -> &[String];

    /// Global variable names, in slot order.
    fn globals(&self) -> &[String];

    /// Current value of the global in slot `index`.
    fn global_value(&self, index: usize) -> Option<&Value>;

    /// Every live mobile agent.
    fn agents(&self) -> &[MobileAgent];

    /// Every grid cell.
    fn cells(&self) -> &[Cell];

    /// Every live relation instance.
    fn relations(&self) -> &[Relation];

    /// Agent kinds with the implicit kind substituted when none are declared.
    fn agent_schema(&self) -> Vec<ResolvedKind> {
        if self.agent_kinds().is_empty() {
            vec![ResolvedKind {
                name: DEFAULT_AGENT_KIND.to_owned(),
                entity: DEFAULT_AGENT_CLASS.to_owned(),
                owns: self.default_agent_owns().to_vec(),
            }]
        } else {
            self.agent_kinds().iter().map(ResolvedKind::from_decl).collect()
        }
    }

    /// Relation kinds with the implicit kind substituted when none are declared.
    fn relation_schema(&self) -> Vec<ResolvedKind> {
        if self.relation_kinds().is_empty() {
            vec![ResolvedKind {
                name: DEFAULT_RELATION_KIND.to_owned(),
                entity: DEFAULT_RELATION_PROPERTY.to_owned(),
                owns: self.default_relation_owns().to_vec(),
            }]
        } else {
            self.relation_kinds().iter().map(ResolvedKind::from_decl).collect()
        }
    }

    /// Finds an agent kind by plural or singular name, ignoring case.
    fn find_agent_kind(&self, name: &str) -> Option<ResolvedKind> {
        self.agent_schema().into_iter().find(|k| {
            k.name.eq_ignore_ascii_case(name) || k.entity.eq_ignore_ascii_case(name)
        })
    }

    /// Finds a relation kind by plural or singular name, ignoring case.
    fn find_relation_kind(&self, name: &str) -> Option<ResolvedKind> {
        self.relation_schema().into_iter().find(|k| {
            k.name.eq_ignore_ascii_case(name) || k.entity.eq_ignore_ascii_case(name)
        })
    }
}

/// A captured host state, deserializable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Declared agent kinds.
    pub breeds: Vec<KindDecl>,
    /// Variables of the implicit agent kind.
    pub turtles_own: Vec<String>,
    /// Declared relation kinds.
    pub link_breeds: Vec<KindDecl>,
    /// Variables of the implicit relation kind.
    pub links_own: Vec<String>,
    /// All cell variables, built-in slots included.
    pub patches_own: Vec<String>,
    /// Global variable names.
    pub globals: Vec<String>,
    /// Global variable values, aligned with `globals`.
    pub global_values: Vec<Value>,
    /// Live mobile agents.
    pub turtles: Vec<MobileAgent>,
    /// Grid cells.
    pub patches: Vec<Cell>,
    /// Live relation instances.
    pub links: Vec<Relation>,
}

impl Snapshot {
    /// Parses a JSON dump of the host.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document does not match the
    /// snapshot layout.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Simulation for Snapshot {
    fn agent_kinds(&self) -> &[KindDecl] {
        &self.breeds
    }

    fn default_agent_owns(&self) -> &[String] {
        &self.turtles_own
    }

    fn relation_kinds(&self) -> &[KindDecl] {
        &self.link_breeds
    }

    fn default_relation_owns(&self) -> &[String] {
        &self.links_own
    }

    fn cell_owns(&self) -> &[String] {
        &self.patches_own
    }

    fn globals(&self) -> &[String] {
        &self.globals
    }

    fn global_value(&self, index: usize) -> Option<&Value> {
        self.global_values.get(index)
    }

    fn agents(&self) -> &[MobileAgent] {
        &self.turtles
    }

    fn cells(&self) -> &[Cell] {
        &self.patches
    }

    fn relations(&self) -> &[Relation] {
        &self.links
    }
}
