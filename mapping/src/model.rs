//! Core ontology model types.
//!
//! Every artifact this crate produces is an [`OntologyDocument`]: an ontology
//! IRI, its imports, and an [`AxiomSet`]. Axioms are plain values with
//! structural equality, so adding an equivalent axiom twice is a no-op and the
//! serialized output is deterministic.

use std::collections::BTreeSet;
use std::fmt;

/// An absolute IRI naming an ontology, entity, or individual.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(String);

impl Iri {
    /// Wraps a string as an IRI. No validation is performed.
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Returns the IRI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the fragment after the last `#` or `/`, or the whole IRI if
    /// neither occurs.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match self.0.rfind(['#', '/']) {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// XSD datatypes used by literal assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Datatype {
    /// `xsd:string`.
    String,
    /// `xsd:double`.
    Double,
    /// `xsd:anyURI`.
    AnyUri,
}

impl Datatype {
    /// Returns the full XSD IRI of this datatype.
    #[must_use]
    pub fn iri(self) -> &'static str {
        match self {
            Datatype::String => iris::XSD_STRING,
            Datatype::Double => iris::XSD_DOUBLE,
            Datatype::AnyUri => iris::XSD_ANY_URI,
        }
    }
}

/// A typed literal. The lexical form is canonical for its datatype.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Datatype of the literal.
    pub datatype: Datatype,
}

impl Literal {
    /// An `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: Datatype::String,
        }
    }

    /// An `xsd:double` literal in canonical lexical form.
    #[must_use]
    pub fn double(value: f64) -> Self {
        Self {
            lexical: format_double(value),
            datatype: Datatype::Double,
        }
    }

    /// An `xsd:anyURI` literal pointing at `iri`.
    #[must_use]
    pub fn any_uri(iri: &Iri) -> Self {
        Self {
            lexical: iri.as_str().to_owned(),
            datatype: Datatype::AnyUri,
        }
    }
}

/// Renders a double the way `xsd:double` expects it: always with a fractional
/// part or exponent, and `NaN`/`INF`/`-INF` for the special values.
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_owned()
    } else {
        // `{:?}` keeps a trailing `.0` on integral values and switches to
        // exponent notation for very large or small magnitudes.
        let rendered = format!("{value:?}");
        rendered.replace('e', "E")
    }
}

/// A single OWL 2 axiom.
///
/// The variants cover exactly the constructs emitted by the structure and
/// state builders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axiom {
    /// `Declaration(Class(c))`.
    DeclareClass(Iri),
    /// `Declaration(DataProperty(p))`.
    DeclareDataProperty(Iri),
    /// `Declaration(ObjectProperty(p))`.
    DeclareObjectProperty(Iri),
    /// `DataPropertyDomain(p c)`.
    DataPropertyDomain {
        /// The data property.
        property: Iri,
        /// The domain class.
        class: Iri,
    },
    /// `DataPropertyRange(p dt)`.
    DataPropertyRange {
        /// The data property.
        property: Iri,
        /// The range datatype.
        datatype: Datatype,
    },
    /// `ObjectPropertyDomain(p c)`.
    ObjectPropertyDomain {
        /// The object property.
        property: Iri,
        /// The domain class.
        class: Iri,
    },
    /// `ObjectPropertyRange(p c)`.
    ObjectPropertyRange {
        /// The object property.
        property: Iri,
        /// The range class.
        class: Iri,
    },
    /// `FunctionalObjectProperty(p)`.
    FunctionalObjectProperty(Iri),
    /// `InverseFunctionalObjectProperty(p)`.
    InverseFunctionalObjectProperty(Iri),
    /// `SymmetricObjectProperty(p)`.
    SymmetricObjectProperty(Iri),
    /// `AsymmetricObjectProperty(p)`.
    AsymmetricObjectProperty(Iri),
    /// `IrreflexiveObjectProperty(p)`.
    IrreflexiveObjectProperty(Iri),
    /// `SubObjectPropertyOf(ObjectPropertyChain(p1 .. pn) s)`.
    SubPropertyChainOf {
        /// The chained properties, in composition order.
        chain: Vec<Iri>,
        /// The implied super-property.
        super_property: Iri,
    },
    /// `AnnotationAssertion(rdfs:comment s "text")`.
    Comment {
        /// The annotated entity.
        subject: Iri,
        /// The comment text.
        text: String,
    },
    /// `ClassAssertion(c i)`.
    ClassAssertion {
        /// The class.
        class: Iri,
        /// The individual.
        individual: Iri,
    },
    /// `ObjectPropertyAssertion(p s o)`.
    ObjectPropertyAssertion {
        /// The object property.
        property: Iri,
        /// The subject individual.
        subject: Iri,
        /// The object individual.
        object: Iri,
    },
    /// `DataPropertyAssertion(p s lit)`.
    DataPropertyAssertion {
        /// The data property.
        property: Iri,
        /// The subject individual.
        subject: Iri,
        /// The asserted value.
        value: Literal,
    },
}

/// A deduplicated, deterministically ordered set of axioms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxiomSet {
    axioms: BTreeSet<Axiom>,
}

impl AxiomSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an axiom. Returns `false` if an equal axiom was already present.
    pub fn insert(&mut self, axiom: Axiom) -> bool {
        self.axioms.insert(axiom)
    }

    /// Returns true if an equal axiom is present.
    #[must_use]
    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    /// Number of distinct axioms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    /// Returns true if the set holds no axioms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Iterates in the canonical axiom order.
    pub fn iter(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    /// Counts the axioms matching `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&Axiom) -> bool) -> usize {
        self.axioms.iter().filter(|a| predicate(a)).count()
    }
}

impl Extend<Axiom> for AxiomSet {
    fn extend<T: IntoIterator<Item = Axiom>>(&mut self, iter: T) {
        self.axioms.extend(iter);
    }
}

impl FromIterator<Axiom> for AxiomSet {
    fn from_iter<T: IntoIterator<Item = Axiom>>(iter: T) -> Self {
        Self {
            axioms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AxiomSet {
    type Item = &'a Axiom;
    type IntoIter = std::collections::btree_set::Iter<'a, Axiom>;

    fn into_iter(self) -> Self::IntoIter {
        self.axioms.iter()
    }
}

/// A complete ontology ready to be handed to a [`Backend`](crate::backend::Backend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyDocument {
    /// Logical IRI of the ontology.
    pub iri: Iri,
    /// IRIs of imported ontologies (`owl:imports`), in declaration order.
    pub imports: Vec<Iri>,
    /// All axioms of the ontology.
    pub axioms: AxiomSet,
}

impl OntologyDocument {
    /// Returns the number of axioms in the document.
    #[must_use]
    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }
}

/// Standard IRI constants used by the builders and serializers.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`.
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`.
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`.
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    /// `rdfs:comment`.
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

    /// `owl:Ontology`.
    pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:imports`.
    pub const OWL_IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:FunctionalProperty`.
    pub const OWL_FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
    /// `owl:InverseFunctionalProperty`.
    pub const OWL_INVERSE_FUNCTIONAL_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";
    /// `owl:SymmetricProperty`.
    pub const OWL_SYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#SymmetricProperty";
    /// `owl:AsymmetricProperty`.
    pub const OWL_ASYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AsymmetricProperty";
    /// `owl:IrreflexiveProperty`.
    pub const OWL_IRREFLEXIVE_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#IrreflexiveProperty";
    /// `owl:propertyChainAxiom`.
    pub const OWL_PROPERTY_CHAIN_AXIOM: &str = "http://www.w3.org/2002/07/owl#propertyChainAxiom";
    /// `owl:NamedIndividual`.
    pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";

    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:double`.
    pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:anyURI`.
    pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}
