//! Resource identifiers
//!
//! A record is keyed in the graph either by an IRI or by a blank node. The
//! identifier is attached to the record through a write-once [`RdfId`] slot.

use once_cell::sync::OnceCell;
use rdfmap_graph::{BlankId, Term};
use std::fmt;
use std::sync::Arc;

/// Namespace for generated identifiers when none is declared
pub const DEFAULT_NAMESPACE: &str = "urn:rdfmap:";

/// Identifier of a resource in the graph
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceId {
    /// Named resource (expanded IRI)
    Iri(Arc<str>),
    /// Anonymous resource
    Blank(BlankId),
}

impl ResourceId {
    /// Create a named identifier
    pub fn iri(iri: impl AsRef<str>) -> Self {
        ResourceId::Iri(Arc::from(iri.as_ref()))
    }

    /// Create an anonymous identifier from a label (without `_:`)
    pub fn blank(label: impl AsRef<str>) -> Self {
        ResourceId::Blank(BlankId::new(label))
    }

    /// Identifier for a subject or object term
    ///
    /// Literals have no identifier.
    pub fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::Iri(iri) => Some(ResourceId::Iri(iri.clone())),
            Term::BlankNode(id) => Some(ResourceId::Blank(id.clone())),
            Term::Literal { .. } => None,
        }
    }

    /// The identifier as a graph term
    pub fn to_term(&self) -> Term {
        match self {
            ResourceId::Iri(iri) => Term::Iri(iri.clone()),
            ResourceId::Blank(id) => Term::BlankNode(id.clone()),
        }
    }

    /// IRI string, for named identifiers
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            ResourceId::Iri(iri) => Some(iri),
            ResourceId::Blank(_) => None,
        }
    }

    /// Check if this is an anonymous identifier
    pub fn is_blank(&self) -> bool {
        matches!(self, ResourceId::Blank(_))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Iri(iri) => write!(f, "<{}>", iri),
            ResourceId::Blank(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(iri: &str) -> Self {
        ResourceId::iri(iri)
    }
}

impl From<String> for ResourceId {
    fn from(iri: String) -> Self {
        ResourceId::iri(iri)
    }
}

impl From<BlankId> for ResourceId {
    fn from(id: BlankId) -> Self {
        ResourceId::Blank(id)
    }
}

/// Write-once identifier slot carried by every mappable record
///
/// Once a value is assigned it never changes; later assignments of a
/// different value are rejected.
#[derive(Clone, Debug, Default)]
pub struct RdfId(OnceCell<ResourceId>);

impl RdfId {
    /// Empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot already holding `id`
    pub fn with(id: impl Into<ResourceId>) -> Self {
        Self(OnceCell::with_value(id.into()))
    }

    /// Current identifier, if assigned
    pub fn get(&self) -> Option<&ResourceId> {
        self.0.get()
    }

    /// Check if an identifier has been assigned
    pub fn is_assigned(&self) -> bool {
        self.0.get().is_some()
    }

    /// Assign `id`
    ///
    /// Assigning the value already held is a no-op. Assigning a different
    /// value returns the one already held as the error.
    pub fn set(&self, id: ResourceId) -> Result<(), ResourceId> {
        let held = self.0.get_or_init(|| id.clone());
        if *held == id { Ok(()) } else { Err(held.clone()) }
    }

    /// Current identifier, assigning the result of `f` first if empty
    pub fn get_or_init(&self, f: impl FnOnce() -> ResourceId) -> &ResourceId {
        self.0.get_or_init(f)
    }
}

/// Check whether `text` reads as an absolute URI (`scheme:rest`)
pub(crate) fn is_absolute_uri(text: &str) -> bool {
    let Some((scheme, rest)) = text.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    scheme_ok && !rest.is_empty() && !text.chars().any(char::is_whitespace)
}
