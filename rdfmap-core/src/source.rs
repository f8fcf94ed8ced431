//! Graph source collaborator
//!
//! The engine reads through a [`GraphSource`]: `describe` fetches the triples
//! about one resource, `graph_query` runs a construct-style query used to
//! unroll RDF collections in one request.

use crate::error::SourceError;
use crate::id::ResourceId;
use parking_lot::RwLock;
use rdfmap_graph::{Graph, Triple};
use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

/// Query language a source speaks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
    Sparql,
    /// SPARQL with stable blank node labels across requests
    ArqSparql,
    Serql,
    /// Nothing known; the broadly compatible SPARQL form is used
    #[default]
    Unknown,
}

impl Dialect {
    /// Check if blank node labels returned by one request can be used in the next
    pub fn supports_stable_bnode_ids(&self) -> bool {
        matches!(self, Dialect::ArqSparql)
    }

    /// Render a resource inside query text
    pub fn as_query_string(&self, id: &ResourceId) -> String {
        match id {
            ResourceId::Iri(iri) => format!("<{iri}>"),
            ResourceId::Blank(blank) => blank.to_ntriples(),
        }
    }

    /// Construct query fetching the one-hop neighbourhood of `(subject, predicate, ?o)`
    pub fn list_construct_query(&self, subject: &ResourceId, predicate: &str) -> String {
        let s = self.as_query_string(subject);
        match self {
            Dialect::Serql => {
                format!("construct * from {{{s}}} <{predicate}> {{o}}, {{o}} po {{oo}}")
            }
            _ => format!(
                "CONSTRUCT {{ {s} <{predicate}> ?o . ?o ?po ?oo }}\nWHERE\n{{ {s} <{predicate}> ?o .\n?o ?po ?oo . }}"
            ),
        }
    }
}

/// Where the engine reads graphs from
pub trait GraphSource: Send + Sync + Debug {
    /// Triples describing `id`; empty (not an error) for an unknown resource
    fn describe(&self, id: &ResourceId) -> Result<Graph, SourceError>;

    /// Evaluate a construct-style query
    fn graph_query(&self, query: &str) -> Result<Graph, SourceError>;

    fn dialect(&self) -> Dialect {
        Dialect::Unknown
    }
}

pub type SharedSource = Arc<dyn GraphSource>;

/// In-memory graph source
///
/// `describe` returns the concise bounded description: the subject's own
/// triples plus, recursively, those of every blank node they reach.
/// `graph_query` is not supported.
#[derive(Debug, Default)]
pub struct MemorySource {
    graph: RwLock<Graph>,
    dialect: Dialect,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph: RwLock::new(graph),
            dialect: Dialect::Unknown,
        }
    }

    /// Report `dialect` from [`GraphSource::dialect`]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Add every triple of `graph`
    pub fn insert(&self, graph: &Graph) {
        self.graph.write().extend(graph.iter().cloned());
    }

    pub fn add(&self, triple: Triple) {
        self.graph.write().add(triple);
    }

    pub fn len(&self) -> usize {
        self.graph.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.read().is_empty()
    }

    pub fn into_shared(self) -> SharedSource {
        Arc::new(self)
    }
}

impl GraphSource for MemorySource {
    fn describe(&self, id: &ResourceId) -> Result<Graph, SourceError> {
        let graph = self.graph.read();
        let mut out = Graph::new();
        let mut seen = HashSet::new();
        let mut pending = vec![id.to_term()];

        while let Some(subject) = pending.pop() {
            if !seen.insert(subject.clone()) {
                continue;
            }
            for triple in graph.matching(Some(&subject), None) {
                if triple.o.is_blank() {
                    pending.push(triple.o.clone());
                }
                out.add(triple.clone());
            }
        }

        Ok(out)
    }

    fn graph_query(&self, _query: &str) -> Result<Graph, SourceError> {
        Err(SourceError::Unsupported(
            "in-memory source does not evaluate queries".into(),
        ))
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl From<Graph> for MemorySource {
    fn from(graph: Graph) -> Self {
        Self::from_graph(graph)
    }
}
