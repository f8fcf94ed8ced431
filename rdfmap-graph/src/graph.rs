//! RDF graph - a collection of triples
//!
//! The `Graph` type uses `Vec<Triple>` to preserve duplicates (bag semantics).
//! Call `dedupe()` explicitly if you want set semantics.
//!
//! Besides storage, the graph offers the handful of primitives the marshaller
//! needs: pattern match by subject/predicate, single and multi value lookup,
//! and RDF collection (`rdf:first`/`rdf:rest`/`rdf:nil`) detection and writing.

use crate::{Term, Triple};
use rdfmap_vocab::rdf;
use std::collections::{BTreeMap, HashSet};

/// A collection of RDF triples
///
/// # Design Decisions
///
/// - **Vec storage**: Uses `Vec<Triple>` instead of `BTreeSet` to preserve
///   duplicates as a source returned them.
/// - **Explicit deduplication**: Call `dedupe()` if you want set semantics.
///
/// # Example
///
/// ```
/// use rdfmap_graph::{Graph, Term};
///
/// let mut graph = Graph::new();
///
/// graph.add_triple(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::string("Alice"),
/// );
///
/// // Sort and drop duplicates for deterministic output
/// graph.dedupe();
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    /// Prefix declarations that travel with the triples
    pub prefixes: BTreeMap<String, String>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Write `items` as an RDF collection and link its head from `(s, p)`
    ///
    /// Each cell is a fresh blank node carrying `rdf:first` and `rdf:rest`;
    /// the chain ends in `rdf:nil`. An empty slice links `rdf:nil` directly.
    /// Returns the head term.
    pub fn add_list(&mut self, s: Term, p: Term, items: Vec<Term>) -> Term {
        let first = Term::iri(rdf::FIRST);
        let rest = Term::iri(rdf::REST);

        let cells: Vec<Term> = items.iter().map(|_| Term::fresh_blank()).collect();
        let head = cells.first().cloned().unwrap_or_else(Term::nil);
        self.add_triple(s, p, head.clone());

        for (idx, item) in items.into_iter().enumerate() {
            let cell = cells[idx].clone();
            let next = cells.get(idx + 1).cloned().unwrap_or_else(Term::nil);
            self.add_triple(cell.clone(), first.clone(), item);
            self.add_triple(cell, rest.clone(), next);
        }

        head
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Remove duplicate triples (apply set semantics); leaves the graph sorted
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    /// Iterate triples matching a subject and/or predicate pattern
    ///
    /// `None` in either position is a wildcard.
    pub fn matching<'a, 'b>(
        &'a self,
        s: Option<&'b Term>,
        p: Option<&'b str>,
    ) -> impl Iterator<Item = &'a Triple> + use<'a, 'b> {
        self.triples.iter().filter(move |t| {
            s.is_none_or(|s| &t.s == s) && p.is_none_or(|p| t.p.as_iri() == Some(p))
        })
    }

    /// Check whether any triple has the given subject
    pub fn has_subject(&self, s: &Term) -> bool {
        self.triples.iter().any(|t| &t.s == s)
    }

    /// Distinct predicates asserted on a subject, in first-seen order
    pub fn predicates_of(&self, s: &Term) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.matching(Some(s), None)
            .filter_map(|t| t.p.as_iri())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// All objects for `(s, p)`
    pub fn objects(&self, s: &Term, p: &str) -> Vec<&Term> {
        self.matching(Some(s), Some(p)).map(|t| &t.o).collect()
    }

    /// One object for `(s, p)`, if any
    ///
    /// When several exist, which one is returned is unspecified.
    pub fn object(&self, s: &Term, p: &str) -> Option<&Term> {
        self.matching(Some(s), Some(p)).map(|t| &t.o).next()
    }

    /// Check if `node` is an RDF collection cell (or `rdf:nil`)
    ///
    /// A cell is a resource carrying both `rdf:first` and `rdf:rest` in this graph.
    pub fn is_list(&self, node: &Term) -> bool {
        node.is_nil()
            || (node.is_resource()
                && self.object(node, rdf::FIRST).is_some()
                && self.object(node, rdf::REST).is_some())
    }

    /// Walk an RDF collection starting at `head`, collecting its items in order
    ///
    /// Returns `None` if `head` is not a collection cell. A chain that
    /// dangles (a `rdf:rest` pointing at a node this graph does not describe)
    /// yields the items up to the break; a chain that loops back on itself
    /// stops at the first revisited cell.
    pub fn list_items(&self, head: &Term) -> Option<Vec<Term>> {
        if !self.is_list(head) {
            return None;
        }

        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut cursor = head;

        while !cursor.is_nil() && visited.insert(cursor) {
            if let Some(item) = self.object(cursor, rdf::FIRST) {
                items.push(item.clone());
            }
            match self.object(cursor, rdf::REST) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Some(items)
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
            prefixes: BTreeMap::new(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Datatype;

    fn make_test_graph() -> Graph {
        let mut graph = Graph::new();

        graph.add_triple(
            Term::iri("http://example.org/bob"),
            Term::iri("http://xmlns.com/foaf/0.1/name"),
            Term::string("Bob"),
        );

        graph.add_triple(
            Term::iri("http://example.org/alice"),
            Term::iri("http://xmlns.com/foaf/0.1/name"),
            Term::string("Alice"),
        );

        graph.add_triple(
            Term::iri("http://example.org/alice"),
            Term::iri("http://xmlns.com/foaf/0.1/age"),
            Term::typed("30", Datatype::xsd_integer()),
        );

        graph
    }

    #[test]
    fn test_graph_creation() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
    }

    #[test]
    fn test_graph_add() {
        let mut graph = Graph::new();
        graph.add_triple(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_graph_dedupe() {
        let mut graph = Graph::new();

        // Add duplicate triples
        let triple = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );

        graph.add(triple.clone());
        graph.add(triple.clone());
        graph.add(triple);

        assert_eq!(graph.len(), 3);

        graph.dedupe();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_graph_prefixes() {
        let mut graph = Graph::new();
        graph.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        graph.add_prefix("ex", "http://example.org/");

        assert_eq!(graph.prefixes.len(), 2);
        assert_eq!(
            graph.prefixes.get("foaf"),
            Some(&"http://xmlns.com/foaf/0.1/".to_string())
        );
    }

    #[test]
    fn test_from_iterator() {
        let triples = vec![Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        )];

        let graph: Graph = triples.into_iter().collect();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_pattern_match() {
        let graph = make_test_graph();
        let alice = Term::iri("http://example.org/alice");

        assert_eq!(graph.matching(Some(&alice), None).count(), 2);
        assert_eq!(
            graph
                .matching(None, Some("http://xmlns.com/foaf/0.1/name"))
                .count(),
            2
        );
        assert_eq!(
            graph.predicates_of(&alice),
            vec!["http://xmlns.com/foaf/0.1/name", "http://xmlns.com/foaf/0.1/age"]
        );
        assert_eq!(
            graph.object(&alice, "http://xmlns.com/foaf/0.1/age"),
            Some(&Term::typed("30", Datatype::xsd_integer()))
        );
        assert!(graph.objects(&alice, "http://example.org/missing").is_empty());
    }

    #[test]
    fn test_list_roundtrip() {
        let mut graph = Graph::new();
        let s = Term::iri("http://example.org/s");
        let head = graph.add_list(
            s.clone(),
            Term::iri("http://example.org/items"),
            vec![Term::string("a"), Term::string("b"), Term::string("c")],
        );

        assert!(head.is_blank());
        assert!(graph.is_list(&head));
        assert_eq!(
            graph.list_items(&head),
            Some(vec![Term::string("a"), Term::string("b"), Term::string("c")])
        );
    }

    #[test]
    fn test_empty_list_is_nil() {
        let mut graph = Graph::new();
        let head = graph.add_list(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/items"),
            vec![],
        );
        assert!(head.is_nil());
        assert_eq!(graph.list_items(&head), Some(vec![]));
    }

    #[test]
    fn test_non_list_node() {
        let graph = make_test_graph();
        assert!(!graph.is_list(&Term::iri("http://example.org/alice")));
        assert_eq!(graph.list_items(&Term::string("x")), None);
    }
}
