//! RDF graph primitives for rdfmap
//!
//! This crate provides the canonical term, triple and graph types shared by
//! the marshalling engine and by graph sources.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form. Prefix
//!    declarations travel alongside in `Graph::prefixes`.
//!
//! 2. **Explicit datatypes** - Literals always have an explicit datatype, never
//!    optional. Plain strings use `xsd:string`, language-tagged strings use
//!    `rdf:langString`.
//!
//! 3. **Bag semantics by default** - The `Graph` type uses `Vec<Triple>` to
//!    preserve duplicates. Call `dedupe()` explicitly for set semantics.
//!
//! 4. **Just enough graph** - Pattern match by subject/predicate, value lookup
//!    and RDF collection handling. No algebra, no reasoning.
//!
//! # Example
//!
//! ```
//! use rdfmap_graph::{Graph, Term};
//!
//! let mut graph = Graph::new();
//!
//! graph.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//!
//! let alice = Term::iri("http://example.org/alice");
//! assert_eq!(
//!     graph.object(&alice, "http://xmlns.com/foaf/0.1/name"),
//!     Some(&Term::string("Alice"))
//! );
//! ```

pub mod datatype;
mod graph;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::Graph;
pub use term::{BlankId, Term};
pub use triple::Triple;
