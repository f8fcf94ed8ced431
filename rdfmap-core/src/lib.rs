//! # rdfmap core
//!
//! Bidirectional marshalling between typed records and RDF graphs.
//!
//! This crate provides:
//! - The [`Entity`] trait and declarative binding tables ([`EntityDescriptor`])
//! - [`Engine`]: `to_graph` (record to triples) and `from_graph` (triples to record)
//! - The literal codec and its fixed XSD datatype table
//! - Lazy related-record references and cycle-safe materialization
//! - The [`GraphSource`] collaborator trait and an in-memory source
//!
//! ## Design Principles
//!
//! 1. **Explicit engine context**: every registry lives on an [`Engine`]; there is
//!    no process-global state, so independent engines never interfere
//! 2. **Declared, not discovered**: member bindings come from a static table per
//!    type, resolved once and cached
//! 3. **One record per call**: `to_graph` writes a record's direct members;
//!    related records appear by identifier only
//! 4. **Lenient by default**: unresolvable references and type mismatches leave a
//!    member unset with a warning unless `strict_mode` is on

pub mod binding;
pub mod config;
pub mod construction;
pub mod descriptor;
mod encode;
pub mod engine;
pub mod entity;
pub mod error;
pub mod id;
pub mod lazy;
pub mod literal;
mod materialize;
pub mod namespace;
pub mod source;
pub mod value;

pub use binding::{MemberBinding, TypeBinding};
pub use config::EngineConfig;
pub use construction::{ConstructionGuard, ConstructionRegistry};
pub use descriptor::{EntityDescriptor, IdMember, MemberDescriptor, ValueKind};
pub use engine::Engine;
pub use entity::{AsAny, DynamicRecord, Entity, EntityType, Record, TypeKey};
pub use error::{AssignError, MappingError, Result, SourceError};
pub use id::{DEFAULT_NAMESPACE, RdfId, ResourceId};
pub use lazy::{LazyRecord, Reference};
pub use literal::{from_literal, to_literal};
pub use namespace::NamespaceRegistry;
pub use source::{Dialect, GraphSource, MemorySource, SharedSource};
pub use value::Value;

// Graph primitives used throughout the public API
pub use rdfmap_graph::{Graph, Term, Triple};
