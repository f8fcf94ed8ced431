//! Related-record references
//!
//! A member pointing at another record holds a [`Reference`]: either the
//! materialized record itself or a [`LazyRecord`] that materializes on first
//! access and keeps the result.

use crate::engine::Engine;
use crate::entity::{EntityType, Record};
use crate::error::Result;
use crate::id::ResourceId;
use crate::source::SharedSource;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// Deferred related record
///
/// Clones share the resolution: whichever clone is accessed first
/// materializes the record, every clone sees the same result.
#[derive(Clone)]
pub struct LazyRecord(Arc<LazyInner>);

struct LazyInner {
    target: EntityType,
    id: ResourceId,
    source: SharedSource,
    engine: Engine,
    resolved: OnceCell<Record>,
}

impl LazyRecord {
    pub(crate) fn new(
        engine: Engine,
        target: EntityType,
        id: ResourceId,
        source: SharedSource,
    ) -> Self {
        LazyRecord(Arc::new(LazyInner {
            target,
            id,
            source,
            engine,
            resolved: OnceCell::new(),
        }))
    }

    /// Materialize the record, at most once
    ///
    /// A failed attempt is not cached; the next call tries again.
    pub fn resolve(&self) -> Result<Record> {
        let inner = &*self.0;
        inner
            .resolved
            .get_or_try_init(|| {
                tracing::debug!(id = %inner.id, ty = inner.target.name(), "resolving lazy reference");
                inner.engine.from_graph_as(inner.target, &inner.id, &inner.source)
            })
            .cloned()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.resolved.get().is_some()
    }

    /// Identifier of the referenced record; never forces resolution
    pub fn resource_id(&self) -> ResourceId {
        self.0
            .resolved
            .get()
            .and_then(Record::id)
            .unwrap_or_else(|| self.0.id.clone())
    }

    pub fn target(&self) -> EntityType {
        self.0.target
    }
}

impl fmt::Debug for LazyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyRecord")
            .field("target", &self.0.target)
            .field("id", &self.0.id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Reference from one record to another
#[derive(Clone, Debug)]
pub enum Reference {
    Eager(Record),
    Lazy(LazyRecord),
}

impl Reference {
    /// The referenced record, resolving a lazy reference if needed
    pub fn record(&self) -> Result<Record> {
        match self {
            Reference::Eager(record) => Ok(record.clone()),
            Reference::Lazy(lazy) => lazy.resolve(),
        }
    }

    /// Identifier of the referenced record, without resolving
    pub fn resource_id(&self) -> Option<ResourceId> {
        match self {
            Reference::Eager(record) => record.id(),
            Reference::Lazy(lazy) => Some(lazy.resource_id()),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Reference::Lazy(_))
    }
}

impl From<Record> for Reference {
    fn from(record: Record) -> Self {
        Reference::Eager(record)
    }
}

impl PartialEq for Reference {
    /// Eager references are equal when they share the record; otherwise
    /// references are equal when they name the same resource.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Reference::Eager(a), Reference::Eager(b)) if a.ptr_eq(b) => true,
            (Reference::Lazy(a), Reference::Lazy(b)) if Arc::ptr_eq(&a.0, &b.0) => true,
            _ => match (self.resource_id(), other.resource_id()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}
