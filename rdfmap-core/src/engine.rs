//! Marshalling engine
//!
//! [`Engine`] owns every table the marshaller shares between calls: the type
//! registry (class IRI to native type), the binding cache, the namespace
//! registry and the construction registry. It is a cheap handle; clones
//! share the same tables.
//!
//! # Example
//!
//! ```
//! use rdfmap_core::{AssignError, Engine, EngineConfig, Entity, EntityDescriptor,
//!     MemberDescriptor, MemorySource, RdfId, Record, Value, ValueKind};
//!
//! #[derive(Debug, Default)]
//! struct Book {
//!     id: RdfId,
//!     title: Option<String>,
//! }
//!
//! impl Entity for Book {
//!     fn descriptor() -> EntityDescriptor {
//!         EntityDescriptor::new()
//!             .class("ex:Book")
//!             .namespace("ex", "http://example.org/")
//!             .member(MemberDescriptor::new("title", ValueKind::String).predicate("ex:title"))
//!     }
//!
//!     fn rdf_id(&self) -> Option<&RdfId> {
//!         Some(&self.id)
//!     }
//!
//!     fn get(&self, member: &str) -> Option<Value> {
//!         match member {
//!             "title" => self.title.clone().map(Value::from),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
//!         match member {
//!             "title" => self.title = Some(value.try_into()?),
//!             other => return Err(AssignError::UnknownMember(other.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let engine = Engine::new(EngineConfig::default());
//! engine.register::<Book>().unwrap();
//!
//! let book = Record::new(Book {
//!     id: RdfId::with("http://example.org/book/1"),
//!     title: Some("Dune".into()),
//! });
//! let graph = engine.to_graph(&book).unwrap();
//!
//! let source = MemorySource::from_graph(graph).into_shared();
//! let copy = engine.from_graph::<Book>("http://example.org/book/1", &source).unwrap();
//! assert_eq!(copy.read::<Book>().unwrap().title.as_deref(), Some("Dune"));
//! ```

use crate::binding::{self, TypeBinding};
use crate::config::EngineConfig;
use crate::construction::ConstructionRegistry;
use crate::encode;
use crate::entity::{Entity, EntityType, Record, TypeKey};
use crate::error::Result;
use crate::id::ResourceId;
use crate::materialize;
use crate::namespace::NamespaceRegistry;
use crate::source::SharedSource;
use parking_lot::{ReentrantMutex, RwLock};
use rdfmap_graph::Graph;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Engine(Arc<EngineInner>);

struct EngineInner {
    config: EngineConfig,
    /// Expanded class IRI -> registered type
    types: RwLock<HashMap<String, EntityType>>,
    bindings: RwLock<HashMap<TypeKey, Arc<TypeBinding>>>,
    namespaces: NamespaceRegistry,
    construction: ConstructionRegistry,
    /// Serializes registration and top-level materialization passes
    pass: ReentrantMutex<()>,
}

impl Engine {
    /// Create an engine; the configured namespaces are registered up front
    pub fn new(config: EngineConfig) -> Self {
        let namespaces = NamespaceRegistry::new();
        for (prefix, uri) in &config.namespaces {
            namespaces.add(prefix, uri);
        }

        Engine(Arc::new(EngineInner {
            config,
            types: RwLock::new(HashMap::new()),
            bindings: RwLock::new(HashMap::new()),
            namespaces,
            construction: ConstructionRegistry::new(),
            pass: ReentrantMutex::new(()),
        }))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.0.config
    }

    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.0.namespaces
    }

    pub(crate) fn construction(&self) -> &ConstructionRegistry {
        &self.0.construction
    }

    /// Register the participating types
    ///
    /// Each type's binding is resolved (failing on types that cannot be
    /// mapped) and its class IRI is mapped to it. A class registered again
    /// maps to the later type.
    pub fn init(&self, types: impl IntoIterator<Item = EntityType>) -> Result<()> {
        let _pass = self.0.pass.lock();
        for ty in types {
            let binding = self.resolve_bindings(ty)?;
            let previous = self.0.types.write().insert(binding.class.clone(), ty);
            match previous {
                Some(previous) if previous != ty => {
                    tracing::debug!(
                        class = %binding.class,
                        previous = previous.name(),
                        ty = ty.name(),
                        "class re-registered to a different type"
                    );
                }
                _ => tracing::debug!(class = %binding.class, ty = ty.name(), "registered type"),
            }
        }
        Ok(())
    }

    /// Register one concrete type
    pub fn register<T: Entity + Default>(&self) -> Result<()> {
        self.init([EntityType::of::<T>()])
    }

    /// Type registered for a class IRI (compact or expanded)
    pub fn type_for_class(&self, class: &str) -> Option<EntityType> {
        let class = self.0.namespaces.expand(class);
        self.0.types.read().get(&class).copied()
    }

    /// Resolved binding of `ty`, computed once and cached
    pub fn resolve_bindings(&self, ty: EntityType) -> Result<Arc<TypeBinding>> {
        if let Some(binding) = self.0.bindings.read().get(&ty.key()) {
            return Ok(binding.clone());
        }

        let binding = Arc::new(binding::resolve(ty, &self.0.config, &self.0.namespaces)?);
        Ok(self
            .0
            .bindings
            .write()
            .entry(ty.key())
            .or_insert(binding)
            .clone())
    }

    /// Identifier of `record`, assigning one if it has none yet
    pub fn assign_id(&self, record: &Record) -> Result<ResourceId> {
        encode::assign_id(self, record)
    }

    /// Triples describing the direct members of `record`
    ///
    /// Related records contribute their identifier only.
    pub fn to_graph(&self, record: &Record) -> Result<Graph> {
        encode::to_graph(self, record)
    }

    /// Materialize the resource `id` as a `T`
    pub fn from_graph<T: Entity + Default>(
        &self,
        id: impl Into<ResourceId>,
        source: &SharedSource,
    ) -> Result<Record> {
        self.from_graph_as(EntityType::of::<T>(), &id.into(), source)
    }

    /// Materialize the resource `id` as an instance of `ty`
    ///
    /// The record may end up as a subtype of `ty` when the resource asserts
    /// the class of a registered, compatible subtype.
    pub fn from_graph_as(
        &self,
        ty: EntityType,
        id: &ResourceId,
        source: &SharedSource,
    ) -> Result<Record> {
        let _pass = self.0.pass.lock();
        tracing::debug!(id = %id, ty = ty.name(), "materializing resource");
        materialize::materialize(self, ty, id, source)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.0.config)
            .field("types", &self.0.types.read().len())
            .finish()
    }
}
