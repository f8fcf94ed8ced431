//! Mappable records
//!
//! A typed record implements [`Entity`]: it exposes its binding table, its
//! identifier slot and by-name access to member values. Records are shared
//! through [`Record`] handles so that cyclic graphs materialize into cyclic
//! object graphs.

use crate::descriptor::EntityDescriptor;
use crate::error::AssignError;
use crate::id::{RdfId, ResourceId};
use crate::value::Value;
use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a native type
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Downcasting support for `dyn Entity`
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A record the engine can marshal
///
/// # Example
///
/// ```
/// use rdfmap_core::{AssignError, Entity, EntityDescriptor, MemberDescriptor, RdfId, Value, ValueKind};
///
/// #[derive(Debug, Default)]
/// struct Tag {
///     id: RdfId,
///     label: Option<String>,
/// }
///
/// impl Entity for Tag {
///     fn descriptor() -> EntityDescriptor {
///         EntityDescriptor::new()
///             .class("http://example.org/Tag")
///             .member(MemberDescriptor::new("label", ValueKind::String).predicate("http://example.org/label"))
///     }
///
///     fn rdf_id(&self) -> Option<&RdfId> {
///         Some(&self.id)
///     }
///
///     fn get(&self, member: &str) -> Option<Value> {
///         match member {
///             "label" => self.label.clone().map(Value::from),
///             _ => None,
///         }
///     }
///
///     fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
///         match member {
///             "label" => self.label = Some(value.try_into()?),
///             other => return Err(AssignError::UnknownMember(other.to_string())),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Entity: AsAny + Send + Sync + fmt::Debug {
    /// Binding table for this type
    fn descriptor() -> EntityDescriptor
    where
        Self: Sized;

    /// Identifier slot; `None` means the type cannot carry an identifier
    fn rdf_id(&self) -> Option<&RdfId> {
        None
    }

    /// Current value of a member; `None` when unset
    fn get(&self, member: &str) -> Option<Value>;

    /// Store a value into a member
    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError>;
}

/// Handle on a mappable type
///
/// Concrete types are created through `Default`; abstract types (traits,
/// interfaces) are allocated as [`DynamicRecord`]s that satisfy their
/// declared member contract.
#[derive(Clone, Copy)]
pub struct EntityType {
    key: TypeKey,
    describe: fn() -> EntityDescriptor,
    create: Option<fn() -> Box<dyn Entity>>,
}

impl EntityType {
    /// Handle on a concrete type
    pub fn of<T: Entity + Default>() -> Self {
        fn create<T: Entity + Default>() -> Box<dyn Entity> {
            Box::new(T::default())
        }

        Self {
            key: TypeKey::of::<T>(),
            describe: T::descriptor,
            create: Some(create::<T>),
        }
    }

    /// Handle on an abstract type whose binding table is `describe`
    pub fn abstract_of<T: ?Sized + 'static>(describe: fn() -> EntityDescriptor) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            describe,
            create: None,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name
    }

    pub fn descriptor(&self) -> EntityDescriptor {
        (self.describe)()
    }

    /// Check if instances are synthesized stand-ins
    pub fn is_abstract(&self) -> bool {
        self.create.is_none()
    }

    /// Allocate a fresh, empty instance
    pub fn instantiate(&self) -> Box<dyn Entity> {
        match self.create {
            Some(create) => create(),
            None => Box::new(DynamicRecord::for_descriptor(&self.descriptor())),
        }
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EntityType {}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityType({})", self.key.name)
    }
}

/// Property-bag stand-in for abstract types
///
/// Accepts any value for a declared member. Collection members that were
/// never assigned read back as empty lists.
#[derive(Debug, Default)]
pub struct DynamicRecord {
    id: RdfId,
    values: HashMap<String, Value>,
    declared: HashSet<String>,
    collections: HashSet<String>,
}

impl DynamicRecord {
    pub fn for_descriptor(descriptor: &EntityDescriptor) -> Self {
        Self {
            id: RdfId::new(),
            values: HashMap::new(),
            declared: descriptor.members.iter().map(|m| m.name.clone()).collect(),
            collections: descriptor
                .members
                .iter()
                .filter(|m| m.collection)
                .map(|m| m.name.clone())
                .collect(),
        }
    }
}

impl Entity for DynamicRecord {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, member: &str) -> Option<Value> {
        match self.values.get(member) {
            Some(value) => Some(value.clone()),
            None if self.collections.contains(member) => Some(Value::List(Vec::new())),
            None => None,
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        if !self.declared.contains(member) {
            return Err(AssignError::UnknownMember(member.to_string()));
        }
        self.values.insert(member.to_string(), value);
        Ok(())
    }
}

pub(crate) struct RecordSlot {
    ty: EntityType,
    entity: Box<dyn Entity>,
}

/// Shared, lockable handle on a record
///
/// Clones share the same record; [`Record::ptr_eq`] tells whether two
/// handles point at the same one.
#[derive(Clone)]
pub struct Record(Arc<RwLock<RecordSlot>>);

impl Record {
    /// Wrap a typed record
    pub fn new<T: Entity + Default>(entity: T) -> Self {
        Self::from_parts(EntityType::of::<T>(), Box::new(entity))
    }

    pub(crate) fn from_parts(ty: EntityType, entity: Box<dyn Entity>) -> Self {
        Record(Arc::new(RwLock::new(RecordSlot { ty, entity })))
    }

    /// Type the record is currently an instance of
    pub fn entity_type(&self) -> EntityType {
        self.0.read().ty
    }

    pub fn ptr_eq(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Assigned identifier, if any
    pub fn id(&self) -> Option<ResourceId> {
        let slot = self.0.read();
        slot.entity.rdf_id().and_then(|id| id.get().cloned())
    }

    pub(crate) fn has_id_slot(&self) -> bool {
        self.0.read().entity.rdf_id().is_some()
    }

    /// Assign `id` if no identifier is held yet; returns the held identifier
    pub(crate) fn init_id(&self, f: impl FnOnce() -> ResourceId) -> Option<ResourceId> {
        let slot = self.0.read();
        slot.entity.rdf_id().map(|id| id.get_or_init(f).clone())
    }

    /// Borrow the record as `T`; `None` if it is some other type
    pub fn read<T: Entity>(&self) -> Option<MappedRwLockReadGuard<'_, T>> {
        RwLockReadGuard::try_map(self.0.read(), |slot| {
            (*slot.entity).as_any().downcast_ref::<T>()
        })
        .ok()
    }

    /// Mutably borrow the record as `T`; `None` if it is some other type
    pub fn write<T: Entity>(&self) -> Option<MappedRwLockWriteGuard<'_, T>> {
        RwLockWriteGuard::try_map(self.0.write(), |slot| {
            (*slot.entity).as_any_mut().downcast_mut::<T>()
        })
        .ok()
    }

    /// Check if the record currently is a `T`
    pub fn is<T: Entity>(&self) -> bool {
        (*self.0.read().entity).as_any().is::<T>()
    }

    pub fn get(&self, member: &str) -> Option<Value> {
        self.0.read().entity.get(member)
    }

    pub fn set(&self, member: &str, value: Value) -> Result<(), AssignError> {
        self.0.write().entity.set(member, value)
    }

    /// Swap in a more specific instance, keeping every handle valid
    pub(crate) fn replace(&self, ty: EntityType, entity: Box<dyn Entity>) {
        let mut slot = self.0.write();
        slot.ty = ty;
        slot.entity = entity;
    }
}

impl fmt::Debug for Record {
    // Members are not printed: a record may reach itself through them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.0.read();
        let id = slot.entity.rdf_id().and_then(|id| id.get());
        f.debug_struct("Record")
            .field("type", &slot.ty.key)
            .field("id", &id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MemberDescriptor, ValueKind};

    #[derive(Debug, Default)]
    struct Note {
        id: RdfId,
        text: Option<String>,
    }

    impl Entity for Note {
        fn descriptor() -> EntityDescriptor {
            EntityDescriptor::new()
                .class("http://example.org/Note")
                .member(MemberDescriptor::new("text", ValueKind::String))
        }

        fn rdf_id(&self) -> Option<&RdfId> {
            Some(&self.id)
        }

        fn get(&self, member: &str) -> Option<Value> {
            match member {
                "text" => self.text.clone().map(Value::from),
                _ => None,
            }
        }

        fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
            match member {
                "text" => self.text = Some(value.try_into()?),
                other => return Err(AssignError::UnknownMember(other.to_string())),
            }
            Ok(())
        }
    }

    trait Shape {}

    fn shape_descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("http://example.org/Shape")
            .member(MemberDescriptor::new("name", ValueKind::String))
            .member(MemberDescriptor::new("points", ValueKind::Int).collection())
    }

    #[test]
    fn test_record_access() {
        let record = Record::new(Note::default());
        record.set("text", Value::from("hello")).unwrap();
        assert_eq!(record.get("text"), Some(Value::from("hello")));
        assert_eq!(record.read::<Note>().unwrap().text.as_deref(), Some("hello"));
        assert!(record.is::<Note>());
        assert!(record.read::<DynamicRecord>().is_none());

        record.write::<Note>().unwrap().text = Some("bye".into());
        assert_eq!(record.get("text"), Some(Value::from("bye")));
    }

    #[test]
    fn test_record_identity() {
        let a = Record::new(Note::default());
        let b = a.clone();
        let c = Record::new(Note::default());
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a.id(), None);
        assert_eq!(
            a.init_id(|| ResourceId::iri("http://example.org/n1")),
            Some(ResourceId::iri("http://example.org/n1"))
        );
        assert_eq!(b.id(), Some(ResourceId::iri("http://example.org/n1")));
    }

    #[test]
    fn test_abstract_type_instantiates_dynamic_record() {
        let ty = EntityType::abstract_of::<dyn Shape>(shape_descriptor);
        assert!(ty.is_abstract());

        let mut shape = ty.instantiate();
        assert!(shape.rdf_id().is_some());
        assert_eq!(shape.get("points"), Some(Value::List(vec![])));
        assert_eq!(shape.get("name"), None);

        shape.set("name", Value::from("square")).unwrap();
        assert_eq!(shape.get("name"), Some(Value::from("square")));
        assert!(matches!(
            shape.set("color", Value::from("red")),
            Err(AssignError::UnknownMember(_))
        ));
    }

    #[test]
    fn test_type_keys() {
        assert_eq!(EntityType::of::<Note>(), EntityType::of::<Note>());
        assert_ne!(
            EntityType::of::<Note>(),
            EntityType::abstract_of::<dyn Shape>(shape_descriptor)
        );
        assert!(EntityType::of::<Note>().name().ends_with("Note"));
    }
}
