//! Declarative binding tables
//!
//! Every mappable type hands the engine an [`EntityDescriptor`] describing its
//! class, namespace declarations, identifying member and mapped members. The
//! engine resolves descriptors into [`TypeBinding`](crate::TypeBinding)s once
//! per type and caches the result.

use crate::entity::EntityType;

/// Native kind a member holds
#[derive(Clone, Debug, PartialEq)]
pub enum ValueKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    DateTime,
    /// URI reference held as text
    Uri,
    /// Raw resource identifier (IRI or blank node)
    Resource,
    /// Related record, optionally of a declared type
    ///
    /// With no declared type the target is picked from the node's asserted
    /// `rdf:type`.
    Ref(Option<EntityType>),
    /// Anything; literals decode by datatype, nodes become related records
    Any,
}

impl ValueKind {
    /// Related record of type `ty`
    pub fn entity(ty: EntityType) -> Self {
        ValueKind::Ref(Some(ty))
    }

    /// Check if a raw lexical string is acceptable for this kind
    pub fn accepts_string(&self) -> bool {
        matches!(self, ValueKind::String | ValueKind::Any)
    }

    /// Check if this kind holds a related record
    pub fn is_ref(&self) -> bool {
        matches!(self, ValueKind::Ref(_))
    }

    /// Check if this kind is a literal scalar
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            ValueKind::Uri | ValueKind::Resource | ValueKind::Ref(_) | ValueKind::Any
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Byte => "i8",
            ValueKind::Short => "i16",
            ValueKind::Int => "i32",
            ValueKind::Long => "i64",
            ValueKind::Float => "f32",
            ValueKind::Double => "f64",
            ValueKind::Char => "char",
            ValueKind::String => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::Uri => "uri",
            ValueKind::Resource => "resource",
            ValueKind::Ref(_) => "record",
            ValueKind::Any => "any",
        }
    }
}

/// One member of a mappable type
#[derive(Clone, Debug)]
pub struct MemberDescriptor {
    pub name: String,
    pub kind: ValueKind,
    /// Explicit predicate, compact (`foaf:name`) or expanded
    pub predicate: Option<String>,
    /// Holds several values
    pub collection: bool,
    /// Collection order is significant and written as an RDF collection
    pub ordered: bool,
    /// Language tag for string values
    pub language: Option<String>,
    /// Related records are resolved on first access
    pub lazy: bool,
    /// Excluded from mapping
    pub transient: bool,
    /// URI values are written as `xsd:anyURI` literals instead of nodes
    pub xsd_uri: bool,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            predicate: None,
            collection: false,
            ordered: false,
            language: None,
            lazy: false,
            transient: false,
            xsd_uri: false,
        }
    }

    /// Bind to an explicit predicate
    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Mark as multi-valued (unordered)
    pub fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    /// Mark as an ordered list
    pub fn list(mut self) -> Self {
        self.collection = true;
        self.ordered = true;
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn xsd_uri(mut self) -> Self {
        self.xsd_uri = true;
        self
    }
}

/// Identifying member and the namespace its values are minted under
#[derive(Clone, Debug, PartialEq)]
pub struct IdMember {
    pub member: String,
    pub namespace: Option<String>,
}

/// Binding table of a mappable type
#[derive(Clone, Debug, Default)]
pub struct EntityDescriptor {
    /// Class IRI, compact or expanded
    pub class: Option<String>,
    /// Prefix declarations `(prefix, namespace)`
    pub namespaces: Vec<(String, String)>,
    /// Carries the persistence marker
    pub entity_marker: bool,
    /// Merge members declared by `parents`
    pub inherit: bool,
    /// Supertypes; also decides which refinements are compatible
    pub parents: Vec<EntityType>,
    pub id_member: Option<IdMember>,
    pub members: Vec<MemberDescriptor>,
}

impl EntityDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.push((prefix.into(), uri.into()));
        self
    }

    /// Attach the persistence marker
    pub fn entity(mut self) -> Self {
        self.entity_marker = true;
        self
    }

    pub fn parent(mut self, parent: EntityType) -> Self {
        self.parents.push(parent);
        self
    }

    /// Opt into merging members declared by the parents
    pub fn inherit(mut self) -> Self {
        self.inherit = true;
        self
    }

    pub fn id_member(mut self, member: impl Into<String>) -> Self {
        self.id_member = Some(IdMember {
            member: member.into(),
            namespace: None,
        });
        self
    }

    /// Identifying member whose values are minted under `namespace`
    pub fn id_member_in(mut self, member: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.id_member = Some(IdMember {
            member: member.into(),
            namespace: Some(namespace.into()),
        });
        self
    }

    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Look up a declared member by name
    pub fn find(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }
}
