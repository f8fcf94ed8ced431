//! Type metadata resolution
//!
//! Turns an [`EntityDescriptor`] into a [`TypeBinding`]: class and predicates
//! expanded to full IRIs, inherited members merged, transient and unmapped
//! members dropped.

use crate::config::EngineConfig;
use crate::descriptor::{IdMember, MemberDescriptor, ValueKind};
use crate::entity::EntityType;
use crate::error::{MappingError, Result};
use crate::id::DEFAULT_NAMESPACE;
use crate::namespace::NamespaceRegistry;
use std::collections::HashMap;

/// A mapped member with its expanded predicate
#[derive(Clone, Debug)]
pub struct MemberBinding {
    pub name: String,
    pub kind: ValueKind,
    pub predicate: String,
    pub collection: bool,
    pub ordered: bool,
    pub language: Option<String>,
    pub lazy: bool,
    pub xsd_uri: bool,
}

/// Resolved mapping metadata of a type
#[derive(Clone, Debug)]
pub struct TypeBinding {
    pub ty: EntityType,
    /// Expanded class IRI
    pub class: String,
    /// Prefix declarations of the type and its inherited parents
    pub namespaces: Vec<(String, String)>,
    /// Identifying member; its namespace is expanded
    pub id_member: Option<IdMember>,
    pub members: Vec<MemberBinding>,
    by_predicate: HashMap<String, usize>,
}

impl TypeBinding {
    /// Member bound to an expanded predicate
    pub fn member_for(&self, predicate: &str) -> Option<&MemberBinding> {
        self.by_predicate.get(predicate).map(|&idx| &self.members[idx])
    }

    pub fn member(&self, name: &str) -> Option<&MemberBinding> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Resolve the binding of `ty`
///
/// Registers the namespace declarations of `ty` (and of the parents it
/// inherits from) on first use.
pub(crate) fn resolve(
    ty: EntityType,
    config: &EngineConfig,
    namespaces: &NamespaceRegistry,
) -> Result<TypeBinding> {
    let descriptor = ty.descriptor();

    let class = descriptor.class.clone().ok_or_else(|| {
        MappingError::invalid(format!("type {} has no class binding", ty.name()))
    })?;

    if ty.instantiate().rdf_id().is_none() {
        return Err(MappingError::invalid(format!(
            "type {} cannot carry a resource identifier",
            ty.name()
        )));
    }

    if config.enforce_entity_marker && !descriptor.entity_marker {
        return Err(MappingError::invalid(format!(
            "type {} is not marked as an entity",
            ty.name()
        )));
    }

    namespaces.register_once(ty.key(), &descriptor.namespaces);
    let mut declared_ns = descriptor.namespaces.clone();

    // Parent members first so the child's own declarations override them.
    let mut declared: Vec<MemberDescriptor> = Vec::new();
    if descriptor.inherit {
        let mut visited = vec![ty];
        for parent in &descriptor.parents {
            collect_inherited(*parent, namespaces, &mut visited, &mut declared, &mut declared_ns);
        }
    }
    for member in descriptor.members {
        declared.retain(|m| m.name != member.name);
        declared.push(member);
    }

    let class = namespaces.expand(&class);
    let base = namespace_of(&class);

    let mut members = Vec::new();
    let mut by_predicate = HashMap::new();
    for member in declared.into_iter().filter(|m| !m.transient) {
        let predicate = match &member.predicate {
            Some(p) => namespaces.expand(p),
            None if config.infer_missing_bindings => format!("{base}{}", member.name),
            None => continue,
        };
        by_predicate.entry(predicate.clone()).or_insert(members.len());
        members.push(MemberBinding {
            name: member.name,
            kind: member.kind,
            predicate,
            collection: member.collection,
            ordered: member.ordered,
            language: member.language,
            lazy: member.lazy,
            xsd_uri: member.xsd_uri,
        });
    }

    let id_member = descriptor.id_member.map(|id| IdMember {
        namespace: id.namespace.map(|ns| namespaces.expand(&ns)),
        member: id.member,
    });

    tracing::debug!(
        ty = ty.name(),
        class = %class,
        members = members.len(),
        "resolved type binding"
    );

    Ok(TypeBinding {
        ty,
        class,
        namespaces: declared_ns,
        id_member,
        members,
        by_predicate,
    })
}

fn collect_inherited(
    ty: EntityType,
    namespaces: &NamespaceRegistry,
    visited: &mut Vec<EntityType>,
    members: &mut Vec<MemberDescriptor>,
    declared_ns: &mut Vec<(String, String)>,
) {
    if visited.contains(&ty) {
        return;
    }
    visited.push(ty);

    let descriptor = ty.descriptor();
    for parent in &descriptor.parents {
        collect_inherited(*parent, namespaces, visited, members, declared_ns);
    }

    namespaces.register_once(ty.key(), &descriptor.namespaces);
    declared_ns.extend(descriptor.namespaces);
    for member in descriptor.members {
        members.retain(|m| m.name != member.name);
        members.push(member);
    }
}

/// Namespace part of an IRI (through the last `#` or `/`)
///
/// Falls back to the default namespace when the IRI has neither.
pub(crate) fn namespace_of(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(idx) => &iri[..=idx],
        None => DEFAULT_NAMESPACE,
    }
}

/// Check if `ty` is `ancestor` or declares it as a (transitive) parent
pub(crate) fn extends(ty: EntityType, ancestor: EntityType) -> bool {
    fn walk(ty: EntityType, ancestor: EntityType, seen: &mut Vec<EntityType>) -> bool {
        if ty == ancestor {
            return true;
        }
        if seen.contains(&ty) {
            return false;
        }
        seen.push(ty);
        ty.descriptor()
            .parents
            .into_iter()
            .any(|parent| walk(parent, ancestor, seen))
    }

    walk(ty, ancestor, &mut Vec::new())
}
