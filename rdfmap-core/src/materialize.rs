//! Graph to record
//!
//! Materialization of one resource:
//!
//! 1. A resource already under construction is returned as registered.
//! 2. A fresh instance is allocated, identified and registered.
//! 3. The resource is described; no triples means an empty, identified record.
//! 4. An asserted class mapping to a registered subtype refines the instance.
//! 5. Each mapped predicate's values are resolved and assigned.
//!
//! The construction entry is dropped on every exit path.

use crate::binding::{self, MemberBinding};
use crate::descriptor::ValueKind;
use crate::engine::Engine;
use crate::entity::{EntityType, Record};
use crate::error::{MappingError, Result, SourceError};
use crate::id::ResourceId;
use crate::lazy::{LazyRecord, Reference};
use crate::literal;
use crate::source::SharedSource;
use crate::value::Value;
use rdfmap_graph::{Graph, Term};
use rdfmap_vocab::rdf;
use std::collections::HashSet;

pub(crate) fn materialize(
    engine: &Engine,
    ty: EntityType,
    id: &ResourceId,
    source: &SharedSource,
) -> Result<Record> {
    if let Some(existing) = engine.construction().get(id) {
        tracing::debug!(id = %id, "resource under construction; reusing record");
        return Ok(existing);
    }

    let record = Record::from_parts(ty, ty.instantiate());
    if record.init_id(|| id.clone()).is_none() {
        return Err(MappingError::invalid(format!(
            "type {} cannot carry a resource identifier",
            ty.name()
        )));
    }
    let _entry = engine.construction().enter(id.clone(), record.clone());

    let graph = source.describe(id)?;
    let subject = id.to_term();
    if !graph.has_subject(&subject) {
        return Ok(record);
    }

    refine_type(engine, &record, ty, id, &graph, &subject);

    let binding = engine.resolve_bindings(record.entity_type())?;
    let resolver = Resolver {
        engine,
        source,
        graph: &graph,
        subject: &subject,
        id,
    };

    for predicate in graph.predicates_of(&subject) {
        let Some(member) = binding.member_for(predicate) else {
            continue;
        };

        let value = match resolver.resolve_member(member, graph.objects(&subject, predicate)) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(err @ (MappingError::AmbiguousValue { .. } | MappingError::InvalidMapping { .. })) => {
                return Err(err);
            }
            Err(err) => {
                return Err(MappingError::invalid_with(
                    format!("cannot resolve member '{}' of {}", member.name, id),
                    err,
                ));
            }
        };

        match record.set(&member.name, value) {
            Ok(()) => {}
            Err(err) if err.is_mismatch() => {
                tracing::warn!(
                    id = %id,
                    member = %member.name,
                    error = %err,
                    "probable type mismatch; member left unset"
                );
            }
            Err(err) => {
                return Err(MappingError::invalid(format!(
                    "cannot assign member '{}' of {}: {}",
                    member.name, id, err
                )));
            }
        }
    }

    Ok(record)
}

/// Swap the instance for the most specific registered subtype the resource asserts
fn refine_type(
    engine: &Engine,
    record: &Record,
    requested: EntityType,
    id: &ResourceId,
    graph: &Graph,
    subject: &Term,
) {
    let mut refined: Option<EntityType> = None;

    for class in graph
        .objects(subject, rdf::TYPE)
        .into_iter()
        .filter_map(Term::as_iri)
    {
        match engine.type_for_class(class) {
            None => {
                let err = MappingError::UnknownType {
                    class: class.to_string(),
                };
                tracing::debug!(id = %id, error = %err, "keeping requested type");
            }
            Some(candidate) if candidate == requested => {}
            Some(candidate) if binding::extends(candidate, requested) => {
                if refined.is_none_or(|current| binding::extends(candidate, current)) {
                    refined = Some(candidate);
                }
            }
            Some(candidate) => {
                tracing::debug!(
                    id = %id,
                    asserted = candidate.name(),
                    requested = requested.name(),
                    "asserted type is not a subtype of the requested type"
                );
            }
        }
    }

    let Some(refined) = refined else {
        return;
    };
    let entity = refined.instantiate();
    match entity.rdf_id() {
        Some(slot) => {
            let _ = slot.set(id.clone());
        }
        None => {
            tracing::warn!(id = %id, ty = refined.name(), "refined type cannot carry an identifier; keeping requested type");
            return;
        }
    }
    record.replace(refined, entity);
    tracing::debug!(id = %id, from = requested.name(), to = refined.name(), "refined record type");
}

/// Resolves the graph values of one resource into member values
struct Resolver<'a> {
    engine: &'a Engine,
    source: &'a SharedSource,
    /// Description of the resource being materialized
    graph: &'a Graph,
    subject: &'a Term,
    id: &'a ResourceId,
}

impl Resolver<'_> {
    fn resolve_member(&self, member: &MemberBinding, objects: Vec<&Term>) -> Result<Option<Value>> {
        if member.collection {
            return self.resolve_collection(member, objects).map(Some);
        }

        let candidates = self.filter_candidates(member, objects);
        match candidates.as_slice() {
            [] => Ok(None),
            [single] => self.resolve_single(member, single),
            many => Err(MappingError::AmbiguousValue {
                member: member.name.clone(),
                count: many.len(),
            }),
        }
    }

    /// Narrow the values of a single-valued member
    ///
    /// Values of the wrong structural kind are dropped. Among literals, with
    /// language awareness off, untagged values win, then values in the
    /// default language; with it on, only values in the member's language
    /// are kept.
    fn filter_candidates<'t>(&self, member: &MemberBinding, objects: Vec<&'t Term>) -> Vec<&'t Term> {
        let mut values = dedupe(objects);
        values.retain(|term| match &member.kind {
            kind if kind.is_scalar() => term.is_literal(),
            ValueKind::Ref(_) | ValueKind::Resource => term.is_resource(),
            _ => true,
        });

        if values.iter().any(|term| term.is_resource()) {
            return values;
        }

        let config = self.engine.config();
        if config.enable_lang_aware {
            let lang = member.language.as_deref();
            values.retain(|term| term.language() == lang);
            return values;
        }

        if values.iter().all(|term| term.language().is_none()) {
            return values;
        }
        let untagged: Vec<&Term> = values
            .iter()
            .copied()
            .filter(|term| term.language().is_none())
            .collect();
        if !untagged.is_empty() {
            return untagged;
        }
        let default_lang: Vec<&Term> = values
            .iter()
            .copied()
            .filter(|term| term.language() == Some(config.default_language.as_str()))
            .collect();
        if !default_lang.is_empty() {
            return default_lang;
        }
        values
    }

    fn resolve_collection(&self, member: &MemberBinding, objects: Vec<&Term>) -> Result<Value> {
        let mut values = dedupe(objects);
        if self.engine.config().enable_lang_aware {
            let lang = member.language.as_deref();
            values.retain(|term| !term.is_literal() || term.language() == lang);
        }

        let mut items = Vec::new();
        for term in values {
            if term.is_nil() {
                continue;
            }
            if term.is_resource() {
                if let Some(elements) = self.list_elements(member, term)? {
                    for element in &elements {
                        items.push(self.element(member, element)?);
                    }
                    continue;
                }
            }
            items.push(self.element(member, term)?);
        }

        Ok(Value::List(items))
    }

    fn element(&self, member: &MemberBinding, term: &Term) -> Result<Value> {
        self.resolve_single(member, term)?.ok_or_else(|| {
            MappingError::invalid(format!(
                "cannot convert collection element {} of member '{}'",
                term, member.name
            ))
        })
    }

    /// Items of the RDF collection headed by `head`, if it is one
    ///
    /// The resource description is checked first. Otherwise the source is
    /// asked for the list neighbourhood with a construct query; a source that
    /// cannot run queries has no lists beyond its descriptions.
    fn list_elements(&self, member: &MemberBinding, head: &Term) -> Result<Option<Vec<Term>>> {
        if self.graph.is_list(head) {
            return Ok(self.graph.list_items(head));
        }
        if !head.is_blank() {
            return Ok(None);
        }

        let dialect = self.source.dialect();
        let query = dialect.list_construct_query(self.id, &member.predicate);
        let fetched = match self.source.graph_query(&query) {
            Ok(graph) => graph,
            Err(SourceError::Unsupported(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        // Blank labels may differ between requests; take the head the query returned.
        let fetched_head = if fetched.is_list(head) {
            Some(head.clone())
        } else {
            fetched
                .objects(self.subject, &member.predicate)
                .into_iter()
                .find(|candidate| fetched.is_list(candidate))
                .cloned()
        };
        let Some(fetched_head) = fetched_head else {
            return Ok(None);
        };

        if member.ordered && dialect.supports_stable_bnode_ids() {
            return self.walk_list(&fetched_head).map(Some);
        }
        Ok(fetched.list_items(&fetched_head))
    }

    /// Walk an RDF collection cell by cell through `describe`
    fn walk_list(&self, head: &Term) -> Result<Vec<Term>> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut cursor = head.clone();

        while !cursor.is_nil() && visited.insert(cursor.clone()) {
            let Some(cell) = ResourceId::from_term(&cursor) else {
                break;
            };
            let graph = self.source.describe(&cell)?;
            if let Some(item) = graph.object(&cursor, rdf::FIRST) {
                items.push(item.clone());
            }
            match graph.object(&cursor, rdf::REST) {
                Some(next) => cursor = next.clone(),
                None => break,
            }
        }

        Ok(items)
    }

    fn resolve_single(&self, member: &MemberBinding, term: &Term) -> Result<Option<Value>> {
        if term.is_literal() {
            return literal::from_literal(term, &member.kind);
        }
        let Some(node) = ResourceId::from_term(term) else {
            return Ok(None);
        };

        match &member.kind {
            ValueKind::Resource => Ok(Some(Value::Resource(node))),
            ValueKind::Uri => match node {
                ResourceId::Iri(iri) => Ok(Some(Value::Uri(iri.to_string()))),
                blank => self.lenient(format!(
                    "blank node {} cannot fill URI member '{}'",
                    blank, member.name
                )),
            },
            ValueKind::Ref(Some(target)) => self.related(member, *target, node),
            ValueKind::Ref(None) | ValueKind::Any => match self.type_of(&node, term) {
                Some(target) => self.related(member, target, node),
                None if member.kind == ValueKind::Any => Ok(Some(Value::Resource(node))),
                None => self.lenient(format!(
                    "no registered type for {} (member '{}')",
                    node, member.name
                )),
            },
            kind => self.lenient(format!(
                "{} cannot fill {} member '{}'",
                node,
                kind.name(),
                member.name
            )),
        }
    }

    /// Registered type of a node, from its asserted classes
    fn type_of(&self, node: &ResourceId, term: &Term) -> Option<EntityType> {
        let from_graph = |graph: &Graph| {
            graph
                .objects(term, rdf::TYPE)
                .into_iter()
                .filter_map(Term::as_iri)
                .find_map(|class| self.engine.type_for_class(class))
        };

        from_graph(self.graph).or_else(|| match self.source.describe(node) {
            Ok(graph) => from_graph(&graph),
            Err(err) => {
                tracing::debug!(node = %node, error = %err, "cannot describe node to find its type");
                None
            }
        })
    }

    fn related(&self, member: &MemberBinding, target: EntityType, node: ResourceId) -> Result<Option<Value>> {
        if member.lazy {
            let lazy = LazyRecord::new(self.engine.clone(), target, node, self.source.clone());
            return Ok(Some(Value::Ref(Reference::Lazy(lazy))));
        }

        match materialize(self.engine, target, &node, self.source) {
            Ok(record) => Ok(Some(Value::from(record))),
            Err(err) if self.engine.config().strict_mode => Err(MappingError::invalid_with(
                format!("cannot materialize {} for member '{}'", node, member.name),
                err,
            )),
            Err(err) => {
                tracing::warn!(
                    node = %node,
                    member = %member.name,
                    error = %err,
                    "related record could not be materialized; member left unset"
                );
                Ok(None)
            }
        }
    }

    /// Unresolvable reference: an error in strict mode, nothing otherwise
    fn lenient(&self, message: String) -> Result<Option<Value>> {
        if self.engine.config().strict_mode {
            return Err(MappingError::invalid(message));
        }
        tracing::warn!(id = %self.id, "{message}; member left unset");
        Ok(None)
    }
}

fn dedupe(objects: Vec<&Term>) -> Vec<&Term> {
    let mut seen = HashSet::new();
    objects.into_iter().filter(|term| seen.insert(*term)).collect()
}
