//! Record to graph
//!
//! Writes one record's direct members. Related records are written as their
//! identifier; their own triples come from marshalling them separately.

use crate::binding::MemberBinding;
use crate::engine::Engine;
use crate::entity::Record;
use crate::error::{MappingError, Result};
use crate::id::{DEFAULT_NAMESPACE, ResourceId, is_absolute_uri};
use crate::lazy::Reference;
use crate::literal::to_literal;
use crate::value::Value;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rdfmap_graph::{Graph, Term};
use rdfmap_vocab::rdf;
use sha2::{Digest, Sha256};

pub(crate) fn to_graph(engine: &Engine, record: &Record) -> Result<Graph> {
    let binding = engine.resolve_bindings(record.entity_type())?;
    let subject = assign_id(engine, record)?.to_term();

    let mut graph = Graph::new();
    for (prefix, namespace) in &binding.namespaces {
        graph.add_prefix(prefix, namespace);
    }
    graph.add_triple(
        subject.clone(),
        Term::iri(rdf::TYPE),
        Term::iri(&binding.class),
    );

    // Values are copied out first; no lock on the record is held while
    // related records are identified.
    let values: Vec<(&MemberBinding, Value)> = binding
        .members
        .iter()
        .filter_map(|member| record.get(&member.name).map(|value| (member, value)))
        .filter(|(_, value)| !value.is_empty())
        .collect();

    for (member, value) in values {
        let predicate = Term::iri(&member.predicate);
        match value {
            Value::List(items) => {
                let terms = items
                    .into_iter()
                    .map(|item| value_of(engine, member, item))
                    .collect::<Result<Vec<_>>>()?;
                if member.ordered {
                    graph.add_list(subject.clone(), predicate, terms);
                } else {
                    for term in terms {
                        graph.add_triple(subject.clone(), predicate.clone(), term);
                    }
                }
            }
            value => {
                let term = value_of(engine, member, value)?;
                graph.add_triple(subject.clone(), predicate, term);
            }
        }
    }

    tracing::debug!(subject = %subject, triples = graph.len(), "encoded record");
    Ok(graph)
}

/// Graph value of one member value (or collection element)
fn value_of(engine: &Engine, member: &MemberBinding, value: Value) -> Result<Term> {
    match value {
        Value::Ref(reference) => Ok(reference_id(engine, &reference)?.to_term()),
        Value::Resource(id) => Ok(id.to_term()),
        Value::Uri(uri) if !member.xsd_uri => Ok(Term::iri(uri)),
        Value::List(_) => Err(MappingError::invalid(format!(
            "member '{}' holds a nested collection",
            member.name
        ))),
        value if !engine.config().strong_typing => {
            let lexical = value.lexical().unwrap_or_default();
            Ok(Term::string(lexical))
        }
        value => to_literal(&value, member.language.as_deref()),
    }
}

/// Identifier of a referenced record, without resolving lazy references
fn reference_id(engine: &Engine, reference: &Reference) -> Result<ResourceId> {
    match reference {
        Reference::Eager(record) => assign_id(engine, record),
        Reference::Lazy(lazy) => Ok(lazy.resource_id()),
    }
}

pub(crate) fn assign_id(engine: &Engine, record: &Record) -> Result<ResourceId> {
    if let Some(id) = record.id() {
        return Ok(id);
    }

    let ty = record.entity_type();
    if !record.has_id_slot() {
        return Err(MappingError::invalid(format!(
            "type {} cannot carry a resource identifier",
            ty.name()
        )));
    }

    let binding = engine.resolve_bindings(ty)?;
    let id = match &binding.id_member {
        Some(id_member) => {
            let value = record
                .get(&id_member.member)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    MappingError::invalid(format!(
                        "identifying member '{}' of {} is not set",
                        id_member.member,
                        ty.name()
                    ))
                })?;
            id_from_value(engine, value, id_member.namespace.as_deref())?
        }
        None => random_id(),
    };

    record.init_id(|| id).ok_or_else(|| {
        MappingError::invalid(format!(
            "type {} cannot carry a resource identifier",
            ty.name()
        ))
    })
}

/// Identifier minted from the identifying member's value
///
/// URIs are used as they are; anything else is percent-encoded under
/// `namespace`.
fn id_from_value(engine: &Engine, value: Value, namespace: Option<&str>) -> Result<ResourceId> {
    match value {
        Value::Resource(id) => Ok(id),
        Value::Uri(uri) => Ok(ResourceId::iri(uri)),
        Value::Ref(reference) => reference_id(engine, &reference),
        Value::List(_) => Err(MappingError::invalid(
            "identifying member holds a collection",
        )),
        value => {
            let text = value.lexical().unwrap_or_default();
            if is_absolute_uri(&text) {
                return Ok(ResourceId::iri(text));
            }
            let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
            Ok(ResourceId::iri(format!(
                "{namespace}{}",
                utf8_percent_encode(&text, NON_ALPHANUMERIC)
            )))
        }
    }
}

/// Fresh identifier under the default namespace
fn random_id() -> ResourceId {
    let seed: [u8; 16] = rand::random();
    ResourceId::iri(format!(
        "{DEFAULT_NAMESPACE}{}",
        hex::encode(Sha256::digest(seed))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_id_from_plain_value_is_encoded() {
        let engine = Engine::new(EngineConfig::default());
        let id = id_from_value(&engine, Value::from("Jane Doe"), Some("http://example.org/people/"))
            .unwrap();
        assert_eq!(id.as_iri(), Some("http://example.org/people/Jane%20Doe"));

        let id = id_from_value(&engine, Value::Int(7), None).unwrap();
        assert_eq!(id.as_iri(), Some("urn:rdfmap:7"));
    }

    #[test]
    fn test_id_from_uri_value_is_verbatim() {
        let engine = Engine::new(EngineConfig::default());
        let id = id_from_value(&engine, Value::from("mailto:jane@example.org"), Some("http://x/"))
            .unwrap();
        assert_eq!(id.as_iri(), Some("mailto:jane@example.org"));
    }

    #[test]
    fn test_random_ids_differ() {
        let a = random_id();
        let b = random_id();
        assert_ne!(a, b);
        let iri = a.as_iri().unwrap();
        assert!(iri.starts_with(DEFAULT_NAMESPACE));
        assert_eq!(iri.len(), DEFAULT_NAMESPACE.len() + 64);
    }
}
