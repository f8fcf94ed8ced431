//! Prefix table
//!
//! Maps short prefixes to namespace URIs. Each type's declarations are
//! registered at most once. A prefix re-declared under a different namespace
//! replaces the earlier mapping; the overwrite is logged.

use crate::entity::TypeKey;
use parking_lot::{Mutex, RwLock};
use rdfmap_vocab::prefixes::WELL_KNOWN;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug)]
pub struct NamespaceRegistry {
    prefixes: RwLock<BTreeMap<String, String>>,
    registered: Mutex<HashSet<TypeKey>>,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self {
            prefixes: RwLock::new(
                WELL_KNOWN
                    .iter()
                    .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
                    .collect(),
            ),
            registered: Mutex::new(HashSet::new()),
        }
    }
}

impl NamespaceRegistry {
    /// Registry seeded with the well-known prefixes (rdf, rdfs, xsd, owl)
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `prefix` to `uri`; last write wins
    pub fn add(&self, prefix: &str, uri: &str) {
        let previous = self
            .prefixes
            .write()
            .insert(prefix.to_string(), uri.to_string());
        if let Some(previous) = previous.filter(|p| p != uri) {
            tracing::warn!(
                prefix,
                previous = %previous,
                namespace = uri,
                "namespace prefix redeclared; later declaration wins"
            );
        }
    }

    /// Register a type's declarations unless that type was registered before
    ///
    /// Returns `true` if the declarations were added by this call.
    pub fn register_once(&self, ty: TypeKey, decls: &[(String, String)]) -> bool {
        if !self.registered.lock().insert(ty) {
            return false;
        }
        for (prefix, uri) in decls {
            self.add(prefix, uri);
        }
        true
    }

    pub fn get(&self, prefix: &str) -> Option<String> {
        self.prefixes.read().get(prefix).cloned()
    }

    /// Expand a compact IRI (`foaf:name`) using the registered prefixes
    ///
    /// Anything that does not start with a known prefix is returned unchanged.
    pub fn expand(&self, iri: &str) -> String {
        let Some((prefix, local)) = iri.split_once(':') else {
            return iri.to_string();
        };
        if local.starts_with("//") {
            return iri.to_string();
        }
        match self.prefixes.read().get(prefix) {
            Some(ns) => format!("{ns}{local}"),
            None => iri.to_string(),
        }
    }

    /// Copy of the current prefix table
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.prefixes.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn test_well_known_seeded() {
        let registry = NamespaceRegistry::new();
        assert_eq!(
            registry.expand("rdf:type"),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(
            registry.expand("http://example.org/x"),
            "http://example.org/x"
        );
        assert_eq!(registry.expand("unknown:x"), "unknown:x");
    }

    #[test]
    fn test_register_once_is_idempotent() {
        let registry = NamespaceRegistry::new();
        let decls = vec![("ex".to_string(), "http://example.org/".to_string())];
        assert!(registry.register_once(TypeKey::of::<A>(), &decls));
        assert!(!registry.register_once(TypeKey::of::<A>(), &decls));
        assert_eq!(registry.expand("ex:thing"), "http://example.org/thing");
    }

    #[test]
    fn test_last_write_wins() {
        let registry = NamespaceRegistry::new();
        registry.register_once(
            TypeKey::of::<A>(),
            &[("ex".to_string(), "http://a.example/".to_string())],
        );
        registry.register_once(
            TypeKey::of::<B>(),
            &[("ex".to_string(), "http://b.example/".to_string())],
        );
        assert_eq!(registry.get("ex").as_deref(), Some("http://b.example/"));
    }
}
