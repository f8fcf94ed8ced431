//! Construction registry
//!
//! Records currently being materialized, keyed by resource. A second request
//! for a resource that is still under construction gets the registered
//! (partially populated) record back, which is what breaks reference cycles.
//! Entries live exactly as long as their [`ConstructionGuard`].

use crate::entity::Record;
use crate::id::ResourceId;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ConstructionRegistry {
    in_progress: Mutex<HashMap<ResourceId, Record>>,
}

impl ConstructionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record under construction for `id`, if any
    pub fn get(&self, id: &ResourceId) -> Option<Record> {
        self.in_progress.lock().get(id).cloned()
    }

    /// Register `record` as under construction for `id`
    ///
    /// The entry is removed when the returned guard drops.
    pub fn enter(&self, id: ResourceId, record: Record) -> ConstructionGuard<'_> {
        self.in_progress.lock().insert(id.clone(), record);
        ConstructionGuard { registry: self, id }
    }

    pub fn len(&self) -> usize {
        self.in_progress.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_progress.lock().is_empty()
    }
}

/// Removes its entry from the registry on drop
#[must_use = "the entry is removed as soon as the guard drops"]
pub struct ConstructionGuard<'a> {
    registry: &'a ConstructionRegistry,
    id: ResourceId,
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        self.registry.in_progress.lock().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::DynamicRecord;
    use crate::entity::{Entity, EntityType};

    fn record() -> Record {
        Record::from_parts(
            EntityType::abstract_of::<DynamicRecord>(DynamicRecord::descriptor),
            Box::new(DynamicRecord::default()),
        )
    }

    #[test]
    fn test_guard_removes_entry() {
        let registry = ConstructionRegistry::new();
        let id = ResourceId::iri("http://example.org/a");
        let rec = record();
        {
            let _guard = registry.enter(id.clone(), rec.clone());
            assert!(registry.get(&id).unwrap().ptr_eq(&rec));
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.get(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_guard_removes_entry_on_unwind() {
        let registry = ConstructionRegistry::new();
        let id = ResourceId::iri("http://example.org/a");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = registry.enter(id.clone(), record());
            panic!("materialization failed");
        }));
        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
