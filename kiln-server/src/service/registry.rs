//! Build record registry
//!
//! Owns every record this server knows about, keyed by build id. The
//! registry is a plain field of the build service rather than process-wide
//! state, so independent services (one per test, usually) never observe
//! each other's builds. Records are retained for the lifetime of the
//! process; nothing evicts them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use kiln_core::domain::build::BuildRecord;

/// In-memory id-to-record map shared with supervision tasks.
///
/// A coarse lock is enough here: writes happen once per submission and
/// reads are cheap handle clones.
#[derive(Default)]
pub struct BuildRegistry {
    records: Mutex<HashMap<Uuid, Arc<Mutex<BuildRecord>>>>,
}

impl BuildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record under its id and returns the shared handle.
    pub fn insert(&self, record: BuildRecord) -> Arc<Mutex<BuildRecord>> {
        let id = record.id;
        let handle = Arc::new(Mutex::new(record));
        self.records.lock().unwrap().insert(id, handle.clone());
        handle
    }

    /// Looks up the shared handle for a build id.
    pub fn get(&self, id: Uuid) -> Option<Arc<Mutex<BuildRecord>>> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    /// Number of records currently retained.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::dto::build::BuildRequest;

    #[test]
    fn test_insert_then_get_shares_one_record() {
        let registry = BuildRegistry::new();
        let id = Uuid::new_v4();
        let handle = registry.insert(BuildRecord::new(id, BuildRequest::default()));

        handle.lock().unwrap().push_chunk("hello".to_string());

        let seen = registry.get(id).expect("record should be registered");
        assert_eq!(seen.lock().unwrap().logs, vec!["hello"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let registry = BuildRegistry::new();
        assert!(registry.get(Uuid::new_v4()).is_none());
        assert!(registry.is_empty());
    }
}
