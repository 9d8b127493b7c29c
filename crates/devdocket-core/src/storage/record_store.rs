//! Namespaced list persistence.
//!
//! A [`RecordStore`] moves opaque blobs in and out of a namespace slot. The
//! typed helpers [`load_records`] and [`save_records`] sit on top and own the
//! JSON encoding plus the "missing or corrupt means empty" recovery rule.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StorageError;

/// Durable (or session-scoped) key-value slot per namespace.
pub trait RecordStore {
    /// Raw blob for `namespace`, `None` if nothing was ever written.
    fn read_blob(&self, namespace: &str) -> Result<Option<String>, StorageError>;

    /// Replace the whole blob for `namespace`.
    fn write_blob(&self, namespace: &str, blob: &str) -> Result<(), StorageError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn read_blob(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        (**self).read_blob(namespace)
    }

    fn write_blob(&self, namespace: &str, blob: &str) -> Result<(), StorageError> {
        (**self).write_blob(namespace, blob)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn read_blob(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        (**self).read_blob(namespace)
    }

    fn write_blob(&self, namespace: &str, blob: &str) -> Result<(), StorageError> {
        (**self).write_blob(namespace, blob)
    }
}

/// Session-only store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `namespace` starts out holding `records`.
    ///
    /// # Errors
    /// Returns an error if the records cannot be encoded.
    pub fn seeded<T: Serialize>(namespace: &str, records: &[T]) -> Result<Self, StorageError> {
        let store = Self::new();
        save_records(&store, namespace, records)?;
        Ok(store)
    }
}

impl RecordStore for MemoryStore {
    fn read_blob(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(namespace).cloned())
    }

    fn write_blob(&self, namespace: &str, blob: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(namespace.to_string(), blob.to_string());
        Ok(())
    }
}

/// Decode a stored list, surfacing corruption as [`StorageError::Parse`].
pub(crate) fn try_load_records<T, S>(store: &S, namespace: &str) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let Some(blob) = store.read_blob(namespace)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&blob).map_err(|source| StorageError::Parse {
        namespace: namespace.to_string(),
        source,
    })
}

/// Load the ordered list for `namespace`.
///
/// First run and unreadable blobs both yield an empty list; the failure is
/// logged and never reaches the caller.
pub fn load_records<T, S>(store: &S, namespace: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match try_load_records(store, namespace) {
        Ok(records) => {
            debug!(namespace, count = records.len(), "loaded records");
            records
        }
        Err(err) => {
            warn!(namespace, error = %err, "discarding unreadable records");
            Vec::new()
        }
    }
}

/// Overwrite the stored list for `namespace` with `records`.
///
/// # Errors
/// Returns an error if encoding or the underlying write fails.
pub fn save_records<T, S>(store: &S, namespace: &str, records: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: RecordStore + ?Sized,
{
    let blob = serde_json::to_string(records).map_err(|source| StorageError::Serialize {
        namespace: namespace.to_string(),
        source,
    })?;
    store.write_blob(namespace, &blob)?;
    debug!(namespace, count = records.len(), "saved records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u64,
        label: String,
        flag: bool,
    }

    fn rows(n: u64) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                id: i,
                label: format!("row {i}"),
                flag: i % 2 == 0,
            })
            .collect()
    }

    #[test]
    fn missing_namespace_loads_empty() {
        let store = MemoryStore::new();
        let loaded: Vec<Row> = load_records(&store, "nothing_here");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let db = Database::open_memory().unwrap();
        db.write_blob("broken", "{not json").unwrap();
        let loaded: Vec<Row> = load_records(&db, "broken");
        assert!(loaded.is_empty());
        assert!(matches!(
            try_load_records::<Row, _>(&db, "broken"),
            Err(StorageError::Parse { .. })
        ));
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let store = MemoryStore::new();
        store.write_blob("ns", r#"{"id": 1}"#).unwrap();
        let loaded: Vec<Row> = load_records(&store, "ns");
        assert!(loaded.is_empty());
    }

    #[test]
    fn round_trip_empty_singleton_and_hundred() {
        let db = Database::open_memory().unwrap();
        for n in [0, 1, 100] {
            let original = rows(n);
            save_records(&db, "rows", &original).unwrap();
            let loaded: Vec<Row> = load_records(&db, "rows");
            assert_eq!(loaded, original, "round trip of {n} rows");
        }
    }

    #[test]
    fn seeded_store_starts_with_records() {
        let store = MemoryStore::seeded("seeded", &rows(3)).unwrap();
        assert_eq!(load_records::<Row, _>(&store, "seeded"), rows(3));
        assert!(load_records::<Row, _>(&store, "other").is_empty());
    }

    #[test]
    fn namespaces_are_isolated() {
        let store = MemoryStore::new();
        save_records(&store, "a", &rows(2)).unwrap();
        save_records(&store, "b", &rows(5)).unwrap();
        assert_eq!(load_records::<Row, _>(&store, "a").len(), 2);
        assert_eq!(load_records::<Row, _>(&store, "b").len(), 5);
    }

    proptest! {
        #[test]
        fn round_trip_preserves_order_and_fields(labels in proptest::collection::vec(".{0,24}", 0..40)) {
            let original: Vec<Row> = labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| Row { id: i as u64, label, flag: i % 3 == 0 })
                .collect();
            let store = MemoryStore::new();
            save_records(&store, "prop", &original).unwrap();
            let loaded: Vec<Row> = load_records(&store, "prop");
            prop_assert_eq!(loaded, original);
        }
    }
}
