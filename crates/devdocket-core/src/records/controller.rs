//! Generic create/update/delete/filter over one persisted list.
//!
//! Every mutation is staged on a copy of the list, written to the store as a
//! whole, and only then committed in memory. A failed write leaves both the
//! store and the in-memory list as they were.

use chrono::Utc;
use tracing::debug;

use super::query::Query;
use super::{Record, RecordId};
use crate::error::{CoreError, Result};
use crate::storage::{load_records, save_records, RecordStore};

/// In-memory list for one widget, mirrored to its namespace in `S`.
pub struct CrudController<R: Record, S: RecordStore> {
    store: S,
    records: Vec<R>,
}

impl<R: Record, S: RecordStore> CrudController<R, S> {
    /// Load the widget's list from `store`. Missing or corrupt data mounts empty.
    pub fn mount(store: S) -> Self {
        let records = load_records(&store, R::NAMESPACE);
        Self { store, records }
    }

    /// All records, newest first.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate `draft`, then prepend a new record and persist.
    ///
    /// # Errors
    /// [`CoreError::Validation`] if a required field is missing (nothing is
    /// changed), or a storage error if the write fails.
    pub fn add(&mut self, draft: R::Draft) -> Result<&R> {
        R::validate(&draft)?;
        let now = Utc::now();
        let last = self.records.iter().map(|r| r.id()).max();
        let record = R::create(RecordId::next_after(last, now), now, draft);
        debug!(namespace = R::NAMESPACE, id = %record.id(), "adding record");

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next)?;
        Ok(&self.records[0])
    }

    /// Replace the mutable fields of `id`, keeping its id and creation time.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] if `id` is absent, [`CoreError::Validation`] if
    /// the draft is incomplete, or a storage error if the write fails.
    pub fn update(&mut self, id: RecordId, draft: R::Draft) -> Result<&R> {
        let index = self.position(id)?;
        R::validate(&draft)?;
        let mut next = self.records.clone();
        next[index].apply(draft, Utc::now());
        self.commit(next)?;
        Ok(&self.records[index])
    }

    /// Remove `id` and persist. Absent ids are a no-op returning `None`.
    ///
    /// Callers holding an [`EditSession`] on the removed id must clear it.
    ///
    /// # Errors
    /// Returns a storage error if the write fails.
    pub fn remove(&mut self, id: RecordId) -> Result<Option<R>> {
        let Ok(index) = self.position(id) else {
            return Ok(None);
        };
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Flip a status field of `id` in place.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] if `id` is absent, or a storage error.
    pub fn toggle(&mut self, id: RecordId, flag: R::Flag) -> Result<&R> {
        let index = self.position(id)?;
        let mut next = self.records.clone();
        next[index].toggle(flag);
        self.commit(next)?;
        Ok(&self.records[index])
    }

    /// Look up a single record.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] if `id` is absent.
    pub fn get(&self, id: RecordId) -> Result<&R> {
        self.position(id).map(|index| &self.records[index])
    }

    /// Records matching `query`, in list order.
    pub fn query(&self, query: &Query<'_, R>) -> Vec<&R> {
        self.records.iter().filter(|r| query.matches(r)).collect()
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(CoreError::NotFound {
                namespace: R::NAMESPACE,
                id,
            })
    }

    fn commit(&mut self, next: Vec<R>) -> Result<()> {
        save_records(&self.store, R::NAMESPACE, &next)?;
        self.records = next;
        Ok(())
    }
}

/// Tracks which record, if any, a form is currently editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSession {
    editing: Option<RecordId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: RecordId) {
        self.editing = Some(id);
    }

    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    /// End the edit, returning the id that was being edited.
    pub fn finish(&mut self) -> Option<RecordId> {
        self.editing.take()
    }

    /// Clear the edit if `removed` was the record in progress. Returns whether
    /// it was cleared.
    pub fn on_removed(&mut self, removed: RecordId) -> bool {
        if self.editing == Some(removed) {
            self.editing = None;
            true
        } else {
            false
        }
    }
}
