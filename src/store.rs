//! The sorted in-memory collection of records for one open database.
//!
//! Records are kept in a `Vec` ordered by group, title, user and uuid. Any
//! `save` re-sorts the whole collection since an edit may change the sort
//! key. Positions handed out are plain indices and are invalidated by every
//! mutating call.

use std::cmp::Ordering;
use std::collections::HashSet;

use uuid::Uuid;

use crate::record::{FieldId, Record};

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    dirty: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Record> {
        self.records.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Position of the first record whose `field` is exactly `value`.
    pub fn find_by_field(&self, field: FieldId, value: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|rec| rec.get(field) == Some(value))
    }

    /// Position of the first record structurally equal to `record`.
    pub fn position_of(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|rec| rec == record)
    }

    /// Inserts or updates `record`, keyed by its uuid, and returns its new
    /// position.
    ///
    /// A record without a uuid gets a freshly generated one. An existing
    /// record with the same uuid has its contents replaced, otherwise the
    /// record is added.
    pub fn save(&mut self, record: Record) -> usize {
        let mut record = record;
        let uuid = match record.get(FieldId::Uuid) {
            Some(id) if !id.trim_end().is_empty() => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                record.set(FieldId::Uuid, id.clone());
                id
            }
        };

        match self.find_by_field(FieldId::Uuid, &uuid) {
            Some(pos) => {
                log::debug!("Updating record {}", uuid);
                self.records[pos].assign(record);
            }
            None => {
                log::debug!("Adding record {}", uuid);
                self.records.push(record);
                self.dirty = true;
            }
        }

        self.sort();

        // The record was just stored under this uuid.
        self.find_by_field(FieldId::Uuid, &uuid).unwrap_or(0)
    }

    /// Removes the record with the same uuid as `record`.
    ///
    /// Returns `true` if a record was removed.
    pub fn delete(&mut self, record: &Record) -> bool {
        let Some(uuid) = record.get(FieldId::Uuid) else {
            return false;
        };
        match self.find_by_field(FieldId::Uuid, uuid) {
            Some(pos) => {
                log::debug!("Deleting record {}", uuid);
                self.records.remove(pos);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Removes the record at `pos`. Out of range positions remove nothing.
    pub fn delete_at(&mut self, pos: usize) -> bool {
        match self.records.get(pos) {
            Some(record) => {
                let record = record.clone();
                self.delete(&record)
            }
            None => false,
        }
    }

    /// Appends records read from storage without touching the dirty state.
    ///
    /// Every loaded record ends up with a unique uuid: a missing or blank id,
    /// or one already taken, is replaced with a fresh one. The replacement
    /// does not mark the record modified; it is persisted by the next write.
    pub fn load<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        let mut seen: HashSet<String> = self
            .records
            .iter()
            .filter_map(|rec| rec.get(FieldId::Uuid).map(String::from))
            .collect();

        for mut record in records {
            let needs_id = match record.get(FieldId::Uuid) {
                Some(id) if !id.trim_end().is_empty() => {
                    let duplicate = !seen.insert(id.to_string());
                    if duplicate {
                        log::warn!("Duplicate record id {} in storage, assigning a new one", id);
                    }
                    duplicate
                }
                _ => true,
            };
            if needs_id {
                let was_modified = record.is_modified();
                let id = Uuid::new_v4().to_string();
                seen.insert(id.clone());
                record.set(FieldId::Uuid, id);
                if !was_modified {
                    record.clear_modified();
                }
            }
            self.records.push(record);
        }
        self.sort();
    }

    /// Returns `true` if the membership changed or any record was modified
    /// since the last [`RecordStore::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.records.iter().any(Record::is_modified)
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        for record in &mut self.records {
            record.clear_modified();
        }
    }

    fn sort(&mut self) {
        self.records.sort_by(compare_records);
    }
}

/// Orders records by group, title, user then uuid. Missing fields sort as
/// empty strings.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    [FieldId::Group, FieldId::Title, FieldId::User, FieldId::Uuid]
        .into_iter()
        .map(|field| a.get_or(field, "").cmp(b.get_or(field, "")))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
