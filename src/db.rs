//! The account database: a [`RecordStore`] bound to a file, a password and a
//! storage engine.

use std::path::{Path, PathBuf};
use zeroize::Zeroize;

use crate::engine::{RawRecord, StorageEngine, codes};
use crate::error::DbError;
use crate::record::{FieldId, Record};
use crate::store::RecordStore;

/// Raw field code a record field is stored under.
fn field_code(field: FieldId) -> u8 {
    match field {
        FieldId::Name => codes::NAME,
        FieldId::Uuid => codes::UUID,
        FieldId::Group => codes::GROUP,
        FieldId::Title => codes::TITLE,
        FieldId::User => codes::USER,
        FieldId::Notes => codes::NOTES,
        FieldId::Password => codes::PASSWORD,
        FieldId::Email => codes::EMAIL,
        FieldId::Url => codes::URL,
    }
}

/// Converts a raw record into a [`Record`]. Values are copied verbatim and
/// unknown field codes are skipped.
pub fn record_from_raw(raw: &RawRecord) -> Record {
    let mut record = Record::new();
    for field in FieldId::ALL {
        if let Some(value) = raw.get(field_code(field)) {
            record.set(field, value);
        }
    }
    record.clear_modified();
    record
}

/// Converts a [`Record`] into a raw record. Absent fields are omitted.
pub fn record_to_raw(record: &Record) -> Result<RawRecord, DbError> {
    let mut raw = RawRecord::new();
    raw.fields
        .try_reserve_exact(record.field_count())
        .map_err(|e| DbError::Conversion(e.to_string()))?;
    for (field, value) in record.fields() {
        raw.push(field_code(field), value);
    }
    Ok(raw)
}

pub struct AccountDb {
    path: PathBuf,
    password: String,
    read_only: bool,
    records: RecordStore,
    engine: Box<dyn StorageEngine>,
}

impl AccountDb {
    pub fn new(path: impl Into<PathBuf>, engine: Box<dyn StorageEngine>) -> Self {
        Self {
            path: path.into(),
            password: String::new(),
            read_only: false,
            records: RecordStore::new(),
            engine,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the password used for the next read or write. The previous
    /// one is wiped from memory.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password.zeroize();
        self.password = password.into();
    }

    /// Wipes the in-memory password.
    pub fn clear_password(&mut self) {
        self.password.zeroize();
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordStore {
        &mut self.records
    }

    pub fn is_dirty(&self) -> bool {
        self.records.is_dirty()
    }

    pub fn clear_dirty(&mut self) {
        self.records.clear_dirty();
    }

    /// Returns `true` if something exists at the database path.
    pub fn exists(&self) -> bool {
        self.engine.exists(&self.path)
    }

    /// Checks `password` against the database file without loading it.
    pub fn check_password(&self, password: &str) -> bool {
        self.engine.check_password(&self.path, password)
    }

    /// Loads every record from storage into the store.
    ///
    /// On failure the store is left as it was. Returns the number of records
    /// loaded.
    pub fn read(&mut self) -> Result<usize, DbError> {
        let raw = self.engine.read(&self.path, &self.password)?;
        let count = raw.len();
        self.records.load(raw.iter().map(record_from_raw));
        log::debug!("Read {} records from {}", count, self.path.display());
        Ok(count)
    }

    /// Writes every record back to storage and clears the dirty state.
    pub fn write(&mut self) -> Result<(), DbError> {
        if self.read_only {
            return Err(DbError::ReadOnly {
                path: self.path.clone(),
            });
        }

        let mut raw = Vec::new();
        raw.try_reserve_exact(self.records.len())
            .map_err(|e| DbError::Conversion(e.to_string()))?;
        for record in self.records.iter() {
            raw.push(record_to_raw(record)?);
        }

        self.engine.write(&self.path, &self.password, &raw)?;
        self.records.clear_dirty();
        log::debug!("Wrote {} records to {}", raw.len(), self.path.display());
        Ok(())
    }
}

impl Drop for AccountDb {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
