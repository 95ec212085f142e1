//! Storage engine boundary.
//!
//! An engine persists a list of [`RawRecord`]s under a path and a password.
//! [`crate::db::AccountDb`] talks to storage only through this trait, which
//! keeps the encrypted container format out of the record logic and lets
//! tests substitute an in-memory engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DbError;

/// Field type codes used in raw records (Password Safe V3 numbering).
pub mod codes {
    pub const NAME: u8 = 0x00;
    pub const UUID: u8 = 0x01;
    pub const GROUP: u8 = 0x02;
    pub const TITLE: u8 = 0x03;
    pub const USER: u8 = 0x04;
    pub const NOTES: u8 = 0x05;
    pub const PASSWORD: u8 = 0x06;
    pub const URL: u8 = 0x0d;
    pub const EMAIL: u8 = 0x14;
}

/// One `(code, value)` pair of a raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub code: u8,
    pub value: String,
}

/// A record as the storage engine sees it: an unordered list of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub fields: Vec<RawField>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first field with `code`.
    pub fn get(&self, code: u8) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.code == code)
            .map(|f| f.value.as_str())
    }

    pub fn push(&mut self, code: u8, value: impl Into<String>) {
        self.fields.push(RawField {
            code,
            value: value.into(),
        });
    }
}

/// Persistent storage for raw records.
pub trait StorageEngine {
    /// Reads every record stored at `path`.
    fn read(&self, path: &Path, password: &str) -> Result<Vec<RawRecord>, DbError>;

    /// Replaces the contents stored at `path` with `records`.
    fn write(&self, path: &Path, password: &str, records: &[RawRecord]) -> Result<(), DbError>;

    /// Returns `true` if `password` opens the database at `path`.
    fn check_password(&self, path: &Path, password: &str) -> bool;

    /// Returns `true` if something exists at `path`. No content validation.
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
