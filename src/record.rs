//! A single credential entry.
//!
//! Records are sparse: a field is either present with a non-empty value or
//! absent. There is no way to store an empty string.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifies one field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Group,
    Title,
    User,
    Password,
    Notes,
    Email,
    Url,
    Uuid,
    Name,
}

impl FieldId {
    /// Every field, in display order.
    pub const ALL: [FieldId; 9] = [
        FieldId::Group,
        FieldId::Title,
        FieldId::User,
        FieldId::Password,
        FieldId::Email,
        FieldId::Url,
        FieldId::Notes,
        FieldId::Name,
        FieldId::Uuid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Group => "group",
            FieldId::Title => "title",
            FieldId::User => "user",
            FieldId::Password => "password",
            FieldId::Notes => "notes",
            FieldId::Email => "email",
            FieldId::Url => "url",
            FieldId::Uuid => "uuid",
            FieldId::Name => "name",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// A credential entry: a sparse map from [`FieldId`] to text plus a
/// `modified` flag.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: BTreeMap<FieldId, String>,
    modified: bool,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(field, value)` pairs. Empty values are dropped.
    /// The result is not marked modified.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (FieldId, S)>,
        S: Into<String>,
    {
        let mut record = Self::new();
        for (field, value) in fields {
            record.set(field, value);
        }
        record.modified = false;
        record
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, field: FieldId, default: &'a str) -> &'a str {
        self.get(field).unwrap_or(default)
    }

    /// Sets `field` to `value`, or removes it when `value` is empty.
    ///
    /// The record is marked modified only when its contents actually change,
    /// so re-saving a blank field leaves the flag alone.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            if self.fields.remove(&field).is_some() {
                self.modified = true;
            }
            return;
        }
        if self.fields.get(&field) != Some(&value) {
            self.fields.insert(field, value);
            self.modified = true;
        }
    }

    pub fn remove(&mut self, field: FieldId) {
        self.set(field, String::new());
    }

    /// Replaces every field with those of `src`.
    pub fn assign(&mut self, src: Record) {
        if self.fields != src.fields {
            self.fields = src.fields;
            self.modified = true;
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Iterates over present fields in [`FieldId`] order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if `field` is present and contains `substr`, ignoring
    /// case.
    pub fn contains_case_insensitive(&self, field: FieldId, substr: &str) -> bool {
        match self.get(field) {
            Some(value) => fold_case(value).contains(&fold_case(substr)),
            None => false,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Record {}

/// Compares `field` in two records, ignoring case. A field missing from
/// either record never compares equal.
pub fn fields_equal(a: &Record, b: &Record, field: FieldId) -> bool {
    match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => fold_case(x) == fold_case(y),
        _ => false,
    }
}

fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut rec = Record::new();
        assert!(rec.get(FieldId::Title).is_none());
        assert_eq!(rec.get_or(FieldId::Title, "-"), "-");

        rec.set(FieldId::Title, "github");
        assert_eq!(rec.get(FieldId::Title), Some("github"));
        assert!(rec.is_modified());
    }

    #[test]
    fn test_empty_value_removes_field() {
        let mut rec = Record::with_fields([(FieldId::User, "alice")]);
        assert!(!rec.is_modified());

        rec.set(FieldId::User, "");
        assert!(rec.get(FieldId::User).is_none());
        assert_eq!(rec.field_count(), 0);
        assert!(rec.is_modified());
    }

    #[test]
    fn test_clearing_absent_field_is_noop() {
        let mut rec = Record::with_fields([(FieldId::Title, "a")]);
        rec.set(FieldId::Notes, "");
        rec.remove(FieldId::Email);
        assert!(!rec.is_modified());
    }

    #[test]
    fn test_same_value_does_not_mark_modified() {
        let mut rec = Record::with_fields([(FieldId::Title, "a")]);
        rec.set(FieldId::Title, "a");
        assert!(!rec.is_modified());
        rec.set(FieldId::Title, "b");
        assert!(rec.is_modified());
    }

    #[test]
    fn test_with_fields_drops_empty() {
        let rec = Record::with_fields([(FieldId::Title, "x"), (FieldId::Notes, "")]);
        assert_eq!(rec.field_count(), 1);
    }

    #[test]
    fn test_equality_ignores_modified_flag() {
        let a = Record::with_fields([(FieldId::Title, "x")]);
        let mut b = Record::new();
        b.set(FieldId::Title, "x");
        assert!(b.is_modified());
        assert_eq!(a, b);
    }

    #[test]
    fn test_assign() {
        let mut rec = Record::with_fields([(FieldId::Title, "old")]);
        rec.assign(Record::with_fields([(FieldId::Title, "old")]));
        assert!(!rec.is_modified());

        rec.assign(Record::with_fields([(FieldId::User, "bob")]));
        assert!(rec.is_modified());
        assert!(rec.get(FieldId::Title).is_none());
        assert_eq!(rec.get(FieldId::User), Some("bob"));
    }

    #[test]
    fn test_contains_case_insensitive() {
        let rec = Record::with_fields([(FieldId::Title, "Gmail Account")]);
        assert!(rec.contains_case_insensitive(FieldId::Title, "mail acc"));
        assert!(rec.contains_case_insensitive(FieldId::Title, "GMAIL"));
        assert!(!rec.contains_case_insensitive(FieldId::Title, "yahoo"));
        assert!(!rec.contains_case_insensitive(FieldId::User, "g"));
    }

    #[test]
    fn test_contains_case_insensitive_unicode() {
        let rec = Record::with_fields([(FieldId::Notes, "Почта ÅSA")]);
        assert!(rec.contains_case_insensitive(FieldId::Notes, "почта"));
        assert!(rec.contains_case_insensitive(FieldId::Notes, "åsa"));
    }

    #[test]
    fn test_fields_equal() {
        let a = Record::with_fields([(FieldId::User, "Alice"), (FieldId::Title, "t")]);
        let b = Record::with_fields([(FieldId::User, "alice")]);
        assert!(fields_equal(&a, &b, FieldId::User));
        assert!(!fields_equal(&a, &b, FieldId::Title));
        assert!(!fields_equal(&b, &b, FieldId::Title));
    }

    #[test]
    fn test_field_id_parse() {
        assert_eq!("Title".parse::<FieldId>(), Ok(FieldId::Title));
        assert_eq!("url".parse::<FieldId>(), Ok(FieldId::Url));
        assert!("colour".parse::<FieldId>().is_err());
    }
}
