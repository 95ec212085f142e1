//! Incremental search over a [`RecordStore`].
//!
//! A [`SearchCursor`] lives for one search session. It remembers three
//! positions: the record selected when the session opened, the record
//! confirmed by the last explicit "find next", and the record currently
//! matched while the query is being typed. Positions are kept as anchors
//! that identify a record rather than an index, and are resolved against the
//! store on every call so that edits between calls cannot leave a dangling
//! position behind.

use crate::record::{FieldId, Record};
use crate::store::RecordStore;

/// Fields searched for the query.
const SEARCH_FIELDS: [FieldId; 4] = [FieldId::Title, FieldId::Name, FieldId::User, FieldId::Notes];

/// Returns `true` if `record` matches `query`. The empty query never matches.
pub fn matches(record: &Record, query: &str) -> bool {
    !query.is_empty()
        && SEARCH_FIELDS
            .iter()
            .any(|field| record.contains_case_insensitive(*field, query))
}

/// Finds the next record matching `query` after `start`, wrapping around to
/// the first record. `None` as `start` scans from the first record.
///
/// The wrapped scan stops before `start`, so `start` itself is never
/// returned by the wrap.
pub fn find_next(store: &RecordStore, query: &str, start: Option<usize>) -> Option<usize> {
    if store.is_empty() {
        return None;
    }

    let from = match start {
        Some(pos) => pos + 1,
        None => 0,
    };
    let scan = |range: std::ops::Range<usize>| {
        range
            .filter_map(|pos| store.get(pos).map(|rec| (pos, rec)))
            .find(|(_, rec)| matches(rec, query))
            .map(|(pos, _)| pos)
    };

    scan(from..store.len()).or_else(|| match start {
        Some(pos) if pos != 0 => scan(0..pos.min(store.len())),
        _ => None,
    })
}

/// Identifies a record across store mutations.
#[derive(Debug, Clone)]
struct Anchor {
    snapshot: Record,
}

impl Anchor {
    fn capture(store: &RecordStore, pos: usize) -> Option<Self> {
        store.get(pos).map(|rec| Anchor {
            snapshot: rec.clone(),
        })
    }

    fn resolve(&self, store: &RecordStore) -> Option<usize> {
        match self.snapshot.get(FieldId::Uuid) {
            Some(uuid) => store.find_by_field(FieldId::Uuid, uuid),
            None => store.position_of(&self.snapshot),
        }
    }
}

fn resolve(anchor: &Option<Anchor>, store: &RecordStore) -> Option<usize> {
    anchor.as_ref().and_then(|a| a.resolve(store))
}

/// State of one incremental search session.
#[derive(Debug, Clone)]
pub struct SearchCursor {
    query: String,
    saved: Option<Anchor>,
    last: Option<Anchor>,
    transient: Option<Anchor>,
    highlighted: Option<Anchor>,
}

impl SearchCursor {
    /// Opens a session starting from `selected`.
    ///
    /// Without a valid selection the session starts at the end position, so
    /// the first search scans every record from the top.
    pub fn open(store: &RecordStore, selected: Option<usize>) -> Self {
        let saved = selected.and_then(|pos| Anchor::capture(store, pos));
        Self {
            query: String::new(),
            last: saved.clone(),
            transient: saved.clone(),
            highlighted: saved.clone(),
            saved,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Position currently highlighted, if its record still exists.
    pub fn highlighted(&self, store: &RecordStore) -> Option<usize> {
        resolve(&self.highlighted, store)
    }

    /// Updates the query text and searches forward from the last confirmed
    /// match.
    ///
    /// Returns the position to highlight, or `None` when the highlight stays
    /// where it is. An empty query moves the highlight back to the last
    /// confirmed match without searching.
    pub fn set_query(&mut self, store: &RecordStore, query: impl Into<String>) -> Option<usize> {
        self.query = query.into();
        if self.query.is_empty() {
            let pos = resolve(&self.last, store)?;
            self.highlighted = self.last.clone();
            return Some(pos);
        }
        self.advance(store)
    }

    /// Confirms the current match and moves on to the next one.
    pub fn find_next_match(&mut self, store: &RecordStore) -> Option<usize> {
        if self.query.is_empty() {
            return None;
        }
        self.last = self.transient.clone();
        self.advance(store)
    }

    /// Ends the session keeping the highlighted record.
    pub fn confirm(self, store: &RecordStore) -> Option<usize> {
        log::debug!("Search confirmed for '{}'", self.query);
        resolve(&self.highlighted, store)
    }

    /// Ends the session and returns the record selected when it opened.
    pub fn cancel(self, store: &RecordStore) -> Option<usize> {
        log::debug!("Search cancelled");
        resolve(&self.saved, store)
    }

    fn advance(&mut self, store: &RecordStore) -> Option<usize> {
        let start = resolve(&self.last, store);
        let found = find_next(store, &self.query, start).filter(|pos| Some(*pos) != start)?;
        log::debug!("Search '{}' matched position {}", self.query, found);
        self.transient = Anchor::capture(store, found);
        self.highlighted = self.transient.clone();
        Some(found)
    }
}
