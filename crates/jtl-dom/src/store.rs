//! The ordered document store.
//!
//! The store holds the page's element records in document order. It knows
//! nothing about widgets: callers that publish a render list rebuild it after
//! every mutation (see `jtl-browser`).

use crate::record::ElementRecord;
use crate::selector::Selector;

/// Ordered collection of element records; the source of truth for a page.
///
/// Invariant: every stored record has a non-empty `KEY`. Records are
/// [normalized](ElementRecord::normalized) on the way in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    records: Vec<ElementRecord>,
}

impl DocumentStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Append a record at the end of the document.
    pub fn insert(&mut self, record: ElementRecord) {
        self.records.push(record.normalized());
        tracing::debug!(len = self.records.len(), "record appended");
    }

    /// Insert a record at `index`.
    ///
    /// An index past the end appends. Returns the index actually used.
    pub fn insert_at(&mut self, index: usize, record: ElementRecord) -> usize {
        let index = index.min(self.records.len());
        self.records.insert(index, record.normalized());
        tracing::debug!(index, len = self.records.len(), "record inserted");
        index
    }

    /// All records whose `key` attribute equals `value` (string-coerced), in
    /// document order.
    #[must_use]
    pub fn query_by_attribute(&self, key: &str, value: &str) -> Vec<&ElementRecord> {
        self.records
            .iter()
            .filter(|record| record.attribute_matches(key, value))
            .collect()
    }

    /// Index of the first record whose `key` attribute equals `value`.
    #[must_use]
    pub fn position_by_attribute(&self, key: &str, value: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.attribute_matches(key, value))
    }

    /// Remove every record whose `key` attribute equals `value`.
    ///
    /// Returns the number of records removed.
    pub fn remove_by_attribute(&mut self, key: &str, value: &str) -> usize {
        let before = self.records.len();
        self.records
            .retain(|record| !record.attribute_matches(key, value));
        let removed = before - self.records.len();
        tracing::debug!(key, value, removed, "records removed");
        removed
    }

    /// Replace the first record whose `key` attribute equals `value`.
    ///
    /// The new record takes the old record's slot; nothing from the old
    /// record is retained. When nothing matches, the record is appended.
    /// Returns the index the new record ends up at.
    pub fn replace_by_attribute(&mut self, key: &str, value: &str, record: ElementRecord) -> usize {
        match self.position_by_attribute(key, value) {
            Some(index) => {
                self.records[index] = record.normalized();
                tracing::debug!(index, "record replaced");
                index
            }
            None => {
                self.insert(record);
                self.records.len() - 1
            }
        }
    }

    /// Replace the whole document.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = ElementRecord>) {
        self.records = records.into_iter().map(ElementRecord::normalized).collect();
        tracing::debug!(len = self.records.len(), "document replaced");
    }

    /// First record matching a selector.
    #[must_use]
    pub fn first(&self, selector: &Selector) -> Option<&ElementRecord> {
        self.records.iter().find(|record| selector.matches(record))
    }

    /// Index of the first record matching a selector.
    #[must_use]
    pub fn position(&self, selector: &Selector) -> Option<usize> {
        self.position_by_attribute(selector.attribute(), selector.value())
    }

    /// All records, in document order.
    #[must_use]
    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    /// Record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ElementRecord> {
        self.records.get(index)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
