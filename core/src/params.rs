//! Named parameter storage for a form body.
//!
//! # Design
//! Parameters live in a `BTreeMap`, so iteration order is ascending by name
//! and output is deterministic. Names are unique: a later write replaces the
//! earlier value.
//!
//! Whether the body must be multipart is re-derived from the stored values
//! every time it is asked. A monotonic latch records that a file was ever
//! stored, so overwriting a file field with text keeps multipart encoding.

use std::collections::btree_map::{self, BTreeMap};

use crate::value::FieldValue;

/// Form parameters keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: BTreeMap<String, FieldValue>,
    file_seen: bool,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let value = value.into();
        if value.is_file() {
            self.file_seen = true;
        }
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.entries.iter()
    }

    /// True when the body has to be sent as multipart/form-data.
    pub fn is_multipart(&self) -> bool {
        self.file_seen || self.entries.values().any(FieldValue::is_file)
    }

    /// Ordered `(name, value)` string pairs for URL encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), value.to_text().into_owned()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
