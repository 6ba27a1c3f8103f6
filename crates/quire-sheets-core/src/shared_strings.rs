//! Shared string table

use ahash::AHashMap;
use std::sync::Arc;

use crate::error::{out_of_range, Result};

/// Ordered, duplicate-free list of strings referenced by index from cells
///
/// Interning is amortised O(1): a hash map from string to index is kept
/// alongside the list.
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    strings: Vec<Arc<str>>,
    index: AHashMap<Arc<str>, u32>,
}

impl SharedStringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `s`, appending it if it is not present yet
    ///
    /// # Examples
    /// ```
    /// use quire_sheets_core::SharedStringTable;
    ///
    /// let mut sst = SharedStringTable::new();
    /// let a = sst.intern("Iced Lemon Tea");
    /// let b = sst.intern("USD");
    /// assert_eq!(sst.intern("Iced Lemon Tea"), a);
    /// assert_ne!(a, b);
    /// assert_eq!(sst.len(), 2);
    /// ```
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        let shared: Arc<str> = Arc::from(s);
        self.index.insert(Arc::clone(&shared), idx);
        self.strings.push(shared);
        idx
    }

    /// Get the string at `index`, failing with `IndexOutOfRange`
    pub fn resolve(&self, index: u32) -> Result<&str> {
        self.get(index)
            .ok_or_else(|| out_of_range("sharedStrings", index, self.strings.len()))
    }

    /// Get the string at `index`
    pub fn get(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(|s| &**s)
    }

    /// Index of an already interned string
    pub fn index_of(&self, s: &str) -> Option<u32> {
        self.index.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Strings in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|s| &**s)
    }
}

impl PartialEq for SharedStringTable {
    fn eq(&self, other: &Self) -> bool {
        self.strings == other.strings
    }
}

impl Eq for SharedStringTable {}
