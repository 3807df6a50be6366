use std::sync::Arc;

use crossbeam_skiplist::SkipMap;

use super::{IndexEntry, Indexer};

/// Lock-free skip list keyed by the logical key. Entries are immutable; a
/// write swaps in an extended copy, so lookups never wait on a writer.
pub struct SkipList {
  skl: SkipMap<String, Arc<IndexEntry>>,
}

impl SkipList {
  pub fn new() -> Self {
    Self {
      skl: SkipMap::new(),
    }
  }
}

impl Default for SkipList {
  fn default() -> Self {
    Self::new()
  }
}

impl Indexer for SkipList {
  fn record(&self, key: &str, file_name: &str, offset: u64) {
    let entry = match self.skl.get(key) {
      Some(current) => {
        let mut entry = IndexEntry::clone(current.value());
        entry.offsets.push(offset);
        entry
      }
      None => IndexEntry::new(file_name, offset),
    };
    self.skl.insert(key.to_owned(), Arc::new(entry));
  }

  fn lookup(&self, key: &str) -> Option<IndexEntry> {
    self
      .skl
      .get(key)
      .map(|entry| IndexEntry::clone(entry.value()))
  }

  fn len(&self) -> usize {
    self.skl.len()
  }
}
