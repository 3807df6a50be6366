use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{IndexEntry, Indexer};

/// BTree index guarded by a single read/write lock.
pub struct BTree {
  tree: RwLock<BTreeMap<String, IndexEntry>>,
}

impl BTree {
  pub fn new() -> Self {
    Self {
      tree: RwLock::new(BTreeMap::new()),
    }
  }
}

impl Default for BTree {
  fn default() -> Self {
    Self::new()
  }
}

impl Indexer for BTree {
  fn record(&self, key: &str, file_name: &str, offset: u64) {
    let mut write_guard = self.tree.write();
    match write_guard.get_mut(key) {
      Some(entry) => entry.offsets.push(offset),
      None => {
        write_guard.insert(key.to_owned(), IndexEntry::new(file_name, offset));
      }
    }
  }

  fn lookup(&self, key: &str) -> Option<IndexEntry> {
    let read_guard = self.tree.read();
    read_guard.get(key).cloned()
  }

  fn len(&self) -> usize {
    self.tree.read().len()
  }
}
