pub mod btree;
pub mod skiplist;

use crate::option::IndexType;

/// Where the writes for one key were appended.
///
/// `file_name` is captured by the first write of the key and is never
/// updated afterwards, even when later offsets land in a newer segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  pub file_name: String,
  /// Header offsets of every write for the key, in write order.
  pub offsets: Vec<u64>,
}

impl IndexEntry {
  fn new(file_name: &str, offset: u64) -> Self {
    Self {
      file_name: file_name.to_owned(),
      offsets: vec![offset],
    }
  }
}

/// In-memory key directory. Lookups may run concurrently with a writer;
/// `record` calls are expected to be serialized by the caller.
pub trait Indexer: Sync + Send {
  /// Adds `offset` to the entry for `key`, creating it with `file_name` if
  /// this is the first write of the key.
  fn record(&self, key: &str, file_name: &str, offset: u64);

  /// Snapshot of the entry for `key`.
  fn lookup(&self, key: &str) -> Option<IndexEntry>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

pub fn new_indexer(index_type: &IndexType) -> Box<dyn Indexer> {
  match *index_type {
    IndexType::BTree => Box::new(btree::BTree::new()),
    IndexType::SkipList => Box::new(skiplist::SkipList::new()),
  }
}
