use lazy_static::lazy_static;
use std::path::PathBuf;

lazy_static! {
  pub static ref DEFAULT_DIR_PATH: PathBuf = std::env::temp_dir().join("segcask");
}

#[derive(Debug, Clone)]
pub struct Options {
  pub dir_path: PathBuf,

  /// Rotation threshold of the active segment in bytes. Checked after each
  /// append, so a segment may exceed it by at most one record.
  pub data_file_size: u64,

  pub sync_writes: bool,

  pub index_type: IndexType,

  /// How `get` opens its own handle on a segment for every recorded offset.
  pub read_io_type: IOManagerType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexType {
  BTree,

  SkipList,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      dir_path: DEFAULT_DIR_PATH.clone(),
      data_file_size: 1024 * 900, // 900KB
      sync_writes: false,
      index_type: IndexType::SkipList,
      read_io_type: IOManagerType::StandardFileIO,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOManagerType {
  StandardFileIO,

  MemoryMap,
}
