use std::{fs, path::PathBuf, sync::Arc};

use log::{debug, error, warn};
use parking_lot::Mutex;

use crate::{
  data::{data_file::DataFile, log_record::LogRecord},
  errors::{Errors, Result},
  index::{self, IndexEntry},
  option::Options,
  segment::SegmentManager,
  util,
};

/// Storage engine instance.
///
/// Writes are serialized through `segments`; reads never take that lock and
/// open their own handle on a segment for every recorded offset.
pub struct Engine {
  options: Arc<Options>,
  segments: Mutex<SegmentManager>,
  index: Box<dyn index::Indexer>,
}

/// Stat for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
  /// Number of keys in the index.
  pub key_num: usize,
  /// Number of segment files in the data directory.
  pub data_file_num: usize,
  /// Disk space occupied by the data directory.
  pub disk_size: u64,
}

impl Engine {
  /// Opens the engine over `opts.dir_path`, creating the directory and the
  /// first segment as needed. The index always starts out empty.
  pub fn open(opts: Options) -> Result<Self> {
    check_options(&opts)?;

    let options = opts.clone();
    let dir_path = options.dir_path.clone();
    if !dir_path.is_dir() {
      if let Err(e) = fs::create_dir_all(dir_path.as_path()) {
        error!("create database directory err: {}", e);
        return Err(Errors::FailedToCreateDatabaseDir);
      }
    }

    let segments = SegmentManager::open(&dir_path, options.data_file_size, options.sync_writes)?;

    Ok(Self {
      index: index::new_indexer(&options.index_type),
      options: Arc::new(options),
      segments: Mutex::new(segments),
    })
  }

  /// Appends a new version of `key`. Earlier versions stay readable.
  pub fn put(&self, key: &str, value: &str) -> Result<()> {
    let mut segments = self.segments.lock();

    let record = LogRecord::new(key, value);
    let enc_record = record.encode();

    let file_name = segments.active_file_name().to_owned();
    let offset = segments.append(&enc_record)?;
    if segments.should_rotate() {
      segments.rotate()?;
    }

    self.index.record(key, &file_name, offset);
    Ok(())
  }

  /// Returns every value written for `key`, oldest first.
  ///
  /// Records that cannot be opened, read or validated are skipped; the key
  /// counts as missing only when nothing could be read.
  pub fn get(&self, key: &str) -> Result<Vec<String>> {
    let entry = match self.index.lookup(key) {
      Some(entry) => entry,
      None => return Err(Errors::KeyNotFound),
    };

    let mut values = Vec::with_capacity(entry.offsets.len());
    for offset in entry.offsets.iter() {
      match self.read_value(&entry.file_name, *offset) {
        Ok(value) => values.push(value),
        Err(e) => warn!(
          "skip record of key {} in {} at offset {}: {}",
          key, entry.file_name, offset, e
        ),
      }
    }

    if values.is_empty() {
      return Err(Errors::KeyNotFound);
    }
    Ok(values)
  }

  fn read_value(&self, file_name: &str, offset: u64) -> Result<String> {
    let data_file = DataFile::open_reader(&self.options.dir_path, file_name, self.options.read_io_type)?;
    let read_record = data_file.read_log_record(offset)?;
    debug!("read {} bytes from {} at offset {}", read_record.size, file_name, offset);
    Ok(read_record.record.value)
  }

  /// Snapshot of the index entry for `key`.
  pub fn index_entry(&self, key: &str) -> Option<IndexEntry> {
    self.index.lookup(key)
  }

  /// Name of the segment currently accepting appends.
  pub fn active_file_name(&self) -> String {
    self.segments.lock().active_file_name().to_owned()
  }

  pub fn dir_path(&self) -> &PathBuf {
    &self.options.dir_path
  }

  pub fn sync(&self) -> Result<()> {
    self.segments.lock().sync()
  }

  pub fn get_engine_stat(&self) -> Result<Stat> {
    let data_files = util::file::list_segment_files(&self.options.dir_path)?;
    Ok(Stat {
      key_num: self.index.len(),
      data_file_num: data_files.len(),
      disk_size: util::file::dir_disk_size(&self.options.dir_path),
    })
  }
}

impl Drop for Engine {
  fn drop(&mut self) {
    if let Err(e) = self.sync() {
      error!("error while closing engine {}", e);
    }
  }
}

fn check_options(opts: &Options) -> Result<()> {
  if opts.dir_path.to_str().map_or(true, str::is_empty) {
    return Err(Errors::DirPathIsEmpty);
  }

  if opts.data_file_size == 0 {
    return Err(Errors::DataFileSizeTooSmall);
  }

  Ok(())
}
