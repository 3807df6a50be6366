use std::path::{Path, PathBuf};

use log::info;

use crate::{
  data::data_file::{new_segment_file_name, DataFile, SEGMENT_FILE_NAME},
  errors::Result,
};

/// Owns the single writable segment and the bytes appended to it since the
/// last rotation.
///
/// Not synchronized on its own: the engine keeps it behind its write lock.
pub struct SegmentManager {
  dir_path: PathBuf,
  active_file: DataFile,
  // approximate, counted from appends rather than read back from the fs
  size: u64,
  max_size: u64,
  sync_writes: bool,
}

impl SegmentManager {
  /// Opens (or creates) `segment.log` in `dir_path` as the active segment.
  pub fn open<P>(dir_path: P, max_size: u64, sync_writes: bool) -> Result<Self>
  where
    P: AsRef<Path>,
  {
    let active_file = DataFile::new(&dir_path, SEGMENT_FILE_NAME)?;
    Ok(Self {
      dir_path: dir_path.as_ref().to_path_buf(),
      active_file,
      size: 0,
      max_size,
      sync_writes,
    })
  }

  /// Appends `buf` to the active segment and returns the offset it starts at.
  pub fn append(&mut self, buf: &[u8]) -> Result<u64> {
    let offset = self.active_file.get_write_off();
    self.active_file.write(buf)?;
    if self.sync_writes {
      self.active_file.sync()?;
    }
    self.size += buf.len() as u64;
    Ok(offset)
  }

  /// True once the appended bytes exceed the threshold.
  pub fn should_rotate(&self) -> bool {
    self.size > self.max_size
  }

  /// Swaps in a fresh `segment-<micros>.log`. The previous segment is closed
  /// and left untouched on disk.
  pub fn rotate(&mut self) -> Result<()> {
    let file_name = new_segment_file_name();
    let new_file = DataFile::new(&self.dir_path, &file_name)?;
    let old_file = std::mem::replace(&mut self.active_file, new_file);
    info!(
      "rotated segment {} ({} bytes) to {}",
      old_file.get_file_name(),
      self.size(),
      file_name
    );
    self.size = 0;
    Ok(())
  }

  pub fn active_file_name(&self) -> &str {
    self.active_file.get_file_name()
  }

  pub fn size(&self) -> u64 {
    self.size
  }

  pub fn sync(&self) -> Result<()> {
    self.active_file.sync()
  }
}
