use std::{path::Path, sync::Arc};

use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::{
  errors::{Errors, Result},
  fio::{self, IOManager},
  option::IOManagerType,
};

use super::log_record::{
  decode_log_record, decode_log_record_header, ReadLogRecord, LOG_RECORD_HEADER_SIZE,
};

pub const DATA_FILE_NAME_SUFFIX: &str = ".log";
pub const SEGMENT_FILE_NAME: &str = "segment.log";

/// One segment on disk. The active segment is opened for append, closed
/// segments are only ever reopened read-only.
pub struct DataFile {
  file_name: String,
  write_off: Arc<RwLock<u64>>,
  io_manager: Box<dyn IOManager>,
}

impl DataFile {
  /// Opens or creates `file_name` under `dir_path` for append + read. The write
  /// offset starts at the current end of file.
  pub fn new<P>(dir_path: P, file_name: &str) -> Result<DataFile>
  where
    P: AsRef<Path>,
  {
    let io_manager = fio::new_io_manager(dir_path.as_ref().join(file_name))?;
    let write_off = io_manager.size();
    Ok(DataFile {
      file_name: file_name.to_owned(),
      write_off: Arc::new(RwLock::new(write_off)),
      io_manager,
    })
  }

  /// Opens an existing segment read-only with its own handle.
  pub fn open_reader<P>(dir_path: P, file_name: &str, io_type: IOManagerType) -> Result<DataFile>
  where
    P: AsRef<Path>,
  {
    let io_manager = fio::open_reader(dir_path.as_ref().join(file_name), io_type)?;
    let write_off = io_manager.size();
    Ok(DataFile {
      file_name: file_name.to_owned(),
      write_off: Arc::new(RwLock::new(write_off)),
      io_manager,
    })
  }

  pub fn get_file_name(&self) -> &str {
    &self.file_name
  }

  pub fn get_write_off(&self) -> u64 {
    *self.write_off.read()
  }

  pub fn read_log_record(&self, offset: u64) -> Result<ReadLogRecord> {
    let file_size = self.io_manager.size();
    if offset >= file_size {
      return Err(Errors::ReadDataFileEOF);
    }

    let mut header_buf = [0u8; LOG_RECORD_HEADER_SIZE];
    self
      .io_manager
      .read(&mut header_buf, offset)
      .map_err(truncated)?;
    let header = decode_log_record_header(&header_buf)?;

    // sizes come from disk, never trust them beyond the end of the file
    let record_size = LOG_RECORD_HEADER_SIZE + header.body_size();
    if offset + record_size as u64 > file_size {
      return Err(Errors::MalformedRecord);
    }

    let mut buf = vec![0u8; record_size];
    buf[..LOG_RECORD_HEADER_SIZE].copy_from_slice(&header_buf);
    if header.body_size() > 0 {
      self
        .io_manager
        .read(&mut buf[LOG_RECORD_HEADER_SIZE..], offset + LOG_RECORD_HEADER_SIZE as u64)
        .map_err(truncated)?;
    }

    decode_log_record(&buf)
  }

  /// Appends `buf`. On failure the write offset is re-read from the file, as
  /// part of `buf` may have landed.
  pub fn write(&self, buf: &[u8]) -> Result<usize> {
    let mut write_off = self.write_off.write();
    match self.io_manager.write(buf) {
      Ok(n_bytes) => {
        *write_off += n_bytes as u64;
        Ok(n_bytes)
      }
      Err(e) => {
        *write_off = self.io_manager.size();
        Err(e)
      }
    }
  }

  pub fn sync(&self) -> Result<()> {
    self.io_manager.sync()
  }
}

fn truncated(e: Errors) -> Errors {
  match e {
    Errors::ReadDataFileEOF => Errors::MalformedRecord,
    other => other,
  }
}

/// File name for a segment created by rotation at the current time.
pub fn new_segment_file_name() -> String {
  let micros = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000;
  format!("segment-{}{}", micros, DATA_FILE_NAME_SUFFIX)
}
