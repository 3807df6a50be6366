use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Errors {
  #[error("failed to create the database directory")]
  FailedToCreateDatabaseDir,

  #[error("failed to read the database directory")]
  FailedToReadDatabaseDir,

  #[error("failed to open data file")]
  FailedToOpenDataFile,

  #[error("failed to read from data file")]
  FailedToReadFromDataFile,

  #[error("failed to write to data file")]
  FailedToWriteToDataFile,

  #[error("failed to sync data file")]
  FailedToSyncDataFile,

  #[error("read data file eof")]
  ReadDataFileEOF,

  #[error("malformed log record")]
  MalformedRecord,

  #[error("invalid log record checksum")]
  InvalidLogRecordChecksum,

  #[error("key is not found in database")]
  KeyNotFound,

  #[error("database dir path can not be empty")]
  DirPathIsEmpty,

  #[error("database data file size must be greater than 0")]
  DataFileSizeTooSmall,
}

pub type Result<T> = std::result::Result<T, Errors>;
