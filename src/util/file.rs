use std::{fs, path::Path};

use log::error;

use crate::{
  data::data_file::DATA_FILE_NAME_SUFFIX,
  errors::{Errors, Result},
};

/// Total size in bytes of everything under `dir_path`.
pub fn dir_disk_size<P>(dir_path: P) -> u64
where
  P: AsRef<Path>,
{
  fs_extra::dir::get_size(dir_path).unwrap_or(0)
}

/// Names of the segment files in `dir_path`, sorted.
pub fn list_segment_files<P>(dir_path: P) -> Result<Vec<String>>
where
  P: AsRef<Path>,
{
  let dir = match fs::read_dir(dir_path) {
    Ok(dir) => dir,
    Err(e) => {
      error!("failed to read database dir: {}", e);
      return Err(Errors::FailedToReadDatabaseDir);
    }
  };

  let mut names: Vec<String> = dir
    .flatten()
    .filter_map(|entry| entry.file_name().into_string().ok())
    .filter(|name| name.ends_with(DATA_FILE_NAME_SUFFIX))
    .collect();
  names.sort();
  Ok(names)
}
