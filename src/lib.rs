//! Segcask: a minimal log-structured key-value store inspired by Bitcask.
//!
//! Every `put` is appended to the active segment file and its location is
//! remembered in an in-memory index; `get` seeks straight to those locations.
//! Segments rotate once they grow past a size threshold and are never
//! rewritten afterwards.
//!
//! The index lives only in memory. Nothing is rebuilt from the segment files
//! when an engine is reopened, and superseded records are never compacted.
//!
//! # Basic Usage
//!
//! ```
//! use segcask::{db::Engine, option::Options};
//!
//! let mut opts = Options::default();
//! opts.dir_path = std::env::temp_dir().join("segcask-doc");
//! let engine = Engine::open(opts).expect("Failed to open segcask engine");
//!
//! engine.put("hello", "world").expect("Failed to put");
//! engine.put("hello", "again").expect("Failed to put");
//!
//! // every version, oldest first
//! let values = engine.get("hello").expect("Failed to get");
//! assert_eq!(values.last().map(String::as_str), Some("again"));
//! # std::fs::remove_dir_all(std::env::temp_dir().join("segcask-doc")).ok();
//! ```

mod data;

mod fio;
mod segment;

pub mod db;
pub mod errors;
pub mod index;
pub mod option;
pub mod util;
