//! Persistent key/value store and the output file sequence counter
//!
//! The store is a single JSON document:
//!
//! ```json
//! { "version": 1, "entries": { "FILE_NUM": "0000000000000003" } }
//! ```
//!
//! Default location: platform data directory
//! - macOS: `~/Library/Application Support/mbox2txt/store.json`
//! - Linux: `~/.local/share/mbox2txt/store.json`
//! - Windows: `%APPDATA%\mbox2txt\store.json`

pub mod persistence;
pub mod sequence;

pub use persistence::{KvStore, STORE_VERSION};
pub use sequence::{FILE_NUM_KEY, SequenceCounter, format_file_num};
