//! mbox2txt - Convert mbox archives into numbered flat-text files
//!
//! Each input file is read line by line through a message-boundary decoder
//! that tells real `From ` message starts apart from look-alike lines inside
//! message bodies, and the result is written to a fresh output file named by
//! a persistent 16-digit sequence number. It supports:
//!
//! - Decoding a single mbox file or every file in a directory
//! - Expanding zip archives found in an input directory
//! - Persisting the output file counter between runs
//!
//! # Example
//!
//! ```
//! use mbox2txt::decoder::decode_lines;
//!
//! let (lines, stats) = decode_lines([
//!     "From alice@example.com Mon Jan 1 00:00:00 2001",
//!     "Subject: hello",
//!     "Sender: alice",
//!     "Status: RO",
//!     "Body text",
//! ]);
//! assert_eq!(lines[0], "From - alice@example.com Mon Jan 1 00:00:00 2001");
//! assert_eq!(stats.messages, 1);
//! ```

pub mod cli;
pub mod decoder;
pub mod discovery;
pub mod io;
pub mod models;
pub mod runner;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use decoder::{Decoder, decode, is_boundary_line, is_tag_line};
pub use models::{DecodeStats, RunSummary};
pub use runner::{InputSource, RunConfig, run};
pub use utils::format_path_with_tilde;
