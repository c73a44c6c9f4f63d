//! Plain data passed between discovery, the decoder, and the run driver
//!
//! - [`InputFile`] - An input file queued for decoding, with size and mtime
//! - [`DecodeStats`] - Counters collected while decoding one file
//! - [`FileReport`] - Input/output pair plus its [`DecodeStats`]
//! - [`RunSummary`] - Every [`FileReport`] of a run and their totals

pub mod input;
pub mod stats;

pub use input::InputFile;
pub use stats::{DecodeStats, FileReport, RunSummary};
