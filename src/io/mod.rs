//! Line-level input and output for the decoder

pub mod line_source;
pub mod sink;

pub use line_source::LineSource;
pub use sink::{FileSink, LineSink};
