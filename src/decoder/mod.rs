//! Message-boundary decoder for mbox-style archives
//!
//! An mbox file is a stream of messages, each introduced by a line starting
//! with `From `. The same prefix can also appear inside a message body, so a
//! `From ` line only counts as a real boundary once it is followed by three
//! header-shaped tag lines and one more tag-shaped line. Confirmed boundaries
//! are rewritten to `From - ...`; anything that fails confirmation inside a
//! body is replayed unchanged.
//!
//! - [`classify`]: pure line-shape predicates
//! - [`pending`]: capture, finalize and abandon primitives for a candidate message
//! - [`state`]: the explicit state enum and pure transition function
//! - [`machine`]: the [`Decoder`] that applies transitions and feeds a sink

pub mod classify;
pub mod machine;
pub mod pending;
pub mod state;

pub use classify::{is_boundary_line, is_tag_line};
pub use machine::{Decoder, decode, decode_lines};
pub use pending::PendingMessage;
pub use state::{DecoderState, Transition, transition};
