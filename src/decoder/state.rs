//! Decoder states and the pure transition function
//!
//! [`transition`] looks only at the current state and the shape of the
//! incoming line. It says what to capture and what to emit; the
//! [`Decoder`](super::Decoder) owns the captured lines and applies the result.

use super::classify::{is_boundary_line, is_tag_line};

/// Where the decoder is in the message structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Before the first confirmed message; unmatched lines are dropped
    #[default]
    Idle,
    ExpectTag1,
    ExpectTag2,
    ExpectTag3,
    /// Three tags captured before any message; waiting for a fourth tag-shaped line
    ExpectConfirm,
    /// Inside a confirmed message body
    InBody,
    BodyExpectTag1,
    BodyExpectTag2,
    BodyExpectTag3,
    /// Three tags captured inside a body; waiting for a fourth tag-shaped line
    BodyExpectConfirm,
}

impl DecoderState {
    /// True while a pending message is held
    pub fn is_capturing(self) -> bool {
        !matches!(self, DecoderState::Idle | DecoderState::InBody)
    }
}

/// What to copy from the current line into the pending message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    None,
    /// Discard any pending message and start a new one from this line
    Boundary,
    /// Store the line in tag slot `n` (0-based)
    Tag(usize),
}

/// What to send to the output sink for the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Nothing,
    /// Write the current line verbatim
    Line,
    /// Write the pending boundary and tags verbatim, then the current line
    Replay,
    /// Confirm the pending message with the current line as its first body line
    Finalize,
}

/// How a line is counted in the decode statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Normal,
    /// A header-side tag sequence broke and the pending message was discarded
    Abandoned,
    /// Line was ignored (pre-message noise or waiting for confirmation)
    Dropped,
}

/// Result of feeding one line to [`transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: DecoderState,
    pub capture: Capture,
    pub emit: Emit,
    pub outcome: Outcome,
}

impl Transition {
    fn to(next: DecoderState, capture: Capture, emit: Emit) -> Self {
        Self { next, capture, emit, outcome: Outcome::Normal }
    }

    fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }
}

/// Compute the next state and effects for one input line
pub fn transition(state: DecoderState, line: &str) -> Transition {
    use DecoderState::*;

    match state {
        Idle => {
            if is_boundary_line(line) {
                Transition::to(ExpectTag1, Capture::Boundary, Emit::Nothing)
            } else {
                Transition::to(Idle, Capture::None, Emit::Nothing).with_outcome(Outcome::Dropped)
            }
        }
        ExpectTag1 | ExpectTag2 | ExpectTag3 => {
            if is_tag_line(line) {
                let (slot, next) = match state {
                    ExpectTag1 => (0, ExpectTag2),
                    ExpectTag2 => (1, ExpectTag3),
                    _ => (2, ExpectConfirm),
                };
                Transition::to(next, Capture::Tag(slot), Emit::Nothing)
            } else {
                // Pending capture is discarded and the line is rescanned from Idle
                let rescan = transition(Idle, line);
                let outcome = match rescan.capture {
                    Capture::Boundary => Outcome::Normal,
                    _ => Outcome::Abandoned,
                };
                rescan.with_outcome(outcome)
            }
        }
        ExpectConfirm | BodyExpectConfirm => {
            if is_tag_line(line) {
                Transition::to(InBody, Capture::None, Emit::Finalize)
            } else {
                Transition::to(state, Capture::None, Emit::Nothing).with_outcome(Outcome::Dropped)
            }
        }
        InBody => {
            if is_boundary_line(line) {
                Transition::to(BodyExpectTag1, Capture::Boundary, Emit::Nothing)
            } else {
                Transition::to(InBody, Capture::None, Emit::Line)
            }
        }
        BodyExpectTag1 | BodyExpectTag2 | BodyExpectTag3 => {
            if is_tag_line(line) {
                let (slot, next) = match state {
                    BodyExpectTag1 => (0, BodyExpectTag2),
                    BodyExpectTag2 => (1, BodyExpectTag3),
                    _ => (2, BodyExpectConfirm),
                };
                Transition::to(next, Capture::Tag(slot), Emit::Nothing)
            } else {
                Transition::to(InBody, Capture::None, Emit::Replay)
            }
        }
    }
}
