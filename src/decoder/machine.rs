use std::io::BufRead;

use anyhow::Result;
use tracing::{debug, info};

use super::pending::PendingMessage;
use super::state::{Capture, DecoderState, Emit, Outcome, transition};
use crate::io::{LineSink, LineSource};
use crate::models::DecodeStats;

/// Message-boundary decoder for one input stream
///
/// Holds at most one [`PendingMessage`] at a time and writes every decoded
/// line to its sink as soon as the state machine releases it.
pub struct Decoder<S: LineSink> {
    state: DecoderState,
    pending: Option<PendingMessage>,
    sink: S,
    stats: DecodeStats,
}

impl<S: LineSink> Decoder<S> {
    pub fn new(sink: S) -> Self {
        Self { state: DecoderState::Idle, pending: None, sink, stats: DecodeStats::default() }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Feed one input line through the state machine
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.stats.lines_read += 1;
        let step = transition(self.state, line);

        match step.outcome {
            Outcome::Normal => {}
            Outcome::Abandoned => {
                self.stats.abandoned += 1;
                debug!(state = ?self.state, "Tag sequence broken, discarding pending message");
            }
            Outcome::Dropped => self.stats.dropped += 1,
        }

        match step.capture {
            Capture::None => {}
            Capture::Boundary => self.pending = Some(PendingMessage::new(line)),
            Capture::Tag(slot) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.capture_tag(slot, line);
                }
            }
        }

        match step.emit {
            Emit::Nothing => {}
            Emit::Line => self.write(line)?,
            Emit::Replay => {
                if let Some(pending) = self.pending.take() {
                    self.stats.false_alarms += 1;
                    debug!(boundary = pending.boundary(), "False alarm, replaying as body");
                    self.write_all(pending.abandon_to_body(line))?;
                }
            }
            Emit::Finalize => {
                if let Some(pending) = self.pending.take() {
                    let lines = pending.finalize(line);
                    self.stats.messages += 1;
                    info!(boundary = %lines[0], "Message confirmed");
                    self.write_all(lines)?;
                }
            }
        }

        if !step.next.is_capturing() {
            self.pending = None;
        }
        self.state = step.next;
        Ok(())
    }

    /// End of input: drop any partial capture and hand back the sink
    pub fn finish(mut self) -> (S, DecodeStats) {
        if let Some(pending) = self.pending.take() {
            self.stats.partial_at_eof = true;
            debug!(
                boundary = pending.boundary(),
                tags = pending.captured_tags(),
                "Input ended with an unconfirmed message, dropping it"
            );
        }
        (self.sink, self.stats)
    }

    fn write(&mut self, line: &str) -> Result<()> {
        self.sink.write_line(line)?;
        self.stats.lines_written += 1;
        Ok(())
    }

    fn write_all(&mut self, lines: Vec<String>) -> Result<()> {
        for line in &lines {
            self.write(line)?;
        }
        Ok(())
    }
}

/// Run every line of `source` through a fresh decoder writing to `sink`
pub fn decode<R: BufRead, S: LineSink>(
    source: &mut LineSource<R>,
    sink: S,
) -> Result<(S, DecodeStats)> {
    let mut decoder = Decoder::new(sink);
    while let Some(line) = source.next_line()? {
        decoder.feed(&line)?;
    }
    Ok(decoder.finish())
}

/// Decode an in-memory list of lines (convenience for tests and tools)
pub fn decode_lines<'a, I>(lines: I) -> (Vec<String>, DecodeStats)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut decoder = Decoder::new(Vec::new());
    for line in lines {
        // A Vec sink cannot fail
        if decoder.feed(line).is_err() {
            break;
        }
    }
    decoder.finish()
}
