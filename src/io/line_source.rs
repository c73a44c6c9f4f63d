use std::io::BufRead;

use anyhow::{Context, Result};

/// Lazy, non-restartable sequence of text lines read from a byte stream
///
/// Lines are split on `\n`; the terminator and a preceding `\r` are removed.
/// Bytes that are not valid UTF-8 are replaced rather than rejected, since mbox
/// archives routinely carry mixed encodings. Once the stream is exhausted every
/// further call returns `None`.
pub struct LineSource<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
    lines_read: u64,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), done: false, lines_read: 0 }
    }

    /// Read the next line, or `None` at end of stream
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if self.done {
            return Ok(None);
        }

        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .with_context(|| format!("Failed to read line {}", self.lines_read + 1))?;

        if n == 0 {
            self.done = true;
            return Ok(None);
        }

        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }

        self.lines_read += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    /// Number of lines returned so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn collect(input: &[u8]) -> Vec<String> {
        let mut source = LineSource::new(Cursor::new(input.to_vec()));
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_strips_terminators() {
        assert_eq!(collect(b"a\nb\r\nc\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_last_line_without_terminator() {
        assert_eq!(collect(b"a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(collect(b"\n\na\n"), vec!["", "", "a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(b"caf\xe9\n");
        assert_eq!(lines, vec!["caf\u{FFFD}"]);
    }

    #[test]
    fn test_stays_exhausted() {
        let mut source = LineSource::new(Cursor::new(b"only\n".to_vec()));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("only"));
        assert!(source.next_line().unwrap().is_none());
        assert!(source.next_line().unwrap().is_none());
        assert_eq!(source.lines_read(), 1);
    }

    #[test]
    fn test_lone_carriage_return_is_content() {
        assert_eq!(collect(b"a\rb\n"), vec!["a\rb"]);
    }
}
