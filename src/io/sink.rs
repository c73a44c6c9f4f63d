use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Destination for decoded lines, in call order
pub trait LineSink {
    /// Append one line; the sink adds the terminator
    fn write_line(&mut self, line: &str) -> Result<()>;
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_owned());
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

/// Buffered sink writing `\n`-terminated lines to one output file
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    lines_written: u64,
}

impl FileSink {
    /// Create (or truncate) the file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self { path: path.to_path_buf(), writer: BufWriter::new(file), lines_written: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered output and close the file
    pub fn close(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush output file: {}", self.path.display()))?;
        debug!(lines = self.lines_written, path = %self.path.display(), "Closed output file");
        Ok(())
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)
            .with_context(|| format!("Failed to write output file: {}", self.path.display()))?;
        self.lines_written += 1;
        Ok(())
    }
}
