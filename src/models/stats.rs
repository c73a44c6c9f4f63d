use std::ops::AddAssign;
use std::path::PathBuf;

/// Counters collected while decoding one input file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub lines_read: u64,
    pub lines_written: u64,
    pub messages: u64,
    /// Body `From ` lines that turned out to be ordinary content
    pub false_alarms: u64,
    /// Header-side tag sequences that broke before confirmation
    pub abandoned: u64,
    /// Lines ignored before the first message or while awaiting confirmation
    pub dropped: u64,
    /// A capture was still pending when the input ended
    pub partial_at_eof: bool,
}

/// Outcome of decoding a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: DecodeStats,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub totals: DecodeStats,
}

impl AddAssign for DecodeStats {
    fn add_assign(&mut self, other: Self) {
        self.lines_read += other.lines_read;
        self.lines_written += other.lines_written;
        self.messages += other.messages;
        self.false_alarms += other.false_alarms;
        self.abandoned += other.abandoned;
        self.dropped += other.dropped;
        self.partial_at_eof |= other.partial_at_eof;
    }
}

impl RunSummary {
    pub fn push(&mut self, report: FileReport) {
        self.totals += report.stats;
        self.files.push(report);
    }

    pub fn files_processed(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accumulates_totals() {
        let mut summary = RunSummary::default();
        for n in 1..=2 {
            summary.push(FileReport {
                input: PathBuf::from(format!("in{}", n)),
                output: PathBuf::from(format!("out{}", n)),
                stats: DecodeStats {
                    lines_read: 10,
                    lines_written: 8,
                    messages: n,
                    partial_at_eof: n == 2,
                    ..Default::default()
                },
            });
        }

        assert_eq!(summary.files_processed(), 2);
        assert_eq!(summary.totals.lines_read, 20);
        assert_eq!(summary.totals.lines_written, 16);
        assert_eq!(summary.totals.messages, 3);
        assert!(summary.totals.partial_at_eof);
    }
}
