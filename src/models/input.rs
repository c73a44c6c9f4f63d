use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// One input file queued for decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub dir_name: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl InputFile {
    /// Fully-qualified path of the file
    pub fn path(&self) -> PathBuf {
        self.dir_name.join(&self.file_name)
    }

    /// Modification time for log lines, or `unknown` when the platform has none
    pub fn modified_label(&self) -> String {
        self.modified
            .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
