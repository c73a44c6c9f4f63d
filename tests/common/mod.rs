//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for mbox text with confirmed messages and body content
pub struct MboxBuilder {
    lines: Vec<String>,
}

impl MboxBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a message whose boundary will be confirmed by the decoder
    ///
    /// `body` must start with a tag-shaped line (e.g. "Hello there") because
    /// that line is what confirms the boundary.
    pub fn message(mut self, sender: &str, subject: &str, body: &[&str]) -> Self {
        self.lines.push(format!("From {} Mon Jan  1 00:00:00 2001", sender));
        self.lines.push(format!("Subject: {}", subject));
        self.lines.push(format!("Sender: {}", sender));
        self.lines.push("Status: RO".to_string());
        self.lines.extend(body.iter().map(|l| l.to_string()));
        self
    }

    /// Add raw lines as they are
    pub fn raw(mut self, lines: &[&str]) -> Self {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
        self
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl Default for MboxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scratch workspace with input, output and store locations
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("in")).expect("Failed to create input dir");
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root().join("in")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn store_path(&self) -> PathBuf {
        self.root().join("store.json")
    }

    /// Write an input file and return its path
    pub fn add_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input_dir().join(name);
        fs::write(&path, content).expect("Failed to write input file");
        path
    }

    /// Output file names, sorted
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.output_dir()) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output_dir().join(name)).expect("Failed to read output file")
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
