//! Run driver: feeds each input file through a fresh decoder into its own output file
//!
//! # Error Handling Strategy
//!
//! Every failure here is fatal for the run and propagated as an error:
//!
//! - **Setup**: unreadable or corrupt counter store, missing input, output
//!   directory that cannot be created
//! - **Limits**: input or output paths longer than [`MAX_PATH_LEN`](crate::utils::MAX_PATH_LEN)
//! - **I/O**: read or write failures on any file
//!
//! Malformed mbox content is never an error; the decoder absorbs it.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::decoder::decode;
use crate::discovery::{expand_archives, list_input_files, stat_input_file};
use crate::io::{FileSink, LineSource};
use crate::models::{FileReport, InputFile, RunSummary};
use crate::store::{KvStore, SequenceCounter};
use crate::utils::{format_path_with_tilde, validate_path_len};

/// Extension of every output file
pub const OUTPUT_EXTENSION: &str = "txt";

/// Where input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    /// Directory whose zip archives are expanded and whose files are listed
    Directory(PathBuf),
}

/// Everything a run needs; built by the CLI or by tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: InputSource,
    pub output_dir: PathBuf,
    pub store_path: PathBuf,
}

/// Resolve the list of input files for `source`
pub fn collect_inputs(source: &InputSource) -> Result<Vec<InputFile>> {
    match source {
        InputSource::File(path) => Ok(vec![stat_input_file(path)?]),
        InputSource::Directory(dir) => {
            expand_archives(dir)?;
            list_input_files(dir)
        }
    }
}

/// Allocates numbered output files in one directory
pub struct OutputFiles {
    dir: PathBuf,
    counter: SequenceCounter,
}

impl OutputFiles {
    pub fn new(dir: &Path, counter: SequenceCounter) -> Self {
        Self { dir: dir.to_path_buf(), counter }
    }

    /// Take the next sequence number and create `<dir>/<number>.txt`
    pub fn open_next(&mut self) -> Result<FileSink> {
        let name = self.counter.next_name()?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create output directory: {}", self.dir.display())
            })?;
        }

        let path = self.dir.join(format!("{}.{}", name, OUTPUT_EXTENSION));
        validate_path_len(&path)?;
        FileSink::create(&path)
    }
}

/// Decode one input file into `sink`, returning the per-file report
pub fn process_file(input: &InputFile, sink: FileSink) -> Result<FileReport> {
    let input_path = input.path();
    validate_path_len(&input_path)?;

    let file = File::open(&input_path)
        .with_context(|| format!("Failed to open input file: {}", input_path.display()))?;
    let mut source = LineSource::new(BufReader::new(file));

    info!(
        size = input.size,
        modified = %input.modified_label(),
        "Working on file: {}",
        format_path_with_tilde(&input_path)
    );
    let (sink, stats) = decode(&mut source, sink)
        .with_context(|| format!("Failed to decode {}", input_path.display()))?;

    let output = sink.path().to_path_buf();
    sink.close()?;
    debug!(?stats, output = %output.display(), "Finished file");

    Ok(FileReport { input: input_path, output, stats })
}

/// Run the whole conversion described by `config`
///
/// Inputs are processed strictly one after another, in list order; each gets
/// a new output file and a new decoder.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let store = KvStore::open(&config.store_path)?;
    let counter = SequenceCounter::new(store)?;
    let mut outputs = OutputFiles::new(&config.output_dir, counter);

    let inputs = collect_inputs(&config.input)?;
    info!("Found {} input file(s)", inputs.len());

    let mut summary = RunSummary::default();
    for input in &inputs {
        validate_path_len(&input.path())?;
        let sink = outputs.open_next()?;
        summary.push(process_file(input, sink)?);
    }

    Ok(summary)
}
