use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgGroup, Parser};
use tracing::{debug, error, info};

use crate::runner::{InputSource, RunConfig, run as run_conversion};
use crate::utils::{STORE_ENV, default_store_path, format_path_with_tilde};

use super::logging;

/// Multi-letter flags that are spelled with a single dash on the command line
const SINGLE_DASH_FLAGS: [&str; 3] = ["-if", "-id", "-od"];

const LOG_FILE_FLAG: &str = "--log-file";

#[derive(Parser, Debug)]
#[command(name = "mbox2txt")]
#[command(version = "0.1.0")]
#[command(about = "Convert mbox archives into numbered flat-text files", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["input_file", "input_dir"])))]
pub struct Cli {
    /// Input file name
    #[arg(long = "if", value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Input directory name (zip archives in it are expanded first)
    #[arg(long = "id", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output directory name
    #[arg(long = "od", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Counter store file used to number output files
    #[arg(long, value_name = "FILE", env = STORE_ENV)]
    pub store: Option<PathBuf>,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the run configuration, resolving the default store location
    pub fn to_config(&self) -> Result<RunConfig> {
        let input = match (&self.input_file, &self.input_dir) {
            (Some(file), _) => InputSource::File(file.clone()),
            (None, Some(dir)) => InputSource::Directory(dir.clone()),
            (None, None) => bail!("Missing -if or -id: no input file or directory to scan"),
        };

        let store_path = match &self.store {
            Some(path) => path.clone(),
            None => default_store_path()?,
        };

        Ok(RunConfig { input, output_dir: self.output_dir.clone(), store_path })
    }
}

/// Rewrite `-if`/`-id`/`-od` to their `--` spelling so clap can parse them
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if SINGLE_DASH_FLAGS.contains(&s) => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}

/// Find the `--log-file` value in raw arguments that clap failed to parse
pub fn log_file_arg(args: &[OsString]) -> Option<PathBuf> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let Some(s) = arg.to_str() else { continue };
        if s == LOG_FILE_FLAG {
            return iter.next().map(PathBuf::from);
        }
        if let Some(value) = s.strip_prefix(LOG_FILE_FLAG).and_then(|v| v.strip_prefix('=')) {
            return Some(PathBuf::from(value));
        }
    }
    None
}

/// Parse arguments, install logging, and run the conversion
///
/// Every error is reported exactly once: usage errors by clap on stderr (and
/// in the log file when one was requested), everything later through the
/// logger. The returned error only decides the exit status.
pub fn run() -> Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(normalize_args(args.clone())) {
        Ok(cli) => cli,
        Err(err) => {
            if err.use_stderr()
                && let Some(path) = log_file_arg(&args)
                && logging::install(0, Some(&path)).is_ok()
            {
                let rendered = err.render().to_string();
                let message = rendered.lines().next().unwrap_or_default();
                error!("Usage error: {}", message.trim_start_matches("error: "));
            }
            err.exit()
        }
    };

    if let Err(err) = logging::install(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {:#}", err);
        return Err(err);
    }

    execute(&cli, &args).inspect_err(|e| error!("Fatal: {:#}", e))
}

fn execute(cli: &Cli, args: &[OsString]) -> Result<()> {
    info!("Starting mbox2txt {}", env!("CARGO_PKG_VERSION"));
    for (n, arg) in args.iter().enumerate() {
        debug!("argv[{}]: {:?}", n, arg);
    }

    let config = cli.to_config()?;
    info!("Counter store: {}", format_path_with_tilde(&config.store_path));

    let summary = run_conversion(&config)?;

    info!(
        "Done: {} file(s), {} message(s), {} line(s) written, {} false alarm(s)",
        summary.files_processed(),
        summary.totals.messages,
        summary.totals.lines_written,
        summary.totals.false_alarms
    );

    Ok(())
}
