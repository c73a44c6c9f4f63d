pub mod commands;
pub mod logging;

pub use commands::{Cli, normalize_args, run};
