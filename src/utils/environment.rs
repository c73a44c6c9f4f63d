use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the counter store location
pub const STORE_ENV: &str = "MBOX2TXT_STORE";

const STORE_DIR: &str = "mbox2txt";
const STORE_FILENAME: &str = "store.json";

/// Default counter store path: `<data dir>/mbox2txt/store.json`
///
/// Falls back to `$HOME/.mbox2txt/store.json` on platforms without a data dir.
pub fn default_store_path() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(STORE_DIR).join(STORE_FILENAME));
    }

    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(format!(".{}", STORE_DIR)).join(STORE_FILENAME))
}
