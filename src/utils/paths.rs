use std::borrow::Cow;
use std::env;
use std::path::{Component, Path};

use anyhow::{Result, bail};

/// Longest fully-qualified input or output path accepted, in bytes
pub const MAX_PATH_LEN: usize = 3072;

/// Rejects paths longer than [`MAX_PATH_LEN`]
///
/// # Errors
///
/// Returns an error naming the path when it is too long. Callers treat this as
/// fatal for the run.
pub fn validate_path_len(path: &Path) -> Result<()> {
    let len = path.as_os_str().len();
    if len > MAX_PATH_LEN {
        bail!(
            "Path too long: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            MAX_PATH_LEN
        );
    }
    Ok(())
}

/// Validates that an archive entry name stays inside the extraction directory
///
/// # Errors
///
/// Returns an error if:
/// - The name contains '..' components (path traversal)
/// - The name is absolute or carries a drive prefix
pub fn validate_entry_name(name: &Path) -> Result<()> {
    for component in name.components() {
        match component {
            Component::ParentDir => bail!("Entry contains '..' component: {}", name.display()),
            Component::RootDir | Component::Prefix(_) => {
                bail!("Entry must be relative: {}", name.display())
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use mbox2txt::format_path_with_tilde;
///
/// let path = PathBuf::from("/home/alice/mail/archive.mbox");
/// // Returns "~/mail/archive.mbox" if HOME=/home/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
