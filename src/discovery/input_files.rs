use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use tracing::warn;
use walkdir::WalkDir;

use crate::models::InputFile;

/// Describe a single input file
///
/// # Errors
///
/// Returns an error if the path does not exist, is not a regular file, or
/// has no file name component.
pub fn stat_input_file(path: &Path) -> Result<InputFile> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read input file metadata: {}", path.display()))?;

    if !metadata.is_file() {
        bail!("Input is not a regular file: {}", path.display());
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("Input path has no file name: {}", path.display()))?;
    let dir_name = path.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(InputFile {
        dir_name,
        file_name,
        size: metadata.len(),
        modified: metadata.modified().ok().map(DateTime::<Utc>::from),
    })
}

/// List the input files directly inside `dir`
///
/// Non-recursive. Only regular files are returned; hidden files and `.zip`
/// archives are skipped. The result is sorted by file name so runs are
/// repeatable.
///
/// # Errors
///
/// Returns an error if `dir` is missing or cannot be read. Individual entries
/// that cannot be read are logged and skipped.
pub fn list_input_files(dir: &Path) -> Result<Vec<InputFile>> {
    if !dir.is_dir() {
        bail!("Input directory not found: {}", dir.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name.starts_with('.') || is_zip_name(&file_name) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        files.push(InputFile {
            dir_name: dir.to_path_buf(),
            file_name,
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        });
    }

    Ok(files)
}

/// True for names ending in `.zip` (any case)
pub fn is_zip_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
