use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use super::input_files::is_zip_name;
use crate::utils::validate_entry_name;

/// Expand every `*.zip` archive found directly inside `dir` into `dir`
///
/// Existing files with the same name are overwritten. Entries whose names
/// would escape `dir` are skipped with a warning. Returns the paths written.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read, an archive is not a valid zip
/// file, or an entry cannot be written.
pub fn expand_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;
        if !entry.file_type().is_file() || !is_zip_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let extracted = extract_archive(entry.path(), dir)?;
        info!("Expanded {} ({} files)", entry.path().display(), extracted.len());
        written.extend(extracted);
    }

    Ok(written)
}

/// Extract the regular-file entries of one zip archive under `dest`
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read archive: {}", archive_path.display()))?;

    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut zip_file = archive
            .by_index(i)
            .with_context(|| format!("Failed to read entry {} of {}", i, archive_path.display()))?;

        if !zip_file.is_file() {
            continue;
        }

        let Some(name) = zip_file.enclosed_name() else {
            warn!("Skipping unsafe entry {:?} in {}", zip_file.name(), archive_path.display());
            continue;
        };
        if let Err(e) = validate_entry_name(&name) {
            warn!("Skipping entry in {}: {}", archive_path.display(), e);
            continue;
        }

        let out_path = dest.join(&name);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut out = File::create(&out_path)
            .with_context(|| format!("Failed to create file: {}", out_path.display()))?;
        io::copy(&mut zip_file, &mut out)
            .with_context(|| format!("Failed to extract: {}", out_path.display()))?;
        debug!("Extracted {}", out_path.display());

        written.push(out_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_expand_archives_into_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        write_zip(&dir.join("mail.zip"), &[("one.mbox", "From a\n"), ("two.mbox", "From b\n")]);
        fs::write(dir.join("plain.mbox"), "x").unwrap();

        let written = expand_archives(dir).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.join("one.mbox")).unwrap(), "From a\n");
        assert_eq!(fs::read_to_string(dir.join("two.mbox")).unwrap(), "From b\n");
    }

    #[test]
    fn test_extract_skips_traversal_entries() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("in");
        fs::create_dir(&dir).unwrap();
        let archive = dir.join("evil.zip");
        write_zip(&archive, &[("../escape.mbox", "x"), ("ok.mbox", "y")]);

        let written = extract_archive(&archive, &dir).unwrap();
        assert_eq!(written, vec![dir.join("ok.mbox")]);
        assert!(!temp_dir.path().join("escape.mbox").exists());
    }

    #[test]
    fn test_extract_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("one.mbox"), "old").unwrap();
        write_zip(&dir.join("mail.zip"), &[("one.mbox", "new")]);

        expand_archives(dir).unwrap();
        assert_eq!(fs::read_to_string(dir.join("one.mbox")).unwrap(), "new");
    }

    #[test]
    fn test_invalid_archive_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.zip"), "not a zip").unwrap();

        let err = expand_archives(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read archive"));
    }

    #[test]
    fn test_no_archives() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mbox"), "x").unwrap();
        assert!(expand_archives(temp_dir.path()).unwrap().is_empty());
    }
}
