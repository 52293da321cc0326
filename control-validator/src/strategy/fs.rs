//! Filesystem document source.
//!
//! Discovers control documents on disk and reads them for the check pipeline.
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth is enforced
//! - Reads are bounded so an oversized file cannot exhaust memory

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{CheckError, CheckErrorKind, DiscoveryError};
use crate::strategy::ContentFormat;

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

#[cfg(unix)]
fn is_special_file(entry: &walkdir::DirEntry) -> bool {
    use std::os::unix::fs::FileTypeExt;
    entry.metadata().map(|m| m.file_type()).is_ok_and(|ft| {
        ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket()
    })
}

#[cfg(not(unix))]
fn is_special_file(_entry: &walkdir::DirEntry) -> bool {
    false
}

/// Find all control documents under the configured roots.
///
/// Roots that do not exist contribute nothing; an absent `framework/` is an
/// empty run, not a failure. The result is sorted and de-duplicated.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if an exclude pattern is malformed or directory
/// traversal fails (permission denied, symlink loop, ...).
pub fn find_files(config: &FsSourceConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    let exclude_patterns = config
        .exclude
        .iter()
        .map(|pat| {
            Pattern::new(pat).map_err(|source| DiscoveryError::InvalidExcludePattern {
                pattern: pat.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();

    for root in &config.paths {
        if root.is_file() {
            if matches_extension(root, &config.extensions)
                && !matches_exclude(root, &exclude_patterns)
            {
                files.push(root.clone());
            }
            continue;
        }

        if !root.is_dir() {
            warn!(root = %root.display(), "scan root does not exist, skipping");
            continue;
        }

        debug!(root = %root.display(), "scanning");

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = entry_result.map_err(|source| DiscoveryError::Walk {
                path: source
                    .path()
                    .map_or_else(|| root.clone(), Path::to_path_buf),
                source,
            })?;

            let file_path = entry.path();

            if !file_path.is_file() || is_special_file(&entry) {
                continue;
            }

            if !matches_extension(file_path, &config.extensions)
                || matches_exclude(file_path, &exclude_patterns)
            {
                continue;
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Determine the parser for a discovered file. Anything that is not `.json`
/// is read as YAML.
#[must_use]
pub fn content_format_for(path: &Path) -> ContentFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => ContentFormat::Json,
        _ => ContentFormat::Yaml,
    }
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// The handle is dropped before this function returns, so it is released
/// before any parsing happens.
///
/// # Errors
///
/// Returns a [`CheckError`] if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, CheckError> {
    let file = std::fs::File::open(path)
        .map_err(|e| CheckError::new(CheckErrorKind::Io, format!("Failed to open file: {e}")))?;

    // Read one byte past the limit to detect oversized files.
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| CheckError::new(CheckErrorKind::Io, format!("Failed to read file: {e}")))?;

    if buffer.len() as u64 > max_file_size {
        return Err(CheckError::new(
            CheckErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer)
        .map_err(|_| CheckError::new(CheckErrorKind::InvalidEncoding, "File is not valid UTF-8"))
}
