//! Recursive folder listing.
//!
//! [`list_files`] walks a directory tree and returns the files inside it as
//! paths relative to the scanned folder:
//!
//! ```text
//! inputs/                  list_files(inputs, None, None)
//! ├── b.png                  → b.png
//! ├── a.jpg                  → a.jpg      (root files first)
//! └── refs/
//!     └── pose.png           → refs/pose.png
//! ```
//!
//! ## Ordering
//!
//! Files directly in the scanned folder come before files in any
//! subdirectory. Within each group, entries are in path order.
//!
//! ## Filters
//!
//! - **Extensions**: dot-prefixed (`".png"`), matched case-insensitively.
//! - **Name filter**: case-sensitive substring of the file name without its
//!   extension.
//!
//! Symlinks to files are listed under their link name. Entries that cannot
//! be read (e.g. a subdirectory without permission) are skipped with a
//! warning rather than failing the whole listing.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ListError {
    #[error("not a valid directory: {0}")]
    NotADirectory(PathBuf),
}

/// List files under `folder`, optionally filtered by extension and name.
///
/// # Arguments
/// * `folder` - Directory to walk recursively
/// * `extensions` - Dot-prefixed extensions to keep (case-insensitive); `None` keeps all
/// * `name_filter` - Substring the file stem must contain; `None` keeps all
///
/// # Errors
/// [`ListError::NotADirectory`] if `folder` does not exist or is not a directory.
pub fn list_files<S: AsRef<str>>(
    folder: &Path,
    extensions: Option<&[S]>,
    name_filter: Option<&str>,
) -> Result<Vec<PathBuf>, ListError> {
    if !folder.is_dir() {
        return Err(ListError::NotADirectory(folder.to_path_buf()));
    }

    let extensions: Option<Vec<String>> =
        extensions.map(|exts| exts.iter().map(|e| e.as_ref().to_lowercase()).collect());

    let mut files = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !is_file(&entry) {
            continue;
        }
        let path = entry.path();

        if let Some(exts) = &extensions
            && !exts.contains(&dotted_extension(path))
        {
            continue;
        }
        if let Some(filter) = name_filter
            && !file_stem(path).contains(filter)
        {
            continue;
        }

        // Entries from WalkDir::new(folder) always live under folder
        if let Ok(relative) = path.strip_prefix(folder) {
            files.push(relative.to_path_buf());
        }
    }

    files.sort_by(|a, b| in_root(b).cmp(&in_root(a)).then_with(|| a.cmp(b)));
    Ok(files)
}

/// Lowercased extension with its leading dot, or `""` when there is none.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Regular files, plus symlinks whose target is a file. Symlinked
/// directories are not descended into.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn in_root(relative: &Path) -> bool {
    relative.components().count() == 1
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
