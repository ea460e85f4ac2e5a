//! Output filename generation.
//!
//! Generated images are grouped into one folder per day, and each file name
//! carries the full timestamp plus a random four-digit suffix:
//!
//! ```text
//! outputs/
//! └── 2026-10-19/
//!     ├── 2026-10-19_14-03-52_4821.png
//!     └── 2026-10-19_14-04-10_1307.png
//! ```
//!
//! The suffix only keeps two files written in the same second apart; it is
//! not meant to be unguessable. Nothing here touches the disk beyond
//! resolving symlinks in the part of the path that already exists: creating
//! the date folder and the file is left to the caller.

use chrono::{Local, NaiveDateTime};
use rand::Rng;
use std::io;
use std::path::{Component, Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Result of [`generate_temp_filename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempFilename {
    /// Date folder name, `YYYY-MM-DD`.
    pub date: String,
    /// Absolute path: `folder/date/filename`, symlinks resolved.
    pub path: PathBuf,
    /// Bare file name, `YYYY-MM-DD_HH-MM-SS_NNNN.ext`.
    pub filename: String,
}

/// Build a date-partitioned output path for the current local time.
pub fn generate_temp_filename(folder: &Path, extension: &str) -> io::Result<TempFilename> {
    let suffix = rand::rng().random_range(1000..=9999);
    temp_filename_at(folder, extension, Local::now().naive_local(), suffix)
}

/// Build the output path for a fixed timestamp and suffix.
pub fn temp_filename_at(
    folder: &Path,
    extension: &str,
    now: NaiveDateTime,
    suffix: u16,
) -> io::Result<TempFilename> {
    let date = now.format(DATE_FORMAT).to_string();
    let filename = format!("{}_{suffix}.{extension}", now.format(TIME_FORMAT));
    let path = resolve_path(&folder.join(&date).join(&filename))?;
    Ok(TempFilename {
        date,
        path,
        filename,
    })
}

/// Make `path` absolute, resolving symlinks in its longest existing prefix.
///
/// Unlike [`std::fs::canonicalize`], this works for paths that do not exist
/// yet. Components are applied left to right: `.` is dropped, `..` removes
/// the last resolved component, and every prefix that exists on disk is
/// canonicalized before the next component is added.
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let mut resolved = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(real) = resolved.canonicalize() {
                    resolved = real;
                }
            }
            root => resolved.push(root),
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap()
    }

    #[test]
    fn filename_has_date_time_and_suffix() {
        let tmp = TempDir::new().unwrap();
        let name = temp_filename_at(tmp.path(), "png", sample_time(), 4821).unwrap();

        assert_eq!(name.date, "2026-03-07");
        assert_eq!(name.filename, "2026-03-07_09-05-01_4821.png");
    }

    #[test]
    fn path_is_date_partitioned_and_absolute() {
        let tmp = TempDir::new().unwrap();
        let name = temp_filename_at(tmp.path(), "jpg", sample_time(), 1000).unwrap();

        let expected = tmp
            .path()
            .canonicalize()
            .unwrap()
            .join("2026-03-07")
            .join("2026-03-07_09-05-01_1000.jpg");
        assert_eq!(name.path, expected);
        assert!(name.path.is_absolute());
    }

    #[test]
    fn nothing_is_created_on_disk() {
        let tmp = TempDir::new().unwrap();
        let outputs = tmp.path().join("outputs");
        let name = temp_filename_at(&outputs, "png", sample_time(), 1234).unwrap();

        assert!(!outputs.exists());
        assert!(name.path.starts_with(tmp.path().canonicalize().unwrap()));
        assert!(name.path.ends_with("outputs/2026-03-07/2026-03-07_09-05-01_1234.png"));
    }

    #[test]
    fn dot_segments_in_missing_tail_are_collapsed() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("outputs/../renders/./final");
        let name = temp_filename_at(&folder, "png", sample_time(), 4321).unwrap();

        let expected = tmp
            .path()
            .canonicalize()
            .unwrap()
            .join("renders/final/2026-03-07/2026-03-07_09-05-01_4321.png");
        assert_eq!(name.path, expected);
        assert!(!tmp.path().join("outputs").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_folder_is_resolved() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let name = temp_filename_at(&link, "png", sample_time(), 2000).unwrap();
        assert!(name.path.starts_with(real.canonicalize().unwrap()));
    }

    #[test]
    fn random_suffix_is_four_digits() {
        let tmp = TempDir::new().unwrap();
        for _ in 0..50 {
            let name = generate_temp_filename(tmp.path(), "png").unwrap();
            let stem = name.filename.trim_end_matches(".png");
            let suffix: u32 = stem.rsplit('_').next().unwrap().parse().unwrap();
            assert!((1000..=9999).contains(&suffix));
            assert!(name.path.ends_with(Path::new(&name.date).join(&name.filename)));
        }
    }
}
