use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use filetime::FileTime;

/// Destination folder for a capture date: `<root>/YYYY/MM/DD`
pub fn date_folder(root: &Path, date: &NaiveDateTime) -> PathBuf {
    root.join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(date.format("%d").to_string())
}

/// Pick a destination inside `folder` that collides with neither the
/// filesystem nor a path already claimed this run. Returns the path and
/// whether the filename had to be rewritten.
pub fn resolve_collision(
    folder: &Path,
    filename: &str,
    used_paths: &HashSet<PathBuf>,
) -> (PathBuf, bool) {
    let base = folder.join(filename);
    if !used_paths.contains(&base) && !base.exists() {
        return (base, false);
    }

    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    // -copy, then -copy2, -copy3, ... until an unused name is found
    let mut counter = 1u32;
    loop {
        let suffix = if counter == 1 {
            "-copy".to_string()
        } else {
            format!("-copy{}", counter)
        };
        let new_name = if ext.is_empty() {
            format!("{}{}", stem, suffix)
        } else {
            format!("{}{}.{}", stem, suffix, ext)
        };
        let candidate = folder.join(&new_name);
        if !used_paths.contains(&candidate) && !candidate.exists() {
            return (candidate, true);
        }
        counter += 1;
    }
}

/// Move a file with rename semantics, falling back to copy+delete when the
/// rename fails (e.g. destination on another filesystem).
pub fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
    }
}

/// Stamp access and modification time with the capture date, plus creation
/// time where the platform records one. EXIF datetimes carry no timezone;
/// they are interpreted as local time.
pub fn apply_timestamps(path: &Path, date: &NaiveDateTime) -> io::Result<()> {
    let Some(local) = date.and_local_timezone(Local).earliest() else {
        return Ok(());
    };
    let ft = FileTime::from_unix_time(local.timestamp(), 0);
    filetime::set_file_times(path, ft, ft)?;
    set_creation_time(path, ft)
}

#[cfg(windows)]
fn set_creation_time(path: &Path, ft: FileTime) -> io::Result<()> {
    filetime_creation::set_file_ctime(path, ft)
}

/// Creation time cannot be rewritten on this platform; not an error.
#[cfg(not(windows))]
fn set_creation_time(_path: &Path, _ft: FileTime) -> io::Result<()> {
    Ok(())
}
