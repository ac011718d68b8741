pub mod exif;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime};

/// Result of date resolution: date + accuracy (0 = best)
pub struct DateResult {
    pub date: NaiveDateTime,
    /// 0 = EXIF capture date, 1 = filesystem mtime fallback
    pub accuracy: u8,
}

/// Resolve when a picture was taken: EXIF capture date first, then the
/// file's modification time in local calendar time. Unreadable metadata is
/// diagnosed and falls through; only a stat failure on the fallback path
/// surfaces as an error.
pub fn resolve_date(path: &Path) -> anyhow::Result<DateResult> {
    match exif::extract_exif_date(path) {
        Ok(Some(date)) => return Ok(DateResult { date, accuracy: 0 }),
        Ok(None) => {}
        Err(e) => eprintln!("Could not read metadata from {}: {}", path.display(), e),
    }

    let modified = fs::metadata(path)?.modified()?;
    let date = DateTime::<Local>::from(modified).naive_local();
    Ok(DateResult { date, accuracy: 1 })
}
