pub mod date;
pub mod media;
pub mod scan;
pub mod writer;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::media::MediaFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeOptions {
    /// Root directory to organize; destination folders are created under it
    pub source: PathBuf,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeSummary {
    pub found: u64,
    pub moved: u64,
    pub errors: u64,
    pub skipped: u64,
}

/// Per-run notifications delivered to the caller's sink.
#[derive(Debug, Clone)]
pub enum Event {
    /// Traversal finished; emitted before any file is processed
    Scanned { root: PathBuf, count: u64 },
    /// Destination name collided and was rewritten with a -copy suffix
    Duplicate { filename: String, renamed: String },
    /// Dry-run only: where the file would go ("YYYY/MM/DD")
    WouldMove { filename: String, folder: String },
    /// File relocated and stamped with its capture date
    Moved {
        filename: String,
        folder: String,
        date: NaiveDateTime,
    },
    /// File already sits in its correct date folder; nothing to do
    AlreadyInPlace { filename: String },
    /// Processing this file failed; the batch continues
    Error { filename: String, message: String },
}

/// Type alias for the event callback
pub type EventSink<'a> = dyn Fn(&Event) + 'a;

enum Outcome {
    Moved,
    WouldMove,
    InPlace,
}

/// Run the traversal-classify-relocate pipeline over `options.source`.
/// Per-file failures are reported through the sink and tallied; only a
/// missing root directory aborts the run.
pub fn organize(options: &OrganizeOptions, sink: &EventSink<'_>) -> anyhow::Result<OrganizeSummary> {
    let root = options.source.as_path();
    if !root.is_dir() {
        bail!("directory not found: {}", root.display());
    }

    let media = scan::scan_images(root);
    sink(&Event::Scanned {
        root: root.to_path_buf(),
        count: media.len() as u64,
    });

    let mut summary = OrganizeSummary {
        found: media.len() as u64,
        ..Default::default()
    };
    let mut used_paths: HashSet<PathBuf> = HashSet::new();

    for m in &media {
        match organize_one(root, m, options.dry_run, &mut used_paths, sink) {
            Ok(Outcome::Moved) => summary.moved += 1,
            Ok(_) => {}
            Err(e) => {
                summary.errors += 1;
                sink(&Event::Error {
                    filename: m.filename.clone(),
                    message: format!("{:#}", e),
                });
            }
        }
    }

    summary.skipped = summary.found - summary.moved - summary.errors;
    Ok(summary)
}

fn organize_one(
    root: &Path,
    media: &MediaFile,
    dry_run: bool,
    used_paths: &mut HashSet<PathBuf>,
    sink: &EventSink<'_>,
) -> anyhow::Result<Outcome> {
    let resolved = date::resolve_date(&media.path)?;
    let folder = writer::date_folder(root, &resolved.date);
    let folder_label = resolved.date.format("%Y/%m/%d").to_string();

    // Destination equals source: already in its date folder, leave it alone
    if folder.join(&media.filename) == media.path {
        used_paths.insert(media.path.clone());
        sink(&Event::AlreadyInPlace {
            filename: media.filename.clone(),
        });
        return Ok(Outcome::InPlace);
    }

    let (dest, renamed) = writer::resolve_collision(&folder, &media.filename, used_paths);
    if renamed {
        let new_name = dest
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        sink(&Event::Duplicate {
            filename: media.filename.clone(),
            renamed: new_name,
        });
    }

    if dry_run {
        used_paths.insert(dest);
        sink(&Event::WouldMove {
            filename: media.filename.clone(),
            folder: folder_label,
        });
        return Ok(Outcome::WouldMove);
    }

    fs::create_dir_all(&folder)
        .with_context(|| format!("creating {}", folder.display()))?;
    writer::move_file(&media.path, &dest)
        .with_context(|| format!("moving to {}", dest.display()))?;
    writer::apply_timestamps(&dest, &resolved.date)
        .with_context(|| format!("setting timestamps on {}", dest.display()))?;

    used_paths.insert(dest);
    sink(&Event::Moved {
        filename: media.filename.clone(),
        folder: folder_label,
        date: resolved.date,
    });
    Ok(Outcome::Moved)
}
