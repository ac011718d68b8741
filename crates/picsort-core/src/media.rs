use std::path::PathBuf;

/// Recognized image extensions (matched case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "heic", "heif", "raw", "cr2", "nef", "arw",
];

#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Full path of the file at scan time (identity until relocated)
    pub path: PathBuf,
    /// Just the filename
    pub filename: String,
}

impl MediaFile {
    /// Build a MediaFile if the path carries a recognized image extension.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        if !is_image_extension(ext) {
            return None;
        }
        let filename = path.file_name()?.to_str()?.to_string();
        Some(Self { path, filename })
    }
}

/// Check an extension (without the dot) against the allow-list.
pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}
