use std::path::Path;

use walkdir::WalkDir;

use crate::media::MediaFile;

/// Recursively collect every image file under `root`, at any depth.
/// Entries that cannot be read are skipped.
pub fn scan_images(root: &Path) -> Vec<MediaFile> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| MediaFile::from_path(entry.into_path()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_recurses_and_filters() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.jpg"), b"x").unwrap();
        fs::write(root.join("a/nested.PNG"), b"x").unwrap();
        fs::write(root.join("a/b/deep.nef"), b"x").unwrap();
        fs::write(root.join("a/notes.txt"), b"x").unwrap();
        fs::write(root.join("noext"), b"x").unwrap();

        let mut names: Vec<String> = scan_images(root).into_iter().map(|m| m.filename).collect();
        names.sort();
        assert_eq!(names, vec!["deep.nef", "nested.PNG", "top.jpg"]);
    }

    #[test]
    fn test_scan_includes_prior_output_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2023/07/04")).unwrap();
        fs::write(root.join("2023/07/04/photo.jpg"), b"x").unwrap();

        let found = scan_images(root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, root.join("2023/07/04/photo.jpg"));
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(scan_images(dir.path()).is_empty());
    }
}
