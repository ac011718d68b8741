use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};

/// Capture-date tags in priority order
const DATE_TAGS: &[Tag] = &[Tag::DateTimeOriginal, Tag::DateTime];

/// Read the capture date embedded in an image file.
/// Ok(None) means the metadata was readable but held no usable date tag;
/// Err means the container itself could not be parsed.
pub fn extract_exif_date(path: &Path) -> anyhow::Result<Option<NaiveDateTime>> {
    let file = File::open(path)?;
    let reader = Reader::new().read_from_container(&mut BufReader::new(file))?;

    for tag in DATE_TAGS {
        if let Some(field) = reader.get_field(*tag, In::PRIMARY) {
            let val = field.display_value().to_string();
            if let Some(dt) = parse_exif_datetime(&val) {
                return Ok(Some(dt));
            }
        }
    }

    Ok(None)
}

fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s
        .trim()
        .trim_matches('"')
        .replace('-', ":")
        .replace('/', ":")
        .replace('\\', ":")
        .replace('.', ":");

    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(d) = chrono::NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d") {
        return Some(d.and_hms_opt(0, 0, 0)?);
    }

    None
}

/// Minimal little-endian TIFF with DateTime in IFD0 and DateTimeOriginal in
/// the Exif sub-IFD. Both values must be the 19-byte "YYYY:MM:DD HH:MM:SS".
#[cfg(test)]
pub(crate) fn tiff_with_dates(datetime: &str, original: &str) -> Vec<u8> {
    assert_eq!(datetime.len(), 19);
    assert_eq!(original.len(), 19);

    let mut b = Vec::with_capacity(96);
    b.extend_from_slice(b"II*\0");
    b.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset

    // IFD0: DateTime + ExifIFD pointer
    b.extend_from_slice(&2u16.to_le_bytes());
    b.extend_from_slice(&0x0132u16.to_le_bytes()); // DateTime
    b.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    b.extend_from_slice(&20u32.to_le_bytes());
    b.extend_from_slice(&38u32.to_le_bytes());
    b.extend_from_slice(&0x8769u16.to_le_bytes()); // Exif IFD pointer
    b.extend_from_slice(&4u16.to_le_bytes()); // LONG
    b.extend_from_slice(&1u32.to_le_bytes());
    b.extend_from_slice(&58u32.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes()); // next IFD

    b.extend_from_slice(datetime.as_bytes());
    b.push(0);

    // Exif IFD: DateTimeOriginal
    b.extend_from_slice(&1u16.to_le_bytes());
    b.extend_from_slice(&0x9003u16.to_le_bytes()); // DateTimeOriginal
    b.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    b.extend_from_slice(&20u32.to_le_bytes());
    b.extend_from_slice(&76u32.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes()); // next IFD

    b.extend_from_slice(original.as_bytes());
    b.push(0);
    b
}

/// Same, but with only the generic DateTime tag in IFD0.
#[cfg(test)]
pub(crate) fn tiff_with_datetime_only(datetime: &str) -> Vec<u8> {
    assert_eq!(datetime.len(), 19);

    let mut b = Vec::with_capacity(46);
    b.extend_from_slice(b"II*\0");
    b.extend_from_slice(&8u32.to_le_bytes());

    b.extend_from_slice(&1u16.to_le_bytes());
    b.extend_from_slice(&0x0132u16.to_le_bytes());
    b.extend_from_slice(&2u16.to_le_bytes());
    b.extend_from_slice(&20u32.to_le_bytes());
    b.extend_from_slice(&26u32.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes());

    b.extend_from_slice(datetime.as_bytes());
    b.push(0);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_exif_datetime() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_exif_datetime("2024:01:15 14:30:00"), Some(expected));
        assert_eq!(parse_exif_datetime("2024-01-15 14:30:00"), Some(expected));
        assert_eq!(parse_exif_datetime("2024/01/15 14:30:00"), Some(expected));
        assert_eq!(parse_exif_datetime("\"2024:01:15 14:30:00\""), Some(expected));

        // Date-only values get a midnight time
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_exif_datetime("2024:01:15"), Some(midnight));

        assert_eq!(parse_exif_datetime("not a date"), None);
        assert_eq!(parse_exif_datetime(""), None);
    }

    #[test]
    fn test_prefers_datetime_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.tif");
        fs::write(
            &path,
            tiff_with_dates("2001:01:01 01:01:01", "2023:07:04 10:15:00"),
        )
        .unwrap();

        let dt = extract_exif_date(&path).unwrap().unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 7, 4)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_generic_datetime_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("b.tif");
        fs::write(&path, tiff_with_datetime_only("2022:12:25 08:30:00")).unwrap();

        let dt = extract_exif_date(&path).unwrap().unwrap();
        let expected = NaiveDate::from_ymd_opt(2022, 12, 25)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_unreadable_container_is_err() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.jpg");
        fs::write(&path, b"definitely not an image").unwrap();
        assert!(extract_exif_date(&path).is_err());
    }
}
