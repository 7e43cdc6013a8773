//! Import file format detection.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// Kinds of files that can be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// An HTML export
    Html,
    /// A JSON backup envelope (`{ version, date, templates }`)
    Backup,
    /// A single JSON document (`{ name, sections }`)
    Document,
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportFormat::Html => write!(f, "HTML"),
            ImportFormat::Backup => write!(f, "JSON backup"),
            ImportFormat::Document => write!(f, "JSON document"),
        }
    }
}

/// Detect the format of a file on disk.
///
/// # Example
/// ```no_run
/// use mailblock::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("newsletter.html").unwrap();
/// println!("Importing {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImportFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Drop a leading UTF-8 byte order mark.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data)
}

/// Detect the format of file contents.
///
/// HTML is recognised by a leading `<`. JSON objects are told apart by
/// their top-level keys. Anything else is [`Error::UnknownFormat`].
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImportFormat> {
    let data = strip_bom(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or(Error::UnknownFormat)?;

    match data[start] {
        b'<' => Ok(ImportFormat::Html),
        b'{' => {
            let value: serde_json::Value =
                serde_json::from_slice(&data[start..]).map_err(|_| Error::UnknownFormat)?;
            if value.get("templates").is_some_and(|t| t.is_array()) {
                Ok(ImportFormat::Backup)
            } else if value.get("sections").is_some_and(|s| s.is_array()) {
                Ok(ImportFormat::Document)
            } else {
                Err(Error::UnknownFormat)
            }
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes look like an HTML export.
pub fn is_html_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(ImportFormat::Html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html() {
        let format = detect_format_from_bytes(b"\n  <!DOCTYPE html><html></html>").unwrap();
        assert_eq!(format, ImportFormat::Html);
        assert!(is_html_bytes(b"\xEF\xBB\xBF<html>"));
    }

    #[test]
    fn test_detect_backup() {
        let data = br#"{"version":"1.0","date":"2024-01-01T00:00:00Z","templates":[]}"#;
        assert_eq!(detect_format_from_bytes(data).unwrap(), ImportFormat::Backup);
    }

    #[test]
    fn test_detect_document() {
        let data = br#"{"name":"x","sections":[]}"#;
        assert_eq!(
            detect_format_from_bytes(data).unwrap(),
            ImportFormat::Document
        );
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBF{}"), b"{}");
        assert_eq!(strip_bom(b"{}"), b"{}");
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-1.7"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(br#"{"foo": 1}"#),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b"{ broken"),
            Err(Error::UnknownFormat)
        ));
    }
}
