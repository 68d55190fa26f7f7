//! User-selected file handles

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A user-selected PDF file: a display name plus the origin path.
///
/// The binary buffer is read fresh from the origin on every operation that
/// needs it; nothing is cached between operations. The controller that
/// loaded the file owns it and drops it when the user resets or replaces
/// the selection.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    origin: PathBuf,
}

impl SourceFile {
    /// Register a user-selected file. Rejects non-PDF paths and paths that
    /// do not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !is_pdf_path(path) {
            return Err(Error::UnsupportedFileType {
                path: path.display().to_string(),
            });
        }

        if !path.exists() {
            return Err(Error::PdfNotFound {
                path: path.display().to_string(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            origin: path.to_path_buf(),
        })
    }

    /// Display name shown in file lists and used for artifact naming.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Origin path the buffer is read from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Read the full file contents. Always a fresh read of the origin.
    pub fn read(&self) -> Result<Vec<u8>> {
        if !self.origin.exists() {
            return Err(Error::PdfNotFound {
                path: self.origin.display().to_string(),
            });
        }

        let data = std::fs::read(&self.origin).map_err(Error::Io)?;

        // Validate PDF header
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::InvalidPdf {
                reason: "Not a valid PDF file".to_string(),
            });
        }

        Ok(data)
    }
}

/// Type filter for the picker: accepts only `.pdf` paths.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Drop non-PDF paths from a multi-select, preserving order.
pub fn filter_pdf_paths<'a, P: AsRef<Path>>(paths: &'a [P]) -> Vec<&'a Path> {
    paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| is_pdf_path(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_path() {
        assert!(is_pdf_path(Path::new("document.pdf")));
        assert!(is_pdf_path(Path::new("document.PDF")));
        assert!(!is_pdf_path(Path::new("document.txt")));
        assert!(!is_pdf_path(Path::new("document")));
    }

    #[test]
    fn test_filter_pdf_paths_preserves_order() {
        let paths = ["a.pdf", "b.txt", "c.pdf", "d.png"];
        let filtered = filter_pdf_paths(&paths);
        assert_eq!(filtered, vec![Path::new("a.pdf"), Path::new("c.pdf")]);
    }

    #[test]
    fn test_open_rejects_non_pdf() {
        let result = SourceFile::open("/tmp/file.txt");
        assert!(matches!(result, Err(Error::UnsupportedFileType { .. })));
    }

    #[test]
    fn test_open_missing_file() {
        let result = SourceFile::open("/nonexistent/path/file.pdf");
        assert!(matches!(result, Err(Error::PdfNotFound { .. })));
    }

    #[test]
    fn test_read_is_fresh_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4 first").unwrap();

        let file = SourceFile::open(&path).unwrap();
        assert_eq!(file.read().unwrap(), b"%PDF-1.4 first");

        // The buffer is re-read from the origin, so an updated file is
        // picked up on the next operation.
        std::fs::write(&path, b"%PDF-1.4 second").unwrap();
        assert_eq!(file.read().unwrap(), b"%PDF-1.4 second");
    }

    #[test]
    fn test_read_rejects_non_pdf_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"plain text").unwrap();

        let file = SourceFile::open(&path).unwrap();
        assert!(matches!(file.read(), Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_read_after_origin_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = SourceFile::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(file.read(), Err(Error::PdfNotFound { .. })));
    }
}
