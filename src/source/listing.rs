//! Directory listing backend for the file picker

use crate::error::{Error, Result};
use crate::source::file::is_pdf_path;
use std::path::Path;

/// One PDF file visible to the picker
#[derive(Debug, Clone)]
pub struct PdfFileInfo {
    /// Full path to the PDF file
    pub path: String,
    /// Filename only
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Last modified time (RFC 3339 format)
    pub modified: Option<String>,
}

/// List PDF files under `directory`, sorted by path.
///
/// `pattern` is a glob applied to file names (e.g. "report*.pdf").
pub fn list_pdf_files<P: AsRef<Path>>(
    directory: P,
    recursive: bool,
    pattern: Option<&str>,
) -> Result<Vec<PdfFileInfo>> {
    let dir_path = directory.as_ref();

    if !dir_path.exists() {
        return Err(Error::PdfNotFound {
            path: dir_path.display().to_string(),
        });
    }

    if !dir_path.is_dir() {
        return Err(Error::Validation {
            reason: format!("{} is not a directory", dir_path.display()),
        });
    }

    // Compile glob pattern if provided
    let pattern = pattern.and_then(|p| glob::Pattern::new(p).ok());

    let mut files = Vec::new();
    collect_pdfs(dir_path, recursive, &pattern, &mut files)?;

    // Sort by path for consistent ordering
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(files)
}

fn collect_pdfs(
    dir: &Path,
    recursive: bool,
    pattern: &Option<glob::Pattern>,
    files: &mut Vec<PdfFileInfo>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(Error::Io)?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // Skip entries we can't read
        };

        let path = entry.path();

        if path.is_dir() {
            if recursive {
                let _ = collect_pdfs(&path, recursive, pattern, files);
            }
        } else if path.is_file() && is_pdf_path(&path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            // Apply pattern filter if provided
            if let Some(ref pat) = pattern {
                if !pat.matches(&name) {
                    continue;
                }
            }

            // Get file metadata
            let metadata = std::fs::metadata(&path).ok();
            let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
            let modified = metadata
                .as_ref()
                .and_then(|m| m.modified().ok())
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| {
                    chrono::DateTime::from_timestamp(d.as_secs() as i64, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default()
                });

            files.push(PdfFileInfo {
                path: path.to_string_lossy().to_string(),
                name,
                size,
                modified,
            });
        }
    }

    Ok(())
}
