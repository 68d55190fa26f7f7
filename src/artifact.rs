//! Downloadable output artifacts
//!
//! Every workflow ends in a named binary blob the embedding shell offers to
//! the user for download. Naming follows the workflow that produced it.

/// A named binary result offered to the user for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested download file name
    pub file_name: String,
    /// MIME type of the payload
    pub mime_type: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Merge output. Always named `merged.pdf`.
    pub fn merged_pdf(bytes: Vec<u8>) -> Self {
        Self {
            file_name: "merged.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes,
        }
    }

    /// Split output, named after the source file: `split_<originalname>`.
    pub fn split_pdf(original_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("split_{}", original_name),
            mime_type: "application/pdf".to_string(),
            bytes,
        }
    }

    /// Text export, named after the source file with its extension replaced
    /// by `.txt`.
    pub fn text_export(original_name: &str, text: &str) -> Self {
        let stem = original_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(original_name);
        Self {
            file_name: format!("{}.txt", stem),
            mime_type: "text/plain; charset=utf-8".to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }
}
