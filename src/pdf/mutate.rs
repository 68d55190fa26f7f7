//! qpdf-backed page-level mutation
//!
//! Merging and page extraction build a fresh output document and copy pages
//! into it; the source buffers are never modified.

use crate::error::{Error, Result};
use crate::pdf::PdfMutate;
use qpdf::QPdf;

/// Mutation facade over qpdf
#[derive(Debug, Clone, Default)]
pub struct QpdfMutate;

/// Map qpdf crate errors to our error type
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    Error::Qpdf {
        reason: e.to_string(),
    }
}

impl QpdfMutate {
    pub fn new() -> Self {
        Self
    }

    /// Page count of a serialized document. Lets callers verify outputs
    /// without pulling in the rendering stack.
    pub fn page_count(data: &[u8]) -> Result<u32> {
        let qpdf = QPdf::read_from_memory(data).map_err(|e| Error::InvalidPdf {
            reason: e.to_string(),
        })?;
        qpdf.get_num_pages().map_err(map_qpdf_error)
    }
}

impl PdfMutate for QpdfMutate {
    fn merge_in_order(&self, inputs: &[&[u8]]) -> Result<Vec<u8>> {
        if inputs.is_empty() {
            return Err(Error::Qpdf {
                reason: "No input PDFs provided".to_string(),
            });
        }

        let dest = QPdf::empty();

        for (i, input_data) in inputs.iter().enumerate() {
            let source = QPdf::read_from_memory(input_data).map_err(|e| Error::InvalidPdf {
                reason: format!("Failed to read input PDF {}: {}", i, e),
            })?;

            let pages = source.get_pages().map_err(|e| Error::Qpdf {
                reason: format!("Failed to get pages from input PDF {}: {}", i, e),
            })?;

            for page in &pages {
                let copied = dest.copy_from_foreign(page);
                dest.add_page(&copied, false).map_err(map_qpdf_error)?;
            }
        }

        dest.writer().write_to_memory().map_err(map_qpdf_error)
    }

    fn extract_pages(&self, data: &[u8], pages: &[u32]) -> Result<Vec<u8>> {
        let source = QPdf::read_from_memory(data).map_err(|e| Error::InvalidPdf {
            reason: e.to_string(),
        })?;
        let total = source.get_num_pages().map_err(map_qpdf_error)?;

        // Bounds-check the whole selection up front so a bad index never
        // leaves a partial output behind.
        for &page in pages {
            if page < 1 || page > total {
                return Err(Error::PageOutOfBounds { page, total });
            }
        }

        let dest = QPdf::empty();

        for &page in pages {
            let src_page = source
                .get_page(page - 1)
                .ok_or(Error::PageOutOfBounds { page, total })?;
            let copied = dest.copy_from_foreign(&src_page);
            dest.add_page(&copied, false).map_err(map_qpdf_error)?;
        }

        let mut writer = dest.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_empty_input() {
        let mutate = QpdfMutate::new();
        assert!(mutate.merge_in_order(&[]).is_err());
    }

    #[test]
    fn test_merge_invalid_data() {
        let mutate = QpdfMutate::new();
        let result = mutate.merge_in_order(&[b"not a valid PDF"]);
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_extract_pages_invalid_data() {
        let mutate = QpdfMutate::new();
        let result = mutate.extract_pages(b"not a valid PDF", &[1]);
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_page_count_invalid_data() {
        let result = QpdfMutate::page_count(b"not a valid PDF");
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }
}
