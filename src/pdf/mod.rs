//! PDF facade layer
//!
//! Narrow capability interfaces over the external PDF libraries: PDFium for
//! read access (page counts, thumbnails, text content) and qpdf for
//! page-level mutation (merge, page extraction). The controllers depend on
//! these traits, never on the libraries directly.

mod access;
mod mutate;

pub use access::PdfiumAccess;
pub use mutate::QpdfMutate;

use crate::error::Result;

/// Rendered page thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageThumbnail {
    /// Page number (1-indexed)
    pub page: u32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Base64-encoded PNG image data
    pub data_base64: String,
    /// MIME type (always "image/png")
    pub mime_type: String,
}

/// Read access to a PDF buffer
pub trait PdfAccess {
    /// Number of pages in the document.
    fn page_count(&self, data: &[u8]) -> Result<u32>;

    /// Render one page at a fixed reduced scale for the selection UI.
    fn render_thumbnail(&self, data: &[u8], page: u32) -> Result<PageThumbnail>;

    /// Text runs of one page in document order, joined by single spaces.
    fn extract_page_text(&self, data: &[u8], page: u32) -> Result<String>;

    /// Text of every page in order, each prefixed with a `--- Page k ---`
    /// marker for navigability.
    fn extract_all_text(&self, data: &[u8]) -> Result<String>;
}

/// Page-level mutation of PDF buffers
pub trait PdfMutate {
    /// Merge the inputs into one document, appending every page of each
    /// input in the given order. Partial work is discarded on failure.
    fn merge_in_order(&self, inputs: &[&[u8]]) -> Result<Vec<u8>>;

    /// New document containing exactly the requested 1-based pages, copied
    /// in the order given by the caller.
    fn extract_pages(&self, data: &[u8], pages: &[u32]) -> Result<Vec<u8>>;
}
