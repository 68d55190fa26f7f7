//! Error types for pdf-toolbox

use thiserror::Error;

/// Result type alias for pdf-toolbox
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pdf-toolbox
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// File rejected by the PDF type filter
    #[error("Unsupported file type: {path}")]
    UnsupportedFileType { path: String },

    /// Page out of bounds
    #[error("Page {page} out of bounds (total: {total})")]
    PageOutOfBounds { page: u32, total: u32 },

    /// User action violated a precondition (too few files, empty selection,
    /// empty prompt or extracted text)
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// AI text service failure (transport, status, or empty input)
    #[error("AI request failed: {reason}")]
    AiRequest { reason: String },

    /// AI response exceeded the configured byte cap
    #[error("Response too large: {size} bytes (max: {max_size} bytes)")]
    ResponseTooLarge { size: u64, max_size: u64 },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// qpdf error
    #[error("qpdf error: {reason}")]
    Qpdf { reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Return a single human-readable message safe to show in the UI.
    /// Internal details (paths, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::PdfNotFound { .. } => "PDF not found".to_string(),
            Error::InvalidPdf { .. } => {
                "Could not read the PDF file. It might be corrupted.".to_string()
            }
            Error::UnsupportedFileType { .. } => "Only PDF files are supported".to_string(),
            Error::PageOutOfBounds { page, total } => {
                format!("Page {} out of bounds (total: {})", page, total)
            }
            Error::Validation { reason } => reason.clone(),
            Error::AiRequest { .. } => "An AI processing error occurred.".to_string(),
            Error::ResponseTooLarge { max_size, .. } => {
                format!("AI response exceeds maximum size of {} bytes", max_size)
            }
            Error::HttpRequest(_) => "HTTP request failed".to_string(),
            Error::Io(_) => "I/O error".to_string(),
            Error::Pdfium { .. } => "PDF processing error".to_string(),
            Error::Qpdf { .. } => "PDF processing error".to_string(),
            Error::Serialization(_) => "Serialization error".to_string(),
        }
    }
}
