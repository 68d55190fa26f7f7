//! File intake and session-local caching

pub mod cache;
pub mod file;
pub mod listing;

pub use cache::ThumbnailCache;
pub use file::{filter_pdf_paths, is_pdf_path, SourceFile};
pub use listing::{list_pdf_files, PdfFileInfo};
