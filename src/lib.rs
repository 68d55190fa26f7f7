//! PDF Toolbox Library
//!
//! This crate provides the engine of a client-side PDF utility:
//! - `MergeTool`: combine multiple PDFs into one, in user-chosen order
//! - `SplitTool`: extract a selected subset of pages into a new PDF
//! - `ExtractTextTool`: export the full text of a PDF
//! - `AiEditTool`: rewrite one page's text with a remote AI model
//!
//! PDF parsing and writing are delegated to PDFium and qpdf behind the
//! narrow `PdfAccess`/`PdfMutate` traits; text generation is delegated to a
//! remote endpoint behind the `TextModel` trait. An embedding shell drives
//! the controllers and offers the produced `Artifact`s for download.

pub mod ai;
pub mod artifact;
pub mod config;
pub mod error;
pub mod pdf;
pub mod source;
pub mod tools;

pub use ai::{GeminiClient, TextModel};
pub use artifact::Artifact;
pub use config::{AiConfig, ToolboxConfig};
pub use error::{Error, Result};
pub use pdf::{PageThumbnail, PdfAccess, PdfMutate, PdfiumAccess, QpdfMutate};
pub use tools::{
    AiEditTool, ExtractTextTool, MergeTool, PageSelection, Phase, SplitTool, DEFAULT_PROMPT,
    PRESET_PROMPTS,
};
