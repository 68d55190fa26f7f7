//! PDFium-backed read access

use crate::error::{Error, Result};
use crate::pdf::{PageThumbnail, PdfAccess};
use base64::Engine;
use pdfium_render::prelude::*;

/// Default thumbnail scale. Thumbnails are previews for the page-selection
/// grid, so they render at half size.
pub const DEFAULT_THUMBNAIL_SCALE: f32 = 0.5;

/// Get a PDFium instance (creates a new instance each time - PDFium is not
/// thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to system library or use static linking
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Read facade over PDFium
#[derive(Debug, Clone)]
pub struct PdfiumAccess {
    thumbnail_scale: f32,
}

impl PdfiumAccess {
    pub fn new() -> Self {
        Self {
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
        }
    }

    pub fn with_thumbnail_scale(scale: f32) -> Self {
        Self {
            thumbnail_scale: scale,
        }
    }

    /// True when a PDFium library can be bound in this environment.
    pub fn available() -> bool {
        create_pdfium().is_ok()
    }

    fn load_document<'a>(pdfium: &'a Pdfium, data: &'a [u8]) -> Result<PdfDocument<'a>> {
        pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| Error::InvalidPdf {
                reason: format!("{}", e),
            })
    }
}

impl Default for PdfiumAccess {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject buffers without the PDF header before touching the library.
fn validate_header(data: &[u8]) -> Result<()> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }
    Ok(())
}

impl PdfAccess for PdfiumAccess {
    fn page_count(&self, data: &[u8]) -> Result<u32> {
        validate_header(data)?;
        let pdfium = create_pdfium()?;
        let document = Self::load_document(&pdfium, data)?;
        Ok(document.pages().len() as u32)
    }

    fn render_thumbnail(&self, data: &[u8], page: u32) -> Result<PageThumbnail> {
        validate_header(data)?;
        let pdfium = create_pdfium()?;
        let document = Self::load_document(&pdfium, data)?;
        let pages = document.pages();
        let total = pages.len() as u32;

        if page < 1 || page > total {
            return Err(Error::PageOutOfBounds { page, total });
        }

        let pdf_page = pages.get((page - 1) as u16).map_err(|e| Error::Pdfium {
            reason: format!("Failed to get page {}: {}", page, e),
        })?;

        let config = PdfRenderConfig::new().scale_page_by_factor(self.thumbnail_scale);

        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to render page {}: {}", page, e),
            })?;

        let dynamic_image = bitmap.as_image();
        let width = dynamic_image.width();
        let height = dynamic_image.height();

        // Encode as PNG
        let mut png_bytes = Vec::new();
        dynamic_image
            .write_to(
                &mut std::io::Cursor::new(&mut png_bytes),
                image::ImageFormat::Png,
            )
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to encode page {} as PNG: {}", page, e),
            })?;

        let data_base64 = base64::engine::general_purpose::STANDARD.encode(&png_bytes);

        Ok(PageThumbnail {
            page,
            width,
            height,
            data_base64,
            mime_type: "image/png".to_string(),
        })
    }

    fn extract_page_text(&self, data: &[u8], page: u32) -> Result<String> {
        validate_header(data)?;
        let pdfium = create_pdfium()?;
        let document = Self::load_document(&pdfium, data)?;
        let pages = document.pages();
        let total = pages.len() as u32;

        if page < 1 || page > total {
            return Err(Error::PageOutOfBounds { page, total });
        }

        let pdf_page = pages.get((page - 1) as u16).map_err(|e| Error::Pdfium {
            reason: format!("Failed to get page {}: {}", page, e),
        })?;

        page_text_runs(&pdf_page)
    }

    fn extract_all_text(&self, data: &[u8]) -> Result<String> {
        validate_header(data)?;
        let pdfium = create_pdfium()?;
        let document = Self::load_document(&pdfium, data)?;
        let pages = document.pages();

        let mut all_text = String::new();

        for index in 0..pages.len() {
            let pdf_page = pages.get(index).map_err(|e| Error::Pdfium {
                reason: format!("Failed to get page {}: {}", index + 1, e),
            })?;

            let text = page_text_runs(&pdf_page)?;
            // Page marker keeps the concatenated output navigable
            all_text.push_str(&format!("--- Page {} ---\n\n{}\n\n", index + 1, text));
        }

        Ok(all_text)
    }
}

/// Concatenate the text runs of a page in document order, joined by single
/// spaces.
fn page_text_runs(page: &PdfPage) -> Result<String> {
    let text_obj = match page.text() {
        Ok(t) => t,
        Err(_) => return Ok(String::new()),
    };

    let mut runs: Vec<String> = Vec::new();

    for segment in text_obj.segments().iter() {
        let mut run = String::new();
        if let Ok(chars) = segment.chars() {
            for char_result in chars.iter() {
                if let Some(c) = char_result.unicode_char() {
                    run.push(c);
                }
            }
        }

        let trimmed = run.trim();
        if !trimmed.is_empty() {
            runs.push(trimmed.to_string());
        }
    }

    Ok(runs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_detection() {
        let access = PdfiumAccess::new();
        let result = access.page_count(b"not a pdf");
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_thumbnail_scale_override() {
        let access = PdfiumAccess::with_thumbnail_scale(0.25);
        assert_eq!(access.thumbnail_scale, 0.25);
    }
}
