//! Split workflow controller

use crate::artifact::Artifact;
use crate::config::ToolboxConfig;
use crate::error::{Error, Result};
use crate::pdf::{PageThumbnail, PdfAccess, PdfMutate};
use crate::source::{SourceFile, ThumbnailCache};
use crate::tools::{join_error, PageSelection, Phase};
use std::path::Path;

/// Extracts a user-chosen subset of pages from one PDF into a new document.
pub struct SplitTool<A, M> {
    access: A,
    mutate: M,
    thumbnails: ThumbnailCache,
    file: Option<SourceFile>,
    page_count: u32,
    selection: PageSelection,
    phase: Phase,
    error: Option<String>,
}

impl<A, M> SplitTool<A, M>
where
    A: PdfAccess + Clone + Send + 'static,
    M: PdfMutate + Clone + Send + 'static,
{
    pub fn new(access: A, mutate: M) -> Self {
        Self::with_config(access, mutate, &ToolboxConfig::default())
    }

    pub fn with_config(access: A, mutate: M, config: &ToolboxConfig) -> Self {
        Self {
            access,
            mutate,
            thumbnails: ThumbnailCache::new(
                config.thumbnail_cache_entries,
                config.thumbnail_cache_bytes,
            ),
            file: None,
            page_count: 0,
            selection: PageSelection::default(),
            phase: Phase::Idle,
            error: None,
        }
    }

    /// Load a single PDF and probe its page count. Replaces any previously
    /// loaded file and clears the selection.
    pub async fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = SourceFile::open(path)?;

        self.file = Some(file.clone());
        self.selection.clear();
        self.thumbnails.clear();
        self.page_count = 0;
        self.error = None;
        self.phase = Phase::Processing;

        let data = match file.read() {
            Ok(data) => data,
            Err(e) => return self.fail(e),
        };

        let access = self.access.clone();
        let outcome = tokio::task::spawn_blocking(move || access.page_count(&data))
            .await
            .map_err(join_error)?;

        match outcome {
            Ok(count) => {
                self.page_count = count;
                self.phase = Phase::FileLoaded;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Toggle one page in the selection.
    pub fn toggle_page(&mut self, page: u32) -> Result<()> {
        self.ensure_selection_allowed()?;
        self.selection.toggle(page, self.page_count)
    }

    pub fn select_all(&mut self) -> Result<()> {
        self.ensure_selection_allowed()?;
        self.selection.select_all(self.page_count);
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.ensure_selection_allowed()?;
        self.selection.clear();
        Ok(())
    }

    /// Selected pages in ascending order.
    pub fn selected_pages(&self) -> &[u32] {
        self.selection.pages()
    }

    pub fn is_selected(&self, page: u32) -> bool {
        self.selection.contains(page)
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Thumbnail for the page-selection grid. Rendered output is LRU-cached;
    /// the file buffer itself is read fresh on a cache miss.
    pub async fn thumbnail(&mut self, page: u32) -> Result<PageThumbnail> {
        let file = self.file.as_ref().ok_or_else(|| Error::Validation {
            reason: "No file loaded".to_string(),
        })?;

        if page < 1 || page > self.page_count {
            return Err(Error::PageOutOfBounds {
                page,
                total: self.page_count,
            });
        }

        if let Some(thumb) = self.thumbnails.get(file.name(), page) {
            return Ok(thumb);
        }

        let data = file.read()?;
        let file_name = file.name().to_string();
        let access = self.access.clone();
        let thumb = tokio::task::spawn_blocking(move || access.render_thumbnail(&data, page))
            .await
            .map_err(join_error)??;

        self.thumbnails.put(&file_name, page, thumb.clone());
        Ok(thumb)
    }

    /// Extract the selected pages (ascending order) into a new document
    /// named `split_<originalname>`. The file and selection are retained so
    /// the user can adjust and extract again.
    pub async fn split(&mut self) -> Result<Artifact> {
        let file = match &self.file {
            Some(file) if !self.selection.is_empty() => file.clone(),
            _ => {
                let err = Error::Validation {
                    reason: "Please select at least one page to extract.".to_string(),
                };
                self.error = Some(err.client_message());
                return Err(err);
            }
        };

        self.error = None;
        self.phase = Phase::Processing;

        let data = match file.read() {
            Ok(data) => data,
            Err(e) => return self.fail(e),
        };

        let pages = self.selection.pages().to_vec();
        let mutate = self.mutate.clone();
        let outcome = tokio::task::spawn_blocking(move || mutate.extract_pages(&data, &pages))
            .await
            .map_err(join_error)?;

        match outcome {
            Ok(bytes) => {
                tracing::info!(
                    file = file.name(),
                    pages = self.selection.len(),
                    bytes = bytes.len(),
                    "extracted pages"
                );
                self.phase = Phase::Ready;
                Ok(Artifact::split_pdf(file.name(), bytes))
            }
            Err(e) => self.fail(e),
        }
    }

    /// Drop the file and selection and return to the initial state.
    pub fn reset(&mut self) {
        self.file = None;
        self.selection.clear();
        self.thumbnails.clear();
        self.page_count = 0;
        self.error = None;
        self.phase = Phase::Idle;
    }

    fn ensure_selection_allowed(&self) -> Result<()> {
        if self.file.is_none() {
            return Err(Error::Validation {
                reason: "No file loaded".to_string(),
            });
        }
        if !self.phase.allows_selection_changes() {
            return Err(Error::Validation {
                reason: "An operation is in progress".to_string(),
            });
        }
        Ok(())
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        tracing::error!(error = %err, "split failed");
        self.error = Some(err.client_message());
        self.phase = Phase::Error;
        Err(err)
    }
}
