//! Merge workflow controller

use crate::artifact::Artifact;
use crate::error::{Error, Result};
use crate::pdf::PdfMutate;
use crate::source::{is_pdf_path, SourceFile};
use crate::tools::{join_error, Phase};
use std::path::Path;

/// Combines multiple PDFs into a single document in user-chosen order.
///
/// The file list is the ordering: positions are identity, and reordering is
/// a pure list splice.
pub struct MergeTool<M> {
    mutate: M,
    files: Vec<SourceFile>,
    phase: Phase,
    error: Option<String>,
}

impl<M> MergeTool<M>
where
    M: PdfMutate + Clone + Send + 'static,
{
    pub fn new(mutate: M) -> Self {
        Self {
            mutate,
            files: Vec::new(),
            phase: Phase::Idle,
            error: None,
        }
    }

    /// Append user-selected files. Non-PDF paths are dropped by the type
    /// filter, matching the picker's behavior.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        for path in paths {
            let path = path.as_ref();
            if !is_pdf_path(path) {
                tracing::debug!(path = %path.display(), "ignoring non-PDF selection");
                continue;
            }
            let file = SourceFile::open(path)?;
            self.files.push(file);
        }

        if !self.files.is_empty() {
            self.phase = Phase::FileLoaded;
        }
        Ok(())
    }

    /// Remove the file at `index` from the ordering.
    pub fn remove_file(&mut self, index: usize) -> Result<()> {
        self.ensure_selection_allowed()?;
        if index >= self.files.len() {
            return Err(Error::Validation {
                reason: format!("No file at position {}", index),
            });
        }

        self.files.remove(index);
        if self.files.is_empty() {
            self.phase = Phase::Idle;
        }
        Ok(())
    }

    /// Reorder by pure list splice: remove at `from`, insert at `to`.
    pub fn move_file(&mut self, from: usize, to: usize) -> Result<()> {
        self.ensure_selection_allowed()?;
        if from >= self.files.len() || to >= self.files.len() {
            return Err(Error::Validation {
                reason: format!("Cannot move file from {} to {}", from, to),
            });
        }

        let file = self.files.remove(from);
        self.files.insert(to, file);
        Ok(())
    }

    /// Display names of the files, in merge order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name()).collect()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Merge all files in their current order into one `merged.pdf`
    /// artifact. Requires at least two files; the list clears on success.
    pub async fn merge(&mut self) -> Result<Artifact> {
        if self.files.len() < 2 {
            let err = Error::Validation {
                reason: "Please select at least two PDF files to merge.".to_string(),
            };
            self.error = Some(err.client_message());
            return Err(err);
        }

        self.error = None;
        self.phase = Phase::Processing;

        // Fresh read of every buffer; nothing is cached between operations
        let buffers = match self.files.iter().map(|f| f.read()).collect::<Result<Vec<_>>>() {
            Ok(buffers) => buffers,
            Err(e) => return self.fail(e),
        };

        let mutate = self.mutate.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let refs: Vec<&[u8]> = buffers.iter().map(|b| b.as_slice()).collect();
            mutate.merge_in_order(&refs)
        })
        .await
        .map_err(join_error)?;

        match outcome {
            Ok(bytes) => {
                tracing::info!(files = self.files.len(), bytes = bytes.len(), "merged PDFs");
                self.files.clear();
                self.phase = Phase::Ready;
                Ok(Artifact::merged_pdf(bytes))
            }
            Err(e) => self.fail(e),
        }
    }

    /// Drop all files and return to the initial state.
    pub fn reset(&mut self) {
        self.files.clear();
        self.error = None;
        self.phase = Phase::Idle;
    }

    fn ensure_selection_allowed(&self) -> Result<()> {
        if !self.phase.allows_selection_changes() {
            return Err(Error::Validation {
                reason: "An operation is in progress".to_string(),
            });
        }
        Ok(())
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        tracing::error!(error = %err, "merge failed");
        self.error = Some(err.client_message());
        self.phase = Phase::Error;
        Err(err)
    }
}
