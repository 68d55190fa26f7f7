//! AI-assisted editing controller
//!
//! Extracts the text of one page and sends it, together with a user
//! instruction, to the AI text service. Exactly one page is the active
//! extraction target at a time; switching pages supersedes whatever is in
//! flight, and a superseded completion is discarded rather than applied.

use crate::ai::TextModel;
use crate::error::{Error, Result};
use crate::pdf::PdfAccess;
use crate::source::SourceFile;
use crate::tools::{join_error, OpSequencer, OpTicket, Phase};
use std::path::Path;

/// Prompt preloaded into a fresh editing session
pub const DEFAULT_PROMPT: &str = "Summarize the following text in three key bullet points.";

/// Preset prompts offered by the editing UI
pub const PRESET_PROMPTS: &[&str] = &[
    "Summarize this text.",
    "Translate this text to Spanish.",
    "Correct any grammar and spelling mistakes.",
    "Rewrite this in a more professional tone.",
    "Extract the key action items from this text.",
];

/// In-flight page-text extraction
#[derive(Debug)]
pub struct PendingExtract {
    ticket: OpTicket,
    page: u32,
}

impl PendingExtract {
    /// Page this extraction targets.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// In-flight AI generation
#[derive(Debug)]
pub struct PendingGenerate {
    ticket: OpTicket,
}

/// Extract text from one page and rewrite it with the AI text service.
pub struct AiEditTool<A, T> {
    access: A,
    model: T,
    file: Option<SourceFile>,
    page_count: u32,
    active_page: Option<u32>,
    extracted_text: Option<String>,
    prompt: String,
    ai_result: Option<String>,
    phase: Phase,
    error: Option<String>,
    ops: OpSequencer,
}

impl<A, T> AiEditTool<A, T>
where
    A: PdfAccess + Clone + Send + 'static,
    T: TextModel,
{
    pub fn new(access: A, model: T) -> Self {
        Self {
            access,
            model,
            file: None,
            page_count: 0,
            active_page: None,
            extracted_text: None,
            prompt: DEFAULT_PROMPT.to_string(),
            ai_result: None,
            phase: Phase::Idle,
            error: None,
            ops: OpSequencer::default(),
        }
    }

    /// Load a PDF, probe its page count, and extract the first page's text.
    pub async fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = SourceFile::open(path)?;

        self.ops.supersede();
        self.file = Some(file.clone());
        self.page_count = 0;
        self.active_page = None;
        self.extracted_text = None;
        self.ai_result = None;
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

        let count = match outcome {
            Ok(count) => count,
            Err(e) => return self.fail(e),
        };

        self.page_count = count;
        self.phase = Phase::FileLoaded;

        // The first page is analyzed by default
        if count > 0 {
            self.select_page(1).await?;
        }
        Ok(())
    }

    /// Switch the analyzed page and re-extract its text. Supersedes any
    /// in-flight extraction or generation.
    pub async fn select_page(&mut self, page: u32) -> Result<()> {
        let pending = self.begin_extract(page)?;
        let outcome = self.extract_text_for(pending.page).await;
        self.finish_extract(pending, outcome)
    }

    /// Begin a page-text extraction: validates the page, supersedes any
    /// in-flight operation, and transitions to Processing. Pair with
    /// [`finish_extract`](Self::finish_extract).
    pub fn begin_extract(&mut self, page: u32) -> Result<PendingExtract> {
        if self.file.is_none() {
            return Err(Error::Validation {
                reason: "No file loaded".to_string(),
            });
        }
        if page < 1 || page > self.page_count {
            return Err(Error::PageOutOfBounds {
                page,
                total: self.page_count,
            });
        }

        self.active_page = Some(page);
        self.extracted_text = None;
        self.ai_result = None;
        self.error = None;
        self.phase = Phase::Processing;

        Ok(PendingExtract {
            ticket: self.ops.begin(),
            page,
        })
    }

    /// Run the extraction for a pending ticket. The file buffer is read
    /// fresh, as with every operation.
    pub async fn extract_text_for(&self, page: u32) -> Result<String> {
        let file = self.file.as_ref().ok_or_else(|| Error::Validation {
            reason: "No file loaded".to_string(),
        })?;

        let data = file.read()?;
        let access = self.access.clone();
        tokio::task::spawn_blocking(move || access.extract_page_text(&data, page))
            .await
            .map_err(join_error)?
    }

    /// Apply an extraction outcome. A stale ticket (superseded by a newer
    /// selection change or reset) is discarded without touching state.
    pub fn finish_extract(&mut self, pending: PendingExtract, outcome: Result<String>) -> Result<()> {
        if !self.ops.is_current(pending.ticket) {
            tracing::debug!(page = pending.page, "discarding superseded extraction result");
            return Ok(());
        }

        match outcome {
            Ok(text) => {
                self.extracted_text = Some(text);
                self.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Begin an AI generation over the current prompt and extracted text.
    /// Rejected before any remote call when either is empty. Pair with
    /// [`finish_generate`](Self::finish_generate).
    pub fn begin_generate(&mut self) -> Result<PendingGenerate> {
        let text_empty = self
            .extracted_text
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(true);

        if self.prompt.trim().is_empty() || text_empty {
            let err = Error::Validation {
                reason: "Prompt and extracted text cannot be empty.".to_string(),
            };
            self.error = Some(err.client_message());
            return Err(err);
        }

        self.error = None;
        self.ai_result = None;
        self.phase = Phase::Processing;

        Ok(PendingGenerate {
            ticket: self.ops.begin(),
        })
    }

    /// Apply a generation outcome; stale tickets are discarded.
    pub fn finish_generate(
        &mut self,
        pending: PendingGenerate,
        outcome: Result<String>,
    ) -> Result<()> {
        if !self.ops.is_current(pending.ticket) {
            tracing::debug!("discarding superseded AI response");
            return Ok(());
        }

        match outcome {
            Ok(result) => {
                self.ai_result = Some(result);
                self.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// One-shot generation for sequential callers.
    pub async fn generate(&mut self) -> Result<()> {
        let pending = self.begin_generate()?;

        let prompt = self.prompt.clone();
        let text = self.extracted_text.clone().unwrap_or_default();
        let outcome = self.model.process(&prompt, &text).await;

        self.finish_generate(pending, outcome)
    }

    /// Replace the prompt. Does not trigger any work by itself.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> Result<()> {
        if self.phase == Phase::Processing {
            return Err(Error::Validation {
                reason: "An operation is in progress".to_string(),
            });
        }
        self.prompt = prompt.into();
        Ok(())
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn active_page(&self) -> Option<u32> {
        self.active_page
    }

    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn ai_result(&self) -> Option<&str> {
        self.ai_result.as_deref()
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

    /// Drop everything and return to the initial state. Supersedes any
    /// in-flight operation.
    pub fn reset(&mut self) {
        self.ops.supersede();
        self.file = None;
        self.page_count = 0;
        self.active_page = None;
        self.extracted_text = None;
        self.ai_result = None;
        self.prompt = DEFAULT_PROMPT.to_string();
        self.error = None;
        self.phase = Phase::Idle;
    }

    fn fail<U>(&mut self, err: Error) -> Result<U> {
        tracing::error!(error = %err, "AI edit operation failed");
        self.error = Some(err.client_message());
        self.ai_result = None;
        self.phase = Phase::Error;
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{fake_pdf_file, FakeAccess, FakeModel};
    use pretty_assertions::assert_eq;

    async fn loaded_tool(
        pages: u32,
        model: FakeModel,
    ) -> (AiEditTool<FakeAccess, FakeModel>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_pdf_file(dir.path(), "doc.pdf");
        let mut tool = AiEditTool::new(FakeAccess::with_pages(pages), model);
        tool.load_file(&path).await.unwrap();
        (tool, dir)
    }

    #[tokio::test]
    async fn test_load_selects_first_page() {
        let (tool, _dir) = loaded_tool(3, FakeModel::replying("ok")).await;
        assert_eq!(tool.page_count(), 3);
        assert_eq!(tool.active_page(), Some(1));
        assert_eq!(tool.extracted_text(), Some("text of page 1"));
        assert_eq!(tool.phase(), Phase::Ready);
        assert_eq!(tool.prompt(), DEFAULT_PROMPT);
    }

    #[tokio::test]
    async fn test_select_page_replaces_extraction() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("ok")).await;

        tool.select_page(2).await.unwrap();
        assert_eq!(tool.active_page(), Some(2));
        assert_eq!(tool.extracted_text(), Some("text of page 2"));
    }

    #[tokio::test]
    async fn test_select_page_out_of_bounds() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("ok")).await;
        let result = tool.select_page(9).await;
        assert!(matches!(result, Err(Error::PageOutOfBounds { .. })));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("bullet points")).await;

        tool.generate().await.unwrap();
        assert_eq!(tool.ai_result(), Some("bullet points"));
        assert_eq!(tool.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("ok")).await;
        let model = tool.model.clone();

        tool.set_prompt("   ").unwrap();
        let result = tool.generate().await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        // Rejected before any remote call was issued
        assert_eq!(model.call_count(), 0);
        assert_eq!(
            tool.error(),
            Some("Prompt and extracted text cannot be empty.")
        );
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_extraction() {
        let model = FakeModel::replying("ok");
        let mut tool = AiEditTool::new(FakeAccess::with_pages(3), model.clone());

        let result = tool.generate().await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_transport_failure() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::failing()).await;

        let result = tool.generate().await;
        assert!(result.is_err());
        assert_eq!(tool.phase(), Phase::Error);
        assert_eq!(tool.error(), Some("An AI processing error occurred."));
        assert!(tool.ai_result().is_none());
    }

    #[tokio::test]
    async fn test_stale_extraction_is_discarded() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("ok")).await;

        // Start extracting page 2, but switch to page 3 before the page 2
        // result lands
        let stale = tool.begin_extract(2).unwrap();
        let stale_outcome = tool.extract_text_for(stale.page()).await;

        let current = tool.begin_extract(3).unwrap();
        let current_outcome = tool.extract_text_for(current.page()).await;
        tool.finish_extract(current, current_outcome).unwrap();

        // The late page 2 result must not overwrite the page 3 state
        tool.finish_extract(stale, stale_outcome).unwrap();
        assert_eq!(tool.active_page(), Some(3));
        assert_eq!(tool.extracted_text(), Some("text of page 3"));
        assert_eq!(tool.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn test_stale_generation_is_discarded() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("late answer")).await;

        let stale = tool.begin_generate().unwrap();
        let stale_outcome = tool.model.process("p", "t").await;

        // Switching pages supersedes the pending generation
        tool.select_page(2).await.unwrap();

        tool.finish_generate(stale, stale_outcome).unwrap();
        assert!(tool.ai_result().is_none());
        assert_eq!(tool.extracted_text(), Some("text of page 2"));
    }

    #[tokio::test]
    async fn test_reset_restores_default_prompt() {
        let (mut tool, _dir) = loaded_tool(3, FakeModel::replying("ok")).await;
        tool.set_prompt("Translate this text to Spanish.").unwrap();
        tool.reset();

        assert_eq!(tool.phase(), Phase::Idle);
        assert_eq!(tool.prompt(), DEFAULT_PROMPT);
        assert!(tool.file_name().is_none());
        assert!(tool.extracted_text().is_none());
    }

    #[test]
    fn test_preset_prompts_are_nonempty() {
        assert!(!PRESET_PROMPTS.is_empty());
        assert!(PRESET_PROMPTS.iter().all(|p| !p.trim().is_empty()));
    }
}
