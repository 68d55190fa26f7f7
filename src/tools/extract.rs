//! Whole-document text extraction controller

use crate::artifact::Artifact;
use crate::error::{Error, Result};
use crate::pdf::PdfAccess;
use crate::source::SourceFile;
use crate::tools::{join_error, Phase};
use std::path::Path;

/// Extracts the full text of a PDF into a downloadable `.txt` export.
pub struct ExtractTextTool<A> {
    access: A,
    file: Option<SourceFile>,
    extracted: Option<String>,
    phase: Phase,
    error: Option<String>,
}

impl<A> ExtractTextTool<A>
where
    A: PdfAccess + Clone + Send + 'static,
{
    pub fn new(access: A) -> Self {
        Self {
            access,
            file: None,
            extracted: None,
            phase: Phase::Idle,
            error: None,
        }
    }

    /// Load a PDF and immediately extract the text of every page. The
    /// previous extraction is replaced wholesale.
    pub async fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = SourceFile::open(path)?;

        self.file = Some(file.clone());
        self.extracted = None;
        self.error = None;
        self.phase = Phase::Processing;

        let data = match file.read() {
            Ok(data) => data,
            Err(e) => return self.fail(e),
        };

        let access = self.access.clone();
        let outcome = tokio::task::spawn_blocking(move || access.extract_all_text(&data))
            .await
            .map_err(join_error)?;

        match outcome {
            Ok(text) => {
                tracing::info!(file = file.name(), chars = text.len(), "extracted text");
                self.extracted = Some(text);
                self.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// The extracted text, when available.
    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted.as_deref()
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

    /// Downloadable `<stem>.txt` export of the extraction.
    pub fn artifact(&self) -> Result<Artifact> {
        match (&self.file, &self.extracted) {
            (Some(file), Some(text)) => Ok(Artifact::text_export(file.name(), text)),
            _ => Err(Error::Validation {
                reason: "No extracted text available".to_string(),
            }),
        }
    }

    /// Drop the file and extraction and return to the initial state.
    pub fn reset(&mut self) {
        self.file = None;
        self.extracted = None;
        self.error = None;
        self.phase = Phase::Idle;
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        tracing::error!(error = %err, "text extraction failed");
        self.error = Some(err.client_message());
        self.extracted = None;
        self.phase = Phase::Error;
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{fake_pdf_file, FakeAccess};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_extracts_all_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_pdf_file(dir.path(), "doc.pdf");
        let mut tool = ExtractTextTool::new(FakeAccess::with_pages(2));

        tool.load_file(&path).await.unwrap();
        assert_eq!(tool.phase(), Phase::Ready);

        let text = tool.extracted_text().unwrap();
        assert!(text.contains("--- Page 1 ---"));
        assert!(text.contains("--- Page 2 ---"));
        assert!(text.contains("text of page 2"));
    }

    #[tokio::test]
    async fn test_artifact_naming() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_pdf_file(dir.path(), "report.pdf");
        let mut tool = ExtractTextTool::new(FakeAccess::with_pages(1));
        tool.load_file(&path).await.unwrap();

        let artifact = tool.artifact().unwrap();
        assert_eq!(artifact.file_name, "report.txt");
        assert_eq!(artifact.mime_type, "text/plain; charset=utf-8");
        assert_eq!(
            String::from_utf8(artifact.bytes).unwrap(),
            tool.extracted_text().unwrap()
        );
    }

    #[tokio::test]
    async fn test_artifact_without_extraction() {
        let tool = ExtractTextTool::new(FakeAccess::with_pages(1));
        assert!(matches!(tool.artifact(), Err(Error::Validation { .. })));
    }

    #[tokio::test]
    async fn test_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_pdf_file(dir.path(), "doc.pdf");
        let mut tool = ExtractTextTool::new(FakeAccess::failing());

        let result = tool.load_file(&path).await;
        assert!(result.is_err());
        assert_eq!(tool.phase(), Phase::Error);
        assert!(tool.extracted_text().is_none());
        assert!(tool.error().is_some());
    }

    #[tokio::test]
    async fn test_replacing_file_replaces_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let first = fake_pdf_file(dir.path(), "first.pdf");
        let second = fake_pdf_file(dir.path(), "second.pdf");
        let mut tool = ExtractTextTool::new(FakeAccess::with_pages(1));

        tool.load_file(&first).await.unwrap();
        tool.load_file(&second).await.unwrap();
        assert_eq!(tool.file_name(), Some("second.pdf"));
        assert_eq!(tool.artifact().unwrap().file_name, "second.txt");
    }

    #[tokio::test]
    async fn test_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_pdf_file(dir.path(), "doc.pdf");
        let mut tool = ExtractTextTool::new(FakeAccess::with_pages(1));
        tool.load_file(&path).await.unwrap();

        tool.reset();
        assert_eq!(tool.phase(), Phase::Idle);
        assert!(tool.extracted_text().is_none());
        assert!(tool.file_name().is_none());
    }
}
