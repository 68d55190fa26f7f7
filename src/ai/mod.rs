//! AI text service
//!
//! A single request/response exchange with a remote generative-text
//! endpoint: the extracted text plus a user instruction go out, the
//! generated text comes back. No retry, no streaming delivery, no partial
//! results.

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Result;
use std::future::Future;

/// Remote text-processing capability
pub trait TextModel {
    /// Send `source_text` with an instruction `prompt` and return the
    /// generated text verbatim.
    fn process(
        &self,
        prompt: &str,
        source_text: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}
