//! Client for the Gemini `generateContent` REST API

use crate::ai::TextModel;
use crate::config::AiConfig;
use crate::error::{Error, Result};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// AI text service backed by the Gemini API
pub struct GeminiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl GeminiClient {
    /// Build a client from config. The endpoint URL is validated eagerly;
    /// the API key is only required once a request is made.
    pub fn new(config: AiConfig) -> Result<Self> {
        url::Url::parse(&config.endpoint).map_err(|e| Error::AiRequest {
            reason: format!("Invalid endpoint URL: {}", e),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpRequest)?;

        Ok(Self { client, config })
    }

    /// Client with default settings and the API key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(AiConfig::from_env())
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl TextModel for GeminiClient {
    async fn process(&self, prompt: &str, source_text: &str) -> Result<String> {
        if source_text.trim().is_empty() {
            return Err(Error::AiRequest {
                reason: "Source text is empty".to_string(),
            });
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::AiRequest {
                reason: "No API key configured (set GEMINI_API_KEY)".to_string(),
            })?;

        // One structured payload carrying the instruction and the text it
        // applies to
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\n\n{}", prompt, source_text),
                }],
            }],
        };
        let body = serde_json::to_vec(&request)?;

        tracing::debug!(model = %self.config.model, bytes = body.len(), "sending AI request");

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::AiRequest {
                reason: format!("HTTP request failed with status: {}", status),
            });
        }

        // Stream the response body with incremental size checking to bound
        // memory
        let max = self.config.max_response_bytes;
        let mut data = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Error::HttpRequest)?;
            data.extend_from_slice(&chunk);
            if data.len() as u64 > max {
                return Err(Error::ResponseTooLarge {
                    size: data.len() as u64,
                    max_size: max,
                });
            }
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&data)?;

        // The first candidate carries the answer; its parts are joined in
        // order
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::AiRequest {
                reason: "Response contained no text".to_string(),
            });
        }

        Ok(text)
    }
}
