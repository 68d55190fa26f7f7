//! Runtime configuration for the toolbox
//!
//! Plain structs with defaults; there are no configuration files. The only
//! ambient input is the `GEMINI_API_KEY` environment variable.

use std::time::Duration;

/// Resource and rendering settings shared by the tool controllers
#[derive(Debug, Clone)]
pub struct ToolboxConfig {
    /// Fixed reduced scale for page thumbnails (default: 0.5)
    pub thumbnail_scale: f32,
    /// Maximum number of cached thumbnails (default: 256)
    pub thumbnail_cache_entries: usize,
    /// Maximum total bytes of cached thumbnails (default: 64MB)
    pub thumbnail_cache_bytes: usize,
    /// AI text service settings
    pub ai: AiConfig,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            thumbnail_scale: 0.5,
            thumbnail_cache_entries: 256,
            thumbnail_cache_bytes: 64 * 1024 * 1024, // 64MB
            ai: AiConfig::default(),
        }
    }
}

/// Settings for the remote generative-text endpoint
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base endpoint of the generative-text API
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// API key; absent means requests are rejected before hitting the wire
    pub api_key: Option<String>,
    /// Maximum response body size in bytes (default: 4MB)
    pub max_response_bytes: u64,
    /// Optional request timeout. `None` lets the exchange resolve or reject
    /// on the transport's own terms.
    pub timeout: Option<Duration>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            max_response_bytes: 4 * 1024 * 1024, // 4MB
            timeout: None,
        }
    }
}

impl AiConfig {
    /// Default settings with the API key picked up from `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            ..Self::default()
        }
    }
}
