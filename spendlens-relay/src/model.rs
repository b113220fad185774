//! Seam between the relay and the generative model provider.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ModelError;

/// How the model should shape its answer
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// JSON mode, constrained by a minimal schema
    Schema(Value),
    /// JSON mode only
    Json,
}

/// One generation request: system prompt plus ordered user parts.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_prompt: &'static str,
    pub parts: Vec<String>,
    pub format: ResponseFormat,
}

/// A generative model reachable with a per-call API key.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw text of the first candidate.
    async fn generate(&self, api_key: &str, request: &GenerateRequest) -> Result<String, ModelError>;
}
