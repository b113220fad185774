//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;
use crate::model::{GenerateRequest, GenerativeModel, ResponseFormat};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig<'a>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(req: &'a GenerateRequest) -> Self {
        let response_schema = match &req.format {
            ResponseFormat::Schema(schema) => Some(schema),
            ResponseFormat::Json => None,
        };
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: req.parts.iter().map(|p| Part { text: p }).collect(),
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: req.system_prompt.trim(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn first_candidate_text(body: GenerateContentResponse) -> Result<String, ModelError> {
    let content = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::InvalidResponse("no candidates returned".to_string()))?
        .content
        .ok_or_else(|| ModelError::InvalidResponse("candidate has no content".to_string()))?;

    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(ModelError::InvalidResponse("model returned no text".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, api_key: &str, request: &GenerateRequest) -> Result<String, ModelError> {
        let payload = GenerateContentRequest::from_request(request);

        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = res.text().await.unwrap_or_default();
            return Err(ModelError::RateLimited(body));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = res.text().await?;
        let body: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| ModelError::InvalidResponse(format!("undecodable response body: {e}")))?;
        first_candidate_text(body)
    }
}
