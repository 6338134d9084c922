//! Chat helper: forwards a user question to the Gemini `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-1.5-flash-latest:generateContent";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat assistant is not configured")]
    NotConfigured,

    #[error("chat backend returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no response generated by the chat backend")]
    EmptyReply,
}

/// Anything that can answer a chat message.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, ChatError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn reply(&self, message: &str) -> Result<String, ChatError> {
        let key = self.api_key.as_deref().ok_or(ChatError::NotConfigured)?;

        debug!(chars = message.len(), "forwarding chat message");
        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", key)])
            .json(&GenerateRequest::for_question(message))
            .send()
            .await
            // the url carries the api key
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| "Failed to get response from Gemini API".to_string());
            warn!(status = status.as_u16(), %message, "chat backend rejected request");
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<GenerateResponse>()
            .await
            .map_err(reqwest::Error::without_url)?;
        first_text(body).ok_or(ChatError::EmptyReply)
    }
}

/// Wraps the user's question in the platform guide instructions.
pub fn guide_prompt(question: &str) -> String {
    format!(
        "You are a helpful guide for the National Self Help Group (SHG) Digital Platform. \
         You help users understand what Self Help Groups are, how the platform works, and \
         provide guidance on SHG management in simple, non-technical language. Always be \
         friendly and use real-world examples relevant to rural communities and SHGs in India.\n\n\
         User Question: {question}\n\n\
         Please provide a clear, concise response in 2-3 sentences that directly answers the question."
    )
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn for_question(question: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(guide_prompt(question)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 1024,
            },
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: Option<String>,
}

/// First text part of the first candidate, if non-empty.
fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.trim().is_empty())
}
