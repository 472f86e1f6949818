//! Hosted text-generation model clients.
//!
//! [`TextModel`] is the seam between the orchestrator and the two model
//! endpoints: a fast drafting model behind Groq's OpenAI-compatible
//! chat-completions API and a compliance-focused editing model behind
//! Gemini's `generateContent` API. Both are non-streaming single-shot
//! calls. Tests implement the trait with in-process mocks.
//!
//! Model calls carry no timeout: a hung provider stalls that persona's
//! branch until the transport gives up.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, ShapeshiftError};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// One non-streaming completion request.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A hosted text-generation model.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Short provider name for logging.
    fn name(&self) -> &'static str;

    /// Runs one completion and returns the generated text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}

// ============================================================================
// Groq (OpenAI-compatible chat completions)
// ============================================================================

/// Draft-stage model client for Groq's chat-completions endpoint.
pub struct GroqModel {
    client: Client,
    api_key: String,
    model: String,
}

impl GroqModel {
    pub fn new(api_key: String, model: String) -> Self {
        Self { client: Client::new(), api_key, model }
    }

    /// Builds a client from `GROQ_API_KEY` and optional `GROQ_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| ShapeshiftError::Config("GROQ_API_KEY not set".to_string()))?;
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string());

        Ok(Self::new(api_key, model))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Deserialize)]
struct ChatMessageBody {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait]
impl TextModel for GroqModel {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let api_request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: request.system_prompt },
                ChatMessage { role: "user", content: request.user_prompt },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: 1.0,
            stream: false,
        };

        debug!(model = %self.model, temperature = request.temperature, "groq completion starting");

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ShapeshiftError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShapeshiftError::Provider(format!("Groq API error: {} - {}", status, body)));
        }

        let api_response: ChatResponse =
            response.json().await.map_err(|e| ShapeshiftError::Provider(e.to_string()))?;

        if let Some(error) = api_response.error {
            return Err(ShapeshiftError::Provider(format!("Groq error: {}", error.message)));
        }

        let content = api_response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ShapeshiftError::Provider("Groq returned an empty completion".to_string()));
        }

        Ok(content)
    }
}

// ============================================================================
// Gemini (generateContent)
// ============================================================================

/// Edit-stage model client for Gemini's `generateContent` endpoint.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiModel {
    pub fn new(api_key: String, model: String) -> Self {
        Self { client: Client::new(), api_key, model }
    }

    /// Builds a client from `GEMINI_API_KEY` and optional `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ShapeshiftError::Config("GEMINI_API_KEY not set".to_string()))?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self::new(api_key, model))
    }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiSystemInstruction<'a>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[async_trait]
impl TextModel for GeminiModel {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let api_request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: request.user_prompt }],
            }],
            system_instruction: GeminiSystemInstruction { parts: vec![GeminiPart { text: request.system_prompt }] },
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let url = format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, self.model, self.api_key);

        debug!(model = %self.model, temperature = request.temperature, "gemini completion starting");

        let response = self
            .client
            .post(&url)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ShapeshiftError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShapeshiftError::Provider(format!("Gemini API error: {} - {}", status, body)));
        }

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| ShapeshiftError::Provider(e.to_string()))?;

        if let Some(error) = api_response.error {
            return Err(ShapeshiftError::Provider(format!("Gemini error: {}", error.message)));
        }

        let mut text = String::new();
        if let Some(candidates) = api_response.candidates
            && let Some(candidate) = candidates.into_iter().next()
            && let Some(parts) = candidate.content.parts
        {
            for part in parts {
                if let Some(t) = part.text {
                    text.push_str(&t);
                }
            }
        }

        Ok(text)
    }
}
