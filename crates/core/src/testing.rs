//! In-process test doubles for the model-provider seam.
//!
//! Used by this crate's own tests and by downstream integration tests to
//! exercise the pipeline without network access.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::provider::{CompletionRequest, TextModel};
use crate::{Result, ShapeshiftError};

/// A completion request captured by [`MockModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// What a [`MockModel`] returns for every call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error,
}

impl MockResponse {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    pub fn error() -> Self {
        Self::Error
    }
}

/// A [`TextModel`] that records every request and returns a fixed response.
pub struct MockModel {
    name: &'static str,
    response: MockResponse,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockModel {
    pub fn new(name: &'static str, response: MockResponse) -> Self {
        Self { name, response, calls: Mutex::new(Vec::new()) }
    }

    /// All requests seen so far, in call order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextModel for MockModel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                system_prompt: request.system_prompt.to_string(),
                user_prompt: request.user_prompt.to_string(),
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            });
        }

        match &self.response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Error => Err(ShapeshiftError::Provider("mock provider failure".to_string())),
        }
    }
}
