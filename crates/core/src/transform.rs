//! The transform service.
//!
//! [`Transformer`] ties the pipeline together: validate the input, decide
//! URL-vs-raw-text, consult the response cache, extract when needed, run the
//! generation batch, and store the assembled response. It owns the injected
//! models, the fetch/extract configuration, and the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{DEFAULT_TTL, ResponseCache};
use crate::extract::{ExtractConfig, extract_content};
use crate::fetch::FetchConfig;
use crate::generate::{Generator, TransformResult};
use crate::provider::TextModel;
use crate::settings::UserSettings;
use crate::{Result, ShapeshiftError};

/// Minimum usable content length after trimming.
pub const MIN_CONTENT_CHARS: usize = 50;

/// The aggregate result of one transform request.
///
/// `results` always holds exactly one entry per configured persona, in
/// persona-definition order, regardless of individual generation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub extracted_text: String,
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub results: Vec<TransformResult>,
}

/// Tunables for a [`Transformer`].
#[derive(Debug, Clone)]
pub struct TransformerConfig {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub cache_ttl: Duration,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self { fetch: FetchConfig::default(), extract: ExtractConfig::default(), cache_ttl: DEFAULT_TTL }
    }
}

/// Request handler for content transformation.
pub struct Transformer {
    generator: Generator,
    cache: ResponseCache,
    fetch: FetchConfig,
    extract: ExtractConfig,
}

impl Transformer {
    /// Creates a transformer with default configuration.
    pub fn new(draft_model: Arc<dyn TextModel>, edit_model: Arc<dyn TextModel>) -> Self {
        Self::with_config(draft_model, edit_model, TransformerConfig::default())
    }

    /// Creates a transformer with explicit configuration.
    pub fn with_config(
        draft_model: Arc<dyn TextModel>, edit_model: Arc<dyn TextModel>, config: TransformerConfig,
    ) -> Self {
        Self {
            generator: Generator::new(draft_model, edit_model),
            cache: ResponseCache::new(config.cache_ttl),
            fetch: config.fetch,
            extract: config.extract,
        }
    }

    /// The response cache, for host-driven sweeps or inspection.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Transforms a URL or raw text into all persona formats.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when the input is empty or the
    /// resolved text is under [`MIN_CONTENT_CHARS`], and with a fetch error
    /// when a URL input cannot be retrieved. Generation failures never fail
    /// the request; they degrade to per-persona placeholders.
    pub async fn transform(&self, input: &str, settings: &UserSettings) -> Result<TransformResponse> {
        let start = Instant::now();
        let input = input.trim();
        if input.is_empty() {
            return Err(ShapeshiftError::EmptyInput);
        }

        let is_url = input.starts_with("http://") || input.starts_with("https://");

        // URL inputs are fingerprinted by the URL string itself, so repeat
        // requests within the TTL reuse the stored transform.
        let key = ResponseCache::fingerprint(input, settings);
        if let Some(cached) = self.cache.get(&key) {
            info!(is_url, elapsed_ms = start.elapsed().as_millis() as u64, "transform served from cache");
            return Ok(cached);
        }

        let (extracted_text, image_url, title) = if is_url {
            let content = extract_content(input, &self.fetch, &self.extract).await?;
            (content.text, content.image_url, content.title)
        } else {
            (input.to_string(), None, None)
        };

        let trimmed_len = extracted_text.trim().chars().count();
        if trimmed_len < MIN_CONTENT_CHARS {
            debug!(length = trimmed_len, "rejecting short content");
            return Err(ShapeshiftError::ContentTooShort { length: trimmed_len, minimum: MIN_CONTENT_CHARS });
        }

        let results: Vec<TransformResult> = self.generator.generate_all(&extracted_text, settings).await;

        let response = TransformResponse { extracted_text, image_url, title, results };
        self.cache.put(key, response.clone());

        info!(is_url, elapsed_ms = start.elapsed().as_millis() as u64, "transform complete");

        Ok(response)
    }
}
