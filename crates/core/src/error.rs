//! Error types for transform operations.
//!
//! This module defines the main error type [`ShapeshiftError`] which covers
//! input validation, URL fetching, content extraction, and model-provider
//! failures. Every variant renders a user-displayable message; the server
//! uses [`ShapeshiftError::is_user_error`] to decide between a 400 and a 500.

use thiserror::Error;

/// Main error type for content transformation.
///
/// Validation and fetch variants carry the exact messages shown to the
/// caller. Provider errors never surface as a whole-request failure — the
/// orchestrator degrades them to per-platform placeholder results — but the
/// provider clients still report them through this type.
#[derive(Error, Debug)]
pub enum ShapeshiftError {
    /// Request body had no usable input string.
    #[error("Input is required")]
    EmptyInput,

    /// Extracted or raw text was below the minimum length after trimming.
    #[error("Content too short. Please provide at least {minimum} characters.")]
    ContentTooShort { length: usize, minimum: usize },

    /// Input looked like a URL but could not be parsed as one.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// TCP connection to the target host failed.
    #[error("Could not connect to the server. Please check the URL.")]
    ConnectionRefused,

    /// The HTML fetch exceeded its timeout.
    #[error("Request timed out. The server took too long to respond.")]
    Timeout,

    /// The target URL returned HTTP 404.
    #[error("Page not found. Please check the URL.")]
    PageNotFound,

    /// The target URL returned HTTP 403.
    #[error("Access denied. This site may block automated requests.")]
    AccessDenied,

    /// Any other transport or HTTP-status failure during the fetch.
    #[error("Failed to fetch URL: {0}")]
    FetchFailed(String),

    /// HTML could not be queried (invalid CSS selector).
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A model provider call failed (HTTP error, API error body, or an
    /// empty completion).
    #[error("Model provider error: {0}")]
    Provider(String),

    /// Missing or invalid process configuration (API keys, model ids).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything that does not fit the categories above.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl ShapeshiftError {
    /// True for errors the caller can correct (bad input or an unreachable
    /// URL). These map to HTTP 400; everything else maps to 500.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::ContentTooShort { .. }
                | Self::InvalidUrl(_)
                | Self::ConnectionRefused
                | Self::Timeout
                | Self::PageNotFound
                | Self::AccessDenied
                | Self::FetchFailed(_)
        )
    }
}

/// Result type alias for ShapeshiftError.
pub type Result<T> = std::result::Result<T, ShapeshiftError>;
