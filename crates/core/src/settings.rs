//! Per-request stylistic settings.
//!
//! [`UserSettings`] travels with every transform request and steers the
//! prompt builder: emoji and hashtag toggles, a length preference, the
//! microblog sub-format and account tier, the professional-network
//! sub-format, and an optional edit-stage sampling temperature. Every field
//! has a default so callers can send any subset (or nothing at all).

use serde::{Deserialize, Serialize};

/// How long the finalized content should run relative to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthPreference {
    Short,
    #[default]
    Default,
    Long,
}

/// Microblog output shape: a numbered multi-post thread or one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum XFormat {
    #[default]
    Thread,
    Post,
}

/// Microblog account tier. Basic accounts are held to the 280-character
/// per-post ceiling; premium accounts are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum XAccountType {
    #[default]
    Basic,
    Premium,
}

/// Professional-network output shape: a short feed post or a long-form
/// article with headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkedinFormat {
    #[default]
    Post,
    Article,
}

/// Stylistic settings supplied per request.
///
/// Serialized with camelCase field names to match the JSON contract. The
/// canonical JSON form of this struct is part of the cache fingerprint, so
/// any field change produces a distinct cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub include_emojis: bool,
    pub include_hashtags: bool,
    pub length_preference: LengthPreference,
    pub x_format: XFormat,
    pub x_account_type: XAccountType,
    pub linkedin_format: LinkedinFormat,
    /// Edit-stage sampling temperature. When absent the orchestrator uses a
    /// low compliance-biased default.
    pub temperature: Option<f32>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            include_emojis: true,
            include_hashtags: true,
            length_preference: LengthPreference::Default,
            x_format: XFormat::Thread,
            x_account_type: XAccountType::Basic,
            linkedin_format: LinkedinFormat::Post,
            temperature: None,
        }
    }
}
