//! In-memory response cache.
//!
//! Keys are content-addressed: a SHA-256 fingerprint over the trimmed input
//! and the canonical JSON form of the request settings, so identical
//! requests always land on the same entry and any settings change produces a
//! new key. Entries expire after a fixed TTL; lookups treat expired entries
//! as misses without removing them. [`ResponseCache::evict_expired`] exists
//! for a host-driven sweep.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::settings::UserSettings;
use crate::transform::TransformResponse;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    value: TransformResponse,
    created_at: Instant,
}

/// TTL-bounded map from request fingerprints to transform responses.
///
/// Shared across concurrent requests; the interior mutex covers the short
/// map read/insert sections only.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    /// Creates a cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl }
    }

    /// Computes the fingerprint for a `(trimmed input, settings)` pair.
    ///
    /// Deterministic: the settings are serialized to their canonical JSON
    /// form (struct declaration order), and the two parts are separated so
    /// input bytes can never collide with settings bytes.
    pub fn fingerprint(input: &str, settings: &UserSettings) -> String {
        let settings_json = serde_json::to_string(settings).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(input.trim().as_bytes());
        hasher.update([0x1f]);
        hasher.update(settings_json.as_bytes());

        format!("{:x}", hasher.finalize())
    }

    /// Returns the cached response for `key`, or `None` on a miss or an
    /// expired entry. Expired entries stay in the map.
    pub fn get(&self, key: &str) -> Option<TransformResponse> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;

        if entry.created_at.elapsed() >= self.ttl {
            debug!(key, "cache entry expired");
            return None;
        }

        debug!(key, "cache hit");
        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn put(&self, key: String, value: TransformResponse) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, CacheEntry { value, created_at: Instant::now() });
        }
    }

    /// Removes expired entries and returns how many were dropped. Nothing
    /// on the request path calls this; it is for host-scheduled sweeps.
    pub fn evict_expired(&self) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|_, entry| entry.created_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Number of entries currently held, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LengthPreference, LinkedinFormat, XAccountType, XFormat};

    fn sample_response() -> TransformResponse {
        TransformResponse {
            extracted_text: "sample text".to_string(),
            image_url: None,
            title: Some("Sample".to_string()),
            results: Vec::new(),
        }
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let settings = UserSettings::default();
        let a = ResponseCache::fingerprint("some input", &settings);
        let b = ResponseCache::fingerprint("some input", &settings);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_trims_input() {
        let settings = UserSettings::default();
        let trimmed = ResponseCache::fingerprint("some input", &settings);
        let padded = ResponseCache::fingerprint("  some input \n", &settings);
        assert_eq!(trimmed, padded);
    }

    #[test]
    fn test_fingerprint_changes_with_every_settings_field() {
        let base = UserSettings::default();
        let variants = [
            UserSettings { include_emojis: false, ..base.clone() },
            UserSettings { include_hashtags: false, ..base.clone() },
            UserSettings { length_preference: LengthPreference::Long, ..base.clone() },
            UserSettings { x_format: XFormat::Post, ..base.clone() },
            UserSettings { x_account_type: XAccountType::Premium, ..base.clone() },
            UserSettings { linkedin_format: LinkedinFormat::Article, ..base.clone() },
            UserSettings { temperature: Some(0.5), ..base.clone() },
        ];

        let base_key = ResponseCache::fingerprint("input", &base);
        for variant in &variants {
            assert_ne!(base_key, ResponseCache::fingerprint("input", variant), "variant {:?}", variant);
        }
    }

    #[test]
    fn test_get_put_roundtrip() {
        let cache = ResponseCache::default();
        let key = ResponseCache::fingerprint("input", &UserSettings::default());

        assert!(cache.get(&key).is_none());
        cache.put(key.clone(), sample_response());

        let hit = cache.get(&key).unwrap();
        assert_eq!(hit.extracted_text, "sample text");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_a_miss_but_stays_resident() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.put("key".to_string(), sample_response());

        assert!(cache.get("key").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evict_expired() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.put("a".to_string(), sample_response());
        cache.put("b".to_string(), sample_response());

        assert_eq!(cache.evict_expired(), 2);
        assert_eq!(cache.len(), 0);
    }
}
