//! Translation Gateway
//!
//! Mediates every call to the external translation provider:
//! - resolves language labels (`"Chinese"`, `"zh"`) to codes
//! - guesses the source language from the script when none is given
//! - skips the provider when source and target match
//! - memoizes successful lookups for a short window
//! - bounds each provider call with a fixed timeout
//!
//! Translation is best-effort. On any provider failure the original text is
//! returned with [`TranslationStatus::Failed`] so callers can flag it.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::Instant};

use crate::domain::{
    LanguageCode, Translation, TranslationError, TranslationProvider, TranslationStatus,
    detect_language, resolve_language_code,
};

/// Gateway tunables.
#[derive(Debug, Clone, Copy)]
pub struct GatewayConfig {
    /// Upper bound for a single provider call
    pub timeout: Duration,
    /// How long a successful translation is reused
    pub cache_ttl: Duration,
    /// Maximum number of cached translations
    pub cache_capacity: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    source: LanguageCode,
    target: LanguageCode,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    text: String,
    stored_at: Instant,
}

pub struct TranslationGateway {
    provider: Arc<dyn TranslationProvider>,
    config: GatewayConfig,
    cache: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl TranslationGateway {
    pub fn new(provider: Arc<dyn TranslationProvider>, config: GatewayConfig) -> Self {
        Self {
            provider,
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a short code or language name to a code.
    pub fn resolve_language_code(&self, label: &str) -> LanguageCode {
        resolve_language_code(label)
    }

    /// Translate `text` into `target_label`.
    ///
    /// `source_label` is the sender's language; when absent it is detected
    /// from the text. Never fails: see [`Translation::status`].
    pub async fn translate(
        &self,
        text: &str,
        target_label: &str,
        source_label: Option<&str>,
    ) -> Translation {
        let source = match source_label {
            Some(label) => resolve_language_code(label),
            None => detect_language(text),
        };
        let target = resolve_language_code(target_label);

        if source == target {
            return Translation {
                text: text.to_string(),
                source,
                target,
                status: TranslationStatus::SameLanguage,
            };
        }

        let key = CacheKey {
            text: text.to_string(),
            source: source.clone(),
            target: target.clone(),
        };
        if let Some(cached) = self.lookup(&key).await {
            return Translation {
                text: cached,
                source,
                target,
                status: TranslationStatus::Translated,
            };
        }

        match self.call_provider(text, &source, &target).await {
            Ok(translated) => {
                self.store(key, translated.clone()).await;
                Translation {
                    text: translated,
                    source,
                    target,
                    status: TranslationStatus::Translated,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Translation {} -> {} failed, delivering original text: {}",
                    source,
                    target,
                    e
                );
                Translation {
                    text: text.to_string(),
                    source,
                    target,
                    status: TranslationStatus::Failed,
                }
            }
        }
    }

    /// Number of cached translations, including expired ones not yet evicted.
    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn call_provider(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationError> {
        let call = self.provider.translate(text, source, target);
        let translated = tokio::time::timeout(self.config.timeout, call)
            .await
            .map_err(|_| TranslationError::Timeout(self.config.timeout.as_millis() as u64))??;
        if translated.trim().is_empty() {
            return Err(TranslationError::MalformedResponse(
                "empty translation".to_string(),
            ));
        }
        Ok(translated)
    }

    async fn lookup(&self, key: &CacheKey) -> Option<String> {
        let mut cache = self.cache.lock().await;
        match cache.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.config.cache_ttl => {
                Some(entry.text.clone())
            }
            Some(_) => {
                cache.remove(key);
                None
            }
            None => None,
        }
    }

    async fn store(&self, key: CacheKey, text: String) {
        if self.config.cache_capacity == 0 {
            return;
        }
        let mut cache = self.cache.lock().await;
        if cache.len() >= self.config.cache_capacity {
            let ttl = self.config.cache_ttl;
            cache.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        }
        if cache.len() >= self.config.cache_capacity
            && let Some(oldest) = cache
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone())
        {
            cache.remove(&oldest);
        }
        cache.insert(
            key,
            CacheEntry {
                text,
                stored_at: Instant::now(),
            },
        );
    }
}
