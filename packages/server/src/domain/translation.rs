//! Translation port and translation outcome types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{error::TranslationError, value_object::LanguageCode};

/// External machine-translation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationError>;
}

/// How a delivered text relates to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationStatus {
    /// The provider produced the text
    Translated,
    /// Source and target languages match; the original is delivered as-is
    SameLanguage,
    /// The provider failed; the original is delivered and flagged untranslated
    Failed,
}

/// Text produced for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
    pub status: TranslationStatus,
}

impl Translation {
    pub fn is_untranslated(&self) -> bool {
        self.status == TranslationStatus::Failed
    }
}
