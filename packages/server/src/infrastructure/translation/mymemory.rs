//! MyMemory-compatible HTTP translation provider.
//!
//! `GET <endpoint>?q=<text>&langpair=<source>|<target>` answers with
//! `{"responseData": {"translatedText": "..."}}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::{LanguageCode, TranslationError, TranslationProvider};

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryResponseData>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Pull the translated text out of a response body.
pub fn parse_response(body: &str) -> Result<String, TranslationError> {
    let response: MyMemoryResponse = serde_json::from_str(body)
        .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;
    response
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            TranslationError::MalformedResponse("missing responseData.translatedText".to_string())
        })
}

/// HTTP client for a MyMemory-compatible endpoint.
pub struct MyMemoryTranslator {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl MyMemoryTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationError> {
        let langpair = format!("{source}|{target}");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    TranslationError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(TranslationError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranslationError::Network(e.to_string()))?;
        let translated = parse_response(&body)?;
        tracing::debug!("Translated {} chars via {}", text.chars().count(), langpair);
        Ok(translated)
    }
}
