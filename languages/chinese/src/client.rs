use std::time::Duration;

use async_trait::async_trait;
use hanzi_config::lookup::LookupConfig;
use hanzi_core::language::LanguageProcessor;
use hanzi_lookup::{CharacterSource, LookupError, ProviderMetadata};
use hanzi_types::CharacterRecord;
use reqwest::StatusCode;

use crate::processor::ChineseProcessor;
use crate::schema::{ErrorWrapper, GenerateContentRequest, GenerateContentResponse};

/// Character data from the Gemini `generateContent` API with a structured-output schema
#[derive(Clone)]
pub struct GeminiCharacterClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    processor: ChineseProcessor,
}

impl GeminiCharacterClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            processor: ChineseProcessor::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl CharacterSource for GeminiCharacterClient {
    async fn fetch(&self, character: char) -> Result<CharacterRecord, LookupError> {
        if !self.processor.accepts(character) {
            return Err(LookupError::InvalidCharacter(character.to_string()));
        }

        if self.api_key.trim().is_empty() {
            return Err(LookupError::AuthenticationError);
        }

        let request = GenerateContentRequest::for_character(character);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimitExceeded);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LookupError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::ApiError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(LookupError::EmptyResponse);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            LookupError::SchemaError(format!("Failed to parse response envelope: {}", e))
        })?;

        let text = parsed.into_text().ok_or(LookupError::EmptyResponse)?;
        tracing::debug!(%character, bytes = text.len(), "lookup response received");

        parse_record(&text, character)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

/// Parse the structured-output text into a record for `expected`.
///
/// No partial recovery: any missing or invalid field, or a record for a
/// different character, is a schema error.
pub fn parse_record(text: &str, expected: char) -> Result<CharacterRecord, LookupError> {
    let record: CharacterRecord =
        serde_json::from_str(text).map_err(|e| LookupError::SchemaError(e.to_string()))?;

    if record.character() != expected {
        return Err(LookupError::SchemaError(format!(
            "requested {:?}, service answered for {:?}",
            expected,
            record.character()
        )));
    }

    Ok(record)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status = wrapper.error.status.unwrap_or_default();
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status.is_empty() {
                message
            } else {
                format!("{status}: {message}")
            }
        })
        .unwrap_or_else(|_| body.to_string())
}
