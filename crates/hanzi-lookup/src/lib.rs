use hanzi_types::CharacterRecord;

/// Message shown when the input is not an accepted character
pub const INVALID_CHARACTER_MESSAGE: &str = "Please enter a valid Chinese character.";

/// Message shown for every retrieval or schema failure
pub const RETRIEVAL_FAILED_MESSAGE: &str = "Failed to retrieve character data. Please try again.";

/// Character data provider interface
#[async_trait::async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetch dictionary data for a single character.
    ///
    /// One attempt per call; retries are up to the caller.
    async fn fetch(&self, character: char) -> Result<CharacterRecord, LookupError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

/// Coarse error class used for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Retrieval,
    Schema,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Not an accepted character: {0:?}")]
    InvalidCharacter(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Service returned no content")]
    EmptyResponse,

    #[error("Malformed character data: {0}")]
    SchemaError(String),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidCharacter(_) => ErrorKind::Validation,
            LookupError::SchemaError(_) => ErrorKind::Schema,
            LookupError::NetworkError(_)
            | LookupError::ApiError { .. }
            | LookupError::RateLimitExceeded
            | LookupError::AuthenticationError
            | LookupError::EmptyResponse => ErrorKind::Retrieval,
        }
    }

    /// Sanitized text for the UI. Never includes the internal detail.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => INVALID_CHARACTER_MESSAGE,
            ErrorKind::Retrieval | ErrorKind::Schema => RETRIEVAL_FAILED_MESSAGE,
        }
    }
}
