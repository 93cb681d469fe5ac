use thiserror::Error;

/// Everything that can go wrong between a prompt and a parsed payload.
///
/// None of these reach the UI: the gateway logs them and degrades to an empty
/// result.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion service returned no text")]
    EmptyBody,

    #[error("response is not valid JSON for the expected shape: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
