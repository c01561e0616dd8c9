use reqwest::StatusCode;
use texta_primitives::schemas::api_schemas::APIError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Text cannot be empty")]
    EmptyText,
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    #[error("No texts provided")]
    EmptyBatch,
    #[error("Batch of {size} texts exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },
    #[error("Model {model} is currently loading, try again in about {estimated_secs} seconds")]
    ModelLoading { model: String, estimated_secs: u64 },
    #[error("Rate limit reached on the inference provider: {0}")]
    RateLimited(String),
    #[error("Inference provider returned HTTP {status}: {message}")]
    ProviderStatus { status: u16, message: String },
    #[error("Inference provider error: {0}")]
    ProviderError(String),
    #[error("Request to the inference provider timed out")]
    Timeout,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Malformed response from the inference provider: {0}")]
    MalformedResponse(String),
    #[error("Model {model} returned an unrecognized label: {label}")]
    UnknownLabel { model: String, label: String },
}

impl AnalyzerError {
    /// Input problems are the caller's fault; everything else is the provider's.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyzerError::EmptyText
            | AnalyzerError::InvalidModel(_)
            | AnalyzerError::EmptyBatch
            | AnalyzerError::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(&self) -> APIError {
        let status = self.status_code();
        APIError::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            &self.to_string(),
        )
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> AnalyzerError {
        if err.is_timeout() {
            AnalyzerError::Timeout
        } else if err.is_decode() {
            AnalyzerError::MalformedResponse(err.to_string())
        } else {
            AnalyzerError::NetworkError(err.to_string())
        }
    }
}
