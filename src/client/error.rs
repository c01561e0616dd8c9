use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Cannot connect to the sentiment API at {url}: {message}")]
    Connection { url: String, message: String },
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response from the API: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True when the relay itself could not be reached, as opposed to the
    /// relay answering with an error.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connection { .. } | ClientError::Timeout(_))
    }
}
