use thiserror::Error;

pub type Result<T> = std::result::Result<T, FacebookError>;

#[derive(Debug, Error)]
pub enum FacebookError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Graph API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FacebookError {
    fn from(err: reqwest::Error) -> Self {
        FacebookError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FacebookError {
    fn from(err: serde_json::Error) -> Self {
        FacebookError::Parse(err.to_string())
    }
}
