use thiserror::Error;

/// Anything that stops a hero request from producing a usable response body.
///
/// These never reach controller code: [`crate::HeroClient`] logs them and
/// substitutes the operation's fallback value.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
