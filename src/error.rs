use reqwest::StatusCode;
use thiserror::Error;

/// Any failure to obtain a reply. The user only ever sees the fallback
/// message; the variant is kept for the log.
#[derive(Debug, Error)]
pub enum RequestFailed {
    #[error("reply service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(
        "reply service returned {status}: {}",
        .detail.as_deref().unwrap_or("no detail")
    )]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("malformed reply body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("reply service panicked")]
    Panicked,
}
