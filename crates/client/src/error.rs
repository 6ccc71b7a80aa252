use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {0} is missing its data field")]
    MissingData(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
