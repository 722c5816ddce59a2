pub mod anthropic;
pub mod openai;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{service} API error: {status} - {body}")]
    Api {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),
}
