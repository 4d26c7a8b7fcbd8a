//! Transport error types

use thiserror::Error;

/// Classified transport failure, rendered by the host as an inline system
/// message rather than a crash.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("authentication failed (401); check your API key")]
    Auth,

    #[error("rate limited (429); please slow down")]
    RateLimited,

    #[error("server error ({0}); try again later")]
    Server(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for transport operations
pub type ChatResult<T> = Result<T, ChatError>;
