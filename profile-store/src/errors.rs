use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("database transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database returned {status} for {table}: {snippet}")]
    Status {
        status: u16,
        table: &'static str,
        snippet: String,
    },

    #[error("failed to decode {table} rows: {message}")]
    Decode {
        table: &'static str,
        message: String,
    },

    #[error("{0} not found")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("auth service unavailable: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Upstream(err.to_string())
    }
}
