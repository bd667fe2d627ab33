use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The one hard evaluation error: the candle window is too short for
    /// the configured indicators. Evaluation stops before position state
    /// is touched.
    #[error("insufficient candle history: got {got}, need {need}")]
    InsufficientData { got: usize, need: usize },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Policy error: {0}")]
    Policy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
