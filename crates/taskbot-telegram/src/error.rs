use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with `ok: false`; carries Telegram's description.
    #[error("api error: {0}")]
    Api(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TelegramError>;
