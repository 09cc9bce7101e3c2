// error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown series '{0}' (expected upload, download or total)")]
    UnknownSeries(String),

    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
