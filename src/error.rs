use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config has no channels")]
    NoChannels,

    #[error("channel {channel}: shift {shift} outside -31..=31")]
    ShiftOutOfRange { channel: usize, shift: i32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
