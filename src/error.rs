// Crate error type. Every variant states *where* things went wrong.
// The per-frame core (motion, smoothing, outlines) never fails; only setup does.
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing the framebuffer to the window failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// The roster file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The roster file is not valid roster JSON.
    #[error("invalid roster {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A roster entry that cannot drive a painter.
    #[error("invalid painter: {0}")]
    InvalidPainter(String),
}

impl Error {
    pub fn invalid_painter(msg: impl Into<String>) -> Self {
        Self::InvalidPainter(msg.into())
    }
}
