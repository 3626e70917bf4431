/// Error type for the fallible edges of the engine: reading snapshots and
/// settings, parsing colours, and the clipboard side action.
///
/// Navigation, layout and hit testing are total and never produce errors.
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("minimum pixel size must be positive, got {0}")]
    InvalidMinPixelSize(u32),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
