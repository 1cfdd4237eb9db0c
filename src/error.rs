use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Reading the input, writing the output or touching a temporary slide file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser session failed to start, load content, capture or export.
    #[error("Render error: {0}")]
    Render(String),

    /// An intermediate PDF or image could not be parsed, or the output could not be built.
    #[error("PDF assembly error: {0}")]
    Assembly(String),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    pub fn assembly(message: impl Into<String>) -> Self {
        Self::Assembly(message.into())
    }
}

impl From<lopdf::Error> for ConvertError {
    fn from(e: lopdf::Error) -> Self {
        Self::Assembly(e.to_string())
    }
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        Self::Assembly(format!("Failed to decode PNG capture: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
