use std::io;
use std::path::PathBuf;

/// Errors raised while turning a frame list into a GIF.
#[derive(thiserror::Error, Debug)]
pub enum AssembleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to open image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("gif encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

impl AssembleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AssembleError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A required form field was left blank when Generate was pressed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields (no images selected).")]
    MissingImages,
    #[error("Please fill in all fields (no output directory selected).")]
    MissingOutputDirectory,
    #[error("Please fill in all fields (no output filename entered).")]
    MissingFilename,
}
