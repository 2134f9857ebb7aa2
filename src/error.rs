//! Error types.

use std::io;
use std::path::PathBuf;

use rsvg::{LoadingError, RenderingError};
use thiserror::Error;

use crate::sizing::SizeError;

/// A fatal error during a conversion.
///
/// Every variant names the file it concerns, since the message is all the
/// user gets before the process exits.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be opened for reading.
    #[error("could not open '{}' for read", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be created or truncated.
    #[error("could not open '{}' for write", .path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// librsvg could not load the SVG document.
    #[error("could not load '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadingError,
    },

    /// The document's pixel dimensions could not be determined.
    #[error("could not compute the size of '{}': {source}", .path.display())]
    Size {
        path: PathBuf,
        #[source]
        source: SizeError,
    },

    /// librsvg failed while rendering the document.
    #[error("could not render '{}': {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderingError,
    },

    /// cairo could not create the surface or the context for the trace.
    #[error("cairo error while writing '{}': {source}", .path.display())]
    Cairo {
        path: PathBuf,
        #[source]
        source: cairo::Error,
    },

    /// Writing to the output file failed.
    #[error("error writing '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
