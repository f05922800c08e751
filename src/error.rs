//! Error types for EPUB text extraction.

use thiserror::Error;

use crate::markup::ParseError;

/// Errors that can occur while opening an EPUB or extracting its text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("could not read archive entry ({path}): {source}")]
    Entry {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode XML ({path}): {source}")]
    Decode {
        path: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("could not extract text from item ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Structural violations in the container/package cross-references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("no package")]
    NoPackage,

    #[error("no spine")]
    NoSpine,

    #[error("no manifest")]
    NoManifest,

    #[error("missing item with ID {0:?}")]
    MissingManifestItem(String),

    #[error("root file has empty path")]
    EmptyRootFilePath,

    #[error("invalid linear value {0:?}")]
    InvalidLinear(String),
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Decode,
    Parse,
    Structural,
}

impl Error {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::Zip(_) | Error::Entry { .. } => ErrorKind::Io,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Structural(_) => ErrorKind::Structural,
        }
    }

    /// Returns the structural error, if this is one.
    pub fn as_structural(&self) -> Option<&StructuralError> {
        match self {
            Error::Structural(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
