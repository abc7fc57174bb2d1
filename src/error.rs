//! Error types for rfcmd operations.

use thiserror::Error;

/// The input document could not be read or parsed.
///
/// This is the only error the converters return. Every other anomaly
/// (missing optional element, absent TOC, unresolvable reference) is
/// rendered as nothing and conversion continues.
#[derive(Error, Debug)]
pub enum MalformedInputError {
    #[error("cannot read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid XML syntax at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("unclosed element <{0}> at end of input")]
    Unclosed(String),

    #[error("document has no root element")]
    NoRootElement,
}

/// Errors raised while retrieving documents from the remote repository.
#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} not found in any format")]
    NotFound(String),
}

#[cfg(feature = "http")]
impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        FetchError::Http(Box::new(err))
    }
}

/// Crate-level error covering conversion, retrieval and output.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
