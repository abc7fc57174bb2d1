//! # rfcmd
//!
//! Convert IETF RFC documents to Markdown.
//!
//! Two source shapes are supported:
//!
//! - RFC XML v3, as published for current RFCs ([`XmlConverter`])
//! - Legacy HTML renderings, plain text inside `<pre>` ([`HtmlConverter`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfcmd::convert_path;
//!
//! let markdown = convert_path("rfc9514.xml")?;
//! std::fs::write("rfc9514.md", markdown)?;
//! # Ok::<(), rfcmd::Error>(())
//! ```
//!
//! ## Choosing a converter
//!
//! Converters share the [`Converter`] trait and hold only configuration,
//! so they can be built once and reused:
//!
//! ```
//! use rfcmd::{Converter, HtmlConfig, HtmlConverter, SegmentMode};
//!
//! let converter = HtmlConverter::with_config(
//!     HtmlConfig::default().with_segment_mode(SegmentMode::Classified),
//! );
//! let markdown = converter.convert(b"<pre>1.  Scope\n\n   Text.</pre>")?;
//! assert!(markdown.contains("```text"));
//! # Ok::<(), rfcmd::MalformedInputError>(())
//! ```
//!
//! Documents are retrieved from the RFC Editor with the [`fetch`] module.

pub mod dom;
pub mod error;
pub mod fetch;
pub mod html;
pub mod markdown;
pub(crate) mod util;
pub mod xml;

use std::path::Path;

pub use error::{Error, FetchError, MalformedInputError, Result};
pub use html::{HtmlConfig, HtmlConverter, SegmentMode};
pub use xml::{TocEntry, XmlConfig, XmlConverter};

/// Trait for converting one source document to Markdown.
///
/// Conversion is a pure function of the input: it returns the complete
/// document or a [`MalformedInputError`], never partial output.
pub trait Converter {
    /// Convert raw document bytes.
    fn convert(&self, input: &[u8]) -> std::result::Result<String, MalformedInputError>;

    /// Read a file in full and convert it.
    fn convert_file(&self, path: &Path) -> std::result::Result<String, MalformedInputError> {
        let bytes = std::fs::read(path)?;
        self.convert(&bytes)
    }
}

/// Source formats, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RFC XML v3
    Xml,
    /// Legacy HTML rendering
    Html,
}

impl Format {
    /// Detect the format from a path's extension.
    ///
    /// ```
    /// use rfcmd::Format;
    /// use std::path::Path;
    ///
    /// assert_eq!(Format::from_path(Path::new("rfc791.HTML")).unwrap(), Format::Html);
    /// assert!(Format::from_path(Path::new("rfc791.txt")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xml" => Some(Format::Xml),
            "html" | "htm" => Some(Format::Html),
            _ => None,
        }
    }
}

/// Convert a file with the default converter for its extension.
pub fn convert_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let markdown = match Format::from_path(path)? {
        Format::Xml => XmlConverter::new().convert_file(path)?,
        Format::Html => HtmlConverter::new().convert_file(path)?,
    };
    Ok(markdown)
}
