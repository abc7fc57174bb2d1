//! RFC XML (v3 schema) to Markdown.
//!
//! Conversion runs in two phases. First the [`AnchorMap`] is built from
//! every section of `middle` and `back`. Then front matter, the TOC, the
//! body and the back matter are rendered in that fixed order, reading the
//! map but never changing it.
//!
//! ```
//! use rfcmd::{Converter, XmlConverter};
//!
//! let xml = br#"<rfc><front><title>Example</title></front></rfc>"#;
//! let markdown = XmlConverter::new().convert(xml)?;
//! assert!(markdown.starts_with("# Example"));
//! # Ok::<(), rfcmd::MalformedInputError>(())
//! ```

mod anchors;
mod back;
mod block;
mod front;
mod inline;
mod toc;

pub use anchors::AnchorMap;
pub use block::Block;
pub use toc::TocEntry;

use crate::Converter;
use crate::dom::{Dom, NodeId, parse_xml};
use crate::error::MalformedInputError;
use crate::util::{declared_xml_encoding, decode_text};

/// Configuration for XML conversion.
#[derive(Debug, Clone)]
pub struct XmlConfig {
    /// Outline used when the document has no explicit `<toc>`.
    pub toc_entries: Vec<TocEntry>,
    /// Build the outline from the document's sections when neither an
    /// explicit TOC nor `toc_entries` is available.
    pub synthesize_toc: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            toc_entries: Vec::new(),
            synthesize_toc: true,
        }
    }
}

impl XmlConfig {
    pub fn with_toc_entries(mut self, entries: Vec<TocEntry>) -> Self {
        self.toc_entries = entries;
        self
    }

    pub fn with_synthesize_toc(mut self, synthesize: bool) -> Self {
        self.synthesize_toc = synthesize;
        self
    }
}

/// Converter for RFC XML v3 documents.
#[derive(Debug, Clone, Default)]
pub struct XmlConverter {
    config: XmlConfig,
}

impl XmlConverter {
    /// Create a new XmlConverter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an XmlConverter with the specified configuration.
    pub fn with_config(config: XmlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &XmlConfig {
        &self.config
    }

    /// Convert an already decoded document.
    pub fn convert_str(&self, xml: &str) -> Result<String, MalformedInputError> {
        let dom = parse_xml(xml)?;
        let root = dom.root_element().ok_or(MalformedInputError::NoRootElement)?;
        Ok(self.render(&dom, root))
    }

    fn render(&self, dom: &Dom, root: NodeId) -> String {
        let mut lines = Vec::new();

        if let Some(front) = dom.find_child(root, "front") {
            lines.extend(front::render_front(dom, root, front));
        }

        // Must be complete before anything links to a section.
        let anchors = AnchorMap::build(dom, root);
        lines.extend(toc::render_toc(dom, root, &anchors, &self.config));

        if let Some(middle) = dom.find_child(root, "middle") {
            for section in dom.find_children(middle, "section") {
                lines.extend(block::render_section(dom, section, 1));
            }
        }

        if let Some(back) = dom.find_child(root, "back") {
            lines.extend(back::render_back(dom, back));
        }

        lines.join("\n")
    }
}

impl Converter for XmlConverter {
    fn convert(&self, input: &[u8]) -> Result<String, MalformedInputError> {
        let text = decode_text(input, declared_xml_encoding(input));
        self.convert_str(&text)
    }
}
