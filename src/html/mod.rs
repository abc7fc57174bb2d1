//! Legacy HTML renderings to Markdown.
//!
//! Old RFCs are published as plain text wrapped in `<pre>` blocks, with no
//! markup for sections. The converter pulls that text out and runs it
//! through a fixed pipeline of text passes:
//!
//! 1. [`extract_preformatted`] and [`strip_links`]
//! 2. [`remove_page_breaks`] and [`collapse_blank_lines`]
//! 3. [`extract_toc`]
//! 4. [`process_sections`]
//!
//! ```
//! use rfcmd::{Converter, HtmlConverter};
//!
//! let html = b"<pre>1.  Introduction\n\n   Hello.</pre>";
//! let markdown = HtmlConverter::new().convert(html)?;
//! assert!(markdown.starts_with("<a id=\"section-1\"></a>`1.  Introduction`"));
//! # Ok::<(), rfcmd::MalformedInputError>(())
//! ```

mod classify;
mod passes;
mod sections;
mod toc;

pub use classify::{
    LinkKind, ascii_table_to_pipe, classify_link, is_ascii_art, is_ascii_table, is_bit_diagram,
    is_definition_list, is_indented_code, is_line_numbered_code, is_list,
};
pub use passes::{collapse_blank_lines, extract_preformatted, remove_page_breaks, strip_links};
pub use sections::{process_sections, section_heading, section_label};
pub use toc::{ExtractedToc, TOC_HEADER, TocSpan, extract_toc, find_toc_span, format_toc_entry};

use crate::Converter;
use crate::dom::parse_html;
use crate::error::MalformedInputError;
use crate::util::{declared_html_charset, decode_text};

/// How section segments are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentMode {
    /// Every segment is one `text` fence, layout untouched.
    #[default]
    Opaque,
    /// Segments are split into blocks; ASCII tables become pipe tables.
    Classified,
}

/// Configuration for HTML conversion.
#[derive(Debug, Clone, Default)]
pub struct HtmlConfig {
    pub segment_mode: SegmentMode,
}

impl HtmlConfig {
    pub fn with_segment_mode(mut self, mode: SegmentMode) -> Self {
        self.segment_mode = mode;
        self
    }
}

/// Converter for legacy HTML renderings of RFCs.
#[derive(Debug, Clone, Default)]
pub struct HtmlConverter {
    config: HtmlConfig,
}

impl HtmlConverter {
    /// Create a new HtmlConverter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an HtmlConverter with the specified configuration.
    pub fn with_config(config: HtmlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }

    /// Convert an already decoded document. Never fails: html5ever
    /// recovers from any markup error.
    pub fn convert_str(&self, html: &str) -> String {
        let dom = parse_html(html);
        let text = extract_preformatted(&dom);
        let text = strip_links(&text);
        let text = remove_page_breaks(&text);
        let text = collapse_blank_lines(&text);
        let toc = extract_toc(&text);
        process_sections(&toc.text, toc.span, self.config.segment_mode)
    }
}

impl Converter for HtmlConverter {
    fn convert(&self, input: &[u8]) -> Result<String, MalformedInputError> {
        let text = decode_text(input, declared_html_charset(input));
        Ok(self.convert_str(&text))
    }
}
