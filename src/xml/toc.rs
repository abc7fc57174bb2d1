//! Table of Contents generation.
//!
//! The explicit TOC embedded in prepared documents (`front/toc`) wins.
//! Without one, entries come from the caller-supplied registry, and when
//! that is empty too, from an outline of the document's own sections.

use crate::dom::{Dom, NodeId};
use crate::markdown::slugify;

use super::XmlConfig;
use super::anchors::{AnchorMap, pn_number, section_anchor};
use super::inline::{element_text, own_text};

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Nesting depth, starting at 1 for top-level sections.
    pub depth: usize,
    /// Section number such as `3.2`, if the section is numbered.
    pub number: Option<String>,
    pub title: String,
    /// Link target without the leading `#`.
    pub anchor: String,
}

impl TocEntry {
    pub fn new(depth: usize, title: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            depth,
            number: None,
            title: title.into(),
            anchor: anchor.into(),
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    fn to_line(&self) -> String {
        let indent = "  ".repeat(self.depth.saturating_sub(1));
        match &self.number {
            Some(number) => format!("{indent}- [{number}. {}](#{})", self.title, self.anchor),
            None => format!("{indent}- [{}](#{})", self.title, self.anchor),
        }
    }
}

/// Render the TOC block, or nothing when there are no entries.
pub fn render_toc(dom: &Dom, root: NodeId, anchors: &AnchorMap, config: &XmlConfig) -> Vec<String> {
    let entries = match explicit_toc(dom, root) {
        Some(ul) => {
            let mut lines = Vec::new();
            toc_list(dom, anchors, ul, 0, &mut lines);
            lines
        }
        None if !config.toc_entries.is_empty() => {
            config.toc_entries.iter().map(TocEntry::to_line).collect()
        }
        None if config.synthesize_toc => outline(dom, root).iter().map(TocEntry::to_line).collect(),
        None => Vec::new(),
    };

    if entries.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["## Table of Contents".to_string(), String::new()];
    lines.extend(entries);
    lines.push(String::new());
    lines
}

fn explicit_toc(dom: &Dom, root: NodeId) -> Option<NodeId> {
    let front = dom.find_child(root, "front")?;
    let toc = dom.find_child(front, "toc")?;
    let section = dom.find_child(toc, "section")?;
    dom.find_child(section, "ul")
}

fn toc_list(dom: &Dom, anchors: &AnchorMap, ul: NodeId, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);

    for li in dom.find_children(ul, "li") {
        if let Some(t) = dom.find_child(li, "t") {
            let xrefs: Vec<NodeId> = dom.find_children(t, "xref").collect();
            let (target_xref, number, title_xref) = match xrefs.as_slice() {
                [num, title, ..] => (*num, dom.attr_nonempty(*num, "derivedContent"), *title),
                [only] => (*only, None, *only),
                [] => continue,
            };

            let target = dom.attr(target_xref, "target").unwrap_or("");
            let anchor = anchors.resolve(target);
            let title = dom
                .attr_nonempty(title_xref, "derivedContent")
                .map(str::to_string)
                .or_else(|| own_text(dom, title_xref))
                .unwrap_or_default();

            if !title.is_empty() {
                match number {
                    Some(number) => lines.push(format!("{indent}- [{number}. {title}](#{anchor})")),
                    None => lines.push(format!("{indent}- [{title}](#{anchor})")),
                }
            }
        }

        if let Some(nested) = dom.find_child(li, "ul") {
            toc_list(dom, anchors, nested, depth + 1, lines);
        }
    }
}

/// Outline of every named section in `middle` and `back`, in document order.
pub fn outline(dom: &Dom, root: NodeId) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    for region in ["middle", "back"] {
        if let Some(region) = dom.find_child(root, region) {
            for section in dom.find_children(region, "section") {
                collect_outline(dom, section, 1, &mut entries);
            }
        }
    }
    entries
}

fn collect_outline(dom: &Dom, section: NodeId, depth: usize, entries: &mut Vec<TocEntry>) {
    let title = dom
        .find_child(section, "name")
        .map(|n| element_text(dom, n))
        .unwrap_or_default();

    if !title.is_empty() {
        let anchor = section_anchor(dom, section).unwrap_or_else(|| slugify(&title));
        let mut entry = TocEntry::new(depth, title, anchor);
        if dom.attr(section, "numbered") != Some("false")
            && let Some(number) = dom.attr(section, "pn").and_then(pn_number)
        {
            entry = entry.with_number(number);
        }
        entries.push(entry);
    }

    for child in dom.find_children(section, "section") {
        collect_outline(dom, child, depth + 1, entries);
    }
}
