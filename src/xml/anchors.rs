//! Section identifier to anchor resolution.
//!
//! The map is built in one pass over every section of `middle` and `back`
//! before any output that links to sections is produced, and is never
//! modified afterwards.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::markdown::derive_anchor;

/// Immutable mapping from a section's `pn` to its `anchor`.
#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
    by_pn: HashMap<String, String>,
}

impl AnchorMap {
    /// Collect `pn -> anchor` pairs from every section at every depth.
    pub fn build(dom: &Dom, root: NodeId) -> Self {
        let mut by_pn = HashMap::new();
        for region in ["middle", "back"] {
            if let Some(region) = dom.find_child(root, region) {
                for section in dom.find_children(region, "section") {
                    collect(dom, section, &mut by_pn);
                }
            }
        }
        Self { by_pn }
    }

    /// Anchor for an identifier.
    ///
    /// Without a declared anchor, a numbered `pn` resolves to the anchor
    /// derived from its label, as rendered by [`section_anchor`]. Any other
    /// identifier resolves to itself.
    pub fn resolve(&self, pn: &str) -> String {
        match self.by_pn.get(pn) {
            Some(anchor) => anchor.clone(),
            None => pn_number(pn).map_or_else(|| pn.to_string(), derive_anchor),
        }
    }

    /// Anchor for an identifier, if the document declares one.
    pub fn get(&self, pn: &str) -> Option<&str> {
        self.by_pn.get(pn).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_pn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pn.is_empty()
    }
}

fn collect(dom: &Dom, section: NodeId, by_pn: &mut HashMap<String, String>) {
    if let (Some(pn), Some(anchor)) = (
        dom.attr_nonempty(section, "pn"),
        dom.attr_nonempty(section, "anchor"),
    ) {
        by_pn.insert(pn.to_string(), anchor.to_string());
    }
    for child in dom.find_children(section, "section") {
        collect(dom, child, by_pn);
    }
}

/// Numeric label encoded in a section `pn`, e.g. `section-3.2.1` -> `3.2.1`.
///
/// Appendix, boilerplate and other non-numeric identifiers yield `None`.
pub fn pn_number(pn: &str) -> Option<&str> {
    let label = pn.strip_prefix("section-")?;
    let numeric = !label.is_empty()
        && label
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    numeric.then_some(label)
}

/// Anchor a section is addressable by in the output.
///
/// The declared `anchor` wins. A numbered section without one gets the
/// anchor derived from its `pn` label, the same form the HTML converter
/// produces for the same label.
pub fn section_anchor(dom: &Dom, section: NodeId) -> Option<String> {
    if let Some(anchor) = dom.attr_nonempty(section, "anchor") {
        return Some(anchor.to_string());
    }
    if dom.attr(section, "numbered") == Some("false") {
        return None;
    }
    dom.attr(section, "pn")
        .and_then(pn_number)
        .map(derive_anchor)
}
