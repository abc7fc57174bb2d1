//! Text rewriting passes over the preformatted body of a legacy rendering.
//!
//! Each pass is a pure `&str -> String` function. The converter runs them
//! in a fixed order; the TOC and section stages live in their own modules.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::Dom;

/// Opening or closing `<a>` tag left in the text.
static ANCHOR_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?a\b[^>]*>").unwrap());

/// Running footer: `Gredler, et al.   Standards Track   [Page 1]`.
static PAGE_FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\x0c?\S.*\S\s{2,}\[Page \d+\]\s*$").unwrap());

/// Running header: `RFC 7752   BGP-LS   March 2016`.
static PAGE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\x0c?RFC \d+\s{2,}.*\s(?:January|February|March|April|May|June|July|August|September|October|November|December) \d{4}\s*$",
    )
    .unwrap()
});

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Text content of every `<pre>` element, joined with newlines.
///
/// Documents without any `<pre>` fall back to the text of `<body>`.
pub fn extract_preformatted(dom: &Dom) -> String {
    let document = dom.document();
    let blocks: Vec<String> = dom
        .descendants_by_tag(document, "pre")
        .into_iter()
        .map(|pre| dom.text_content(pre))
        .collect();
    if !blocks.is_empty() {
        return blocks.join("\n");
    }

    dom.descendants_by_tag(document, "body")
        .first()
        .map(|&body| dom.text_content(body))
        .unwrap_or_default()
}

/// Remove `<a …>` and `</a>` tags, keeping the link text.
pub fn strip_links(text: &str) -> String {
    ANCHOR_TAG_RE.replace_all(text, "").into_owned()
}

/// Drop pagination artifacts: running headers and footers, form feeds and
/// dashed page rules. Every other line passes through in order.
pub fn remove_page_breaks(text: &str) -> String {
    text.lines()
        .filter(|line| !is_page_artifact(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_page_artifact(line: &str) -> bool {
    if PAGE_FOOTER_RE.is_match(line) || PAGE_HEADER_RE.is_match(line) {
        return true;
    }
    let separator_only = line
        .chars()
        .all(|c| c == '-' || c == '\x0c' || c.is_whitespace());
    if !separator_only {
        return false;
    }
    line.contains('\x0c') || (line.contains('-') && line.trim().chars().all(|c| c == '-'))
}

/// Collapse runs of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}
