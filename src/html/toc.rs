//! Table of Contents detection and reformatting for legacy renderings.
//!
//! A legacy TOC is plain text: indented entries with dot leaders and page
//! numbers. Each entry is rewritten as monospace with a link on its
//! section label, so the layout still lines up in rendered Markdown.

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::derive_anchor;

/// Header line written in place of the original TOC title.
pub const TOC_HEADER: &str = "`Table of Contents`";

const TOC_TITLES: [&str; 2] = ["Table of Contents", "Contents"];

/// Dot leader plus optional page number, both dotted styles:
/// `Introduction.......3` and `Introduction  . . . .  6`. A line ending
/// in one is a TOC entry.
static DOT_LEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s*\.){2,}\s*\d*\s*$").unwrap());

static ENTRY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\.\s+(.+)$").unwrap());

/// Line range `[start, end)` occupied by a TOC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocSpan {
    pub start: usize,
    pub end: usize,
}

/// Result of [`extract_toc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedToc {
    /// The full text with the TOC reformatted in place.
    pub text: String,
    /// Reformatted entries, without the header.
    pub entries: Vec<String>,
    /// Where the reformatted block sits in `text`, if a TOC was found.
    pub span: Option<TocSpan>,
}

/// Locate the TOC in `lines`.
///
/// It starts at the first line consisting of a TOC title and ends at the
/// first later line that is non-empty, unindented and not an entry.
pub fn find_toc_span(lines: &[&str]) -> Option<TocSpan> {
    let start = lines
        .iter()
        .position(|line| TOC_TITLES.contains(&line.trim_end()))?;

    let end = lines[start + 1..]
        .iter()
        .position(|line| {
            !line.trim().is_empty()
                && !line.starts_with(char::is_whitespace)
                && !DOT_LEADER_RE.is_match(line)
        })
        .map_or(lines.len(), |offset| start + 1 + offset);

    Some(TocSpan { start, end })
}

/// Reformat one TOC line. Returns `None` when nothing is left after
/// stripping the dot leader.
///
/// ```
/// use rfcmd::html::format_toc_entry;
///
/// assert_eq!(
///     format_toc_entry("   1. Introduction ....................................................3").as_deref(),
///     Some("`   `[`1`](#section-1)`. Introduction`"),
/// );
/// assert_eq!(format_toc_entry("   "), None);
/// ```
pub fn format_toc_entry(line: &str) -> Option<String> {
    let body = line.trim_start();
    let prefix = &line[..line.len() - body.len()];
    let body = DOT_LEADER_RE.replace(body, "");
    let body = body.trim_end();
    if body.is_empty() {
        return None;
    }

    let Some(caps) = ENTRY_LABEL_RE.captures(body) else {
        return Some(format!("`{prefix}{body}`"));
    };
    let label = &caps[1];
    let title = caps[2].trim();
    let link = format!("[`{label}`](#{})`. {title}`", derive_anchor(label));
    if prefix.is_empty() {
        Some(link)
    } else {
        Some(format!("`{prefix}`{link}"))
    }
}

/// Find the TOC in `text` and replace it with the reformatted block.
///
/// Without a TOC the text is returned unchanged.
pub fn extract_toc(text: &str) -> ExtractedToc {
    let lines: Vec<&str> = text.lines().collect();
    let Some(span) = find_toc_span(&lines) else {
        return ExtractedToc {
            text: text.to_string(),
            entries: Vec::new(),
            span: None,
        };
    };

    let entries: Vec<String> = lines[span.start + 1..span.end]
        .iter()
        .filter_map(|line| format_toc_entry(line))
        .collect();

    let mut block = vec![TOC_HEADER.to_string(), String::new()];
    // Two trailing spaces force a line break between entries.
    block.extend(entries.iter().map(|entry| format!("{entry}  ")));
    block.push(String::new());

    let new_span = TocSpan {
        start: span.start,
        end: span.start + block.len(),
    };

    let mut out: Vec<String> = lines[..span.start].iter().map(|l| l.to_string()).collect();
    out.extend(block);
    out.extend(lines[span.end..].iter().map(|l| l.to_string()));

    ExtractedToc {
        text: out.join("\n"),
        entries,
        span: Some(new_span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(line: &str) -> Option<String> {
        format_toc_entry(line)
    }

    #[test]
    fn test_continuous_dots() {
        assert_eq!(
            fmt("   1. Introduction....................................................3").unwrap(),
            "`   `[`1`](#section-1)`. Introduction`"
        );
        assert_eq!(
            fmt("   1. Introduction ....................................................3").unwrap(),
            "`   `[`1`](#section-1)`. Introduction`"
        );
        assert_eq!(
            fmt("   1. Introduction.....................................3").unwrap(),
            "`   `[`1`](#section-1)`. Introduction`"
        );
    }

    #[test]
    fn test_spaced_dots() {
        assert_eq!(
            fmt("   1. Introduction  . . . . . . . . . . . . . . . . . . . . . . .  6").unwrap(),
            "`   `[`1`](#section-1)`. Introduction`"
        );
        assert_eq!(
            fmt("   1. Introduction  . . . . . . . . . . . . . . . . . . . . . . .  5").unwrap(),
            "`   `[`1`](#section-1)`. Introduction`"
        );
    }

    #[test]
    fn test_subsections() {
        assert_eq!(
            fmt("      1.1. Requirements Language ......................................5").unwrap(),
            "`      `[`1.1`](#section-1-1)`. Requirements Language`"
        );
        assert_eq!(
            fmt("     3.1. IGP-Prefix Segment (Prefix-SID) . . . . . . . . . . . .  9").unwrap(),
            "`     `[`3.1`](#section-3-1)`. IGP-Prefix Segment (Prefix-SID)`"
        );
        assert_eq!(
            fmt("           3.2.1. Node Descriptors...................................12").unwrap(),
            "`           `[`3.2.1`](#section-3-2-1)`. Node Descriptors`"
        );
    }

    #[test]
    fn test_continuation_line() {
        assert_eq!(
            fmt("                  Functional Components").unwrap(),
            "`                  Functional Components`"
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(fmt("   "), None);
        assert_eq!(fmt(""), None);
        assert_eq!(fmt("   ........ 4"), None);
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(
            fmt("   3. Link-State IGP Segments . . . . . . . . . . . . . . . . .  9").unwrap(),
            "`   `[`3`](#section-3)`. Link-State IGP Segments`"
        );
    }

    #[test]
    fn test_mixed_formats() {
        let a = fmt("   1. Introduction....................................................3").unwrap();
        let b = fmt("   2. Terminology . . . . . . . . . . . . . . . . . . . . . . . .  6").unwrap();
        assert!(a.ends_with("Introduction`"));
        assert!(b.ends_with("Terminology`"));
        assert!(!a.contains("...") && !b.contains(". . ."));
    }

    #[test]
    fn test_unindented_entry_has_no_prefix_span() {
        assert_eq!(
            fmt("10. Security Considerations ..........20").unwrap(),
            "[`10`](#section-10)`. Security Considerations`"
        );
    }

    #[test]
    fn test_unnumbered_entry() {
        assert_eq!(
            fmt("   Authors' Addresses . . . . . . . . . . . .  30").unwrap(),
            "`   Authors' Addresses`"
        );
    }

    const DOC: &str = "Some content before TOC

Table of Contents

   1. Introduction ....................................................3
      1.1. Requirements Language ......................................5
   2. Motivation and Applicability ....................................5

1. Introduction

   This is the introduction text.";

    #[test]
    fn test_find_toc_span() {
        let lines: Vec<&str> = DOC.lines().collect();
        assert_eq!(find_toc_span(&lines), Some(TocSpan { start: 2, end: 8 }));
    }

    #[test]
    fn test_unindented_paged_entry_stays_in_toc() {
        let lines = vec![
            "Contents",
            "   1. Intro . . . . 2",
            "Appendix A.  Extra . . . . . 9",
            "1.  Intro",
        ];
        assert_eq!(find_toc_span(&lines), Some(TocSpan { start: 0, end: 3 }));
    }

    #[test]
    fn test_prose_starting_with_contents_is_not_a_header() {
        let text = "Contents of this memo are informal.\n\n1.  Scope";
        assert_eq!(find_toc_span(&text.lines().collect::<Vec<_>>()), None);
        assert_eq!(extract_toc(text).text, text);
    }

    #[test]
    fn test_toc_runs_to_end_of_text() {
        let lines = vec!["Table of Contents", "   1. A ....1"];
        assert_eq!(find_toc_span(&lines), Some(TocSpan { start: 0, end: 2 }));
    }

    #[test]
    fn test_no_toc() {
        assert_eq!(find_toc_span(&["1.  Introduction", "   text"]), None);
        let extracted = extract_toc("plain\ntext");
        assert_eq!(extracted.text, "plain\ntext");
        assert_eq!(extracted.span, None);
        assert!(extracted.entries.is_empty());
    }

    #[test]
    fn test_extract_toc() {
        let extracted = extract_toc(DOC);
        assert_eq!(
            extracted.entries,
            vec![
                "`   `[`1`](#section-1)`. Introduction`",
                "`      `[`1.1`](#section-1-1)`. Requirements Language`",
                "`   `[`2`](#section-2)`. Motivation and Applicability`",
            ]
        );
        assert_eq!(extracted.span, Some(TocSpan { start: 2, end: 8 }));
        let lines: Vec<&str> = extracted.text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Some content before TOC",
                "",
                "`Table of Contents`",
                "",
                "`   `[`1`](#section-1)`. Introduction`  ",
                "`      `[`1.1`](#section-1-1)`. Requirements Language`  ",
                "`   `[`2`](#section-2)`. Motivation and Applicability`  ",
                "",
                "1. Introduction",
                "",
                "   This is the introduction text.",
            ]
        );
    }
}
