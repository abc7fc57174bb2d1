//! Heuristic classifiers for blocks of fixed-width text.
//!
//! All predicates are pure functions over a block's lines. The converter
//! only consults them in [`SegmentMode::Classified`](super::SegmentMode).

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::{escape_table_cell, pipe_table};

/// Share of box-drawing lines above which a block is treated as art.
const ART_RATIO: f64 = 0.3;

/// Indentation deeper than RFC body text (three columns).
const CODE_INDENT: usize = 6;

/// `+---+----+` or `+===+` table borders.
static TABLE_BORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+[-=+]*[-=][-=+]*\+\s*$").unwrap());

static TABLE_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|.*\|\s*$").unwrap());

/// Bit ruler over a protocol diagram: `0                   1`.
static BIT_RULER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*0(?:\s+\d){3,}\s*$|^\s*0\s{2,}1\s{2,}2\s{2,}3\s*$").unwrap());

/// Field separator under a ruler: `+-+-+-+-+`.
static BIT_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\+-){4,}\+\s*$").unwrap());

static NUMBERED_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)[:|]?\s").unwrap());

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*+o]|\d+[.)]|\([0-9a-z]+\)|[a-z][.)])\s+\S").unwrap()
});

static CODE_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{};=]").unwrap());

static RFC_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|/)rfc(\d{1,5})(?:\.(?:html|txt|xml|pdf))?/?(?:#.*)?$").unwrap()
});

static EXTERNAL_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*:|//)").unwrap());

/// What a hyperlink in a legacy rendering points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Fragment within the same document (`#section-3`).
    Internal,
    /// Another RFC, by number.
    RfcReference(u32),
    /// Absolute URL or other scheme.
    External,
    Relative,
}

fn non_blank<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    lines.iter().copied().filter(|l| !l.trim().is_empty())
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_box_line(line: &str) -> bool {
    let t = line.trim();
    t.contains("+-")
        || t.contains("-+")
        || (t.len() > 1 && (t.starts_with('|') || t.starts_with('+')) && (t.ends_with('|') || t.ends_with('+')))
        || t.chars().filter(|&c| matches!(c, '|' | '/' | '\\')).count() >= 2
}

/// More than 30% of the non-blank lines draw boxes or connectors.
pub fn is_ascii_art(lines: &[&str]) -> bool {
    let (total, boxes) = non_blank(lines).fold((0usize, 0usize), |(total, boxes), line| {
        (total + 1, boxes + usize::from(is_box_line(line)))
    });
    total > 0 && boxes as f64 / total as f64 > ART_RATIO
}

/// Protocol header diagrams: a bit ruler or a `+-+-+` field separator.
pub fn is_bit_diagram(lines: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| BIT_RULER_RE.is_match(line) || BIT_SEPARATOR_RE.is_match(line))
}

/// At least two `+---+` borders and two `| … |` rows.
pub fn is_ascii_table(lines: &[&str]) -> bool {
    if is_bit_diagram(lines) {
        return false;
    }
    let borders = lines.iter().filter(|l| TABLE_BORDER_RE.is_match(l)).count();
    let rows = lines.iter().filter(|l| TABLE_ROW_RE.is_match(l)).count();
    borders >= 2 && rows >= 2
}

/// Three or more lines carrying consecutive line numbers.
pub fn is_line_numbered_code(lines: &[&str]) -> bool {
    let numbers: Option<Vec<u64>> = non_blank(lines)
        .map(|line| {
            NUMBERED_LINE_RE
                .captures(line)
                .and_then(|caps| caps[1].parse().ok())
        })
        .collect();
    match numbers {
        Some(numbers) if numbers.len() >= 3 => numbers
            .windows(2)
            .all(|w| w[0].checked_add(1) == Some(w[1])),
        _ => false,
    }
}

/// Every line sits deeper than body text and some line looks like code.
pub fn is_indented_code(lines: &[&str]) -> bool {
    let mut any = false;
    for line in non_blank(lines) {
        if indent_of(line) < CODE_INDENT {
            return false;
        }
        any = true;
    }
    any && lines.iter().any(|l| CODE_PUNCT_RE.is_match(l))
}

/// Every line at the block's outer indentation starts with a list marker.
pub fn is_list(lines: &[&str]) -> bool {
    let Some(outer) = non_blank(lines).map(indent_of).min() else {
        return false;
    };
    non_blank(lines)
        .filter(|line| indent_of(line) == outer)
        .all(|line| LIST_MARKER_RE.is_match(line))
}

/// Terms at the outer indentation, each followed by deeper description
/// lines.
pub fn is_definition_list(lines: &[&str]) -> bool {
    if is_list(lines) {
        return false;
    }
    let body: Vec<&str> = non_blank(lines).collect();
    let Some(outer) = body.iter().map(|l| indent_of(l)).min() else {
        return false;
    };

    let mut terms = 0;
    for (i, line) in body.iter().enumerate() {
        if indent_of(line) != outer {
            continue;
        }
        match body.get(i + 1) {
            Some(next) if indent_of(next) > outer => terms += 1,
            _ => return false,
        }
    }
    terms > 0
}

/// Classify an `href` from a legacy rendering.
///
/// ```
/// use rfcmd::html::{LinkKind, classify_link};
///
/// assert_eq!(classify_link("#section-2"), LinkKind::Internal);
/// assert_eq!(classify_link("./rfc2119"), LinkKind::RfcReference(2119));
/// assert_eq!(classify_link("https://example.com/"), LinkKind::External);
/// ```
pub fn classify_link(href: &str) -> LinkKind {
    let href = href.trim();
    if href.starts_with('#') {
        return LinkKind::Internal;
    }
    if let Some(caps) = RFC_LINK_RE.captures(href)
        && let Ok(number) = caps[1].parse()
    {
        return LinkKind::RfcReference(number);
    }
    if EXTERNAL_LINK_RE.is_match(href) {
        LinkKind::External
    } else {
        LinkKind::Relative
    }
}

/// Convert a bordered ASCII table to a pipe table.
///
/// Rows between two borders are one logical row; wrapped cell text is
/// joined with spaces. The first logical row is the header. Returns
/// `None` when the block is not a table.
pub fn ascii_table_to_pipe(lines: &[&str]) -> Option<Vec<String>> {
    if !is_ascii_table(lines) {
        return None;
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();
    for line in lines {
        if TABLE_BORDER_RE.is_match(line) {
            if !current.is_empty() {
                rows.push(merge_row(&current));
                current.clear();
            }
        } else if TABLE_ROW_RE.is_match(line) {
            let trimmed = line.trim();
            let inner = &trimmed[1..trimmed.len() - 1];
            current.push(inner.split('|').map(|c| c.trim().to_string()).collect());
        }
    }
    if !current.is_empty() {
        rows.push(merge_row(&current));
    }

    let mut rows = rows.into_iter();
    let headers = rows.next()?;
    let body: Vec<Vec<String>> = rows.collect();
    Some(pipe_table(&headers, &body))
}

fn merge_row(physical: &[Vec<String>]) -> Vec<String> {
    let width = physical.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|col| {
            let joined = physical
                .iter()
                .filter_map(|row| row.get(col))
                .filter(|cell| !cell.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            escape_table_cell(&joined)
        })
        .collect()
}
