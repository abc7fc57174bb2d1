//! Section boundary detection and fencing.
//!
//! A boundary is an unindented line carrying a numeric label and a title,
//! such as `3.2.  Node Descriptors`. The text between two boundaries is a
//! segment and keeps its fixed-width layout inside a `text` fence.

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::{anchor_id, derive_anchor, fence};

use super::SegmentMode;
use super::classify::ascii_table_to_pipe;
use super::toc::TocSpan;

static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\.\s+\S").unwrap());

/// Section label of a boundary line, or `None` for any other line.
pub fn section_label(line: &str) -> Option<&str> {
    BOUNDARY_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Anchored monospace heading for a boundary line.
pub fn section_heading(label: &str, line: &str) -> String {
    format!("{}`{}`", anchor_id(&derive_anchor(label)), line.trim_end())
}

/// Wrap the text around the TOC and between boundaries in fences.
///
/// Content before the TOC becomes one block and the TOC passes through as
/// it is. Each boundary becomes an anchored heading followed by its own
/// fenced segment. Without any boundary the remaining text is a single
/// block.
pub fn process_sections(text: &str, toc: Option<TocSpan>, mode: SegmentMode) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();

    let body_start = match toc {
        Some(span) => {
            let span_end = span.end.min(lines.len());
            let span_start = span.start.min(span_end);
            out.extend(render_segment(&lines[..span_start], mode));
            out.extend(lines[span_start..span_end].iter().map(|l| l.to_string()));
            span_end
        }
        None => 0,
    };
    let body = &lines[body_start..];

    let boundaries: Vec<(usize, &str)> = body
        .iter()
        .enumerate()
        .filter_map(|(i, line)| section_label(line).map(|label| (i, label)))
        .collect();

    let first = boundaries.first().map_or(body.len(), |&(i, _)| i);
    out.extend(render_segment(&body[..first], mode));

    for (n, &(i, label)) in boundaries.iter().enumerate() {
        let next = boundaries.get(n + 1).map_or(body.len(), |&(j, _)| j);
        out.push(section_heading(label, body[i]));
        out.push(String::new());
        out.extend(render_segment(&body[i + 1..next], mode));
    }

    out.join("\n")
}

/// Fence one segment, followed by a blank line. Blank segments render
/// nothing.
fn render_segment(lines: &[&str], mode: SegmentMode) -> Vec<String> {
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(first);
    let content = &lines[first..=last];

    match mode {
        SegmentMode::Opaque => {
            let mut out = fence("text", content);
            out.push(String::new());
            out
        }
        SegmentMode::Classified => classified_segment(content),
    }
}

/// Split on blank lines; tables become pipe tables and runs of other
/// blocks share one fence.
fn classified_segment(lines: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for block in lines.split(|l| l.trim().is_empty()) {
        if block.is_empty() {
            continue;
        }
        match ascii_table_to_pipe(block) {
            Some(table) => {
                flush_text(&mut pending, &mut out);
                out.extend(table);
                out.push(String::new());
            }
            None => {
                if !pending.is_empty() {
                    pending.push("");
                }
                pending.extend_from_slice(block);
            }
        }
    }
    flush_text(&mut pending, &mut out);
    out
}

fn flush_text(pending: &mut Vec<&str>, out: &mut Vec<String>) {
    if pending.is_empty() {
        return;
    }
    out.extend(fence("text", pending.as_slice()));
    out.push(String::new());
    pending.clear();
}
