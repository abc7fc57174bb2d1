//! Line-oriented Markdown building blocks.
//!
//! Every function returns owned lines; callers concatenate them and join
//! the final document with `\n`.

use super::escape::fence_width;

/// Deepest heading level Markdown supports.
pub const MAX_HEADING_DEPTH: usize = 6;

/// ATX heading line. Depth is clamped to `1..=6`.
pub fn heading(depth: usize, text: &str) -> String {
    let depth = depth.clamp(1, MAX_HEADING_DEPTH);
    format!("{} {}", "#".repeat(depth), text)
}

/// Named anchor used by the XML converter.
pub fn anchor_name(anchor: &str) -> String {
    format!("<a name=\"{anchor}\"></a>")
}

/// Id anchor used by the HTML converter.
pub fn anchor_id(anchor: &str) -> String {
    format!("<a id=\"{anchor}\"></a>")
}

/// Fenced code block around `lines`, tagged with `info` when non-empty.
///
/// The fence grows past three backticks only when the body itself
/// contains a run of three or more.
pub fn fence<S: AsRef<str>>(info: &str, lines: &[S]) -> Vec<String> {
    let longest = lines
        .iter()
        .map(|l| fence_width(l.as_ref()))
        .max()
        .unwrap_or(3);
    let marker = "`".repeat(longest);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("{marker}{info}"));
    out.extend(lines.iter().map(|l| l.as_ref().to_string()));
    out.push(marker);
    out
}

/// Indent every non-blank line by `width` spaces. Blank lines stay empty.
pub fn indent(lines: Vec<String>, width: usize) -> Vec<String> {
    let pad = " ".repeat(width);
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{pad}{line}")
            }
        })
        .collect()
}

/// Pipe table with a `---` separator under the header row.
///
/// Rows shorter than the header are padded with empty cells. Without a
/// header, rows are emitted as they are.
pub fn pipe_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut out = Vec::with_capacity(rows.len() + 2);
    if !headers.is_empty() {
        out.push(table_row(headers));
        out.push(table_row(&vec!["---".to_string(); headers.len()]));
    }
    for row in rows {
        let mut cells = row.clone();
        if cells.len() < headers.len() {
            cells.resize(headers.len(), String::new());
        }
        out.push(table_row(&cells));
    }
    out
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_clamped() {
        assert_eq!(heading(1, "Intro"), "# Intro");
        assert_eq!(heading(6, "Deep"), "###### Deep");
        assert_eq!(heading(9, "Deeper"), "###### Deeper");
    }

    #[test]
    fn test_anchors() {
        assert_eq!(anchor_name("intro"), r#"<a name="intro"></a>"#);
        assert_eq!(anchor_id("section-1"), r#"<a id="section-1"></a>"#);
    }

    #[test]
    fn test_fence_with_info() {
        assert_eq!(
            fence("abnf", &["a = b", "c = d"]),
            vec!["```abnf", "a = b", "c = d", "```"]
        );
    }

    #[test]
    fn test_fence_empty_body() {
        let empty: [&str; 0] = [];
        assert_eq!(fence("", &empty), vec!["```", "```"]);
    }

    #[test]
    fn test_fence_grows_around_backticks() {
        assert_eq!(fence("", &["```"]), vec!["````", "```", "````"]);
    }

    #[test]
    fn test_indent_keeps_blank_lines() {
        let lines = vec!["a".to_string(), String::new(), "  b".to_string()];
        assert_eq!(indent(lines, 2), vec!["  a", "", "    b"]);
    }

    #[test]
    fn test_pipe_table_pads_short_rows() {
        let headers = vec!["Name".to_string(), "Value".to_string()];
        let rows = vec![vec!["only".to_string()]];
        assert_eq!(
            pipe_table(&headers, &rows),
            vec!["| Name | Value |", "| --- | --- |", "| only |  |"]
        );
    }

    #[test]
    fn test_pipe_table_without_header() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        assert_eq!(pipe_table(&[], &rows), vec!["| a | b |"]);
    }
}
