//! Section bodies: paragraphs, lists, figures, tables and notes.
//!
//! Every renderer returns its own lines; nothing writes into a shared
//! buffer. Nested content that has to be indented is rendered first and
//! then shifted with [`markdown::indent`].

use crate::dom::{Dom, NodeId};
use crate::markdown::{self, anchor_name, escape_table_cell, fence, heading, pipe_table};

use super::anchors::section_anchor;
use super::inline::{element_text, element_text_without, own_text};

/// Closed set of block kinds a section may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Paragraph,
    List { ordered: bool },
    DefinitionList,
    Figure,
    Artwork,
    Sourcecode,
    Table,
    /// `note`, `aside` and `blockquote`, all rendered as blockquotes.
    Quote,
    Section,
}

impl Block {
    /// Classify an element tag. Unknown tags render nothing.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "t" => Block::Paragraph,
            "ul" => Block::List { ordered: false },
            "ol" => Block::List { ordered: true },
            "dl" => Block::DefinitionList,
            "figure" => Block::Figure,
            "artwork" => Block::Artwork,
            "sourcecode" => Block::Sourcecode,
            "table" => Block::Table,
            "note" | "aside" | "blockquote" => Block::Quote,
            "section" => Block::Section,
            _ => return None,
        })
    }
}

/// Render a section heading and its children at `depth`.
///
/// Depth is clamped to six; deeper sections keep nesting their content
/// under repeated `######` headings.
pub fn render_section(dom: &Dom, section: NodeId, depth: usize) -> Vec<String> {
    let depth = depth.min(markdown::MAX_HEADING_DEPTH);
    let mut lines = Vec::new();

    if let Some(name) = dom.find_child(section, "name").map(|n| element_text(dom, n))
        && !name.is_empty()
    {
        if let Some(anchor) = section_anchor(dom, section) {
            lines.push(anchor_name(&anchor));
        }
        lines.push(heading(depth, &name));
        lines.push(String::new());
    }

    for child in dom.child_elements(section) {
        lines.extend(render_block(dom, child, depth));
    }
    lines
}

/// Dispatch one child element of a section.
///
/// `depth` is the depth of the enclosing section.
pub fn render_block(dom: &Dom, id: NodeId, depth: usize) -> Vec<String> {
    let Some(block) = dom.tag(id).and_then(Block::from_tag) else {
        return Vec::new();
    };
    match block {
        Block::Paragraph => paragraph(dom, id),
        Block::List { ordered } => list(dom, id, ordered, 0),
        Block::DefinitionList => definition_list(dom, id),
        Block::Figure => figure(dom, id),
        Block::Artwork => standalone(artwork(dom, id)),
        Block::Sourcecode => standalone(sourcecode(dom, id)),
        Block::Table => table(dom, id),
        Block::Quote => quote(dom, id),
        Block::Section => render_section(dom, id, depth + 1),
    }
}

/// Paragraph text, indented two spaces per declared `indent` level.
pub fn paragraph(dom: &Dom, t: NodeId) -> Vec<String> {
    let text = element_text(dom, t);
    if text.is_empty() {
        return Vec::new();
    }
    let level = dom
        .attr(t, "indent")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    vec![format!("{}{text}", "  ".repeat(level)), String::new()]
}

/// Ordered or unordered list, nesting two spaces per level.
///
/// Counters restart at 1 for each list. A blank line closes only the
/// outermost list.
pub fn list(dom: &Dom, list: NodeId, ordered: bool, level: usize) -> Vec<String> {
    let pad = "  ".repeat(level);
    let mut counter = 1;
    let mut lines = Vec::new();

    for li in dom.find_children(list, "li") {
        let prefix = if ordered {
            let p = format!("{counter}.");
            counter += 1;
            p
        } else {
            "-".to_string()
        };

        let text = element_text_without(dom, li, &["ul", "ol"]);
        if !text.is_empty() {
            lines.push(format!("{pad}{prefix} {text}"));
        }

        for nested in dom.child_elements(li) {
            match dom.tag(nested) {
                Some("ul") => lines.extend(self::list(dom, nested, false, level + 1)),
                Some("ol") => lines.extend(self::list(dom, nested, true, level + 1)),
                _ => {}
            }
        }
    }

    if level == 0 {
        lines.push(String::new());
    }
    lines
}

const STRUCTURED_DD: [&str; 7] = ["t", "figure", "ul", "ol", "dl", "artwork", "sourcecode"];

/// Definition list: bold terms, descriptions indented two spaces.
pub fn definition_list(dom: &Dom, dl: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    for child in dom.child_elements(dl) {
        match dom.tag(child) {
            Some("dt") => {
                let term = element_text(dom, child);
                if !term.is_empty() {
                    lines.push(format!("**{term}**"));
                }
            }
            Some("dd") => lines.extend(description(dom, child)),
            _ => {}
        }
    }

    lines.push(String::new());
    lines
}

fn description(dom: &Dom, dd: NodeId) -> Vec<String> {
    let structured = dom
        .child_elements(dd)
        .any(|c| dom.tag(c).is_some_and(|t| STRUCTURED_DD.contains(&t)));

    if !structured {
        return indented_text(&element_text(dom, dd));
    }

    let mut lines = Vec::new();
    for child in dom.child_elements(dd) {
        match dom.tag(child) {
            Some("t") => lines.extend(indented_text(&element_text(dom, child))),
            Some("figure") => lines.extend(markdown::indent(figure(dom, child), 2)),
            Some("ul") => lines.extend(list(dom, child, false, 1)),
            Some("ol") => lines.extend(list(dom, child, true, 1)),
            Some("dl") => lines.extend(markdown::indent(definition_list(dom, child), 2)),
            Some("artwork") => lines.extend(markdown::indent(artwork(dom, child), 2)),
            Some("sourcecode") => lines.extend(markdown::indent(sourcecode(dom, child), 2)),
            _ => {}
        }
    }
    lines
}

/// Non-blank lines of `text` indented two spaces, then a blank line.
fn indented_text(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("  {line}"))
        .collect();
    lines.push(String::new());
    lines
}

/// Figure caption followed by its artwork or sourcecode.
pub fn figure(dom: &Dom, figure: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(name) = dom.find_child(figure, "name").map(|n| element_text(dom, n))
        && !name.is_empty()
    {
        match dom.attr(figure, "pn").and_then(|pn| pn.strip_prefix("figure-")) {
            Some(number) => lines.push(format!("**Figure {number}: {name}**")),
            None => lines.push(format!("**Figure: {name}**")),
        }
        lines.push(String::new());
    }

    for child in dom.child_elements(figure) {
        match dom.tag(child) {
            Some("artwork") => lines.extend(artwork(dom, child)),
            Some("sourcecode") => lines.extend(sourcecode(dom, child)),
            _ => {}
        }
    }

    lines.push(String::new());
    lines
}

/// Fenced artwork. Left whitespace is kept exactly for diagrams.
pub fn artwork(dom: &Dom, artwork: NodeId) -> Vec<String> {
    fence("", &body_lines(&dom.leading_text(artwork)))
}

/// Fenced source code tagged with its `type`.
pub fn sourcecode(dom: &Dom, code: NodeId) -> Vec<String> {
    let lang = dom.attr(code, "type").unwrap_or("");
    fence(lang, &body_lines(&dom.leading_text(code)))
}

fn standalone(mut lines: Vec<String>) -> Vec<String> {
    lines.push(String::new());
    lines
}

/// Right-trimmed lines with leading and trailing blank lines removed.
fn body_lines(content: &str) -> Vec<&str> {
    let lines: Vec<&str> = content.split('\n').map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].to_vec()
}

/// Pipe table from `thead` and `tbody` rows.
pub fn table(dom: &Dom, table: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(name) = dom.find_child(table, "name").map(|n| element_text(dom, n))
        && !name.is_empty()
    {
        lines.push(format!("**Table: {name}**"));
        lines.push(String::new());
    }

    let headers = dom
        .find_child(table, "thead")
        .and_then(|thead| dom.find_child(thead, "tr"))
        .map(|tr| row_cells(dom, tr))
        .unwrap_or_default();

    let rows: Vec<Vec<String>> = dom
        .child_elements(table)
        .filter(|&c| matches!(dom.tag(c), Some("tbody" | "tfoot")))
        .flat_map(|body| dom.find_children(body, "tr").collect::<Vec<_>>())
        .map(|tr| row_cells(dom, tr))
        .filter(|row| !row.is_empty())
        .collect();

    lines.extend(pipe_table(&headers, &rows));
    lines.push(String::new());
    lines
}

fn row_cells(dom: &Dom, tr: NodeId) -> Vec<String> {
    dom.child_elements(tr)
        .filter(|&c| matches!(dom.tag(c), Some("th" | "td")))
        .map(|cell| escape_table_cell(&element_text(dom, cell)))
        .collect()
}

/// Blockquote with an optional bold name line.
pub fn quote(dom: &Dom, quote: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(name) = dom.find_child(quote, "name").map(|n| element_text(dom, n))
        && !name.is_empty()
    {
        lines.push(format!("> **{name}**"));
        lines.push(">".to_string());
    }

    let paragraphs: Vec<String> = if dom.find_child(quote, "t").is_some() {
        dom.find_children(quote, "t")
            .map(|t| element_text(dom, t))
            .collect()
    } else {
        vec![element_text_without(dom, quote, &["name"])]
    };

    for text in paragraphs.iter().filter(|t| !t.is_empty()) {
        for line in text.split('\n').filter(|l| !l.trim().is_empty()) {
            lines.push(format!("> {line}"));
        }
        lines.push(">".to_string());
    }

    lines.push(String::new());
    lines
}

/// Owned leading text of a child element, trimmed.
pub(crate) fn child_own_text(dom: &Dom, parent: NodeId, tag: &str) -> Option<String> {
    dom.find_child(parent, tag).and_then(|c| own_text(dom, c))
}
