//! Escaping for the few places where raw RFC text would break the
//! surrounding Markdown construct.

/// Escape a table cell so it stays inside its column.
///
/// Cells may span source lines, so internal whitespace is collapsed
/// before the pipe character is escaped.
///
/// ```
/// use rfcmd::markdown::escape_table_cell;
///
/// assert_eq!(escape_table_cell("a | b"), "a \\| b");
/// assert_eq!(escape_table_cell("  split\n   cell "), "split cell");
/// ```
pub fn escape_table_cell(text: &str) -> String {
    let mut cell = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(&word.replace('|', "\\|"));
    }
    cell
}

/// Longest run of consecutive backticks in `content`.
fn longest_backtick_run(content: &str) -> usize {
    content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0)
}

/// Backticks needed for a fence around `content`: at least three, and
/// one more than any run inside it.
///
/// ```
/// use rfcmd::markdown::fence_width;
///
/// assert_eq!(fence_width("+--+--+"), 3);
/// assert_eq!(fence_width("```c\nint x;\n```"), 4);
/// ```
pub fn fence_width(content: &str) -> usize {
    longest_backtick_run(content).max(2) + 1
}

/// Backticks needed to delimit `content` as inline code.
pub fn inline_code_ticks(content: &str) -> usize {
    longest_backtick_run(content) + 1
}
