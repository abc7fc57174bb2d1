//! Inline text extraction for paragraphs, names, cells and list items.

use crate::dom::{Dom, NodeId};
use crate::markdown::inline_code_ticks;

/// Text of an element with inline markup rendered as Markdown.
///
/// Own text, each child's rendering and each child's tail are concatenated
/// in document order; the result is trimmed at both ends.
pub fn element_text(dom: &Dom, id: NodeId) -> String {
    element_text_without(dom, id, &[])
}

/// Like [`element_text`], but children with one of the `skip` tags are
/// left out entirely (their tails are kept).
pub fn element_text_without(dom: &Dom, id: NodeId, skip: &[&str]) -> String {
    let mut out = String::new();
    for child in dom.children(id) {
        if let Some(text) = dom.text(child) {
            out.push_str(text);
            continue;
        }
        match dom.tag(child) {
            Some(tag) if !skip.contains(&tag) => push_inline(dom, child, tag, &mut out),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Leading text of an element, trimmed, or `None` when blank.
pub fn own_text(dom: &Dom, id: NodeId) -> Option<String> {
    let text = dom.leading_text(id);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn push_inline(dom: &Dom, child: NodeId, tag: &str, out: &mut String) {
    match tag {
        "xref" => {
            let target = dom.attr(child, "target").unwrap_or("");
            let label = own_text(dom, child)
                .or_else(|| dom.attr_nonempty(child, "derivedContent").map(str::to_string))
                .unwrap_or_else(|| target.to_string());
            if target.starts_with('#') {
                out.push_str(&format!("[{label}]({target})"));
            } else {
                out.push_str(&format!("[{label}](#{target})"));
            }
        }
        "eref" => {
            let target = dom.attr(child, "target").unwrap_or("");
            let label = own_text(dom, child).unwrap_or_else(|| target.to_string());
            out.push_str(&format!("[{label}]({target})"));
        }
        "bcp14" | "strong" | "b" => wrap(out, "**", &element_text(dom, child)),
        "em" | "i" => wrap(out, "*", &element_text(dom, child)),
        "tt" | "code" => {
            let inner = element_text(dom, child);
            if !inner.is_empty() {
                let ticks = "`".repeat(inline_code_ticks(&inner));
                out.push_str(&format!("{ticks}{inner}{ticks}"));
            }
        }
        "contact" => {
            let name = dom
                .attr_nonempty(child, "fullname")
                .map(str::to_string)
                .unwrap_or_else(|| element_text(dom, child));
            out.push_str(&name);
        }
        _ => out.push_str(&element_text(dom, child)),
    }
}

fn wrap(out: &mut String, marker: &str, inner: &str) {
    if !inner.is_empty() {
        out.push_str(marker);
        out.push_str(inner);
        out.push_str(marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_xml;

    fn render(xml: &str) -> String {
        let dom = parse_xml(xml).unwrap();
        let root = dom.root_element().unwrap();
        element_text(&dom, root)
    }

    #[test]
    fn test_plain_text_trimmed() {
        assert_eq!(render("<t>\n   Hello world.\n</t>"), "Hello world.");
    }

    #[test]
    fn test_xref_label_preference() {
        assert_eq!(
            render(r#"<t>See <xref target="intro">here</xref>.</t>"#),
            "See [here](#intro)."
        );
        assert_eq!(
            render(r#"<t>See <xref target="intro" derivedContent="Section 1"/>.</t>"#),
            "See [Section 1](#intro)."
        );
        assert_eq!(
            render(r#"<t>See <xref target="RFC2119"/>.</t>"#),
            "See [RFC2119](#RFC2119)."
        );
    }

    #[test]
    fn test_xref_with_fragment_target() {
        assert_eq!(
            render(r##"<t><xref target="#frag">x</xref></t>"##),
            "[x](#frag)"
        );
    }

    #[test]
    fn test_eref() {
        assert_eq!(
            render(r#"<t><eref target="https://example.com"/></t>"#),
            "[https://example.com](https://example.com)"
        );
        assert_eq!(
            render(r#"<t><eref target="https://example.com">site</eref></t>"#),
            "[site](https://example.com)"
        );
    }

    #[test]
    fn test_formatting_wrappers() {
        assert_eq!(
            render("<t>A <bcp14>MUST</bcp14>, <em>b</em>, <strong>c</strong>, <tt>d</tt></t>"),
            "A **MUST**, *b*, **c**, `d`"
        );
    }

    #[test]
    fn test_empty_wrappers_emit_nothing() {
        assert_eq!(render("<t>a<em/>b<tt></tt>c</t>"), "abc");
    }

    #[test]
    fn test_nested_formatting() {
        assert_eq!(render("<t><strong>x <tt>y</tt></strong></t>"), "**x `y`**");
    }

    #[test]
    fn test_contact_prefers_fullname() {
        assert_eq!(
            render(r#"<t>Thanks <contact fullname="Jane Roe"/> and <contact>Ann</contact>.</t>"#),
            "Thanks Jane Roe and Ann."
        );
    }

    #[test]
    fn test_tail_text_kept() {
        assert_eq!(
            render("<t><em>first</em> middle <em>last</em> end</t>"),
            "*first* middle *last* end"
        );
    }

    #[test]
    fn test_unknown_tags_recurse() {
        assert_eq!(render("<t>x<span>y<sub>2</sub></span>z</t>"), "xy2z");
    }

    #[test]
    fn test_skip_tags() {
        let dom = parse_xml("<li>Item<ul><li>Nested</li></ul> tail</li>").unwrap();
        let root = dom.root_element().unwrap();
        assert_eq!(element_text_without(&dom, root, &["ul", "ol"]), "Item tail");
    }
}
