//! Listing the RFCs a document cites.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::dom::{Dom, parse_html, parse_xml};
use crate::html::{LinkKind, classify_link, extract_preformatted};
use crate::util::{declared_html_charset, declared_xml_encoding, decode_text};

use super::{Document, RfcId, Variant};

static RFC_MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bRFC\s?(\d{1,5})\b").unwrap());

/// RFCs cited by `doc`, in first-mention order, excluding `doc` itself.
///
/// XML documents are read from the `seriesInfo` of their references.
/// HTML documents are read from links and from `RFC NNNN` mentions in the
/// text. Text and PDF renderings cite nothing.
pub fn cited_rfcs(doc: &Document) -> Vec<RfcId> {
    let found = match doc.variant {
        Variant::Xml => xml_citations(&doc.bytes),
        Variant::Html => html_citations(&doc.bytes),
        Variant::Text | Variant::Pdf => Vec::new(),
    };

    let mut cited: Vec<RfcId> = Vec::new();
    for id in found {
        if id != doc.id && !cited.contains(&id) {
            cited.push(id);
        }
    }
    cited
}

fn xml_citations(bytes: &[u8]) -> Vec<RfcId> {
    let text = decode_text(bytes, declared_xml_encoding(bytes));
    let dom = match parse_xml(&text) {
        Ok(dom) => dom,
        Err(err) => {
            warn!("Cannot list citations: {err}");
            return Vec::new();
        }
    };
    let Some(back) = dom.root_element().and_then(|root| dom.find_child(root, "back")) else {
        return Vec::new();
    };

    dom.descendants_by_tag(back, "seriesInfo")
        .into_iter()
        .filter(|&info| {
            dom.attr(info, "name")
                .is_some_and(|name| name.eq_ignore_ascii_case("RFC"))
        })
        .filter_map(|info| dom.attr(info, "value").and_then(RfcId::parse))
        .collect()
}

fn html_citations(bytes: &[u8]) -> Vec<RfcId> {
    let text = decode_text(bytes, declared_html_charset(bytes));
    let dom = parse_html(&text);

    let mut found = linked_rfcs(&dom);
    let body = extract_preformatted(&dom);
    found.extend(
        RFC_MENTION_RE
            .captures_iter(&body)
            .filter_map(|caps| caps[1].parse().ok())
            .map(RfcId::new),
    );
    found
}

fn linked_rfcs(dom: &Dom) -> Vec<RfcId> {
    dom.descendants_by_tag(dom.document(), "a")
        .into_iter()
        .filter_map(|a| dom.attr(a, "href"))
        .filter_map(|href| match classify_link(href) {
            LinkKind::RfcReference(number) => Some(RfcId::new(number)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(number: u32, variant: Variant, body: &str) -> Document {
        Document {
            id: RfcId::new(number),
            variant,
            bytes: body.as_bytes().to_vec(),
        }
    }

    fn numbers(ids: Vec<RfcId>) -> Vec<u32> {
        ids.into_iter().map(|id| id.number()).collect()
    }

    #[test]
    fn test_xml_citations_from_references() {
        let xml = r#"<rfc>
          <front><seriesInfo name="RFC" value="9514"/></front>
          <back><references><name>Normative References</name>
            <reference anchor="RFC2119"><front><title>Key words</title></front>
              <seriesInfo name="BCP" value="14"/><seriesInfo name="RFC" value="2119"/></reference>
            <reference anchor="RFC8174"><front><title>Ambiguity</title></front>
              <seriesInfo name="RFC" value="8174"/></reference>
            <reference anchor="DUP"><seriesInfo name="rfc" value="2119"/></reference>
            <reference anchor="SELF"><seriesInfo name="RFC" value="9514"/></reference>
          </references></back>
        </rfc>"#;
        assert_eq!(
            numbers(cited_rfcs(&doc(9514, Variant::Xml, xml))),
            vec![2119, 8174]
        );
    }

    #[test]
    fn test_malformed_xml_cites_nothing() {
        assert!(cited_rfcs(&doc(1, Variant::Xml, "<rfc><back>")).is_empty());
    }

    #[test]
    fn test_html_citations() {
        let html = r#"<html><body><pre>
   The key words are described in <a href="./rfc2119">RFC 2119</a>.
   See also <a href="https://www.rfc-editor.org/rfc/rfc793.html">TCP</a>
   and RFC791, and this document, RFC 1122.
</pre></body></html>"#;
        assert_eq!(
            numbers(cited_rfcs(&doc(1122, Variant::Html, html))),
            vec![2119, 793, 791]
        );
    }

    #[test]
    fn test_binary_variants_cite_nothing() {
        assert!(cited_rfcs(&doc(1, Variant::Pdf, "RFC 2119")).is_empty());
    }
}
