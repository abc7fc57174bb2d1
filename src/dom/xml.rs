//! Build a [`Dom`] from XML using quick-xml events.
//!
//! Whitespace-only text is kept: artwork and sourcecode bodies depend on
//! exact layout, and inline text relies on the spaces between elements.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::arena::{Attribute, Dom, NodeId, plain_name};
use crate::error::MalformedInputError;

/// Parse an XML document into an arena tree.
///
/// Fails on any syntax error, on elements still open at end of input,
/// and on documents without a root element.
pub fn parse_xml(content: &str) -> Result<Dom, MalformedInputError> {
    let mut reader = Reader::from_str(content);
    let mut dom = Dom::new();
    let mut stack: Vec<(NodeId, String)> = Vec::new();
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|source| MalformedInputError::Syntax {
                position: reader.buffer_position(),
                source,
            })?;

        match event {
            Event::Start(e) => {
                let (id, tag) = create_element(&mut dom, &e);
                let parent = stack.last().map_or(dom.document(), |(p, _)| *p);
                dom.append(parent, id);
                saw_root = true;
                stack.push((id, tag));
            }
            Event::Empty(e) => {
                let (id, _) = create_element(&mut dom, &e);
                let parent = stack.last().map_or(dom.document(), |(p, _)| *p);
                dom.append(parent, id);
                saw_root = true;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(e) => {
                if let Some((parent, _)) = stack.last() {
                    dom.append_text(*parent, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::CData(e) => {
                if let Some((parent, _)) = stack.last() {
                    dom.append_text(*parent, &String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if let Some((parent, _)) = stack.last() {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    let text = resolve_entity(&entity).unwrap_or_else(|| format!("&{entity};"));
                    dom.append_text(*parent, &text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and DOCTYPE
            // carry nothing the converters read.
            _ => {}
        }
    }

    if let Some((_, tag)) = stack.pop() {
        return Err(MalformedInputError::Unclosed(tag));
    }
    if !saw_root {
        return Err(MalformedInputError::NoRootElement);
    }
    Ok(dom)
}

fn create_element(dom: &mut Dom, e: &BytesStart<'_>) -> (NodeId, String) {
    let name = e.name();
    let tag = String::from_utf8_lossy(local_name(name.as_ref())).into_owned();

    let attrs = e
        .attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape(&raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.into_owned());
            Attribute::new(&key, value)
        })
        .collect();

    (dom.create_element(plain_name(&tag), attrs), tag)
}

/// Extract local name from namespaced XML name (e.g., "xi:include" -> "include").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references.
///
/// Besides the five predefined entities and character references, this
/// knows the handful of named entities xml2rfc sources declare in their
/// DOCTYPE.
fn resolve_entity(entity: &str) -> Option<String> {
    let named = match entity {
        "apos" => Some("'"),
        "quot" => Some("\""),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "nbsp" => Some("\u{00A0}"),
        "zwsp" => Some("\u{200B}"),
        "nbhy" => Some("\u{2011}"),
        "wj" => Some("\u{2060}"),
        _ => None,
    };
    if let Some(s) = named {
        return Some(s.to_string());
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32).map(|c| c.to_string())
}
