//! Back matter: references, appendices and address sections.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::markdown::anchor_name;

use super::anchors::section_anchor;
use super::block::{child_own_text, render_block, render_section};
use super::inline::{element_text, own_text};

/// Anchors of back sections that always render as unnumbered H1 sections.
const UNNUMBERED_ANCHORS: [&str; 4] = [
    "acknowledgements",
    "acknowledgments",
    "contributors",
    "authors-addresses",
];

/// Reference anchor to display label, from `back/displayreference`.
type DisplayMap<'a> = HashMap<&'a str, &'a str>;

pub fn render_back(dom: &Dom, back: NodeId) -> Vec<String> {
    let display: DisplayMap<'_> = dom
        .find_children(back, "displayreference")
        .filter_map(|d| Some((dom.attr_nonempty(d, "target")?, dom.attr_nonempty(d, "to")?)))
        .collect();

    let mut lines = Vec::new();

    let containers: Vec<NodeId> = dom.find_children(back, "references").collect();
    match containers.as_slice() {
        [] => {}
        [wrapper] => lines.extend(reference_wrapper(dom, *wrapper, &display)),
        groups => {
            for group in groups {
                lines.extend(reference_group(dom, *group, 1, &display));
            }
        }
    }

    for section in dom.find_children(back, "section") {
        if is_unnumbered(dom, section) {
            lines.extend(unnumbered_section(dom, section));
        } else {
            lines.extend(render_section(dom, section, 1));
        }
    }

    lines
}

fn is_unnumbered(dom: &Dom, section: NodeId) -> bool {
    dom.attr(section, "numbered") == Some("false")
        || dom.attr(section, "anchor").is_some_and(|anchor| {
            UNNUMBERED_ANCHORS
                .iter()
                .any(|known| anchor.eq_ignore_ascii_case(known))
        })
}

/// A lone `references` element wraps the Normative/Informative groups.
fn reference_wrapper(dom: &Dom, wrapper: NodeId, display: &DisplayMap<'_>) -> Vec<String> {
    let anchor = dom.attr_nonempty(wrapper, "anchor").unwrap_or("references");
    let name = dom
        .find_child(wrapper, "name")
        .map(|n| element_text(dom, n))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "References".to_string());

    let mut lines = vec![anchor_name(anchor), format!("# {name}"), String::new()];

    for child in dom.child_elements(wrapper) {
        match dom.tag(child) {
            Some("references") => lines.extend(reference_group(dom, child, 2, display)),
            _ => lines.extend(reference_entry(dom, child, display)),
        }
    }
    lines
}

/// A named group of references under a heading of `level`.
fn reference_group(
    dom: &Dom,
    group: NodeId,
    level: usize,
    display: &DisplayMap<'_>,
) -> Vec<String> {
    let mut lines = Vec::new();

    let name = dom.find_child(group, "name").map(|n| element_text(dom, n));
    match name.filter(|n| !n.is_empty()) {
        Some(name) => {
            if let Some(anchor) = dom.attr_nonempty(group, "anchor") {
                lines.push(anchor_name(anchor));
            }
            lines.push(format!("{} {name}", "#".repeat(level)));
            lines.push(String::new());
        }
        None if level == 1 => {
            if let Some(anchor) = dom.attr_nonempty(group, "anchor") {
                lines.push(anchor_name(anchor));
            }
            lines.push("# References".to_string());
            lines.push(String::new());
        }
        None => {}
    }

    for child in dom.child_elements(group) {
        lines.extend(reference_entry(dom, child, display));
    }
    lines
}

/// `reference` or `referencegroup`; anything else renders nothing.
fn reference_entry(dom: &Dom, entry: NodeId, display: &DisplayMap<'_>) -> Vec<String> {
    match dom.tag(entry) {
        Some("reference") => reference(dom, entry, display)
            .map(|line| vec![line, String::new()])
            .unwrap_or_default(),
        Some("referencegroup") => {
            let mut lines = Vec::new();
            let anchor = dom.attr(entry, "anchor").unwrap_or("");
            let label = display.get(anchor).copied().unwrap_or(anchor);
            if !label.is_empty() {
                let mut head = format!("{} **[{label}]**", anchor_name(anchor));
                if let Some(target) = dom.attr_nonempty(entry, "target") {
                    head.push_str(&format!(" <{target}>"));
                }
                lines.push(head);
                lines.push(String::new());
            }
            for member in dom.find_children(entry, "reference") {
                if let Some(line) = reference(dom, member, display) {
                    lines.push(line);
                    lines.push(String::new());
                }
            }
            lines
        }
        _ => Vec::new(),
    }
}

/// One reference as a single line; `None` when it has no `front`.
fn reference(dom: &Dom, reference: NodeId, display: &DisplayMap<'_>) -> Option<String> {
    let front = dom.find_child(reference, "front")?;
    let anchor = dom.attr(reference, "anchor").unwrap_or("");
    let label = display.get(anchor).copied().unwrap_or(anchor);

    let mut parts = Vec::new();
    if !label.is_empty() {
        parts.push(anchor_name(anchor));
        parts.push(format!("**[{label}]**"));
    }

    let authors: Vec<String> = dom
        .find_children(front, "author")
        .filter_map(|author| reference_author(dom, author))
        .collect();
    if !authors.is_empty() {
        parts.push(format!("{},", authors.join(", ")));
    }

    if let Some(title) = dom
        .find_child(front, "title")
        .map(|t| element_text(dom, t))
        .filter(|t| !t.is_empty())
    {
        parts.push(format!("\"{title}\","));
    }

    let series: Vec<String> = dom
        .find_children(reference, "seriesInfo")
        .chain(dom.find_children(front, "seriesInfo"))
        .filter_map(|s| {
            Some(format!(
                "{} {}",
                dom.attr_nonempty(s, "name")?,
                dom.attr_nonempty(s, "value")?
            ))
        })
        .collect();
    if !series.is_empty() {
        parts.push(format!("{},", series.join(", ")));
    }

    if let Some(date) = dom.find_child(front, "date") {
        let text = ["month", "year"]
            .iter()
            .filter_map(|attr| dom.attr_nonempty(date, attr))
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            parts.push(format!("{text}."));
        }
    }

    if let Some(content) = dom
        .find_child(reference, "refcontent")
        .map(|r| element_text(dom, r))
        .filter(|r| !r.is_empty())
    {
        parts.push(content);
    }

    if let Some(target) = dom.attr_nonempty(reference, "target") {
        parts.push(format!("<{target}>"));
    }

    Some(parts.join(" "))
}

fn reference_author(dom: &Dom, author: NodeId) -> Option<String> {
    let initials = dom.attr_nonempty(author, "initials");
    let surname = dom.attr_nonempty(author, "surname");
    match (initials, surname) {
        (Some(initials), Some(surname)) => Some(format!("{initials} {surname}")),
        (None, Some(surname)) => Some(surname.to_string()),
        _ => dom
            .attr_nonempty(author, "fullname")
            .map(str::to_string)
            .or_else(|| child_own_text(dom, author, "organization")),
    }
}

/// Unnumbered H1 section with address blocks for contacts and authors.
fn unnumbered_section(dom: &Dom, section: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(name) = dom.find_child(section, "name").map(|n| element_text(dom, n))
        && !name.is_empty()
    {
        if let Some(anchor) = section_anchor(dom, section) {
            lines.push(anchor_name(&anchor));
        }
        lines.push(format!("# {name}"));
        lines.push(String::new());
    }

    for child in dom.child_elements(section) {
        match dom.tag(child) {
            Some("t") => {
                let text = element_text(dom, child);
                if !text.is_empty() {
                    lines.push(text);
                    lines.push(String::new());
                }
            }
            Some("contact" | "author") => lines.extend(address_block(dom, child)),
            _ => lines.extend(render_block(dom, child, 1)),
        }
    }
    lines
}

/// Name, organization, postal address and contact details of a person.
fn address_block(dom: &Dom, person: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    let name = dom.attr_nonempty(person, "fullname").map(str::to_string).or_else(|| {
        let initials = dom.attr_nonempty(person, "initials");
        let surname = dom.attr_nonempty(person, "surname")?;
        Some(match initials {
            Some(initials) => format!("{initials} {surname}"),
            None => surname.to_string(),
        })
    });
    if let Some(name) = name {
        lines.push(format!("**{name}**"));
        lines.push(String::new());
    }

    if let Some(org) = child_own_text(dom, person, "organization") {
        lines.push(format!("- Organization: {org}"));
    }

    if let Some(address) = dom.find_child(person, "address") {
        if let Some(postal) = dom.find_child(address, "postal") {
            let mut parts: Vec<String> = dom
                .child_elements(postal)
                .filter(|&c| matches!(dom.tag(c), Some("street" | "postalLine")))
                .filter_map(|c| own_text(dom, c))
                .collect();
            parts.extend(
                ["city", "region", "code", "country"]
                    .iter()
                    .filter_map(|tag| child_own_text(dom, postal, tag)),
            );
            if !parts.is_empty() {
                lines.push(format!("- Address: {}", parts.join(", ")));
            }
        }

        for (tag, label) in [("email", "Email"), ("phone", "Phone"), ("uri", "URI")] {
            if let Some(value) = child_own_text(dom, address, tag) {
                lines.push(format!("- {label}: {value}"));
            }
        }
    }

    lines.push(String::new());
    lines
}
