//! Front matter: title, series, metadata, authors, abstract and boilerplate.

use crate::dom::{Dom, NodeId};

use super::block::{child_own_text, paragraph, quote, render_block};
use super::inline::{element_text, own_text};

/// Root attributes rendered as `**Label:** value`, in output order.
const METADATA_FIELDS: [(&str, &str); 7] = [
    ("category", "Category"),
    ("obsoletes", "Obsoletes"),
    ("updates", "Updates"),
    ("submissionType", "Submission Type"),
    ("consensus", "Consensus"),
    ("ipr", "IPR"),
    ("docName", "Doc Name"),
];

pub fn render_front(dom: &Dom, root: NodeId, front: NodeId) -> Vec<String> {
    let mut lines = Vec::new();

    lines.extend(title(dom, front));
    lines.extend(series(dom, front));
    lines.extend(metadata(dom, root));
    lines.extend(authors(dom, front));
    lines.extend(date(dom, front));

    for (tag, label) in [("area", "Area"), ("workgroup", "Workgroup")] {
        if let Some(value) = child_own_text(dom, front, tag) {
            lines.push(format!("**{label}:** {value}"));
            lines.push(String::new());
        }
    }

    let keywords: Vec<String> = dom
        .find_children(front, "keyword")
        .filter_map(|kw| own_text(dom, kw))
        .collect();
    if !keywords.is_empty() {
        lines.push(format!("**Keywords:** {}", keywords.join(", ")));
        lines.push(String::new());
    }

    lines.extend(related_documents(dom, root));

    if let Some(abstract_) = dom.find_child(front, "abstract") {
        lines.push("## Abstract".to_string());
        lines.push(String::new());
        for child in dom.child_elements(abstract_) {
            match dom.tag(child) {
                Some("t") => lines.extend(paragraph(dom, child)),
                _ => lines.extend(render_block(dom, child, 1)),
            }
        }
    }

    for note in dom.find_children(front, "note") {
        lines.extend(quote(dom, note));
    }

    if let Some(boilerplate) = dom.find_child(front, "boilerplate") {
        for section in dom.find_children(boilerplate, "section") {
            lines.extend(boilerplate_section(dom, section));
        }
    }

    lines
}

fn title(dom: &Dom, front: NodeId) -> Vec<String> {
    let Some(title) = dom.find_child(front, "title") else {
        return Vec::new();
    };
    let text = element_text(dom, title);
    let mut lines = vec![format!("# {text}")];
    if let Some(abbrev) = dom.attr_nonempty(title, "abbrev")
        && abbrev != text
    {
        lines.push(format!("*({abbrev})*"));
    }
    lines.push(String::new());
    lines
}

fn series(dom: &Dom, front: NodeId) -> Vec<String> {
    let Some(info) = dom.find_child(front, "seriesInfo") else {
        return Vec::new();
    };
    let (Some(name), Some(value)) = (
        dom.attr_nonempty(info, "name"),
        dom.attr_nonempty(info, "value"),
    ) else {
        return Vec::new();
    };

    let mut lines = vec![format!("**{name} {value}**")];
    if let Some(stream) = dom.attr_nonempty(info, "stream") {
        lines.push(format!("*Stream: {stream}*"));
    }
    lines.push(String::new());
    lines
}

fn metadata(dom: &Dom, root: NodeId) -> Vec<String> {
    let mut lines: Vec<String> = METADATA_FIELDS
        .iter()
        .filter_map(|(attr, label)| {
            dom.attr_nonempty(root, attr)
                .map(|value| format!("**{label}:** {value}"))
        })
        .collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn authors(dom: &Dom, front: NodeId) -> Vec<String> {
    let authors: Vec<NodeId> = dom.find_children(front, "author").collect();
    if authors.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["## Authors".to_string(), String::new()];
    for author in authors {
        let mut name = match dom.attr_nonempty(author, "fullname") {
            Some(fullname) => fullname.to_string(),
            None => format!(
                "{} {}",
                dom.attr(author, "initials").unwrap_or(""),
                dom.attr(author, "surname").unwrap_or("")
            )
            .trim()
            .to_string(),
        };
        if dom.attr(author, "role") == Some("editor") {
            name.push_str(" *(Editor)*");
        }
        lines.push(format!("- {name}"));

        if let Some(org) = child_own_text(dom, author, "organization") {
            lines.push(format!("  - {org}"));
        }
        if let Some(email) = dom
            .find_child(author, "address")
            .and_then(|address| child_own_text(dom, address, "email"))
        {
            lines.push(format!("  - Email: {email}"));
        }
    }
    lines.push(String::new());
    lines
}

fn date(dom: &Dom, front: NodeId) -> Vec<String> {
    let Some(date) = dom.find_child(front, "date") else {
        return Vec::new();
    };
    let text = ["day", "month", "year"]
        .iter()
        .filter_map(|attr| dom.attr_nonempty(date, attr))
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Vec::new();
    }
    vec![format!("**Date:** {text}"), String::new()]
}

fn related_documents(dom: &Dom, root: NodeId) -> Vec<String> {
    let links: Vec<NodeId> = dom.find_children(root, "link").collect();
    if links.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["## Related Documents".to_string(), String::new()];
    for link in links {
        if let Some(href) = dom.attr_nonempty(link, "href") {
            let rel = dom.attr_nonempty(link, "rel").unwrap_or("Link");
            lines.push(format!("- [{rel}]({href})"));
        }
    }
    lines.push(String::new());
    lines
}

fn boilerplate_section(dom: &Dom, section: NodeId) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(name) = dom.find_child(section, "name").map(|n| element_text(dom, n))
        && !name.is_empty()
    {
        lines.push(format!("## {name}"));
        lines.push(String::new());
    }
    for t in dom.find_children(section, "t") {
        let text = element_text(dom, t);
        if !text.is_empty() {
            lines.push(text);
            lines.push(String::new());
        }
    }
    lines
}
