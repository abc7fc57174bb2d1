//! Lenient HTML parsing into a [`Dom`] through html5ever.

use std::cell::RefCell;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{Attribute, Dom, NodeData, NodeId};

/// Parse an HTML document into an arena tree.
///
/// html5ever recovers from every markup error the way browsers do, so this
/// never fails.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
}

/// Handle the tree builder passes back to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(pub NodeId);

/// Tree builder target that fills a [`Dom`].
///
/// The `TreeSink` methods take `&self`, so the tree sits in a `RefCell`.
#[derive(Default)]
pub struct DomSink {
    dom: RefCell<Dom>,
}

impl DomSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_dom(self) -> Dom {
        self.dom.into_inner()
    }

    fn convert_attrs(attrs: Vec<Html5Attribute>) -> Vec<Attribute> {
        attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect()
    }

    fn ignored(&self) -> Handle {
        Handle(self.dom.borrow_mut().create_ignored())
    }
}

impl TreeSink for DomSink {
    type Handle = Handle;
    type Output = Dom;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Dom {
        self.into_dom()
    }

    // Legacy renderings are rarely valid HTML; recover silently.
    fn parse_error(&self, _msg: std::borrow::Cow<'static, str>) {}

    fn get_document(&self) -> Handle {
        Handle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Handle) -> Self::ElemName<'a> {
        static NO_NAME: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => {
                let name: &QualName = name;
                // SAFETY: element names are boxed, and nodes are never removed
                // from the arena or renamed while the sink is alive, so the
                // name stays put after the `RefCell` guard is released.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &NO_NAME,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Handle {
        let attrs = Self::convert_attrs(attrs);
        Handle(self.dom.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, _text: StrTendril) -> Handle {
        self.ignored()
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Handle {
        self.ignored()
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent.0, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent.0, &text),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Handle,
        prev_element: &Handle,
        child: NodeOrText<Handle>,
    ) {
        let parent = self.dom.borrow().get(element.0).and_then(|n| n.parent);
        match parent {
            Some(parent) => self.append(&Handle(parent), child),
            None => self.append(prev_element, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        *target
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Handle, new_node: NodeOrText<Handle>) {
        let mut dom = self.dom.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.0,
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        };
        dom.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        let Some(NodeData::Element {
            attrs: existing, ..
        }) = dom.get_mut(target.0).map(|n| &mut n.data)
        else {
            return;
        };
        for attr in Self::convert_attrs(attrs) {
            if !existing.iter().any(|a| a.name == attr.name) {
                existing.push(attr);
            }
        }
    }

    fn remove_from_parent(&self, target: &Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<NodeId> = dom.children(node.0).collect();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><pre>Hello</pre></body></html>");

        let pres = dom.descendants_by_tag(dom.document(), "pre");
        assert_eq!(pres.len(), 1);
        assert_eq!(dom.text_content(pres[0]), "Hello");
    }

    #[test]
    fn test_attributes() {
        let dom = parse_html(r#"<a href="rfc2119" class="RFC">RFC 2119</a>"#);

        let a = dom.descendants_by_tag(dom.document(), "a")[0];
        assert_eq!(dom.attr(a, "href"), Some("rfc2119"));
        assert_eq!(dom.attr(a, "class"), Some("RFC"));
    }

    #[test]
    fn test_pre_keeps_inline_link_text() {
        let dom = parse_html(
            r##"<pre>See <a href="#section-2">Section 2</a>
   for details.</pre><pre>Next page</pre>"##,
        );

        let pres = dom.descendants_by_tag(dom.document(), "pre");
        assert_eq!(pres.len(), 2);
        assert_eq!(dom.text_content(pres[0]), "See Section 2\n   for details.");
        assert_eq!(dom.text_content(pres[1]), "Next page");
    }

    #[test]
    fn test_unclosed_markup_is_recovered() {
        let dom = parse_html("<body><pre>dangling <b>bold");
        let pre = dom.descendants_by_tag(dom.document(), "pre")[0];
        assert_eq!(dom.text_content(pre), "dangling bold");
    }
}
