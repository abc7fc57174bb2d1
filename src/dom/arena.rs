//! Arena-based element tree shared by the XML and HTML front ends.
//!
//! Nodes live in one vector and refer to each other by index. Text is
//! held in its own nodes, so the text after an element is just the text
//! siblings that follow it.

use html5ever::{LocalName, QualName, ns};

/// Index of a node in its [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// What a node holds.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    /// The name is boxed so its address survives arena growth.
    Element {
        name: Box<QualName>,
        attrs: Vec<Attribute>,
    },
    /// Character data, CDATA sections included.
    Text(String),
    /// Comments, processing instructions and doctypes. The HTML tree
    /// builder needs a handle for them; nothing reads their content.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    /// Build an attribute with no namespace.
    pub fn new(local: &str, value: impl Into<String>) -> Self {
        Self {
            name: plain_name(local),
            value: value.into(),
        }
    }
}

/// Namespace-less qualified name, as used for every XML element.
pub fn plain_name(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Document tree with every node stored in one vector.
#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Empty tree holding only the document node.
    pub fn new() -> Self {
        let mut dom = Self { nodes: Vec::new() };
        dom.alloc(NodeData::Document);
        dom
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(NodeData::Element {
            name: Box::new(name),
            attrs,
        })
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(NodeData::Text(text))
    }

    pub fn create_ignored(&mut self) -> NodeId {
        self.alloc(NodeData::Ignored)
    }

    /// Make `child` the last child of `parent`. A detached `child` is
    /// expected; see [`Dom::detach`].
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Insert `node` just before `sibling` under the same parent.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) {
        let Some(parent) = self.get(sibling).and_then(|n| n.parent) else {
            return;
        };
        if let Some(new) = self.get_mut(node) {
            new.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            let at = p.children.iter().position(|&c| c == sibling).unwrap_or(0);
            p.children.insert(at, node);
        }
    }

    /// Remove `id` from its parent's children.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
    }

    /// Append text to `parent`, extending its last child when that is
    /// already a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.get(parent).and_then(|n| n.children.last().copied());
        if let Some(NodeData::Text(existing)) = last
            .and_then(|id| self.get_mut(id))
            .map(|n| &mut n.data)
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    /// Children of `parent`, elements and text alike, in order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(parent)
            .map_or(&[][..], |n| n.children.as_slice())
            .iter()
            .copied()
    }

    pub fn child_elements(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent).filter(|&c| self.is_element(c))
    }

    /// First element child with the given tag.
    pub fn find_child(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.child_elements(parent).find(|&c| self.tag(c) == Some(tag))
    }

    /// All element children with the given tag, in document order.
    pub fn find_children<'a>(
        &'a self,
        parent: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.child_elements(parent)
            .filter(move |&c| self.tag(c) == Some(tag))
    }

    /// Every descendant element with the given tag, in document order.
    pub fn descendants_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_by_tag(root, tag, &mut found);
        found
    }

    fn collect_by_tag(&self, id: NodeId, tag: &str, found: &mut Vec<NodeId>) {
        for child in self.child_elements(id) {
            if self.tag(child) == Some(tag) {
                found.push(child);
            }
            self.collect_by_tag(child, tag, found);
        }
    }

    /// The first element child of the document.
    pub fn root_element(&self) -> Option<NodeId> {
        self.child_elements(self.document()).next()
    }
}

/// Element and text accessors.
impl Dom {
    fn element(&self, id: NodeId) -> Option<(&QualName, &[Attribute])> {
        match &self.get(id)?.data {
            NodeData::Element { name, attrs } => Some((&**name, attrs.as_slice())),
            _ => None,
        }
    }

    /// Element's local name.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|(name, _)| name.local.as_ref())
    }

    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        let (_, attrs) = self.element(id)?;
        attrs
            .iter()
            .find(|a| &*a.name.local == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Attribute value, treating an empty value as absent.
    pub fn attr_nonempty(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.attr(id, attr_name).filter(|v| !v.is_empty())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Text that precedes the first element child.
    pub fn leading_text(&self, id: NodeId) -> String {
        self.children(id)
            .take_while(|&c| !self.is_element(c))
            .filter_map(|c| self.text(c))
            .collect()
    }

    /// All descendant text concatenated in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text(id) {
            out.push_str(text);
            return;
        }
        for child in self.children(id) {
            self.collect_text(child, out);
        }
    }
}
