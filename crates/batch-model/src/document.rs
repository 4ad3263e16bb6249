//! Arena-backed element tree for batch documents.
//!
//! Elements live in a flat arena and are addressed by [`NodeId`]. Removed
//! slots are never reused, so a stale id can be detected with
//! [`Document::contains`] instead of silently aliasing a newer element.

use std::fmt;

use crate::error::{DocumentError, Result};

/// Stable handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single element: tag, ordered attributes, optional text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: String, parent: Option<NodeId>) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            text: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Owned, nested form of an element subtree.
///
/// Used as the parser output and for structural comparison of documents,
/// where arena ids are irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementTree {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ElementTree>,
}

impl ElementTree {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ElementTree) -> Self {
        self.children.push(child);
        self
    }
}

/// A batch document with exactly one root element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
}

impl Document {
    /// Create a document holding only an empty root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![Some(Element::new(root_tag.into(), None))],
            root: NodeId(0),
        }
    }

    /// Build a document from a nested tree; the tree's top becomes the root.
    pub fn from_tree(tree: ElementTree) -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        document.root = document.insert_subtree(None, tree);
        document
    }

    /// Snapshot the whole document as a nested tree.
    pub fn to_tree(&self) -> ElementTree {
        self.subtree(self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_tag(&self) -> &str {
        // The root slot is never freed.
        self.nodes[self.root.0]
            .as_ref()
            .map_or("", |element| element.tag.as_str())
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Whether `id` still refers to a live element.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn element(&self, id: NodeId) -> Result<&Element> {
        self.get(id).ok_or(DocumentError::UnknownNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(DocumentError::UnknownNode(id))
    }

    /// Ordered children of `id` whose tag equals `tag`.
    pub fn children_with_tag(&self, id: NodeId, tag: &str) -> Result<Vec<NodeId>> {
        let element = self.element(id)?;
        Ok(element
            .children
            .iter()
            .copied()
            .filter(|child| self.get(*child).is_some_and(|c| c.tag == tag))
            .collect())
    }

    /// Append a new empty element as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, tag: impl Into<String>) -> Result<NodeId> {
        self.element(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element::new(tag.into(), Some(parent))));
        self.element_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Detach `id` from its parent and drop its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(DocumentError::RootRemoval);
        }
        let parent = self.element(id)?.parent;
        if let Some(parent) = parent {
            self.element_mut(parent)?.children.retain(|child| *child != id);
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(element) = self.nodes.get_mut(next.0).and_then(Option::take) {
                pending.extend(element.children);
            }
        }
        Ok(())
    }

    /// Set an attribute, replacing an existing value for the same key.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = key.into();
        let value = value.into();
        let element = self.element_mut(id)?;
        match element.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => element.attributes.push((key, value)),
        }
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, text: Option<String>) -> Result<()> {
        self.element_mut(id)?.text = text;
        Ok(())
    }

    /// Number of live elements, root included.
    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    fn insert_subtree(&mut self, parent: Option<NodeId>, tree: ElementTree) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut element = Element::new(tree.tag, parent);
        element.attributes = tree.attributes;
        element.text = tree.text;
        self.nodes.push(Some(element));
        let children: Vec<NodeId> = tree
            .children
            .into_iter()
            .map(|child| self.insert_subtree(Some(id), child))
            .collect();
        if let Some(element) = self.nodes[id.0].as_mut() {
            element.children = children;
        }
        id
    }

    fn subtree(&self, id: NodeId) -> ElementTree {
        let Some(element) = self.get(id) else {
            return ElementTree::default();
        };
        ElementTree {
            tag: element.tag.clone(),
            attributes: element.attributes.clone(),
            text: element.text.clone(),
            children: element
                .children
                .iter()
                .map(|child| self.subtree(*child))
                .collect(),
        }
    }
}
