//! List model for one tier of the cascade.
//!
//! A tier shows the children (with the tier's tag) of its parent element and
//! edits them in place. It never looks at the tiers around it; propagation is
//! the [`Cascade`](crate::Cascade)'s job.

use batch_model::{Document, NodeId, TierKind, TierSpec};

use crate::error::ListError;

type Result<T> = std::result::Result<T, ListError>;

#[derive(Debug, Clone)]
pub struct TierList {
    index: usize,
    spec: TierSpec,
    name_attribute: String,
    parent: Option<NodeId>,
    entries: Vec<NodeId>,
    selected: Option<NodeId>,
}

impl TierList {
    pub fn new(index: usize, spec: TierSpec, name_attribute: impl Into<String>) -> Self {
        Self {
            index,
            spec,
            name_attribute: name_attribute.into(),
            parent: None,
            entries: Vec::new(),
            selected: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn spec(&self) -> &TierSpec {
        &self.spec
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Visible entries in document order.
    pub fn entries(&self) -> &[NodeId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected?;
        self.entries.iter().position(|id| *id == selected)
    }

    pub fn entry_name<'d>(&self, document: &'d Document, id: NodeId) -> Option<&'d str> {
        self.spec.entry_name(document.get(id)?, &self.name_attribute)
    }

    pub fn entry_names(&self, document: &Document) -> Vec<String> {
        self.entries
            .iter()
            .map(|id| {
                self.entry_name(document, *id)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    /// Point the tier at a new parent and recompute its entries.
    ///
    /// The current selection survives only when the parent is unchanged and
    /// the selected element is still listed. Returns whether the selection
    /// changed.
    pub fn set_parent_selection(&mut self, document: &Document, parent: Option<NodeId>) -> bool {
        let parent = parent.filter(|id| document.contains(*id));
        let same_parent = parent == self.parent;
        self.parent = parent;
        self.entries = parent
            .and_then(|id| document.children_with_tag(id, &self.spec.tag).ok())
            .unwrap_or_default();

        let previous = self.selected;
        self.selected = previous.filter(|id| same_parent && self.entries.contains(id));
        previous != self.selected
    }

    /// Recompute entries against the current parent.
    pub fn revalidate(&mut self, document: &Document) -> bool {
        self.set_parent_selection(document, self.parent)
    }

    pub fn select(&mut self, index: usize) -> Result<NodeId> {
        let id = self.entry_at(index)?;
        self.selected = Some(id);
        Ok(id)
    }

    /// Returns whether there was a selection to clear.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Append an entry under the current parent.
    pub fn add_entry(&mut self, document: &mut Document, name: &str) -> Result<NodeId> {
        let name = validate_name(name)?;
        let parent = self.parent.ok_or(ListError::NoParentSelected { tier: self.index })?;
        self.ensure_unique(document, name, None)?;

        let id = document.append_child(parent, self.spec.tag.as_str())?;
        self.write_name(document, id, name)?;
        self.revalidate(document);
        Ok(id)
    }

    /// Remove the entry at `index` with its subtree. Returns whether it was
    /// the selected entry.
    pub fn remove_entry(&mut self, document: &mut Document, index: usize) -> Result<bool> {
        let id = self.entry_at(index)?;
        document.remove(id)?;
        Ok(self.revalidate(document))
    }

    /// Rename the entry at `index`, keeping its identity.
    pub fn rename_entry(
        &mut self,
        document: &mut Document,
        index: usize,
        new_name: &str,
    ) -> Result<NodeId> {
        let id = self.entry_at(index)?;
        let name = validate_name(new_name)?;
        self.ensure_unique(document, name, Some(id))?;
        self.write_name(document, id, name)?;
        Ok(id)
    }

    fn entry_at(&self, index: usize) -> Result<NodeId> {
        self.entries
            .get(index)
            .copied()
            .ok_or(ListError::IndexOutOfRange {
                tier: self.index,
                index,
                len: self.entries.len(),
            })
    }

    fn ensure_unique(&self, document: &Document, name: &str, except: Option<NodeId>) -> Result<()> {
        let taken = self
            .entries
            .iter()
            .filter(|id| Some(**id) != except)
            .any(|id| self.entry_name(document, *id) == Some(name));
        if taken {
            return Err(ListError::DuplicateName {
                tier: self.index,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn write_name(&self, document: &mut Document, id: NodeId, name: &str) -> Result<()> {
        match self.spec.kind {
            TierKind::Structured => document.set_attribute(id, self.name_attribute.as_str(), name)?,
            TierKind::Leaf => document.set_text(id, Some(name.to_string()))?,
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListError::EmptyName);
    }
    Ok(name)
}
