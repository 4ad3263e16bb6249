//! Selection cascade across chained tiers.
//!
//! Tier `i + 1` always lists the children of tier `i`'s selection. Every
//! operation finishes propagating down to the last tier before it returns,
//! and propagation only ever flows from a tier to the tiers below it.

use batch_model::{BatchSchema, Document, NodeId};

use crate::error::ListError;
use crate::event::ListEvent;
use crate::tier::TierList;

type Result<T> = std::result::Result<T, ListError>;

#[derive(Debug, Clone)]
pub struct Cascade {
    tiers: Vec<TierList>,
    events: Vec<ListEvent>,
}

impl Cascade {
    pub fn new(schema: &BatchSchema) -> Self {
        let tiers = schema
            .tiers
            .iter()
            .enumerate()
            .map(|(index, spec)| TierList::new(index, spec.clone(), schema.name_attribute.as_str()))
            .collect();
        Self {
            tiers,
            events: Vec::new(),
        }
    }

    /// Root the first tier at the document root and fill the chain.
    pub fn attach(&mut self, document: &Document) {
        let Some(first) = self.tiers.first_mut() else {
            return;
        };
        let selection_changed = first.set_parent_selection(document, Some(document.root()));
        self.announce(0, selection_changed);
        self.propagate_from(document, 0);
    }

    pub fn tiers(&self) -> &[TierList] {
        &self.tiers
    }

    pub fn tier(&self, tier: usize) -> Result<&TierList> {
        self.tiers.get(tier).ok_or(ListError::UnknownTier { tier })
    }

    fn tier_mut(&mut self, tier: usize) -> Result<&mut TierList> {
        self.tiers
            .get_mut(tier)
            .ok_or(ListError::UnknownTier { tier })
    }

    pub fn select(&mut self, document: &Document, tier: usize, index: usize) -> Result<NodeId> {
        let list = self.tier_mut(tier)?;
        let previous = list.selected();
        let id = list.select(index)?;
        tracing::debug!(tier, index, node = %id, "Selected entry");
        self.announce_selection(tier, previous != Some(id));
        self.propagate_from(document, tier);
        Ok(id)
    }

    pub fn clear_selection(&mut self, document: &Document, tier: usize) -> Result<()> {
        let cleared = self.tier_mut(tier)?.clear_selection();
        self.announce_selection(tier, cleared);
        self.propagate_from(document, tier);
        Ok(())
    }

    pub fn add_entry(&mut self, document: &mut Document, tier: usize, name: &str) -> Result<NodeId> {
        let id = self.tier_mut(tier)?.add_entry(document, name)?;
        tracing::debug!(tier, name, node = %id, "Added entry");
        self.announce(tier, false);
        self.propagate_from(document, tier);
        Ok(id)
    }

    pub fn remove_entry(&mut self, document: &mut Document, tier: usize, index: usize) -> Result<()> {
        let selection_cleared = self.tier_mut(tier)?.remove_entry(document, index)?;
        tracing::debug!(tier, index, selection_cleared, "Removed entry");
        self.announce(tier, selection_cleared);
        self.propagate_from(document, tier);
        Ok(())
    }

    pub fn rename_entry(
        &mut self,
        document: &mut Document,
        tier: usize,
        index: usize,
        new_name: &str,
    ) -> Result<NodeId> {
        let id = self.tier_mut(tier)?.rename_entry(document, index, new_name)?;
        tracing::debug!(tier, index, new_name, node = %id, "Renamed entry");
        self.announce(tier, false);
        self.propagate_from(document, tier);
        Ok(id)
    }

    /// Take all queued notifications in the order they were raised.
    pub fn drain_events(&mut self) -> Vec<ListEvent> {
        std::mem::take(&mut self.events)
    }

    /// Push each tier's selection into the tier below, from `tier` down.
    fn propagate_from(&mut self, document: &Document, tier: usize) {
        for upper in tier..self.tiers.len().saturating_sub(1) {
            let parent = self.tiers[upper].selected();
            let lower = upper + 1;
            let selection_changed = self.tiers[lower].set_parent_selection(document, parent);
            tracing::trace!(
                tier = lower,
                entries = self.tiers[lower].len(),
                "Recomputed tier from parent selection"
            );
            self.announce(lower, selection_changed);
        }
    }

    fn announce(&mut self, tier: usize, selection_changed: bool) {
        self.events.push(ListEvent::ContentsChanged { tier });
        self.announce_selection(tier, selection_changed);
    }

    fn announce_selection(&mut self, tier: usize, changed: bool) {
        if changed {
            let selected = self.tiers[tier].selected();
            self.events
                .push(ListEvent::SelectionChanged { tier, selected });
        }
    }
}
