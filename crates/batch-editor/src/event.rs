//! Notifications for the presentation layer.
//!
//! The cascade queues events in the order changes happen; the front-end
//! drains them after each intent and refreshes the affected lists.

use batch_model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// The visible entries of a tier were recomputed.
    ContentsChanged { tier: usize },
    /// The selection of a tier changed (`None` when cleared).
    SelectionChanged {
        tier: usize,
        selected: Option<NodeId>,
    },
}

impl ListEvent {
    pub fn tier(&self) -> usize {
        match self {
            Self::ContentsChanged { tier } | Self::SelectionChanged { tier, .. } => *tier,
        }
    }
}
