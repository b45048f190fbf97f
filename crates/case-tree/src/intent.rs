//! Drag Intents and Interaction State
//!
//! What is being dragged, where the pointer hovers, and the resettable
//! per-gesture state that feeds the insertion-line indicator.

use serde::{Deserialize, Serialize};

/// Dragged entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragItem {
    Case { case_id: u32, source_suite_id: u32 },
    Suite { suite_id: u32 },
}

impl DragItem {
    pub fn moving_id(&self) -> u32 {
        match self {
            DragItem::Case { case_id, .. } => *case_id,
            DragItem::Suite { suite_id } => *suite_id,
        }
    }
}

/// Pointer position within the hovered row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverEdge {
    /// Insert before the hovered row
    Upper,
    /// Insert after the hovered row
    Lower,
    /// No edge signal: onto the row itself
    #[default]
    None,
}

/// A pending move, built at drop time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragIntent {
    pub item: DragItem,
    /// Suite the drop landed on
    pub target_id: u32,
    /// Case row index within the target; `None` when not over a row
    pub hover_index: Option<usize>,
    pub hover_edge: HoverEdge,
}

/// Hover bookkeeping for a single drag gesture
///
/// Purely presentational until drop; [`InteractionState::take_intent`]
/// consumes it and leaves the state cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hover_target: Option<u32>,
    pub hover_index: Option<usize>,
    pub hover_edge: HoverEdge,
}

impl InteractionState {
    /// Pointer over a suite header, sidebar node, or the empty part of a suite
    pub fn hover_suite(&mut self, suite_id: u32, edge: HoverEdge) {
        self.hover_target = Some(suite_id);
        self.hover_index = None;
        self.hover_edge = edge;
    }

    /// Pointer over case row `index` of `suite_id`
    pub fn hover_case_row(&mut self, suite_id: u32, index: usize, edge: HoverEdge) {
        self.hover_target = Some(suite_id);
        self.hover_index = Some(index);
        self.hover_edge = edge;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.hover_target.is_none()
    }

    /// Edge at which to draw the insertion line for a case row, if any
    pub fn insertion_edge(&self, suite_id: u32, index: usize) -> Option<HoverEdge> {
        if self.hover_target == Some(suite_id) && self.hover_index == Some(index) {
            match self.hover_edge {
                HoverEdge::None => None,
                edge => Some(edge),
            }
        } else {
            None
        }
    }

    /// Build the drop intent for `item` and reset hover state.
    ///
    /// Returns `None` when the pointer was not over any target (cancelled drop).
    pub fn take_intent(&mut self, item: DragItem) -> Option<DragIntent> {
        let state = std::mem::take(self);
        state.hover_target.map(|target_id| DragIntent {
            item,
            target_id,
            hover_index: state.hover_index,
            hover_edge: state.hover_edge,
        })
    }
}
