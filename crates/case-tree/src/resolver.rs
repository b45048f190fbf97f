//! Move Resolver
//!
//! Turns a drop intent plus the current tree snapshot into the new ordering
//! of exactly one sibling group. Nothing here mutates the tree: the result
//! is sent to the backend and the tree is refetched afterwards.

use log::debug;

use crate::index::SuiteIndex;
use crate::intent::{DragIntent, DragItem, HoverEdge};

/// Why a drop produced no request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    /// Dropped onto itself
    SelfDrop,
    /// Suite would become part of its own subtree
    Cycle,
    /// Drop target is not in the current snapshot
    UnknownTarget,
    /// Dragged suite is not in the current snapshot
    UnknownItem,
    /// Resulting order equals the current one
    Unchanged,
}

/// Outcome of resolving a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    Move(T),
    Noop(NoopReason),
}

impl<T> Resolved<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        match self {
            Resolved::Move(value) => Resolved::Move(f(value)),
            Resolved::Noop(reason) => Resolved::Noop(reason),
        }
    }

    pub fn into_move(self) -> Option<T> {
        match self {
            Resolved::Move(value) => Some(value),
            Resolved::Noop(_) => None,
        }
    }
}

/// New placement of a case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseMove {
    /// Target suite had no cases: single-case reparent
    Reparent { case_id: u32, suite_id: u32 },
    /// Full new order of the target suite's cases
    Reorder { suite_id: u32, ordered_case_ids: Vec<u32> },
}

impl CaseMove {
    pub fn suite_id(&self) -> u32 {
        match self {
            CaseMove::Reparent { suite_id, .. } | CaseMove::Reorder { suite_id, .. } => *suite_id,
        }
    }

    /// The target suite's case order after the move
    pub fn ordered_case_ids(&self) -> Vec<u32> {
        match self {
            CaseMove::Reparent { case_id, .. } => vec![*case_id],
            CaseMove::Reorder { ordered_case_ids, .. } => ordered_case_ids.clone(),
        }
    }
}

/// New placement of a suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteMove {
    /// New parent had no other children: single-suite reparent
    Reparent { suite_id: u32, parent_id: Option<u32> },
    /// Full new order of the parent's children (`None` = roots)
    Reorder { parent_id: Option<u32>, ordered_suite_ids: Vec<u32> },
}

impl SuiteMove {
    pub fn parent_id(&self) -> Option<u32> {
        match self {
            SuiteMove::Reparent { parent_id, .. } | SuiteMove::Reorder { parent_id, .. } => *parent_id,
        }
    }

    /// The parent's child order after the move
    pub fn ordered_suite_ids(&self) -> Vec<u32> {
        match self {
            SuiteMove::Reparent { suite_id, .. } => vec![*suite_id],
            SuiteMove::Reorder { ordered_suite_ids, .. } => ordered_suite_ids.clone(),
        }
    }
}

/// A resolved move of either kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    Case(CaseMove),
    Suite(SuiteMove),
}

/// Resolve any drop
pub fn resolve(intent: &DragIntent, index: &SuiteIndex) -> Resolved<MovePlan> {
    match intent.item {
        DragItem::Case { .. } => resolve_case_move(intent, index).map(MovePlan::Case),
        DragItem::Suite { .. } => resolve_suite_move(intent, index).map(MovePlan::Suite),
    }
}

/// Resolve a case drop into the target suite's new case order.
///
/// `hover_index` names the case row under the pointer; `Upper` (or no edge)
/// inserts before it, `Lower` after it. An unset or out-of-range index appends.
pub fn resolve_case_move(intent: &DragIntent, index: &SuiteIndex) -> Resolved<CaseMove> {
    let (case_id, source_suite_id) = match intent.item {
        DragItem::Case { case_id, source_suite_id } => (case_id, source_suite_id),
        DragItem::Suite { .. } => return Resolved::Noop(NoopReason::UnknownItem),
    };
    let suite_id = intent.target_id;
    if !index.contains_suite(suite_id) {
        return Resolved::Noop(NoopReason::UnknownTarget);
    }

    let current = index.cases_of(suite_id);
    debug!(
        "case {} from suite {} (indexed in {:?}) onto suite {} at {:?}/{:?}",
        case_id,
        source_suite_id,
        index.suite_of_case(case_id),
        suite_id,
        intent.hover_index,
        intent.hover_edge
    );

    if current.is_empty() {
        return Resolved::Move(CaseMove::Reparent { case_id, suite_id });
    }

    place(current, case_id, intent.hover_index, intent.hover_edge)
        .map(|ordered_case_ids| CaseMove::Reorder { suite_id, ordered_case_ids })
}

/// Resolve a suite drop.
///
/// With no edge the dragged suite becomes the last child of the target;
/// with an edge it becomes the target's sibling, before or after it.
pub fn resolve_suite_move(intent: &DragIntent, index: &SuiteIndex) -> Resolved<SuiteMove> {
    let suite_id = match intent.item {
        DragItem::Suite { suite_id } => suite_id,
        DragItem::Case { .. } => return Resolved::Noop(NoopReason::UnknownItem),
    };
    let target_id = intent.target_id;

    if suite_id == target_id {
        return Resolved::Noop(NoopReason::SelfDrop);
    }
    if !index.contains_suite(target_id) {
        return Resolved::Noop(NoopReason::UnknownTarget);
    }
    if !index.contains_suite(suite_id) {
        return Resolved::Noop(NoopReason::UnknownItem);
    }

    let (parent_id, anchor) = match intent.hover_edge {
        HoverEdge::None => (Some(target_id), None),
        HoverEdge::Upper | HoverEdge::Lower => (index.parent_of(target_id).flatten(), Some(target_id)),
    };

    // The new parent must lie outside the dragged subtree
    if let Some(parent) = parent_id {
        if parent == suite_id || index.is_descendant(parent, suite_id) {
            debug!("suite {} onto {} rejected: cycle", suite_id, target_id);
            return Resolved::Noop(NoopReason::Cycle);
        }
    }

    let current = index.children_of(parent_id);
    debug!(
        "suite {} onto {} ({:?}) -> parent {:?} with {} children",
        suite_id,
        target_id,
        intent.hover_edge,
        parent_id,
        current.len()
    );

    if current.is_empty() {
        return Resolved::Move(SuiteMove::Reparent { suite_id, parent_id });
    }

    let anchor_index = anchor.and_then(|id| current.iter().position(|&s| s == id));
    place(current, suite_id, anchor_index, intent.hover_edge)
        .map(|ordered_suite_ids| SuiteMove::Reorder { parent_id, ordered_suite_ids })
}

/// Remove `moving` from `current` (if present) and reinsert it relative to
/// the element at `anchor_index`.
fn place(current: &[u32], moving: u32, anchor_index: Option<usize>, edge: HoverEdge) -> Resolved<Vec<u32>> {
    let mut ordered: Vec<u32> = current.iter().copied().filter(|&id| id != moving).collect();

    let position = match anchor_index.and_then(|i| current.get(i).copied()) {
        None => ordered.len(),
        Some(anchor) if anchor == moving => return Resolved::Noop(NoopReason::SelfDrop),
        Some(anchor) => {
            let at = ordered.iter().position(|&id| id == anchor).unwrap_or(ordered.len());
            match edge {
                HoverEdge::Lower => at + 1,
                HoverEdge::Upper | HoverEdge::None => at,
            }
        }
    };
    ordered.insert(position, moving);

    if ordered.as_slice() == current {
        Resolved::Noop(NoopReason::Unchanged)
    } else {
        Resolved::Move(ordered)
    }
}
