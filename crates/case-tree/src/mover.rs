//! Drop Execution
//!
//! Resolve a drop against the current snapshot, send the resulting request,
//! and refetch the tree. The caller's tree is replaced only by the refetched
//! one, never patched locally.

use log::{debug, info};

use crate::api::{CaseApi, CaseOrder, SuiteOrder};
use crate::error::ApiResult;
use crate::index::SuiteIndex;
use crate::intent::DragIntent;
use crate::model::CaseTree;
use crate::resolver::{resolve, CaseMove, MovePlan, NoopReason, Resolved, SuiteMove};

/// Result of a completed drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The backend accepted the move; `tree` is the refetched snapshot
    Moved { plan: MovePlan, tree: CaseTree },
    /// Nothing was sent
    Ignored(NoopReason),
}

/// Send the request(s) for a resolved move.
///
/// Reparents are a single-item PUT; reorders send the whole sibling group.
pub async fn send_plan<A: CaseApi + ?Sized>(api: &A, project_code: &str, plan: &MovePlan) -> ApiResult<()> {
    match plan {
        MovePlan::Case(CaseMove::Reparent { case_id, suite_id }) => api.reparent_case(*case_id, *suite_id).await,
        MovePlan::Case(reorder @ CaseMove::Reorder { .. }) => {
            api.reorder_cases(project_code, &CaseOrder::from_move(reorder)).await
        }
        MovePlan::Suite(SuiteMove::Reparent { suite_id, parent_id }) => {
            api.reparent_suite(*suite_id, *parent_id).await
        }
        MovePlan::Suite(reorder @ SuiteMove::Reorder { .. }) => {
            api.reorder_suites(project_code, &SuiteOrder::from_move(reorder)).await
        }
    }
}

/// Handle one drop end to end.
///
/// No-ops return `Ignored` without touching the backend. A failed request
/// returns the error and skips the refetch, leaving the caller's tree as it was.
pub async fn execute_drop<A: CaseApi + ?Sized>(
    api: &A,
    project_code: &str,
    tree: &CaseTree,
    intent: &DragIntent,
) -> ApiResult<DropOutcome> {
    let index = SuiteIndex::build(&tree.entities);
    let plan = match resolve(intent, &index) {
        Resolved::Move(plan) => plan,
        Resolved::Noop(reason) => {
            debug!("drop ignored: {:?}", reason);
            return Ok(DropOutcome::Ignored(reason));
        }
    };

    send_plan(api, project_code, &plan).await?;
    let tree = api.fetch_tree(project_code).await?;
    info!("drop applied, tree now holds {} cases", tree.case_count());

    Ok(DropOutcome::Moved { plan, tree })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{ApiCall, RecordingApi};
    use crate::error::ApiError;
    use crate::intent::{DragItem, HoverEdge};
    use crate::model::{Case, Suite};

    fn suite(id: u32, children: Vec<Suite>, cases: &[u32]) -> Suite {
        let mut suite = Suite::new(id, format!("Suite{}", id));
        suite.children = children;
        suite.cases = cases.iter().map(|&c| Case::new(c, format!("Case{}", c))).collect();
        suite
    }

    fn tree(entities: Vec<Suite>) -> CaseTree {
        CaseTree {
            project_id: 1,
            entities,
            folders: Vec::new(),
        }
    }

    fn case_drop(case_id: u32, source: u32, target: u32, index: Option<usize>, edge: HoverEdge) -> DragIntent {
        DragIntent {
            item: DragItem::Case { case_id, source_suite_id: source },
            target_id: target,
            hover_index: index,
            hover_edge: edge,
        }
    }

    #[tokio::test]
    async fn test_case_into_empty_suite_then_refetch() {
        let snapshot = tree(vec![suite(1, vec![], &[1, 2]), suite(2, vec![], &[])]);
        let api = RecordingApi::new(snapshot.clone());

        let outcome = execute_drop(&api, "demo", &snapshot, &case_drop(1, 1, 2, None, HoverEdge::None))
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![ApiCall::ReparentCase { case_id: 1, suite_id: 2 }, ApiCall::FetchTree("demo".into())]
        );
        let DropOutcome::Moved { tree, .. } = outcome else { panic!("expected a move") };
        let ids = |s: &Suite| s.cases.iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids(&tree.entities[0]), vec![2]);
        assert_eq!(ids(&tree.entities[1]), vec![1]);
    }

    #[tokio::test]
    async fn test_reorder_sends_whole_suite() {
        let snapshot = tree(vec![suite(1, vec![], &[10, 11, 12])]);
        let api = RecordingApi::new(snapshot.clone());

        let outcome = execute_drop(&api, "demo", &snapshot, &case_drop(12, 1, 1, Some(0), HoverEdge::Upper))
            .await
            .unwrap();

        assert_eq!(api.calls()[0], ApiCall::ReorderCases(CaseOrder::new(1, &[12, 10, 11])));
        let DropOutcome::Moved { tree, plan } = outcome else { panic!("expected a move") };
        assert!(matches!(plan, MovePlan::Case(CaseMove::Reorder { .. })));
        let order: Vec<u32> = tree.entities[0].cases.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![12, 10, 11]);
    }

    #[tokio::test]
    async fn test_suite_moves() {
        let snapshot = tree(vec![suite(1, vec![suite(2, vec![], &[])], &[]), suite(3, vec![], &[])]);
        let api = RecordingApi::new(snapshot.clone());

        let intent = DragIntent {
            item: DragItem::Suite { suite_id: 3 },
            target_id: 2,
            hover_index: None,
            hover_edge: HoverEdge::Upper,
        };
        let outcome = execute_drop(&api, "demo", &snapshot, &intent).await.unwrap();

        assert_eq!(api.calls()[0], ApiCall::ReorderSuites(SuiteOrder::new(Some(1), &[3, 2])));
        let DropOutcome::Moved { tree, .. } = outcome else { panic!("expected a move") };
        assert_eq!(tree.entities.len(), 1);
        let children: Vec<u32> = tree.entities[0].children.iter().map(|s| s.id).collect();
        assert_eq!(children, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_noop_sends_nothing() {
        let snapshot = tree(vec![suite(1, vec![suite(2, vec![], &[])], &[5])]);
        let api = RecordingApi::new(snapshot.clone());

        let into_child = DragIntent {
            item: DragItem::Suite { suite_id: 1 },
            target_id: 2,
            hover_index: None,
            hover_edge: HoverEdge::None,
        };
        let outcome = execute_drop(&api, "demo", &snapshot, &into_child).await.unwrap();
        assert_eq!(outcome, DropOutcome::Ignored(NoopReason::Cycle));

        let onto_self = case_drop(5, 1, 1, Some(0), HoverEdge::Upper);
        let outcome = execute_drop(&api, "demo", &snapshot, &onto_self).await.unwrap();
        assert_eq!(outcome, DropOutcome::Ignored(NoopReason::SelfDrop));

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_move_skips_refetch() {
        let snapshot = tree(vec![suite(1, vec![], &[1]), suite(2, vec![], &[])]);
        let api = RecordingApi::new(snapshot.clone());
        api.fail_with(500);

        let err = execute_drop(&api, "demo", &snapshot, &case_drop(1, 1, 2, None, HoverEdge::None))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(api.calls(), vec![ApiCall::ReparentCase { case_id: 1, suite_id: 2 }]);
    }

    #[tokio::test]
    async fn test_expired_session_surfaces_unauthorized() {
        let snapshot = tree(vec![suite(1, vec![], &[1, 2])]);
        let api = RecordingApi::new(snapshot.clone());
        api.fail_with(401);

        let err = execute_drop(&api, "demo", &snapshot, &case_drop(2, 1, 1, Some(0), HoverEdge::Upper))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
