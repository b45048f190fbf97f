//! In-memory backend for tests: records calls and applies moves to its own tree.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::{CaseApi, CaseOrder, SuiteOrder};
use crate::error::{ApiError, ApiResult};
use crate::model::{Case, CaseTree, CaseUpdate, Milestone, NewCase, NewSuite, Suite};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchTree(String),
    ReparentCase { case_id: u32, suite_id: u32 },
    ReorderCases(CaseOrder),
    ReparentSuite { suite_id: u32, parent_id: Option<u32> },
    ReorderSuites(SuiteOrder),
    Other(&'static str),
}

pub struct RecordingApi {
    tree: RefCell<CaseTree>,
    calls: RefCell<Vec<ApiCall>>,
    fail_status: Cell<Option<u16>>,
}

impl RecordingApi {
    pub fn new(tree: CaseTree) -> Self {
        Self {
            tree: RefCell::new(tree),
            calls: RefCell::new(Vec::new()),
            fail_status: Cell::new(None),
        }
    }

    /// Make every mutation answer with this status
    pub fn fail_with(&self, status: u16) {
        self.fail_status.set(Some(status));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: ApiCall) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_status.get() {
            Some(401) => Err(ApiError::Unauthorized),
            Some(status) => Err(ApiError::Status { status, message: "Update failed".into() }),
            None => Ok(()),
        }
    }
}

fn find_suite_mut(suites: &mut [Suite], id: u32) -> Option<&mut Suite> {
    for suite in suites.iter_mut() {
        if suite.id == id {
            return Some(suite);
        }
        if let Some(found) = find_suite_mut(&mut suite.children, id) {
            return Some(found);
        }
    }
    None
}

fn take_case(suites: &mut [Suite], id: u32) -> Option<Case> {
    for suite in suites.iter_mut() {
        if let Some(pos) = suite.cases.iter().position(|c| c.id == id) {
            return Some(suite.cases.remove(pos));
        }
        if let Some(case) = take_case(&mut suite.children, id) {
            return Some(case);
        }
    }
    None
}

fn take_suite(suites: &mut Vec<Suite>, id: u32) -> Option<Suite> {
    if let Some(pos) = suites.iter().position(|s| s.id == id) {
        return Some(suites.remove(pos));
    }
    suites.iter_mut().find_map(|s| take_suite(&mut s.children, id))
}

fn place_suites(tree: &mut CaseTree, parent_id: Option<u32>, ids: &[u32]) {
    let moved: Vec<Suite> = ids.iter().filter_map(|&id| take_suite(&mut tree.entities, id)).collect();
    let siblings = match parent_id {
        None => &mut tree.entities,
        Some(pid) => match find_suite_mut(&mut tree.entities, pid) {
            Some(parent) => &mut parent.children,
            None => return,
        },
    };
    siblings.extend(moved);
}

#[async_trait(?Send)]
impl CaseApi for RecordingApi {
    async fn fetch_tree(&self, project_code: &str) -> ApiResult<CaseTree> {
        self.calls.borrow_mut().push(ApiCall::FetchTree(project_code.to_string()));
        Ok(self.tree.borrow().clone())
    }

    async fn fetch_milestones(&self, _project_code: &str) -> ApiResult<Vec<Milestone>> {
        Ok(Vec::new())
    }

    async fn reparent_case(&self, case_id: u32, suite_id: u32) -> ApiResult<()> {
        self.record(ApiCall::ReparentCase { case_id, suite_id })?;
        let mut tree = self.tree.borrow_mut();
        if let Some(case) = take_case(&mut tree.entities, case_id) {
            if let Some(suite) = find_suite_mut(&mut tree.entities, suite_id) {
                suite.cases.push(case);
            }
        }
        Ok(())
    }

    async fn reorder_cases(&self, _project_code: &str, order: &CaseOrder) -> ApiResult<()> {
        self.record(ApiCall::ReorderCases(order.clone()))?;
        let mut tree = self.tree.borrow_mut();
        let cases: Vec<Case> = order
            .case_ids()
            .into_iter()
            .filter_map(|id| take_case(&mut tree.entities, id))
            .collect();
        if let Some(suite) = find_suite_mut(&mut tree.entities, order.test_suite_id) {
            suite.cases.extend(cases);
        }
        Ok(())
    }

    async fn reparent_suite(&self, suite_id: u32, parent_id: Option<u32>) -> ApiResult<()> {
        self.record(ApiCall::ReparentSuite { suite_id, parent_id })?;
        place_suites(&mut self.tree.borrow_mut(), parent_id, &[suite_id]);
        Ok(())
    }

    async fn reorder_suites(&self, _project_code: &str, order: &SuiteOrder) -> ApiResult<()> {
        self.record(ApiCall::ReorderSuites(order.clone()))?;
        place_suites(&mut self.tree.borrow_mut(), order.parent_id, &order.suite_ids());
        Ok(())
    }

    async fn create_case(&self, case: &NewCase) -> ApiResult<Case> {
        self.record(ApiCall::Other("create_case"))?;
        Ok(Case::new(1000, case.title.clone()))
    }

    async fn update_case(&self, case_id: u32, update: &CaseUpdate) -> ApiResult<Case> {
        self.record(ApiCall::Other("update_case"))?;
        Ok(Case::new(case_id, update.title.clone()))
    }

    async fn delete_case(&self, _case_id: u32) -> ApiResult<()> {
        self.record(ApiCall::Other("delete_case"))
    }

    async fn create_suite(&self, _suite: &NewSuite) -> ApiResult<()> {
        self.record(ApiCall::Other("create_suite"))
    }

    async fn delete_suite(&self, _suite_id: u32) -> ApiResult<()> {
        self.record(ApiCall::Other("delete_suite"))
    }
}
