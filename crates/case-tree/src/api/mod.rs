//! Backend API
//!
//! The case-list screen talks to the backend only through [`CaseApi`].
//! [`HttpCaseApi`] is the real client; tests substitute their own.

mod http;
mod wire;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::{Case, CaseTree, CaseUpdate, Milestone, NewCase, NewSuite};

pub use http::HttpCaseApi;
pub use wire::{CaseOrder, CaseOrderRow, CaseReparentBody, SuiteOrder, SuiteOrderRow, SuiteReparentBody};

/// Backend operations used by the case-list screen.
///
/// Futures are not `Send`: the browser client runs on a single-threaded
/// event loop.
#[async_trait(?Send)]
pub trait CaseApi {
    /// Whole suite/case tree of a project
    async fn fetch_tree(&self, project_code: &str) -> ApiResult<CaseTree>;

    async fn fetch_milestones(&self, project_code: &str) -> ApiResult<Vec<Milestone>>;

    /// Move one case into a suite (used when the suite has no cases)
    async fn reparent_case(&self, case_id: u32, suite_id: u32) -> ApiResult<()>;

    /// Replace one suite's case order
    async fn reorder_cases(&self, project_code: &str, order: &CaseOrder) -> ApiResult<()>;

    /// Move one suite under a parent (`None` = root)
    async fn reparent_suite(&self, suite_id: u32, parent_id: Option<u32>) -> ApiResult<()>;

    /// Replace one parent's child-suite order
    async fn reorder_suites(&self, project_code: &str, order: &SuiteOrder) -> ApiResult<()>;

    async fn create_case(&self, case: &NewCase) -> ApiResult<Case>;

    async fn update_case(&self, case_id: u32, update: &CaseUpdate) -> ApiResult<Case>;

    async fn delete_case(&self, case_id: u32) -> ApiResult<()>;

    async fn create_suite(&self, suite: &NewSuite) -> ApiResult<()>;

    async fn delete_suite(&self, suite_id: u32) -> ApiResult<()>;
}
