//! Request and Response Bodies
//!
//! JSON shapes of the backend's move and list endpoints.

use serde::{Deserialize, Serialize};

use crate::model::Milestone;
use crate::resolver::{CaseMove, SuiteMove};

/// `PUT /cases/{id}` body for moving a case into another suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReparentBody {
    pub test_suite_id: u32,
}

/// `PUT /suites/{id}` body for moving a suite under another parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReparentBody {
    pub parent_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOrderRow {
    pub test_case_id: u32,
    pub index: usize,
}

/// `PUT /{code}/cases/bulk` body: one suite's full case order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOrder {
    pub test_suite_id: u32,
    pub test_cases: Vec<CaseOrderRow>,
}

impl CaseOrder {
    pub fn new(suite_id: u32, ordered_case_ids: &[u32]) -> Self {
        Self {
            test_suite_id: suite_id,
            test_cases: ordered_case_ids
                .iter()
                .enumerate()
                .map(|(index, &test_case_id)| CaseOrderRow { test_case_id, index })
                .collect(),
        }
    }

    pub fn from_move(plan: &CaseMove) -> Self {
        Self::new(plan.suite_id(), &plan.ordered_case_ids())
    }

    pub fn case_ids(&self) -> Vec<u32> {
        self.test_cases.iter().map(|row| row.test_case_id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteOrderRow {
    pub test_suite_id: u32,
    pub index: usize,
}

/// `PUT /{code}/suites/bulk` body: one parent's full child order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteOrder {
    pub parent_id: Option<u32>,
    pub test_suites: Vec<SuiteOrderRow>,
}

impl SuiteOrder {
    pub fn new(parent_id: Option<u32>, ordered_suite_ids: &[u32]) -> Self {
        Self {
            parent_id,
            test_suites: ordered_suite_ids
                .iter()
                .enumerate()
                .map(|(index, &test_suite_id)| SuiteOrderRow { test_suite_id, index })
                .collect(),
        }
    }

    pub fn from_move(plan: &SuiteMove) -> Self {
        Self::new(plan.parent_id(), &plan.ordered_suite_ids())
    }

    pub fn suite_ids(&self) -> Vec<u32> {
        self.test_suites.iter().map(|row| row.test_suite_id).collect()
    }
}

/// `GET /{code}/milestones` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestoneList {
    #[serde(default)]
    pub entities: Vec<Milestone>,
}

/// Error body returned by the backend on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
