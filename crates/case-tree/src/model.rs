//! Case Tree Models
//!
//! Data structures matching the backend's case-list payloads.

use serde::{Deserialize, Serialize};

/// A suite node: ordered child suites and ordered cases.
///
/// Array order is display order. The parent is implicit in the tree position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub id: u32,
    pub name: String,
    #[serde(rename = "test_suites", default)]
    pub children: Vec<Suite>,
    #[serde(rename = "test_cases", default)]
    pub cases: Vec<Case>,
}

impl Suite {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            cases: Vec::new(),
        }
    }
}

/// Milestone reference embedded in a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRef {
    pub id: u32,
    pub title: String,
}

/// Author reference embedded in a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u32,
    pub name: String,
}

/// A test case, ordered within exactly one suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub milestone_id: Option<u32>,
    #[serde(default)]
    pub milestone: Option<MilestoneRef>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub updated_by: Option<UserRef>,
}

impl Case {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            milestone_id: None,
            milestone: None,
            created_by: None,
            updated_by: None,
        }
    }

    /// Explicit milestone id, falling back to the embedded milestone
    pub fn milestone_id(&self) -> Option<u32> {
        self.milestone_id.or(self.milestone.as_ref().map(|m| m.id))
    }
}

/// Suite-only label/key view used by the folder sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    pub key: u32,
    pub title: String,
    #[serde(default)]
    pub children: Vec<FolderNode>,
}

/// Whole case tree of a project, as returned by the case-list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseTree {
    pub project_id: u32,
    #[serde(default)]
    pub entities: Vec<Suite>,
    #[serde(default)]
    pub folders: Vec<FolderNode>,
}

impl CaseTree {
    /// Find a case anywhere in the tree
    pub fn find_case(&self, case_id: u32) -> Option<&Case> {
        fn walk(suites: &[Suite], case_id: u32) -> Option<&Case> {
            suites.iter().find_map(|suite| {
                suite
                    .cases
                    .iter()
                    .find(|case| case.id == case_id)
                    .or_else(|| walk(&suite.children, case_id))
            })
        }
        walk(&self.entities, case_id)
    }

    /// Total number of cases in the tree
    pub fn case_count(&self) -> usize {
        fn count(suites: &[Suite]) -> usize {
            suites.iter().map(|s| s.cases.len() + count(&s.children)).sum()
        }
        count(&self.entities)
    }
}

/// Milestone data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub test_case_count: u32,
}

/// Payload for creating a case under a suite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCase {
    pub project_id: u32,
    pub test_suite_id: u32,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_id: Option<u32>,
}

/// Payload for creating a suite (None parent = root)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSuite {
    pub project_id: u32,
    pub parent_id: Option<u32>,
    pub name: String,
}

/// Editable case fields. A `None` milestone clears it on the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseUpdate {
    pub title: String,
    pub content: String,
    pub milestone_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_id: Option<u32>,
}

impl CaseUpdate {
    /// Start an update from the case's current values
    pub fn from_case(case: &Case) -> Self {
        Self {
            title: case.title.clone(),
            content: case.content.clone(),
            milestone_id: case.milestone_id(),
            updated_by_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_case_list_payload() {
        let json = r##"{
            "project_id": 3,
            "entities": [
                {"id": 1, "name": "Login", "test_suites": [
                    {"id": 4, "name": "OAuth", "test_suites": [], "test_cases": []}
                ], "test_cases": [
                    {"id": 10, "title": "Valid password", "content": "# Steps",
                     "milestone": {"id": 7, "title": "v1.0"},
                     "created_by": {"id": 1, "name": "admin"},
                     "updated_by": {"id": 1, "name": "admin"}}
                ]}
            ],
            "folders": [{"key": 1, "title": "Login", "children": [{"key": 4, "title": "OAuth", "children": []}]}]
        }"##;

        let tree: CaseTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.project_id, 3);
        assert_eq!(tree.entities[0].children[0].id, 4);
        assert_eq!(tree.entities[0].cases[0].milestone_id(), Some(7));
        assert_eq!(tree.entities[0].cases[0].content, "# Steps");
        assert_eq!(tree.folders[0].children[0].key, 4);
        assert_eq!(tree.case_count(), 1);
        assert_eq!(tree.find_case(10).map(|c| c.title.as_str()), Some("Valid password"));
    }

    #[test]
    fn test_explicit_milestone_id_wins() {
        let mut case = Case::new(1, "t");
        case.milestone = Some(MilestoneRef { id: 2, title: "old".into() });
        case.milestone_id = Some(5);
        assert_eq!(case.milestone_id(), Some(5));
    }

    #[test]
    fn test_case_update_serializes_null_milestone() {
        let update = CaseUpdate::from_case(&Case::new(1, "t"));
        let json = serde_json::to_value(&update).unwrap();
        assert!(json["milestone_id"].is_null());
        assert!(json.get("updated_by_id").is_none());
    }
}
