//! Tree Index
//!
//! One traversal of the nested suite tree into id -> node and id -> parent
//! maps, so move resolution never re-walks the tree.

use std::collections::HashMap;

use crate::model::{FolderNode, Suite};

#[derive(Debug, Clone)]
struct SuiteEntry {
    parent: Option<u32>,
    children: Vec<u32>,
    cases: Vec<u32>,
}

/// Flat lookup tables over a suite tree snapshot
#[derive(Debug, Clone, Default)]
pub struct SuiteIndex {
    suites: HashMap<u32, SuiteEntry>,
    roots: Vec<u32>,
    case_owner: HashMap<u32, u32>,
}

impl SuiteIndex {
    /// Index a tree snapshot (roots in display order)
    pub fn build(roots: &[Suite]) -> Self {
        let mut index = Self {
            roots: roots.iter().map(|s| s.id).collect(),
            ..Default::default()
        };

        // Explicit stack keeps deep trees off the call stack
        let mut stack: Vec<(&Suite, Option<u32>)> = roots.iter().rev().map(|s| (s, None)).collect();

        while let Some((suite, parent)) = stack.pop() {
            for case in &suite.cases {
                index.case_owner.insert(case.id, suite.id);
            }
            index.suites.insert(
                suite.id,
                SuiteEntry {
                    parent,
                    children: suite.children.iter().map(|c| c.id).collect(),
                    cases: suite.cases.iter().map(|c| c.id).collect(),
                },
            );
            for child in suite.children.iter().rev() {
                stack.push((child, Some(suite.id)));
            }
        }

        index
    }

    /// Number of indexed suites
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn contains_suite(&self, suite_id: u32) -> bool {
        self.suites.contains_key(&suite_id)
    }

    /// Parent of a suite: `Some(None)` for a root, `None` if the suite is unknown
    pub fn parent_of(&self, suite_id: u32) -> Option<Option<u32>> {
        self.suites.get(&suite_id).map(|e| e.parent)
    }

    /// Ordered child suite ids; `None` yields the root list
    pub fn children_of(&self, parent: Option<u32>) -> &[u32] {
        match parent {
            None => &self.roots,
            Some(id) => self.suites.get(&id).map(|e| e.children.as_slice()).unwrap_or(&[]),
        }
    }

    /// Ordered case ids of a suite (empty for unknown suites)
    pub fn cases_of(&self, suite_id: u32) -> &[u32] {
        self.suites.get(&suite_id).map(|e| e.cases.as_slice()).unwrap_or(&[])
    }

    /// Suite currently holding a case
    pub fn suite_of_case(&self, case_id: u32) -> Option<u32> {
        self.case_owner.get(&case_id).copied()
    }

    /// Ancestors of a suite, nearest first
    pub fn ancestors(&self, suite_id: u32) -> Vec<u32> {
        let mut result = Vec::new();
        let mut current = self.parent_of(suite_id).flatten();
        // Bounded by the suite count so a malformed snapshot cannot loop forever
        while let Some(id) = current {
            if result.len() > self.suites.len() {
                break;
            }
            result.push(id);
            current = self.parent_of(id).flatten();
        }
        result
    }

    /// True when `candidate` lies strictly inside `ancestor`'s subtree
    pub fn is_descendant(&self, candidate: u32, ancestor: u32) -> bool {
        self.ancestors(candidate).contains(&ancestor)
    }
}

/// One row of the folder sidebar in display order
#[derive(Debug, Clone, PartialEq)]
pub struct FolderRow {
    pub key: u32,
    pub title: String,
    pub depth: usize,
    pub has_children: bool,
}

/// Render folders as indented rows using recursive DFS
pub fn flatten_folders(folders: &[FolderNode]) -> Vec<FolderRow> {
    fn collect(nodes: &[FolderNode], depth: usize, result: &mut Vec<FolderRow>) {
        for node in nodes {
            result.push(FolderRow {
                key: node.key,
                title: node.title.clone(),
                depth,
                has_children: !node.children.is_empty(),
            });
            collect(&node.children, depth + 1, result);
        }
    }

    let mut result = Vec::new();
    collect(folders, 0, &mut result);
    result
}
