//! Case Tree
//!
//! Ordered suite/case tree of a test project: the models, a parent/child
//! index over a snapshot, the drag-and-drop move resolver, and the backend
//! client that persists moves.
//!
//! The crate has no UI dependency; the browser front end drives it through
//! [`InteractionState`] and [`execute_drop`].

pub mod api;
pub mod config;
pub mod error;
pub mod index;
pub mod intent;
pub mod model;
pub mod mover;
pub mod resolver;

pub use api::{CaseApi, HttpCaseApi};
pub use config::{ClientConfig, BACKEND_URL_VAR, TOKEN_VAR};
pub use error::{ApiError, ApiResult, ConfigError};
pub use index::{flatten_folders, FolderRow, SuiteIndex};
pub use intent::{DragIntent, DragItem, HoverEdge, InteractionState};
pub use model::{Case, CaseTree, CaseUpdate, FolderNode, Milestone, NewCase, NewSuite, Suite};
pub use mover::{execute_drop, send_plan, DropOutcome};
pub use resolver::{resolve, resolve_case_move, resolve_suite_move, CaseMove, MovePlan, NoopReason, Resolved, SuiteMove};
