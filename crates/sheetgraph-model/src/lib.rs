//! # sheetgraph-model
//!
//! Project model for event-sheet dependency analysis.
//!
//! This crate provides:
//! - `EventNode` and its link / code-generation / other variants
//! - `Scene` and `ExternalSheet` (named root event lists)
//! - `Project` (uniquely named scenes and sheets, link resolution)
//! - JSON loading (`read_project`, `read_project_from_path`)
//!
//! It does not analyze anything; `sheetgraph-analyzer` borrows a `Project`
//! read-only and walks it.
//!
//! ## Data model
//!
//! ```text
//! project.json (on disk)
//!     ↓  read_project_from_path
//! Project
//!     ├── Scene*          name + Vec<EventNode>
//!     └── ExternalSheet*  name + Vec<EventNode>
//! ```

pub mod event;
pub mod project;
pub mod sheet;
pub mod storage;

pub use event::{
    CODE_EVENT_KIND, CodeGenEvent, EventNode, EventNodeError, LINK_EVENT_KIND, LinkEvent,
    OtherEvent,
};
pub use project::{LinkTarget, ManagedSourceNaming, Project, ProjectError};
pub use sheet::{EventSheet, ExternalSheet, Scene};
pub use storage::{ProjectFileError, read_project, read_project_from_path};
