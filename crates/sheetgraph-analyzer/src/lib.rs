//! # sheetgraph-analyzer
//!
//! Dependency analysis over a borrowed, read-only `Project`.
//!
//! Link events splice another scene's or sheet's events into the current
//! tree; code events declare generated source files. From one root the
//! analyzer computes five sets (scenes, sheets, source files, and the
//! scenes/sheets reached from a nested position), refusing any link that
//! re-enters a name already on the active path.
//!
//! ## Architecture
//!
//! ```text
//! check_eligibility / check_all_sheets / find_cycles
//!     │  one analyzer per scene (optionally on rayon)
//! DependencyAnalyzer       ← frame: project + root + result sets
//!     │
//! Traversal                ← depth-first walk, chains down, deltas up
//!     │
//! AncestorChain ×2         ← scene names / sheet names on the path
//! ```

pub mod analyzer;
pub mod chain;
pub mod cycles;
pub mod eligibility;
pub mod error;
pub mod sets;
pub mod traversal;

pub use analyzer::{AnalysisRoot, DependencyAnalyzer};
pub use chain::AncestorChain;
pub use cycles::{CycleReport, find_cycles};
pub use eligibility::{
    EligibilityOptions, EligibilityReport, EligibilityVerdict, check_all_sheets, check_eligibility,
    exclusive_scene_for,
};
pub use error::{AnalysisError, LinkKind};
pub use sets::DependencySets;
pub use traversal::{Traversal, TraversalContext, TraversalDelta};
