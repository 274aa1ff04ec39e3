//! Error types for dependency analysis.

use serde::Serialize;
use sheetgraph_model::LinkTarget;
use std::fmt;

/// The two name spaces a link can reach into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Scene,
    Sheet,
}

impl LinkKind {
    pub fn of(target: &LinkTarget<'_>) -> Self {
        match target {
            LinkTarget::Scene(_) => LinkKind::Scene,
            LinkTarget::Sheet(_) => LinkKind::Sheet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Scene => "scene",
            LinkKind::Sheet => "external sheet",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors arising from a dependency analysis request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Analysis was requested on a frame with neither a scene nor a sheet root.
    #[error("dependency analysis requested without a scene or external sheet root")]
    MissingRoot,

    #[error("unknown scene: {0}")]
    UnknownScene(String),

    #[error("unknown external sheet: {0}")]
    UnknownSheet(String),

    /// A link re-entered a name already on the active ancestor chain.
    #[error(
        "cyclic dependency: {kind} `{target}` is already being visited ({})",
        .chain.join(" -> ")
    )]
    CyclicDependency {
        kind: LinkKind,
        target: String,
        chain: Vec<String>,
    },
}

impl AnalysisError {
    pub fn is_cycle(&self) -> bool {
        matches!(self, AnalysisError::CyclicDependency { .. })
    }
}
