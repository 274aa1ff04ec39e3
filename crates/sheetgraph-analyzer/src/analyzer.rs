//! The dependency frame: one analysis rooted at a scene or an external sheet.

use crate::error::{AnalysisError, LinkKind};
use crate::sets::DependencySets;
use crate::traversal::{Traversal, TraversalContext};
use sheetgraph_model::{EventSheet, ExternalSheet, LinkTarget, Project, Scene};
use std::collections::BTreeSet;

/// Where an analysis starts. Resolved the same way as a link target.
pub type AnalysisRoot<'p> = LinkTarget<'p>;

/// Computes the dependencies reachable from one root.
///
/// The project is borrowed read-only for the analyzer's lifetime, so
/// independent analyzers over one project can run on separate threads.
#[derive(Debug, Clone)]
pub struct DependencyAnalyzer<'p> {
    project: &'p Project,
    root: Option<AnalysisRoot<'p>>,
    dependencies: DependencySets,
    unresolved_links: BTreeSet<String>,
}

impl<'p> DependencyAnalyzer<'p> {
    pub fn for_scene(project: &'p Project, scene: &'p Scene) -> Self {
        Self::unrooted(project).root_at_scene(scene)
    }

    pub fn for_sheet(project: &'p Project, sheet: &'p ExternalSheet) -> Self {
        Self::unrooted(project).root_at_sheet(sheet)
    }

    pub fn for_scene_named(project: &'p Project, name: &str) -> Result<Self, AnalysisError> {
        let scene = project
            .scene(name)
            .ok_or_else(|| AnalysisError::UnknownScene(name.to_string()))?;
        Ok(Self::for_scene(project, scene))
    }

    pub fn for_sheet_named(project: &'p Project, name: &str) -> Result<Self, AnalysisError> {
        let sheet = project
            .sheet(name)
            .ok_or_else(|| AnalysisError::UnknownSheet(name.to_string()))?;
        Ok(Self::for_sheet(project, sheet))
    }

    /// A frame with no root yet. `analyze` fails until one is set.
    pub fn unrooted(project: &'p Project) -> Self {
        Self {
            project,
            root: None,
            dependencies: DependencySets::default(),
            unresolved_links: BTreeSet::new(),
        }
    }

    pub fn root_at_scene(mut self, scene: &'p Scene) -> Self {
        self.root = Some(LinkTarget::Scene(scene));
        self
    }

    pub fn root_at_sheet(mut self, sheet: &'p ExternalSheet) -> Self {
        self.root = Some(LinkTarget::Sheet(sheet));
        self
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn root(&self) -> Option<AnalysisRoot<'p>> {
        self.root
    }

    /// Walk the root's events and collect every dependency.
    ///
    /// Each call recomputes from scratch. On a cycle the result sets are
    /// left empty.
    pub fn analyze(&mut self) -> Result<&DependencySets, AnalysisError> {
        self.dependencies = DependencySets::default();
        self.unresolved_links.clear();

        let Some(root) = self.root else {
            tracing::error!("dependency analysis called without any scene or external sheet");
            return Err(AnalysisError::MissingRoot);
        };

        let kind = LinkKind::of(&root);
        let context = match root {
            LinkTarget::Scene(scene) => TraversalContext::from_scene(scene.name()),
            LinkTarget::Sheet(sheet) => TraversalContext::from_sheet(sheet.name()),
        };
        tracing::debug!(%kind, root = root.name(), "analyzing dependencies");

        let mut traversal = Traversal::new(self.project, context);
        match traversal.walk(root.events(), true) {
            Ok(delta) => {
                self.dependencies = delta.dependencies;
                self.unresolved_links = delta.unresolved_links;
                Ok(&self.dependencies)
            }
            Err(error) => {
                tracing::info!(%kind, root = root.name(), %error, "dependency analysis failed");
                Err(error)
            }
        }
    }

    /// `analyze` reduced to a verdict: `false` on cycles and misuse.
    pub fn is_acyclic(&mut self) -> bool {
        self.analyze().is_ok()
    }

    /// Result sets of the last successful `analyze`.
    pub fn dependencies(&self) -> &DependencySets {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> DependencySets {
        self.dependencies
    }

    /// Link targets of the last `analyze` that matched nothing.
    pub fn unresolved_links(&self) -> &BTreeSet<String> {
        &self.unresolved_links
    }
}
