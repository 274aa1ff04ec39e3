//! Project-wide cycle scan: every scene and every sheet as a root.

use crate::analyzer::DependencyAnalyzer;
use crate::error::{AnalysisError, LinkKind};
use serde::Serialize;
use sheetgraph_model::Project;

/// A root whose traversal re-entered a name on its own path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub root_kind: LinkKind,
    pub root: String,
    pub target_kind: LinkKind,
    pub target: String,
    /// Ancestor chain of `target_kind` at the moment of detection.
    pub chain: Vec<String>,
}

fn cycle_of(
    root_kind: LinkKind,
    root: &str,
    result: Result<(), AnalysisError>,
) -> Option<CycleReport> {
    match result {
        Err(AnalysisError::CyclicDependency {
            kind,
            target,
            chain,
        }) => Some(CycleReport {
            root_kind,
            root: root.to_string(),
            target_kind: kind,
            target,
            chain,
        }),
        Ok(()) | Err(_) => None,
    }
}

/// Scenes first, then sheets, each in project order.
pub fn find_cycles(project: &Project) -> Vec<CycleReport> {
    let scenes = project.scenes().filter_map(|scene| {
        let mut analyzer = DependencyAnalyzer::for_scene(project, scene);
        cycle_of(LinkKind::Scene, &scene.name, analyzer.analyze().map(|_| ()))
    });
    let sheets = project.sheets().filter_map(|sheet| {
        let mut analyzer = DependencyAnalyzer::for_sheet(project, sheet);
        cycle_of(LinkKind::Sheet, &sheet.name, analyzer.analyze().map(|_| ()))
    });
    let cycles: Vec<CycleReport> = scenes.chain(sheets).collect();
    if !cycles.is_empty() {
        tracing::info!(count = cycles.len(), "cyclic roots found");
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetgraph_model::{EventNode, ExternalSheet, Scene};

    #[test]
    fn every_root_on_a_cycle_is_reported() {
        let project = Project::new(
            "test",
            vec![
                Scene::new("Clean", vec![EventNode::link("Leaf")]),
                Scene::new("Dirty", vec![EventNode::link("A")]),
            ],
            vec![
                ExternalSheet::new("A", vec![EventNode::link("B")]),
                ExternalSheet::new("B", vec![EventNode::link("A")]),
                ExternalSheet::new("Leaf", vec![]),
            ],
        )
        .expect("project should build");

        let cycles = find_cycles(&project);
        let roots: Vec<(LinkKind, &str)> = cycles
            .iter()
            .map(|cycle| (cycle.root_kind, cycle.root.as_str()))
            .collect();
        assert_eq!(
            roots,
            vec![
                (LinkKind::Scene, "Dirty"),
                (LinkKind::Sheet, "A"),
                (LinkKind::Sheet, "B"),
            ]
        );
        assert_eq!(cycles[0].target, "A");
        assert_eq!(cycles[0].chain, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn acyclic_project_reports_nothing() {
        let project = Project::new(
            "test",
            vec![Scene::new("S", vec![EventNode::link("A"), EventNode::link("A")])],
            vec![ExternalSheet::new("A", vec![])],
        )
        .expect("project should build");
        assert!(find_cycles(&project).is_empty());
    }
}
