//! Exclusive-owner eligibility: can an external sheet be compiled once, as a
//! standalone module, for exactly one scene?
//!
//! A scene owns sheet `X` when its analysis succeeds, `X` is among its sheet
//! dependencies, and every path reaching `X` is an outer-level link. The
//! sheet is eligible only if exactly one scene owns it. Scenes whose
//! analysis hits a cycle are skipped, not reported as failures.

use crate::analyzer::DependencyAnalyzer;
use crate::error::{AnalysisError, LinkKind};
use crate::sets::DependencySets;
use rayon::prelude::*;
use serde::Serialize;
use sheetgraph_model::{Project, Scene};
use std::borrow::Borrow;

/// How the per-scene analyses are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityOptions {
    /// Analyze scenes on the rayon pool. The verdict is still decided in
    /// project scene order, so it matches a sequential run.
    pub parallel: bool,
}

impl EligibilityOptions {
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityVerdict {
    /// Exactly one scene includes the sheet, only at top level.
    Exclusive { scene: String },
    /// No scene includes the sheet at top level only.
    NoOwner,
    /// At least two scenes qualify; the first two found are named.
    MultipleOwners { first: String, second: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    pub sheet: String,
    pub verdict: EligibilityVerdict,
    /// Scenes examined before the verdict whose analysis found a cycle.
    pub skipped_cyclic_scenes: Vec<String>,
}

impl EligibilityReport {
    /// The unique owning scene, if any.
    pub fn owner(&self) -> Option<&str> {
        match &self.verdict {
            EligibilityVerdict::Exclusive { scene } => Some(scene),
            EligibilityVerdict::NoOwner | EligibilityVerdict::MultipleOwners { .. } => None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.owner().is_some()
    }
}

/// Analysis outcome of one scene, reused across sheets.
enum SceneOutcome {
    Cyclic,
    Analyzed(DependencySets),
}

fn analyze_scene(project: &Project, scene: &Scene) -> SceneOutcome {
    let mut analyzer = DependencyAnalyzer::for_scene(project, scene);
    if analyzer.analyze().is_ok() {
        SceneOutcome::Analyzed(analyzer.into_dependencies())
    } else {
        SceneOutcome::Cyclic
    }
}

fn analyze_all_scenes<'p>(
    project: &'p Project,
    options: &EligibilityOptions,
) -> Vec<(&'p Scene, SceneOutcome)> {
    if options.parallel {
        let scenes: Vec<&Scene> = project.scenes().collect();
        scenes
            .into_par_iter()
            .map(|scene| (scene, analyze_scene(project, scene)))
            .collect()
    } else {
        project
            .scenes()
            .map(|scene| (scene, analyze_scene(project, scene)))
            .collect()
    }
}

/// Walk scene outcomes in project order and stop at the second owner.
fn decide<'s, I, O>(sheet: &str, outcomes: I) -> EligibilityReport
where
    I: IntoIterator<Item = (&'s Scene, O)>,
    O: Borrow<SceneOutcome>,
{
    let mut owner: Option<&str> = None;
    let mut skipped_cyclic_scenes = Vec::new();

    for (scene, outcome) in outcomes {
        let deps = match outcome.borrow() {
            SceneOutcome::Cyclic => {
                skipped_cyclic_scenes.push(scene.name.clone());
                continue;
            }
            SceneOutcome::Analyzed(deps) => deps,
        };
        if !deps.is_top_level_only(LinkKind::Sheet, sheet) {
            continue;
        }
        if let Some(first) = owner {
            tracing::debug!(sheet, first, second = %scene.name, "sheet has several owners");
            return EligibilityReport {
                sheet: sheet.to_string(),
                verdict: EligibilityVerdict::MultipleOwners {
                    first: first.to_string(),
                    second: scene.name.clone(),
                },
                skipped_cyclic_scenes,
            };
        }
        owner = Some(&scene.name);
    }

    let verdict = match owner {
        Some(scene) => EligibilityVerdict::Exclusive {
            scene: scene.to_string(),
        },
        None => EligibilityVerdict::NoOwner,
    };
    EligibilityReport {
        sheet: sheet.to_string(),
        verdict,
        skipped_cyclic_scenes,
    }
}

/// Decide whether `sheet` can be compiled as an exclusive module.
pub fn check_eligibility(
    project: &Project,
    sheet: &str,
    options: &EligibilityOptions,
) -> Result<EligibilityReport, AnalysisError> {
    if !project.has_sheet_named(sheet) {
        tracing::error!(
            sheet,
            "eligibility check called for an unknown external sheet"
        );
        return Err(AnalysisError::UnknownSheet(sheet.to_string()));
    }

    let report = if options.parallel {
        decide(sheet, analyze_all_scenes(project, options))
    } else {
        // Lazy, so analysis stops at the second owner.
        decide(
            sheet,
            project
                .scenes()
                .map(|scene| (scene, analyze_scene(project, scene))),
        )
    };
    tracing::debug!(sheet, verdict = ?report.verdict, "eligibility decided");
    Ok(report)
}

/// One report per external sheet, in project order. Each scene is analyzed once.
pub fn check_all_sheets(project: &Project, options: &EligibilityOptions) -> Vec<EligibilityReport> {
    let outcomes = analyze_all_scenes(project, options);
    project
        .sheets()
        .map(|sheet| {
            decide(
                &sheet.name,
                outcomes.iter().map(|(scene, outcome)| (*scene, outcome)),
            )
        })
        .collect()
}

/// The scene that exclusively owns `sheet`, or `None` when the sheet is
/// unknown, unused, nested, or shared.
pub fn exclusive_scene_for<'p>(project: &'p Project, sheet: &str) -> Option<&'p Scene> {
    let report = check_eligibility(project, sheet, &EligibilityOptions::sequential()).ok()?;
    project.scene(report.owner()?)
}
