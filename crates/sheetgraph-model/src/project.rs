//! Canonical in-memory project: uniquely named scenes and external sheets.
//!
//! This is the read-only boundary the analyzer queries:
//! - enumerate scenes by count/index, enumerate sheets
//! - look scenes and sheets up by name
//! - resolve link targets (sheets before scenes)
//! - derive the implicit generated source file of a code event

use crate::event::{CodeGenEvent, EventNode};
use crate::sheet::{EventSheet, ExternalSheet, Scene};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors raised while assembling a project.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("duplicate scene name: {0}")]
    DuplicateScene(String),

    #[error("duplicate external sheet name: {0}")]
    DuplicateSheet(String),
}

/// How the generated source file of a code event is named.
///
/// The file is `[directory/]<prefix><event id>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ManagedSourceNaming {
    pub directory: String,
    pub prefix: String,
    pub extension: String,
}

impl Default for ManagedSourceNaming {
    fn default() -> Self {
        Self {
            directory: String::new(),
            prefix: "GDpriv".to_string(),
            extension: "cpp".to_string(),
        }
    }
}

impl ManagedSourceNaming {
    pub fn file_for(&self, event_id: &str) -> String {
        let mut file = format!("{}{}", self.prefix, event_id);
        if !self.extension.is_empty() {
            file.push('.');
            file.push_str(self.extension.trim_start_matches('.'));
        }
        let directory = self.directory.trim_end_matches('/');
        if directory.is_empty() {
            file
        } else {
            format!("{directory}/{file}")
        }
    }
}

/// What a link target name resolved to.
#[derive(Debug, Clone, Copy)]
pub enum LinkTarget<'p> {
    Sheet(&'p ExternalSheet),
    Scene(&'p Scene),
}

impl<'p> LinkTarget<'p> {
    pub fn name(&self) -> &'p str {
        match self {
            LinkTarget::Sheet(sheet) => &sheet.name,
            LinkTarget::Scene(scene) => &scene.name,
        }
    }

    pub fn events(&self) -> &'p [EventNode] {
        match self {
            LinkTarget::Sheet(sheet) => sheet.events(),
            LinkTarget::Scene(scene) => scene.events(),
        }
    }
}

/// A project: scenes and external sheets, each unique within its own kind.
///
/// A scene and a sheet may share a name; link resolution prefers the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProjectData", into = "ProjectData")]
pub struct Project {
    name: String,
    source_naming: ManagedSourceNaming,
    scenes: Vec<Scene>,
    external_sheets: Vec<ExternalSheet>,
    scene_index: BTreeMap<String, usize>,
    sheet_index: BTreeMap<String, usize>,
}

impl Project {
    /// Build a project, rejecting duplicate names within scenes or sheets.
    pub fn new(
        name: impl Into<String>,
        scenes: Vec<Scene>,
        external_sheets: Vec<ExternalSheet>,
    ) -> Result<Self, ProjectError> {
        let mut scene_index = BTreeMap::new();
        for (i, scene) in scenes.iter().enumerate() {
            if scene_index.insert(scene.name.clone(), i).is_some() {
                return Err(ProjectError::DuplicateScene(scene.name.clone()));
            }
        }
        let mut sheet_index = BTreeMap::new();
        for (i, sheet) in external_sheets.iter().enumerate() {
            if sheet_index.insert(sheet.name.clone(), i).is_some() {
                return Err(ProjectError::DuplicateSheet(sheet.name.clone()));
            }
        }
        Ok(Self {
            name: name.into(),
            source_naming: ManagedSourceNaming::default(),
            scenes,
            external_sheets,
            scene_index,
            sheet_index,
        })
    }

    /// Replace the naming policy for generated source files.
    pub fn with_source_naming(mut self, naming: ManagedSourceNaming) -> Self {
        self.source_naming = naming;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_naming(&self) -> &ManagedSourceNaming {
        &self.source_naming
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn scene_at(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Iterate scenes in project order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn sheet_count(&self) -> usize {
        self.external_sheets.len()
    }

    /// Iterate external sheets in project order.
    pub fn sheets(&self) -> impl Iterator<Item = &ExternalSheet> {
        self.external_sheets.iter()
    }

    pub fn has_scene_named(&self, name: &str) -> bool {
        self.scene_index.contains_key(name)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        let index = *self.scene_index.get(name)?;
        self.scenes.get(index)
    }

    pub fn has_sheet_named(&self, name: &str) -> bool {
        self.sheet_index.contains_key(name)
    }

    pub fn sheet(&self, name: &str) -> Option<&ExternalSheet> {
        let index = *self.sheet_index.get(name)?;
        self.external_sheets.get(index)
    }

    /// Resolve a link target: external sheets first, then scenes.
    pub fn resolve_link(&self, target: &str) -> Option<LinkTarget<'_>> {
        if let Some(sheet) = self.sheet(target) {
            return Some(LinkTarget::Sheet(sheet));
        }
        self.scene(target).map(LinkTarget::Scene)
    }

    /// The generated source file implicitly owned by a code event.
    pub fn managed_source_file(&self, event: &CodeGenEvent) -> String {
        self.source_naming.file_for(&event.id)
    }
}

/// Stored shape of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    source_naming: ManagedSourceNaming,
    #[serde(default)]
    scenes: Vec<Scene>,
    #[serde(default)]
    external_sheets: Vec<ExternalSheet>,
}

impl TryFrom<ProjectData> for Project {
    type Error = ProjectError;

    fn try_from(data: ProjectData) -> Result<Self, Self::Error> {
        let project = Project::new(data.name, data.scenes, data.external_sheets)?;
        Ok(project.with_source_naming(data.source_naming))
    }
}

impl From<Project> for ProjectData {
    fn from(project: Project) -> Self {
        ProjectData {
            name: project.name,
            source_naming: project.source_naming,
            scenes: project.scenes,
            external_sheets: project.external_sheets,
        }
    }
}
