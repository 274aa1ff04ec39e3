//! The five accumulating result sets of one analysis.

use crate::error::LinkKind;
use serde::Serialize;
use std::collections::BTreeSet;

/// Dependencies reached from one analysis root.
///
/// `not_top_level_scenes ⊆ scenes` and `not_top_level_sheets ⊆ sheets`
/// always hold. Sets only grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySets {
    scenes: BTreeSet<String>,
    sheets: BTreeSet<String>,
    source_files: BTreeSet<String>,
    not_top_level_scenes: BTreeSet<String>,
    not_top_level_sheets: BTreeSet<String>,
}

impl DependencySets {
    pub fn scenes(&self) -> &BTreeSet<String> {
        &self.scenes
    }

    pub fn sheets(&self) -> &BTreeSet<String> {
        &self.sheets
    }

    pub fn source_files(&self) -> &BTreeSet<String> {
        &self.source_files
    }

    pub fn not_top_level_scenes(&self) -> &BTreeSet<String> {
        &self.not_top_level_scenes
    }

    pub fn not_top_level_sheets(&self) -> &BTreeSet<String> {
        &self.not_top_level_sheets
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty() && self.sheets.is_empty() && self.source_files.is_empty()
    }

    /// All dependencies of `kind`.
    pub fn of_kind(&self, kind: LinkKind) -> &BTreeSet<String> {
        match kind {
            LinkKind::Scene => &self.scenes,
            LinkKind::Sheet => &self.sheets,
        }
    }

    /// Dependencies of `kind` reached at least once from a nested position.
    pub fn nested_of_kind(&self, kind: LinkKind) -> &BTreeSet<String> {
        match kind {
            LinkKind::Scene => &self.not_top_level_scenes,
            LinkKind::Sheet => &self.not_top_level_sheets,
        }
    }

    /// Whether `name` is reached, and only ever by outer-level links.
    pub fn is_top_level_only(&self, kind: LinkKind, name: &str) -> bool {
        self.of_kind(kind).contains(name) && !self.nested_of_kind(kind).contains(name)
    }

    pub(crate) fn record_link(&mut self, kind: LinkKind, name: &str, top_level: bool) {
        let (all, nested) = match kind {
            LinkKind::Scene => (&mut self.scenes, &mut self.not_top_level_scenes),
            LinkKind::Sheet => (&mut self.sheets, &mut self.not_top_level_sheets),
        };
        all.insert(name.to_string());
        if !top_level {
            nested.insert(name.to_string());
        }
    }

    pub(crate) fn record_source_file(&mut self, file: impl Into<String>) {
        self.source_files.insert(file.into());
    }

    /// Union every set of `other` into the matching set of `self`.
    pub(crate) fn merge(&mut self, other: DependencySets) {
        self.scenes.extend(other.scenes);
        self.sheets.extend(other.sheets);
        self.source_files.extend(other.source_files);
        self.not_top_level_scenes.extend(other.not_top_level_scenes);
        self.not_top_level_sheets.extend(other.not_top_level_sheets);
    }

    /// Treat every scene and sheet of `other` as reached from a nested
    /// position.
    pub(crate) fn merge_as_nested(&mut self, other: &DependencySets) {
        self.not_top_level_scenes.extend(other.scenes.iter().cloned());
        self.not_top_level_sheets.extend(other.sheets.iter().cloned());
    }
}
