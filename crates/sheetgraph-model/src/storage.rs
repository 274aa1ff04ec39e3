//! Project file storage: one JSON document per project.

use crate::project::Project;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read a project from a JSON reader.
pub fn read_project(mut reader: impl Read) -> Result<Project, ProjectFileError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ProjectFileError::Io(e.to_string()))?;
    parse_project_bytes("<reader>", &bytes)
}

/// Read a project from a file path.
pub fn read_project_from_path(path: impl AsRef<Path>) -> Result<Project, ProjectFileError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| ProjectFileError::Io(format!("{}: {e}", path.display())))?;
    parse_project_bytes(&path.display().to_string(), &bytes)
}

fn parse_project_bytes(origin: &str, bytes: &[u8]) -> Result<Project, ProjectFileError> {
    if bytes.contains(&0) {
        return Err(ProjectFileError::Corrupt(format!(
            "{origin}: contains NUL byte(s)"
        )));
    }
    let text = std::str::from_utf8(bytes).map_err(|_| {
        ProjectFileError::Corrupt(format!("{origin}: contains non-UTF-8 byte sequence(s)"))
    })?;
    serde_json::from_str(text).map_err(|e| ProjectFileError::Parse {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}

/// Errors from project file operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectFileError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("line {line}, column {column}: parse error: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("corrupted project file: {0}")]
    Corrupt(String),
}
