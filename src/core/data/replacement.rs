use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)`.
///
/// Whether the range is file-absolute or relative to an embedded expression
/// depends on where it is stored; see `Reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct TextSpan {
    pub start: u32,
    pub end: u32,
}

impl TextSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Shift both ends by `offset`, or `None` if either end overflows.
    pub fn checked_offset_by(self, offset: u32) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add(offset)?,
            end: self.end.checked_add(offset)?,
        })
    }
}

/// A file identity relative to the project root, always `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProjectFile(String);

impl ProjectFile {
    pub fn new(root_relative_path: impl Into<String>) -> Self {
        Self(root_relative_path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Program-wide information needed to address files.
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub root_dir: PathBuf,
}

impl ProgramInfo {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Map a raw file path to its project-relative identity.
    ///
    /// Paths outside the root are kept as given (normalized), so they never
    /// collide with files inside the project.
    pub fn project_file(&self, path: &Path) -> ProjectFile {
        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
            })
            .collect();
        ProjectFile(parts.join("/"))
    }

    /// Resolve a project file back to a path on disk.
    pub fn resolve(&self, file: &ProjectFile) -> PathBuf {
        self.root_dir.join(file.as_str())
    }
}

/// Overwrite `[position, end)` with `to_insert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextUpdate {
    pub position: u32,
    pub end: u32,
    pub to_insert: String,
}

impl TextUpdate {
    pub fn new(span: TextSpan, to_insert: impl Into<String>) -> Self {
        Self {
            position: span.start,
            end: span.end,
            to_insert: to_insert.into(),
        }
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.position, self.end)
    }
}

/// A text update bound to the file it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub file: ProjectFile,
    pub update: TextUpdate,
}

impl Replacement {
    pub fn new(file: ProjectFile, update: TextUpdate) -> Self {
        Self { file, update }
    }
}
