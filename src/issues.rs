//! Problems found while loading the inputs of a migration run.
//!
//! None of these abort the run: the affected references are skipped and the
//! rest of the batch is still planned.

use std::fmt;

use serde::Serialize;

/// Which kind of file failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadIssueKind {
    Source,
    Template,
}

impl fmt::Display for LoadIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadIssueKind::Source => f.write_str("source"),
            LoadIssueKind::Template => f.write_str("template"),
        }
    }
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadIssue {
    pub file_path: String,
    pub kind: LoadIssueKind,
    pub error: String,
}

/// A manifest entry that could not be turned into a reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedReference {
    pub file_path: String,
    pub reason: String,
}
