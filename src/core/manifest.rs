//! Reference manifest produced by the upstream query analysis.
//!
//! The manifest carries everything this tool does not discover by itself:
//! which query fields are multi-valued, and where each field is referenced.
//!
//! ```json
//! {
//!   "knownQueryFields": { "src/a.ts@A.items": { "isMulti": true } },
//!   "references": [
//!     { "kind": "ts", "target": { "key": "src/a.ts@A.items" }, "file": "src/a.ts", "start": 120, "end": 125 }
//!   ]
//! }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{
    data::{ClassFieldDescriptor, CompilationUnitData, TextSpan},
    expression::TemplateExpr,
};

pub const DEFAULT_MANIFEST_FILE: &str = "queryshift.refs.json";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceManifest {
    #[serde(flatten)]
    pub metadata: CompilationUnitData,
    /// Entries of a known kind, in manifest order.
    #[serde(default)]
    pub references: Vec<ReferenceEntry>,
    /// Entries whose `kind` is not one of ours; dropped by [`parse_manifest`].
    #[serde(skip)]
    pub unknown_kinds: usize,
}

/// One serialized reference. Files are relative to the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ReferenceEntry {
    Ts {
        target: ClassFieldDescriptor,
        file: String,
        /// Byte offsets of the field identifier in `file`.
        start: u32,
        end: u32,
    },
    Template {
        target: ClassFieldDescriptor,
        template_file: String,
        read: TextSpan,
        expression: TemplateExpr,
    },
    HostBinding {
        target: ClassFieldDescriptor,
        file: String,
        /// Byte offset of the opening delimiter of the host property string.
        host_property_start: u32,
        read: TextSpan,
        expression: TemplateExpr,
    },
    /// A reference kind this tool does not handle yet.
    #[serde(other)]
    Unknown,
}

impl ReferenceEntry {
    /// The file the reference lives in.
    pub fn file(&self) -> Option<&str> {
        match self {
            ReferenceEntry::Ts { file, .. } | ReferenceEntry::HostBinding { file, .. } => {
                Some(file)
            }
            ReferenceEntry::Template { template_file, .. } => Some(template_file),
            ReferenceEntry::Unknown => None,
        }
    }

    /// True when the file has to be parsed as TypeScript.
    pub fn needs_ts_source(&self) -> bool {
        matches!(
            self,
            ReferenceEntry::Ts { .. } | ReferenceEntry::HostBinding { .. }
        )
    }
}

/// Parse a manifest, dropping entries of unknown kind.
///
/// Malformed entries of a known kind are still an error.
pub fn parse_manifest(content: &str) -> Result<ReferenceManifest> {
    let mut manifest: ReferenceManifest =
        serde_json::from_str(content).context("Invalid reference manifest")?;
    let total = manifest.references.len();
    manifest
        .references
        .retain(|entry| !matches!(entry, ReferenceEntry::Unknown));
    manifest.unknown_kinds = total - manifest.references.len();
    Ok(manifest)
}

pub fn load_manifest(path: &Path) -> Result<ReferenceManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference manifest: {}", path.display()))?;
    parse_manifest(&content)
        .with_context(|| format!("Failed to parse reference manifest: {}", path.display()))
}
