use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

/// Stable identity of a class field across the compilation unit.
///
/// Produced upstream, e.g. `src/app/list.component.ts@ListComponent.items`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared class field that hosts a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ClassFieldDescriptor {
    pub key: FieldKey,
}

impl ClassFieldDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: FieldKey::new(key),
        }
    }
}

/// What the upstream query analysis knows about a single query field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFieldInfo {
    /// The query resolves to a `QueryList` rather than a single element.
    #[serde(default)]
    pub is_multi: bool,
}

/// Metadata shared by every reference of a compilation unit.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationUnitData {
    #[serde(default)]
    pub known_query_fields: HashMap<FieldKey, QueryFieldInfo>,
}

impl CompilationUnitData {
    /// Returns true only when the field is known and flagged as multi.
    ///
    /// Missing keys are treated the same as single-valued queries.
    pub fn is_multi_query(&self, key: &FieldKey) -> bool {
        self.known_query_fields
            .get(key)
            .is_some_and(|info| info.is_multi)
    }
}
