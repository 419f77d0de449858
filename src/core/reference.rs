//! Discovered usages of query fields, tagged by where they occur.
//!
//! A [`Reference`] is exactly one of:
//!
//! - [`TsReference`]: a usage in TypeScript source code
//! - [`TemplateReference`]: a usage inside a component template
//! - [`HostBindingReference`]: a usage inside a host-binding expression string

use std::sync::Arc;

use crate::core::{
    data::{ClassFieldDescriptor, ProjectFile, TextSpan},
    expression::TemplateExpr,
    parsers::ParsedSource,
};

/// Usage of a field in TypeScript source.
#[derive(Clone)]
pub struct TsReference {
    pub target: ClassFieldDescriptor,
    pub source: Arc<ParsedSource>,
    /// File-relative span of the identifier naming the field (`items` in `this.items`).
    pub node: TextSpan,
}

/// Usage of a field inside a component template.
///
/// Template expression spans are already addressed in template-file coordinates.
#[derive(Debug, Clone)]
pub struct TemplateReference {
    pub target: ClassFieldDescriptor,
    pub template_file: ProjectFile,
    pub expression: Arc<TemplateExpr>,
    /// Span of the property read that resolves to the field.
    pub read: TextSpan,
}

/// The string literal holding a host-binding expression, e.g. `'items.get(0)'`.
///
/// `span` is file-relative and includes the delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPropertyNode {
    pub span: TextSpan,
}

impl HostPropertyNode {
    /// Offset of the first character of the expression inside the literal.
    pub fn expression_start(&self) -> Option<u32> {
        self.span.start.checked_add(1)
    }

    /// Offset of the closing delimiter.
    pub fn expression_end(&self) -> u32 {
        self.span.end.saturating_sub(1)
    }
}

/// Usage of a field inside a host-binding expression.
///
/// Expression spans are relative to the expression text, which starts right
/// after the opening delimiter of `host_property`.
#[derive(Debug, Clone)]
pub struct HostBindingReference {
    pub target: ClassFieldDescriptor,
    pub file: ProjectFile,
    pub host_property: HostPropertyNode,
    pub expression: Arc<TemplateExpr>,
    pub read: TextSpan,
}

#[derive(Debug, Clone)]
pub enum Reference {
    Ts(TsReference),
    Template(TemplateReference),
    HostBinding(HostBindingReference),
}

impl Reference {
    pub fn target(&self) -> &ClassFieldDescriptor {
        match self {
            Reference::Ts(r) => &r.target,
            Reference::Template(r) => &r.target,
            Reference::HostBinding(r) => &r.target,
        }
    }

    pub fn as_ts(&self) -> Option<&TsReference> {
        match self {
            Reference::Ts(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&TemplateReference> {
        match self {
            Reference::Template(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_host_binding(&self) -> Option<&HostBindingReference> {
        match self {
            Reference::HostBinding(r) => Some(r),
            _ => None,
        }
    }

    /// Expression tree and read span, shared by template and host-binding usages.
    pub fn as_non_ts(&self) -> Option<(&TemplateExpr, TextSpan)> {
        match self {
            Reference::Template(r) => Some((&r.expression, r.read)),
            Reference::HostBinding(r) => Some((&r.expression, r.read)),
            Reference::Ts(_) => None,
        }
    }
}

pub fn is_ts_reference(reference: &Reference) -> bool {
    reference.as_ts().is_some()
}

pub fn is_template_reference(reference: &Reference) -> bool {
    reference.as_template().is_some()
}

pub fn is_host_binding_reference(reference: &Reference) -> bool {
    reference.as_host_binding().is_some()
}

impl std::fmt::Debug for TsReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsReference")
            .field("target", &self.target)
            .field("file", &self.source.path)
            .field("node", &self.node)
            .finish()
    }
}
