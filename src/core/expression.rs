//! Lightweight expression tree for template and host-binding expressions.
//!
//! Templates and host bindings are parsed upstream and handed over in this
//! shape. Every `span` is expressed in the coordinate system of the owning
//! expression; the reference that carries the tree knows how to map it back to
//! a physical file (see `crate::core::reference`).

use serde::{Deserialize, Serialize};

use crate::core::data::TextSpan;

/// `receiver.name`, or `name` against the implicit component receiver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRead {
    pub span: TextSpan,
    pub name_span: TextSpan,
    pub name: String,
    pub receiver: Box<TemplateExpr>,
}

/// `receiver[key]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyedRead {
    pub span: TextSpan,
    pub receiver: Box<TemplateExpr>,
    pub key: Box<TemplateExpr>,
}

/// `receiver(args...)`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Call {
    pub span: TextSpan,
    pub receiver: Box<TemplateExpr>,
    #[serde(default)]
    pub args: Vec<TemplateExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Binary {
    pub span: TextSpan,
    pub operation: String,
    pub left: Box<TemplateExpr>,
    pub right: Box<TemplateExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub span: TextSpan,
    pub condition: Box<TemplateExpr>,
    pub true_exp: Box<TemplateExpr>,
    pub false_exp: Box<TemplateExpr>,
}

/// `exp | name:arg1:arg2`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingPipe {
    pub span: TextSpan,
    pub name: String,
    pub exp: Box<TemplateExpr>,
    #[serde(default)]
    pub args: Vec<TemplateExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplateExpr {
    ImplicitReceiver {
        span: TextSpan,
    },
    ThisReceiver {
        span: TextSpan,
    },
    PropertyRead(PropertyRead),
    /// `receiver?.name`
    SafePropertyRead(PropertyRead),
    KeyedRead(KeyedRead),
    Call(Call),
    /// `receiver?.(args...)`
    SafeCall(Call),
    LiteralPrimitive {
        span: TextSpan,
        #[serde(default)]
        value: serde_json::Value,
    },
    Binary(Binary),
    PrefixNot {
        span: TextSpan,
        expression: Box<TemplateExpr>,
    },
    Conditional(Conditional),
    Pipe(BindingPipe),
    Interpolation {
        span: TextSpan,
        #[serde(default)]
        expressions: Vec<TemplateExpr>,
    },
}

impl TemplateExpr {
    pub fn span(&self) -> TextSpan {
        match self {
            TemplateExpr::ImplicitReceiver { span }
            | TemplateExpr::ThisReceiver { span }
            | TemplateExpr::LiteralPrimitive { span, .. }
            | TemplateExpr::PrefixNot { span, .. }
            | TemplateExpr::Interpolation { span, .. } => *span,
            TemplateExpr::PropertyRead(read) | TemplateExpr::SafePropertyRead(read) => read.span,
            TemplateExpr::KeyedRead(read) => read.span,
            TemplateExpr::Call(call) | TemplateExpr::SafeCall(call) => call.span,
            TemplateExpr::Binary(binary) => binary.span,
            TemplateExpr::Conditional(cond) => cond.span,
            TemplateExpr::Pipe(pipe) => pipe.span,
        }
    }

    /// Direct sub-expressions, receivers first.
    pub fn children(&self) -> Vec<&TemplateExpr> {
        match self {
            TemplateExpr::ImplicitReceiver { .. }
            | TemplateExpr::ThisReceiver { .. }
            | TemplateExpr::LiteralPrimitive { .. } => Vec::new(),
            TemplateExpr::PropertyRead(read) | TemplateExpr::SafePropertyRead(read) => {
                vec![&*read.receiver]
            }
            TemplateExpr::KeyedRead(read) => vec![&*read.receiver, &*read.key],
            TemplateExpr::Call(call) | TemplateExpr::SafeCall(call) => {
                std::iter::once(&*call.receiver).chain(&call.args).collect()
            }
            TemplateExpr::Binary(binary) => vec![&*binary.left, &*binary.right],
            TemplateExpr::PrefixNot { expression, .. } => vec![&**expression],
            TemplateExpr::Conditional(cond) => {
                vec![&*cond.condition, &*cond.true_exp, &*cond.false_exp]
            }
            TemplateExpr::Pipe(pipe) => std::iter::once(&*pipe.exp).chain(&pipe.args).collect(),
            TemplateExpr::Interpolation { expressions, .. } => expressions.iter().collect(),
        }
    }

    /// Largest end offset of any span in the tree, name spans included.
    pub fn max_end(&self) -> u32 {
        let own = match self {
            TemplateExpr::PropertyRead(read) | TemplateExpr::SafePropertyRead(read) => {
                read.span.end.max(read.name_span.end)
            }
            _ => self.span().end,
        };
        self.children()
            .into_iter()
            .map(TemplateExpr::max_end)
            .fold(own, u32::max)
    }

    /// The property read (plain or safe) whose node span is `span`, if this is one.
    pub fn as_read_at(&self, span: TextSpan) -> Option<&PropertyRead> {
        match self {
            TemplateExpr::PropertyRead(read) | TemplateExpr::SafePropertyRead(read)
                if read.span == span =>
            {
                Some(read)
            }
            _ => None,
        }
    }
}
