//! Call-expression shape checks.
//!
//! Both checkers answer the same question for different trees: is the
//! reference the receiver of `<reference>.<name>(...)`? A plain read
//! (`items.get`), an assignment or a different member name does not count.
//! Member names are compared exactly.

use swc_common::Span;
use swc_ecma_ast::{
    CallExpr, Callee, Expr, IdentName, MemberExpr, MemberProp, OptCall, OptChainBase,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{
    data::TextSpan,
    expression::{Call, PropertyRead, TemplateExpr},
    parsers::ParsedSource,
    reference::{Reference, TsReference},
};

/// A qualifying method call found in TypeScript source.
#[derive(Debug, Clone)]
pub struct TsMethodCall {
    /// Span of the whole call, `this.items.get(0)`.
    pub span: Span,
    /// The reference access, `this.items`.
    pub receiver: Box<Expr>,
    /// The invoked member name, `get`.
    pub name: IdentName,
}

/// A qualifying method call found in a template or host-binding expression.
#[derive(Debug, Clone, Copy)]
pub struct TemplateMethodCall<'a> {
    pub call: &'a Call,
    /// The `PropertyRead` of the invoked member; its `name_span` is what gets renamed.
    pub receiver: &'a PropertyRead,
}

/// Find `<reference>.<name>(...)` where `<reference>` is the TS usage.
pub fn check_ts_reference_is_part_of_call_expression(
    reference: &TsReference,
    name: &str,
) -> Option<TsMethodCall> {
    let mut finder = MethodCallFinder {
        source: &reference.source,
        node: reference.node,
        name,
        found: None,
    };
    reference.source.module.visit_with(&mut finder);
    finder.found
}

/// Find `<read>.<name>(...)` inside a template or host-binding expression.
///
/// Returns `None` for TS references.
pub fn check_non_ts_reference_is_part_of_call_expression<'a>(
    reference: &'a Reference,
    name: &str,
) -> Option<TemplateMethodCall<'a>> {
    let (expression, read) = reference.as_non_ts()?;
    find_template_method_call(expression, read, name)
}

fn find_template_method_call<'a>(
    expr: &'a TemplateExpr,
    read: TextSpan,
    name: &str,
) -> Option<TemplateMethodCall<'a>> {
    if let TemplateExpr::Call(call) = expr
        && let TemplateExpr::PropertyRead(access) = &*call.receiver
        && access.name == name
        && access.receiver.as_read_at(read).is_some()
    {
        return Some(TemplateMethodCall {
            call,
            receiver: access,
        });
    }

    expr.children()
        .into_iter()
        .find_map(|child| find_template_method_call(child, read, name))
}

struct MethodCallFinder<'a> {
    source: &'a ParsedSource,
    /// File-relative span of the field identifier.
    node: TextSpan,
    name: &'a str,
    found: Option<TsMethodCall>,
}

impl MethodCallFinder<'_> {
    /// `this.items` or a bare `items` whose name token is the reference node.
    fn is_reference_access(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Ident(ident) => self.source.relative_span(ident.span) == self.node,
            Expr::Member(MemberExpr {
                prop: MemberProp::Ident(prop),
                ..
            }) => self.source.relative_span(prop.span) == self.node,
            _ => false,
        }
    }

    fn check_callee(&mut self, call_span: Span, callee: &Expr) {
        if self.found.is_some() {
            return;
        }

        // `a.get()` is a plain member callee, `a?.get()` wraps it in an optional chain.
        let member = match callee {
            Expr::Member(member) => member,
            Expr::OptChain(chain) => match &*chain.base {
                OptChainBase::Member(member) => member,
                OptChainBase::Call(_) => return,
            },
            _ => return,
        };

        if let MemberProp::Ident(prop) = &member.prop
            && prop.sym.as_str() == self.name
            && self.is_reference_access(&member.obj)
        {
            self.found = Some(TsMethodCall {
                span: call_span,
                receiver: member.obj.clone(),
                name: prop.clone(),
            });
        }
    }
}

impl Visit for MethodCallFinder<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee {
            self.check_callee(node.span, callee);
        }
        if self.found.is_none() {
            node.visit_children_with(self);
        }
    }

    fn visit_opt_call(&mut self, node: &OptCall) {
        self.check_callee(node.span, &node.callee);
        if self.found.is_none() {
            node.visit_children_with(self);
        }
    }
}
