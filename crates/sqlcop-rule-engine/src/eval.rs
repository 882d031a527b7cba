//! Constant expression evaluator.
//!
//! Evaluation is deliberately partial: literals and single-level
//! module-constant references reduce to a typed value, everything else is
//! [`ValueKind::Unknown`]. The function is total: unevaluable input
//! degrades to `Unknown` instead of erroring, because an analysis pass must
//! never abort a compilation over its own limitations.

use serde::Serialize;
use sqlcop_core::{NodeKind, SemanticModel, SemanticNode, SourceSpan};

/// The statically known value of an expression, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueKind {
    /// An integer value.
    Integer(i64),
    /// A decimal value.
    Decimal(f64),
    /// A string value, or a fully-qualified type name for type references.
    String(String),
    /// A boolean value.
    Boolean(bool),
    /// Not statically known.
    Unknown,
}

/// Result of evaluating one expression node.
///
/// The span is always the *evaluated expression's* span: a constant
/// reference yields the constant's value but the reference's location, so
/// diagnostics attach to the offending argument, not the declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedValue {
    /// The reduced value.
    pub kind: ValueKind,
    /// Source location of the evaluated expression.
    pub span: SourceSpan,
}

impl EvaluatedValue {
    /// Whether evaluation produced a concrete value.
    pub fn is_known(&self) -> bool {
        self.kind != ValueKind::Unknown
    }
}

/// Reduce a bound expression node to a typed literal value, or `Unknown`.
///
/// Recognized shapes:
/// - literal nodes, directly;
/// - type references, as the fully-qualified type name string;
/// - identifiers bound to a module-level constant whose initializer is
///   itself a literal, with exactly one level of indirection and no folding
///   through chained constants or arithmetic.
///
/// Evaluating the same node twice always yields the same value; the model
/// is immutable and evaluation reads nothing else.
pub fn evaluate(model: &SemanticModel, node: &SemanticNode) -> EvaluatedValue {
    let kind = match &node.kind {
        NodeKind::IntLiteral(v) => ValueKind::Integer(*v),
        NodeKind::DecimalLiteral(v) => ValueKind::Decimal(*v),
        NodeKind::StringLiteral(v) => ValueKind::String(v.clone()),
        NodeKind::BooleanLiteral(v) => ValueKind::Boolean(*v),
        NodeKind::TypeRef(name) => ValueKind::String(name.clone()),
        NodeKind::ConstRef(name) => constant_value(model, name),
        NodeKind::Call { .. } | NodeKind::Opaque => ValueKind::Unknown,
    };
    EvaluatedValue {
        kind,
        span: node.span.clone(),
    }
}

/// Resolve one module-constant indirection. Anything but a literal
/// initializer (another constant, a computed expression, a missing
/// definition) is `Unknown`.
fn constant_value(model: &SemanticModel, name: &str) -> ValueKind {
    let Some(init_id) = model.constant(name) else {
        return ValueKind::Unknown;
    };
    let Ok(init) = model.node(init_id) else {
        return ValueKind::Unknown;
    };
    match &init.kind {
        NodeKind::IntLiteral(v) => ValueKind::Integer(*v),
        NodeKind::DecimalLiteral(v) => ValueKind::Decimal(*v),
        NodeKind::StringLiteral(v) => ValueKind::String(v.clone()),
        NodeKind::BooleanLiteral(v) => ValueKind::Boolean(*v),
        _ => ValueKind::Unknown,
    }
}
