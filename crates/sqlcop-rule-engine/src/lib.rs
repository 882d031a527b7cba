//! Sqlcop Rule Engine - semantic validation of SQL client library usage.
//!
//! A post-binding analysis pass that validates connection-pool
//! configuration literals and stored-procedure OUT-parameter bindings
//! against a static rule table, reporting violations as structured
//! diagnostics without altering compiled output.
//!
//! # Architecture
//!
//! - **Expression evaluation** ([`eval`]): partial constant folding of
//!   argument expressions; unevaluable input degrades to `Unknown`
//! - **Call-site location** ([`locator`]): nominal matching of tracked API
//!   symbols, arguments mapped to declared fields
//! - **Rule table** ([`rules`]): static (API, field) → predicate/code/message
//!   rows; adding a constraint is a data change
//! - **Rule evaluation** ([`engine`]): predicates over evaluated arguments,
//!   one diagnostic per provable violation
//! - **Collection** ([`collector`]): package-wide accumulation and the single
//!   final (file, line, column) ordering
//!
//! # Example
//!
//! ```
//! use sqlcop_core::{Argument, NodeKind, SemanticModel, SourceSpan};
//! use sqlcop_rule_engine::SqlUsageAnalyzer;
//!
//! let mut builder = SemanticModel::builder();
//! let size = builder.node(
//!     NodeKind::IntLiteral(0),
//!     SourceSpan::new("main.bal", 4, 28),
//! );
//! let pool = builder.node(
//!     NodeKind::Call {
//!         symbol: "sql:ConnectionPool".into(),
//!         args: vec![Argument::named("maxOpenConnections", size)],
//!     },
//!     SourceSpan::new("main.bal", 4, 5),
//! );
//! builder.unit("main.bal", vec![pool]);
//! let model = builder.finish();
//!
//! let diagnostics = SqlUsageAnalyzer::new().analyze(&model);
//! assert_eq!(diagnostics[0].code, "SQL_101");
//! ```

pub mod collector;
pub mod engine;
pub mod eval;
pub mod locator;
pub mod rules;

// Re-export core types
pub use collector::DiagnosticCollector;
pub use engine::evaluate_call_site;
pub use eval::{evaluate, EvaluatedValue, ValueKind};
pub use locator::{locate, ApiKind, CallSite, OutParamKind};
pub use rules::{rules_for, Predicate, ValidationRule, RULES};

use sqlcop_core::{Diagnostic, SemanticModel};
use tracing::debug;

/// The per-package analysis pass.
///
/// The host compiler invokes [`analyze`](SqlUsageAnalyzer::analyze) once per
/// package compilation, after binding and before artifact generation. The
/// pass is synchronous, does no I/O, and never fails: analysis limitations
/// and malformed constructs degrade to fewer diagnostics, not to an aborted
/// compilation. Concurrent compilations may each run their own analyzer;
/// the rule table is the only shared state and is immutable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlUsageAnalyzer;

impl SqlUsageAnalyzer {
    /// Create an analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Run the pass over one package's semantic model and return the final
    /// ordered diagnostic list for the host's diagnostic-result channel.
    pub fn analyze(&self, model: &SemanticModel) -> Vec<Diagnostic> {
        let mut collector = DiagnosticCollector::new();

        for unit in model.units() {
            for site in locate(model, unit) {
                collector.extend(evaluate_call_site(model, &site));
            }
        }

        debug!(
            units = model.units().len(),
            diagnostics = collector.len(),
            "sql usage analysis finished"
        );
        collector.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlcop_core::{Argument, NodeKind, SourceSpan};

    #[test]
    fn test_empty_model_yields_no_diagnostics() {
        let model = SemanticModel::builder().finish();
        assert!(SqlUsageAnalyzer::new().analyze(&model).is_empty());
    }

    #[test]
    fn test_diagnostics_are_ordered_across_units() {
        let mut builder = SemanticModel::builder();

        let late = builder.node(NodeKind::IntLiteral(0), SourceSpan::new("z.bal", 2, 28));
        let late_pool = builder.node(
            NodeKind::Call {
                symbol: "sql:ConnectionPool".into(),
                args: vec![Argument::named("maxOpenConnections", late)],
            },
            SourceSpan::new("z.bal", 2, 5),
        );
        builder.unit("z.bal", vec![late_pool]);

        let early = builder.node(NodeKind::IntLiteral(0), SourceSpan::new("a.bal", 8, 28));
        let early_pool = builder.node(
            NodeKind::Call {
                symbol: "sql:ConnectionPool".into(),
                args: vec![Argument::named("maxOpenConnections", early)],
            },
            SourceSpan::new("a.bal", 8, 5),
        );
        builder.unit("a.bal", vec![early_pool]);

        let model = builder.finish();
        let diagnostics = SqlUsageAnalyzer::new().analyze(&model);
        let files: Vec<_> = diagnostics.iter().map(|d| d.span.file.as_str()).collect();
        assert_eq!(files, vec!["a.bal", "z.bal"]);
    }
}
