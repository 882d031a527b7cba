//! Rule evaluator - applies the rule table to one located call site.

use crate::eval::evaluate;
use crate::locator::CallSite;
use crate::rules::RULES;
use sqlcop_core::{Diagnostic, SemanticModel};
use tracing::warn;

/// Evaluate every applicable rule against one call site.
///
/// Rules are scanned in table order, so diagnostics from a single site come
/// out in a fixed order regardless of argument source order; the collector
/// imposes the final package-wide ordering. A rule fires only on a provable
/// violation: an argument that does not evaluate to a known value of the
/// predicate's kind passes silently.
pub fn evaluate_call_site(model: &SemanticModel, site: &CallSite) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for rule in RULES {
        if rule.api != site.api {
            continue;
        }
        let Some(arg_id) = site.argument(rule.field) else {
            // Field omitted at this call site; nothing to check.
            continue;
        };
        let node = match model.node(arg_id) {
            Ok(node) => node,
            Err(error) => {
                // The locator verifies argument ids, so this only happens if
                // the model changed shape underneath us. Skip, keep going.
                warn!(%error, code = rule.code, "skipping unresolvable argument");
                continue;
            }
        };

        let value = evaluate(model, node);
        if rule.predicate.holds(&value) == Some(false) {
            diagnostics.push(Diagnostic::new(
                rule.code,
                rule.severity,
                rule.message,
                value.span,
            ));
        }
    }

    diagnostics
}
