//! Static rule table.
//!
//! Rules are data, not control flow: each row keys a predicate, a stable
//! diagnostic code, and a fixed message to one (API, field) pair. Adding a
//! constraint means adding a row. The table is fully constructed at compile
//! time and shared read-only, so unrestricted concurrent compilations can
//! consult it without synchronization.
//!
//! Codes are part of the output contract: consumers key alerting and
//! suppressions off them, and they never change meaning across versions.
//! Pool-configuration rules use the `SQL_1xx` range, OUT-parameter binding
//! rules the `SQL_2xx` range.

use crate::eval::{EvaluatedValue, ValueKind};
use crate::locator::{ApiKind, OutParamKind};
use sqlcop_core::Severity;

/// A predicate over an evaluated argument value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// The value must be an integer strictly greater than the bound.
    IntGreaterThan(i64),
    /// The value must be a number (integer or decimal) of at least the bound.
    NumericAtLeast(i64),
    /// The value must be one of the listed fully-qualified type names.
    TypeOneOf(&'static [&'static str]),
}

impl Predicate {
    /// Judge a value. `None` means the predicate cannot decide: the value
    /// is `Unknown`, or not of a kind this predicate speaks about. A rule
    /// never fires on an undecided value; a violation must be provable,
    /// never guessed.
    pub fn holds(&self, value: &EvaluatedValue) -> Option<bool> {
        match (self, &value.kind) {
            (Predicate::IntGreaterThan(bound), ValueKind::Integer(v)) => Some(v > bound),
            (Predicate::NumericAtLeast(bound), ValueKind::Integer(v)) => Some(v >= bound),
            (Predicate::NumericAtLeast(bound), ValueKind::Decimal(v)) => {
                Some(*v >= *bound as f64)
            }
            (Predicate::TypeOneOf(accepted), ValueKind::String(name)) => {
                Some(accepted.contains(&name.as_str()))
            }
            _ => None,
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    /// The API the rule applies to.
    pub api: ApiKind,
    /// The declared field/parameter the rule checks.
    pub field: &'static str,
    /// The constraint on the evaluated argument.
    pub predicate: Predicate,
    /// Stable, globally unique diagnostic code.
    pub code: &'static str,
    /// Severity of a violation.
    pub severity: Severity,
    /// Fixed message text; no per-call customization.
    pub message: &'static str,
}

/// Accepted binding types for character-like column categories.
const CHARACTER_BINDINGS: &[&str] = &["string", "json"];
const CHARACTER_MESSAGE: &str = "invalid value: expected value is either string or json";

/// Accepted binding types for the TIME column category.
const TIME_BINDINGS: &[&str] = &["time:TimeOfDay", "int", "string"];
const TIME_MESSAGE: &str =
    "invalid value: expected value is any one of time:TimeOfDay, int or string";

/// The rule table, in scan order. Per call site, diagnostics are emitted in
/// this order; the collector imposes the final source-position ordering.
pub static RULES: &[ValidationRule] = &[
    ValidationRule {
        api: ApiKind::ClientInit,
        field: "maxOpenConnections",
        predicate: Predicate::IntGreaterThan(1),
        code: "SQL_101",
        severity: Severity::Error,
        message: "invalid value: expected value is greater than one",
    },
    ValidationRule {
        api: ApiKind::ClientInit,
        field: "minIdleConnections",
        predicate: Predicate::IntGreaterThan(0),
        code: "SQL_102",
        severity: Severity::Error,
        message: "invalid value: expected value is greater than zero",
    },
    ValidationRule {
        api: ApiKind::ClientInit,
        field: "maxConnectionLifeTime",
        predicate: Predicate::NumericAtLeast(30),
        code: "SQL_103",
        severity: Severity::Error,
        message: "invalid value: expected value is greater than or equal to 30",
    },
    ValidationRule {
        api: ApiKind::OutParameter(OutParamKind::Char),
        field: "bindingType",
        predicate: Predicate::TypeOneOf(CHARACTER_BINDINGS),
        code: "SQL_211",
        severity: Severity::Error,
        message: CHARACTER_MESSAGE,
    },
    ValidationRule {
        api: ApiKind::OutParameter(OutParamKind::Varchar),
        field: "bindingType",
        predicate: Predicate::TypeOneOf(CHARACTER_BINDINGS),
        code: "SQL_212",
        severity: Severity::Error,
        message: CHARACTER_MESSAGE,
    },
    ValidationRule {
        api: ApiKind::OutParameter(OutParamKind::Text),
        field: "bindingType",
        predicate: Predicate::TypeOneOf(CHARACTER_BINDINGS),
        code: "SQL_213",
        severity: Severity::Error,
        message: CHARACTER_MESSAGE,
    },
    ValidationRule {
        api: ApiKind::OutParameter(OutParamKind::Time),
        field: "bindingType",
        predicate: Predicate::TypeOneOf(TIME_BINDINGS),
        code: "SQL_223",
        severity: Severity::Error,
        message: TIME_MESSAGE,
    },
];

/// All rules applying to one (API, field) pair, in table order. Normally
/// zero or one; the table allows several for compound constraints.
pub fn rules_for(
    api: ApiKind,
    field: &str,
) -> impl Iterator<Item = &'static ValidationRule> + '_ {
    RULES
        .iter()
        .filter(move |rule| rule.api == api && rule.field == field)
}
