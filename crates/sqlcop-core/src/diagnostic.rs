//! Diagnostic output contract.
//!
//! Codes, severities, and message text are stable across versions:
//! consumers key alerting and suppressions off the code, and acceptance
//! fixtures assert the message text literally.

use crate::model::SourceSpan;
use serde::{Deserialize, Serialize};

/// How severe a reported violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// The construct is semantically invalid and will misbehave at runtime.
    Error,
    /// The construct is suspect but not provably invalid.
    Warning,
}

impl Severity {
    /// Returns the display name for this severity.
    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

/// One structured validation report, non-fatal to compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable rule code, e.g. `SQL_101`. Pool-configuration codes and
    /// OUT-parameter codes live in disjoint ranges.
    pub code: String,
    /// Severity of the violation.
    pub severity: Severity,
    /// Fully rendered, human-readable message.
    pub message: String,
    /// Location of the offending argument expression.
    pub span: SourceSpan,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        span: SourceSpan,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {}: {}",
            self.span,
            self.code,
            self.severity.display_name(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_span_code_and_message() {
        let diag = Diagnostic::new(
            "SQL_101",
            Severity::Error,
            "invalid value: expected value is greater than one",
            SourceSpan::new("main.bal", 4, 28),
        );
        assert_eq!(
            diag.to_string(),
            "main.bal:4:28: [SQL_101] ERROR: invalid value: expected value is greater than one"
        );
    }

    #[test]
    fn test_serialized_contract_is_stable() {
        let diag = Diagnostic::new(
            "SQL_223",
            Severity::Error,
            "invalid value: expected value is any one of time:TimeOfDay, int or string",
            SourceSpan::new("main.bal", 12, 9),
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], "SQL_223");
        assert_eq!(json["severity"], "ERROR");
        assert_eq!(json["span"]["file"], "main.bal");
        assert_eq!(json["span"]["line"], 12);
        assert_eq!(json["span"]["column"], 9);
    }
}
