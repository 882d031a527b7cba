//! Diagnostic collector.

use sqlcop_core::Diagnostic;

/// Accumulates diagnostics across all call sites and units of one package
/// compilation, then imposes the final ordering exactly once.
///
/// One collector per compilation request; nothing is retained across
/// requests. Per-unit emission order is preserved for equal positions
/// because the final sort is stable.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a batch of diagnostics in discovery order.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(batch);
    }

    /// Number of diagnostics accumulated so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finalize: sort by (file, line, column) ascending, ties broken by
    /// discovery order, and hand the list to the host.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| a.span.cmp(&b.span));
        self.diagnostics
    }
}
