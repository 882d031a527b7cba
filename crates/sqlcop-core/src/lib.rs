//! Sqlcop Core - Semantic-model contract and diagnostic types.
//!
//! This crate defines the read-only input and output contracts shared
//! between a host compiler and the sqlcop rule engine:
//!
//! - [`SemanticModel`]: the host compiler's fully bound representation of a
//!   package, exposed through an index/query interface
//! - [`ModelBuilder`]: the one-shot constructor used by host adapters (and
//!   tests) to assemble a model
//! - [`Diagnostic`]: the structured analysis result handed back to the host
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │   host compiler    │  (parsing, binding, type checking)
//! └─────────┬──────────┘
//!           │ SemanticModel
//!           ▼
//! ┌────────────────────┐
//! │ sqlcop-rule-engine │  (call-site location, rule evaluation)
//! └─────────┬──────────┘
//!           │ Vec<Diagnostic>
//!           ▼
//! ┌────────────────────┐
//! │   host compiler    │  (diagnostic-result aggregation, rendering)
//! └────────────────────┘
//! ```
//!
//! The model is immutable once built. The engine never holds owning
//! references into the host's tree; it works with [`NodeId`] indices,
//! source spans, and value summaries only.

pub mod diagnostic;
pub mod error;
pub mod model;

// Re-export core types for convenience
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use model::{
    Argument, CompiledUnit, ModelBuilder, NodeId, NodeKind, SemanticModel, SemanticNode,
    SourceSpan,
};
