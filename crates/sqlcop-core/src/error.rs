//! Error types for sqlcop core.

use crate::model::NodeId;
use thiserror::Error;

/// Result type for sqlcop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a semantic model.
///
/// A well-formed host never produces these; they classify host-contract
/// violations so the engine can skip the offending construct instead of
/// aborting the compilation pass.
#[derive(Debug, Error)]
pub enum Error {
    /// A node id does not resolve to any node in the model's arena.
    #[error("Dangling node id: {id:?}")]
    DanglingNode {
        /// The id that failed to resolve.
        id: NodeId,
    },

    /// A constant name was defined twice while building a model.
    #[error("Duplicate module-level constant: {name}")]
    DuplicateConstant {
        /// The constant's name.
        name: String,
    },
}
