//! Error taxonomy.
//!
//! Only genuine misuse is an error: violated preconditions and structurally
//! invalid query representations. Budget exhaustion is reported through
//! [`crate::SearchStatus`], and an empty result sequence means "no match",
//! never a failure.

use thiserror::Error;

/// Errors surfaced by the matching and MCS entry points.
#[derive(Debug, Error)]
pub enum MolGraphError {
    /// A caller-facing precondition was violated, e.g. converting an edge
    /// mapping whose query graph has more vertices than the target.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A query carried a structurally invalid representation, e.g. a
    /// formula connective with no operands or an unresolvable embedded
    /// sub-query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
