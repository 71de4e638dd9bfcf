//! Search completion status.

use serde::{Deserialize, Serialize};

/// How a bounded search ended.
///
/// Anything other than `Exhaustive` means the result is valid but not
/// guaranteed maximum; callers must check before treating a clique or MCS
/// mapping as optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStatus {
    /// The search space was fully explored; the result is proven maximum.
    Exhaustive,
    /// The search stopped after reaching the requested target size.
    TargetReached,
    /// The wall-clock budget expired; the result is best-effort.
    TimedOut,
}

impl SearchStatus {
    /// Whether the result is proven maximum.
    pub fn is_exhaustive(self) -> bool {
        matches!(self, SearchStatus::Exhaustive)
    }
}
