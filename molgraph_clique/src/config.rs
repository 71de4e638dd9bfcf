//! Budgets for the bounded clique searches.

use std::time::{Duration, Instant};

/// Budgets for [`crate::maximum_clique`] and [`crate::maximum_conn_clique`].
///
/// The default is unbounded: plain clique calls explore exhaustively unless
/// a caller (typically the MCS layer) installs a budget.
#[derive(Debug, Clone, Default)]
pub struct CliqueOptions {
    /// Wall-clock budget. `None` disables the timeout.
    pub timeout: Option<Duration>,
    /// Stop as soon as a clique of this size has been found.
    pub targetsize: Option<usize>,
}

impl CliqueOptions {
    /// Unbounded search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same options with the wall-clock budget replaced.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Same options with an early-exit target size.
    pub fn with_targetsize(mut self, targetsize: usize) -> Self {
        self.targetsize = Some(targetsize);
        self
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|t| Instant::now() + t)
    }
}
