//! Search configuration shared by the matching and MCS entry points.
//!
//! Two option sets exist because the two searches budget differently:
//! substructure matching defaults to a 10 second wall-clock budget, MCS
//! (which drives a clique search over a product graph) to 60 seconds.
//! A `timeout` of `None` disables the budget entirely; `Some(0)` is a valid
//! degenerate budget that yields an immediately truncated, non-exhaustive
//! result rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Default wall-clock budget for substructure/isomorphism searches.
pub const DEFAULT_MATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default wall-clock budget for MCS searches.
pub const DEFAULT_MCS_TIMEOUT: Duration = Duration::from_secs(60);

/// Options for the backtracking matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Wall-clock budget. `None` disables the timeout.
    pub timeout: Option<Duration>,
    /// Required pairs: query vertex -> target vertex. A tentative pair
    /// involving either side of an entry must be exactly that entry.
    pub mandatory: HashMap<usize, usize>,
    /// Disallowed `(query vertex, target vertex)` pairs.
    pub forbidden: HashSet<(usize, usize)>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            timeout: Some(DEFAULT_MATCH_TIMEOUT),
            mandatory: HashMap::new(),
            forbidden: HashSet::new(),
        }
    }
}

impl MatchOptions {
    /// Options with no wall-clock budget.
    pub fn unbounded() -> Self {
        MatchOptions {
            timeout: None,
            ..Self::default()
        }
    }

    /// Same options with the budget replaced.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Same options additionally requiring `query -> target`.
    pub fn require(mut self, query: usize, target: usize) -> Self {
        self.mandatory.insert(query, target);
        self
    }

    /// Same options additionally forbidding `query -> target`.
    pub fn forbid(mut self, query: usize, target: usize) -> Self {
        self.forbidden.insert((query, target));
        self
    }
}

/// Options for maximum common substructure searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McsOptions {
    /// Wall-clock budget for the underlying clique search.
    pub timeout: Option<Duration>,
    /// Stop as soon as a common substructure of this size is found. The
    /// reported result is at least this large but not necessarily maximum.
    pub targetsize: Option<usize>,
    /// Require the common substructure to be a single connected fragment.
    pub connected: bool,
    /// Apply the topological (distance-tolerant) constraint.
    pub topological: bool,
    /// Maximum graph distance considered by the topological constraint.
    pub diameter: usize,
    /// Allowed difference between pairwise distances in the two graphs.
    pub tolerance: usize,
}

impl Default for McsOptions {
    fn default() -> Self {
        McsOptions {
            timeout: Some(DEFAULT_MCS_TIMEOUT),
            targetsize: None,
            connected: false,
            topological: false,
            diameter: 8,
            tolerance: 1,
        }
    }
}

impl McsOptions {
    /// Options with no wall-clock budget.
    pub fn unbounded() -> Self {
        McsOptions {
            timeout: None,
            ..Self::default()
        }
    }

    /// Same options with the budget replaced.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Same options with an early-exit target size.
    pub fn with_targetsize(mut self, targetsize: usize) -> Self {
        self.targetsize = Some(targetsize);
        self
    }

    /// Same options with the connectivity constraint toggled.
    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Same options with the topological constraint toggled.
    pub fn topological(mut self, topological: bool) -> Self {
        self.topological = topological;
        self
    }
}
