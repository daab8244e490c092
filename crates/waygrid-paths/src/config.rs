//! Search and chaining options.

use crate::neighbors::DiagonalRule;

/// What the chainer does when two consecutive waypoints cannot be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainPolicy {
    /// Record an empty segment for the failed pair and stop.
    StopAtGap,
    /// Walk toward the obstacle closest to both waypoints, end the route on
    /// that obstacle, and stop.
    #[default]
    ApproachNearestObstacle,
}

/// Options shared by [`AStar`](crate::AStar) and [`Router`](crate::Router).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub diagonal: DiagonalRule,
    pub policy: ChainPolicy,
    /// Abort a single search after this many node expansions.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Set the diagonal rule (builder).
    pub const fn with_diagonal(mut self, diagonal: DiagonalRule) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Set the chaining policy (builder).
    pub const fn with_policy(mut self, policy: ChainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cap the number of expansions per search (builder).
    pub const fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
