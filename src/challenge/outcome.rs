//! Result record of a resolved test.

use serde::{Deserialize, Serialize};

use crate::cards::ChallengeSymbol;

/// What happened when a test resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    /// Committed effort including listener bonuses.
    pub base_effort: i32,
    pub modifier: i32,
    pub difficulty: i32,
    pub symbol: ChallengeSymbol,
    /// `max(0, base_effort + modifier)`
    pub resulting_effort: i32,
    pub success: bool,
}

impl ChallengeOutcome {
    /// Outcome reported for actions that are not tests.
    #[must_use]
    pub const fn trivial() -> Self {
        Self {
            base_effort: 0,
            modifier: 0,
            difficulty: 0,
            symbol: ChallengeSymbol::Sun,
            resulting_effort: 0,
            success: true,
        }
    }
}
