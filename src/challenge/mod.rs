//! Challenge cards: the randomizer drawn once per test.
//!
//! Each challenge card carries a modifier per aspect and a symbol. The
//! modifier adjusts the test's effort; the symbol selects which challenge
//! effects in play resolve afterwards.

mod deck;
mod outcome;

pub use deck::{ChallengeCard, ChallengeDeck};
pub use outcome::ChallengeOutcome;
