//! Zone system for card locations.
//!
//! The four in-play zones are fixed by the game: Player Area, Within Reach,
//! Along the Way and Surroundings. Piles (decks, hand, discards) are plain
//! ordered vectors on `GameState` and `RangerState`, not zones.
//!
//! ## Key Types
//!
//! - `Zone`: The in-play zones and their distance from the ranger
//! - `ZoneGraph`: Card locations, zone order and attachment edges

pub mod manager;

pub use manager::{Zone, ZoneGraph};
