//! Core engine types: ids, state, ranger, RNG, configuration, errors.
//!
//! This module holds the plain data the rest of the engine operates on.
//! Nothing here fires listeners or consults abilities; that is `engine`'s job.

pub mod entity;
pub mod ranger;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{CardId, ListenerId};
pub use ranger::RangerState;
pub use rng::{GameRng, GameRngState};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use state::GameState;
