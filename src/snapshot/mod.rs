//! Session snapshots.
//!
//! A `Snapshot` holds everything an engine owns that is plain data: the
//! game state, the day-ended flag, the message log and the config. The
//! registries are left out; they hold closures and are rebuilt from the
//! cards in hand and in play by `Engine::from_snapshot`.
//!
//! ```
//! use trail_rules::cards::{Card, CardLibrary};
//! use trail_rules::core::{CardId, GameState, RangerState};
//! use trail_rules::engine::Engine;
//! use trail_rules::snapshot::Snapshot;
//! use trail_rules::zones::Zone;
//!
//! let mut engine = Engine::new(GameState::new(RangerState::new("R"), 7), CardLibrary::new()).unwrap();
//! let rock = engine.spawn(Card::new(CardId(0), "Rock", "rock"), Zone::AlongTheWay).unwrap();
//!
//! let bytes = engine.snapshot().to_bytes().unwrap();
//! let restored = Engine::from_snapshot(Snapshot::from_bytes(&bytes).unwrap(), CardLibrary::new()).unwrap();
//! assert_eq!(restored.state().zone_of(rock), Some(Zone::AlongTheWay));
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardLibrary;
use crate::core::{EngineConfig, EngineError, GameState};
use crate::engine::{Engine, MessageEvent};

/// Serializable engine contents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub day_ended: bool,
    pub messages: Vec<MessageEvent>,
    pub config: EngineConfig,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Engine {
    /// Capture the engine's plain data.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state().clone(),
            day_ended: self.is_day_ended(),
            messages: self.messages().to_vec(),
            config: self.config().clone(),
        }
    }

    /// Rebuild an engine from a snapshot and the card library.
    ///
    /// Listeners and constant abilities are re-registered from scratch. The
    /// decision provider and guide start at their defaults; install them with
    /// the builder methods.
    pub fn from_snapshot(snapshot: Snapshot, library: CardLibrary) -> Result<Engine, EngineError> {
        let Snapshot {
            state,
            day_ended,
            messages,
            config,
        } = snapshot;
        let mut engine = Engine::new(state, library)?.with_config(config);
        engine.restore_log(messages, day_ended);
        tracing::debug!(
            cards = engine.state().card_count(),
            listeners = engine.listeners().len(),
            "engine restored from snapshot"
        );
        Ok(engine)
    }
}
