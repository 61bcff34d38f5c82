//! # trail-rules
//!
//! Rules-resolution core for a single-player, trail-exploration card game.
//!
//! ## Design Principles
//!
//! 1. **Content Is Data Plus Behaviour**: Cards are serializable data with a
//!    definition key. A `CardLibrary` maps keys to `CardBehavior`
//!    implementations; the engine only asks capability questions.
//!
//! 2. **Derived Registries**: Listeners and constant abilities hold
//!    closures and are never saved. They are rebuilt from the cards in hand
//!    and in play, so a snapshot plus the library is a complete session.
//!
//! 3. **Decisions Behind a Trait**: Every player choice goes through a
//!    `DecisionProvider`. The engine never reads input itself.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `im-rs` makes cloning the state cheap,
//!   which is what challenge-effect dry runs rely on.
//!
//! - **Day End Is a Flag**: Ending the day is normal control flow, not an
//!   error. Every pipeline step checks it and returns early.
//!
//! ## Modules
//!
//! - `core`: Ids, game state, ranger, RNG, configuration, errors
//! - `zones`: The four zones and the attachment graph
//! - `cards`: Card data, vocabulary, behaviour trait and library
//! - `actions`: Actions, commitments and the common tests
//! - `triggers`: Event listeners and their registry
//! - `abilities`: Constant abilities and their registry
//! - `challenge`: The challenge deck and test outcomes
//! - `decisions`: Decision providers
//! - `guide`: Campaign guide entries
//! - `engine`: The rules engine
//! - `snapshot`: Saving and restoring sessions
//! - `content`: A sample card pool

pub mod core;
pub mod zones;
pub mod cards;
pub mod actions;
pub mod triggers;
pub mod abilities;
pub mod challenge;
pub mod decisions;
pub mod guide;
pub mod engine;
pub mod snapshot;
pub mod content;

// Re-export commonly used types
pub use crate::core::{CardId, EngineConfig, EngineError, GameRng, GameState, ListenerId, RangerState};

pub use crate::zones::{Zone, ZoneGraph};

pub use crate::cards::{
    Approach, Aspect, Card, CardBehavior, CardLibrary, CardType, ChallengeSymbol, ClearKind, EnergyCost,
    Keyword, ListenerScope, Threshold,
};

pub use crate::actions::{Action, ActionKind, CommitDecision};

pub use crate::triggers::{EventListener, EventType, ListenerRegistry, Timing};

pub use crate::abilities::{AbilityKind, AbilityRegistry, ConstantAbility};

pub use crate::challenge::{ChallengeCard, ChallengeDeck, ChallengeOutcome};

pub use crate::decisions::{DecisionProvider, DefaultDecisions, ScriptedDecisions};

pub use crate::guide::CampaignGuide;

pub use crate::engine::{Engine, MessageEvent, PlayOption, TestResolution};

pub use crate::snapshot::Snapshot;
