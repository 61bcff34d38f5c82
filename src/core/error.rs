//! Engine error type.
//!
//! Every fatal condition the rules core can detect is an `EngineError`.
//! Non-fatal game situations (a move that does nothing, an empty target
//! list) are ordinary return values and never reach this type.

use thiserror::Error;

use super::entity::{CardId, ListenerId};
use crate::cards::Aspect;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient {aspect} energy: need {needed}, have {available}")]
    InsufficientEnergy {
        aspect: Aspect,
        needed: u32,
        available: u32,
    },

    #[error("Card not found: {0}")]
    UnknownCard(CardId),

    #[error("Card {0} cannot be attached to itself")]
    SelfAttachment(CardId),

    #[error("Attaching {child} to {parent} would create a cycle")]
    AttachmentCycle { child: CardId, parent: CardId },

    #[error("Card {0} is not attached to anything")]
    NotAttached(CardId),

    #[error("{listener} from {source_card} {reason}")]
    ListenerContextMismatch {
        listener: ListenerId,
        source_card: CardId,
        reason: &'static str,
    },

    #[error("Invalid ordering for '{prompt}': expected a permutation of {expected} items")]
    InvalidOrdering { prompt: String, expected: usize },

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("No guide entry registered for key '{0}'")]
    UnknownGuideEntry(String),

    #[error("Card {card} cannot be played: {reason}")]
    CannotPlay { card: CardId, reason: String },

    #[error("Effect failed: {0}")]
    EffectFailed(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
