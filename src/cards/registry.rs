//! Card behaviour and the library that maps definitions to it.
//!
//! Card data (`Card`) is serializable and carries a `definition` key. The
//! `CardLibrary` maps that key to a `CardBehavior`, the capability set the
//! engine queries: which tests a card offers, which challenge symbols it
//! reacts to, which listeners and constant abilities it registers, and what
//! happens when it enters play or is played from hand.
//!
//! Every capability defaults to "none", so content only overrides what a
//! card actually does.
//!
//! ## Example
//!
//! ```
//! use trail_rules::cards::{CardBehavior, CardLibrary, ChallengeSymbol};
//!
//! struct Boulder;
//! impl CardBehavior for Boulder {
//!     fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
//!         &[ChallengeSymbol::Mountain]
//!     }
//! }
//!
//! let mut library = CardLibrary::new();
//! library.register("boulder", Boulder);
//!
//! assert_eq!(library.behavior("boulder").challenge_symbols(), &[ChallengeSymbol::Mountain]);
//! // Unknown definitions get the empty behaviour.
//! assert!(library.behavior("missing").challenge_symbols().is_empty());
//! ```

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::attributes::ChallengeSymbol;
use super::instance::Card;
use crate::abilities::ConstantAbility;
use crate::actions::Action;
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::triggers::EventListener;

/// Where a card is when its listeners are collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    Hand,
    InPlay,
}

/// Behaviour of a card definition.
pub trait CardBehavior {
    /// Tests this card offers while in play.
    fn tests(&self, _card: &Card) -> Vec<Action> {
        Vec::new()
    }

    /// Challenge symbols this card has effects for.
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[]
    }

    /// Run the challenge effect for `symbol`.
    ///
    /// Returns `Ok(true)` if anything changed. Effects that would do nothing
    /// must return `Ok(false)` without touching the engine; the orchestrator
    /// relies on this to skip them.
    fn resolve_challenge(
        &self,
        _engine: &mut Engine,
        _card: CardId,
        _symbol: ChallengeSymbol,
    ) -> Result<bool, EngineError> {
        Ok(false)
    }

    /// Listeners to register while the card is in `scope`.
    fn listeners(&self, _card: &Card, _scope: ListenerScope) -> Vec<EventListener> {
        Vec::new()
    }

    /// Constant abilities to register while the card is in play.
    fn constant_abilities(&self, _card: &Card) -> Vec<ConstantAbility> {
        Vec::new()
    }

    /// Runs after the card is placed in play and its registrations are live.
    fn enters_play(
        &self,
        _engine: &mut Engine,
        _card: CardId,
        _target: Option<CardId>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Legal targets when playing from hand. `None` means untargeted.
    fn play_targets(&self, _engine: &Engine, _card: CardId) -> Option<Vec<CardId>> {
        None
    }

    /// Runs when the card is played from hand, after its cost is paid and it
    /// has left the hand.
    fn on_played(
        &self,
        engine: &mut Engine,
        card: CardId,
        target: Option<CardId>,
    ) -> Result<(), EngineError> {
        engine.place_played_card(card, target)
    }
}

/// Behaviour for definitions the library does not know.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBehavior;

impl CardBehavior for NoBehavior {}

/// Definition key -> behaviour.
#[derive(Clone, Default)]
pub struct CardLibrary {
    behaviors: FxHashMap<String, Rc<dyn CardBehavior>>,
}

impl CardLibrary {
    /// Create a new empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behaviour, replacing any previous one for the key.
    pub fn register(&mut self, key: impl Into<String>, behavior: impl CardBehavior + 'static) {
        self.behaviors.insert(key.into(), Rc::new(behavior));
    }

    /// Builder form of `register`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, behavior: impl CardBehavior + 'static) -> Self {
        self.register(key, behavior);
        self
    }

    /// Behaviour for a definition key, or `NoBehavior`.
    #[must_use]
    pub fn behavior(&self, key: &str) -> Rc<dyn CardBehavior> {
        self.behaviors
            .get(key)
            .cloned()
            .unwrap_or_else(|| Rc::new(NoBehavior))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.behaviors.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl std::fmt::Debug for CardLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.behaviors.keys().collect();
        keys.sort();
        f.debug_struct("CardLibrary").field("definitions", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sunny;
    impl CardBehavior for Sunny {
        fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
            &[ChallengeSymbol::Sun]
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let library = CardLibrary::new().with("sunny", Sunny);
        assert!(library.contains("sunny"));
        assert_eq!(library.len(), 1);
        assert_eq!(library.behavior("sunny").challenge_symbols(), &[ChallengeSymbol::Sun]);
    }

    #[test]
    fn test_unknown_key_is_empty_behavior() {
        let library = CardLibrary::new();
        assert!(library.is_empty());
        let behavior = library.behavior("nothing");
        assert!(behavior.challenge_symbols().is_empty());
        let card = Card::new(CardId(1), "X", "nothing");
        assert!(behavior.tests(&card).is_empty());
        assert!(behavior.constant_abilities(&card).is_empty());
        assert!(behavior.listeners(&card, ListenerScope::InPlay).is_empty());
    }
}
