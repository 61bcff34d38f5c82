//! Event types and listener definitions.
//!
//! Listeners are reactive abilities: "when X happens, do Y". A listener is
//! owned by the card that registered it and is removed when that card
//! leaves play (or leaves the hand, for hand listeners).

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{CardId, EngineError, ListenerId};
use crate::engine::Engine;

/// Moments the engine fires listeners for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A test is being performed; listeners may add effort.
    PerformTest,
    /// A test just succeeded.
    TestSucceed,
    /// A card was cleared; the carried value is the counter that cleared it.
    Clear,
    /// A card entered play.
    EntersPlay,
}

/// When a listener fires relative to the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timing {
    Before,
    When,
    After,
}

/// Activation predicate, evaluated right before the listener would fire.
/// The second argument is the event's subject card, if any.
pub type ListenerPredicate = Rc<dyn Fn(&Engine, Option<CardId>) -> bool>;

/// Effect run when the listener fires. Receives the carried value and
/// returns a contribution to the trigger's summed result.
pub type ListenerEffect = Rc<dyn Fn(&mut Engine, i32) -> Result<i32, EngineError>>;

/// A reactive ability registered by a card.
#[derive(Clone)]
pub struct EventListener {
    /// Assigned by the registry; zero until registered.
    pub id: ListenerId,
    pub event_type: EventType,
    pub timing: Timing,
    pub source: CardId,
    /// Only fire for actions with this verb (case-insensitive).
    pub verb: Option<String>,
    pub label: String,
    pub active: ListenerPredicate,
    pub effect: ListenerEffect,
}

impl EventListener {
    /// Create a listener that is always active and contributes nothing.
    pub fn new(
        source: CardId,
        event_type: EventType,
        timing: Timing,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: ListenerId::new(0),
            event_type,
            timing,
            source,
            verb: None,
            label: label.into(),
            active: Rc::new(|_, _| true),
            effect: Rc::new(|_, _| Ok(0)),
        }
    }

    /// Restrict the listener to actions with this verb.
    #[must_use]
    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    /// Set the activation predicate.
    #[must_use]
    pub fn when_active(mut self, predicate: impl Fn(&Engine, Option<CardId>) -> bool + 'static) -> Self {
        self.active = Rc::new(predicate);
        self
    }

    /// Set the effect.
    #[must_use]
    pub fn with_effect(
        mut self,
        effect: impl Fn(&mut Engine, i32) -> Result<i32, EngineError> + 'static,
    ) -> Self {
        self.effect = Rc::new(effect);
        self
    }

    /// True if the verb filter accepts `verb`.
    #[must_use]
    pub fn accepts_verb(&self, verb: &str) -> bool {
        self.verb
            .as_deref()
            .is_some_and(|filter| filter.eq_ignore_ascii_case(verb))
    }
}

impl std::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListener")
            .field("id", &self.id)
            .field("event_type", &self.event_type)
            .field("timing", &self.timing)
            .field("source", &self.source)
            .field("verb", &self.verb)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
