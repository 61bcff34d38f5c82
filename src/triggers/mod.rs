//! Listener system for reactive abilities.
//!
//! Cards register listeners when they enter play (or the hand) and lose
//! them when they leave. The engine fires listeners at fixed points of the
//! test pipeline and the clear sweep.
//!
//! ## Key Components
//!
//! - [`EventType`] and [`Timing`]: The (event, timing) pair a listener waits for
//! - [`EventListener`]: A listener definition with predicate and effect
//! - [`ListenerRegistry`]: Storage and lookup for listeners
//!
//! ## Example Usage
//!
//! ```
//! use trail_rules::core::CardId;
//! use trail_rules::triggers::{EventListener, EventType, ListenerRegistry, Timing};
//!
//! let mut registry = ListenerRegistry::new();
//!
//! // "After you succeed at a Traverse test, ..."
//! let walk = EventListener::new(CardId(4), EventType::TestSucceed, Timing::After, "Walk With Me")
//!     .with_verb("Traverse")
//!     .with_effect(|_engine, _effort| Ok(0));
//! registry.register(walk);
//!
//! let found = registry.matching(EventType::TestSucceed, Timing::After);
//! assert_eq!(found.len(), 1);
//! assert!(found[0].accepts_verb("traverse"));
//! ```

mod event;
mod registry;

pub use event::{EventListener, EventType, ListenerEffect, ListenerPredicate, Timing};
pub use registry::ListenerRegistry;
