//! Decision providers: every player choice the engine needs.
//!
//! The engine never reads input itself. Whenever rules leave a choice to
//! the player it calls the installed [`DecisionProvider`]:
//!
//! - `choose_card`: pick one card from a candidate list
//! - `decide`: a yes/no question
//! - `choose_order`: order simultaneous effects
//! - `choose_option`: pick one of several labelled options
//! - `choose_amount`: pick a number in a range
//!
//! [`DefaultDecisions`] answers without a player: first card, yes, identity
//! order, first option, maximum amount. The engine installs it in
//! speculative copies so dry runs never block on input.
//! [`ScriptedDecisions`] replays queued answers and records every prompt,
//! which is what headless drivers and tests use.

mod scripted;

use serde::{Deserialize, Serialize};

use crate::core::CardId;

pub use scripted::{DecisionLog, DecisionRecord, ScriptedDecisions};

/// A card offered by `choose_card`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOption {
    pub id: CardId,
    pub name: String,
}

/// One entry offered by `choose_order`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Position in the presented list; answers refer to items by position.
    pub position: usize,
    pub source: Option<CardId>,
    pub label: String,
}

/// Source of player decisions.
pub trait DecisionProvider {
    /// Pick one of `choices` (never empty).
    fn choose_card(&mut self, prompt: &str, choices: &[CardOption]) -> CardId;

    /// Answer a yes/no question.
    fn decide(&mut self, prompt: &str) -> bool;

    /// Return the positions of `items` in resolution order.
    ///
    /// The answer must be a permutation of `0..items.len()`.
    fn choose_order(&mut self, prompt: &str, items: &[OrderItem]) -> Vec<usize>;

    /// Pick one of `options` (never empty).
    fn choose_option(&mut self, prompt: &str, options: &[String]) -> String;

    /// Pick a value in `min..=max`.
    fn choose_amount(&mut self, prompt: &str, min: u32, max: u32) -> u32;
}

/// Answers every question without a player.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDecisions;

impl DecisionProvider for DefaultDecisions {
    fn choose_card(&mut self, _prompt: &str, choices: &[CardOption]) -> CardId {
        choices.first().map_or(CardId::new(0), |c| c.id)
    }

    fn decide(&mut self, _prompt: &str) -> bool {
        true
    }

    fn choose_order(&mut self, _prompt: &str, items: &[OrderItem]) -> Vec<usize> {
        (0..items.len()).collect()
    }

    fn choose_option(&mut self, _prompt: &str, options: &[String]) -> String {
        options.first().cloned().unwrap_or_default()
    }

    fn choose_amount(&mut self, _prompt: &str, _min: u32, max: u32) -> u32 {
        max
    }
}
