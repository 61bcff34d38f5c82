//! Constant ability definitions.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cards::ValueModifier;
use crate::core::{CardId, GameState};

/// What a constant ability does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Adjusts the presence of matching cards.
    ModifyPresence,
    /// Blocks travel while active.
    PreventTravel,
    /// Keeps matching cards exhausted.
    PreventReadying,
    /// Pins the ranger token to the card it sits on.
    PreventRangerTokenMove,
    /// Redirects guide entries for matching cards.
    OverrideEntry,
}

impl AbilityKind {
    /// Kinds that answer a yes/no "is this blocked" question.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(
            self,
            AbilityKind::PreventTravel
                | AbilityKind::PreventReadying
                | AbilityKind::PreventRangerTokenMove
        )
    }
}

/// Predicate over the current state and the subject card of the query.
pub type AbilityCondition = Rc<dyn Fn(&GameState, Option<CardId>) -> bool>;

/// A passive ability owned by a card.
#[derive(Clone)]
pub struct ConstantAbility {
    pub kind: AbilityKind,
    pub source: CardId,
    pub label: String,
    pub condition: AbilityCondition,
    /// Set for `ModifyPresence`.
    pub modifier: Option<ValueModifier>,
    /// Set for `OverrideEntry`.
    pub override_entry: Option<String>,
}

impl ConstantAbility {
    fn new(kind: AbilityKind, source: CardId, label: impl Into<String>) -> Self {
        Self {
            kind,
            source,
            label: label.into(),
            condition: Rc::new(|_, _| true),
            modifier: None,
            override_entry: None,
        }
    }

    /// Presence adjustment of `amount` for every card the condition accepts.
    pub fn modify_presence(source: CardId, amount: i32, label: impl Into<String>) -> Self {
        let mut ability = Self::new(AbilityKind::ModifyPresence, source, label);
        ability.modifier = Some(ValueModifier::presence(amount, source));
        ability
    }

    pub fn prevent_travel(source: CardId, label: impl Into<String>) -> Self {
        Self::new(AbilityKind::PreventTravel, source, label)
    }

    pub fn prevent_readying(source: CardId, label: impl Into<String>) -> Self {
        Self::new(AbilityKind::PreventReadying, source, label)
    }

    pub fn prevent_ranger_token_move(source: CardId, label: impl Into<String>) -> Self {
        Self::new(AbilityKind::PreventRangerTokenMove, source, label)
    }

    /// Redirect guide entries for matching cards to `entry`.
    pub fn override_entry(source: CardId, entry: impl Into<String>, label: impl Into<String>) -> Self {
        let mut ability = Self::new(AbilityKind::OverrideEntry, source, label);
        ability.override_entry = Some(entry.into());
        ability
    }

    /// Set the activation condition.
    #[must_use]
    pub fn when(mut self, condition: impl Fn(&GameState, Option<CardId>) -> bool + 'static) -> Self {
        self.condition = Rc::new(condition);
        self
    }

    /// Evaluate the condition for a subject.
    #[must_use]
    pub fn is_active(&self, state: &GameState, subject: Option<CardId>) -> bool {
        (self.condition)(state, subject)
    }
}

impl std::fmt::Debug for ConstantAbility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstantAbility")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .field("label", &self.label)
            .field("modifier", &self.modifier)
            .field("override_entry", &self.override_entry)
            .finish_non_exhaustive()
    }
}
