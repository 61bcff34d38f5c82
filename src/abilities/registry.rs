//! Constant ability registry.

use crate::core::{CardId, GameState};

use super::constant::{AbilityKind, ConstantAbility};

/// Registered constant abilities, in registration order.
///
/// Order matters for `OverrideEntry`: the first active override wins.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    abilities: Vec<ConstantAbility>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, ability: ConstantAbility) {
        self.abilities.push(ability);
    }

    /// Remove every ability owned by `source`. Returns how many were removed.
    pub fn remove_by_source(&mut self, source: CardId) -> usize {
        let before = self.abilities.len();
        self.abilities.retain(|a| a.source != source);
        before - self.abilities.len()
    }

    /// Abilities of a kind, regardless of whether they are active.
    pub fn by_kind(&self, kind: AbilityKind) -> impl Iterator<Item = &ConstantAbility> {
        self.abilities.iter().filter(move |a| a.kind == kind)
    }

    /// Abilities of a kind whose condition holds for `subject` right now.
    pub fn active<'a>(
        &'a self,
        kind: AbilityKind,
        state: &'a GameState,
        subject: Option<CardId>,
    ) -> impl Iterator<Item = &'a ConstantAbility> + 'a {
        self.by_kind(kind).filter(move |a| a.is_active(state, subject))
    }

    /// True if any active ability of `kind` matches `subject`.
    #[must_use]
    pub fn is_blocked(&self, kind: AbilityKind, state: &GameState, subject: Option<CardId>) -> bool {
        self.active(kind, state, subject).next().is_some()
    }

    /// First active override for `subject`, if any.
    #[must_use]
    pub fn entry_override(&self, state: &GameState, subject: Option<CardId>) -> Option<&ConstantAbility> {
        self.abilities
            .iter()
            .find(|a| a.kind == AbilityKind::OverrideEntry && a.is_active(state, subject))
    }

    pub fn clear(&mut self) {
        self.abilities.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstantAbility> {
        self.abilities.iter()
    }
}
