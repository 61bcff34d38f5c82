//! The ranger: energy, piles, injury and the ranger token.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::CardId;
use crate::cards::Aspect;

/// Per-ranger state.
///
/// Card ids in the piles refer to cards in the `GameState` arena. The
/// front of `deck` is its top; the front of `fatigue` is the most recently
/// fatigued card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangerState {
    pub name: String,

    /// Printed aspect values; energy refreshes to these.
    pub aspects: BTreeMap<Aspect, u32>,
    pub energy: BTreeMap<Aspect, u32>,

    pub hand: Vector<CardId>,
    pub deck: Vector<CardId>,
    pub discard: Vector<CardId>,
    pub fatigue: Vector<CardId>,

    pub injury: u32,

    /// Card holding the ranger token. `None` means the role card.
    pub token_on: Option<CardId>,
}

impl RangerState {
    /// A ranger with no energy and empty piles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aspects: BTreeMap::new(),
            energy: BTreeMap::new(),
            hand: Vector::new(),
            deck: Vector::new(),
            discard: Vector::new(),
            fatigue: Vector::new(),
            injury: 0,
            token_on: None,
        }
    }

    /// Set an aspect value and fill its energy.
    #[must_use]
    pub fn with_aspect(mut self, aspect: Aspect, value: u32) -> Self {
        self.aspects.insert(aspect, value);
        self.energy.insert(aspect, value);
        self
    }

    /// Current energy of an aspect.
    #[must_use]
    pub fn energy(&self, aspect: Aspect) -> u32 {
        self.energy.get(&aspect).copied().unwrap_or(0)
    }

    /// Spend energy. Returns false and spends nothing if there is not enough.
    pub fn spend(&mut self, aspect: Aspect, amount: u32) -> bool {
        let available = self.energy(aspect);
        if available < amount {
            return false;
        }
        self.energy.insert(aspect, available - amount);
        true
    }

    /// Add energy without a cap.
    pub fn gain(&mut self, aspect: Aspect, amount: u32) {
        *self.energy.entry(aspect).or_insert(0) += amount;
    }

    /// Refill every aspect to its printed value.
    pub fn refresh_energy(&mut self) {
        self.energy = self.aspects.clone();
    }

    #[must_use]
    pub fn in_hand(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Remove a card from the hand. Returns false if it was not there.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.index_of(&card) {
            Some(index) => {
                self.hand.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn token_on_role(&self) -> bool {
        self.token_on.is_none()
    }
}
