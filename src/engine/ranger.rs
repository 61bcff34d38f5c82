//! Ranger bookkeeping: energy, fatigue, soothing, drawing and injury.

use crate::cards::{Aspect, ListenerScope};
use crate::core::{CardId, EngineError};

use super::Engine;

impl Engine {
    /// Spend energy of one aspect. A shortfall is a fatal error and spends
    /// nothing.
    pub fn spend_energy(&mut self, aspect: Aspect, amount: u32) -> Result<(), EngineError> {
        let available = self.state.ranger.energy(aspect);
        if !self.state.ranger.spend(aspect, amount) {
            return Err(EngineError::InsufficientEnergy {
                aspect,
                needed: amount,
                available,
            });
        }
        if amount > 0 {
            self.log(format!("The ranger spends {} {} energy.", amount, aspect));
        }
        Ok(())
    }

    /// Fatigue the ranger: move `amount` cards from the top of the deck to
    /// the fatigue pile. If the deck cannot cover it the day ends instead.
    pub fn fatigue_ranger(&mut self, amount: u32) -> Result<(), EngineError> {
        if amount == 0 {
            return Ok(());
        }
        let amount = amount as usize;
        if self.state.ranger.deck.len() < amount {
            self.end_day("The ranger cannot suffer any more fatigue.");
            return Ok(());
        }
        for _ in 0..amount {
            if let Some(card) = self.state.ranger.deck.pop_front() {
                self.state.ranger.fatigue.push_front(card);
            }
        }
        self.log(format!("The ranger suffers {} fatigue.", amount));
        Ok(())
    }

    /// Soothe up to `amount` fatigue: the most recent fatigue cards return
    /// to the hand. Returns how many were soothed.
    pub fn soothe(&mut self, amount: u32) -> Result<u32, EngineError> {
        let mut soothed = 0;
        while soothed < amount {
            let Some(card) = self.state.ranger.fatigue.pop_front() else {
                break;
            };
            self.return_to_hand(card)?;
            soothed += 1;
        }
        if soothed > 0 {
            self.log(format!("The ranger soothes {} fatigue.", soothed));
        }
        Ok(soothed)
    }

    /// Draw the top ranger card into the hand. An empty deck ends the day.
    pub fn draw_ranger_card(&mut self) -> Result<Option<CardId>, EngineError> {
        let Some(card) = self.state.ranger.deck.pop_front() else {
            self.end_day("The ranger deck is empty.");
            return Ok(None);
        };
        self.return_to_hand(card)?;
        let name = self.name(card);
        self.log(format!("The ranger draws {}.", name));
        Ok(Some(card))
    }

    /// Put a card in the hand and register its hand listeners.
    pub(crate) fn return_to_hand(&mut self, card: CardId) -> Result<(), EngineError> {
        self.state.ranger.hand.push_back(card);
        self.register_card(card, ListenerScope::Hand)
    }

    /// Add one injury. Reaching the configured maximum ends the day.
    pub fn injure_ranger(&mut self) -> Result<(), EngineError> {
        self.state.ranger.injury += 1;
        let injury = self.state.ranger.injury;
        self.log(format!("The ranger is injured ({} injury).", injury));
        if injury >= self.config.max_injury {
            self.end_day("The ranger is too injured to go on.");
        }
        Ok(())
    }
}
