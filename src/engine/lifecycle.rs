//! Card lifecycle: readying, exhausting, counters, presence and clearing.

use crate::abilities::AbilityKind;
use crate::cards::{Attribute, ClearKind};
use crate::core::{CardId, EngineError};
use crate::triggers::{EventType, Timing};
use crate::zones::Zone;

use super::Engine;

impl Engine {
    /// Ready a card unless an active `PreventReadying` ability holds it.
    ///
    /// Returns true if the card changed state.
    pub fn ready_card(&mut self, id: CardId) -> Result<bool, EngineError> {
        self.state.require(id)?;
        if self.is_blocked(AbilityKind::PreventReadying, Some(id)) {
            tracing::debug!(card = %id, "readying prevented");
            return Ok(false);
        }
        Ok(self.state.require_mut(id)?.ready())
    }

    /// Exhaust a card. Returns true if it changed state.
    pub fn exhaust_card(&mut self, id: CardId) -> Result<bool, EngineError> {
        let changed = self.state.require_mut(id)?.exhaust();
        if changed {
            let name = self.name(id);
            self.log(format!("{} is exhausted.", name));
        }
        Ok(changed)
    }

    /// Add progress to a card. Negative amounts are clamped to zero and
    /// nulled counters ignore it.
    pub fn add_progress(&mut self, id: CardId, amount: i32) -> Result<(), EngineError> {
        let card = self.state.require_mut(id)?;
        if card.progress.is_none() || amount <= 0 {
            return Ok(());
        }
        card.add_progress(amount);
        let total = card.progress_value();
        let name = self.name(id);
        self.log(format!("{} gains {} progress ({} total).", name, amount, total));
        Ok(())
    }

    /// Remove progress, stopping at zero. Returns how much was removed.
    pub fn remove_progress(&mut self, id: CardId, amount: u32) -> Result<u32, EngineError> {
        let card = self.state.require_mut(id)?;
        let removed = card.remove_progress(amount);
        if removed > 0 {
            let total = card.progress_value();
            let name = self.name(id);
            self.log(format!("{} loses {} progress ({} total).", name, removed, total));
        }
        Ok(removed)
    }

    /// Add harm to a card. Negative amounts are clamped to zero and nulled
    /// counters ignore it.
    pub fn add_harm(&mut self, id: CardId, amount: i32) -> Result<(), EngineError> {
        let card = self.state.require_mut(id)?;
        if card.harm.is_none() || amount <= 0 {
            return Ok(());
        }
        card.add_harm(amount);
        let total = card.harm_value();
        let name = self.name(id);
        self.log(format!("{} takes {} harm ({} total).", name, amount, total));
        Ok(())
    }

    /// Remove harm, stopping at zero. Returns how much was removed.
    pub fn remove_harm(&mut self, id: CardId, amount: u32) -> Result<u32, EngineError> {
        let card = self.state.require_mut(id)?;
        let removed = card.remove_harm(amount);
        if removed > 0 {
            let total = card.harm_value();
            let name = self.name(id);
            self.log(format!("{} heals {} harm ({} total).", name, removed, total));
        }
        Ok(removed)
    }

    /// Presence after card modifiers and active `ModifyPresence` abilities,
    /// floored at zero. Cards without printed presence read as zero.
    #[must_use]
    pub fn current_presence(&self, id: CardId) -> i32 {
        let Some(card) = self.state.card(id) else {
            return 0;
        };
        let printed = card.presence.unwrap_or(0);
        let own = card.modifier_total(Attribute::Presence);
        let abilities: i32 = self
            .abilities
            .active(AbilityKind::ModifyPresence, &self.state, Some(id))
            .filter_map(|a| a.modifier)
            .filter(|m| m.attribute == Attribute::Presence)
            .map(|m| m.amount)
            .sum();
        (printed + own + abilities).max(0)
    }

    // === Clearing ===

    /// Clear every in-play card whose clear condition holds.
    ///
    /// Cards are checked player area outward; each is re-checked right
    /// before it clears, so a card discarded by an earlier clear is skipped.
    /// The current location never clears; its progress gates travel instead.
    /// Returns the cleared cards in order.
    pub fn process_clears(&mut self) -> Result<Vec<CardId>, EngineError> {
        let mut cleared = Vec::new();
        let candidates = self.state.zones.all_in_play();
        for id in candidates {
            if self.day_ended {
                break;
            }
            if !self.state.is_in_play(id) || self.state.location == Some(id) {
                continue;
            }
            let token_here = self.state.ranger.token_on == Some(id);
            let Some(kind) = self.state.require(id)?.clear_condition(token_here) else {
                continue;
            };
            self.clear_card(id, kind)?;
            cleared.push(id);
        }
        Ok(cleared)
    }

    /// Clear one card: fire `Clear/When` listeners, resolve its guide entry,
    /// then discard it if it is still in play.
    pub fn clear_card(&mut self, id: CardId, kind: ClearKind) -> Result<(), EngineError> {
        let name = self.name(id);
        self.log(format!("{} cleared!", name));

        let card = self.state.require(id)?;
        let carried = match kind {
            ClearKind::Progress => card.progress_value(),
            ClearKind::Harm => card.harm_value(),
            ClearKind::RangerToken => 0,
        };
        let entry = card.guide_entry.clone();
        let carried = i32::try_from(carried).unwrap_or(i32::MAX);

        self.trigger(EventType::Clear, Timing::When, None, carried, Some(id))?;
        if let Some(key) = entry {
            self.resolve_entry(&key, Some(id), Some(kind))?;
        }
        if self.state.is_in_play(id) {
            self.discard(id)?;
        }
        Ok(())
    }

    /// Ready every in-play card, respecting `PreventReadying`.
    pub(crate) fn ready_all(&mut self) -> Result<(), EngineError> {
        for zone in [Zone::PlayerArea, Zone::WithinReach, Zone::AlongTheWay, Zone::Surroundings] {
            for id in self.state.cards_in(zone) {
                self.ready_card(id)?;
            }
        }
        Ok(())
    }
}
