//! Entering play, moving, attaching and discarding.
//!
//! The zone graph does the bookkeeping; these methods add the rules side
//! effects: listener registration, ambush fatigue, attachment cascades, the
//! ranger token, and log lines.

use crate::abilities::AbilityKind;
use crate::cards::{Card, CardType, Keyword, ListenerScope};
use crate::core::{CardId, EngineError};
use crate::triggers::{EventType, Timing};
use crate::zones::Zone;

use super::Engine;

impl Engine {
    // === Entering play ===

    /// Put a card into play in `zone`.
    ///
    /// The card leaves whatever pile or hand held it, its in-play listeners
    /// and abilities are registered, its behaviour's `enters_play` runs, and
    /// `EntersPlay/After` listeners fire with the card as subject.
    pub fn put_into_play(&mut self, id: CardId, zone: Zone, target: Option<CardId>) -> Result<(), EngineError> {
        self.state.require(id)?;
        if self.state.is_in_play(id) {
            return Ok(());
        }
        self.take_out_of_piles(id);
        self.unregister_card(id);

        self.state.zones.place(id, zone);
        self.register_card(id, ListenerScope::InPlay)?;
        let name = self.name(id);
        self.log(format!("{} enters play in {}.", name, zone));

        let behavior = self.behavior_of(id)?;
        behavior.enters_play(self, id, target)?;
        self.trigger(EventType::EntersPlay, Timing::After, None, 0, Some(id))?;
        Ok(())
    }

    /// Default placement for a card played from hand.
    ///
    /// Moments are discarded after resolving. Attachments with a target
    /// enter play in the target's zone attached to it. Everything else goes
    /// to the player area.
    pub fn place_played_card(&mut self, card: CardId, target: Option<CardId>) -> Result<(), EngineError> {
        let types = self.state.require(card)?.types.clone();
        if types.contains(&CardType::Moment) {
            return self.discard(card);
        }
        if types.contains(&CardType::Attachment) {
            if let Some(target) = target {
                let zone = self.state.zone_of(target).unwrap_or(Zone::PlayerArea);
                self.put_into_play(card, zone, Some(target))?;
                return self.attach(card, target);
            }
        }
        self.put_into_play(card, Zone::PlayerArea, target)
    }

    /// Add a card to the arena and put it straight into play.
    pub fn spawn(&mut self, card: Card, zone: Zone) -> Result<CardId, EngineError> {
        let id = self.state.add_card(card);
        self.put_into_play(id, zone, None)?;
        Ok(id)
    }

    // === Setup helpers ===

    /// Add a card to the bottom of the path deck.
    pub fn add_to_path_deck(&mut self, card: Card) -> CardId {
        let id = self.state.add_card(card);
        self.state.path_deck.push_back(id);
        id
    }

    /// Add a card to the bottom of the ranger deck.
    pub fn add_to_ranger_deck(&mut self, card: Card) -> CardId {
        let id = self.state.add_card(card);
        self.state.ranger.deck.push_back(id);
        id
    }

    /// Add a card to the hand and register its hand listeners.
    pub fn add_to_hand(&mut self, card: Card) -> Result<CardId, EngineError> {
        let id = self.state.add_card(card);
        self.state.ranger.hand.push_back(id);
        self.register_card(id, ListenerScope::Hand)?;
        Ok(id)
    }

    // === Moving ===

    /// Move an in-play card, and everything attached to it, to `zone`.
    ///
    /// Returns false without changing anything when the card is not in play,
    /// already in `zone`, or attached to another card (attachments follow
    /// their parent). An Ambush card arriving Within Reach fatigues the
    /// ranger by its current presence.
    pub fn move_card(&mut self, id: CardId, zone: Zone) -> Result<bool, EngineError> {
        let Some(current) = self.state.zone_of(id) else {
            return Ok(false);
        };
        if current == zone || self.state.zones.parent_of(id).is_some() {
            return Ok(false);
        }

        let moved = self.state.zones.relocate_tree(id, zone);
        let name = self.name(id);
        self.log(format!("{} moves to {}.", name, zone));
        tracing::debug!(card = %id, from = %current, to = %zone, carried = moved.len() - 1, "card moved");

        let ambush = self.state.require(id)?.has_keyword(Keyword::Ambush);
        if ambush && zone == Zone::WithinReach {
            let presence = self.current_presence(id).max(0).unsigned_abs();
            self.log(format!("{} ambushes the ranger.", name));
            self.fatigue_ranger(presence)?;
        }
        Ok(true)
    }

    // === Attachments ===

    /// Attach `child` to `parent`. When both are in play in different zones
    /// the child (and its own attachments) move to the parent's zone.
    pub fn attach(&mut self, child: CardId, parent: CardId) -> Result<(), EngineError> {
        self.state.require(child)?;
        self.state.require(parent)?;
        self.state.zones.link(child, parent)?;

        if let (Some(child_zone), Some(parent_zone)) = (self.state.zone_of(child), self.state.zone_of(parent)) {
            if child_zone != parent_zone {
                self.state.zones.relocate_tree(child, parent_zone);
            }
        }
        let (child_name, parent_name) = (self.name(child), self.name(parent));
        self.log(format!("{} is attached to {}.", child_name, parent_name));
        Ok(())
    }

    /// Detach a card from its parent. A card of type Attachment has nothing
    /// left to hold on to and is discarded.
    pub fn unattach(&mut self, child: CardId) -> Result<(), EngineError> {
        let Some(parent) = self.state.zones.unlink(child) else {
            return Err(EngineError::NotAttached(child));
        };
        let (child_name, parent_name) = (self.name(child), self.name(parent));
        self.log(format!("{} is no longer attached to {}.", child_name, parent_name));

        if self.state.require(child)?.has_type(CardType::Attachment) {
            self.discard(child)?;
        }
        Ok(())
    }

    // === Discarding ===

    /// Discard a card.
    ///
    /// Attached cards are discarded first, depth first. The card then loses
    /// its attachment edge, its zone, its listeners and abilities, and every
    /// modifier it placed on other cards. Lifecycle state resets to ready
    /// with zeroed counters. Ranger cards go to the ranger discard, anything
    /// else to the path discard.
    pub fn discard(&mut self, id: CardId) -> Result<(), EngineError> {
        self.state.require(id)?;
        let name = self.name(id);

        for child in self.state.zones.attachments_of(id) {
            self.discard(child)?;
        }

        self.state.zones.unlink(id);
        self.state.zones.remove(id);
        self.take_out_of_piles(id);
        if self.state.location == Some(id) {
            self.state.location = None;
        }
        if self.state.ranger.token_on == Some(id) {
            self.state.ranger.token_on = None;
            self.log("The ranger token returns to the role card.");
        }

        self.unregister_card(id);
        let others: Vec<CardId> = self
            .state
            .cards()
            .filter(|c| c.id != id && c.modifiers.iter().any(|m| m.source == id))
            .map(|c| c.id)
            .collect();
        for other in others {
            if let Some(card) = self.state.card_mut(other) {
                card.remove_modifiers_from(id);
            }
        }

        let card = self.state.require_mut(id)?;
        card.ready();
        if card.progress.is_some() {
            card.progress = Some(0);
        }
        if card.harm.is_some() {
            card.harm = Some(0);
        }
        card.modifiers.clear();
        card.tokens.clear();
        let is_ranger_card = card.has_type(CardType::Ranger);

        if is_ranger_card {
            self.state.ranger.discard.push_back(id);
        } else {
            self.state.path_discard.push_back(id);
        }
        self.log(format!("{} is discarded.", name));
        Ok(())
    }

    /// Remove a card from every pile and the hand.
    fn take_out_of_piles(&mut self, id: CardId) {
        let ranger = &mut self.state.ranger;
        ranger.remove_from_hand(id);
        ranger.deck.retain(|&c| c != id);
        ranger.discard.retain(|&c| c != id);
        ranger.fatigue.retain(|&c| c != id);
        self.state.path_deck.retain(|&c| c != id);
        self.state.path_discard.retain(|&c| c != id);
    }

    // === Ranger token ===

    /// Move the ranger token to a card (or to the role card with `None`).
    ///
    /// Returns false when an active `PreventRangerTokenMove` ability holds
    /// the token where it is.
    pub fn move_ranger_token(&mut self, to: Option<CardId>) -> Result<bool, EngineError> {
        if let Some(to) = to {
            self.state.require(to)?;
        }
        let current = self.state.ranger.token_on;
        if current == to {
            return Ok(false);
        }
        if current.is_some() && self.is_blocked(AbilityKind::PreventRangerTokenMove, current) {
            self.log("The ranger token cannot be moved.");
            return Ok(false);
        }
        self.state.ranger.token_on = to;
        let place = match to {
            Some(card) => self.name(card),
            None => "the role card".to_owned(),
        };
        self.log(format!("The ranger token moves to {}.", place));
        Ok(true)
    }

    /// Return the ranger token to the role card, ignoring any block.
    pub fn return_ranger_token(&mut self) {
        if self.state.ranger.token_on.take().is_some() {
            self.log("The ranger token returns to the role card.");
        }
    }
}
