//! Game state: the card arena plus everything positional.
//!
//! ## GameState
//!
//! Complete session state:
//! - Card arena (every physical card, wherever it is)
//! - Zone graph (in-play locations and attachments)
//! - Ranger state (energy, piles, injury, ranger token)
//! - Path deck and discard
//! - Challenge deck
//! - Round and day counters
//!
//! Everything is built on `im` persistent structures, so cloning the state
//! for a speculative dry run is O(1) and the clone shares storage until
//! one side writes.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use super::entity::CardId;
use super::error::EngineError;
use super::ranger::RangerState;
use super::rng::GameRng;
use crate::cards::{Card, CardType};
use crate::challenge::ChallengeDeck;
use crate::zones::{Zone, ZoneGraph};

/// Complete session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    cards: ImHashMap<CardId, Card>,
    next_card_id: u32,

    pub zones: ZoneGraph,
    pub ranger: RangerState,

    /// Front is the top of the deck.
    pub path_deck: Vector<CardId>,
    pub path_discard: Vector<CardId>,

    pub challenge_deck: ChallengeDeck,

    /// Current location card (kept in the Surroundings).
    pub location: Option<CardId>,

    /// Round within the current day (starts at 1).
    pub round_number: u32,
    pub day_number: u32,

    rng: GameRng,
}

impl GameState {
    /// Create a state with the standard challenge deck.
    #[must_use]
    pub fn new(ranger: RangerState, seed: u64) -> Self {
        let rng = GameRng::new(seed);
        Self {
            cards: ImHashMap::new(),
            next_card_id: 1,
            zones: ZoneGraph::new(),
            ranger,
            path_deck: Vector::new(),
            path_discard: Vector::new(),
            challenge_deck: ChallengeDeck::standard(rng.for_context("challenge")),
            location: None,
            round_number: 1,
            day_number: 1,
            rng: rng.for_context("path"),
        }
    }

    /// Replace the challenge deck (tests stack it).
    #[must_use]
    pub fn with_challenge_deck(mut self, deck: ChallengeDeck) -> Self {
        self.challenge_deck = deck;
        self
    }

    // === Arena ===

    /// Add a card to the arena, assigning it a fresh id.
    ///
    /// The card is not placed anywhere; callers put it in a pile or play it.
    pub fn add_card(&mut self, mut card: Card) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        card.id = id;
        self.cards.insert(id, card);
        id
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Look up a card that must exist.
    pub fn require(&self, id: CardId) -> Result<&Card, EngineError> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Mutable lookup of a card that must exist.
    pub fn require_mut(&mut self, id: CardId) -> Result<&mut Card, EngineError> {
        self.cards.get_mut(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Every card in the arena.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // === Play area queries ===

    #[must_use]
    pub fn is_in_play(&self, id: CardId) -> bool {
        self.zones.contains(id)
    }

    #[must_use]
    pub fn zone_of(&self, id: CardId) -> Option<Zone> {
        self.zones.zone_of(id)
    }

    /// Cards in a zone, in placement order.
    #[must_use]
    pub fn cards_in(&self, zone: Zone) -> Vec<CardId> {
        self.zones.cards_in(zone).iter().copied().collect()
    }

    /// In-play cards matching a predicate, from the player outward.
    pub fn in_play_where(&self, predicate: impl Fn(&Card) -> bool) -> Vec<CardId> {
        self.zones
            .all_in_play()
            .into_iter()
            .filter(|id| self.card(*id).is_some_and(&predicate))
            .collect()
    }

    #[must_use]
    pub fn beings_in_play(&self) -> Vec<CardId> {
        self.in_play_where(|c| c.has_type(CardType::Being))
    }

    #[must_use]
    pub fn features_in_play(&self) -> Vec<CardId> {
        self.in_play_where(|c| c.has_type(CardType::Feature))
    }

    /// In-play cards that came from the path deck.
    #[must_use]
    pub fn path_cards_in_play(&self) -> Vec<CardId> {
        self.in_play_where(|c| c.has_type(CardType::Path))
    }

    /// In-play cards carrying a trait.
    #[must_use]
    pub fn with_trait_in_play(&self, name: &str) -> Vec<CardId> {
        self.in_play_where(|c| c.has_trait(name))
    }

    /// First in-play card with the given title.
    #[must_use]
    pub fn find_in_play(&self, title: &str) -> Option<CardId> {
        self.in_play_where(|c| c.title == title).into_iter().next()
    }

    /// Title for log messages, with a letter suffix when several in-play
    /// cards share it ("Sitka Doe A", "Sitka Doe B").
    #[must_use]
    pub fn display_name(&self, id: CardId) -> String {
        let Some(card) = self.card(id) else {
            return id.to_string();
        };
        let mut twins = self.in_play_where(|c| c.title == card.title);
        if twins.len() < 2 || !twins.contains(&id) {
            return card.title.clone();
        }
        twins.sort();
        let position = twins.iter().position(|&t| t == id).unwrap_or(0);
        let suffix = char::from(b'A' + (position % 26) as u8);
        format!("{} {}", card.title, suffix)
    }

    // === Path deck ===

    /// Shuffle the path discard into the path deck.
    pub fn reshuffle_path_discard(&mut self) {
        let discard = std::mem::take(&mut self.path_discard);
        self.path_deck.append(discard);
        self.rng.shuffle_vector(&mut self.path_deck);
    }

    /// Shuffle the path deck in place.
    pub fn shuffle_path_deck(&mut self) {
        self.rng.shuffle_vector(&mut self.path_deck);
    }
}
