//! The challenge deck.
//!
//! The standard deck has 24 cards. For every aspect the modifiers follow
//! the same distribution (six +1, ten 0, seven -1, one -2), but each aspect
//! sees it in a different rotation, so a single draw does not move all four
//! aspects together. Symbols cycle Sun, Mountain, Crest. The card whose AWA
//! modifier is -2 reshuffles the deck after it is drawn.
//!
//! ```
//! use trail_rules::cards::{Aspect, ChallengeSymbol};
//! use trail_rules::challenge::{ChallengeCard, ChallengeDeck};
//!
//! let mut deck = ChallengeDeck::stacked(vec![
//!     ChallengeCard::new(ChallengeSymbol::Crest, 1),
//! ]);
//! let card = deck.draw();
//! assert_eq!(card.symbol, ChallengeSymbol::Crest);
//! assert_eq!(card.modifier(Aspect::Spirit), 1);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Aspect, ChallengeSymbol};
use crate::core::GameRng;

const DISTRIBUTION: [i32; 24] = [
    1, 1, 1, 1, 1, 1, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    -1, -1, -1, -1, -1, -1, -1, //
    -2,
];

/// One challenge card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeCard {
    pub symbol: ChallengeSymbol,
    /// Modifier per aspect, indexed by `Aspect::index`.
    pub modifiers: [i32; 4],
    /// Shuffle the discard back in after this card is drawn.
    pub reshuffle: bool,
}

impl ChallengeCard {
    /// Card with the same modifier for every aspect.
    #[must_use]
    pub fn new(symbol: ChallengeSymbol, modifier: i32) -> Self {
        Self {
            symbol,
            modifiers: [modifier; 4],
            reshuffle: false,
        }
    }

    /// Override the modifier for one aspect.
    #[must_use]
    pub fn with_modifier(mut self, aspect: Aspect, modifier: i32) -> Self {
        self.modifiers[aspect.index()] = modifier;
        self
    }

    #[must_use]
    pub fn with_reshuffle(mut self) -> Self {
        self.reshuffle = true;
        self
    }

    #[must_use]
    pub fn modifier(&self, aspect: Aspect) -> i32 {
        self.modifiers[aspect.index()]
    }
}

/// Draw pile, discard and the RNG that shuffles them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChallengeDeck {
    draw_pile: Vector<ChallengeCard>,
    discard: Vector<ChallengeCard>,
    rng: GameRng,
}

impl ChallengeDeck {
    /// The standard 24-card deck, shuffled.
    #[must_use]
    pub fn standard(rng: GameRng) -> Self {
        let cards = (0..DISTRIBUTION.len())
            .map(|i| {
                let mut modifiers = [0; 4];
                for aspect in Aspect::ALL {
                    let offset = aspect.index() * 6;
                    modifiers[aspect.index()] = DISTRIBUTION[(i + offset) % DISTRIBUTION.len()];
                }
                ChallengeCard {
                    symbol: ChallengeSymbol::ALL[i % ChallengeSymbol::ALL.len()],
                    reshuffle: modifiers[Aspect::Awareness.index()] == -2,
                    modifiers,
                }
            })
            .collect();

        let mut deck = Self {
            draw_pile: cards,
            discard: Vector::new(),
            rng,
        };
        deck.rng.shuffle_vector(&mut deck.draw_pile);
        deck
    }

    /// A deck that deals `cards` in the given order before reshuffling.
    #[must_use]
    pub fn stacked(cards: Vec<ChallengeCard>) -> Self {
        Self {
            draw_pile: cards.into_iter().collect(),
            discard: Vector::new(),
            rng: GameRng::new(0),
        }
    }

    /// Draw the top card. An exhausted pile is refilled from the discard.
    ///
    /// A deck with no cards at all deals a neutral Sun card.
    pub fn draw(&mut self) -> ChallengeCard {
        if self.draw_pile.is_empty() {
            self.reshuffle();
        }
        let Some(card) = self.draw_pile.pop_front() else {
            tracing::warn!("challenge deck is empty; dealing a neutral card");
            return ChallengeCard::new(ChallengeSymbol::Sun, 0);
        };
        self.discard.push_back(card.clone());
        if card.reshuffle {
            self.reshuffle();
        }
        card
    }

    /// Shuffle the discard back into the draw pile.
    pub fn reshuffle(&mut self) {
        let mut all = std::mem::take(&mut self.draw_pile);
        all.append(std::mem::take(&mut self.discard));
        self.rng.shuffle_vector(&mut all);
        self.draw_pile = all;
        tracing::debug!(cards = self.draw_pile.len(), "challenge deck reshuffled");
    }

    /// Cards left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }
}
