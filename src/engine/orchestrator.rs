//! Challenge effect resolution.
//!
//! After a test, every ready card whose behaviour answers the drawn symbol
//! may resolve an effect. Zones resolve outermost first. Within a zone each
//! candidate is dry-run on a speculative copy; only candidates that would
//! change something are kept, and the player orders them when there is
//! more than one.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rustc_hash::FxHashSet;

use crate::cards::ChallengeSymbol;
use crate::core::{CardId, EngineError};
use crate::decisions::OrderItem;
use crate::zones::Zone;

use super::Engine;

impl Engine {
    /// Resolve challenge effects for `symbol`, zone by zone.
    ///
    /// Returns the cards whose effects resolved, in resolution order.
    pub fn resolve_challenge_effects(&mut self, symbol: ChallengeSymbol) -> Result<Vec<CardId>, EngineError> {
        let mut resolved: FxHashSet<CardId> = FxHashSet::default();
        let mut order = Vec::new();

        for zone in Zone::CHALLENGE_ORDER {
            if self.day_ended {
                break;
            }
            let candidates = self.challenge_candidates(zone, symbol, &resolved);
            let mut kept: Vec<CardId> = candidates
                .into_iter()
                .filter(|&card| self.would_resolve(card, symbol))
                .collect();

            if kept.len() > 1 {
                let items: Vec<OrderItem> = kept
                    .iter()
                    .enumerate()
                    .map(|(position, &card)| OrderItem {
                        position,
                        source: Some(card),
                        label: format!("{} ({:?})", self.name(card), symbol),
                    })
                    .collect();
                let prompt = format!("Choose the order of {:?} effects in {}", symbol, zone);
                let positions = self.choose_order(&prompt, &items)?;
                kept = positions.into_iter().map(|i| kept[i]).collect();
            }

            for card in kept {
                if self.day_ended {
                    break;
                }
                if !self.state.is_in_play(card) || !resolved.insert(card) {
                    continue;
                }
                let behavior = self.behavior_of(card)?;
                if behavior.resolve_challenge(self, card, symbol)? {
                    order.push(card);
                }
                self.process_clears()?;
            }
        }

        if order.is_empty() && !self.day_ended {
            self.log("No challenge effects resolved.");
        }
        Ok(order)
    }

    /// Ready cards in `zone` that answer `symbol` and have not resolved yet.
    fn challenge_candidates(&self, zone: Zone, symbol: ChallengeSymbol, resolved: &FxHashSet<CardId>) -> Vec<CardId> {
        self.state
            .cards_in(zone)
            .into_iter()
            .filter(|id| !resolved.contains(id))
            .filter(|&id| {
                self.state.card(id).is_some_and(|card| {
                    card.is_ready() && self.library.behavior(&card.definition).challenge_symbols().contains(&symbol)
                })
            })
            .collect()
    }

    /// Dry-run a card's effect on a speculative copy.
    ///
    /// An error or a panic inside the copy counts as "would resolve".
    ///
    /// A panic is caught here but still reaches the process panic hook, so
    /// the default hook prints it to stderr. Hosts that want absorbed dry-run
    /// panics to stay silent install their own hook with
    /// [`std::panic::set_hook`]. The engine never replaces the hook itself.
    #[must_use]
    pub fn would_resolve(&self, card: CardId, symbol: ChallengeSymbol) -> bool {
        let Ok(behavior) = self.behavior_of(card) else {
            return false;
        };
        let mut copy = self.speculative_copy();
        let verdict = catch_unwind(AssertUnwindSafe(|| behavior.resolve_challenge(&mut copy, card, symbol)));
        match verdict {
            Ok(Ok(changed)) => {
                tracing::debug!(card = %card, ?symbol, changed, "dry run");
                changed
            }
            Ok(Err(err)) => {
                tracing::debug!(card = %card, ?symbol, error = %err, "dry run failed; assuming it resolves");
                true
            }
            Err(_) => {
                tracing::warn!(card = %card, ?symbol, "dry run panicked; assuming it resolves");
                true
            }
        }
    }
}
