//! Conciliator cards.

use crate::cards::{Approach, Aspect, Card, CardBehavior, CardLibrary, CardType, EnergyCost, ListenerScope};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::triggers::{EventListener, EventType, Timing};
use crate::zones::Zone;

pub const A_DEAR_FRIEND: &str = "conciliator/a_dear_friend";

pub(super) fn register(library: &mut CardLibrary) {
    library.register(A_DEAR_FRIEND, ADearFriend);
}

/// Attachment played onto a Human still in the path deck or discard. The
/// Human comes into play with it; when that Human clears, its progress is
/// shared out among other beings.
#[must_use]
pub fn a_dear_friend() -> Card {
    Card::new(CardId::new(0), "A Dear Friend", A_DEAR_FRIEND)
        .with_type(CardType::Ranger)
        .with_type(CardType::Attachment)
        .with_trait("Expert")
        .with_cost(EnergyCost::new(Aspect::Spirit, 1))
        .with_icons(Approach::Connection, 1)
}

struct ADearFriend;

impl ADearFriend {
    /// Give away `progress` in chunks the player picks.
    fn share_progress(engine: &mut Engine, friend: CardId, progress: i32) -> Result<(), EngineError> {
        let mut remaining = u32::try_from(progress).unwrap_or(0);
        while remaining > 0 {
            let others = engine.state().in_play_where(|c| c.id != friend && c.has_type(CardType::Being));
            let Some(being) = engine.choose_card("Choose a being to receive progress", &others)? else {
                break;
            };
            let amount = engine.choose_amount("How much progress?", 0, remaining)?;
            if amount == 0 {
                break;
            }
            engine.add_progress(being, i32::try_from(amount).unwrap_or(i32::MAX))?;
            remaining -= amount;
        }
        Ok(())
    }
}

impl CardBehavior for ADearFriend {
    fn play_targets(&self, engine: &Engine, _card: CardId) -> Option<Vec<CardId>> {
        let state = engine.state();
        let humans = state
            .path_deck
            .iter()
            .chain(state.path_discard.iter())
            .copied()
            .filter(|&id| state.card(id).is_some_and(|c| c.has_trait("Human")))
            .collect();
        Some(humans)
    }

    fn on_played(&self, engine: &mut Engine, card: CardId, target: Option<CardId>) -> Result<(), EngineError> {
        engine.put_into_play(card, Zone::PlayerArea, target)
    }

    /// Bring the chosen Human into play and attach to it.
    fn enters_play(&self, engine: &mut Engine, card: CardId, target: Option<CardId>) -> Result<(), EngineError> {
        let Some(friend) = target else {
            return Ok(());
        };
        let zone = engine.card(friend)?.starting_zone.unwrap_or(Zone::WithinReach);
        engine.put_into_play(friend, zone, None)?;
        engine.attach(card, friend)
    }

    fn listeners(&self, card: &Card, scope: ListenerScope) -> Vec<EventListener> {
        if scope != ListenerScope::InPlay {
            return Vec::new();
        }
        let id = card.id;
        vec![EventListener::new(id, EventType::Clear, Timing::When, "A Dear Friend")
            .when_active(move |engine, cleared| {
                cleared.is_some() && engine.state().zones.parent_of(id) == cleared
            })
            .with_effect(move |engine, progress| {
                if let Some(friend) = engine.state().zones.parent_of(id) {
                    Self::share_progress(engine, friend, progress)?;
                }
                Ok(0)
            })]
    }
}
