//! Explorer cards: a response moment and a role.

use crate::actions::Action;
use crate::cards::{Approach, Aspect, Card, CardBehavior, CardLibrary, CardType, EnergyCost, ListenerScope};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::triggers::{EventListener, EventType, Timing};

pub const WALK_WITH_ME: &str = "explorer/walk_with_me";
pub const PEERLESS_PATHFINDER: &str = "explorer/peerless_pathfinder";

const WALK_WITH_ME_COST: EnergyCost = EnergyCost::new(Aspect::Spirit, 1);

pub(super) fn register(library: &mut CardLibrary) {
    library.register(WALK_WITH_ME, WalkWithMe);
    library.register(PEERLESS_PATHFINDER, PeerlessPathfinder);
}

// ============================================================================
// Walk With Me
// ============================================================================

/// Response moment: after a successful Traverse, add progress equal to the
/// effort to a being.
#[must_use]
pub fn walk_with_me() -> Card {
    Card::new(CardId::new(0), "Walk With Me", WALK_WITH_ME)
        .with_type(CardType::Ranger)
        .with_type(CardType::Moment)
        .with_trait("Experience")
        .with_cost(WALK_WITH_ME_COST)
        .with_icons(Approach::Connection, 1)
}

struct WalkWithMe;

impl CardBehavior for WalkWithMe {
    fn listeners(&self, card: &Card, scope: ListenerScope) -> Vec<EventListener> {
        if scope != ListenerScope::Hand {
            return Vec::new();
        }
        let id = card.id;
        let listener = EventListener::new(id, EventType::TestSucceed, Timing::After, "Walk With Me")
            .with_verb("Traverse")
            .when_active(move |engine, _| {
                let state = engine.state();
                state.ranger.in_hand(id)
                    && state.ranger.energy(WALK_WITH_ME_COST.aspect) >= WALK_WITH_ME_COST.amount
                    && !state.beings_in_play().is_empty()
            })
            .with_effect(move |engine, effort| {
                if !engine.decide("Play Walk With Me?") {
                    return Ok(0);
                }
                engine.spend_energy(WALK_WITH_ME_COST.aspect, WALK_WITH_ME_COST.amount)?;
                engine.log("The ranger plays Walk With Me.");
                engine.discard(id)?;
                let beings = engine.state().beings_in_play();
                if let Some(being) = engine.choose_card("Choose a being to walk with", &beings)? {
                    engine.add_progress(being, effort)?;
                }
                Ok(0)
            });
        vec![listener]
    }

    /// Only played in response to a Traverse.
    fn play_targets(&self, _engine: &Engine, _card: CardId) -> Option<Vec<CardId>> {
        Some(Vec::new())
    }
}

// ============================================================================
// Peerless Pathfinder
// ============================================================================

#[must_use]
pub fn peerless_pathfinder() -> Card {
    Card::new(CardId::new(0), "Peerless Pathfinder", PEERLESS_PATHFINDER)
        .with_type(CardType::Role)
        .with_trait("Explorer")
}

struct PeerlessPathfinder;

impl CardBehavior for PeerlessPathfinder {
    /// Exhaust: move the ranger token to a feature, which then fatigues you
    /// by its presence.
    fn tests(&self, card: &Card) -> Vec<Action> {
        if !card.is_ready() {
            return Vec::new();
        }
        let role = card.id;
        vec![Action::plain(format!("{}-scout", role), "Scout a path", "Scout")
            .with_targets(|engine| engine.state().features_in_play())
            .on_success(move |engine, _effort, target| {
                let Some(feature) = target else {
                    return Ok(());
                };
                engine.exhaust_card(role)?;
                if engine.move_ranger_token(Some(feature))? {
                    let presence = engine.current_presence(feature).unsigned_abs();
                    engine.fatigue_ranger(presence)?;
                }
                Ok(())
            })]
    }
}
