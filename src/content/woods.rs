//! Woods terrain set.

use crate::abilities::ConstantAbility;
use crate::actions::Action;
use crate::cards::{
    Approach, Aspect, Card, CardBehavior, CardLibrary, CardType, ChallengeSymbol, Keyword, Threshold,
};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::zones::Zone;

use super::harm_from_predator;

pub const SITKA_DOE: &str = "woods/sitka_doe";
pub const SITKA_BUCK: &str = "woods/sitka_buck";
pub const PROWLING_WOLHUND: &str = "woods/prowling_wolhund";
pub const OVERGROWN_THICKET: &str = "woods/overgrown_thicket";
pub const CAUSTIC_MULCHER: &str = "woods/caustic_mulcher";

pub(super) fn register(library: &mut CardLibrary) {
    library.register(SITKA_DOE, SitkaDoe);
    library.register(SITKA_BUCK, SitkaBuck);
    library.register(PROWLING_WOLHUND, ProwlingWolhund);
    library.register(OVERGROWN_THICKET, OvergrownThicket);
    library.register(CAUSTIC_MULCHER, CausticMulcher);
}

fn being(title: &str, key: &str, presence: i32) -> Card {
    Card::new(CardId::new(0), title, key)
        .with_type(CardType::Path)
        .with_type(CardType::Being)
        .with_presence(presence)
}

/// A test that targets the card offering it.
fn self_test(card: &Card, name: &str, aspect: Aspect, approach: Approach) -> Action {
    let id = card.id;
    Action::test(format!("{}-{}", card.id, name.to_lowercase()), name, name, aspect, approach)
        .with_targets(move |engine| {
            if engine.state().is_in_play(id) {
                vec![id]
            } else {
                Vec::new()
            }
        })
}

// ============================================================================
// Sitka Doe
// ============================================================================

#[must_use]
pub fn sitka_doe() -> Card {
    being("Sitka Doe", SITKA_DOE, 1)
        .with_trait("Prey")
        .with_trait("Mammal")
        .with_progress_threshold(Threshold::At(4))
        .with_harm_threshold(Threshold::At(2))
        .with_starting_zone(Zone::WithinReach)
}

struct SitkaDoe;

impl CardBehavior for SitkaDoe {
    fn tests(&self, card: &Card) -> Vec<Action> {
        vec![self_test(card, "Spook", Aspect::Spirit, Approach::Conflict)
            .with_difficulty(|engine, target| target.map_or(1, |t| engine.current_presence(t).max(1)))
            .on_success(|engine, _effort, target| {
                if let Some(doe) = target {
                    engine.move_card(doe, Zone::AlongTheWay)?;
                }
                Ok(())
            })]
    }

    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Sun, ChallengeSymbol::Mountain]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            // Bucks follow the doe: every active buck moves within reach.
            ChallengeSymbol::Sun => {
                let bucks = engine.state().in_play_where(|c| {
                    c.definition == SITKA_BUCK && c.is_ready()
                });
                let mut moved = false;
                for buck in bucks {
                    moved |= engine.move_card(buck, Zone::WithinReach)?;
                }
                Ok(moved)
            }
            ChallengeSymbol::Mountain => harm_from_predator(engine, card),
            ChallengeSymbol::Crest => Ok(false),
        }
    }
}

// ============================================================================
// Sitka Buck
// ============================================================================

#[must_use]
pub fn sitka_buck() -> Card {
    being("Sitka Buck", SITKA_BUCK, 2)
        .with_trait("Prey")
        .with_trait("Mammal")
        .with_progress_threshold(Threshold::At(5))
        .with_harm_threshold(Threshold::At(4))
        .with_starting_zone(Zone::AlongTheWay)
}

struct SitkaBuck;

impl CardBehavior for SitkaBuck {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &ChallengeSymbol::ALL
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            // Two active bucks lock antlers.
            ChallengeSymbol::Sun => {
                let rivals = engine
                    .state()
                    .in_play_where(|c| c.definition == SITKA_BUCK && c.id != card && c.is_ready());
                let Some(rival) = engine.choose_card("Choose a buck to lock antlers with", &rivals)? else {
                    return Ok(false);
                };
                engine.exhaust_card(card)?;
                engine.add_harm(card, 2)?;
                engine.add_harm(rival, 2)?;
                Ok(true)
            }
            // The buck charges an active predator.
            ChallengeSymbol::Mountain => {
                let predators = engine
                    .state()
                    .in_play_where(|c| c.has_trait("Predator") && c.is_ready());
                let Some(predator) = engine.choose_card("Choose a predator for the buck to charge", &predators)? else {
                    return Ok(false);
                };
                let presence = engine.current_presence(predator);
                engine.exhaust_card(predator)?;
                engine.add_harm(predator, 2)?;
                engine.add_harm(card, presence)?;
                Ok(true)
            }
            // Protecting an active doe, the buck charges the ranger.
            ChallengeSymbol::Crest => {
                let doe_active = !engine
                    .state()
                    .in_play_where(|c| c.definition == SITKA_DOE && c.is_ready())
                    .is_empty();
                if !doe_active {
                    return Ok(false);
                }
                engine.exhaust_card(card)?;
                engine.injure_ranger()?;
                Ok(true)
            }
        }
    }
}

// ============================================================================
// Prowling Wolhund
// ============================================================================

#[must_use]
pub fn prowling_wolhund() -> Card {
    being("Prowling Wolhund", PROWLING_WOLHUND, 2)
        .with_trait("Predator")
        .with_trait("Mammal")
        .with_keyword(Keyword::Ambush)
        .with_progress_threshold(Threshold::At(4))
        .with_harm_threshold(Threshold::At(3))
        .with_starting_zone(Zone::AlongTheWay)
}

struct ProwlingWolhund;

impl CardBehavior for ProwlingWolhund {
    fn enters_play(&self, engine: &mut Engine, card: CardId, _target: Option<CardId>) -> Result<(), EngineError> {
        let others = engine
            .state()
            .in_play_where(|c| c.id != card && c.has_trait("Predator"));
        if !others.is_empty() {
            engine.exhaust_card(card)?;
        }
        Ok(())
    }

    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Sun, ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            // The pack gathers: ready another exhausted wolhund.
            ChallengeSymbol::Sun => {
                let resting = engine
                    .state()
                    .in_play_where(|c| c.definition == PROWLING_WOLHUND && c.id != card && !c.is_ready());
                let Some(other) = engine.choose_card("Choose a wolhund to ready", &resting)? else {
                    return Ok(false);
                };
                engine.ready_card(other)
            }
            // Smelling weakness: with 3 or more fatigue, it closes in.
            ChallengeSymbol::Crest => {
                if engine.state().ranger.fatigue.len() < 3 {
                    return Ok(false);
                }
                engine.move_card(card, Zone::WithinReach)
            }
            ChallengeSymbol::Mountain => Ok(false),
        }
    }
}

// ============================================================================
// Overgrown Thicket
// ============================================================================

#[must_use]
pub fn overgrown_thicket() -> Card {
    Card::new(CardId::new(0), "Overgrown Thicket", OVERGROWN_THICKET)
        .with_type(CardType::Path)
        .with_type(CardType::Feature)
        .with_trait("Flora")
        .with_keyword(Keyword::Obstacle)
        .with_presence(1)
        .with_progress_threshold(Threshold::At(3))
        .with_starting_zone(Zone::WithinReach)
}

struct OvergrownThicket;

impl CardBehavior for OvergrownThicket {
    fn tests(&self, card: &Card) -> Vec<Action> {
        vec![self_test(card, "Hunt", Aspect::Awareness, Approach::Exploration)
            .with_difficulty(|_, _| 2)
            .on_success(|engine, effort, target| match target {
                Some(thicket) => engine.add_progress(thicket, effort),
                None => Ok(()),
            })]
    }

    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Mountain]
    }

    /// The brush grows back and scratches the ranger.
    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, _symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        engine.remove_progress(card, 1)?;
        engine.fatigue_ranger(1)?;
        Ok(true)
    }
}

// ============================================================================
// Caustic Mulcher
// ============================================================================

#[must_use]
pub fn caustic_mulcher() -> Card {
    being("Caustic Mulcher", CAUSTIC_MULCHER, 3)
        .with_trait("Flora")
        .with_trait("Predator")
        .with_harm_threshold(Threshold::At(5))
        .with_starting_zone(Zone::AlongTheWay)
}

struct CausticMulcher;

impl CardBehavior for CausticMulcher {
    fn tests(&self, card: &Card) -> Vec<Action> {
        let mulcher = card.id;
        vec![self_test(card, "Wrest", Aspect::Fitness, Approach::Conflict)
            .with_difficulty(move |engine, _| engine.current_presence(mulcher).max(1))
            .on_success(move |engine, _effort, _target| {
                engine.exhaust_card(mulcher)?;
                if engine.state().ranger.token_on == Some(mulcher) {
                    engine.return_ranger_token();
                }
                for held in engine.state().zones.attachments_of(mulcher) {
                    engine.unattach(held)?;
                }
                Ok(())
            })]
    }

    fn constant_abilities(&self, card: &Card) -> Vec<ConstantAbility> {
        let id = card.id;
        vec![
            ConstantAbility::prevent_readying(id, "Beings held by the mulcher cannot ready")
                .when(move |state, subject| subject.is_some_and(|s| state.zones.parent_of(s) == Some(id))),
            ConstantAbility::prevent_travel(id, "The mulcher holds the ranger token")
                .when(move |state, _| state.ranger.token_on == Some(id)),
            ConstantAbility::prevent_ranger_token_move(id, "The ranger token is stuck in the mulcher")
                .when(move |state, subject| subject == Some(id) && state.ranger.token_on == Some(id)),
        ]
    }

    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Sun, ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            // Snatch a free being, or the ranger token if nothing is near.
            ChallengeSymbol::Sun => {
                let prey = engine.state().in_play_where(|c| {
                    c.id != card && c.has_type(CardType::Being)
                });
                let prey: Vec<CardId> = prey
                    .into_iter()
                    .filter(|&b| engine.state().zones.parent_of(b).is_none())
                    .collect();
                match engine.choose_card("Choose a being for the mulcher to seize", &prey)? {
                    Some(being) => {
                        engine.attach(being, card)?;
                        engine.exhaust_card(being)?;
                        Ok(true)
                    }
                    None => engine.move_ranger_token(Some(card)),
                }
            }
            ChallengeSymbol::Crest => {
                let held = engine.state().zones.attachments_of(card);
                for &being in &held {
                    engine.add_harm(being, 1)?;
                }
                let token_here = engine.state().ranger.token_on == Some(card);
                if token_here {
                    engine.injure_ranger()?;
                }
                Ok(!held.is_empty() || token_here)
            }
            ChallengeSymbol::Mountain => Ok(false),
        }
    }
}
