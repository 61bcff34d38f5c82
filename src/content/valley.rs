//! Valley folk: friendly humans met along the trail.

use crate::abilities::ConstantAbility;
use crate::cards::{Card, CardBehavior, CardLibrary, CardType, ChallengeSymbol, Keyword, Threshold};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::zones::Zone;

use super::harm_from_predator;

pub const CALYPSA: &str = "valley/calypsa";
pub const THE_FUNDAMENTALIST: &str = "valley/the_fundamentalist";
pub const QUISI_VOS: &str = "valley/quisi_vos";
pub const HY_PIMPOT: &str = "valley/hy_pimpot";

pub const QUISI_ENTRY: &str = "47";
pub const HY_PIMPOT_ENTRY: &str = "85";

const PROGRESS_OPTION: &str = "progress";

pub(super) fn register(library: &mut CardLibrary) {
    library.register(CALYPSA, Calypsa);
    library.register(THE_FUNDAMENTALIST, TheFundamentalist);
    library.register(QUISI_VOS, QuisiVos);
}

fn human(title: &str, key: &str, presence: i32) -> Card {
    Card::new(CardId::new(0), title, key)
        .with_type(CardType::Path)
        .with_type(CardType::Being)
        .with_trait("Human")
        .with_keyword(Keyword::Friendly)
        .with_presence(presence)
        .with_starting_zone(Zone::WithinReach)
}

#[must_use]
pub fn calypsa() -> Card {
    human("Calypsa, Ranger Mentor", CALYPSA, 1)
        .with_progress_threshold(Threshold::At(3))
        .with_harm_threshold(Threshold::At(3))
}

#[must_use]
pub fn the_fundamentalist() -> Card {
    human("The Fundamentalist", THE_FUNDAMENTALIST, 2)
        .with_progress_threshold(Threshold::At(4))
        .with_harm_threshold(Threshold::At(3))
}

#[must_use]
pub fn quisi_vos() -> Card {
    human("Quisi Vos, Rascal", QUISI_VOS, 1)
        .with_keyword(Keyword::Persistent)
        .with_keyword(Keyword::Fatiguing)
        .with_progress_threshold(Threshold::At(3))
        .with_harm_threshold(Threshold::At(2))
        .with_guide_entry(QUISI_ENTRY)
}

/// No effects; a target for missions and friends.
#[must_use]
pub fn hy_pimpot() -> Card {
    human("Hy Pimpot, Chef", HY_PIMPOT, 1)
        .with_progress_threshold(Threshold::At(2))
        .with_harm_threshold(Threshold::At(2))
        .with_guide_entry(HY_PIMPOT_ENTRY)
}

struct Calypsa;

impl CardBehavior for Calypsa {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Mountain, ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            // Calypsa scouts ahead: 1 progress on a path card.
            ChallengeSymbol::Mountain => {
                let path = engine.state().path_cards_in_play();
                let Some(target) = engine.choose_card("Choose a path card for Calypsa to scout", &path)? else {
                    return Ok(false);
                };
                engine.add_progress(target, 1)?;
                Ok(true)
            }
            ChallengeSymbol::Crest => harm_from_predator(engine, card),
            ChallengeSymbol::Sun => Ok(false),
        }
    }
}

struct TheFundamentalist;

impl CardBehavior for TheFundamentalist {
    /// Other beings in the same zone have -1 presence.
    fn constant_abilities(&self, card: &Card) -> Vec<ConstantAbility> {
        let id = card.id;
        vec![ConstantAbility::modify_presence(id, -1, "The Fundamentalist calms nearby beings").when(
            move |state, subject| {
                let Some(subject) = subject.filter(|&s| s != id) else {
                    return false;
                };
                let same_zone = state.zone_of(id).is_some() && state.zone_of(id) == state.zone_of(subject);
                same_zone && state.card(subject).is_some_and(|c| c.has_type(CardType::Being))
            },
        )]
    }

    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Mountain, ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            ChallengeSymbol::Mountain => {
                if engine.card(card)?.harm_value() == 0 {
                    return Ok(false);
                }
                engine.remove_harm(card, 1)?;
                Ok(true)
            }
            ChallengeSymbol::Crest => harm_from_predator(engine, card),
            ChallengeSymbol::Sun => Ok(false),
        }
    }
}

struct QuisiVos;

impl QuisiVos {
    /// Flora, insects and gear that have progress or tokens to lose.
    fn mischief_targets(engine: &Engine) -> Vec<CardId> {
        engine.state().in_play_where(|c| {
            let kind = c.has_trait("Flora") || c.has_trait("Insect") || c.has_type(CardType::Gear);
            let loaded = c.progress_value() > 0 || c.tokens.values().any(|&n| n > 0);
            kind && loaded
        })
    }
}

impl CardBehavior for QuisiVos {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Sun, ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        match symbol {
            // Quisi pockets a progress or a token.
            ChallengeSymbol::Sun => {
                let candidates = Self::mischief_targets(engine);
                let Some(target) = engine.choose_card("Choose a card for Quisi to meddle with", &candidates)? else {
                    return Ok(false);
                };
                let victim = engine.card(target)?;
                let mut options: Vec<String> = Vec::new();
                if victim.progress_value() > 0 {
                    options.push(PROGRESS_OPTION.to_owned());
                }
                options.extend(victim.tokens.iter().filter(|(_, &n)| n > 0).map(|(name, _)| name.clone()));

                let choice = match options.len() {
                    0 => return Ok(false),
                    1 => options.swap_remove(0),
                    _ => engine.choose_option("Quisi takes", &options)?,
                };
                if choice == PROGRESS_OPTION {
                    engine.remove_progress(target, 1)?;
                } else {
                    engine.state_mut().require_mut(target)?.remove_tokens(&choice, 1);
                    let name = engine.name(target);
                    engine.log(format!("Quisi takes a {} token from {}.", choice, name));
                }
                Ok(true)
            }
            ChallengeSymbol::Crest => harm_from_predator(engine, card),
            ChallengeSymbol::Mountain => Ok(false),
        }
    }
}
