//! Built-in sample cards.
//!
//! A small card pool that exercises every behaviour hook: tests offered by
//! path cards, challenge effects, hand and in-play listeners, constant
//! abilities, enters-play hooks and custom play handling. Sessions and
//! tests build their library with [`library`] and their guide with
//! [`guide`].
//!
//! Each card has a constructor returning a fresh `Card` (id 0, assigned by
//! the arena) whose `definition` matches the key it is registered under.

pub mod conciliator;
pub mod explorer;
pub mod missions;
pub mod valley;
pub mod woods;

use crate::cards::{CardLibrary, CardType};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::guide::CampaignGuide;

/// Library with every sample card registered.
#[must_use]
pub fn library() -> CardLibrary {
    let mut library = CardLibrary::new();
    woods::register(&mut library);
    valley::register(&mut library);
    explorer::register(&mut library);
    conciliator::register(&mut library);
    missions::register(&mut library);
    library
}

/// Guide entries referenced by the sample cards.
#[must_use]
pub fn guide() -> CampaignGuide {
    CampaignGuide::new()
        .with_entry(valley::QUISI_ENTRY, |engine, _, _| {
            engine.log("Quisi waves goodbye and darts off toward the station.");
            Ok(false)
        })
        .with_entry(valley::HY_PIMPOT_ENTRY, |engine, _, _| {
            engine.log("Hy Pimpot thanks you and returns to the kitchen.");
            Ok(false)
        })
        .with_entry(missions::BISCUIT_ENTRY, |engine, source, _| {
            if let Some(source) = source {
                let name = engine.name(source);
                engine.log(format!("{} gladly accepts a biscuit.", name));
            }
            Ok(false)
        })
}

/// Shared crest effect of many beings: if there is an active predator,
/// exhaust it and add harm to `being` equal to that predator's presence.
pub(crate) fn harm_from_predator(engine: &mut Engine, being: CardId) -> Result<bool, EngineError> {
    let predator = engine.state().in_play_where(|c| {
        c.id != being && c.has_trait("Predator") && c.has_type(CardType::Being) && c.is_ready()
    });
    let Some(&predator) = predator.first() else {
        let name = engine.name(being);
        engine.log(format!("{}: no active predator.", name));
        return Ok(false);
    };
    let presence = engine.current_presence(predator);
    engine.exhaust_card(predator)?;
    engine.add_harm(being, presence)?;
    Ok(true)
}
