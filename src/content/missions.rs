//! Missions.

use crate::abilities::ConstantAbility;
use crate::cards::{Card, CardBehavior, CardLibrary, CardType, ChallengeSymbol};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;
use crate::zones::Zone;

pub const BISCUIT_DELIVERY: &str = "missions/biscuit_delivery";

/// Entry read instead of a recipient's own when they clear.
pub const BISCUIT_ENTRY: &str = "91";

/// Everyone on the delivery list.
const RECIPIENTS: [&str; 4] = [
    "Hy Pimpot, Chef",
    "Kordo, Ranger Veteran",
    "Spirit Speaker Nal",
    "Quisi Vos, Rascal",
];

pub(super) fn register(library: &mut CardLibrary) {
    library.register(BISCUIT_DELIVERY, BiscuitDelivery);
}

#[must_use]
pub fn biscuit_delivery() -> Card {
    Card::new(CardId::new(0), "Biscuit Delivery", BISCUIT_DELIVERY)
        .with_type(CardType::Mission)
        .with_starting_zone(Zone::Surroundings)
}

struct BiscuitDelivery;

impl CardBehavior for BiscuitDelivery {
    fn constant_abilities(&self, card: &Card) -> Vec<ConstantAbility> {
        vec![ConstantAbility::override_entry(card.id, BISCUIT_ENTRY, "Biscuit Delivery")
            .when(|state, subject| {
                subject
                    .and_then(|id| state.card(id))
                    .is_some_and(|c| RECIPIENTS.contains(&c.title.as_str()))
            })]
    }

    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Sun]
    }

    /// The basket is light; nothing happens.
    fn resolve_challenge(&self, _engine: &mut Engine, _card: CardId, _symbol: ChallengeSymbol) -> Result<bool, EngineError> {
        Ok(false)
    }
}
