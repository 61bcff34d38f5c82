//! Card vocabulary: types, keywords, aspects, approaches and symbols.
//!
//! These are closed enums. Content decides which of them a card carries;
//! the engine only asks capability questions ("is this a Being?", "does it
//! have Ambush?").

use serde::{Deserialize, Serialize};

/// Card type tags. A card may carry several (e.g. Path + Being).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Comes from the path deck; discarded to the path discard.
    Path,
    /// Belongs to the ranger; discarded to the ranger discard.
    Ranger,
    Being,
    Feature,
    Location,
    Weather,
    Mission,
    Role,
    Attachment,
    Gear,
    Moment,
}

/// Rules keywords printed on cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Never causes interaction fatigue.
    Friendly,
    /// Survives travel; committed copies stay in hand.
    Persistent,
    Fatiguing,
    /// Blocks travel and hides cards beyond it while ready.
    Obstacle,
    /// Fatigues the ranger by its presence when it moves within reach.
    Ambush,
}

/// Energy type spent on a test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Awareness,
    Fitness,
    Spirit,
    Focus,
}

impl Aspect {
    /// All aspects in printed order.
    pub const ALL: [Aspect; 4] = [Aspect::Awareness, Aspect::Fitness, Aspect::Spirit, Aspect::Focus];

    /// Short printed label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Aspect::Awareness => "AWA",
            Aspect::Fitness => "FIT",
            Aspect::Spirit => "SPI",
            Aspect::Focus => "FOC",
        }
    }

    /// Position in [`Aspect::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Aspect::Awareness => 0,
            Aspect::Fitness => 1,
            Aspect::Spirit => 2,
            Aspect::Focus => 3,
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Commitment category. Hand cards contribute icons of one approach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Approach {
    Conflict,
    Connection,
    Exploration,
    Reason,
}

impl std::fmt::Display for Approach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Approach::Conflict => "Conflict",
            Approach::Connection => "Connection",
            Approach::Exploration => "Exploration",
            Approach::Reason => "Reason",
        };
        f.write_str(name)
    }
}

/// Symbol printed on a challenge card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChallengeSymbol {
    Sun,
    Mountain,
    Crest,
}

impl ChallengeSymbol {
    pub const ALL: [ChallengeSymbol; 3] =
        [ChallengeSymbol::Sun, ChallengeSymbol::Mountain, ChallengeSymbol::Crest];
}

impl std::fmt::Display for ChallengeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChallengeSymbol::Sun => "Sun",
            ChallengeSymbol::Mountain => "Mountain",
            ChallengeSymbol::Crest => "Crest",
        };
        f.write_str(name)
    }
}

/// Attribute a `ValueModifier` adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Presence,
}

/// Energy cost of playing a card from hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyCost {
    pub aspect: Aspect,
    pub amount: u32,
}

impl EnergyCost {
    #[must_use]
    pub const fn new(aspect: Aspect, amount: u32) -> Self {
        Self { aspect, amount }
    }
}
