//! Card instances and the lifecycle state machine.
//!
//! A `Card` is plain serializable data: identity, printed values, and the
//! mutable lifecycle state (ready/exhausted, progress, harm, tokens,
//! modifiers). Behaviour lives in the `CardLibrary`, keyed by
//! `definition`; location and attachment edges live in the zone graph.
//!
//! ## Nulled counters
//!
//! `progress` and `harm` are `Option<u32>`. `None` means the counter has
//! been administratively nulled: adds are no-ops and the card can never be
//! cleared through that counter. Thresholds are a separate [`Threshold`] so
//! a card can keep a counter while having no clear condition on it.
//!
//! ## Usage
//!
//! ```
//! use trail_rules::cards::{Card, CardType, ClearKind, Threshold};
//! use trail_rules::core::CardId;
//!
//! let mut doe = Card::new(CardId(1), "Sitka Doe", "sitka_doe")
//!     .with_type(CardType::Being)
//!     .with_progress_threshold(Threshold::At(3))
//!     .with_harm_threshold(Threshold::At(2));
//!
//! doe.add_progress(3);
//! doe.add_harm(2);
//!
//! // Progress wins when both thresholds are met.
//! assert_eq!(doe.clear_condition(false), Some(ClearKind::Progress));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::attributes::{Approach, Attribute, CardType, EnergyCost, Keyword};
use crate::core::CardId;
use crate::zones::Zone;

/// Clear threshold for progress or harm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    /// The card has no clear condition on this counter.
    #[default]
    Absent,
    /// Cleared once the counter reaches this value.
    At(u32),
    /// Permanently disabled.
    Nulled,
}

impl Threshold {
    /// True if a counter value satisfies this threshold.
    #[must_use]
    pub fn is_met(self, value: Option<u32>) -> bool {
        match (self, value) {
            (Threshold::At(limit), Some(value)) => value >= limit,
            _ => false,
        }
    }
}

/// Why a card was cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearKind {
    RangerToken,
    Progress,
    Harm,
}

impl std::fmt::Display for ClearKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ClearKind::RangerToken => "ranger token",
            ClearKind::Progress => "progress",
            ClearKind::Harm => "harm",
        };
        f.write_str(name)
    }
}

/// A delta applied to a card attribute, tagged with the card that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueModifier {
    pub attribute: Attribute,
    pub amount: i32,
    pub source: CardId,
}

impl ValueModifier {
    #[must_use]
    pub const fn presence(amount: i32, source: CardId) -> Self {
        Self {
            attribute: Attribute::Presence,
            amount,
            source,
        }
    }
}

/// A physical card in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    /// Key into the `CardLibrary`.
    pub definition: String,

    pub types: BTreeSet<CardType>,
    pub traits: BTreeSet<String>,
    pub keywords: BTreeSet<Keyword>,

    pub exhausted: bool,
    /// Printed presence. `None` for cards without one.
    pub presence: Option<i32>,

    pub progress: Option<u32>,
    pub harm: Option<u32>,
    pub progress_threshold: Threshold,
    pub harm_threshold: Threshold,
    pub clears_by_ranger_token: bool,

    #[serde(default)]
    pub tokens: BTreeMap<String, u32>,
    #[serde(default)]
    pub modifiers: Vec<ValueModifier>,

    #[serde(default)]
    pub approach_icons: BTreeMap<Approach, u32>,
    pub cost: Option<EnergyCost>,
    pub starting_zone: Option<Zone>,
    /// Guide entry resolved when the card clears.
    pub guide_entry: Option<String>,
}

impl Card {
    /// Create a ready card with zeroed counters and no thresholds.
    pub fn new(id: CardId, title: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            definition: definition.into(),
            types: BTreeSet::new(),
            traits: BTreeSet::new(),
            keywords: BTreeSet::new(),
            exhausted: false,
            presence: None,
            progress: Some(0),
            harm: Some(0),
            progress_threshold: Threshold::Absent,
            harm_threshold: Threshold::Absent,
            clears_by_ranger_token: false,
            tokens: BTreeMap::new(),
            modifiers: Vec::new(),
            approach_icons: BTreeMap::new(),
            cost: None,
            starting_zone: None,
            guide_entry: None,
        }
    }

    // === Builders ===

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.types.insert(card_type);
        self
    }

    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    #[must_use]
    pub fn with_presence(mut self, presence: i32) -> Self {
        self.presence = Some(presence);
        self
    }

    #[must_use]
    pub fn with_progress_threshold(mut self, threshold: Threshold) -> Self {
        self.progress_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_harm_threshold(mut self, threshold: Threshold) -> Self {
        self.harm_threshold = threshold;
        self
    }

    #[must_use]
    pub fn clearing_by_ranger_token(mut self) -> Self {
        self.clears_by_ranger_token = true;
        self
    }

    /// Add approach icons used when this card is committed to a test.
    #[must_use]
    pub fn with_icons(mut self, approach: Approach, count: u32) -> Self {
        *self.approach_icons.entry(approach).or_insert(0) += count;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: EnergyCost) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_starting_zone(mut self, zone: Zone) -> Self {
        self.starting_zone = Some(zone);
        self
    }

    #[must_use]
    pub fn with_guide_entry(mut self, key: impl Into<String>) -> Self {
        self.guide_entry = Some(key.into());
        self
    }

    #[must_use]
    pub fn exhausted(mut self) -> Self {
        self.exhausted = true;
        self
    }

    // === Queries ===

    #[must_use]
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.exhausted
    }

    /// Icons of the given approach, zero if none.
    #[must_use]
    pub fn icons(&self, approach: Approach) -> u32 {
        self.approach_icons.get(&approach).copied().unwrap_or(0)
    }

    /// Current progress, treating a nulled counter as zero.
    #[must_use]
    pub fn progress_value(&self) -> u32 {
        self.progress.unwrap_or(0)
    }

    /// Current harm, treating a nulled counter as zero.
    #[must_use]
    pub fn harm_value(&self) -> u32 {
        self.harm.unwrap_or(0)
    }

    /// Sum of this card's own modifiers on an attribute.
    #[must_use]
    pub fn modifier_total(&self, attribute: Attribute) -> i32 {
        self.modifiers
            .iter()
            .filter(|m| m.attribute == attribute)
            .map(|m| m.amount)
            .sum()
    }

    // === Lifecycle ===

    /// Mark the card ready. Returns false if it already was.
    pub fn ready(&mut self) -> bool {
        let changed = self.exhausted;
        self.exhausted = false;
        changed
    }

    /// Mark the card exhausted. Returns false if it already was.
    pub fn exhaust(&mut self) -> bool {
        let changed = !self.exhausted;
        self.exhausted = true;
        changed
    }

    /// Add progress. Negative amounts are clamped to zero.
    /// A nulled counter ignores the call.
    pub fn add_progress(&mut self, amount: i32) {
        if let Some(progress) = self.progress.as_mut() {
            *progress = progress.saturating_add(amount.max(0).unsigned_abs());
        }
    }

    /// Add harm. Negative amounts are clamped to zero.
    /// A nulled counter ignores the call.
    pub fn add_harm(&mut self, amount: i32) {
        if let Some(harm) = self.harm.as_mut() {
            *harm = harm.saturating_add(amount.max(0).unsigned_abs());
        }
    }

    /// Remove up to `amount` progress; returns how much was removed.
    pub fn remove_progress(&mut self, amount: u32) -> u32 {
        let Some(progress) = self.progress.as_mut() else {
            return 0;
        };
        let removed = amount.min(*progress);
        *progress -= removed;
        removed
    }

    /// Remove up to `amount` harm; returns how much was removed.
    pub fn remove_harm(&mut self, amount: u32) -> u32 {
        let Some(harm) = self.harm.as_mut() else {
            return 0;
        };
        let removed = amount.min(*harm);
        *harm -= removed;
        removed
    }

    /// Permanently null both counters and thresholds.
    pub fn null_counters(&mut self) {
        self.progress = None;
        self.harm = None;
        self.progress_threshold = Threshold::Nulled;
        self.harm_threshold = Threshold::Nulled;
    }

    /// Add `amount` of a named token.
    pub fn add_tokens(&mut self, name: &str, amount: u32) {
        *self.tokens.entry(name.to_owned()).or_insert(0) += amount;
    }

    /// Remove up to `amount` of a named token; returns how many were removed.
    pub fn remove_tokens(&mut self, name: &str, amount: u32) -> u32 {
        let Some(count) = self.tokens.get_mut(name) else {
            return 0;
        };
        let removed = amount.min(*count);
        *count -= removed;
        if *count == 0 {
            self.tokens.remove(name);
        }
        removed
    }

    /// Count of a named token.
    #[must_use]
    pub fn token_count(&self, name: &str) -> u32 {
        self.tokens.get(name).copied().unwrap_or(0)
    }

    /// Drop every modifier contributed by `source`.
    pub fn remove_modifiers_from(&mut self, source: CardId) {
        self.modifiers.retain(|m| m.source != source);
    }

    /// Decide whether this card is cleared.
    ///
    /// Checked in precedence order: ranger token (when the card clears that
    /// way and the token sits on it), then progress, then harm. Nulled
    /// counters or thresholds never clear.
    #[must_use]
    pub fn clear_condition(&self, ranger_token_here: bool) -> Option<ClearKind> {
        if self.clears_by_ranger_token && ranger_token_here {
            return Some(ClearKind::RangerToken);
        }
        if self.progress_threshold.is_met(self.progress) {
            return Some(ClearKind::Progress);
        }
        if self.harm_threshold.is_met(self.harm) {
            return Some(ClearKind::Harm);
        }
        None
    }
}
