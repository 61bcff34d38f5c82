//! The rules engine.
//!
//! `Engine` owns one session: the `GameState`, the listener and constant
//! ability registries, the card library, the campaign guide, the decision
//! provider and the message log. All rules operations are methods on it,
//! split by concern:
//!
//! - `graph`: entering play, moving, attaching, discarding, ranger token
//! - `lifecycle`: ready/exhaust, progress/harm, presence, the clear sweep
//! - `ranger`: energy, fatigue, soothe, draw, injury
//! - `pipeline`: listener sweeps and `perform_test`
//! - `orchestrator`: challenge effects with speculative dry runs
//! - `round`: path draws, refresh, travel, available actions, play from hand
//!
//! ## Registries are derived state
//!
//! Listeners and constant abilities hold closures, so they are never
//! serialized. `reconstruct` rebuilds both from the cards in hand and in
//! play; a snapshot plus the card library is therefore a complete session.
//!
//! ## Example
//!
//! ```
//! use trail_rules::cards::{Card, CardLibrary, CardType, Threshold};
//! use trail_rules::core::{CardId, GameState, RangerState};
//! use trail_rules::engine::Engine;
//! use trail_rules::zones::Zone;
//!
//! let state = GameState::new(RangerState::new("Ranger"), 1);
//! let mut engine = Engine::new(state, CardLibrary::new()).unwrap();
//!
//! let rock = engine
//!     .spawn(
//!         Card::new(CardId(0), "Rock", "rock")
//!             .with_type(CardType::Feature)
//!             .with_progress_threshold(Threshold::At(2)),
//!         Zone::AlongTheWay,
//!     )
//!     .unwrap();
//!
//! engine.add_progress(rock, 2).unwrap();
//! let cleared = engine.process_clears().unwrap();
//! assert_eq!(cleared, vec![rock]);
//! assert!(!engine.state().is_in_play(rock));
//! ```

mod graph;
mod lifecycle;
mod orchestrator;
mod pipeline;
mod ranger;
mod round;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::abilities::{AbilityKind, AbilityRegistry};
use crate::cards::{Card, CardBehavior, CardLibrary, ClearKind, ListenerScope};
use crate::core::{CardId, EngineConfig, EngineError, GameState, RangerState};
use crate::decisions::{CardOption, DecisionProvider, DefaultDecisions, OrderItem};
use crate::guide::CampaignGuide;
use crate::triggers::ListenerRegistry;

pub use pipeline::TestResolution;
pub use round::PlayOption;

/// One line of the engine's message log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub day: u32,
    pub round: u32,
    pub text: String,
}

/// A rules session.
pub struct Engine {
    state: GameState,
    listeners: ListenerRegistry,
    abilities: AbilityRegistry,
    library: Rc<CardLibrary>,
    guide: Rc<CampaignGuide>,
    decisions: Box<dyn DecisionProvider>,
    messages: Vec<MessageEvent>,
    day_ended: bool,
    config: EngineConfig,
    speculative: bool,
}

impl Engine {
    /// Create an engine over an existing state and rebuild its registries.
    ///
    /// Uses `DefaultDecisions`, an empty guide and the default config until
    /// the builder methods replace them.
    pub fn new(state: GameState, library: CardLibrary) -> Result<Self, EngineError> {
        let mut engine = Self {
            state,
            listeners: ListenerRegistry::new(),
            abilities: AbilityRegistry::new(),
            library: Rc::new(library),
            guide: Rc::new(CampaignGuide::new()),
            decisions: Box::new(DefaultDecisions),
            messages: Vec::new(),
            day_ended: false,
            config: EngineConfig::default(),
            speculative: false,
        };
        engine.reconstruct()?;
        Ok(engine)
    }

    /// Start a fresh session for `ranger`, seeded from `config`.
    pub fn start(ranger: RangerState, library: CardLibrary, config: EngineConfig) -> Result<Self, EngineError> {
        let state = GameState::new(ranger, config.seed);
        Ok(Self::new(state, library)?.with_config(config))
    }

    /// Install a decision provider.
    #[must_use]
    pub fn with_decisions(mut self, decisions: impl DecisionProvider + 'static) -> Self {
        self.decisions = Box::new(decisions);
        self
    }

    #[must_use]
    pub fn with_guide(mut self, guide: CampaignGuide) -> Self {
        self.guide = Rc::new(guide);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the decision provider on a live engine.
    pub fn set_decisions(&mut self, decisions: impl DecisionProvider + 'static) {
        self.decisions = Box::new(decisions);
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for setup code. Rules changes should go through
    /// engine methods so listeners, abilities and the log stay in step.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Look up a card that must exist.
    pub fn card(&self, id: CardId) -> Result<&Card, EngineError> {
        self.state.require(id)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    #[must_use]
    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    #[must_use]
    pub fn library(&self) -> &CardLibrary {
        &self.library
    }

    #[must_use]
    pub fn messages(&self) -> &[MessageEvent] {
        &self.messages
    }

    /// Drain the message log.
    pub fn take_messages(&mut self) -> Vec<MessageEvent> {
        std::mem::take(&mut self.messages)
    }

    #[must_use]
    pub fn is_day_ended(&self) -> bool {
        self.day_ended
    }

    /// True inside a dry-run copy.
    #[must_use]
    pub fn is_speculative(&self) -> bool {
        self.speculative
    }

    /// Behaviour of a card's definition.
    pub fn behavior_of(&self, id: CardId) -> Result<Rc<dyn CardBehavior>, EngineError> {
        let card = self.state.require(id)?;
        Ok(self.library.behavior(&card.definition))
    }

    /// Log-friendly name of a card.
    #[must_use]
    pub fn name(&self, id: CardId) -> String {
        self.state.display_name(id)
    }

    // === Message log ===

    /// Append a message to the log.
    pub fn log(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.config.trace_messages && !self.speculative {
            tracing::info!(day = self.state.day_number, round = self.state.round_number, "{}", text);
        } else {
            tracing::trace!(speculative = self.speculative, "{}", text);
        }
        self.messages.push(MessageEvent {
            day: self.state.day_number,
            round: self.state.round_number,
            text,
        });
    }

    /// Reinstate a saved log and day flag.
    pub(crate) fn restore_log(&mut self, messages: Vec<MessageEvent>, day_ended: bool) {
        self.messages = messages;
        self.day_ended = day_ended;
    }

    // === Day end ===

    /// Mark the day as over. Every pipeline step checks this and unwinds.
    pub fn end_day(&mut self, reason: &str) {
        if self.day_ended {
            return;
        }
        self.day_ended = true;
        self.log(format!(
            "{} Day {} has ended after {} rounds.",
            reason, self.state.day_number, self.state.round_number
        ));
        if !self.speculative {
            tracing::info!(day = self.state.day_number, reason, "day ended");
        }
    }

    /// Begin the next day after a day end.
    pub fn begin_next_day(&mut self) {
        self.day_ended = false;
        self.state.day_number += 1;
        self.state.round_number = 1;
        self.state.ranger.injury = 0;
        self.state.ranger.refresh_energy();
    }

    // === Registries ===

    /// Rebuild both registries from the cards in hand and in play.
    pub fn reconstruct(&mut self) -> Result<(), EngineError> {
        self.listeners.clear();
        self.abilities.clear();

        let hand: Vec<CardId> = self.state.ranger.hand.iter().copied().collect();
        for id in hand {
            self.register_card(id, ListenerScope::Hand)?;
        }
        for id in self.state.zones.all_in_play() {
            self.register_card(id, ListenerScope::InPlay)?;
        }

        tracing::debug!(
            listeners = self.listeners.len(),
            abilities = self.abilities.len(),
            "registries rebuilt"
        );
        Ok(())
    }

    /// Register a card's listeners for `scope` and, in play, its abilities.
    pub(crate) fn register_card(&mut self, id: CardId, scope: ListenerScope) -> Result<(), EngineError> {
        let card = self.state.require(id)?;
        let behavior = self.library.behavior(&card.definition);

        for listener in behavior.listeners(card, scope) {
            self.listeners.register(listener);
        }
        if scope == ListenerScope::InPlay {
            for ability in behavior.constant_abilities(card) {
                self.abilities.register(ability);
            }
        }
        Ok(())
    }

    /// Drop every listener and ability a card owns.
    pub(crate) fn unregister_card(&mut self, id: CardId) {
        self.listeners.remove_by_source(id);
        self.abilities.remove_by_source(id);
    }

    /// True if any active ability of a blocking kind matches `subject`.
    #[must_use]
    pub fn is_blocked(&self, kind: AbilityKind, subject: Option<CardId>) -> bool {
        self.abilities.is_blocked(kind, &self.state, subject)
    }

    // === Speculative copies ===

    /// An independent copy for dry runs.
    ///
    /// State, registries and log are copied (the state shares storage until
    /// written); the decision provider is replaced by `DefaultDecisions`, so
    /// nothing the copy does can reach the real player or the real log.
    #[must_use]
    pub fn speculative_copy(&self) -> Engine {
        Engine {
            state: self.state.clone(),
            listeners: self.listeners.clone(),
            abilities: self.abilities.clone(),
            library: Rc::clone(&self.library),
            guide: Rc::clone(&self.guide),
            decisions: Box::new(DefaultDecisions),
            messages: self.messages.clone(),
            day_ended: self.day_ended,
            config: self.config.clone(),
            speculative: true,
        }
    }

    // === Guide ===

    /// Resolve a guide entry, honouring the first active override for
    /// `source`. Ends the day if the entry asks for it.
    pub fn resolve_entry(
        &mut self,
        key: &str,
        source: Option<CardId>,
        clear: Option<ClearKind>,
    ) -> Result<bool, EngineError> {
        let redirected = self
            .abilities
            .entry_override(&self.state, source)
            .and_then(|a| a.override_entry.clone());
        let key = match redirected {
            Some(target) => {
                tracing::debug!(from = key, to = %target, "guide entry overridden");
                target
            }
            None => key.to_owned(),
        };

        let entry = self
            .guide
            .get(&key)
            .ok_or_else(|| EngineError::UnknownGuideEntry(key.clone()))?;
        self.log(format!("Resolving guide entry {}.", key));
        let ends_day = entry(self, source, clear)?;
        if ends_day {
            self.end_day("The campaign guide ends the day.");
        }
        Ok(ends_day)
    }

    // === Decisions ===

    /// Ask the player to pick one of `candidates`. `None` when empty.
    pub fn choose_card(&mut self, prompt: &str, candidates: &[CardId]) -> Result<Option<CardId>, EngineError> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let choices: Vec<CardOption> = candidates
            .iter()
            .map(|&id| CardOption {
                id,
                name: self.name(id),
            })
            .collect();
        let chosen = self.decisions.choose_card(prompt, &choices);
        if !candidates.contains(&chosen) {
            return Err(EngineError::InvalidChoice(format!(
                "{} is not a candidate for '{}'",
                chosen, prompt
            )));
        }
        Ok(Some(chosen))
    }

    /// Ask a yes/no question.
    pub fn decide(&mut self, prompt: &str) -> bool {
        self.decisions.decide(prompt)
    }

    /// Ask for a value in `min..=max`.
    pub fn choose_amount(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32, EngineError> {
        let amount = self.decisions.choose_amount(prompt, min, max);
        if amount < min || amount > max {
            return Err(EngineError::InvalidChoice(format!(
                "{} is outside {}..={} for '{}'",
                amount, min, max, prompt
            )));
        }
        Ok(amount)
    }

    /// Ask the player to pick one labelled option.
    pub fn choose_option(&mut self, prompt: &str, options: &[String]) -> Result<String, EngineError> {
        let chosen = self.decisions.choose_option(prompt, options);
        if !options.contains(&chosen) {
            return Err(EngineError::InvalidChoice(format!(
                "'{}' is not an option for '{}'",
                chosen, prompt
            )));
        }
        Ok(chosen)
    }

    /// Ask for an order over `items`; the answer must be a permutation.
    pub(crate) fn choose_order(&mut self, prompt: &str, items: &[OrderItem]) -> Result<Vec<usize>, EngineError> {
        let order = self.decisions.choose_order(prompt, items);
        let mut seen = vec![false; items.len()];
        let valid = order.len() == items.len()
            && order.iter().all(|&p| p < seen.len() && !std::mem::replace(&mut seen[p], true));
        if !valid {
            return Err(EngineError::InvalidOrdering {
                prompt: prompt.to_owned(),
                expected: items.len(),
            });
        }
        Ok(order)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("day", &self.state.day_number)
            .field("round", &self.state.round_number)
            .field("listeners", &self.listeners.len())
            .field("abilities", &self.abilities.len())
            .field("day_ended", &self.day_ended)
            .field("speculative", &self.speculative)
            .finish_non_exhaustive()
    }
}
