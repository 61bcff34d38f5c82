//! Listener sweeps and the test resolution pipeline.

use serde::{Deserialize, Serialize};

use crate::actions::{Action, CommitDecision};
use crate::cards::Keyword;
use crate::challenge::ChallengeOutcome;
use crate::core::{CardId, EngineError};
use crate::decisions::OrderItem;
use crate::triggers::{EventListener, EventType, Timing};
use crate::zones::Zone;

use super::Engine;

/// How `perform_test` finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestResolution {
    /// The test ran to the end of challenge effects.
    Completed(ChallengeOutcome),
    /// The day ended part way through; remaining steps were skipped.
    DayEnded,
}

impl TestResolution {
    /// The outcome, if the test completed.
    #[must_use]
    pub fn outcome(&self) -> Option<&ChallengeOutcome> {
        match self {
            TestResolution::Completed(outcome) => Some(outcome),
            TestResolution::DayEnded => None,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome().is_some_and(|o| o.success)
    }
}

impl Engine {
    // === Listener sweep ===

    /// Fire every listener registered for `event` at `timing`.
    ///
    /// With an action, only listeners whose verb filter matches the action's
    /// verb are eligible. A filtered listener on an action-less event, or an
    /// unfiltered listener on an action event, is a context mismatch.
    ///
    /// Two or more eligible listeners are ordered by the decision provider;
    /// one runs without asking. Each listener's predicate is checked right
    /// before it runs, against `subject`. Returns the sum of the effects.
    pub fn trigger(
        &mut self,
        event: EventType,
        timing: Timing,
        action: Option<&Action>,
        carried: i32,
        subject: Option<CardId>,
    ) -> Result<i32, EngineError> {
        let mut eligible: Vec<EventListener> = Vec::new();
        for listener in self.listeners.matching(event, timing) {
            match (action, listener.verb.as_deref()) {
                (None, Some(_)) => {
                    return Err(EngineError::ListenerContextMismatch {
                        listener: listener.id,
                        source_card: listener.source,
                        reason: "filters on a verb but no action was fired",
                    });
                }
                (Some(_), None) => {
                    return Err(EngineError::ListenerContextMismatch {
                        listener: listener.id,
                        source_card: listener.source,
                        reason: "has no verb filter but an action was fired",
                    });
                }
                (Some(action), Some(_)) if !listener.accepts_verb(&action.verb) => {}
                _ => eligible.push(listener),
            }
        }
        if eligible.is_empty() {
            return Ok(0);
        }

        if eligible.len() > 1 {
            let items: Vec<OrderItem> = eligible
                .iter()
                .enumerate()
                .map(|(position, l)| OrderItem {
                    position,
                    source: Some(l.source),
                    label: l.label.clone(),
                })
                .collect();
            let prompt = format!("Choose the order for {:?} {:?} effects", timing, event);
            let order = self.choose_order(&prompt, &items)?;
            let mut slots: Vec<Option<EventListener>> = eligible.into_iter().map(Some).collect();
            eligible = order.into_iter().filter_map(|i| slots[i].take()).collect();
        }

        let mut total = 0;
        for listener in eligible {
            if !self.listeners.contains(listener.id) {
                continue;
            }
            if !(listener.active)(self, subject) {
                tracing::trace!(listener = %listener.id, label = %listener.label, "listener inactive");
                continue;
            }
            tracing::debug!(listener = %listener.id, label = %listener.label, ?event, ?timing, "listener fired");
            total += (listener.effect)(self, carried)?;
            if self.day_ended {
                break;
            }
        }
        Ok(total)
    }

    // === Test pipeline ===

    /// Resolve an action.
    ///
    /// Plain actions run their success effect with zero effort. Tests go
    /// through interaction fatigue, energy payment, commitment, the
    /// `PerformTest/When` sweep, a challenge draw, success or failure
    /// effects, the clear sweep and challenge effects. A day end at any
    /// step returns `TestResolution::DayEnded`.
    pub fn perform_test(
        &mut self,
        action: &Action,
        commit: &CommitDecision,
        target: Option<CardId>,
    ) -> Result<TestResolution, EngineError> {
        let Some((aspect, approach)) = action.test_profile() else {
            (action.on_success)(self, 0, target)?;
            if self.day_ended {
                return Ok(TestResolution::DayEnded);
            }
            return Ok(TestResolution::Completed(ChallengeOutcome::trivial()));
        };
        if let Some(target) = target {
            self.state.require(target)?;
        }

        let against = match target {
            Some(target) => format!(" against {}", self.name(target)),
            None => String::new(),
        };
        self.log(format!("The ranger attempts {}{}.", action.name, against));

        if self.config.interaction_fatigue {
            if let Some(target) = target {
                self.interaction_fatigue(target)?;
            }
        }
        if self.day_ended {
            return Ok(TestResolution::DayEnded);
        }

        self.spend_energy(aspect, commit.energy)?;
        let mut base = i32::try_from(commit.energy).unwrap_or(i32::MAX);

        let committed = self.committed_cards(commit);
        for &card in &committed {
            let icons = self.state.require(card)?.icons(approach);
            base += i32::try_from(icons).unwrap_or(0);
        }
        base += self.trigger(EventType::PerformTest, Timing::When, Some(action), base, target)?;
        if self.day_ended {
            return Ok(TestResolution::DayEnded);
        }

        for card in committed {
            if self.state.require(card)?.has_keyword(Keyword::Persistent) {
                continue;
            }
            self.discard(card)?;
        }

        let challenge = self.state.challenge_deck.draw();
        let modifier = challenge.modifier(aspect);
        let resulting_effort = (base + modifier).max(0);
        let difficulty = (action.difficulty)(self, target);
        let success = resulting_effort >= difficulty;
        let outcome = ChallengeOutcome {
            base_effort: base,
            modifier,
            difficulty,
            symbol: challenge.symbol,
            resulting_effort,
            success,
        };
        self.log(format!(
            "Effort {} ({:+}) vs difficulty {}: {} [{:?}]",
            resulting_effort,
            modifier,
            difficulty,
            if success { "success" } else { "failure" },
            challenge.symbol
        ));

        if success {
            (action.on_success)(self, resulting_effort, target)?;
            if !self.day_ended {
                self.trigger(EventType::TestSucceed, Timing::After, Some(action), resulting_effort, target)?;
            }
        } else if let Some(on_fail) = &action.on_fail {
            on_fail(self, resulting_effort, target)?;
        }
        if self.day_ended {
            return Ok(TestResolution::DayEnded);
        }

        self.process_clears()?;
        if self.day_ended {
            return Ok(TestResolution::DayEnded);
        }

        self.resolve_challenge_effects(challenge.symbol)?;
        if self.day_ended {
            return Ok(TestResolution::DayEnded);
        }
        Ok(TestResolution::Completed(outcome))
    }

    /// Ready, non-Friendly cards between the ranger and `target` each
    /// fatigue the ranger by their current presence.
    fn interaction_fatigue(&mut self, target: CardId) -> Result<(), EngineError> {
        let Some(target_zone) = self.state.zone_of(target) else {
            return Ok(());
        };
        let between: Vec<CardId> = [Zone::WithinReach, Zone::AlongTheWay, Zone::Surroundings]
            .into_iter()
            .filter(|zone| zone.distance() < target_zone.distance())
            .flat_map(|zone| self.state.cards_in(zone))
            .filter(|&id| id != target)
            .filter(|&id| {
                self.state
                    .card(id)
                    .is_some_and(|c| c.is_ready() && !c.has_keyword(Keyword::Friendly))
            })
            .collect();

        for id in between {
            let presence = self.current_presence(id).unsigned_abs();
            if presence == 0 {
                continue;
            }
            let name = self.name(id);
            self.log(format!("Interacting past {} fatigues the ranger.", name));
            self.fatigue_ranger(presence)?;
            if self.day_ended {
                break;
            }
        }
        Ok(())
    }

    /// Hand cards named by the commitment, deduplicated, in index order.
    /// Indices past the end of the hand are ignored.
    fn committed_cards(&self, commit: &CommitDecision) -> Vec<CardId> {
        let mut indices: Vec<usize> = commit.hand_indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .filter_map(|i| self.state.ranger.hand.get(i).copied())
            .collect()
    }
}
