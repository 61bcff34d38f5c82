//! Round flow: path draws, refresh, travel, and what the ranger may do.

use crate::abilities::AbilityKind;
use crate::actions::{common, Action};
use crate::cards::{Card, CardType, Keyword};
use crate::core::{CardId, EngineError};
use crate::zones::Zone;

use super::Engine;

/// A hand card that can be played now, with its legal targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOption {
    pub card: CardId,
    /// `None` when the card takes no target.
    pub targets: Option<Vec<CardId>>,
}

impl Engine {
    // === Path cards ===

    /// Draw the configured number of path cards for a new round.
    pub fn begin_round(&mut self) -> Result<Vec<CardId>, EngineError> {
        self.draw_path_cards(self.config.path_cards_per_round)
    }

    /// Draw path cards into play, each at its starting zone (Within Reach
    /// when it has none). An empty deck is refilled from the discard; if
    /// both are empty the draw stops early.
    pub fn draw_path_cards(&mut self, count: usize) -> Result<Vec<CardId>, EngineError> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if self.state.path_deck.is_empty() {
                if self.state.path_discard.is_empty() {
                    self.log("The path deck is exhausted.");
                    break;
                }
                self.state.reshuffle_path_discard();
                self.log("The path discard is shuffled into the path deck.");
            }
            let Some(card) = self.state.path_deck.pop_front() else {
                break;
            };
            let zone = self.state.require(card)?.starting_zone.unwrap_or(Zone::WithinReach);
            self.put_into_play(card, zone, None)?;
            drawn.push(card);
            if self.day_ended {
                break;
            }
        }
        Ok(drawn)
    }

    // === Refresh ===

    /// End-of-round refresh: fatigue per injury, draw one ranger card,
    /// refill energy, ready every card, advance the round counter.
    pub fn refresh(&mut self) -> Result<(), EngineError> {
        let injury = self.state.ranger.injury;
        self.fatigue_ranger(injury)?;
        if self.day_ended {
            return Ok(());
        }
        self.draw_ranger_card()?;
        if self.day_ended {
            return Ok(());
        }
        self.state.ranger.refresh_energy();
        self.ready_all()?;
        self.state.round_number += 1;
        tracing::debug!(round = self.state.round_number, "round refreshed");
        Ok(())
    }

    // === Location and travel ===

    /// Put a location into play in the Surroundings and make it current.
    pub fn arrive_at(&mut self, location: Card) -> Result<CardId, EngineError> {
        let id = self.state.add_card(location);
        self.put_into_play(id, Zone::Surroundings, None)?;
        self.state.location = Some(id);
        let name = self.name(id);
        self.log(format!("The ranger arrives at {}.", name));
        Ok(id)
    }

    /// Why travel is impossible right now, if it is.
    #[must_use]
    pub fn travel_blocker(&self) -> Option<String> {
        if let Some(location) = self.state.location.and_then(|id| self.state.card(id)) {
            if !location.progress_threshold.is_met(location.progress) {
                return Some(format!("{} needs more progress", location.title));
            }
        }
        if let Some(obstacle) = self.nearest_obstacle() {
            return Some(format!("{} blocks the way", self.name(obstacle)));
        }
        if self.is_blocked(AbilityKind::PreventTravel, None) {
            return Some("travel is prevented".to_owned());
        }
        None
    }

    /// Travel to a new location.
    ///
    /// Needs enough progress on the current location, no ready Obstacle, no
    /// active `PreventTravel`, and the player's confirmation. Path zones are
    /// swept (Persistent cards, weather and missions stay), the path piles
    /// are emptied, and the destination enters the Surroundings. The ranger
    /// may then camp, which ends the day.
    pub fn travel(&mut self, destination: Card) -> Result<bool, EngineError> {
        if let Some(reason) = self.travel_blocker() {
            self.log(format!("The ranger cannot travel: {}.", reason));
            return Ok(false);
        }
        let prompt = format!("Travel to {}?", destination.title);
        if !self.decide(&prompt) {
            return Ok(false);
        }

        let swept: Vec<CardId> = Zone::PATH_ZONES
            .into_iter()
            .flat_map(|zone| self.state.cards_in(zone))
            .filter(|&id| {
                self.state.card(id).is_some_and(|c| {
                    !c.has_keyword(Keyword::Persistent)
                        && !c.has_type(CardType::Weather)
                        && !c.has_type(CardType::Mission)
                })
            })
            .collect();
        for id in swept {
            if self.state.is_in_play(id) {
                self.discard(id)?;
            }
        }
        self.state.path_deck.clear();
        self.state.path_discard.clear();

        self.arrive_at(destination)?;
        if self.decide("Make camp and end the day?") {
            self.end_day("The ranger makes camp.");
        }
        Ok(true)
    }

    // === Reachability ===

    /// The nearest ready Obstacle in a path zone.
    fn nearest_obstacle(&self) -> Option<CardId> {
        Zone::PATH_ZONES.into_iter().find_map(|zone| {
            self.state.cards_in(zone).into_iter().find(|&id| {
                self.state
                    .card(id)
                    .is_some_and(|c| c.is_ready() && c.has_keyword(Keyword::Obstacle))
            })
        })
    }

    /// Zones the ranger can currently interact with. A ready Obstacle hides
    /// every zone beyond its own.
    #[must_use]
    pub fn reachable_zones(&self) -> Vec<Zone> {
        let limit = self
            .nearest_obstacle()
            .and_then(|id| self.state.zone_of(id))
            .map_or(Zone::Surroundings.distance(), Zone::distance);
        [Zone::PlayerArea, Zone::WithinReach, Zone::AlongTheWay, Zone::Surroundings]
            .into_iter()
            .filter(|zone| zone.distance() <= limit)
            .collect()
    }

    #[must_use]
    pub fn is_reachable(&self, id: CardId) -> bool {
        self.state
            .zone_of(id)
            .is_some_and(|zone| self.reachable_zones().contains(&zone))
    }

    /// Reachable targets an action offers.
    #[must_use]
    pub fn targets_for(&self, action: &Action) -> Vec<CardId> {
        match &action.target_provider {
            Some(provider) => provider(self).into_iter().filter(|&id| self.is_reachable(id)).collect(),
            None => Vec::new(),
        }
    }

    /// Every action the ranger may take now: the common tests and the tests
    /// of reachable cards in play. Targeted actions without a reachable
    /// target are left out.
    #[must_use]
    pub fn available_actions(&self) -> Vec<Action> {
        let mut actions = common::common_tests();
        for id in self.state.zones.all_in_play() {
            if !self.is_reachable(id) {
                continue;
            }
            let Some(card) = self.state.card(id) else {
                continue;
            };
            let behavior = self.library.behavior(&card.definition);
            actions.extend(
                behavior
                    .tests(card)
                    .into_iter()
                    .map(|action| action.from_source(id, card.title.clone())),
            );
        }
        actions.retain(|action| !action.needs_target() || !self.targets_for(action).is_empty());
        actions
    }

    // === Playing cards ===

    /// Hand cards the ranger can afford and, when they need one, target.
    #[must_use]
    pub fn playable_cards(&self) -> Vec<PlayOption> {
        self.state
            .ranger
            .hand
            .iter()
            .filter_map(|&id| {
                let card = self.state.card(id)?;
                let cost = card.cost?;
                if self.state.ranger.energy(cost.aspect) < cost.amount {
                    return None;
                }
                let targets = self.library.behavior(&card.definition).play_targets(self, id);
                if targets.as_ref().is_some_and(Vec::is_empty) {
                    return None;
                }
                Some(PlayOption { card: id, targets })
            })
            .collect()
    }

    /// Play a card from hand: pay its cost, then let its behaviour place it.
    pub fn play_card(&mut self, id: CardId, target: Option<CardId>) -> Result<(), EngineError> {
        let card = self.state.require(id)?;
        let cannot = |reason: &str| EngineError::CannotPlay {
            card: id,
            reason: reason.to_owned(),
        };
        if !self.state.ranger.in_hand(id) {
            return Err(cannot("it is not in hand"));
        }
        let Some(cost) = card.cost else {
            return Err(cannot("it has no play cost"));
        };
        if self.state.ranger.energy(cost.aspect) < cost.amount {
            return Err(cannot("not enough energy"));
        }
        let behavior = self.library.behavior(&card.definition);
        if let Some(targets) = behavior.play_targets(self, id) {
            if !target.is_some_and(|t| targets.contains(&t)) {
                return Err(cannot("it needs a valid target"));
            }
        }

        self.spend_energy(cost.aspect, cost.amount)?;
        self.state.ranger.remove_from_hand(id);
        self.unregister_card(id);
        let name = self.name(id);
        self.log(format!("The ranger plays {}.", name));
        behavior.on_played(self, id, target)
    }
}
