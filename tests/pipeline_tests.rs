//! Test pipeline integration tests.
//!
//! Interaction fatigue, commitment, effort, listener sweeps and their
//! ordering, and how errors and day ends surface.

use std::cell::Cell;
use std::rc::Rc;

use trail_rules::actions::{common, Action, CommitDecision};
use trail_rules::cards::{
    Approach, Aspect, Card, CardBehavior, CardLibrary, CardType, ChallengeSymbol, Keyword, ListenerScope,
};
use trail_rules::challenge::{ChallengeCard, ChallengeDeck};
use trail_rules::core::{CardId, EngineError, GameState, RangerState};
use trail_rules::decisions::ScriptedDecisions;
use trail_rules::engine::{Engine, TestResolution};
use trail_rules::triggers::{EventListener, EventType, Timing};
use trail_rules::zones::Zone;

/// Listens for one (event, timing) pair and counts its calls.
struct Watcher {
    event: EventType,
    timing: Timing,
    verb: Option<&'static str>,
    scope: ListenerScope,
    bonus: i32,
    calls: Rc<Cell<u32>>,
}

impl Watcher {
    fn new(event: EventType, timing: Timing, verb: Option<&'static str>, calls: &Rc<Cell<u32>>) -> Self {
        Self {
            event,
            timing,
            verb,
            scope: ListenerScope::InPlay,
            bonus: 0,
            calls: Rc::clone(calls),
        }
    }
}

impl CardBehavior for Watcher {
    fn listeners(&self, card: &Card, scope: ListenerScope) -> Vec<EventListener> {
        if scope != self.scope {
            return Vec::new();
        }
        let calls = Rc::clone(&self.calls);
        let bonus = self.bonus;
        let mut listener = EventListener::new(card.id, self.event, self.timing, card.title.clone()).with_effect(
            move |_, _| {
                calls.set(calls.get() + 1);
                Ok(bonus)
            },
        );
        if let Some(verb) = self.verb {
            listener = listener.with_verb(verb);
        }
        vec![listener]
    }
}

fn ranger() -> RangerState {
    RangerState::new("Ranger")
        .with_aspect(Aspect::Fitness, 3)
        .with_aspect(Aspect::Spirit, 3)
        .with_aspect(Aspect::Awareness, 3)
}

fn engine_with(library: CardLibrary, challenge: Vec<ChallengeCard>) -> Engine {
    let state = GameState::new(ranger(), 42).with_challenge_deck(ChallengeDeck::stacked(challenge));
    let mut engine = Engine::new(state, library).unwrap();
    for i in 0..6 {
        engine.add_to_ranger_deck(Card::new(CardId(0), format!("Deck {}", i), "deck").with_type(CardType::Ranger));
    }
    engine
}

fn neutral(symbol: ChallengeSymbol) -> Vec<ChallengeCard> {
    vec![ChallengeCard::new(symbol, 0)]
}

fn rock(title: &str) -> Card {
    Card::new(CardId(0), title, "rock").with_type(CardType::Feature)
}

/// A ready presence-2 obstacle between the ranger and the target fatigues
/// exactly 2 before anything is committed.
#[test]
fn test_obstacle_fatigue_precedes_commitment() {
    let mut engine = engine_with(CardLibrary::new(), neutral(ChallengeSymbol::Sun));
    engine
        .spawn(
            Card::new(CardId(0), "Thicket", "thicket")
                .with_type(CardType::Feature)
                .with_keyword(Keyword::Obstacle)
                .with_presence(2),
            Zone::WithinReach,
        )
        .unwrap();
    let far = engine.spawn(rock("Far Rock"), Zone::AlongTheWay).unwrap();

    // More energy than the ranger has: the commitment step fails, but only
    // after interaction fatigue resolved.
    let result = engine.perform_test(&common::traverse(), &CommitDecision::energy(9), Some(far));
    assert!(matches!(result, Err(EngineError::InsufficientEnergy { needed: 9, available: 3, .. })));
    assert_eq!(engine.state().ranger.fatigue.len(), 2);
    assert_eq!(engine.state().ranger.energy(Aspect::Fitness), 3);
}

/// Friendly and exhausted cards in between never fatigue.
#[test]
fn test_friendly_and_exhausted_cards_do_not_fatigue() {
    let mut engine = engine_with(CardLibrary::new(), neutral(ChallengeSymbol::Sun));
    engine
        .spawn(
            Card::new(CardId(0), "Guide", "guide")
                .with_type(CardType::Being)
                .with_keyword(Keyword::Friendly)
                .with_presence(2),
            Zone::WithinReach,
        )
        .unwrap();
    engine
        .spawn(Card::new(CardId(0), "Sleeper", "sleeper").with_presence(3).exhausted(), Zone::WithinReach)
        .unwrap();
    let far = engine.spawn(rock("Far Rock"), Zone::Surroundings).unwrap();

    engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(far)).unwrap();
    assert!(engine.state().ranger.fatigue.is_empty());
}

/// 1 energy + one icon vs difficulty 1 with a 0 modifier: effort 2,
/// success, and one After sweep.
#[test]
fn test_effort_and_single_after_sweep() {
    let calls = Rc::new(Cell::new(0));
    let library = CardLibrary::new().with(
        "watcher",
        Watcher::new(EventType::TestSucceed, Timing::After, Some("Traverse"), &calls),
    );
    let mut engine = engine_with(library, neutral(ChallengeSymbol::Sun));
    engine.spawn(Card::new(CardId(0), "Watcher", "watcher"), Zone::PlayerArea).unwrap();
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();
    let boots = engine
        .add_to_hand(
            Card::new(CardId(0), "Boots", "boots")
                .with_type(CardType::Ranger)
                .with_icons(Approach::Exploration, 1),
        )
        .unwrap();

    let commit = CommitDecision::energy(1).with_hand_index(0);
    let resolution = engine.perform_test(&common::traverse(), &commit, Some(boulder)).unwrap();

    let outcome = resolution.outcome().unwrap();
    assert_eq!(outcome.base_effort, 2);
    assert_eq!(outcome.modifier, 0);
    assert_eq!(outcome.difficulty, 1);
    assert_eq!(outcome.resulting_effort, 2);
    assert!(outcome.success);
    assert_eq!(calls.get(), 1);
    assert_eq!(engine.card(boulder).unwrap().progress_value(), 2);
    assert!(engine.state().ranger.discard.contains(&boots));
    assert_eq!(engine.state().ranger.energy(Aspect::Fitness), 2);
}

/// Icons of the wrong approach add nothing; the modifier can floor effort.
#[test]
fn test_effort_floors_at_zero() {
    let mut engine = engine_with(CardLibrary::new(), vec![ChallengeCard::new(ChallengeSymbol::Crest, -5)]);
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();
    engine
        .add_to_hand(Card::new(CardId(0), "Charm", "charm").with_icons(Approach::Connection, 3))
        .unwrap();

    let commit = CommitDecision::energy(1).with_hand_index(0);
    let resolution = engine.perform_test(&common::traverse(), &commit, Some(boulder)).unwrap();
    let outcome = resolution.outcome().unwrap();
    assert_eq!(outcome.base_effort, 1);
    assert_eq!(outcome.resulting_effort, 0);
    assert!(!outcome.success);
    // A failed Traverse injures.
    assert_eq!(engine.state().ranger.injury, 1);
}

/// PerformTest/When listeners add to the base effort.
#[test]
fn test_when_listeners_add_effort() {
    let calls = Rc::new(Cell::new(0));
    let mut boost = Watcher::new(EventType::PerformTest, Timing::When, Some("Connect"), &calls);
    boost.bonus = 2;
    let library = CardLibrary::new().with("boost", boost);
    let mut engine = engine_with(library, neutral(ChallengeSymbol::Sun));
    engine.spawn(Card::new(CardId(0), "Boost", "boost"), Zone::PlayerArea).unwrap();
    let doe = engine
        .spawn(Card::new(CardId(0), "Doe", "doe").with_type(CardType::Being).with_presence(3), Zone::WithinReach)
        .unwrap();

    let resolution = engine.perform_test(&common::connect(), &CommitDecision::energy(1), Some(doe)).unwrap();
    assert_eq!(resolution.outcome().unwrap().base_effort, 3);
    assert!(resolution.succeeded());
    assert_eq!(calls.get(), 1);
}

/// One eligible listener runs without an ordering prompt; two get exactly
/// one prompt listing both.
#[test]
fn test_listener_ordering_asymmetry() {
    let calls = Rc::new(Cell::new(0));
    let library = CardLibrary::new().with(
        "watcher",
        Watcher::new(EventType::TestSucceed, Timing::After, Some("traverse"), &calls),
    );

    let script = ScriptedDecisions::new();
    let log = script.log();
    let mut engine = engine_with(library, vec![ChallengeCard::new(ChallengeSymbol::Sun, 0); 2]).with_decisions(script);
    let first = engine.spawn(Card::new(CardId(0), "Watcher", "watcher"), Zone::PlayerArea).unwrap();
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();

    engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(boulder)).unwrap();
    assert_eq!(calls.get(), 1);
    assert!(log.order_calls().is_empty());

    let second = engine.spawn(Card::new(CardId(0), "Watcher", "watcher"), Zone::PlayerArea).unwrap();
    engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(boulder)).unwrap();
    assert_eq!(calls.get(), 3);
    let orders = log.order_calls();
    assert_eq!(orders.len(), 1);
    let sources: Vec<Option<CardId>> = orders[0].iter().map(|item| item.source).collect();
    assert_eq!(sources.len(), 2);
    assert!(sources.contains(&Some(first)) && sources.contains(&Some(second)));
}

/// Listeners for a different verb are skipped silently.
#[test]
fn test_other_verbs_are_skipped() {
    let calls = Rc::new(Cell::new(0));
    let library = CardLibrary::new().with(
        "watcher",
        Watcher::new(EventType::TestSucceed, Timing::After, Some("Connect"), &calls),
    );
    let mut engine = engine_with(library, neutral(ChallengeSymbol::Sun));
    engine.spawn(Card::new(CardId(0), "Watcher", "watcher"), Zone::PlayerArea).unwrap();
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();

    assert!(engine
        .perform_test(&common::traverse(), &CommitDecision::energy(1), Some(boulder))
        .unwrap()
        .succeeded());
    assert_eq!(calls.get(), 0);
}

/// A verb filter on an action-less event is a context mismatch.
#[test]
fn test_verb_filter_without_action_is_an_error() {
    let calls = Rc::new(Cell::new(0));
    let library = CardLibrary::new().with("watcher", Watcher::new(EventType::Clear, Timing::When, Some("Traverse"), &calls));
    let mut engine = engine_with(library, neutral(ChallengeSymbol::Sun));
    engine.spawn(Card::new(CardId(0), "Watcher", "watcher"), Zone::PlayerArea).unwrap();

    let result = engine.trigger(EventType::Clear, Timing::When, None, 0, None);
    assert!(matches!(result, Err(EngineError::ListenerContextMismatch { .. })));
    assert_eq!(calls.get(), 0);
}

/// An unfiltered listener on an action event is a context mismatch too.
#[test]
fn test_unfiltered_listener_on_action_is_an_error() {
    let calls = Rc::new(Cell::new(0));
    let library =
        CardLibrary::new().with("watcher", Watcher::new(EventType::TestSucceed, Timing::After, None, &calls));
    let mut engine = engine_with(library, neutral(ChallengeSymbol::Sun));
    engine.spawn(Card::new(CardId(0), "Watcher", "watcher"), Zone::PlayerArea).unwrap();
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();

    let result = engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(boulder));
    assert!(matches!(result, Err(EngineError::ListenerContextMismatch { .. })));
}

/// Hand listeners are live while the card is in hand and gone once it
/// leaves.
#[test]
fn test_hand_listeners_follow_the_card() {
    let calls = Rc::new(Cell::new(0));
    let mut watcher = Watcher::new(EventType::TestSucceed, Timing::After, Some("Traverse"), &calls);
    watcher.scope = ListenerScope::Hand;
    let library = CardLibrary::new().with("watcher", watcher);
    let mut engine = engine_with(library, vec![ChallengeCard::new(ChallengeSymbol::Sun, 0); 2]);
    let card = engine.add_to_hand(Card::new(CardId(0), "Watcher", "watcher")).unwrap();
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();

    engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(boulder)).unwrap();
    assert_eq!(calls.get(), 1);

    engine.discard(card).unwrap();
    assert!(engine.listeners().is_empty());
    engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(boulder)).unwrap();
    assert_eq!(calls.get(), 1);
}

/// Not enough energy is fatal and spends nothing.
#[test]
fn test_insufficient_energy_is_fatal() {
    let mut engine = engine_with(CardLibrary::new(), neutral(ChallengeSymbol::Sun));
    let boulder = engine.spawn(rock("Boulder"), Zone::WithinReach).unwrap();
    let result = engine.perform_test(&common::traverse(), &CommitDecision::energy(4), Some(boulder));
    assert!(matches!(result, Err(EngineError::InsufficientEnergy { aspect: Aspect::Fitness, .. })));
    assert_eq!(engine.state().ranger.energy(Aspect::Fitness), 3);
    assert_eq!(engine.state().challenge_deck.remaining(), 1);
}

/// A targeted test started without a target still resolves, and its
/// effects see no target.
#[test]
fn test_missing_target_resolves_with_none() {
    let mut engine = engine_with(CardLibrary::new(), neutral(ChallengeSymbol::Sun));
    engine.spawn(rock("Wall").with_presence(3), Zone::WithinReach).unwrap();
    let action = Action::test("bare-traverse", "Traverse", "Traverse", Aspect::Fitness, Approach::Exploration)
        .with_targets(|engine| engine.state().features_in_play())
        .with_difficulty(|_, target| if target.is_some() { 5 } else { 1 })
        .on_success(|engine, _effort, target| {
            engine.log(format!("target={:?}", target));
            Ok(())
        });

    let resolution = engine.perform_test(&action, &CommitDecision::energy(1), None).unwrap();
    assert!(resolution.succeeded());
    assert_eq!(resolution.outcome().unwrap().difficulty, 1);
    assert!(engine.messages().iter().any(|m| m.text == "target=None"));
    assert!(engine.state().ranger.fatigue.is_empty());
    assert_eq!(engine.state().ranger.energy(Aspect::Fitness), 2);
}

/// Running out of fatigue mid-test ends the day before energy is spent.
#[test]
fn test_day_end_unwinds_the_test() {
    let state = GameState::new(ranger(), 1).with_challenge_deck(ChallengeDeck::stacked(neutral(ChallengeSymbol::Sun)));
    let mut engine = Engine::new(state, CardLibrary::new()).unwrap();
    engine
        .spawn(Card::new(CardId(0), "Wall", "wall").with_presence(4), Zone::WithinReach)
        .unwrap();
    let far = engine.spawn(rock("Far Rock"), Zone::AlongTheWay).unwrap();

    let resolution = engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(far)).unwrap();
    assert_eq!(resolution, TestResolution::DayEnded);
    assert!(engine.is_day_ended());
    assert_eq!(engine.state().ranger.energy(Aspect::Fitness), 3);
    assert_eq!(engine.state().challenge_deck.remaining(), 1);
}

/// Remember draws a card; plain actions resolve without a draw.
#[test]
fn test_remember_and_plain_actions() {
    let mut engine = engine_with(CardLibrary::new(), neutral(ChallengeSymbol::Sun));
    engine.state_mut().ranger.gain(Aspect::Focus, 1);
    let resolution = engine.perform_test(&common::remember(), &CommitDecision::energy(1), None).unwrap();
    assert!(resolution.succeeded());
    assert_eq!(engine.state().ranger.hand.len(), 1);

    let wave = Action::plain("wave", "Wave", "Wave").on_success(|engine, effort, _| {
        engine.log(format!("Waved with {} effort.", effort));
        Ok(())
    });
    let resolution = engine.perform_test(&wave, &CommitDecision::default(), None).unwrap();
    assert!(resolution.succeeded());
    assert!(engine.messages().iter().any(|m| m.text == "Waved with 0 effort."));
}
