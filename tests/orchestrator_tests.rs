//! Challenge effect orchestration tests.
//!
//! Dry runs decide which effects can resolve; only those are ordered and
//! executed, zone by zone from the surroundings inward.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use trail_rules::cards::{Card, CardBehavior, CardLibrary, CardType, ChallengeSymbol, Threshold};
use trail_rules::core::{CardId, EngineError, GameState, RangerState};
use trail_rules::decisions::ScriptedDecisions;
use trail_rules::engine::Engine;
use trail_rules::zones::Zone;

/// Never has anything to do.
struct Idle;

impl CardBehavior for Idle {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Crest]
    }
}

/// Records its real executions by card title, then adds harm to itself.
struct Recorder {
    executed: Rc<RefCell<Vec<String>>>,
}

impl CardBehavior for Recorder {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, _: ChallengeSymbol) -> Result<bool, EngineError> {
        if !engine.is_speculative() {
            self.executed.borrow_mut().push(engine.card(card)?.title.clone());
        }
        engine.add_harm(card, 1)?;
        Ok(true)
    }
}

/// Pushes a neighbour over its progress threshold.
struct Pusher;

impl CardBehavior for Pusher {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Crest]
    }

    fn resolve_challenge(&self, engine: &mut Engine, _card: CardId, _: ChallengeSymbol) -> Result<bool, EngineError> {
        let Some(target) = engine.state().find_in_play("Fragile") else {
            return Ok(false);
        };
        engine.add_progress(target, 5)?;
        Ok(true)
    }
}

/// Mutates everything it can reach, asks the player, and reports a change.
struct Meddler {
    real_runs: Rc<Cell<u32>>,
}

impl CardBehavior for Meddler {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Sun]
    }

    fn resolve_challenge(&self, engine: &mut Engine, card: CardId, _: ChallengeSymbol) -> Result<bool, EngineError> {
        if !engine.is_speculative() {
            self.real_runs.set(self.real_runs.get() + 1);
        }
        let beings = engine.state().beings_in_play();
        if let Some(being) = engine.choose_card("Meddle with", &beings)? {
            engine.add_progress(being, 3)?;
            engine.add_harm(being, 2)?;
            engine.move_card(being, Zone::Surroundings)?;
        }
        engine.exhaust_card(card)?;
        engine.log("Meddled.");
        Ok(true)
    }
}

struct Exploding;

impl CardBehavior for Exploding {
    fn challenge_symbols(&self) -> &'static [ChallengeSymbol] {
        &[ChallengeSymbol::Mountain]
    }

    fn resolve_challenge(&self, engine: &mut Engine, _card: CardId, _: ChallengeSymbol) -> Result<bool, EngineError> {
        if engine.is_speculative() {
            panic!("handler exploded");
        }
        Ok(false)
    }
}

fn engine_with(library: CardLibrary) -> Engine {
    Engine::new(GameState::new(RangerState::new("Ranger"), 42), library).unwrap()
}

fn recorder_library(executed: &Rc<RefCell<Vec<String>>>) -> CardLibrary {
    CardLibrary::new()
        .with("idle", Idle)
        .with("recorder", Recorder { executed: Rc::clone(executed) })
        .with("pusher", Pusher)
}

fn card(title: &str, key: &str) -> Card {
    Card::new(CardId(0), title, key)
        .with_type(CardType::Being)
        .with_harm_threshold(Threshold::At(5))
}

/// Three candidates, two of them no-ops: the survivor runs without an
/// ordering prompt.
#[test]
fn test_single_survivor_skips_ordering() {
    let executed = Rc::new(RefCell::new(Vec::new()));
    let script = ScriptedDecisions::new();
    let log = script.log();
    let mut engine = engine_with(recorder_library(&executed)).with_decisions(script);
    engine.spawn(card("Idle A", "idle"), Zone::AlongTheWay).unwrap();
    let active = engine.spawn(card("Active", "recorder"), Zone::AlongTheWay).unwrap();
    engine.spawn(card("Idle B", "idle"), Zone::AlongTheWay).unwrap();

    let resolved = engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();
    assert_eq!(resolved, vec![active]);
    assert_eq!(*executed.borrow(), vec!["Active"]);
    assert!(log.order_calls().is_empty());
    assert!(log.is_empty());
}

/// Two survivors in one zone get exactly one ordering prompt, and the
/// answer decides execution order.
#[test]
fn test_two_survivors_are_ordered_once() {
    let executed = Rc::new(RefCell::new(Vec::new()));
    let script = ScriptedDecisions::new().then_order(vec![1, 0]);
    let log = script.log();
    let mut engine = engine_with(recorder_library(&executed)).with_decisions(script);
    let first = engine.spawn(card("First", "recorder"), Zone::WithinReach).unwrap();
    engine.spawn(card("Idle", "idle"), Zone::WithinReach).unwrap();
    let second = engine.spawn(card("Second", "recorder"), Zone::WithinReach).unwrap();

    engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();

    let orders = log.order_calls();
    assert_eq!(orders.len(), 1);
    let sources: Vec<Option<CardId>> = orders[0].iter().map(|i| i.source).collect();
    assert_eq!(sources, vec![Some(first), Some(second)]);
    assert_eq!(*executed.borrow(), vec!["Second", "First"]);
}

/// Zones resolve from the surroundings inward; exhausted cards are skipped.
#[test]
fn test_zone_precedence() {
    let executed = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine_with(recorder_library(&executed));
    engine.spawn(card("Player", "recorder"), Zone::PlayerArea).unwrap();
    engine.spawn(card("Reach", "recorder"), Zone::WithinReach).unwrap();
    engine.spawn(card("Sleeping", "recorder").exhausted(), Zone::AlongTheWay).unwrap();
    engine.spawn(card("Way", "recorder"), Zone::AlongTheWay).unwrap();
    engine.spawn(card("Far", "recorder"), Zone::Surroundings).unwrap();

    engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();
    assert_eq!(*executed.borrow(), vec!["Far", "Way", "Reach", "Player"]);
}

/// A card cleared by an earlier effect does not resolve afterwards.
#[test]
fn test_cleared_card_does_not_resolve() {
    let executed = Rc::new(RefCell::new(Vec::new()));
    let script = ScriptedDecisions::new().then_order(vec![0, 1]);
    let mut engine = engine_with(recorder_library(&executed)).with_decisions(script);
    engine.spawn(card("Pusher", "pusher"), Zone::WithinReach).unwrap();
    let fragile = engine
        .spawn(card("Fragile", "recorder").with_progress_threshold(Threshold::At(3)), Zone::WithinReach)
        .unwrap();

    let resolved = engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();
    assert!(!engine.state().is_in_play(fragile));
    assert!(!resolved.contains(&fragile));
    assert!(executed.borrow().is_empty());
}

/// A dry run never touches the real engine, even when the handler changes
/// everything on its copy and asks the player.
#[test]
fn test_dry_run_isolation() {
    let real_runs = Rc::new(Cell::new(0));
    let library = CardLibrary::new().with("meddler", Meddler { real_runs: Rc::clone(&real_runs) });
    let script = ScriptedDecisions::new();
    let log = script.log();
    let mut engine = engine_with(library).with_decisions(script);
    let meddler = engine.spawn(Card::new(CardId(0), "Meddler", "meddler"), Zone::AlongTheWay).unwrap();
    let doe = engine
        .spawn(
            Card::new(CardId(0), "Doe", "doe")
                .with_type(CardType::Being)
                .with_progress_threshold(Threshold::At(10)),
            Zone::WithinReach,
        )
        .unwrap();

    let before = engine.snapshot().to_bytes().unwrap();
    let messages_before = engine.messages().len();

    assert!(engine.would_resolve(meddler, ChallengeSymbol::Sun));

    assert_eq!(engine.snapshot().to_bytes().unwrap(), before);
    assert_eq!(engine.messages().len(), messages_before);
    assert_eq!(engine.card(doe).unwrap().progress_value(), 0);
    assert_eq!(engine.state().zone_of(doe), Some(Zone::WithinReach));
    assert!(engine.card(meddler).unwrap().is_ready());
    assert!(log.is_empty());
    assert_eq!(real_runs.get(), 0);
}

/// A panicking dry run counts as "would resolve" and never reaches the
/// real engine.
#[test]
fn test_panicking_dry_run_is_absorbed() {
    let library = CardLibrary::new().with("exploding", Exploding);
    let mut engine = engine_with(library);
    let bomb = engine.spawn(Card::new(CardId(0), "Bomb", "exploding"), Zone::WithinReach).unwrap();

    assert!(engine.would_resolve(bomb, ChallengeSymbol::Mountain));
    let resolved = engine.resolve_challenge_effects(ChallengeSymbol::Mountain).unwrap();
    assert!(resolved.is_empty());
    assert!(engine.messages().iter().any(|m| m.text == "No challenge effects resolved."));
}

/// Symbols a card has no effect for are ignored.
#[test]
fn test_other_symbols_ignored() {
    let executed = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine_with(recorder_library(&executed));
    engine.spawn(card("Active", "recorder"), Zone::WithinReach).unwrap();
    assert!(engine.resolve_challenge_effects(ChallengeSymbol::Sun).unwrap().is_empty());
    assert!(executed.borrow().is_empty());
}
