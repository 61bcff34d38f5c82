//! Scenario tests with the sample cards.
//!
//! Whole sequences: a response moment after Traverse, travel and camping,
//! a mulcher holding the ranger token, predators closing in, and injuries
//! ending the day.

use trail_rules::actions::{common, CommitDecision};
use trail_rules::cards::{Aspect, Card, CardType, ChallengeSymbol, Threshold};
use trail_rules::challenge::{ChallengeCard, ChallengeDeck};
use trail_rules::content::{self, conciliator, explorer, missions, valley, woods};
use trail_rules::core::{CardId, EngineConfig, GameState, RangerState};
use trail_rules::decisions::ScriptedDecisions;
use trail_rules::engine::{Engine, TestResolution};
use trail_rules::zones::Zone;

fn ranger() -> RangerState {
    RangerState::new("Ranger")
        .with_aspect(Aspect::Awareness, 2)
        .with_aspect(Aspect::Fitness, 3)
        .with_aspect(Aspect::Spirit, 2)
        .with_aspect(Aspect::Focus, 1)
}

fn engine_with(challenge: Vec<ChallengeCard>, decisions: ScriptedDecisions) -> Engine {
    let state = GameState::new(ranger(), 7).with_challenge_deck(ChallengeDeck::stacked(challenge));
    let mut engine = Engine::new(state, content::library())
        .unwrap()
        .with_guide(content::guide())
        .with_decisions(decisions);
    for i in 0..8 {
        engine.add_to_ranger_deck(Card::new(CardId(0), format!("Deck {}", i), "deck").with_type(CardType::Ranger));
    }
    engine
}

fn station() -> Card {
    Card::new(CardId(0), "Lone Tree Station", "location/lone_tree_station")
        .with_type(CardType::Location)
        .with_progress_threshold(Threshold::At(3))
}

fn boulder() -> Card {
    Card::new(CardId(0), "Boulder", "feature/boulder").with_type(CardType::Feature)
}

/// Walk With Me answers a successful Traverse with progress on a being.
#[test]
fn test_walk_with_me_after_traverse() {
    let script = ScriptedDecisions::new().then_decide(true);
    let log = script.log();
    let mut engine = engine_with(vec![ChallengeCard::new(ChallengeSymbol::Crest, 0)], script);
    let doe = engine.spawn(woods::sitka_doe(), Zone::WithinReach).unwrap();
    let rock = engine.spawn(boulder(), Zone::WithinReach).unwrap();
    let walk = engine.add_to_hand(explorer::walk_with_me()).unwrap();

    let resolution = engine
        .perform_test(&common::traverse(), &CommitDecision::energy(2), Some(rock))
        .unwrap();

    assert_eq!(resolution.outcome().unwrap().resulting_effort, 2);
    assert_eq!(log.decide_prompts(), vec!["Play Walk With Me?".to_owned()]);
    assert_eq!(engine.card(rock).unwrap().progress_value(), 2);
    assert_eq!(engine.card(doe).unwrap().progress_value(), 2);
    assert!(engine.state().ranger.discard.contains(&walk));
    assert!(engine.state().ranger.hand.is_empty());
    assert_eq!(engine.state().ranger.energy(Aspect::Spirit), 1);
    assert!(engine.listeners().is_empty());
}

/// Declining the response leaves the card in hand.
#[test]
fn test_walk_with_me_declined() {
    let mut engine = engine_with(
        vec![ChallengeCard::new(ChallengeSymbol::Crest, 0)],
        ScriptedDecisions::new().then_decide(false),
    );
    let doe = engine.spawn(woods::sitka_doe(), Zone::WithinReach).unwrap();
    let rock = engine.spawn(boulder(), Zone::WithinReach).unwrap();
    let walk = engine.add_to_hand(explorer::walk_with_me()).unwrap();

    engine.perform_test(&common::traverse(), &CommitDecision::energy(1), Some(rock)).unwrap();
    assert!(engine.state().ranger.in_hand(walk));
    assert_eq!(engine.card(doe).unwrap().progress_value(), 0);
    assert_eq!(engine.state().ranger.energy(Aspect::Spirit), 2);
}

/// Travel needs progress on the location and no ready obstacle; it sweeps
/// the path but keeps persistent cards and missions, and camping ends the
/// day.
#[test]
fn test_travel_and_camp() {
    let script = ScriptedDecisions::new().then_decide(true).then_decide(true);
    let log = script.log();
    let mut engine = engine_with(Vec::new(), script);
    let here = engine.arrive_at(station()).unwrap();
    let thicket = engine.spawn(woods::overgrown_thicket(), Zone::WithinReach).unwrap();
    let doe = engine.spawn(woods::sitka_doe(), Zone::AlongTheWay).unwrap();
    let quisi = engine.spawn(valley::quisi_vos(), Zone::WithinReach).unwrap();
    let mission = engine.spawn(missions::biscuit_delivery(), Zone::Surroundings).unwrap();
    engine.add_to_path_deck(woods::sitka_buck());

    assert!(engine.travel_blocker().is_some());
    engine.add_progress(here, 3).unwrap();
    assert!(engine.process_clears().unwrap().is_empty());
    assert!(engine.travel_blocker().unwrap().contains("Overgrown Thicket"));
    assert!(!engine.travel(station()).unwrap());

    engine.exhaust_card(thicket).unwrap();
    assert_eq!(engine.travel_blocker(), None);
    assert!(engine.travel(station()).unwrap());

    assert!(!engine.state().is_in_play(here));
    assert!(!engine.state().is_in_play(thicket));
    assert!(!engine.state().is_in_play(doe));
    assert!(engine.state().is_in_play(quisi));
    assert!(engine.state().is_in_play(mission));
    assert!(engine.state().path_deck.is_empty());
    assert!(engine.state().path_discard.is_empty());
    assert_eq!(
        log.decide_prompts(),
        vec!["Travel to Lone Tree Station?".to_owned(), "Make camp and end the day?".to_owned()]
    );
    assert!(engine.is_day_ended());
}

/// The mulcher holds the ranger token and blocks travel until a Wrest
/// test frees it.
#[test]
fn test_mulcher_holds_token_until_wrested() {
    let mut engine = engine_with(vec![ChallengeCard::new(ChallengeSymbol::Mountain, 0); 2], ScriptedDecisions::new());
    let mulcher = engine.spawn(woods::caustic_mulcher(), Zone::WithinReach).unwrap();
    assert!(engine.resolve_challenge_effects(ChallengeSymbol::Sun).unwrap().contains(&mulcher));
    assert_eq!(engine.state().ranger.token_on, Some(mulcher));
    assert_eq!(engine.travel_blocker().as_deref(), Some("travel is prevented"));

    let wrest = engine
        .available_actions()
        .into_iter()
        .find(|a| a.verb == "Wrest")
        .unwrap();
    assert_eq!(engine.targets_for(&wrest), vec![mulcher]);
    let resolution = engine.perform_test(&wrest, &CommitDecision::energy(3), Some(mulcher)).unwrap();
    assert!(resolution.succeeded());
    assert!(engine.state().ranger.token_on_role());
    assert!(!engine.card(mulcher).unwrap().is_ready());
    assert_eq!(engine.travel_blocker(), None);
}

/// A tired ranger draws the wolhund in, and its ambush fatigues again.
#[test]
fn test_wolhund_closes_in_on_tired_ranger() {
    let mut engine = engine_with(Vec::new(), ScriptedDecisions::new());
    let wolf = engine.spawn(woods::prowling_wolhund(), Zone::AlongTheWay).unwrap();

    engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();
    assert_eq!(engine.state().zone_of(wolf), Some(Zone::AlongTheWay));

    engine.fatigue_ranger(3).unwrap();
    assert!(engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap().contains(&wolf));
    assert_eq!(engine.state().zone_of(wolf), Some(Zone::WithinReach));
    assert_eq!(engine.state().ranger.fatigue.len(), 5);
}

/// Predators harm beings through the shared crest effect; cleared beings
/// are discarded.
#[test]
fn test_predator_harms_calypsa() {
    let mut engine = engine_with(Vec::new(), ScriptedDecisions::new());
    let wolf = engine.spawn(woods::prowling_wolhund(), Zone::Surroundings).unwrap();
    let calypsa = engine.spawn(valley::calypsa(), Zone::WithinReach).unwrap();

    let resolved = engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();
    assert_eq!(resolved, vec![calypsa]);
    assert!(!engine.card(wolf).unwrap().is_ready());
    assert_eq!(engine.card(calypsa).unwrap().harm_value(), 2);

    engine.ready_card(wolf).unwrap();
    engine.resolve_challenge_effects(ChallengeSymbol::Crest).unwrap();
    assert!(!engine.state().is_in_play(calypsa));
    assert!(engine.state().path_discard.contains(&calypsa));
}

/// A Dear Friend brings the chef into play; the delivery mission redirects
/// the chef's entry when the chef clears.
#[test]
fn test_dear_friend_and_biscuit_delivery() {
    let script = ScriptedDecisions::new();
    let mut engine = engine_with(Vec::new(), script);
    engine.spawn(missions::biscuit_delivery(), Zone::Surroundings).unwrap();
    let chef = engine.add_to_path_deck(valley::hy_pimpot());
    let friend = engine.add_to_hand(conciliator::a_dear_friend()).unwrap();

    engine.play_card(friend, Some(chef)).unwrap();
    assert_eq!(engine.state().zones.parent_of(friend), Some(chef));

    engine.add_progress(chef, 2).unwrap();
    assert_eq!(engine.process_clears().unwrap(), vec![chef]);
    let texts: Vec<&str> = engine.messages().iter().map(|m| m.text.as_str()).collect();
    assert!(texts.contains(&"Hy Pimpot, Chef gladly accepts a biscuit."));
    assert!(engine.state().ranger.discard.contains(&friend));
}

/// Three failed Traverses injure the ranger out of the day.
#[test]
fn test_injuries_end_the_day() {
    let config = EngineConfig::new().with_interaction_fatigue(false);
    let mut engine = engine_with(vec![ChallengeCard::new(ChallengeSymbol::Sun, -3); 3], ScriptedDecisions::new())
        .with_config(config);
    let rock = engine.spawn(boulder().with_presence(2), Zone::WithinReach).unwrap();

    for _ in 0..2 {
        let resolution = engine.perform_test(&common::traverse(), &CommitDecision::energy(0), Some(rock)).unwrap();
        assert!(!resolution.succeeded());
        assert!(!engine.is_day_ended());
    }
    let resolution = engine.perform_test(&common::traverse(), &CommitDecision::energy(0), Some(rock)).unwrap();
    assert_eq!(resolution, TestResolution::DayEnded);
    assert_eq!(engine.state().ranger.injury, 3);
}
