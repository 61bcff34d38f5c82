//! The four tests every ranger can always attempt.
//!
//! | Test     | Aspect | Approach    | Targets             | Success                 |
//! |----------|--------|-------------|---------------------|-------------------------|
//! | Traverse | FIT    | Exploration | features, location  | progress = effort       |
//! | Connect  | SPI    | Connection  | beings              | progress = effort       |
//! | Avoid    | AWA    | Conflict    | beings              | exhaust the target      |
//! | Remember | FOC    | Reason      | none (difficulty 1) | draw a ranger card      |
//!
//! Targeted difficulties are `max(1, presence)` of the target. A failed
//! Traverse injures the ranger.

use crate::cards::{Approach, Aspect};
use crate::core::CardId;
use crate::engine::Engine;

use super::Action;

/// Difficulty of a targeted common test.
fn presence_difficulty(engine: &Engine, target: Option<CardId>) -> i32 {
    target.map_or(1, |t| engine.current_presence(t).max(1))
}

pub fn traverse() -> Action {
    Action::test("common-traverse", "Traverse", "Traverse", Aspect::Fitness, Approach::Exploration)
        .with_targets(|engine| {
            let state = engine.state();
            let mut targets = state.features_in_play();
            if let Some(location) = state.location.filter(|l| state.is_in_play(*l)) {
                if !targets.contains(&location) {
                    targets.push(location);
                }
            }
            targets
        })
        .with_difficulty(presence_difficulty)
        .on_success(|engine, effort, target| match target {
            Some(target) => engine.add_progress(target, effort),
            None => Ok(()),
        })
        .on_fail(|engine, _effort, _target| engine.injure_ranger())
}

pub fn connect() -> Action {
    Action::test("common-connect", "Connect", "Connect", Aspect::Spirit, Approach::Connection)
        .with_targets(|engine| engine.state().beings_in_play())
        .with_difficulty(presence_difficulty)
        .on_success(|engine, effort, target| match target {
            Some(target) => engine.add_progress(target, effort),
            None => Ok(()),
        })
}

pub fn avoid() -> Action {
    Action::test("common-avoid", "Avoid", "Avoid", Aspect::Awareness, Approach::Conflict)
        .with_targets(|engine| engine.state().beings_in_play())
        .with_difficulty(presence_difficulty)
        .on_success(|engine, _effort, target| {
            if let Some(target) = target {
                engine.exhaust_card(target)?;
            }
            Ok(())
        })
}

pub fn remember() -> Action {
    Action::test("common-remember", "Remember", "Remember", Aspect::Focus, Approach::Reason)
        .on_success(|engine, _effort, _target| engine.draw_ranger_card().map(|_| ()))
}

/// All four common tests.
pub fn common_tests() -> Vec<Action> {
    vec![traverse(), connect(), avoid(), remember()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_tests_profiles() {
        let tests = common_tests();
        let verbs: Vec<_> = tests.iter().map(|a| a.verb.as_str()).collect();
        assert_eq!(verbs, vec!["Traverse", "Connect", "Avoid", "Remember"]);
        assert!(tests.iter().all(Action::is_test));
        assert_eq!(
            traverse().test_profile(),
            Some((Aspect::Fitness, Approach::Exploration))
        );
        assert!(!remember().needs_target());
        assert!(avoid().needs_target());
    }
}
