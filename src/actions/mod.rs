//! Actions: what the ranger can do, and how much they commit to it.
//!
//! An `Action` is a verb (Traverse, Connect, Hunt...) with an optional test
//! profile (aspect + approach), an optional target provider, a difficulty
//! function, and success/failure effects. Actions are assembled by content
//! and by the common tests in [`common`]; the engine runs them through
//! `Engine::perform_test`.
//!
//! ## Example
//!
//! ```
//! use trail_rules::actions::{Action, CommitDecision};
//! use trail_rules::cards::{Approach, Aspect};
//!
//! let rest = Action::test("rest", "Rest", "Rest", Aspect::Spirit, Approach::Reason)
//!     .with_difficulty(|_, _| 2)
//!     .on_success(|engine, _effort, _target| {
//!         engine.log("The ranger rests.");
//!         Ok(())
//!     });
//!
//! assert!(rest.is_test());
//! let commit = CommitDecision::energy(2).with_hand_index(0);
//! assert_eq!(commit.hand_indices.len(), 1);
//! ```

pub mod common;

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Approach, Aspect};
use crate::core::{CardId, EngineError};
use crate::engine::Engine;

/// Candidate targets for an action.
pub type TargetProvider = Rc<dyn Fn(&Engine) -> Vec<CardId>>;

/// Difficulty of a test against an (optional) target.
pub type DifficultyFn = Rc<dyn Fn(&Engine, Option<CardId>) -> i32>;

/// Success or failure effect. Receives the resulting effort and the target.
pub type ActionEffect = Rc<dyn Fn(&mut Engine, i32, Option<CardId>) -> Result<(), EngineError>>;

/// Whether an action is a test and, if so, what it tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Test { aspect: Aspect, approach: Approach },
    Plain,
}

/// A thing the ranger can do.
#[derive(Clone)]
pub struct Action {
    pub id: String,
    pub name: String,
    /// Matched case-insensitively by listener verb filters.
    pub verb: String,
    pub kind: ActionKind,
    pub target_provider: Option<TargetProvider>,
    pub difficulty: DifficultyFn,
    pub on_success: ActionEffect,
    pub on_fail: Option<ActionEffect>,
    pub source_id: Option<CardId>,
    pub source_title: Option<String>,
}

impl Action {
    /// A test of `aspect` + `approach` with difficulty 1 and no effects.
    pub fn test(
        id: impl Into<String>,
        name: impl Into<String>,
        verb: impl Into<String>,
        aspect: Aspect,
        approach: Approach,
    ) -> Self {
        Self::with_kind(id, name, verb, ActionKind::Test { aspect, approach })
    }

    /// An action that is not a test: it simply runs its success effect.
    pub fn plain(id: impl Into<String>, name: impl Into<String>, verb: impl Into<String>) -> Self {
        Self::with_kind(id, name, verb, ActionKind::Plain)
    }

    fn with_kind(
        id: impl Into<String>,
        name: impl Into<String>,
        verb: impl Into<String>,
        kind: ActionKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            verb: verb.into(),
            kind,
            target_provider: None,
            difficulty: Rc::new(|_, _| 1),
            on_success: Rc::new(|_, _, _| Ok(())),
            on_fail: None,
            source_id: None,
            source_title: None,
        }
    }

    #[must_use]
    pub fn with_targets(mut self, provider: impl Fn(&Engine) -> Vec<CardId> + 'static) -> Self {
        self.target_provider = Some(Rc::new(provider));
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Fn(&Engine, Option<CardId>) -> i32 + 'static) -> Self {
        self.difficulty = Rc::new(difficulty);
        self
    }

    #[must_use]
    pub fn on_success(
        mut self,
        effect: impl Fn(&mut Engine, i32, Option<CardId>) -> Result<(), EngineError> + 'static,
    ) -> Self {
        self.on_success = Rc::new(effect);
        self
    }

    #[must_use]
    pub fn on_fail(
        mut self,
        effect: impl Fn(&mut Engine, i32, Option<CardId>) -> Result<(), EngineError> + 'static,
    ) -> Self {
        self.on_fail = Some(Rc::new(effect));
        self
    }

    /// Record the card offering this action.
    #[must_use]
    pub fn from_source(mut self, source: CardId, title: impl Into<String>) -> Self {
        self.source_id = Some(source);
        self.source_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn is_test(&self) -> bool {
        matches!(self.kind, ActionKind::Test { .. })
    }

    #[must_use]
    pub fn needs_target(&self) -> bool {
        self.target_provider.is_some()
    }

    /// Aspect and approach, for tests.
    #[must_use]
    pub fn test_profile(&self) -> Option<(Aspect, Approach)> {
        match self.kind {
            ActionKind::Test { aspect, approach } => Some((aspect, approach)),
            ActionKind::Plain => None,
        }
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("verb", &self.verb)
            .field("kind", &self.kind)
            .field("source_id", &self.source_id)
            .finish_non_exhaustive()
    }
}

/// What the ranger commits to a test.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDecision {
    /// Energy of the test's aspect.
    pub energy: u32,
    /// Positions in the hand of cards committed for their icons.
    pub hand_indices: SmallVec<[usize; 4]>,
}

impl CommitDecision {
    #[must_use]
    pub fn energy(energy: u32) -> Self {
        Self {
            energy,
            hand_indices: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_hand_index(mut self, index: usize) -> Self {
        self.hand_indices.push(index);
        self
    }
}
