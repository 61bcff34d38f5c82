//! Campaign guide dispatch.
//!
//! Narrative entries are keyed by string ("47.4", "91"). The engine does
//! not know what an entry says; it only looks the key up, applies any
//! active `OverrideEntry` ability, runs the entry, and ends the day when
//! the entry says so. Entries are registered by whoever assembles the
//! session.
//!
//! ```
//! use trail_rules::guide::CampaignGuide;
//!
//! let guide = CampaignGuide::new()
//!     .with_entry("47.4", |engine, _source, _clear| {
//!         engine.log("The trail opens up.");
//!         Ok(false)
//!     });
//! assert!(guide.contains("47.4"));
//! ```

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::cards::ClearKind;
use crate::core::{CardId, EngineError};
use crate::engine::Engine;

/// An entry body. Returns `Ok(true)` when the day should end.
pub type GuideEntry = Rc<dyn Fn(&mut Engine, Option<CardId>, Option<ClearKind>) -> Result<bool, EngineError>>;

/// Registered guide entries.
#[derive(Clone, Default)]
pub struct CampaignGuide {
    entries: FxHashMap<String, GuideEntry>,
}

impl CampaignGuide {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry, replacing any previous one with the same key.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        entry: impl Fn(&mut Engine, Option<CardId>, Option<ClearKind>) -> Result<bool, EngineError> + 'static,
    ) {
        self.entries.insert(key.into(), Rc::new(entry));
    }

    #[must_use]
    pub fn with_entry(
        mut self,
        key: impl Into<String>,
        entry: impl Fn(&mut Engine, Option<CardId>, Option<ClearKind>) -> Result<bool, EngineError> + 'static,
    ) -> Self {
        self.register(key, entry);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<GuideEntry> {
        self.entries.get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CampaignGuide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("CampaignGuide").field("entries", &keys).finish()
    }
}
