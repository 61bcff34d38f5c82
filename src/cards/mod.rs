//! Card system: vocabulary, instances, lifecycle and behaviour.
//!
//! ## Key Types
//!
//! - `Card`: Serializable card data and its lifecycle state machine
//! - `Threshold` / `ClearKind`: Clear conditions and why a card cleared
//! - `CardType`, `Keyword`, `Aspect`, `Approach`, `ChallengeSymbol`: Vocabulary
//! - `CardBehavior`: The capability set content implements per definition
//! - `CardLibrary`: Definition key lookup for behaviours

pub mod attributes;
pub mod instance;
pub mod registry;

pub use attributes::{Approach, Aspect, Attribute, CardType, ChallengeSymbol, EnergyCost, Keyword};
pub use instance::{Card, ClearKind, Threshold, ValueModifier};
pub use registry::{CardBehavior, CardLibrary, ListenerScope, NoBehavior};
