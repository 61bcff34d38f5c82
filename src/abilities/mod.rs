//! Constant abilities: passive rules that hold while their source is in play.
//!
//! Unlike listeners, constant abilities never fire. The engine asks the
//! registry whenever it needs an answer ("is readying this card
//! prevented?", "what is this being's presence?") and each ability's
//! predicate is evaluated against the current state at that moment.
//!
//! ## Key Components
//!
//! - [`AbilityKind`]: The closed set of passive rule kinds
//! - [`ConstantAbility`]: One registered ability and its condition
//! - [`AbilityRegistry`]: Storage and on-demand queries

mod constant;
mod registry;

pub use constant::{AbilityCondition, AbilityKind, ConstantAbility};
pub use registry::AbilityRegistry;
