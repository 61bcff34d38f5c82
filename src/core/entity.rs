//! Card and registration identifiers.
//!
//! Every physical card in a session has a unique `CardId`, allocated by
//! `GameState` when the card is added to the arena. Ids are never reused
//! within a session, so a stale id held by a closure can at worst fail a
//! lookup; it can never alias a different card.
//!
//! ## Usage
//!
//! ```
//! use trail_rules::core::CardId;
//!
//! let doe = CardId::new(7);
//! assert_eq!(doe.raw(), 7);
//! assert_eq!(format!("{}", doe), "Card(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifier assigned to a listener when it is registered.
///
/// Registration order is id order; the listener registry relies on this for
/// a stable firing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(12);
        assert_eq!(id.raw(), 12);
        assert_eq!(CardId::from(12), id);
        assert_eq!(format!("{}", id), "Card(12)");
    }

    #[test]
    fn test_card_id_ordering() {
        assert!(CardId(1) < CardId(2));
        let mut ids = vec![CardId(3), CardId(1), CardId(2)];
        ids.sort();
        assert_eq!(ids, vec![CardId(1), CardId(2), CardId(3)]);
    }

    #[test]
    fn test_listener_id() {
        let id = ListenerId::new(4);
        assert_eq!(id.raw(), 4);
        assert_eq!(format!("{}", id), "Listener(4)");
    }

    #[test]
    fn test_card_id_serde() {
        let id = CardId(99);
        let json = serde_json::to_string(&id).unwrap();
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
