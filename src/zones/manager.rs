//! Zone graph: card locations plus attachment edges.
//!
//! The `ZoneGraph` tracks which in-play zone each card occupies, the order
//! of cards inside each zone, and which cards are attached to which. It is
//! pure bookkeeping: cascading side effects that need the rest of the
//! engine (discarding, ambush fatigue, logging) live on `Engine`.
//!
//! Attachment edges are stored as id lookups in both directions, never as
//! mutual references, so the graph clones in O(1) and serializes directly.
//!
//! ## Usage
//!
//! ```
//! use trail_rules::zones::{Zone, ZoneGraph};
//! use trail_rules::core::CardId;
//!
//! let mut graph = ZoneGraph::new();
//! graph.place(CardId(1), Zone::WithinReach);
//! graph.place(CardId(2), Zone::WithinReach);
//! graph.link(CardId(2), CardId(1)).unwrap();
//!
//! // Moving the parent carries the attachment along.
//! graph.relocate_tree(CardId(1), Zone::AlongTheWay);
//! assert_eq!(graph.zone_of(CardId(2)), Some(Zone::AlongTheWay));
//! ```

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardId, EngineError};

/// In-play zones, from the player outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    PlayerArea,
    WithinReach,
    AlongTheWay,
    Surroundings,
}

impl Zone {
    /// Zones in the order challenge effects resolve.
    pub const CHALLENGE_ORDER: [Zone; 4] = [
        Zone::Surroundings,
        Zone::AlongTheWay,
        Zone::WithinReach,
        Zone::PlayerArea,
    ];

    /// Zones that hold path cards, nearest first.
    pub const PATH_ZONES: [Zone; 3] = [Zone::WithinReach, Zone::AlongTheWay, Zone::Surroundings];

    /// Distance from the ranger. The player area is 0.
    #[must_use]
    pub const fn distance(self) -> usize {
        match self {
            Zone::PlayerArea => 0,
            Zone::WithinReach => 1,
            Zone::AlongTheWay => 2,
            Zone::Surroundings => 3,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::PlayerArea => "Player Area",
            Zone::WithinReach => "Within Reach",
            Zone::AlongTheWay => "Along the Way",
            Zone::Surroundings => "Surroundings",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

type Children = SmallVec<[CardId; 4]>;

/// Card locations and attachment edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneGraph {
    /// Ordered contents, indexed by `Zone::distance`.
    zones: [Vector<CardId>; 4],

    /// card -> zone
    locations: ImHashMap<CardId, Zone>,

    /// child -> parent
    attached_to: ImHashMap<CardId, CardId>,

    /// parent -> children, in attach order
    attachments: ImHashMap<CardId, Children>,
}

impl ZoneGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Locations ===

    /// Put a card at the end of a zone. Returns false if it is already in play.
    pub fn place(&mut self, card: CardId, zone: Zone) -> bool {
        if self.locations.contains_key(&card) {
            return false;
        }
        self.locations.insert(card, zone);
        self.zones[zone.distance()].push_back(card);
        true
    }

    /// Take a card out of its zone. Attachment edges are left untouched.
    pub fn remove(&mut self, card: CardId) -> Option<Zone> {
        let zone = self.locations.remove(&card)?;
        self.zones[zone.distance()].retain(|&c| c != card);
        Some(zone)
    }

    /// Zone a card occupies, `None` when it is not in play.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }

    /// Cards in a zone, in placement order.
    #[must_use]
    pub fn cards_in(&self, zone: Zone) -> &Vector<CardId> {
        &self.zones[zone.distance()]
    }

    /// Every card in play, zone by zone from the player outward.
    #[must_use]
    pub fn all_in_play(&self) -> Vec<CardId> {
        self.zones.iter().flat_map(|z| z.iter().copied()).collect()
    }

    /// Move a card and everything transitively attached to it.
    ///
    /// Cards without a zone are skipped. Returns the cards that changed zone.
    pub fn relocate_tree(&mut self, card: CardId, zone: Zone) -> Vec<CardId> {
        let mut tree = vec![card];
        tree.extend(self.descendants(card));

        let mut moved = Vec::new();
        for id in tree {
            match self.zone_of(id) {
                Some(current) if current != zone => {
                    self.remove(id);
                    self.place(id, zone);
                    moved.push(id);
                }
                _ => {}
            }
        }
        moved
    }

    // === Attachments ===

    /// Add an edge `child -> parent`, replacing any edge the child had.
    ///
    /// Fails when the edge would be a self-loop or close a cycle.
    pub fn link(&mut self, child: CardId, parent: CardId) -> Result<(), EngineError> {
        if child == parent {
            return Err(EngineError::SelfAttachment(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(EngineError::AttachmentCycle { child, parent });
        }
        self.unlink(child);
        self.attached_to.insert(child, parent);
        self.attachments.entry(parent).or_insert_with(Children::new).push(child);
        Ok(())
    }

    /// Remove the edge from `child` to its parent, returning the parent.
    pub fn unlink(&mut self, child: CardId) -> Option<CardId> {
        let parent = self.attached_to.remove(&child)?;
        let now_empty = match self.attachments.get_mut(&parent) {
            Some(children) => {
                children.retain(|c| *c != child);
                children.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.attachments.remove(&parent);
        }
        Some(parent)
    }

    #[must_use]
    pub fn parent_of(&self, child: CardId) -> Option<CardId> {
        self.attached_to.get(&child).copied()
    }

    /// Cards directly attached to `parent`, in attach order.
    #[must_use]
    pub fn attachments_of(&self, parent: CardId) -> Vec<CardId> {
        self.attachments
            .get(&parent)
            .map(|children| children.to_vec())
            .unwrap_or_default()
    }

    /// Every card transitively attached to `card`, depth first.
    #[must_use]
    pub fn descendants(&self, card: CardId) -> Vec<CardId> {
        let mut out = Vec::new();
        let mut stack = self.attachments_of(card);
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let mut children = self.attachments_of(next);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// True if `ancestor` is reachable from `card` by following parent edges.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: CardId, card: CardId) -> bool {
        let mut current = self.parent_of(card);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_remove() {
        let mut graph = ZoneGraph::new();
        assert!(graph.place(CardId(1), Zone::WithinReach));
        assert!(!graph.place(CardId(1), Zone::AlongTheWay));
        assert_eq!(graph.zone_of(CardId(1)), Some(Zone::WithinReach));

        assert_eq!(graph.remove(CardId(1)), Some(Zone::WithinReach));
        assert_eq!(graph.remove(CardId(1)), None);
        assert!(graph.cards_in(Zone::WithinReach).is_empty());
    }

    #[test]
    fn test_zone_order_preserved() {
        let mut graph = ZoneGraph::new();
        graph.place(CardId(3), Zone::Surroundings);
        graph.place(CardId(1), Zone::Surroundings);
        graph.place(CardId(2), Zone::Surroundings);
        let order: Vec<_> = graph.cards_in(Zone::Surroundings).iter().copied().collect();
        assert_eq!(order, vec![CardId(3), CardId(1), CardId(2)]);
    }

    #[test]
    fn test_self_link_rejected() {
        let mut graph = ZoneGraph::new();
        let err = graph.link(CardId(1), CardId(1)).unwrap_err();
        assert!(matches!(err, EngineError::SelfAttachment(CardId(1))));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut graph = ZoneGraph::new();
        graph.link(CardId(2), CardId(1)).unwrap();
        graph.link(CardId(3), CardId(2)).unwrap();
        let err = graph.link(CardId(1), CardId(3)).unwrap_err();
        assert!(matches!(err, EngineError::AttachmentCycle { .. }));
    }

    #[test]
    fn test_relink_moves_edge() {
        let mut graph = ZoneGraph::new();
        graph.link(CardId(3), CardId(1)).unwrap();
        graph.link(CardId(3), CardId(2)).unwrap();
        assert_eq!(graph.parent_of(CardId(3)), Some(CardId(2)));
        assert!(graph.attachments_of(CardId(1)).is_empty());
        assert_eq!(graph.attachments_of(CardId(2)), vec![CardId(3)]);
    }

    #[test]
    fn test_descendants_depth_first() {
        let mut graph = ZoneGraph::new();
        graph.link(CardId(2), CardId(1)).unwrap();
        graph.link(CardId(3), CardId(2)).unwrap();
        graph.link(CardId(4), CardId(1)).unwrap();
        assert_eq!(graph.descendants(CardId(1)), vec![CardId(2), CardId(3), CardId(4)]);
    }

    #[test]
    fn test_relocate_tree_skips_conceptual_cards() {
        let mut graph = ZoneGraph::new();
        graph.place(CardId(1), Zone::WithinReach);
        graph.link(CardId(2), CardId(1)).unwrap();

        let moved = graph.relocate_tree(CardId(1), Zone::Surroundings);
        assert_eq!(moved, vec![CardId(1)]);
        assert_eq!(graph.zone_of(CardId(2)), None);
    }

    #[test]
    fn test_unlink_cleans_empty_lists() {
        let mut graph = ZoneGraph::new();
        graph.link(CardId(2), CardId(1)).unwrap();
        assert_eq!(graph.unlink(CardId(2)), Some(CardId(1)));
        assert_eq!(graph.unlink(CardId(2)), None);
        assert!(graph.attachments_of(CardId(1)).is_empty());
    }

    #[test]
    fn test_all_in_play_order() {
        let mut graph = ZoneGraph::new();
        graph.place(CardId(1), Zone::Surroundings);
        graph.place(CardId(2), Zone::PlayerArea);
        graph.place(CardId(3), Zone::WithinReach);
        assert_eq!(graph.all_in_play(), vec![CardId(2), CardId(3), CardId(1)]);
    }
}
