//! Labels and the per-run arena that owns them.
//!
//! A label is immutable once pushed. Its predecessor is an index into the
//! same arena, so predecessor chains form a tree rooted at the source's
//! zero label. The arena only grows during a run: a label evicted from its
//! store stays addressable, which keeps every witness path of its
//! descendants reconstructible.

use serde::{Deserialize, Serialize};
use super::{Edge, NodeId, ResourceVector};

/// Index of a label inside its run's [`LabelArena`].
///
/// As wide as the arena's own index space, so every pushed label gets a
/// distinct id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LabelId(pub usize);

impl LabelId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A candidate resource vector reaching `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub node: NodeId,
    /// Resources accumulated from the source.
    pub resources: ResourceVector,
    /// `None` only for the source's zero label.
    pub predecessor: Option<LabelId>,
    /// Edge used to reach `node` from the predecessor's node.
    pub via: Option<Edge>,
}

impl Label {
    /// The zero label placed at the source before propagation.
    pub fn root(node: NodeId) -> Self {
        Self { node, resources: ResourceVector::ZERO, predecessor: None, via: None }
    }

    pub fn is_root(&self) -> bool {
        self.predecessor.is_none()
    }
}

/// Append-only storage for every label created during a run.
#[derive(Debug, Clone, Default)]
pub struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a label and return its id.
    pub fn push(&mut self, label: Label) -> LabelId {
        let id = LabelId(self.labels.len());
        self.labels.push(label);
        id
    }

    /// Id the next pushed label will receive.
    pub fn next_id(&self) -> LabelId {
        LabelId(self.labels.len())
    }

    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl std::ops::Index<LabelId> for LabelArena {
    type Output = Label;

    fn index(&self, id: LabelId) -> &Label {
        &self.labels[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_push_order() {
        let mut arena = LabelArena::new();
        assert_eq!(arena.next_id(), LabelId(0));
        let root = arena.push(Label::root(NodeId(3)));
        assert_eq!(root, LabelId(0));
        assert_eq!(arena.next_id(), LabelId(1));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena[root].node, NodeId(3));
        assert!(arena.get(LabelId(1)).is_none());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_ids_past_u32_range_stay_distinct() {
        let past = LabelId(u32::MAX as usize + 1);
        assert_ne!(past, LabelId(0));
        assert_eq!(past.index(), 1 << 32);
        assert_eq!(past.to_string(), "L4294967296");
    }
}
