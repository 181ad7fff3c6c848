//! Identifiers for clips, states and graph nodes.

use serde::{Deserialize, Serialize};

/// Handle of a clip loaded into a [`ClipLibrary`](crate::library::ClipLibrary).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u32);

/// Position of a state inside its [`StateRegistry`](crate::state::StateRegistry).
/// States are never removed, so the index stays valid for the registry's lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StateId(pub u32);

/// Generational handle of a node in a [`PlayableGraph`](crate::graph::PlayableGraph).
///
/// A slot may be reused after its node is destroyed; the generation makes handles to
/// the old node stale instead of aliasing the new one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_compare_by_generation() {
        let a = NodeId {
            index: 0,
            generation: 0,
        };
        let b = NodeId {
            index: 0,
            generation: 1,
        };
        assert_ne!(a, b);
        assert_eq!(StateId(3).index(), 3);
    }
}
