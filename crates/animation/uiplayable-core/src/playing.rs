//! The single in-flight playback: which state, which phase, which graph node.

use std::fmt;

use crate::graph::PlayableGraph;
use crate::ids::{NodeId, StateId};
use crate::library::ClipLibrary;
use crate::state::{OnceCallback, State};

/// Slack when comparing accumulated node time against a clip length, so that
/// a run of fixed-rate steps summing to the length counts as reaching it.
const END_TOLERANCE: f32 = 1e-4;

/// Playback of one state. At most one exists per player, and it owns the only node
/// feeding the mixer.
pub struct PlayingState {
    state: StateId,
    looping: bool,
    node: NodeId,
    on_complete: Option<OnceCallback>,
}

impl PlayingState {
    /// Create a node bound to the state's enter clip (possibly none) and feed it
    /// into the mixer.
    pub(crate) fn start(
        graph: &mut PlayableGraph,
        id: StateId,
        state: &State,
        on_complete: Option<OnceCallback>,
    ) -> Self {
        let node = graph.create_clip_node(state.enter, false);
        graph.connect(node);
        Self {
            state: id,
            looping: false,
            node,
            on_complete,
        }
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// True once the enter clip has played to its end. A state without a (known)
    /// enter clip is complete immediately.
    pub(crate) fn enter_finished(&self, graph: &PlayableGraph, state: &State, clips: &ClipLibrary) -> bool {
        match state.enter.and_then(|c| clips.length(c)) {
            None => true,
            Some(length) => graph
                .node(self.node)
                .map_or(true, |n| n.time + END_TOLERANCE >= length),
        }
    }

    /// Switch to loop policy: rebind to the loop clip, or hold the enter clip's last frame.
    pub(crate) fn enter_loop(&mut self, graph: &mut PlayableGraph, state: &State, clips: &ClipLibrary) {
        self.looping = true;
        if let Some(loop_clip) = state.loop_clip {
            graph.destroy(self.node);
            self.node = graph.create_clip_node(Some(loop_clip), true);
            graph.connect(self.node);
        } else if let Some(length) = state.enter.and_then(|c| clips.length(c)) {
            if let Some(node) = graph.node_mut(self.node) {
                node.time = length;
                node.playing = false;
            }
        }
    }

    pub(crate) fn take_continuation(&mut self) -> Option<OnceCallback> {
        self.on_complete.take()
    }

    /// Destroy the owned node. Any pending continuation is dropped unrun.
    pub(crate) fn destroy(self, graph: &mut PlayableGraph) {
        graph.destroy(self.node);
    }
}

impl fmt::Debug for PlayingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayingState")
            .field("state", &self.state)
            .field("looping", &self.looping)
            .field("node", &self.node)
            .field("has_continuation", &self.on_complete.is_some())
            .finish()
    }
}
