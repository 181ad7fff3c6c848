//! Playable graph: an arena of clip nodes feeding a single-input mixer.
//!
//! The graph owns every node it creates. Nodes live in generational slots, so a
//! destroyed node's handle never resolves again even after its slot is reused.
//! The mixer has exactly one input slot with its weight fixed at 1.

use log::{trace, warn};

use crate::ids::{ClipId, NodeId};
use crate::library::ClipLibrary;
use crate::outputs::Change;
use crate::sampling::sample_track;

/// A source node bound to (at most) one clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipNode {
    pub clip: Option<ClipId>,
    /// Elapsed time in seconds since the node started.
    pub time: f32,
    /// Loop nodes wrap their local time modulo the clip length; others clamp.
    pub wrap: bool,
    /// Paused nodes keep their time when the graph advances.
    pub playing: bool,
}

impl ClipNode {
    /// Local clip time for sampling.
    pub fn local_time(&self, length: f32) -> f32 {
        if length <= 0.0 {
            return 0.0;
        }
        if self.wrap {
            self.time.rem_euclid(length)
        } else {
            self.time.clamp(0.0, length)
        }
    }
}

/// The root mixer. Exactly one input slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mixer {
    pub input: Option<NodeId>,
    pub weight: f32,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            input: None,
            weight: 1.0,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<ClipNode>,
}

#[derive(Debug)]
pub struct PlayableGraph {
    name: String,
    slots: Vec<Slot>,
    free: Vec<u32>,
    mixer: Mixer,
    playing: bool,
}

impl PlayableGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            free: Vec::new(),
            mixer: Mixer::default(),
            playing: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start advancing node time on `advance`.
    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    /// Create a playing node bound to `clip` at time zero.
    pub fn create_clip_node(&mut self, clip: Option<ClipId>, wrap: bool) -> NodeId {
        let node = ClipNode {
            clip,
            time: 0.0,
            wrap,
            playing: true,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Destroy a node, disconnecting it from the mixer. Returns false for stale handles.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        if self.mixer.input == Some(id) {
            self.mixer.input = None;
        }
        true
    }

    /// Feed `id` into the mixer's only input. Returns false for stale handles.
    /// Whatever was connected before stays alive; the caller owns its lifetime.
    pub fn connect(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        self.mixer.input = Some(id);
        self.mixer.weight = 1.0;
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&ClipNode> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ClipNode> {
        self.slot_mut(id).and_then(|s| s.node.as_mut())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation && s.node.is_some())
    }

    /// Number of nodes currently alive in the graph.
    pub fn live_nodes(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Advance every playing node by `dt` seconds. Non-finite steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        if !dt.is_finite() {
            warn!("graph '{}' ignoring non-finite time step {dt}", self.name);
            return;
        }
        for node in self.slots.iter_mut().filter_map(|s| s.node.as_mut()) {
            if node.playing {
                node.time += dt;
            }
        }
        trace!("graph '{}' advanced by {dt}", self.name);
    }

    /// Sample the mixer's input into `out`, scaled by the mixer weight.
    pub fn evaluate(&self, clips: &ClipLibrary, out: &mut Vec<Change>) {
        let Some(node) = self.mixer.input.and_then(|id| self.node(id)) else {
            return;
        };
        let Some(clip) = node.clip.and_then(|c| clips.get(c)) else {
            return;
        };
        let length = clip.length();
        let u = if length > 0.0 {
            node.local_time(length) / length
        } else {
            0.0
        };
        for track in &clip.tracks {
            if let Some(value) = sample_track(track, u) {
                out.push(Change {
                    key: track.animatable_id.clone(),
                    value: value * self.mixer.weight,
                });
            }
        }
    }
}
