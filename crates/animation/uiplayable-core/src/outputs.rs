//! Output contracts from the player.
//!
//! Outputs carry the sampled pose for this tick, keyed by channel name, and a
//! separate list of semantic events. Adapters apply the changes to the host and
//! react to the events.

use serde::{Deserialize, Serialize};

use crate::ids::StateId;

/// One sampled channel value for this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub key: String,
    pub value: f32,
}

/// Discrete signals emitted by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerEvent {
    Activated,
    Deactivated,
    /// A state started its enter clip.
    StateEntered { state: StateId, name: String },
    /// The enter clip finished (or was absent) and the state switched to loop policy.
    EnterCompleted { state: StateId, name: String },
    /// A state was replaced before its enter clip finished. Its one-shot
    /// continuation was dropped without running.
    Interrupted { state: StateId, name: String },
}

/// Outputs returned by `StatePlayer::tick()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<PlayerEvent>,
}

impl Outputs {
    pub fn with_capacity(changes: usize) -> Self {
        Self {
            changes: Vec::with_capacity(changes),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Hand every change to `sink`, in sampling order.
    pub fn apply(&self, sink: &mut dyn PoseSink) {
        for change in &self.changes {
            sink.write(&change.key, change.value);
        }
    }
}

/// Host-side target that receives the blended pose once per tick.
pub trait PoseSink {
    fn write(&mut self, key: &str, value: f32);
}

impl PoseSink for std::collections::HashMap<String, f32> {
    fn write(&mut self, key: &str, value: f32) {
        self.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn apply_writes_every_change() {
        let outputs = Outputs {
            changes: vec![
                Change {
                    key: "alpha".into(),
                    value: 0.5,
                },
                Change {
                    key: "scale.x".into(),
                    value: 2.0,
                },
            ],
            events: vec![],
        };
        let mut sink: HashMap<String, f32> = HashMap::new();
        outputs.apply(&mut sink);
        assert_eq!(sink.get("alpha"), Some(&0.5));
        assert_eq!(sink.get("scale.x"), Some(&2.0));
    }

    #[test]
    fn events_serialize_with_variant_tags() {
        let ev = PlayerEvent::EnterCompleted {
            state: StateId(1),
            name: "Jump".into(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["EnterCompleted"]["name"], "Jump");
    }
}
