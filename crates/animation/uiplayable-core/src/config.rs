//! Core configuration for uiplayable-core.

use serde::{Deserialize, Serialize};

/// Player sizing and event limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum events retained per tick; extra events are dropped with a warning.
    pub max_events_per_tick: usize,
    /// Initial capacity hint for the per-tick pose change buffer.
    pub pose_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_events_per_tick: 64,
            pose_capacity: 32,
        }
    }
}
