//! UI Playable Core (engine-agnostic)
//!
//! A designer authors a set of named states, each with an optional enter clip and an
//! optional loop clip. [`StatePlayer`] plays transitions between them through a
//! [`PlayableGraph`] whose single-input mixer is rewired on every state switch, and
//! reports enter completion through per-state callbacks, one-shot continuations and
//! [`PlayerEvent`]s.
//!
//! Hosts drive the player explicitly: `activate()` once, `tick(dt)` every frame,
//! `deactivate()` on teardown. Pose changes produced by a tick are returned in
//! [`Outputs`] and can be pushed into any [`PoseSink`].

pub mod clip;
pub mod config;
pub mod error;
pub mod graph;
pub mod ids;
pub mod library;
pub mod outputs;
pub mod player;
pub mod playing;
pub mod sampling;
pub mod state;
pub mod state_set;

// Re-exports for consumers (adapters)
pub use clip::{ClipData, Keypoint, Track};
pub use config::Config;
pub use error::{PlayableError, Result};
pub use graph::{ClipNode, Mixer, PlayableGraph};
pub use ids::{ClipId, NodeId, StateId};
pub use library::ClipLibrary;
pub use outputs::{Change, Outputs, PlayerEvent, PoseSink};
pub use player::{DefaultMode, DefaultSelection, PlaybackPhase, StatePlayer};
pub use playing::PlayingState;
pub use sampling::sample_track;
pub use state::{Completion, CompletionCallback, OnceCallback, State, StateRegistry};
pub use state_set::{parse_state_set_json, StateDef, StateSetDef};
