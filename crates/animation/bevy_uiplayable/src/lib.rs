//! Bevy adapter for `uiplayable-core`.
//!
//! Each entity carrying a [`UiPlayable`] owns one state player. The plugin maps the
//! host lifecycle onto the core's explicit interface:
//! - enable (component present, no [`PlayableDisabled`]) → `activate()`
//! - disable (marker inserted) → `deactivate()`
//! - every `Update` → `tick(delta)`, pose applied to the entity's `Transform`
//!
//! Completion and transition events are forwarded as [`PlayableStateEvent`]s.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

pub use components::{PlayableDisabled, UiPlayable};
pub use events::{PlayStateRequest, PlayableStateEvent};
pub use systems::TransformSink;

/// Systems run in this order inside `Update`: activation sync, play requests, tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UiPlayableSet;

pub struct UiPlayablePlugin;

impl Plugin for UiPlayablePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayableStateEvent>()
            .add_event::<PlayStateRequest>()
            .add_systems(
                Update,
                (
                    systems::sync_activation_system,
                    systems::apply_play_requests_system,
                    systems::tick_players_system,
                )
                    .chain()
                    .in_set(UiPlayableSet),
            );
    }
}
