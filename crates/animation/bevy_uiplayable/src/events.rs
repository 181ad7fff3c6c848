use bevy::prelude::*;
use uiplayable_core::PlayerEvent;

/// A core player event, tagged with the entity that owns the player.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayableStateEvent {
    pub entity: Entity,
    pub event: PlayerEvent,
}

/// Ask the player on `entity` to switch to the state called `state`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlayStateRequest {
    pub entity: Entity,
    pub state: String,
}
