use bevy::prelude::*;
use uiplayable_core::StatePlayer;

/// A state player attached to an entity. Dereferences to the core player, so states
/// can be played directly from systems: `playable.play_by_name("Show")`.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct UiPlayable(pub StatePlayer);

/// Marker that keeps the entity's player deactivated while present.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayableDisabled;
