use bevy::log::{debug, error};
use bevy::prelude::*;
use uiplayable_core::PoseSink;

use crate::components::{PlayableDisabled, UiPlayable};
use crate::events::{PlayStateRequest, PlayableStateEvent};

/// Writes pose channels into a `Transform`.
///
/// Recognized keys: `translation.{x,y,z}`, `scale.{x,y,z}` and `rotation.z`
/// (radians around the view axis, the only rotation a flat UI element needs).
pub struct TransformSink<'a>(pub &'a mut Transform);

impl PoseSink for TransformSink<'_> {
    fn write(&mut self, key: &str, value: f32) {
        let tf = &mut *self.0;
        match key {
            "translation.x" => tf.translation.x = value,
            "translation.y" => tf.translation.y = value,
            "translation.z" => tf.translation.z = value,
            "scale.x" => tf.scale.x = value,
            "scale.y" => tf.scale.y = value,
            "scale.z" => tf.scale.z = value,
            "rotation.z" => tf.rotation = Quat::from_rotation_z(value),
            _ => debug!("no Transform channel for pose key '{key}'"),
        }
    }
}

/// Activate enabled players and deactivate the ones marked `PlayableDisabled`.
pub fn sync_activation_system(
    mut players: Query<(Entity, &mut UiPlayable, Has<PlayableDisabled>)>,
) {
    for (entity, mut playable, disabled) in &mut players {
        match (disabled, playable.is_active()) {
            (false, false) => {
                debug!("activating ui playable on {entity:?}");
                playable.activate();
            }
            (true, true) => {
                debug!("deactivating ui playable on {entity:?}");
                playable.deactivate();
            }
            _ => {}
        }
    }
}

pub fn apply_play_requests_system(
    mut requests: EventReader<PlayStateRequest>,
    mut players: Query<&mut UiPlayable>,
) {
    for request in requests.read() {
        let Ok(mut playable) = players.get_mut(request.entity) else {
            error!("play request for {:?}, which has no UiPlayable", request.entity);
            continue;
        };
        if let Err(err) = playable.play_by_name(&request.state) {
            error!("play request for {:?} failed: {err}", request.entity);
        }
    }
}

/// Tick every player with the frame delta, apply its pose and forward its events.
pub fn tick_players_system(
    time: Res<Time>,
    mut players: Query<(Entity, &mut UiPlayable, Option<&mut Transform>)>,
    mut writer: EventWriter<PlayableStateEvent>,
) {
    let dt = time.delta_seconds();
    for (entity, mut playable, transform) in &mut players {
        let outputs = playable.tick(dt);
        if let Some(mut tf) = transform {
            outputs.apply(&mut TransformSink(&mut *tf));
        }
        for event in outputs.events.iter().cloned() {
            writer.send(PlayableStateEvent { entity, event });
        }
    }
}
