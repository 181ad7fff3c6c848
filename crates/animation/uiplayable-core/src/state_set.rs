//! JSON authoring format for a whole state set, and building a player from it.

use serde::{Deserialize, Serialize};

use crate::clip::ClipData;
use crate::config::Config;
use crate::error::{PlayableError, Result};
use crate::player::{DefaultMode, StatePlayer};
use crate::state::State;

/// One authored state. Clips are referenced by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDef {
    pub name: String,
    #[serde(default)]
    pub enter: Option<String>,
    #[serde(default, rename = "loop")]
    pub loop_clip: Option<String>,
    #[serde(default)]
    pub default: bool,
}

/// Authoring document: the clips a player needs and the states built from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSetDef {
    pub name: String,
    #[serde(default)]
    pub default_mode: DefaultMode,
    #[serde(default)]
    pub clips: Vec<ClipData>,
    pub states: Vec<StateDef>,
}

/// Public API: parse a state set JSON document and validate its clips.
pub fn parse_state_set_json(s: &str) -> Result<StateSetDef> {
    let def: StateSetDef = serde_json::from_str(s)?;
    for clip in &def.clips {
        clip.validate_basic()?;
    }
    Ok(def)
}

impl StatePlayer {
    /// Build an inactive player from an authoring document.
    /// When several states are flagged default, the last one wins.
    pub fn from_state_set(def: StateSetDef, cfg: Config) -> Result<Self> {
        let mut player = StatePlayer::new(def.name, cfg);
        for clip in def.clips {
            player.load_clip(clip)?;
        }
        for sd in def.states {
            let lookup = |name: Option<String>| -> Result<_> {
                match name {
                    None => Ok(None),
                    Some(name) => player
                        .clips()
                        .find(&name)
                        .map(Some)
                        .ok_or(PlayableError::UnknownClip { name }),
                }
            };
            let mut state = State::new(sd.name);
            state.enter = lookup(sd.enter)?;
            state.loop_clip = lookup(sd.loop_clip)?;
            let id = player.add_state(state)?;
            if sd.default {
                player.set_default_state(Some(id))?;
            }
        }
        player.set_default_mode(def.default_mode);
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::StateId;

    const DOC: &str = r#"{
        "name": "panel",
        "defaultMode": "loop",
        "clips": [
            { "name": "idle_in", "duration": 2000 },
            { "name": "idle_loop", "duration": 1000,
              "tracks": [ { "animatableId": "alpha",
                            "points": [ { "stamp": 0.0, "value": 1.0 } ] } ] }
        ],
        "states": [
            { "name": "Idle", "enter": "idle_in", "loop": "idle_loop", "default": true },
            { "name": "Hidden" }
        ]
    }"#;

    #[test]
    fn parses_and_builds_a_player() {
        let def = parse_state_set_json(DOC).unwrap();
        assert_eq!(def.default_mode, DefaultMode::Loop);
        assert_eq!(def.states[0].loop_clip.as_deref(), Some("idle_loop"));

        let player = StatePlayer::from_state_set(def, Config::default()).unwrap();
        assert_eq!(player.name(), "panel");
        assert_eq!(player.states().default_state(), Some(StateId(0)));
        let idle = player.states().by_name("Idle").unwrap();
        assert_eq!(idle.enter, player.clips().find("idle_in"));
        assert_eq!(idle.loop_clip, player.clips().find("idle_loop"));
        let hidden = player.states().by_name("Hidden").unwrap();
        assert_eq!(hidden.enter, None);
        assert!(!player.is_active());
    }

    #[test]
    fn unknown_clip_references_fail() {
        let def = StateSetDef {
            name: "p".into(),
            default_mode: DefaultMode::Enter,
            clips: vec![],
            states: vec![StateDef {
                name: "Jump".into(),
                enter: Some("jump_in".into()),
                loop_clip: None,
                default: false,
            }],
        };
        assert_eq!(
            StatePlayer::from_state_set(def, Config::default()).unwrap_err(),
            PlayableError::UnknownClip {
                name: "jump_in".into()
            }
        );
    }

    #[test]
    fn invalid_clips_fail_to_parse() {
        let doc = r#"{ "name": "p", "clips": [ { "name": "z", "duration": 0 } ], "states": [] }"#;
        assert!(matches!(
            parse_state_set_json(doc),
            Err(PlayableError::InvalidClip { .. })
        ));
        assert!(matches!(
            parse_state_set_json("{"),
            Err(PlayableError::Parse { .. })
        ));
    }
}
