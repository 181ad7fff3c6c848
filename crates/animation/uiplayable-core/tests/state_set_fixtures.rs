use uiplayable_core::{
    parse_state_set_json, Config, DefaultMode, PlaybackPhase, PlayerEvent, StatePlayer,
    StateSetDef,
};
use uiplayable_test_fixtures::state_sets;

fn load(name: &str) -> StatePlayer {
    let json = state_sets::json(name).expect("fixture should exist");
    let def = parse_state_set_json(&json).expect("fixture should parse");
    StatePlayer::from_state_set(def, Config::default()).expect("fixture should build")
}

#[test]
fn every_fixture_builds_a_player() {
    for key in state_sets::keys() {
        let mut player = load(&key);
        player.activate();
        player.tick(1.0 / 60.0);
        assert!(player.graph().unwrap().live_nodes() <= 1, "{key}");
    }
}

/// Idle/Jump: play("Jump"), tick 0.6s ⇒ looping, frozen at 0.5s, completion fired once.
#[test]
fn jump_example_from_fixture() {
    let mut player = load("idle-jump");
    player.activate();
    assert_eq!(player.current_state_name(), Some("Idle"));

    player.play_by_name("Jump").unwrap();
    let out = player.tick(0.6).clone();
    assert!(player.is_looping());
    assert_eq!(player.active_node().unwrap().time, 0.5);

    let jump_completions = out
        .events
        .iter()
        .filter(|e| matches!(e, PlayerEvent::EnterCompleted { name, .. } if name == "Jump"))
        .count();
    assert_eq!(jump_completions, 1);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, PlayerEvent::Interrupted { name, .. } if name == "Idle")));
}

#[test]
fn menu_panel_starts_in_loop_mode() {
    let mut player = load("menu-panel");
    assert_eq!(player.default_mode(), DefaultMode::Loop);
    player.activate();
    assert_eq!(player.phase(), PlaybackPhase::Looping);

    let out = player.tick(0.5);
    assert_eq!(out.changes.len(), 1);
    assert_eq!(out.changes[0].key, "scale.x");
    assert!((out.changes[0].value - 1.1).abs() < 1e-5);
}

#[test]
fn state_without_clips_loops_with_an_empty_node() {
    let mut player = load("menu-panel");
    player.activate();
    player.play_by_name("Disabled").unwrap();
    assert!(player.is_looping());
    assert!(player.tick(0.1).changes.is_empty());
}

#[test]
fn typed_fixture_load_matches_parsed_json() {
    let def: StateSetDef = state_sets::load("idle-jump").expect("fixture should deserialize");
    assert_eq!(def.states.len(), 2);
    assert!(def.states.iter().any(|s| s.name == "Jump" && s.loop_clip.is_none()));

    let mut player = StatePlayer::from_state_set(def, Config::default()).unwrap();
    player.activate();
    assert_eq!(player.current_state_name(), Some("Idle"));
}
