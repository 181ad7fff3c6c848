//! StatePlayer: owns states, clips and the playback graph, and switches between states.
//!
//! Lifecycle:
//! - `activate()` builds the graph and plays the default state (if any)
//! - `play*()` replaces the node feeding the mixer and runs one completion check
//! - `tick(dt)` advances the graph, completes enter clips, samples the pose
//! - `deactivate()` drops the current playback and tears the graph down
//!
//! Phases per player: Idle → Entering → Looping. Any `play` returns to Entering for
//! the new state; Entering → Looping happens only inside the completion check.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::clip::ClipData;
use crate::config::Config;
use crate::error::{PlayableError, Result};
use crate::graph::{ClipNode, PlayableGraph};
use crate::ids::{ClipId, StateId};
use crate::library::ClipLibrary;
use crate::outputs::{Outputs, PlayerEvent};
use crate::playing::PlayingState;
use crate::state::{Completion, OnceCallback, State, StateRegistry};

/// How the default state starts on activation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultMode {
    /// Play the enter clip, then loop.
    #[default]
    Enter,
    /// Skip straight to loop policy. Completion listeners do not run.
    Loop,
}

/// Default state together with its mode, as picked from a single list of choices:
/// "None", then "<state>" and "<state> (End)" for every state in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefaultSelection {
    None,
    Enter(StateId),
    Loop(StateId),
}

impl DefaultSelection {
    /// Decode a choice index (0 = None, 2i+1 = enter state i, 2i+2 = loop state i).
    pub fn from_index(index: usize, state_count: usize) -> Option<Self> {
        if index == 0 {
            return Some(Self::None);
        }
        let slot = (index - 1) / 2;
        if slot >= state_count {
            return None;
        }
        let id = StateId(slot as u32);
        Some(if index % 2 == 1 {
            Self::Enter(id)
        } else {
            Self::Loop(id)
        })
    }

    pub fn to_index(self) -> usize {
        match self {
            Self::None => 0,
            Self::Enter(id) => id.index() * 2 + 1,
            Self::Loop(id) => id.index() * 2 + 2,
        }
    }

    pub fn state(self) -> Option<StateId> {
        match self {
            Self::None => None,
            Self::Enter(id) | Self::Loop(id) => Some(id),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    Idle,
    Entering,
    Looping,
}

#[derive(Debug)]
pub struct StatePlayer {
    name: String,
    cfg: Config,
    clips: ClipLibrary,
    states: StateRegistry,
    default_mode: DefaultMode,
    graph: Option<PlayableGraph>,
    playing: Option<PlayingState>,
    // Events raised since the last tick; moved into `outputs` by `tick`.
    pending: Vec<PlayerEvent>,
    outputs: Outputs,
}

fn push_event(pending: &mut Vec<PlayerEvent>, cfg: &Config, event: PlayerEvent) {
    if pending.len() >= cfg.max_events_per_tick {
        warn!(
            "dropping {event:?}: more than {} events this tick",
            cfg.max_events_per_tick
        );
        return;
    }
    pending.push(event);
}

impl StatePlayer {
    pub fn new(name: impl Into<String>, cfg: Config) -> Self {
        Self {
            name: name.into(),
            outputs: Outputs::with_capacity(cfg.pose_capacity),
            cfg,
            clips: ClipLibrary::new(),
            states: StateRegistry::new(),
            default_mode: DefaultMode::Enter,
            graph: None,
            playing: None,
            pending: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Validate and load a clip, returning its id.
    pub fn load_clip(&mut self, data: ClipData) -> Result<ClipId> {
        self.clips.insert(data)
    }

    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    pub fn add_state(&mut self, state: State) -> Result<StateId> {
        self.states.add(state)
    }

    pub fn states(&self) -> &StateRegistry {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut StateRegistry {
        &mut self.states
    }

    pub fn set_default_state(&mut self, id: Option<StateId>) -> Result<()> {
        self.states.set_default(id)
    }

    pub fn default_mode(&self) -> DefaultMode {
        self.default_mode
    }

    pub fn set_default_mode(&mut self, mode: DefaultMode) {
        self.default_mode = mode;
    }

    /// Set default state and mode together. `None` also resets the mode to `Enter`.
    pub fn set_default_selection(&mut self, selection: DefaultSelection) -> Result<()> {
        self.states.set_default(selection.state())?;
        self.default_mode = match selection {
            DefaultSelection::Loop(_) => DefaultMode::Loop,
            DefaultSelection::None | DefaultSelection::Enter(_) => DefaultMode::Enter,
        };
        Ok(())
    }

    pub fn default_selection(&self) -> DefaultSelection {
        match (self.states.default_state(), self.default_mode) {
            (None, _) => DefaultSelection::None,
            (Some(id), DefaultMode::Enter) => DefaultSelection::Enter(id),
            (Some(id), DefaultMode::Loop) => DefaultSelection::Loop(id),
        }
    }

    /// Build the graph and start the default state. Calling it while active does nothing.
    pub fn activate(&mut self) {
        if self.graph.is_some() {
            return;
        }
        let mut graph = PlayableGraph::new(self.name.clone());
        graph.play();
        self.graph = Some(graph);
        debug!("player '{}' activated", self.name);
        push_event(&mut self.pending, &self.cfg, PlayerEvent::Activated);

        if let Some(id) = self.states.default_state() {
            self.start(id, None);
            if self.default_mode == DefaultMode::Loop {
                self.force_loop();
            }
        }
    }

    /// Drop the current playback and tear the graph down.
    pub fn deactivate(&mut self) {
        let Some(mut graph) = self.graph.take() else {
            return;
        };
        if let Some(playing) = self.playing.take() {
            playing.destroy(&mut graph);
        }
        debug!("player '{}' deactivated", self.name);
        push_event(&mut self.pending, &self.cfg, PlayerEvent::Deactivated);
    }

    pub fn is_active(&self) -> bool {
        self.graph.is_some()
    }

    /// Switch to `id`. Ignored (Ok) while inactive.
    pub fn play(&mut self, id: StateId) -> Result<()> {
        self.play_inner(id, None)
    }

    /// Switch to `id` and run `on_complete` once when its enter clip finishes.
    /// The continuation is dropped unrun if another `play` interrupts this one.
    pub fn play_then(
        &mut self,
        id: StateId,
        on_complete: impl FnOnce(&Completion) + Send + Sync + 'static,
    ) -> Result<()> {
        self.play_inner(id, Some(Box::new(on_complete)))
    }

    /// Switch to the state called `name`; `StateNotFound` if there is none.
    pub fn play_by_name(&mut self, name: &str) -> Result<()> {
        let id = self.resolve(name)?;
        self.play_inner(id, None)
    }

    pub fn play_by_name_then(
        &mut self,
        name: &str,
        on_complete: impl FnOnce(&Completion) + Send + Sync + 'static,
    ) -> Result<()> {
        let id = self.resolve(name)?;
        self.play_inner(id, Some(Box::new(on_complete)))
    }

    fn resolve(&self, name: &str) -> Result<StateId> {
        self.states
            .find(name)
            .ok_or_else(|| PlayableError::StateNotFound {
                name: name.to_string(),
            })
    }

    fn play_inner(&mut self, id: StateId, on_complete: Option<OnceCallback>) -> Result<()> {
        if self.states.get(id).is_none() {
            return Err(PlayableError::UnknownState { id });
        }
        if self.graph.is_none() {
            debug!("player '{}' is inactive; ignoring play({id:?})", self.name);
            return Ok(());
        }
        self.start(id, on_complete);
        Ok(())
    }

    fn start(&mut self, id: StateId, on_complete: Option<OnceCallback>) {
        let (Some(graph), Some(state)) = (self.graph.as_mut(), self.states.get(id)) else {
            return;
        };
        if let Some(previous) = self.playing.take() {
            if !previous.is_looping() {
                if let Some(prev_state) = self.states.get(previous.state()) {
                    debug!(
                        "player '{}': '{}' interrupted before its enter clip finished",
                        self.name, prev_state.name
                    );
                    push_event(
                        &mut self.pending,
                        &self.cfg,
                        PlayerEvent::Interrupted {
                            state: previous.state(),
                            name: prev_state.name.clone(),
                        },
                    );
                }
            }
            previous.destroy(graph);
        }

        debug!("player '{}' entering '{}'", self.name, state.name);
        self.playing = Some(PlayingState::start(graph, id, state, on_complete));
        push_event(
            &mut self.pending,
            &self.cfg,
            PlayerEvent::StateEntered {
                state: id,
                name: state.name.clone(),
            },
        );
        self.check_enter_complete();
    }

    /// Jump the current playback to loop policy without completion notifications.
    fn force_loop(&mut self) {
        let (Some(graph), Some(playing)) = (self.graph.as_mut(), self.playing.as_mut()) else {
            return;
        };
        if playing.is_looping() {
            return;
        }
        if let Some(state) = self.states.get(playing.state()) {
            debug!("player '{}' looping '{}' directly", self.name, state.name);
            playing.enter_loop(graph, state, &self.clips);
        }
    }

    fn check_enter_complete(&mut self) {
        let (Some(graph), Some(playing)) = (self.graph.as_mut(), self.playing.as_mut()) else {
            return;
        };
        if playing.is_looping() {
            return;
        }
        let id = playing.state();
        let Some(state) = self.states.get(id) else {
            return;
        };
        if !playing.enter_finished(graph, state, &self.clips) {
            return;
        }

        playing.enter_loop(graph, state, &self.clips);
        let continuation = playing.take_continuation();
        let completion = Completion {
            state: id,
            name: state.name.clone(),
        };
        debug!("player '{}': '{}' enter complete", self.name, completion.name);

        if let Some(state) = self.states.get_mut(id) {
            state.notify_enter_complete(&completion);
        }
        if let Some(continuation) = continuation {
            continuation(&completion);
        }
        push_event(
            &mut self.pending,
            &self.cfg,
            PlayerEvent::EnterCompleted {
                state: completion.state,
                name: completion.name,
            },
        );
    }

    /// Advance by `dt` seconds: move node time, complete enter clips, sample the pose.
    /// Events raised since the previous tick are returned alongside this tick's pose.
    pub fn tick(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        if let Some(graph) = self.graph.as_mut() {
            graph.advance(dt);
        }
        self.check_enter_complete();
        if let Some(graph) = self.graph.as_ref() {
            graph.evaluate(&self.clips, &mut self.outputs.changes);
        }
        self.outputs.events.append(&mut self.pending);
        &self.outputs
    }

    /// Outputs of the most recent tick.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn phase(&self) -> PlaybackPhase {
        match &self.playing {
            None => PlaybackPhase::Idle,
            Some(p) if p.is_looping() => PlaybackPhase::Looping,
            Some(_) => PlaybackPhase::Entering,
        }
    }

    pub fn current_state(&self) -> Option<StateId> {
        self.playing.as_ref().map(PlayingState::state)
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.current_state()
            .and_then(|id| self.states.get(id))
            .map(|s| s.name.as_str())
    }

    pub fn is_looping(&self) -> bool {
        self.playing.as_ref().is_some_and(PlayingState::is_looping)
    }

    pub fn playing(&self) -> Option<&PlayingState> {
        self.playing.as_ref()
    }

    /// The node currently feeding the mixer.
    pub fn active_node(&self) -> Option<&ClipNode> {
        let graph = self.graph.as_ref()?;
        graph.node(self.playing.as_ref()?.node())
    }

    pub fn graph(&self) -> Option<&PlayableGraph> {
        self.graph.as_ref()
    }
}
