//! Named states and the ordered registry that owns them.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{PlayableError, Result};
use crate::ids::{ClipId, StateId};

/// Passed to completion callbacks when a state's enter clip finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub state: StateId,
    pub name: String,
}

/// Persistent listener, invoked on every enter completion of its state.
pub type CompletionCallback = Box<dyn FnMut(&Completion) + Send + Sync>;

/// One-shot continuation attached to a single `play` call.
pub type OnceCallback = Box<dyn FnOnce(&Completion) + Send + Sync>;

/// A named configuration of enter/loop clips and completion listeners.
pub struct State {
    pub name: String,
    pub enter: Option<ClipId>,
    pub loop_clip: Option<ClipId>,
    is_default: bool,
    on_enter_complete: Vec<CompletionCallback>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enter: None,
            loop_clip: None,
            is_default: false,
            on_enter_complete: Vec::new(),
        }
    }

    pub fn with_enter(mut self, clip: ClipId) -> Self {
        self.enter = Some(clip);
        self
    }

    pub fn with_loop(mut self, clip: ClipId) -> Self {
        self.loop_clip = Some(clip);
        self
    }

    /// Only `StateRegistry::set_default` changes this flag.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Register a listener that runs every time this state's enter clip completes.
    pub fn on_enter_complete(&mut self, callback: impl FnMut(&Completion) + Send + Sync + 'static) {
        self.on_enter_complete.push(Box::new(callback));
    }

    pub fn listener_count(&self) -> usize {
        self.on_enter_complete.len()
    }

    pub fn clear_listeners(&mut self) {
        self.on_enter_complete.clear();
    }

    pub(crate) fn notify_enter_complete(&mut self, completion: &Completion) {
        for callback in self.on_enter_complete.iter_mut() {
            callback(completion);
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("enter", &self.enter)
            .field("loop_clip", &self.loop_clip)
            .field("is_default", &self.is_default)
            .field("listeners", &self.on_enter_complete.len())
            .finish()
    }
}

/// Ordered collection of states with a name index. Names are unique; states are
/// never removed, so a `StateId` stays valid for the registry's lifetime.
#[derive(Debug, Default)]
pub struct StateRegistry {
    states: IndexMap<String, State>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a state. Fails if the name is already taken.
    pub fn add(&mut self, state: State) -> Result<StateId> {
        if self.states.contains_key(&state.name) {
            return Err(PlayableError::DuplicateState { name: state.name });
        }
        let id = StateId(self.states.len() as u32);
        self.states.insert(state.name.clone(), state);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<StateId> {
        self.states.get_index_of(name).map(|i| StateId(i as u32))
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get_index(id.index()).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.get_index_mut(id.index()).map(|(_, s)| s)
    }

    pub fn by_name(&self, name: &str) -> Result<&State> {
        self.states
            .get(name)
            .ok_or_else(|| PlayableError::StateNotFound {
                name: name.to_string(),
            })
    }

    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut State> {
        self.states
            .get_mut(name)
            .ok_or_else(|| PlayableError::StateNotFound {
                name: name.to_string(),
            })
    }

    /// Mark `id` as the only default state, or clear the default with `None`.
    pub fn set_default(&mut self, id: Option<StateId>) -> Result<()> {
        if let Some(id) = id {
            if self.get(id).is_none() {
                return Err(PlayableError::UnknownState { id });
            }
        }
        for (i, state) in self.states.values_mut().enumerate() {
            state.is_default = id.map(StateId::index) == Some(i);
        }
        Ok(())
    }

    pub fn default_state(&self) -> Option<StateId> {
        self.states
            .values()
            .position(|s| s.is_default)
            .map(|i| StateId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .values()
            .enumerate()
            .map(|(i, s)| (StateId(i as u32), s))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
