//! Clip storage owned by a player.

use crate::clip::ClipData;
use crate::error::Result;
use crate::ids::ClipId;

/// Minimal clip library: dense ids, lookup by id or by name.
#[derive(Default, Debug)]
pub struct ClipLibrary {
    items: Vec<ClipData>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a clip, returning its id.
    pub fn insert(&mut self, mut data: ClipData) -> Result<ClipId> {
        data.validate_basic()?;
        let id = ClipId(self.items.len() as u32);
        data.id = Some(id);
        self.items.push(data);
        Ok(id)
    }

    pub fn get(&self, id: ClipId) -> Option<&ClipData> {
        self.items.get(id.0 as usize)
    }

    /// First clip with the given name.
    pub fn find(&self, name: &str) -> Option<ClipId> {
        self.items.iter().find(|c| c.name == name).and_then(|c| c.id)
    }

    /// Length in seconds, if the clip exists.
    pub fn length(&self, id: ClipId) -> Option<f32> {
        self.get(id).map(ClipData::length)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipData> {
        self.items.iter()
    }
}
