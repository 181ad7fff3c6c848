//! Clip data model: named clips with scalar tracks over normalized time.

use serde::{Deserialize, Serialize};

use crate::error::{PlayableError, Result};
use crate::ids::ClipId;

/// A single keypoint in normalized time [0..1].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keypoint {
    /// Normalized time in [0,1] within the clip duration.
    pub stamp: f32,
    pub value: f32,
}

/// A track targeting one output channel (e.g. "scale.x") with a series of keypoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    #[serde(rename = "animatableId")]
    pub animatable_id: String,
    pub points: Vec<Keypoint>,
}

/// An animation clip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipData {
    /// Assigned when the clip is loaded into a library.
    #[serde(skip)]
    pub id: Option<ClipId>,
    pub name: String,
    /// Duration in milliseconds (authoritative for mapping normalized stamps to seconds).
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl ClipData {
    /// A clip with no tracks, useful for timing-only states.
    pub fn new(name: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            duration_ms,
            tracks: Vec::new(),
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Clip length in seconds.
    #[inline]
    pub fn length(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }

    /// Validate basic invariants (non-zero duration, monotonic stamps in [0,1]).
    pub fn validate_basic(&self) -> Result<()> {
        let invalid = |reason: String| PlayableError::InvalidClip {
            clip: self.name.clone(),
            reason,
        };
        if self.duration_ms == 0 {
            return Err(invalid("duration must be > 0 ms".into()));
        }
        for track in &self.tracks {
            let mut last = -f32::INFINITY;
            for p in &track.points {
                if !p.stamp.is_finite() || !(0.0..=1.0).contains(&p.stamp) {
                    return Err(invalid(format!(
                        "keypoint stamp must be in [0,1] and finite for '{}'",
                        track.animatable_id
                    )));
                }
                if p.stamp < last {
                    return Err(invalid(format!(
                        "keypoint stamps must be non-decreasing for '{}'",
                        track.animatable_id
                    )));
                }
                last = p.stamp;
            }
        }
        Ok(())
    }
}

impl Track {
    pub fn new(animatable_id: impl Into<String>, points: &[(f32, f32)]) -> Self {
        Self {
            animatable_id: animatable_id.into(),
            points: points
                .iter()
                .map(|&(stamp, value)| Keypoint { stamp, value })
                .collect(),
        }
    }
}
