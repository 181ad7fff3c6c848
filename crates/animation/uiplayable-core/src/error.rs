//! Error types for the state player

use crate::ids::StateId;

/// Errors raised while authoring states or driving playback.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PlayableError {
    /// No state carries the requested name
    #[error("State not found: {name}")]
    StateNotFound { name: String },

    /// A state id that does not belong to this registry
    #[error("Unknown state id: {id:?}")]
    UnknownState { id: StateId },

    /// A state with the same name is already registered
    #[error("Duplicate state name: {name}")]
    DuplicateState { name: String },

    /// A state set references a clip that was never declared
    #[error("Clip not found: {name}")]
    UnknownClip { name: String },

    /// Clip data failed validation
    #[error("Invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: String },

    /// Authoring document could not be parsed
    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

impl PlayableError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::StateNotFound { .. } | Self::UnknownState { .. } => "lookup",
            Self::DuplicateState { .. } => "registry",
            Self::UnknownClip { .. } | Self::InvalidClip { .. } => "clip",
            Self::Parse { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for PlayableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlayableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let lookup = PlayableError::StateNotFound {
            name: "Jump".to_string(),
        };
        assert_eq!(lookup.category(), "lookup");
        assert_eq!(lookup.to_string(), "State not found: Jump");

        let clip = PlayableError::InvalidClip {
            clip: "fade".into(),
            reason: "duration must be > 0 ms".into(),
        };
        assert_eq!(clip.category(), "clip");
    }

    #[test]
    fn json_errors_convert_to_parse() {
        let err: PlayableError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PlayableError::Parse { .. }));
    }
}
