//! Error types for panel interactions.

use resumekit_settings::SettingsError;
use thiserror::Error;

/// Errors raised while turning gestures into store commands.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The store rejected the command.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The gesture carried a value the control cannot produce.
    #[error("invalid {control} input '{value}': {reason}")]
    InvalidGesture {
        /// Control that emitted the gesture.
        control: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl PanelError {
    /// Whether the error stems from rejected input rather than a failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::Settings(err) => err.is_validation(),
            Self::InvalidGesture { .. } => true,
        }
    }
}

/// Convenience alias for panel results.
pub type PanelResult<T> = Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_gesture_message_names_control() {
        let err = PanelError::InvalidGesture {
            control: "base_font_size",
            value: "huge".into(),
            reason: "expected an integer",
        };
        assert_eq!(
            err.to_string(),
            "invalid base_font_size input 'huge': expected an integer"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn settings_errors_pass_through() {
        let err = PanelError::from(SettingsError::UnknownSection { id: "x".into() });
        assert_eq!(
            err.to_string(),
            SettingsError::UnknownSection { id: "x".into() }.to_string()
        );
        assert!(err.is_validation());
    }
}
