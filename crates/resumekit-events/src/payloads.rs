//! Event payload types emitted by the settings store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to each event published on the bus.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 256;

/// Typed change events surfaced to store subscribers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingsEvent {
    /// A settings document replaced the whole store state.
    DocumentLoaded {
        /// Number of sections in the loaded document.
        section_count: usize,
    },
    /// Sections were reordered.
    SectionsReordered {
        /// Section identifiers in their new order.
        order: Vec<String>,
    },
    /// A section was shown or hidden.
    SectionVisibilityChanged {
        /// Identifier of the toggled section.
        section_id: String,
        /// Visibility after the toggle.
        enabled: bool,
    },
    /// The section focused for editing changed.
    ActiveSectionChanged {
        /// Identifier of the newly focused section.
        section_id: String,
    },
    /// One or more global typography/spacing fields changed.
    GlobalSettingsUpdated {
        /// Names of the fields whose value changed.
        fields: Vec<String>,
    },
    /// The accent color changed.
    ColorThemeChanged {
        /// Normalised color value now in effect.
        color: String,
        /// Whether the color belongs to the preset palette.
        preset: bool,
    },
}

impl SettingsEvent {
    /// Machine-friendly discriminator used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DocumentLoaded { .. } => "document_loaded",
            Self::SectionsReordered { .. } => "sections_reordered",
            Self::SectionVisibilityChanged { .. } => "section_visibility_changed",
            Self::ActiveSectionChanged { .. } => "active_section_changed",
            Self::GlobalSettingsUpdated { .. } => "global_settings_updated",
            Self::ColorThemeChanged { .. } => "color_theme_changed",
        }
    }
}

/// Metadata wrapper around events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventEnvelope {
    /// Sequential identifier assigned by the bus.
    pub id: EventId,
    /// Store revision produced by the change.
    pub revision: u64,
    /// Emission timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event payload.
    pub event: SettingsEvent,
}
