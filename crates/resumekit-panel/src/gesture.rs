//! Mapping from user gestures on the panel to store commands.
//!
//! The mapping is pure: it inspects only the gesture, never the store, so
//! every control can be tested without a running editor.

use resumekit_settings::{FontFamily, GlobalSettingsPatch, SectionId};
use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};
use crate::view::{SelectField, SliderField};

/// Interaction reported by a panel control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    /// Layout rows were dropped into a new order.
    Reorder {
        /// Section ids in their new order.
        order: Vec<String>,
    },
    /// The eye toggle of a row was pressed.
    ToggleVisibility {
        /// Section id.
        section_id: String,
    },
    /// A row was clicked to start editing it.
    SelectSection {
        /// Section id.
        section_id: String,
    },
    /// A preset swatch was clicked.
    PickPreset {
        /// Swatch value.
        color: String,
    },
    /// The custom color input changed.
    PickCustom {
        /// Raw input value.
        color: String,
    },
    /// A select control changed.
    SelectChanged {
        /// Bound field.
        field: SelectField,
        /// Raw option value.
        value: String,
    },
    /// A slider moved.
    SliderChanged {
        /// Bound field.
        field: SliderField,
        /// Slider position.
        value: f64,
    },
}

/// Store command issued in response to a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    /// Replace the section order.
    ReorderSections(Vec<SectionId>),
    /// Flip a section's visibility.
    ToggleSectionVisibility(SectionId),
    /// Focus a section for editing.
    SetActiveSection(SectionId),
    /// Merge a settings patch.
    UpdateGlobalSettings(GlobalSettingsPatch),
    /// Change the accent color.
    SetColorTheme {
        /// Raw color value; validated by the store.
        value: String,
        /// Whether the value goes through the debouncer.
        debounced: bool,
    },
}

impl PanelCommand {
    /// Command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReorderSections(_) => "reorder_sections",
            Self::ToggleSectionVisibility(_) => "toggle_section_visibility",
            Self::SetActiveSection(_) => "set_active_section",
            Self::UpdateGlobalSettings(_) => "update_global_settings",
            Self::SetColorTheme { .. } => "set_color_theme",
        }
    }
}

/// Translate a gesture into the command it triggers.
///
/// # Errors
///
/// Returns [`PanelError::InvalidGesture`] when the gesture carries a value
/// the control could not have produced (blank ids, non-numeric selects,
/// non-finite slider positions).
pub fn command_for_gesture(gesture: &Gesture) -> PanelResult<PanelCommand> {
    match gesture {
        Gesture::Reorder { order } => order
            .iter()
            .map(|id| section_id("layout", id))
            .collect::<PanelResult<Vec<_>>>()
            .map(PanelCommand::ReorderSections),
        Gesture::ToggleVisibility { section_id: id } => {
            section_id("visibility_toggle", id).map(PanelCommand::ToggleSectionVisibility)
        }
        Gesture::SelectSection { section_id: id } => {
            section_id("layout", id).map(PanelCommand::SetActiveSection)
        }
        Gesture::PickPreset { color } => Ok(PanelCommand::SetColorTheme {
            value: color.clone(),
            debounced: false,
        }),
        Gesture::PickCustom { color } => Ok(PanelCommand::SetColorTheme {
            value: color.clone(),
            debounced: true,
        }),
        Gesture::SelectChanged { field, value } => {
            select_patch(*field, value).map(PanelCommand::UpdateGlobalSettings)
        }
        Gesture::SliderChanged { field, value } => {
            slider_patch(*field, *value).map(PanelCommand::UpdateGlobalSettings)
        }
    }
}

fn section_id(control: &'static str, raw: &str) -> PanelResult<SectionId> {
    SectionId::new(raw).map_err(|_| PanelError::InvalidGesture {
        control,
        value: raw.to_string(),
        reason: "section id must not be empty",
    })
}

fn select_patch(field: SelectField, raw: &str) -> PanelResult<GlobalSettingsPatch> {
    let patch = GlobalSettingsPatch::default();
    if field == SelectField::FontFamily {
        let family = raw
            .parse::<FontFamily>()
            .map_err(|_| PanelError::InvalidGesture {
                control: field.name(),
                value: raw.to_string(),
                reason: "expected sans, serif or mono",
            })?;
        return Ok(patch.font_family(family));
    }

    let size = parse_size(raw).ok_or_else(|| PanelError::InvalidGesture {
        control: field.name(),
        value: raw.to_string(),
        reason: "expected an integer size",
    })?;
    Ok(match field {
        SelectField::BaseFontSize => patch.base_font_size(size),
        SelectField::HeaderSize => patch.header_size(size),
        SelectField::SubheaderSize => patch.subheader_size(size),
        SelectField::FontFamily => patch,
    })
}

/// Integer option value, with or without a trailing `px`.
fn parse_size(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix("px")
        .unwrap_or(trimmed)
        .trim_end()
        .parse()
        .ok()
}

fn slider_patch(field: SliderField, value: f64) -> PanelResult<GlobalSettingsPatch> {
    if !value.is_finite() {
        return Err(PanelError::InvalidGesture {
            control: field.name(),
            value: value.to_string(),
            reason: "slider position must be finite",
        });
    }
    let patch = GlobalSettingsPatch::default();
    // Finite and rounded; the store clamps into the slider domain.
    #[allow(clippy::cast_possible_truncation)]
    let whole = value.round() as i64;
    Ok(match field {
        SliderField::LineHeight => patch.line_height(value),
        SliderField::PagePadding => patch.page_padding(whole),
        SliderField::SectionSpacing => patch.section_spacing(whole),
        SliderField::ParagraphSpacing => patch.paragraph_spacing(value),
    })
}
