//! Typed settings models and change payloads.
//!
//! # Design
//! - Pure data carriers shared by the store, the panel and persistence.
//! - Patches carry raw caller input; domain checks live in `validate.rs`.

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ColorTheme;
use crate::defaults::{
    DEFAULT_BASE_FONT_SIZE, DEFAULT_COLOR, DEFAULT_HEADER_SIZE, DEFAULT_LINE_HEIGHT,
    DEFAULT_PAGE_PADDING, DEFAULT_PARAGRAPH_SPACING, DEFAULT_SECTION_SPACING, DEFAULT_SECTIONS,
    DEFAULT_SUBHEADER_SIZE,
};
use crate::error::{SettingsError, SettingsResult};

/// Unique, non-empty identifier of a resume section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    /// Build an identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidField`] when the id is blank.
    pub fn new(value: impl AsRef<str>) -> SettingsResult<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SettingsError::InvalidField {
                field: "section_id",
                value: None,
                reason: "must not be empty",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SectionId {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SectionId {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.0
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for SectionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Opaque icon identifier resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionIcon(pub String);

impl SectionIcon {
    /// Borrow the raw icon identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A reorderable, independently toggleable block of the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier.
    pub id: SectionId,
    /// Display title.
    pub title: String,
    /// Presentation icon.
    pub icon: SectionIcon,
    /// Whether the section is rendered in the document.
    pub enabled: bool,
}

impl Section {
    /// Create an enabled section.
    #[must_use]
    pub fn new(id: SectionId, title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon: SectionIcon(icon.into()),
            enabled: true,
        }
    }
}

/// Sections every new document starts with.
#[must_use]
pub fn default_sections() -> Vec<Section> {
    DEFAULT_SECTIONS
        .iter()
        .map(|(id, title, icon)| Section::new(SectionId((*id).to_string()), *title, *icon))
        .collect()
}

/// Font family applied to the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif stack.
    #[default]
    Sans,
    /// Serif stack.
    Serif,
    /// Monospace stack.
    Mono,
}

impl FontFamily {
    /// All families in presentation order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Sans, Self::Serif, Self::Mono]
    }

    /// Render the family as its lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sans => "sans",
            Self::Serif => "serif",
            Self::Mono => "mono",
        }
    }
}

impl FromStr for FontFamily {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sans" => Ok(Self::Sans),
            "serif" => Ok(Self::Serif),
            "mono" => Ok(Self::Mono),
            other => Err(SettingsError::invalid_field(
                "font_family",
                other,
                "expected one of sans, serif, mono",
            )),
        }
    }
}

/// Font size restricted to the sizes the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontSize(u16);

impl FontSize {
    /// Pixel sizes accepted for body and heading text.
    pub const ALLOWED: [u16; 8] = [12, 13, 14, 15, 16, 18, 20, 24];

    /// Validate a raw size for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidField`] when `raw` is not one of
    /// [`FontSize::ALLOWED`].
    pub fn parse(field: &'static str, raw: i64) -> SettingsResult<Self> {
        u16::try_from(raw)
            .ok()
            .filter(|size| Self::ALLOWED.contains(size))
            .map(Self)
            .ok_or_else(|| SettingsError::invalid_field(field, raw, "unsupported font size"))
    }

    /// Size in pixels.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    pub(crate) const fn new_unchecked(size: u16) -> Self {
        Self(size)
    }
}

impl TryFrom<u16> for FontSize {
    type Error = SettingsError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::parse("font_size", i64::from(value))
    }
}

impl From<FontSize> for u16 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

/// Document-wide typography and spacing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Font family.
    pub font_family: FontFamily,
    /// Line height multiplier in `[1.0, 2.0]`.
    pub line_height: f64,
    /// Body text size.
    pub base_font_size: FontSize,
    /// Section title size.
    pub header_size: FontSize,
    /// Section subtitle size.
    pub subheader_size: FontSize,
    /// Page margin in pixels, `[20, 100]`.
    pub page_padding: u16,
    /// Gap between sections in pixels, `[20, 100]`.
    pub section_spacing: u16,
    /// Gap between paragraphs, at least `1.0`.
    pub paragraph_spacing: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Sans,
            line_height: DEFAULT_LINE_HEIGHT,
            base_font_size: FontSize::new_unchecked(DEFAULT_BASE_FONT_SIZE),
            header_size: FontSize::new_unchecked(DEFAULT_HEADER_SIZE),
            subheader_size: FontSize::new_unchecked(DEFAULT_SUBHEADER_SIZE),
            page_padding: DEFAULT_PAGE_PADDING,
            section_spacing: DEFAULT_SECTION_SPACING,
            paragraph_spacing: DEFAULT_PARAGRAPH_SPACING,
        }
    }
}

/// Partial update of [`GlobalSettings`]. `None` fields are left unchanged.
///
/// Numeric fields use wide raw types so out-of-domain input can be expressed
/// and rejected or clamped by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettingsPatch {
    /// New font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    /// New line height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// New body size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_font_size: Option<i64>,
    /// New section title size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_size: Option<i64>,
    /// New section subtitle size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheader_size: Option<i64>,
    /// New page margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_padding: Option<i64>,
    /// New section gap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_spacing: Option<i64>,
    /// New paragraph gap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
}

impl GlobalSettingsPatch {
    /// Whether the patch carries no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Set the font family.
    #[must_use]
    pub fn font_family(mut self, value: FontFamily) -> Self {
        self.font_family = Some(value);
        self
    }

    /// Set the line height.
    #[must_use]
    pub fn line_height(mut self, value: f64) -> Self {
        self.line_height = Some(value);
        self
    }

    /// Set the body font size.
    #[must_use]
    pub fn base_font_size(mut self, value: i64) -> Self {
        self.base_font_size = Some(value);
        self
    }

    /// Set the section title size.
    #[must_use]
    pub fn header_size(mut self, value: i64) -> Self {
        self.header_size = Some(value);
        self
    }

    /// Set the section subtitle size.
    #[must_use]
    pub fn subheader_size(mut self, value: i64) -> Self {
        self.subheader_size = Some(value);
        self
    }

    /// Set the page margin.
    #[must_use]
    pub fn page_padding(mut self, value: i64) -> Self {
        self.page_padding = Some(value);
        self
    }

    /// Set the gap between sections.
    #[must_use]
    pub fn section_spacing(mut self, value: i64) -> Self {
        self.section_spacing = Some(value);
        self
    }

    /// Set the gap between paragraphs.
    #[must_use]
    pub fn paragraph_spacing(mut self, value: f64) -> Self {
        self.paragraph_spacing = Some(value);
        self
    }
}

impl From<&GlobalSettings> for GlobalSettingsPatch {
    fn from(settings: &GlobalSettings) -> Self {
        Self {
            font_family: Some(settings.font_family),
            line_height: Some(settings.line_height),
            base_font_size: Some(i64::from(settings.base_font_size.get())),
            header_size: Some(i64::from(settings.header_size.get())),
            subheader_size: Some(i64::from(settings.subheader_size.get())),
            page_padding: Some(i64::from(settings.page_padding)),
            section_spacing: Some(i64::from(settings.section_spacing)),
            paragraph_spacing: Some(settings.paragraph_spacing),
        }
    }
}

/// Result of an accepted settings patch.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedSettings {
    /// Settings after the merge.
    pub settings: GlobalSettings,
    /// Fields whose value changed, in declaration order.
    pub changed: Vec<&'static str>,
}

/// Immutable view of the store state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    /// Monotonic counter of applied mutations.
    pub revision: u64,
    /// Sections in render order.
    pub sections: Vec<Section>,
    /// Section focused for editing.
    pub active_section: Option<SectionId>,
    /// Typography and spacing.
    pub global_settings: GlobalSettings,
    /// Accent color.
    pub color_theme: ColorTheme,
}

impl SettingsSnapshot {
    /// Find a section by id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id.as_str() == id)
    }

    /// Sections currently shown in the document.
    pub fn enabled_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| section.enabled)
    }
}

/// Persisted form of the store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    /// Sections in render order.
    pub sections: Vec<Section>,
    /// Section focused for editing.
    #[serde(default)]
    pub active_section: Option<SectionId>,
    /// Typography and spacing.
    #[serde(default)]
    pub global_settings: GlobalSettings,
    /// Accent color.
    pub color_theme: ColorTheme,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        let sections = default_sections();
        Self {
            active_section: sections.first().map(|section| section.id.clone()),
            sections,
            global_settings: GlobalSettings::default(),
            color_theme: ColorTheme::trusted(DEFAULT_COLOR),
        }
    }
}

impl From<&SettingsSnapshot> for SettingsDocument {
    fn from(snapshot: &SettingsSnapshot) -> Self {
        Self {
            sections: snapshot.sections.clone(),
            active_section: snapshot.active_section.clone(),
            global_settings: snapshot.global_settings.clone(),
            color_theme: snapshot.color_theme.clone(),
        }
    }
}
