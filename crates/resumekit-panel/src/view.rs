//! Panel view tree and the projection that builds it.
//!
//! `render_panel` is a pure function of its inputs: the same snapshot,
//! palette and mode always yield the same tree.

use resumekit_settings::{
    ColorTheme, FRACTIONAL_STEP, FontFamily, FontSize, GlobalSettings, LINE_HEIGHT_RANGE,
    PARAGRAPH_SPACING_RANGE, SPACING_RANGE, Section, SettingsSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::theme::{ThemeMode, Tone};

/// Preset swatches rendered per row.
pub const SWATCHES_PER_ROW: usize = 6;

/// Whole side panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    /// Mode the panel was rendered for.
    pub mode: ThemeMode,
    /// Revision of the snapshot that produced the view.
    pub revision: u64,
    /// Cards in display order.
    pub cards: Vec<Card>,
}

impl PanelView {
    /// Card of the given kind.
    #[must_use]
    pub fn card(&self, kind: CardKind) -> Option<&Card> {
        self.cards.iter().find(|card| card.kind == kind)
    }

    /// Layout rows, in section order.
    #[must_use]
    pub fn section_rows(&self) -> &[SectionRow] {
        match self.card(CardKind::Layout).map(|card| &card.body) {
            Some(CardBody::Layout(rows)) => rows,
            _ => &[],
        }
    }
}

/// Identifies a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Section order and visibility.
    Layout,
    /// Accent color.
    ThemeColor,
    /// Fonts and line height.
    Typography,
    /// Padding and spacing.
    Spacing,
}

impl CardKind {
    /// Heading shown on the card.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::ThemeColor => "Theme color",
            Self::Typography => "Typography",
            Self::Spacing => "Spacing",
        }
    }
}

/// Titled group of controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Which card this is.
    pub kind: CardKind,
    /// Heading.
    pub title: &'static str,
    /// Surface tone.
    pub tone: Tone,
    /// Controls.
    pub body: CardBody,
}

/// Card contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "controls", rename_all = "snake_case")]
pub enum CardBody {
    /// One row per section.
    Layout(Vec<SectionRow>),
    /// Preset swatches and custom input.
    ThemeColor(ThemeColorCard),
    /// Font controls.
    Typography(TypographyCard),
    /// Spacing sliders.
    Spacing(SpacingCard),
}

/// Glyph of a section's visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityGlyph {
    /// Section shown.
    Eye,
    /// Section hidden.
    EyeOff,
}

/// Draggable layout row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRow {
    /// Section id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Opaque icon token.
    pub icon: String,
    /// Whether the section is shown.
    pub enabled: bool,
    /// Whether the section is focused for editing.
    pub active: bool,
    /// Toggle glyph.
    pub glyph: VisibilityGlyph,
    /// Row tone; muted when hidden.
    pub tone: Tone,
}

/// Preset color swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    /// Color value.
    pub value: ColorTheme,
    /// Whether this swatch is the active color.
    pub selected: bool,
}

/// Free-form color input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomColorInput {
    /// Value shown in the input.
    pub value: ColorTheme,
    /// Whether the active color is outside the palette.
    pub is_custom: bool,
}

/// Theme color card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColorCard {
    /// Preset swatches, in palette order.
    pub swatches: Vec<Swatch>,
    /// Custom color input.
    pub custom: CustomColorInput,
}

impl ThemeColorCard {
    /// Swatches grouped into display rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Swatch]> {
        self.swatches.chunks(SWATCHES_PER_ROW)
    }
}

/// Field bound to a select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectField {
    /// Font family.
    FontFamily,
    /// Body font size.
    BaseFontSize,
    /// Heading font size.
    HeaderSize,
    /// Subheading font size.
    SubheaderSize,
}

impl SelectField {
    /// Field name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FontFamily => "font_family",
            Self::BaseFontSize => "base_font_size",
            Self::HeaderSize => "header_size",
            Self::SubheaderSize => "subheader_size",
        }
    }
}

/// Field bound to a slider control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderField {
    /// Line height multiplier.
    LineHeight,
    /// Page padding in pixels.
    PagePadding,
    /// Gap between sections in pixels.
    SectionSpacing,
    /// Gap between paragraphs in pixels.
    ParagraphSpacing,
}

impl SliderField {
    /// Field name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LineHeight => "line_height",
            Self::PagePadding => "page_padding",
            Self::SectionSpacing => "section_spacing",
            Self::ParagraphSpacing => "paragraph_spacing",
        }
    }

    /// Whether the slider moves in whole pixels.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::PagePadding | Self::SectionSpacing)
    }
}

/// Option of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Select {
    /// Bound field.
    pub field: SelectField,
    /// Label.
    pub label: &'static str,
    /// Current value.
    pub value: String,
    /// Choices.
    pub options: Vec<SelectOption>,
}

/// Slider control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    /// Bound field.
    pub field: SliderField,
    /// Label.
    pub label: &'static str,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step.
    pub step: f64,
    /// Current value.
    pub value: f64,
    /// Value as displayed next to the slider.
    pub display: String,
}

/// Typography card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypographyCard {
    /// Font family select.
    pub font_family: Select,
    /// Line height slider.
    pub line_height: Slider,
    /// Body font size select.
    pub base_font_size: Select,
    /// Heading font size select.
    pub header_size: Select,
    /// Subheading font size select.
    pub subheader_size: Select,
}

/// Spacing card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpacingCard {
    /// Page padding slider.
    pub page_padding: Slider,
    /// Section spacing slider.
    pub section_spacing: Slider,
    /// Paragraph spacing slider.
    pub paragraph_spacing: Slider,
}

/// Project the store state into the panel tree.
#[must_use]
pub fn render_panel(
    snapshot: &SettingsSnapshot,
    palette: &[ColorTheme],
    mode: ThemeMode,
) -> PanelView {
    let card = |kind: CardKind, body: CardBody| Card {
        kind,
        title: kind.title(),
        tone: Tone::surface(mode),
        body,
    };

    PanelView {
        mode,
        revision: snapshot.revision,
        cards: vec![
            card(CardKind::Layout, CardBody::Layout(layout_rows(snapshot, mode))),
            card(
                CardKind::ThemeColor,
                CardBody::ThemeColor(theme_color(&snapshot.color_theme, palette)),
            ),
            card(
                CardKind::Typography,
                CardBody::Typography(typography(&snapshot.global_settings)),
            ),
            card(
                CardKind::Spacing,
                CardBody::Spacing(spacing(&snapshot.global_settings)),
            ),
        ],
    }
}

fn layout_rows(snapshot: &SettingsSnapshot, mode: ThemeMode) -> Vec<SectionRow> {
    snapshot
        .sections
        .iter()
        .map(|section: &Section| SectionRow {
            id: section.id.to_string(),
            title: section.title.clone(),
            icon: section.icon.as_str().to_string(),
            enabled: section.enabled,
            active: snapshot.active_section.as_ref() == Some(&section.id),
            glyph: if section.enabled {
                VisibilityGlyph::Eye
            } else {
                VisibilityGlyph::EyeOff
            },
            tone: if section.enabled {
                Tone::surface(mode)
            } else {
                Tone::muted(mode)
            },
        })
        .collect()
}

fn theme_color(active: &ColorTheme, palette: &[ColorTheme]) -> ThemeColorCard {
    ThemeColorCard {
        swatches: palette
            .iter()
            .map(|value| Swatch {
                value: value.clone(),
                selected: value == active,
            })
            .collect(),
        custom: CustomColorInput {
            value: active.clone(),
            is_custom: !palette.contains(active),
        },
    }
}

fn font_family_label(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Sans => "Sans-serif",
        FontFamily::Serif => "Serif",
        FontFamily::Mono => "Monospace",
    }
}

fn size_select(field: SelectField, label: &'static str, current: FontSize) -> Select {
    Select {
        field,
        label,
        value: current.get().to_string(),
        options: FontSize::ALLOWED
            .iter()
            .map(|size| SelectOption {
                value: size.to_string(),
                label: format!("{size}px"),
            })
            .collect(),
    }
}

fn slider(field: SliderField, label: &'static str, range: (f64, f64), value: f64) -> Slider {
    let step = if field.is_integral() { 1.0 } else { FRACTIONAL_STEP };
    let display = match field {
        SliderField::LineHeight => value.to_string(),
        _ => format!("{value}px"),
    };
    Slider {
        field,
        label,
        min: range.0,
        max: range.1,
        step,
        value,
        display,
    }
}

fn typography(settings: &GlobalSettings) -> TypographyCard {
    TypographyCard {
        font_family: Select {
            field: SelectField::FontFamily,
            label: "Font",
            value: settings.font_family.as_str().to_string(),
            options: FontFamily::all()
                .into_iter()
                .map(|family| SelectOption {
                    value: family.as_str().to_string(),
                    label: font_family_label(family).to_string(),
                })
                .collect(),
        },
        line_height: slider(
            SliderField::LineHeight,
            "Line height",
            LINE_HEIGHT_RANGE,
            settings.line_height,
        ),
        base_font_size: size_select(
            SelectField::BaseFontSize,
            "Base font size",
            settings.base_font_size,
        ),
        header_size: size_select(SelectField::HeaderSize, "Header size", settings.header_size),
        subheader_size: size_select(
            SelectField::SubheaderSize,
            "Subheader size",
            settings.subheader_size,
        ),
    }
}

fn spacing(settings: &GlobalSettings) -> SpacingCard {
    #[allow(clippy::cast_precision_loss)]
    let spacing_range = (SPACING_RANGE.0 as f64, SPACING_RANGE.1 as f64);
    SpacingCard {
        page_padding: slider(
            SliderField::PagePadding,
            "Page padding",
            spacing_range,
            f64::from(settings.page_padding),
        ),
        section_spacing: slider(
            SliderField::SectionSpacing,
            "Section spacing",
            spacing_range,
            f64::from(settings.section_spacing),
        ),
        paragraph_spacing: slider(
            SliderField::ParagraphSpacing,
            "Paragraph spacing",
            PARAGRAPH_SPACING_RANGE,
            settings.paragraph_spacing,
        ),
    }
}
