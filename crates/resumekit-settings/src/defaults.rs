//! Default document contents and the numeric domains of every setting.
//!
//! # Design
//! - Centralise bounds so the store and the panel sliders share one source.
//! - Defaults mirror a freshly created resume document.

use std::time::Duration;

/// Inclusive bounds for `line_height`.
pub const LINE_HEIGHT_RANGE: (f64, f64) = (1.0, 2.0);
/// Inclusive bounds for `page_padding` and `section_spacing`.
pub const SPACING_RANGE: (i64, i64) = (20, 100);
/// Inclusive bounds for `paragraph_spacing`.
pub const PARAGRAPH_SPACING_RANGE: (f64, f64) = (1.0, 100.0);
/// Granularity applied to fractional settings.
pub const FRACTIONAL_STEP: f64 = 0.1;

/// Window in which successive custom color inputs are coalesced.
pub const COLOR_DEBOUNCE: Duration = Duration::from_millis(100);

/// Preset accent colors offered by the palette.
pub const THEME_COLORS: [&str; 12] = [
    "#000000", "#1a1a1a", "#333333", "#4d4d4d", "#666666", "#808080", "#2e8b57", "#1b4d3e",
    "#4a90e2", "#3498db", "#9b59b6", "#e74c3c",
];

/// Default accent color.
pub const DEFAULT_COLOR: &str = "#000000";

/// `(id, title, icon)` of the sections every new document starts with.
pub const DEFAULT_SECTIONS: [(&str, &str, &str); 5] = [
    ("basic", "Basic info", "👤"),
    ("skills", "Skills", "⚡"),
    ("experience", "Experience", "💼"),
    ("projects", "Projects", "🚀"),
    ("education", "Education", "🎓"),
];

pub(crate) const DEFAULT_LINE_HEIGHT: f64 = 1.5;
pub(crate) const DEFAULT_BASE_FONT_SIZE: u16 = 16;
pub(crate) const DEFAULT_HEADER_SIZE: u16 = 18;
pub(crate) const DEFAULT_SUBHEADER_SIZE: u16 = 16;
pub(crate) const DEFAULT_PAGE_PADDING: u16 = 32;
pub(crate) const DEFAULT_SECTION_SPACING: u16 = 24;
pub(crate) const DEFAULT_PARAGRAPH_SPACING: f64 = 12.0;
