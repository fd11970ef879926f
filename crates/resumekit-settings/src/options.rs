//! Store configuration: preset palette, debounce window, document location.
//!
//! # Design
//! - Defaults are usable as-is; environment variables override them.
//! - Lookup is injected so tests never touch the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::color::ColorTheme;
use crate::defaults::{COLOR_DEBOUNCE, THEME_COLORS};
use crate::error::{SettingsError, SettingsResult};

/// Comma-separated preset palette override.
pub const ENV_PALETTE: &str = "RESUMEKIT_PALETTE";
/// Custom color debounce window in milliseconds.
pub const ENV_COLOR_DEBOUNCE_MS: &str = "RESUMEKIT_COLOR_DEBOUNCE_MS";
/// Path of the persisted settings document.
pub const ENV_DOCUMENT: &str = "RESUMEKIT_DOCUMENT";

const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Runtime options for a [`crate::ResumeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Preset accent colors offered by the palette.
    pub palette: Vec<ColorTheme>,
    /// Window used to coalesce custom color input.
    pub color_debounce: Duration,
    /// Where the settings document is persisted, if anywhere.
    pub document_path: Option<PathBuf>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            palette: THEME_COLORS.into_iter().map(ColorTheme::trusted).collect(),
            color_debounce: COLOR_DEBOUNCE,
            document_path: None,
        }
    }
}

impl StoreOptions {
    /// Load options from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a validation error when an override is malformed.
    pub fn from_env() -> SettingsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidColor`] for a bad palette entry and
    /// [`SettingsError::InvalidField`] for an empty palette or a debounce
    /// window that is not a whole number of milliseconds up to ten seconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SettingsResult<Self> {
        let mut options = Self::default();

        if let Some(raw) = lookup(ENV_PALETTE).filter(|raw| !raw.trim().is_empty()) {
            options.palette = parse_palette(&raw)?;
        }

        if let Some(raw) = lookup(ENV_COLOR_DEBOUNCE_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms <= MAX_DEBOUNCE_MS)
                .ok_or_else(|| {
                    SettingsError::invalid_field(
                        "color_debounce_ms",
                        &raw,
                        "must be an integer between 0 and 10000",
                    )
                })?;
            options.color_debounce = Duration::from_millis(millis);
        }

        options.document_path = lookup(ENV_DOCUMENT)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(options)
    }
}

/// Parse a comma-separated list of colors, dropping duplicates.
///
/// # Errors
///
/// Returns an error for any malformed entry or when no entry remains.
pub fn parse_palette(raw: &str) -> SettingsResult<Vec<ColorTheme>> {
    let mut palette: Vec<ColorTheme> = Vec::new();
    for entry in split_entries(raw)
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    {
        let color = ColorTheme::parse(entry)?;
        if !palette.contains(&color) {
            palette.push(color);
        }
    }
    if palette.is_empty() {
        return Err(SettingsError::invalid_field(
            "palette",
            raw,
            "must contain at least one color",
        ));
    }
    Ok(palette)
}

/// Split on commas that are not inside a color function's parentheses.
fn split_entries(raw: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (index, ch) in raw.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&raw[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    entries.push(&raw[start..]);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let options = StoreOptions::from_lookup(lookup(&[])).unwrap();
        assert_eq!(options, StoreOptions::default());
        assert_eq!(options.palette.len(), THEME_COLORS.len());
        assert_eq!(options.color_debounce, Duration::from_millis(100));
    }

    #[test]
    fn default_palette_entries_are_valid_colors() {
        for hex in THEME_COLORS {
            assert_eq!(ColorTheme::parse(hex).unwrap().as_str(), hex);
        }
    }

    #[test]
    fn overrides_are_parsed() {
        let options = StoreOptions::from_lookup(lookup(&[
            (ENV_PALETTE, "#FF0000, #00ff00,#ff0000"),
            (ENV_COLOR_DEBOUNCE_MS, "250"),
            (ENV_DOCUMENT, " /tmp/resume.json "),
        ]))
        .unwrap();
        let palette: Vec<_> = options.palette.iter().map(ColorTheme::as_str).collect();
        assert_eq!(palette, vec!["#ff0000", "#00ff00"]);
        assert_eq!(options.color_debounce, Duration::from_millis(250));
        assert_eq!(options.document_path, Some(PathBuf::from("/tmp/resume.json")));
    }

    #[test]
    fn palette_accepts_named_colors() {
        let palette = parse_palette("Red, navy,rgb(46 139 87),rgb(1, 2, 3)").unwrap();
        let values: Vec<_> = palette.iter().map(ColorTheme::as_str).collect();
        assert_eq!(values, vec!["red", "navy", "rgb(46 139 87)", "rgb(1, 2, 3)"]);
    }

    #[test]
    fn malformed_overrides_are_rejected() {
        assert!(StoreOptions::from_lookup(lookup(&[(ENV_PALETTE, "#ff0000,teal-ish")])).is_err());
        assert!(StoreOptions::from_lookup(lookup(&[(ENV_COLOR_DEBOUNCE_MS, "-1")])).is_err());
        assert!(StoreOptions::from_lookup(lookup(&[(ENV_COLOR_DEBOUNCE_MS, "60000")])).is_err());
        assert!(parse_palette(" , ").is_err());
    }
}
