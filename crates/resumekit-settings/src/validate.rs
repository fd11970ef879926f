//! Validation helpers applied before any mutation reaches the store.

use std::collections::{BTreeSet, HashSet};

use crate::defaults::{FRACTIONAL_STEP, LINE_HEIGHT_RANGE, PARAGRAPH_SPACING_RANGE, SPACING_RANGE};
use crate::error::{SettingsError, SettingsResult};
use crate::model::{AppliedSettings, FontSize, GlobalSettings, GlobalSettingsPatch, Section, SectionId};

/// Check that `requested` lists every current id exactly once.
pub(crate) fn check_permutation(current: &[Section], requested: &[SectionId]) -> SettingsResult<()> {
    let known: HashSet<&str> = current.iter().map(|section| section.id.as_str()).collect();
    let mut seen = HashSet::with_capacity(requested.len());
    let mut duplicates = BTreeSet::new();
    let mut unexpected = BTreeSet::new();

    for id in requested {
        if !known.contains(id.as_str()) {
            unexpected.insert(id.to_string());
        } else if !seen.insert(id.as_str()) {
            duplicates.insert(id.to_string());
        }
    }

    let missing: Vec<String> = current
        .iter()
        .filter(|section| !seen.contains(section.id.as_str()))
        .map(|section| section.id.to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() && duplicates.is_empty() {
        return Ok(());
    }

    Err(SettingsError::InvalidPermutation {
        missing,
        unexpected: unexpected.into_iter().collect(),
        duplicates: duplicates.into_iter().collect(),
    })
}

/// Reject duplicate ids in a freshly loaded section list.
pub(crate) fn check_unique_ids(sections: &[Section]) -> SettingsResult<()> {
    let mut seen = HashSet::with_capacity(sections.len());
    let duplicates: BTreeSet<String> = sections
        .iter()
        .filter(|section| !seen.insert(section.id.as_str()))
        .map(|section| section.id.to_string())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(SettingsError::InvalidPermutation {
            missing: Vec::new(),
            unexpected: Vec::new(),
            duplicates: duplicates.into_iter().collect(),
        })
    }
}

/// Clamp a fractional value into `range` and snap it to the slider step.
pub(crate) fn clamp_fraction(field: &'static str, value: f64, range: (f64, f64)) -> SettingsResult<f64> {
    if !value.is_finite() {
        return Err(SettingsError::invalid_field(field, value, "must be a finite number"));
    }
    let clamped = value.clamp(range.0, range.1);
    let snapped = (clamped / FRACTIONAL_STEP).round() * FRACTIONAL_STEP;
    // Snap again on the decimal grid to drop binary noise like 1.7000000000000002.
    Ok(((snapped * 10.0).round() / 10.0).clamp(range.0, range.1))
}

/// Clamp an integer spacing value into [`SPACING_RANGE`].
pub(crate) fn clamp_spacing(value: i64) -> u16 {
    let clamped = value.clamp(SPACING_RANGE.0, SPACING_RANGE.1);
    u16::try_from(clamped).unwrap_or(u16::MAX)
}

/// Merge `patch` into `current`, validating every field first.
///
/// The merge is all-or-nothing: a single rejected field rejects the patch.
pub(crate) fn merge_patch(
    current: &GlobalSettings,
    patch: &GlobalSettingsPatch,
) -> SettingsResult<AppliedSettings> {
    let mut next = current.clone();

    if let Some(family) = patch.font_family {
        next.font_family = family;
    }
    if let Some(value) = patch.line_height {
        next.line_height = clamp_fraction("line_height", value, LINE_HEIGHT_RANGE)?;
    }
    if let Some(value) = patch.base_font_size {
        next.base_font_size = FontSize::parse("base_font_size", value)?;
    }
    if let Some(value) = patch.header_size {
        next.header_size = FontSize::parse("header_size", value)?;
    }
    if let Some(value) = patch.subheader_size {
        next.subheader_size = FontSize::parse("subheader_size", value)?;
    }
    if let Some(value) = patch.page_padding {
        next.page_padding = clamp_spacing(value);
    }
    if let Some(value) = patch.section_spacing {
        next.section_spacing = clamp_spacing(value);
    }
    if let Some(value) = patch.paragraph_spacing {
        next.paragraph_spacing =
            clamp_fraction("paragraph_spacing", value, PARAGRAPH_SPACING_RANGE)?;
    }

    let changed = changed_fields(current, &next);
    Ok(AppliedSettings {
        settings: next,
        changed,
    })
}

/// Re-validate settings that arrived from outside the store (e.g. a file).
pub(crate) fn sanitize_settings(settings: &GlobalSettings) -> SettingsResult<GlobalSettings> {
    merge_patch(settings, &GlobalSettingsPatch::from(settings)).map(|applied| applied.settings)
}

#[allow(clippy::float_cmp)]
fn changed_fields(before: &GlobalSettings, after: &GlobalSettings) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if before.font_family != after.font_family {
        changed.push("font_family");
    }
    if before.line_height != after.line_height {
        changed.push("line_height");
    }
    if before.base_font_size != after.base_font_size {
        changed.push("base_font_size");
    }
    if before.header_size != after.header_size {
        changed.push("header_size");
    }
    if before.subheader_size != after.subheader_size {
        changed.push("subheader_size");
    }
    if before.page_padding != after.page_padding {
        changed.push("page_padding");
    }
    if before.section_spacing != after.section_spacing {
        changed.push("section_spacing");
    }
    if before.paragraph_spacing != after.paragraph_spacing {
        changed.push("paragraph_spacing");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_sections;

    fn ids(values: &[&str]) -> Vec<SectionId> {
        values.iter().map(|value| SectionId::new(value).unwrap()).collect()
    }

    #[test]
    fn permutation_accepts_reordered_ids() {
        let sections = default_sections();
        let order = ids(&["education", "basic", "projects", "skills", "experience"]);
        assert!(check_permutation(&sections, &order).is_ok());
    }

    #[test]
    fn permutation_reports_every_violation() {
        let sections = default_sections();
        let order = ids(&["basic", "basic", "skills", "awards", "projects"]);
        match check_permutation(&sections, &order) {
            Err(SettingsError::InvalidPermutation {
                missing,
                unexpected,
                duplicates,
            }) => {
                assert_eq!(missing, vec!["experience".to_string(), "education".to_string()]);
                assert_eq!(unexpected, vec!["awards".to_string()]);
                assert_eq!(duplicates, vec!["basic".to_string()]);
            }
            other => panic!("expected permutation error, got {other:?}"),
        }
    }

    #[test]
    fn fractions_are_clamped_and_snapped() {
        assert!((clamp_fraction("line_height", 2.5, LINE_HEIGHT_RANGE).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((clamp_fraction("line_height", 0.5, LINE_HEIGHT_RANGE).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((clamp_fraction("line_height", 1.66, LINE_HEIGHT_RANGE).unwrap() - 1.7).abs() < 1e-9);
        assert!(clamp_fraction("line_height", f64::NAN, LINE_HEIGHT_RANGE).is_err());
        assert!(clamp_fraction("paragraph_spacing", f64::INFINITY, PARAGRAPH_SPACING_RANGE).is_err());
    }

    #[test]
    fn spacing_is_clamped_into_range() {
        assert_eq!(clamp_spacing(-50), 20);
        assert_eq!(clamp_spacing(64), 64);
        assert_eq!(clamp_spacing(10_000), 100);
    }

    #[test]
    fn merge_is_all_or_nothing() {
        let current = GlobalSettings::default();
        let patch = GlobalSettingsPatch::default().line_height(1.8).base_font_size(-3);
        assert!(merge_patch(&current, &patch).is_err());
    }

    #[test]
    fn merge_reports_only_changed_fields() {
        let current = GlobalSettings::default();
        let patch = GlobalSettingsPatch::default()
            .base_font_size(i64::from(current.base_font_size.get()))
            .page_padding(40);
        let applied = merge_patch(&current, &patch).unwrap();
        assert_eq!(applied.changed, vec!["page_padding"]);
        assert_eq!(applied.settings.page_padding, 40);
    }

    #[test]
    fn sanitize_clamps_out_of_range_documents() {
        let raw = GlobalSettings {
            line_height: 3.0,
            page_padding: 4,
            ..GlobalSettings::default()
        };
        let clean = sanitize_settings(&raw).unwrap();
        assert!((clean.line_height - 2.0).abs() < f64::EPSILON);
        assert_eq!(clean.page_padding, 20);
    }

    #[test]
    fn duplicate_ids_in_documents_are_rejected() {
        let mut sections = default_sections();
        sections.push(sections[0].clone());
        assert!(check_unique_ids(&sections).is_err());
        assert!(check_unique_ids(&default_sections()).is_ok());
    }
}
