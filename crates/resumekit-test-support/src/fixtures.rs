//! Store and document fixtures.

use std::path::PathBuf;

use anyhow::Result;
use resumekit_settings::{
    ResumeStore, Section, SectionId, SettingsDocument, StoreOptions, default_sections,
};
use tempfile::TempDir;

/// Store holding the default document and default options.
#[must_use]
pub fn default_store() -> ResumeStore {
    ResumeStore::new(&StoreOptions::default())
}

/// Section with the given id, a title derived from it and a placeholder icon.
///
/// # Panics
///
/// Panics when `id` is blank.
#[must_use]
pub fn section(id: &str) -> Section {
    let section_id = SectionId::new(id).unwrap_or_else(|err| panic!("fixture id {id:?}: {err}"));
    let mut title = id.to_string();
    if let Some(first) = title.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    Section::new(section_id, title, "•")
}

/// Default document with the section order reversed and one section hidden.
#[must_use]
pub fn customised_document() -> SettingsDocument {
    let mut sections = default_sections();
    sections.reverse();
    if let Some(skills) = sections.iter_mut().find(|s| s.id.as_str() == "skills") {
        skills.enabled = false;
    }
    SettingsDocument {
        active_section: sections.first().map(|s| s.id.clone()),
        sections,
        ..SettingsDocument::default()
    }
}

/// Ids of the store's sections in render order.
#[must_use]
pub fn section_order(store: &ResumeStore) -> Vec<String> {
    use resumekit_settings::SettingsCommands;
    store
        .snapshot()
        .sections
        .iter()
        .map(|section| section.id.to_string())
        .collect()
}

/// Temporary directory with `document` written to `resume.json` inside it.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be created.
pub fn temp_document(document: &SettingsDocument) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("resume.json");
    std::fs::write(&path, serde_json::to_vec_pretty(document)?)?;
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_fixture_capitalises_title() {
        let awards = section("awards");
        assert_eq!(awards.title, "Awards");
        assert!(awards.enabled);
    }

    #[test]
    fn customised_document_hides_skills() {
        let document = customised_document();
        assert_eq!(document.sections[0].id.as_str(), "education");
        assert!(
            document
                .sections
                .iter()
                .find(|s| s.id.as_str() == "skills")
                .is_some_and(|s| !s.enabled)
        );
    }

    #[test]
    fn temp_document_round_trips_through_disk() -> Result<()> {
        let document = customised_document();
        let (_dir, path) = temp_document(&document)?;
        let loaded: SettingsDocument = serde_json::from_slice(&std::fs::read(path)?)?;
        assert_eq!(loaded, document);
        Ok(())
    }
}
