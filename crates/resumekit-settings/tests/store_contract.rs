use std::sync::Arc;
use std::time::Duration;

use resumekit_events::SettingsEvent;
use resumekit_settings::{
    ColorDebouncer, GlobalSettingsPatch, JsonFilePersistence, ResumeStore, SettingsCommands,
    SettingsError, SettingsPersistence, StoreOptions, spawn_autosave,
};
use resumekit_test_support::fixtures::{
    customised_document, default_store, section, section_order, temp_document,
};
use resumekit_test_support::mocks::MemoryPersistence;

#[test]
fn reorder_with_foreign_section_reports_offending_ids() {
    let store = default_store();
    let mut order = store.snapshot().sections;
    order[0] = section("awards");

    let err = store.reorder_sections(&order).unwrap_err();
    match err {
        SettingsError::InvalidPermutation {
            missing,
            unexpected,
            ..
        } => {
            assert_eq!(missing, vec!["basic".to_string()]);
            assert_eq!(unexpected, vec!["awards".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        section_order(&store),
        vec!["basic", "skills", "experience", "projects", "education"]
    );
}

#[test]
fn every_applied_command_bumps_revision_once() {
    let store = default_store();
    store.toggle_section_visibility("experience").unwrap();
    store.set_active_section("projects").unwrap();
    store
        .update_global_settings(
            GlobalSettingsPatch::default()
                .line_height(1.8)
                .page_padding(40),
        )
        .unwrap();
    store.set_color_theme("#3498db").unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.revision, 4);
    let kinds: Vec<&str> = store
        .events()
        .backlog_since(0)
        .iter()
        .map(|envelope| envelope.event.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "section_visibility_changed",
            "active_section_changed",
            "global_settings_updated",
            "color_theme_changed"
        ]
    );
}

#[test]
fn fractional_fields_snap_to_tenths() {
    let store = default_store();
    let applied = store
        .update_global_settings(
            GlobalSettingsPatch::default()
                .line_height(1.234)
                .paragraph_spacing(7.77),
        )
        .unwrap();
    assert!((applied.settings.line_height - 1.2).abs() < 1e-9);
    assert!((applied.settings.paragraph_spacing - 7.8).abs() < 1e-9);
    assert_eq!(applied.changed, vec!["line_height", "paragraph_spacing"]);
}

#[test]
fn spacing_is_clamped_and_font_sizes_outside_scale_are_rejected() {
    let store = default_store();
    let applied = store
        .update_global_settings(
            GlobalSettingsPatch::default()
                .page_padding(5)
                .section_spacing(250),
        )
        .unwrap();
    assert_eq!(applied.settings.page_padding, 20);
    assert_eq!(applied.settings.section_spacing, 100);

    let before = store.snapshot();
    let err = store
        .update_global_settings(
            GlobalSettingsPatch::default()
                .page_padding(60)
                .header_size(17),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidField {
            field: "header_size",
            ..
        }
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn non_finite_line_height_is_rejected() {
    let store = default_store();
    let err = store
        .update_global_settings(GlobalSettingsPatch::default().line_height(f64::NAN))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.snapshot().revision, 0);
}

#[test]
fn loading_a_document_replaces_state() {
    let store = ResumeStore::with_document(customised_document(), &StoreOptions::default())
        .expect("document loads");
    assert_eq!(
        section_order(&store),
        vec!["education", "projects", "experience", "skills", "basic"]
    );
    let snapshot = store.snapshot();
    assert!(!snapshot.section("skills").is_some_and(|s| s.enabled));
    assert_eq!(snapshot.enabled_sections().count(), 4);
    assert!(matches!(
        store.events().backlog_since(0).first().map(|e| &e.event),
        Some(SettingsEvent::DocumentLoaded { section_count: 5 })
    ));
}

#[test]
fn duplicate_ids_in_document_are_rejected() {
    let mut document = customised_document();
    document.sections.push(section("basic"));
    let err = ResumeStore::with_document(document, &StoreOptions::default()).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidPermutation { .. }));
}

#[tokio::test]
async fn document_survives_a_file_round_trip() -> anyhow::Result<()> {
    let (_dir, path) = temp_document(&customised_document())?;
    let persistence = JsonFilePersistence::new(&path);
    let document = persistence.load().await?.expect("document on disk");

    let store = ResumeStore::with_document(document, &StoreOptions::default())?;
    store.move_section("basic", 0)?;
    persistence.save(&store.document()).await?;

    let reloaded = persistence.load().await?.expect("document on disk");
    assert_eq!(reloaded.sections[0].id.as_str(), "basic");
    assert_eq!(reloaded, store.document());
    Ok(())
}

#[tokio::test]
async fn autosave_tolerates_failing_backend() {
    let store = default_store();
    let persistence = Arc::new(MemoryPersistence::failing());
    let handle = spawn_autosave(store.subscribe(), persistence.clone());

    store.toggle_section_visibility("basic").unwrap();
    tokio::task::yield_now().await;
    store.toggle_section_visibility("basic").unwrap();
    drop(store);

    handle.await.expect("autosave exits cleanly");
    assert!(persistence.save_count() >= 1);
    assert!(persistence.stored().is_none());
}

#[tokio::test]
async fn autosave_persists_to_memory_backend() {
    let store = default_store();
    let persistence = Arc::new(MemoryPersistence::default());
    let handle = spawn_autosave(store.subscribe(), persistence.clone());

    store.set_active_section("education").unwrap();
    drop(store);
    handle.await.expect("autosave exits cleanly");

    let stored = persistence.stored().expect("saved document");
    assert_eq!(
        stored.active_section.as_ref().map(|id| id.as_str()),
        Some("education")
    );
}

#[tokio::test(start_paused = true)]
async fn debounced_colors_apply_only_the_final_value() {
    let store = default_store();
    let mut events = store.events().subscribe(None);
    let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), Duration::from_millis(100));

    for value in ["#101010", "#202020", "#303030", "#404040"] {
        debouncer.submit(value);
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    tokio::time::sleep(Duration::from_millis(150)).await;

    let envelope = events.next().await.expect("color event");
    assert_eq!(
        envelope.event,
        SettingsEvent::ColorThemeChanged {
            color: "#404040".into(),
            preset: false
        }
    );
    assert_eq!(store.snapshot().revision, 1);
    debouncer.shutdown().await;
}
