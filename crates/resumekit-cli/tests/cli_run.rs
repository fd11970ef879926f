use std::path::Path;

use resumekit_settings::SettingsDocument;
use resumekit_test_support::fixtures::{customised_document, temp_document};

async fn run(document: &Path, args: &[&str]) -> i32 {
    let path = document.to_string_lossy().into_owned();
    let argv = ["resumekit", "--document", path.as_str()]
        .into_iter()
        .chain(args.iter().copied())
        .map(String::from);
    resumekit_cli::run_from(argv).await
}

fn read(document: &Path) -> SettingsDocument {
    let bytes = std::fs::read(document).expect("document exists");
    serde_json::from_slice(&bytes).expect("document parses")
}

#[tokio::test]
async fn mutations_are_saved_to_the_document() {
    let (_dir, path) = temp_document(&customised_document()).expect("fixture");

    assert_eq!(run(&path, &["sections", "toggle", "skills"]).await, 0);
    assert_eq!(
        run(&path, &["settings", "set", "--line-height", "1.8", "--header-size", "20"]).await,
        0
    );
    assert_eq!(run(&path, &["color", "set", "#9B59B6"]).await, 0);

    let document = read(&path);
    assert!(
        document
            .sections
            .iter()
            .find(|s| s.id.as_str() == "skills")
            .is_some_and(|s| s.enabled)
    );
    assert!((document.global_settings.line_height - 1.8).abs() < 1e-9);
    assert_eq!(document.global_settings.header_size.get(), 20);
    assert_eq!(document.color_theme.as_str(), "#9b59b6");
}

#[tokio::test]
async fn validation_failures_exit_with_two_and_leave_file_untouched() {
    let (_dir, path) = temp_document(&customised_document()).expect("fixture");
    let before = std::fs::read(&path).expect("read");

    assert_eq!(run(&path, &["sections", "toggle", "awards"]).await, 2);
    assert_eq!(run(&path, &["settings", "set", "--base-font-size", "-12"]).await, 2);
    assert_eq!(run(&path, &["color", "set", "chartreuse-ish"]).await, 2);
    assert_eq!(run(&path, &["sections", "reorder", "basic,skills"]).await, 2);

    assert_eq!(std::fs::read(&path).expect("read"), before);
}

#[tokio::test]
async fn corrupt_document_exits_with_three() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("resume.json");
    std::fs::write(&path, "{").expect("write");
    assert_eq!(run(&path, &["show"]).await, 3);
}

#[tokio::test]
async fn out_of_domain_document_exits_with_two() {
    let (_dir, path) = temp_document(&customised_document()).expect("fixture");
    let mut value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).expect("read")).expect("json");
    value["globalSettings"]["baseFontSize"] = 17.into();
    let before = serde_json::to_vec(&value).expect("encode");
    std::fs::write(&path, &before).expect("write");

    assert_eq!(run(&path, &["show"]).await, 2);
    assert_eq!(run(&path, &["sections", "toggle", "skills"]).await, 2);
    assert_eq!(std::fs::read(&path).expect("read"), before);
}

#[tokio::test]
async fn named_colors_are_accepted() {
    let (_dir, path) = temp_document(&customised_document()).expect("fixture");
    assert_eq!(run(&path, &["color", "set", "RebeccaPurple"]).await, 0);
    assert_eq!(read(&path).color_theme.as_str(), "rebeccapurple");
}

#[tokio::test]
async fn read_only_commands_do_not_create_the_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fresh.json");

    assert_eq!(run(&path, &["show", "--output", "json"]).await, 0);
    assert_eq!(run(&path, &["panel", "--mode", "dark"]).await, 0);
    assert_eq!(run(&path, &["color", "presets"]).await, 0);
    assert!(!path.exists());

    assert_eq!(run(&path, &["sections", "move", "basic", "4"]).await, 0);
    let document = read(&path);
    assert_eq!(
        document.sections.last().map(|s| s.id.as_str()),
        Some("basic")
    );
}

#[tokio::test]
async fn unknown_subcommand_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(run(&dir.path().join("x.json"), &["frobnicate"]).await, 2);
}
