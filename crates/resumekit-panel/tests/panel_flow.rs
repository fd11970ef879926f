use std::sync::Arc;
use std::time::Duration;

use resumekit_panel::{
    CardBody, CardKind, CommandOutcome, Gesture, PanelController, SelectField, SliderField,
    ThemeMode, VisibilityGlyph,
};
use resumekit_settings::{SettingsCommands, THEME_COLORS};
use resumekit_test_support::mocks::RecordingCommands;

fn controller(commands: &Arc<RecordingCommands>) -> PanelController {
    let palette = commands.store().palette().to_vec();
    PanelController::new(commands.clone(), palette, Duration::from_millis(100))
}

#[tokio::test]
async fn gestures_issue_exactly_one_store_command_each() {
    let commands = Arc::new(RecordingCommands::default());
    let panel = controller(&commands);

    panel
        .handle(&Gesture::ToggleVisibility {
            section_id: "skills".into(),
        })
        .unwrap();
    panel
        .handle(&Gesture::SelectChanged {
            field: SelectField::HeaderSize,
            value: "24".into(),
        })
        .unwrap();
    panel
        .handle(&Gesture::PickPreset {
            color: THEME_COLORS[8].into(),
        })
        .unwrap();

    let calls = commands.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], "toggle_section_visibility(skills)");
    assert!(calls[1].starts_with("update_global_settings("));
    assert_eq!(calls[2], "set_color_theme(#4a90e2)");
    panel.shutdown().await;
}

#[tokio::test]
async fn malformed_gesture_never_reaches_the_store() {
    let commands = Arc::new(RecordingCommands::default());
    let panel = controller(&commands);

    let err = panel
        .handle(&Gesture::SliderChanged {
            field: SliderField::LineHeight,
            value: f64::NAN,
        })
        .unwrap_err();
    assert!(err.is_validation());
    assert!(commands.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dragging_the_custom_picker_applies_only_the_last_color() {
    let commands = Arc::new(RecordingCommands::default());
    let panel = controller(&commands);

    for color in ["#110000", "#220000", "#330000", "#440000", "#550000"] {
        let outcome = panel
            .handle(&Gesture::PickCustom {
                color: color.into(),
            })
            .unwrap();
        assert_eq!(outcome, CommandOutcome::ColorQueued);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(commands.calls(), vec!["set_color_theme(#550000)".to_string()]);
    assert_eq!(commands.snapshot().color_theme.as_str(), "#550000");
}

#[tokio::test]
async fn rendered_view_tracks_store_changes() {
    let commands = Arc::new(RecordingCommands::default());
    let mut panel = controller(&commands);
    panel.set_mode(ThemeMode::Dark);

    panel
        .handle(&Gesture::Reorder {
            order: vec![
                "education".into(),
                "basic".into(),
                "skills".into(),
                "experience".into(),
                "projects".into(),
            ],
        })
        .unwrap();
    panel
        .handle(&Gesture::ToggleVisibility {
            section_id: "basic".into(),
        })
        .unwrap();

    let view = panel.render();
    assert_eq!(view.revision, 2);
    let ids: Vec<&str> = view.section_rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["education", "basic", "skills", "experience", "projects"]);
    assert_eq!(view.section_rows()[1].glyph, VisibilityGlyph::EyeOff);

    let Some(CardBody::ThemeColor(colors)) = view.card(CardKind::ThemeColor).map(|c| &c.body)
    else {
        panic!("theme color card missing");
    };
    assert_eq!(colors.swatches.len(), THEME_COLORS.len());
    assert!(colors.swatches[0].selected);
    assert!(!colors.custom.is_custom);
}
