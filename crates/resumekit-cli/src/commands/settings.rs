use resumekit_settings::{GlobalSettingsPatch, SettingsCommands};
use serde_json::json;

use crate::context::{AppContext, CliError, CliResult};
use crate::output::render_result;

pub(crate) fn handle_set(ctx: &AppContext, patch: GlobalSettingsPatch) -> CliResult<()> {
    if patch.is_empty() {
        return Err(CliError::validation(
            "no settings given; pass at least one field flag such as --line-height",
        ));
    }

    let applied = ctx.store.update_global_settings(patch)?;
    let message = if applied.changed.is_empty() {
        "settings unchanged".to_string()
    } else {
        format!("updated: {}", applied.changed.join(", "))
    };
    render_result(
        ctx.output,
        &message,
        &json!({ "changed": applied.changed, "globalSettings": applied.settings }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use resumekit_settings::StoreOptions;

    async fn context() -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = AppContext::open(
            Some(dir.path().join("doc.json")),
            StoreOptions::default(),
            OutputFormat::Json,
        )
        .await
        .expect("open");
        (dir, ctx)
    }

    #[tokio::test]
    async fn empty_patch_is_a_validation_error() {
        let (_dir, ctx) = context().await;
        let err = handle_set(&ctx, GlobalSettingsPatch::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn out_of_scale_font_size_is_rejected_atomically() {
        let (_dir, ctx) = context().await;
        let patch = GlobalSettingsPatch::default()
            .line_height(1.9)
            .subheader_size(11);
        assert_eq!(handle_set(&ctx, patch).unwrap_err().exit_code(), 2);
        assert!((ctx.store.snapshot().global_settings.line_height - 1.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn clamped_values_are_applied() {
        let (_dir, ctx) = context().await;
        handle_set(&ctx, GlobalSettingsPatch::default().section_spacing(5)).expect("set");
        assert_eq!(ctx.store.snapshot().global_settings.section_spacing, 20);
    }
}
