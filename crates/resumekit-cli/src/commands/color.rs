use resumekit_settings::SettingsCommands;
use serde_json::json;

use crate::context::{AppContext, CliResult};
use crate::output::{render_palette, render_result};

pub(crate) fn handle_set(ctx: &AppContext, value: &str) -> CliResult<()> {
    let color = ctx.store.set_color_theme(value)?;
    let preset = ctx.store.is_preset(&color);
    let kind = if preset { "preset" } else { "custom" };
    render_result(
        ctx.output,
        &format!("color: {color} ({kind})"),
        &json!({ "colorTheme": color, "preset": preset }),
    )
}

pub(crate) fn handle_presets(ctx: &AppContext) -> CliResult<()> {
    render_palette(
        ctx.store.palette(),
        &ctx.store.snapshot().color_theme,
        ctx.output,
    )
}
