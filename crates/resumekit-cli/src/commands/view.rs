use resumekit_panel::{ThemeMode, render_panel};
use resumekit_settings::SettingsCommands;

use crate::context::{AppContext, CliResult};
use crate::output;

pub(crate) fn handle_show(ctx: &AppContext) -> CliResult<()> {
    output::render_snapshot(&ctx.store.snapshot(), ctx.store.palette(), ctx.output)
}

pub(crate) fn handle_panel(ctx: &AppContext, mode: ThemeMode) -> CliResult<()> {
    let view = render_panel(&ctx.store.snapshot(), &ctx.options.palette, mode);
    output::render_panel(&view, ctx.output)
}
