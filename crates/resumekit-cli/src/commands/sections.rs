use resumekit_settings::{SectionId, SettingsCommands};
use serde_json::json;

use crate::context::{AppContext, CliError, CliResult};
use crate::output::render_result;

pub(crate) fn handle_reorder(ctx: &AppContext, ids: &[String]) -> CliResult<()> {
    let order = ids
        .iter()
        .map(|raw| {
            SectionId::new(raw)
                .map_err(|_| CliError::validation("section ids must not be empty"))
        })
        .collect::<CliResult<Vec<_>>>()?;
    ctx.store.reorder_section_ids(&order)?;
    let order = current_order(ctx);
    render_result(
        ctx.output,
        &format!("section order: {}", order.join(", ")),
        &json!({ "order": order }),
    )
}

pub(crate) fn handle_toggle(ctx: &AppContext, id: &str) -> CliResult<()> {
    let enabled = ctx.store.toggle_section_visibility(id)?;
    let state = if enabled { "visible" } else { "hidden" };
    render_result(
        ctx.output,
        &format!("{id}: {state}"),
        &json!({ "section": id, "enabled": enabled }),
    )
}

pub(crate) fn handle_activate(ctx: &AppContext, id: &str) -> CliResult<()> {
    ctx.store.set_active_section(id)?;
    render_result(
        ctx.output,
        &format!("active section: {id}"),
        &json!({ "activeSection": id }),
    )
}

pub(crate) fn handle_move(ctx: &AppContext, id: &str, index: usize) -> CliResult<()> {
    ctx.store.move_section(id, index)?;
    let order = current_order(ctx);
    render_result(
        ctx.output,
        &format!("section order: {}", order.join(", ")),
        &json!({ "order": order }),
    )
}

fn current_order(ctx: &AppContext) -> Vec<String> {
    ctx.store
        .snapshot()
        .sections
        .iter()
        .map(|section| section.id.to_string())
        .collect()
}
