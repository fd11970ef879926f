//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use resumekit_panel::{CardBody, PanelView, Select, Slider, VisibilityGlyph};
use resumekit_settings::{ColorTheme, SettingsSnapshot};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

pub(crate) fn render_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Print `message` in table mode, or `payload` as JSON.
pub(crate) fn render_result<T: Serialize>(
    format: OutputFormat,
    message: &str,
    payload: &T,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(payload),
        OutputFormat::Table => {
            println!("{message}");
            Ok(())
        }
    }
}

pub(crate) fn render_snapshot(
    snapshot: &SettingsSnapshot,
    palette: &[ColorTheme],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(snapshot),
        OutputFormat::Table => {
            print!("{}", format_snapshot(snapshot, palette));
            Ok(())
        }
    }
}

pub(crate) fn render_panel(view: &PanelView, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(view),
        OutputFormat::Table => {
            print!("{}", format_panel(view));
            Ok(())
        }
    }
}

pub(crate) fn render_palette(
    palette: &[ColorTheme],
    active: &ColorTheme,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(palette),
        OutputFormat::Table => {
            print!("{}", format_palette(palette, active));
            Ok(())
        }
    }
}

pub(crate) fn format_snapshot(snapshot: &SettingsSnapshot, palette: &[ColorTheme]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "revision: {}", snapshot.revision);
    let _ = writeln!(out, "{:<3} {:<12} {:<8} TITLE", "#", "ID", "VISIBLE");
    for (index, section) in snapshot.sections.iter().enumerate() {
        let active = if snapshot.active_section.as_ref() == Some(&section.id) {
            " *"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<3} {:<12} {:<8} {} {}{active}",
            index,
            section.id.as_str(),
            yes_no(section.enabled),
            section.icon.as_str(),
            section.title
        );
    }

    let settings = &snapshot.global_settings;
    let _ = writeln!(out, "font family: {}", settings.font_family.as_str());
    let _ = writeln!(out, "line height: {}", settings.line_height);
    let _ = writeln!(
        out,
        "font sizes: base {}px / header {}px / subheader {}px",
        settings.base_font_size.get(),
        settings.header_size.get(),
        settings.subheader_size.get()
    );
    let _ = writeln!(
        out,
        "spacing: page {}px / section {}px / paragraph {}px",
        settings.page_padding, settings.section_spacing, settings.paragraph_spacing
    );
    let kind = if palette.contains(&snapshot.color_theme) {
        "preset"
    } else {
        "custom"
    };
    let _ = writeln!(out, "color: {} ({kind})", snapshot.color_theme);
    out
}

pub(crate) fn format_panel(view: &PanelView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{} mode, revision {}]", view.mode, view.revision);
    for card in &view.cards {
        let _ = writeln!(out, "== {} ==", card.title);
        match &card.body {
            CardBody::Layout(rows) => {
                for row in rows {
                    let marker = if row.active { ">" } else { " " };
                    let muted = if row.tone.is_muted() { " (hidden)" } else { "" };
                    let _ = writeln!(
                        out,
                        "{marker} {} {} [{}]{muted}",
                        row.icon,
                        row.title,
                        glyph_label(row.glyph)
                    );
                }
            }
            CardBody::ThemeColor(colors) => {
                for swatches in colors.rows() {
                    let line: Vec<String> = swatches
                        .iter()
                        .map(|swatch| {
                            if swatch.selected {
                                format!("[{}]", swatch.value)
                            } else {
                                format!(" {} ", swatch.value)
                            }
                        })
                        .collect();
                    let _ = writeln!(out, "  {}", line.join(""));
                }
                let custom = if colors.custom.is_custom { " (active)" } else { "" };
                let _ = writeln!(out, "  custom: {}{custom}", colors.custom.value);
            }
            CardBody::Typography(typography) => {
                write_select(&mut out, &typography.font_family);
                write_slider(&mut out, &typography.line_height);
                write_select(&mut out, &typography.base_font_size);
                write_select(&mut out, &typography.header_size);
                write_select(&mut out, &typography.subheader_size);
            }
            CardBody::Spacing(spacing) => {
                write_slider(&mut out, &spacing.page_padding);
                write_slider(&mut out, &spacing.section_spacing);
                write_slider(&mut out, &spacing.paragraph_spacing);
            }
        }
    }
    out
}

pub(crate) fn format_palette(palette: &[ColorTheme], active: &ColorTheme) -> String {
    let mut out = String::new();
    for (index, color) in palette.iter().enumerate() {
        let marker = if color == active { "*" } else { " " };
        let _ = writeln!(out, "{marker} {index:>2} {color}");
    }
    if !palette.contains(active) {
        let _ = writeln!(out, "* custom {active}");
    }
    out
}

fn write_select(out: &mut String, select: &Select) {
    let label = select
        .options
        .iter()
        .find(|option| option.value == select.value)
        .map_or(select.value.as_str(), |option| option.label.as_str());
    let _ = writeln!(out, "  {}: {label}", select.label);
}

fn write_slider(out: &mut String, slider: &Slider) {
    let _ = writeln!(
        out,
        "  {}: {} ({}..{}, step {})",
        slider.label, slider.display, slider.min, slider.max, slider.step
    );
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

const fn glyph_label(glyph: VisibilityGlyph) -> &'static str {
    match glyph {
        VisibilityGlyph::Eye => "eye",
        VisibilityGlyph::EyeOff => "eye-off",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumekit_panel::{ThemeMode, render_panel as project};
    use resumekit_settings::{ResumeStore, SettingsCommands, StoreOptions};

    fn store() -> ResumeStore {
        ResumeStore::new(&StoreOptions::default())
    }

    #[test]
    fn snapshot_table_marks_active_and_hidden_sections() {
        let store = store();
        store.toggle_section_visibility("skills").expect("toggle");
        let text = format_snapshot(&store.snapshot(), store.palette());
        assert!(text.contains("basic"));
        assert!(text.lines().any(|line| line.contains("skills") && line.contains(" no ")));
        assert!(text.lines().any(|line| line.contains("basic") && line.ends_with(" *")));
        assert!(text.contains("color: #000000 (preset)"));
    }

    #[test]
    fn panel_text_lists_every_card() {
        let store = store();
        let view = project(&store.snapshot(), store.palette(), ThemeMode::Light);
        let text = format_panel(&view);
        for title in ["Layout", "Theme color", "Typography", "Spacing"] {
            assert!(text.contains(&format!("== {title} ==")), "missing {title}");
        }
        assert!(text.contains("[#000000]"));
        assert!(text.contains("Base font size: 16px"));
        assert!(text.contains("Page padding: 32px (20..100, step 1)"));
    }

    #[test]
    fn palette_listing_flags_custom_color() {
        let store = store();
        store.set_color_theme("rgb(1, 2, 3)").expect("color");
        let text = format_palette(store.palette(), &store.snapshot().color_theme);
        assert_eq!(text.lines().count(), store.palette().len() + 1);
        assert!(text.ends_with("* custom rgb(1, 2, 3)\n"));
    }
}
