//! Argument parsing and command dispatch.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use resumekit_panel::ThemeMode;
use resumekit_settings::{ENV_DOCUMENT, FontFamily, GlobalSettingsPatch, StoreOptions};
use resumekit_telemetry::{LogFormat, LoggingConfig, command_span, init_logging};
use tracing::{Instrument, warn};

use crate::commands::{color, sections, settings, view};
use crate::context::{AppContext, CliResult};

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    execute(Cli::parse()).await
}

/// Same as [`run`] with explicit arguments (the first item is the binary
/// name). Parse failures print clap's message and return its exit code.
pub async fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => execute(cli).await,
        Err(err) => {
            let _ = err.print();
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> i32 {
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.map_or_else(LogFormat::infer, Into::into),
        ..LoggingConfig::default()
    };
    if init_logging(&logging).is_err() {
        warn!("tracing subscriber already installed; keeping it");
    }

    let span = command_span(command_label(&cli.command));
    match dispatch(cli).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let options = StoreOptions::from_env()?;
    let ctx = AppContext::open(cli.document, options, cli.output).await?;

    match cli.command {
        Command::Show => view::handle_show(&ctx),
        Command::Panel(args) => view::handle_panel(&ctx, args.mode.into()),
        Command::Sections(command) => {
            match command {
                SectionsCommand::Reorder(args) => sections::handle_reorder(&ctx, &args.ids)?,
                SectionsCommand::Toggle(args) => sections::handle_toggle(&ctx, &args.id)?,
                SectionsCommand::Activate(args) => sections::handle_activate(&ctx, &args.id)?,
                SectionsCommand::Move(args) => {
                    sections::handle_move(&ctx, &args.id, args.index)?;
                }
            }
            ctx.save().await
        }
        Command::Settings(SettingsCommand::Set(args)) => {
            settings::handle_set(&ctx, args.into_patch())?;
            ctx.save().await
        }
        Command::Color(ColorCommand::Set(args)) => {
            color::handle_set(&ctx, &args.value)?;
            ctx.save().await
        }
        Command::Color(ColorCommand::Presets) => color::handle_presets(&ctx),
    }
}

#[derive(Parser)]
#[command(
    name = "resumekit",
    about = "Inspect and edit resume layout, typography and color settings"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = ENV_DOCUMENT,
        help = "Settings document to read and update"
    )]
    document: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log filter used when RUST_LOG is unset"
    )]
    log_level: String,
    #[arg(long, global = true, value_enum, env = "RESUMEKIT_LOG_FORMAT")]
    log_format: Option<LogFormatArg>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current settings.
    Show,
    /// Render the settings panel.
    Panel(PanelArgs),
    /// Reorder, toggle or focus sections.
    #[command(subcommand)]
    Sections(SectionsCommand),
    /// Change typography and spacing.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Change or list accent colors.
    #[command(subcommand)]
    Color(ColorCommand),
}

#[derive(Args)]
struct PanelArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Light)]
    mode: ModeArg,
}

#[derive(Subcommand)]
enum SectionsCommand {
    /// Set the full section order.
    Reorder(ReorderArgs),
    /// Show or hide a section.
    Toggle(SectionArgs),
    /// Focus a section for editing.
    Activate(SectionArgs),
    /// Move one section to a new position.
    Move(MoveArgs),
}

#[derive(Args)]
struct ReorderArgs {
    #[arg(value_delimiter = ',', required = true, help = "Section ids in the new order")]
    ids: Vec<String>,
}

#[derive(Args)]
struct SectionArgs {
    #[arg(help = "Section identifier")]
    id: String,
}

#[derive(Args)]
struct MoveArgs {
    #[arg(help = "Section identifier")]
    id: String,
    #[arg(help = "Zero-based target position")]
    index: usize,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Merge the given fields into the global settings.
    Set(SettingsSetArgs),
}

#[derive(Args)]
pub(crate) struct SettingsSetArgs {
    #[arg(long, value_parser = parse_font_family)]
    font_family: Option<FontFamily>,
    #[arg(long)]
    line_height: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    base_font_size: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    header_size: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    subheader_size: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    page_padding: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    section_spacing: Option<i64>,
    #[arg(long)]
    paragraph_spacing: Option<f64>,
}

impl SettingsSetArgs {
    pub(crate) fn into_patch(self) -> GlobalSettingsPatch {
        GlobalSettingsPatch {
            font_family: self.font_family,
            line_height: self.line_height,
            base_font_size: self.base_font_size,
            header_size: self.header_size,
            subheader_size: self.subheader_size,
            page_padding: self.page_padding,
            section_spacing: self.section_spacing,
            paragraph_spacing: self.paragraph_spacing,
        }
    }
}

#[derive(Subcommand)]
enum ColorCommand {
    /// Set the accent color (preset or any CSS color).
    Set(ColorSetArgs),
    /// List the preset palette.
    Presets,
}

#[derive(Args)]
struct ColorSetArgs {
    #[arg(help = "Hex, rgb(), rgba(), hsl() or hsla() color")]
    value: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for ThemeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Light => Self::Light,
            ModeArg::Dark => Self::Dark,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Json,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Json => Self::Json,
            LogFormatArg::Pretty => Self::Pretty,
        }
    }
}

fn parse_font_family(value: &str) -> Result<FontFamily, String> {
    value
        .parse::<FontFamily>()
        .map_err(|_| format!("unknown font family '{value}' (expected sans, serif or mono)"))
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Show => "show",
        Command::Panel(_) => "panel",
        Command::Sections(SectionsCommand::Reorder(_)) => "sections_reorder",
        Command::Sections(SectionsCommand::Toggle(_)) => "sections_toggle",
        Command::Sections(SectionsCommand::Activate(_)) => "sections_activate",
        Command::Sections(SectionsCommand::Move(_)) => "sections_move",
        Command::Settings(SettingsCommand::Set(_)) => "settings_set",
        Command::Color(ColorCommand::Set(_)) => "color_set",
        Command::Color(ColorCommand::Presets) => "color_presets",
    }
}
