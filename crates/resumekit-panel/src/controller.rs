//! Dispatches panel commands to a [`SettingsCommands`] implementation.
//!
//! Preset swatches apply immediately; the custom color input goes through a
//! [`ColorDebouncer`] so dragging a picker does not flood the store.

use std::sync::Arc;
use std::time::Duration;

use resumekit_settings::{
    AppliedSettings, ColorDebouncer, ColorTheme, ResumeStore, Section, SectionId,
    SettingsCommands, StoreOptions,
};
use tracing::{debug, warn};

use crate::error::PanelResult;
use crate::gesture::{Gesture, PanelCommand, command_for_gesture};
use crate::theme::ThemeMode;
use crate::view::{PanelView, render_panel};

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Sections now follow the requested order.
    Reordered,
    /// New visibility of the toggled section.
    Visibility(bool),
    /// Section now focused.
    ActiveSection(SectionId),
    /// Settings after the merge.
    Settings(AppliedSettings),
    /// Color now active.
    Color(ColorTheme),
    /// Custom color queued behind the debounce window.
    ColorQueued,
}

/// Binds the panel to a settings store.
pub struct PanelController {
    commands: Arc<dyn SettingsCommands>,
    palette: Vec<ColorTheme>,
    mode: ThemeMode,
    debouncer: ColorDebouncer,
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PanelController")
            .field("palette", &self.palette.len())
            .field("mode", &self.mode)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl PanelController {
    /// Create a controller over `commands`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, which drives the color
    /// debouncer.
    #[must_use]
    pub fn new(
        commands: Arc<dyn SettingsCommands>,
        palette: Vec<ColorTheme>,
        color_debounce: Duration,
    ) -> Self {
        let debouncer = ColorDebouncer::spawn(Arc::clone(&commands), color_debounce);
        Self {
            commands,
            palette,
            mode: ThemeMode::default(),
            debouncer,
        }
    }

    /// Controller bound to `store`, using its palette and the configured
    /// debounce window.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn for_store(store: &ResumeStore, options: &StoreOptions) -> Self {
        Self::new(
            Arc::new(store.clone()),
            store.palette().to_vec(),
            options.color_debounce,
        )
    }

    /// Current theme mode.
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Switch the theme mode used for rendering.
    pub const fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    /// Render the panel for the current store state.
    #[must_use]
    pub fn render(&self) -> PanelView {
        render_panel(&self.commands.snapshot(), &self.palette, self.mode)
    }

    /// Handle a user gesture end to end.
    ///
    /// # Errors
    ///
    /// Returns an error when the gesture is malformed or the store rejects
    /// the resulting command.
    pub fn handle(&self, gesture: &Gesture) -> PanelResult<CommandOutcome> {
        let command = command_for_gesture(gesture).inspect_err(|err| {
            warn!(error = %err, "panel gesture rejected");
        })?;
        self.dispatch(command)
    }

    /// Issue a command against the store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PanelError::Settings`] when the store rejects the
    /// command.
    pub fn dispatch(&self, command: PanelCommand) -> PanelResult<CommandOutcome> {
        debug!(command = command.name(), "dispatching panel command");
        let outcome = match command {
            PanelCommand::ReorderSections(order) => {
                let sections = self.sections_in_order(&order);
                self.commands.reorder_sections(&sections)?;
                CommandOutcome::Reordered
            }
            PanelCommand::ToggleSectionVisibility(id) => {
                CommandOutcome::Visibility(self.commands.toggle_section_visibility(id.as_str())?)
            }
            PanelCommand::SetActiveSection(id) => {
                self.commands.set_active_section(id.as_str())?;
                CommandOutcome::ActiveSection(id)
            }
            PanelCommand::UpdateGlobalSettings(patch) => {
                CommandOutcome::Settings(self.commands.update_global_settings(patch)?)
            }
            PanelCommand::SetColorTheme {
                value,
                debounced: true,
            } => {
                self.debouncer.submit(value);
                CommandOutcome::ColorQueued
            }
            PanelCommand::SetColorTheme {
                value,
                debounced: false,
            } => {
                self.debouncer.cancel();
                CommandOutcome::Color(self.commands.set_color_theme(&value)?)
            }
        };
        Ok(outcome)
    }

    /// Apply any queued custom color now.
    ///
    /// Returns `None` when nothing was queued.
    pub async fn flush(&self) -> Option<PanelResult<ColorTheme>> {
        self.debouncer
            .flush()
            .await
            .map(|result| result.map_err(Into::into))
    }

    /// Apply pending input and stop the debouncer.
    pub async fn shutdown(self) {
        self.debouncer.shutdown().await;
    }

    /// Stored sections in the requested order; unknown ids become bare
    /// placeholders so the store reports them.
    fn sections_in_order(&self, order: &[SectionId]) -> Vec<Section> {
        let snapshot = self.commands.snapshot();
        order
            .iter()
            .map(|id| {
                snapshot.section(id.as_str()).cloned().unwrap_or_else(|| {
                    Section::new(id.clone(), id.as_str(), "")
                })
            })
            .collect()
    }
}
