//! Resume settings store: the single owner of section, typography and color
//! state.
//!
//! # Design
//! - State lives inside a `tokio::sync::watch` sender; every command mutates
//!   it through `send_if_modified`, so readers always observe a consistent
//!   snapshot and are woken only by effective changes.
//! - Each applied change bumps the revision and publishes a typed event on
//!   the [`EventBus`].
//! - Rejected commands leave the state untouched and log a warning.

use std::sync::Arc;

use resumekit_events::{EventBus, SettingsEvent};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::color::ColorTheme;
use crate::error::{SettingsError, SettingsResult};
use crate::model::{
    AppliedSettings, GlobalSettingsPatch, Section, SectionId, SettingsDocument, SettingsSnapshot,
};
use crate::options::StoreOptions;
use crate::validate::{check_permutation, check_unique_ids, merge_patch, sanitize_settings};

/// Command and query contract of the settings store.
///
/// Views depend on this trait rather than on [`ResumeStore`] so they stay a
/// pure projection of whatever implements it.
pub trait SettingsCommands: Send + Sync {
    /// Current state.
    fn snapshot(&self) -> SettingsSnapshot;

    /// Replace the section order. Only the ids of `new_order` are used.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidPermutation`] when `new_order` is not a
    /// permutation of the current ids.
    fn reorder_sections(&self, new_order: &[Section]) -> SettingsResult<()>;

    /// Flip the visibility of a section and return the new value.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnknownSection`] when no section has that id.
    fn toggle_section_visibility(&self, id: &str) -> SettingsResult<bool>;

    /// Record the section focused for editing.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnknownSection`] when no section has that id.
    fn set_active_section(&self, id: &str) -> SettingsResult<()>;

    /// Merge a partial settings update.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidField`] when any field is outside its domain
    /// and cannot be clamped; nothing is applied in that case.
    fn update_global_settings(&self, patch: GlobalSettingsPatch) -> SettingsResult<AppliedSettings>;

    /// Replace the accent color with a preset or custom value.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidColor`] when `value` is not a CSS color.
    fn set_color_theme(&self, value: &str) -> SettingsResult<ColorTheme>;
}

enum Mutation<T> {
    Changed(T, SettingsEvent),
    Unchanged(T),
}

struct StoreInner {
    state: watch::Sender<SettingsSnapshot>,
    events: EventBus,
    palette: Vec<ColorTheme>,
}

/// Session-scoped settings store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ResumeStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for ResumeStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ResumeStore")
            .field("revision", &self.inner.state.borrow().revision)
            .field("palette", &self.inner.palette.len())
            .finish_non_exhaustive()
    }
}

impl ResumeStore {
    /// Build a store holding the default document.
    #[must_use]
    pub fn new(options: &StoreOptions) -> Self {
        let document = SettingsDocument::default();
        let snapshot = SettingsSnapshot {
            revision: 0,
            sections: document.sections,
            active_section: document.active_section,
            global_settings: document.global_settings,
            color_theme: document.color_theme,
        };
        let (state, _) = watch::channel(snapshot);
        Self {
            inner: Arc::new(StoreInner {
                state,
                events: EventBus::new(),
                palette: options.palette.clone(),
            }),
        }
    }

    /// Build a store and load `document` into it.
    ///
    /// # Errors
    ///
    /// Propagates validation failures from [`ResumeStore::load_document`].
    pub fn with_document(document: SettingsDocument, options: &StoreOptions) -> SettingsResult<Self> {
        let store = Self::new(options);
        store.load_document(document)?;
        Ok(store)
    }

    /// Replace the whole state with a document, e.g. one read from disk.
    ///
    /// Section ids must be unique; numeric settings are clamped like patches;
    /// an active section that does not exist falls back to the first section.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the document cannot be normalised.
    pub fn load_document(&self, document: SettingsDocument) -> SettingsResult<()> {
        check_unique_ids(&document.sections)?;
        let global_settings = sanitize_settings(&document.global_settings)?;
        let active_section = document
            .active_section
            .filter(|id| document.sections.iter().any(|section| &section.id == id))
            .or_else(|| document.sections.first().map(|section| section.id.clone()));
        let section_count = document.sections.len();

        self.apply("load_document", move |state| {
            state.sections = document.sections;
            state.active_section = active_section;
            state.global_settings = global_settings;
            state.color_theme = document.color_theme;
            Ok(Mutation::Changed(
                (),
                SettingsEvent::DocumentLoaded { section_count },
            ))
        })
    }

    /// Persistable form of the current state.
    #[must_use]
    pub fn document(&self) -> SettingsDocument {
        SettingsDocument::from(&*self.inner.state.borrow())
    }

    /// Subscribe to snapshot updates (latest value wins).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SettingsSnapshot> {
        self.inner.state.subscribe()
    }

    /// Event bus carrying typed change notifications.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Preset palette configured for this store.
    #[must_use]
    pub fn palette(&self) -> &[ColorTheme] {
        &self.inner.palette
    }

    /// Whether `color` belongs to the preset palette.
    #[must_use]
    pub fn is_preset(&self, color: &ColorTheme) -> bool {
        self.inner.palette.contains(color)
    }

    /// Reorder sections by id.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidPermutation`] when `order` is not a
    /// permutation of the current ids.
    pub fn reorder_section_ids(&self, order: &[SectionId]) -> SettingsResult<()> {
        self.apply("reorder_sections", |state| {
            check_permutation(&state.sections, order)?;
            if state
                .sections
                .iter()
                .map(|section| &section.id)
                .eq(order.iter())
            {
                return Ok(Mutation::Unchanged(()));
            }

            let mut remaining = std::mem::take(&mut state.sections);
            let mut reordered = Vec::with_capacity(remaining.len());
            for id in order {
                if let Some(position) = remaining.iter().position(|section| &section.id == id) {
                    reordered.push(remaining.swap_remove(position));
                }
            }
            state.sections = reordered;
            Ok(Mutation::Changed(
                (),
                SettingsEvent::SectionsReordered {
                    order: order.iter().map(ToString::to_string).collect(),
                },
            ))
        })
    }

    /// Move one section to `to_index`, clamped to the last position.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnknownSection`] when no section has that id.
    pub fn move_section(&self, id: &str, to_index: usize) -> SettingsResult<()> {
        self.apply("move_section", |state| {
            let from = position_of(&state.sections, id)?;
            let to = to_index.min(state.sections.len().saturating_sub(1));
            if from == to {
                return Ok(Mutation::Unchanged(()));
            }
            let section = state.sections.remove(from);
            state.sections.insert(to, section);
            Ok(Mutation::Changed(
                (),
                SettingsEvent::SectionsReordered {
                    order: state.sections.iter().map(|s| s.id.to_string()).collect(),
                },
            ))
        })
    }

    fn apply<T>(
        &self,
        command: &'static str,
        mutation: impl FnOnce(&mut SettingsSnapshot) -> SettingsResult<Mutation<T>>,
    ) -> SettingsResult<T> {
        let mut outcome = None;
        self.inner.state.send_if_modified(|state| {
            let result = mutation(state);
            let changed = matches!(result, Ok(Mutation::Changed(..)));
            if changed {
                state.revision += 1;
            }
            outcome = Some((result, state.revision));
            changed
        });

        let Some((result, revision)) = outcome else {
            unreachable!("send_if_modified always runs its closure");
        };

        match result {
            Ok(Mutation::Changed(value, event)) => {
                debug!(command, revision, kind = event.kind(), "settings command applied");
                let _ = self.inner.events.publish(revision, event);
                Ok(value)
            }
            Ok(Mutation::Unchanged(value)) => {
                debug!(command, revision, "settings command left state unchanged");
                Ok(value)
            }
            Err(err) => {
                warn!(command, error = %err, "settings command rejected");
                Err(err)
            }
        }
    }
}

impl SettingsCommands for ResumeStore {
    fn snapshot(&self) -> SettingsSnapshot {
        self.inner.state.borrow().clone()
    }

    fn reorder_sections(&self, new_order: &[Section]) -> SettingsResult<()> {
        let ids: Vec<SectionId> = new_order.iter().map(|section| section.id.clone()).collect();
        self.reorder_section_ids(&ids)
    }

    fn toggle_section_visibility(&self, id: &str) -> SettingsResult<bool> {
        self.apply("toggle_section_visibility", |state| {
            let index = position_of(&state.sections, id)?;
            let section = &mut state.sections[index];
            section.enabled = !section.enabled;
            Ok(Mutation::Changed(
                section.enabled,
                SettingsEvent::SectionVisibilityChanged {
                    section_id: section.id.to_string(),
                    enabled: section.enabled,
                },
            ))
        })
    }

    fn set_active_section(&self, id: &str) -> SettingsResult<()> {
        self.apply("set_active_section", |state| {
            let index = position_of(&state.sections, id)?;
            let section_id = state.sections[index].id.clone();
            if state.active_section.as_ref() == Some(&section_id) {
                return Ok(Mutation::Unchanged(()));
            }
            state.active_section = Some(section_id.clone());
            Ok(Mutation::Changed(
                (),
                SettingsEvent::ActiveSectionChanged {
                    section_id: section_id.to_string(),
                },
            ))
        })
    }

    fn update_global_settings(&self, patch: GlobalSettingsPatch) -> SettingsResult<AppliedSettings> {
        self.apply("update_global_settings", |state| {
            let applied = merge_patch(&state.global_settings, &patch)?;
            if applied.changed.is_empty() {
                return Ok(Mutation::Unchanged(applied));
            }
            state.global_settings = applied.settings.clone();
            let fields = applied.changed.iter().map(ToString::to_string).collect();
            Ok(Mutation::Changed(
                applied,
                SettingsEvent::GlobalSettingsUpdated { fields },
            ))
        })
    }

    fn set_color_theme(&self, value: &str) -> SettingsResult<ColorTheme> {
        let parsed = ColorTheme::parse(value);
        let preset = parsed.as_ref().is_ok_and(|color| self.is_preset(color));
        self.apply("set_color_theme", move |state| {
            let color = parsed?;
            if state.color_theme == color {
                return Ok(Mutation::Unchanged(color));
            }
            state.color_theme = color.clone();
            Ok(Mutation::Changed(
                color.clone(),
                SettingsEvent::ColorThemeChanged {
                    color: color.to_string(),
                    preset,
                },
            ))
        })
    }
}

fn position_of(sections: &[Section], id: &str) -> SettingsResult<usize> {
    sections
        .iter()
        .position(|section| section.id.as_str() == id)
        .ok_or_else(|| SettingsError::UnknownSection { id: id.to_string() })
}
