//! In-memory stand-ins for store collaborators.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use resumekit_settings::{
    AppliedSettings, ColorTheme, GlobalSettingsPatch, ResumeStore, Section, SettingsCommands,
    SettingsDocument, SettingsError, SettingsPersistence, SettingsResult, SettingsSnapshot,
    StoreOptions,
};

/// Persistence backend that keeps the last saved document in memory.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    stored: Mutex<Option<SettingsDocument>>,
    saves: AtomicUsize,
    fail_saves: bool,
}

impl MemoryPersistence {
    /// Backend pre-loaded with `document`.
    #[must_use]
    pub fn with_document(document: SettingsDocument) -> Self {
        Self {
            stored: Mutex::new(Some(document)),
            ..Self::default()
        }
    }

    /// Backend whose saves always fail with an I/O error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Last successfully saved document.
    #[must_use]
    pub fn stored(&self) -> Option<SettingsDocument> {
        self.stored.lock().ok().and_then(|guard| guard.clone())
    }

    /// Number of save attempts.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsPersistence for MemoryPersistence {
    async fn load(&self) -> SettingsResult<Option<SettingsDocument>> {
        Ok(self.stored())
    }

    async fn save(&self, document: &SettingsDocument) -> SettingsResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(SettingsError::Io {
                operation: "memory.save",
                source: std::io::Error::other("save disabled"),
            });
        }
        if let Ok(mut guard) = self.stored.lock() {
            *guard = Some(document.clone());
        }
        Ok(())
    }
}

/// Command sink that forwards to a real store and records each call.
#[derive(Debug)]
pub struct RecordingCommands {
    store: ResumeStore,
    calls: Mutex<Vec<String>>,
}

impl Default for RecordingCommands {
    fn default() -> Self {
        Self::new(ResumeStore::new(&StoreOptions::default()))
    }
}

impl RecordingCommands {
    /// Wrap `store`.
    #[must_use]
    pub fn new(store: ResumeStore) -> Self {
        Self {
            store,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Underlying store.
    #[must_use]
    pub fn store(&self) -> &ResumeStore {
        &self.store
    }

    /// Calls received so far, formatted as `command(argument)`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(call);
        }
    }
}

impl SettingsCommands for RecordingCommands {
    fn snapshot(&self) -> SettingsSnapshot {
        self.store.snapshot()
    }

    fn reorder_sections(&self, new_order: &[Section]) -> SettingsResult<()> {
        let ids: Vec<&str> = new_order.iter().map(|s| s.id.as_str()).collect();
        self.record(format!("reorder_sections({})", ids.join(",")));
        self.store.reorder_sections(new_order)
    }

    fn toggle_section_visibility(&self, id: &str) -> SettingsResult<bool> {
        self.record(format!("toggle_section_visibility({id})"));
        self.store.toggle_section_visibility(id)
    }

    fn set_active_section(&self, id: &str) -> SettingsResult<()> {
        self.record(format!("set_active_section({id})"));
        self.store.set_active_section(id)
    }

    fn update_global_settings(&self, patch: GlobalSettingsPatch) -> SettingsResult<AppliedSettings> {
        self.record(format!("update_global_settings({patch:?})"));
        self.store.update_global_settings(patch)
    }

    fn set_color_theme(&self, value: &str) -> SettingsResult<ColorTheme> {
        self.record(format!("set_color_theme({value})"));
        self.store.set_color_theme(value)
    }
}
