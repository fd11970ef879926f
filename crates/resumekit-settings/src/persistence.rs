//! Persistence collaborator: storing settings documents beyond a session.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::color::ColorTheme;
use crate::error::{SettingsError, SettingsResult};
use crate::model::{
    GlobalSettings, GlobalSettingsPatch, Section, SectionId, SettingsDocument, SettingsSnapshot,
};
use crate::validate::merge_patch;

/// Storage backend for settings documents.
#[async_trait]
pub trait SettingsPersistence: Send + Sync {
    /// Load the stored document, or `None` when nothing was saved yet.
    async fn load(&self) -> SettingsResult<Option<SettingsDocument>>;

    /// Store `document`, replacing any previous version.
    async fn save(&self, document: &SettingsDocument) -> SettingsResult<()>;
}

/// On-disk shape of a settings document with numeric fields and the color
/// left raw, so out-of-domain values surface as validation errors instead of
/// decode failures.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    sections: Vec<Section>,
    #[serde(default)]
    active_section: Option<SectionId>,
    #[serde(default)]
    global_settings: GlobalSettingsPatch,
    color_theme: String,
}

impl TryFrom<StoredDocument> for SettingsDocument {
    type Error = SettingsError;

    fn try_from(stored: StoredDocument) -> SettingsResult<Self> {
        let global_settings =
            merge_patch(&GlobalSettings::default(), &stored.global_settings)?.settings;
        Ok(Self {
            sections: stored.sections,
            active_section: stored.active_section,
            global_settings,
            color_theme: ColorTheme::parse(&stored.color_theme)?,
        })
    }
}

/// Pretty-printed JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Persist to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsPersistence for JsonFilePersistence {
    async fn load(&self) -> SettingsResult<Option<SettingsDocument>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings document on disk");
                return Ok(None);
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    operation: "settings.read",
                    source,
                });
            }
        };

        let stored: StoredDocument =
            serde_json::from_slice(&bytes).map_err(|source| SettingsError::Serialization {
                operation: "decode",
                source,
            })?;
        SettingsDocument::try_from(stored).map(Some)
    }

    async fn save(&self, document: &SettingsDocument) -> SettingsResult<()> {
        let payload =
            serde_json::to_vec_pretty(document).map_err(|source| SettingsError::Serialization {
                operation: "encode",
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| SettingsError::Io {
                    operation: "settings.create_dir",
                    source,
                })?;
        }

        let staging = self.staging_path();
        fs::write(&staging, payload)
            .await
            .map_err(|source| SettingsError::Io {
                operation: "settings.write",
                source,
            })?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| SettingsError::Io {
                operation: "settings.rename",
                source,
            })?;
        debug!(path = %self.path.display(), "settings document saved");
        Ok(())
    }
}

/// Save the document every time the store publishes a new snapshot.
///
/// Bursts of changes coalesce: only the latest snapshot is written. The task
/// ends once every store handle has been dropped.
#[must_use]
pub fn spawn_autosave(
    mut updates: watch::Receiver<SettingsSnapshot>,
    persistence: Arc<dyn SettingsPersistence>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let (revision, document) = {
                let snapshot = updates.borrow_and_update();
                (snapshot.revision, SettingsDocument::from(&*snapshot))
            };
            match persistence.save(&document).await {
                Ok(()) => debug!(revision, "autosaved settings"),
                Err(err) => warn!(revision, error = %err, "autosave failed"),
            }
        }
        info!("settings store closed; autosave stopped");
    })
}
