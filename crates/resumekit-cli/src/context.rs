//! Document session and error types shared by command handlers.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use resumekit_panel::PanelError;
use resumekit_settings::{
    JsonFilePersistence, ResumeStore, SettingsError, SettingsPersistence, StoreOptions,
};
use tracing::{debug, info};

use crate::cli::OutputFormat;

/// Document used when neither `--document` nor `RESUMEKIT_DOCUMENT` is set.
pub(crate) const DEFAULT_DOCUMENT: &str = "resume-settings.json";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        if !err.is_validation() {
            return Self::Failure(err.into());
        }
        let mut message = err.to_string();
        if let SettingsError::InvalidPermutation {
            missing,
            unexpected,
            duplicates,
        } = &err
        {
            for (label, ids) in [
                ("missing", missing),
                ("unknown", unexpected),
                ("duplicated", duplicates),
            ] {
                if !ids.is_empty() {
                    message.push_str(&format!("; {label}: {}", ids.join(", ")));
                }
            }
        }
        Self::Validation(message)
    }
}

impl From<PanelError> for CliError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::Settings(inner) => inner.into(),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// Loaded settings document plus the options it was opened with.
pub(crate) struct AppContext {
    pub(crate) store: ResumeStore,
    pub(crate) options: StoreOptions,
    pub(crate) output: OutputFormat,
    persistence: JsonFilePersistence,
}

impl AppContext {
    /// Open the document at `path`, starting from defaults when it does not
    /// exist yet.
    pub(crate) async fn open(
        path: Option<PathBuf>,
        options: StoreOptions,
        output: OutputFormat,
    ) -> CliResult<Self> {
        let path = path
            .or_else(|| options.document_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT));
        let persistence = JsonFilePersistence::new(path);

        let loaded = match persistence.load().await {
            Ok(loaded) => loaded,
            Err(err) if err.is_validation() => return Err(err.into()),
            Err(err) => {
                return Err(CliError::failure(anyhow!(
                    "failed to read {}: {err}",
                    persistence.path().display()
                )));
            }
        };
        let store = match loaded {
            Some(document) => ResumeStore::with_document(document, &options)?,
            None => {
                info!(path = %persistence.path().display(), "starting from default settings");
                ResumeStore::new(&options)
            }
        };

        Ok(Self {
            store,
            options,
            output,
            persistence,
        })
    }

    pub(crate) fn document_path(&self) -> &Path {
        self.persistence.path()
    }

    /// Write the current document back to disk.
    pub(crate) async fn save(&self) -> CliResult<()> {
        self.persistence
            .save(&self.store.document())
            .await
            .map_err(|err| {
                CliError::failure(anyhow!(
                    "failed to write {}: {err}",
                    self.document_path().display()
                ))
            })?;
        debug!(path = %self.document_path().display(), "document saved");
        Ok(())
    }
}
