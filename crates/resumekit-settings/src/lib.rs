#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

//! Session-scoped settings store for the resume editor.
//!
//! Layout: `model.rs` (sections, typography, snapshots and documents),
//! `validate.rs` (permutation and numeric domain checks), `color.rs` (CSS
//! color parsing), `store.rs` (`ResumeStore` + `SettingsCommands`),
//! `debounce.rs` (custom color throttling), `persistence.rs` (JSON document
//! storage and autosave), `options.rs` (environment-driven configuration).

pub mod color;
pub mod debounce;
pub mod defaults;
pub mod error;
pub mod model;
pub mod options;
pub mod persistence;
pub mod store;
mod validate;

pub use color::ColorTheme;
pub use debounce::{ColorDebouncer, Debouncer};
pub use defaults::{
    COLOR_DEBOUNCE, DEFAULT_COLOR, DEFAULT_SECTIONS, FRACTIONAL_STEP, LINE_HEIGHT_RANGE,
    PARAGRAPH_SPACING_RANGE, SPACING_RANGE, THEME_COLORS,
};
pub use error::{SettingsError, SettingsResult};
pub use model::{
    AppliedSettings, FontFamily, FontSize, GlobalSettings, GlobalSettingsPatch, Section,
    SectionIcon, SectionId, SettingsDocument, SettingsSnapshot, default_sections,
};
pub use options::{
    ENV_COLOR_DEBOUNCE_MS, ENV_DOCUMENT, ENV_PALETTE, StoreOptions, parse_palette,
};
pub use persistence::{JsonFilePersistence, SettingsPersistence, spawn_autosave};
pub use store::{ResumeStore, SettingsCommands};
