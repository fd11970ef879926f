#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

//! Settings side panel for the resume editor.
//!
//! The panel is a pure projection of a [`resumekit_settings::SettingsSnapshot`]
//! into a [`PanelView`] tree plus a mapping from user gestures to store
//! commands. It owns no settings state of its own.
//!
//! Layout: `theme.rs` (light/dark mode and tones), `view.rs` (view tree and
//! `render_panel`), `gesture.rs` (gesture → command mapping), `controller.rs`
//! (dispatch to a `SettingsCommands` implementation), `error.rs`.

pub mod controller;
pub mod error;
pub mod gesture;
pub mod theme;
pub mod view;

pub use controller::{CommandOutcome, PanelController};
pub use error::{PanelError, PanelResult};
pub use gesture::{Gesture, PanelCommand, command_for_gesture};
pub use theme::{ThemeMode, Tone};
pub use view::{
    Card, CardBody, CardKind, CustomColorInput, PanelView, SWATCHES_PER_ROW, SectionRow, Select,
    SelectField, SelectOption, Slider, SliderField, SpacingCard, Swatch, ThemeColorCard,
    TypographyCard, VisibilityGlyph, render_panel,
};
