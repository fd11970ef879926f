//! Command handlers grouped by concern.

pub(crate) mod color;
pub(crate) mod sections;
pub(crate) mod settings;
pub(crate) mod view;
