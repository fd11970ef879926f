//! Light/dark mode supplied by the host and the tones derived from it.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Theme mode of the surrounding editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light surfaces.
    #[default]
    Light,
    /// Dark surfaces.
    Dark,
}

impl ThemeMode {
    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = PanelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(PanelError::InvalidGesture {
                control: "theme_mode",
                value: value.to_string(),
                reason: "expected light or dark",
            }),
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Visual tone of a panel node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Regular surface in light mode.
    LightSurface,
    /// Regular surface in dark mode.
    DarkSurface,
    /// De-emphasised content in light mode.
    LightMuted,
    /// De-emphasised content in dark mode.
    DarkMuted,
}

impl Tone {
    /// Regular tone for `mode`.
    #[must_use]
    pub const fn surface(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LightSurface,
            ThemeMode::Dark => Self::DarkSurface,
        }
    }

    /// Muted tone for `mode`.
    #[must_use]
    pub const fn muted(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LightMuted,
            ThemeMode::Dark => Self::DarkMuted,
        }
    }

    /// Whether the tone de-emphasises its node.
    #[must_use]
    pub const fn is_muted(self) -> bool {
        matches!(self, Self::LightMuted | Self::DarkMuted)
    }

    /// Mode the tone belongs to.
    #[must_use]
    pub const fn mode(self) -> ThemeMode {
        match self {
            Self::LightSurface | Self::LightMuted => ThemeMode::Light,
            Self::DarkSurface | Self::DarkMuted => ThemeMode::Dark,
        }
    }
}
