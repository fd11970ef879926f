//! CSS color validation for the accent color theme.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

static CHANNEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:e[+-]?\d+)?(?:%|deg|grad|rad|turn)?$")
        .expect("color channel pattern compiles")
});

/// CSS named colors, sorted for binary search.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "transparent", "turquoise",
    "violet", "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

/// Functions whose arguments may use the legacy comma-separated syntax.
const LEGACY_FUNCTIONS: &[&str] = &["hsl", "hsla", "rgb", "rgba"];

/// Functions accepting the space-separated syntax with an optional `/ alpha`.
const MODERN_FUNCTIONS: &[&str] = &[
    "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "rgb", "rgba",
];

/// Active accent color: a validated, normalised CSS color string.
///
/// Accepted forms are `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, the CSS named
/// colors (plus `transparent`), comma-separated `rgb()`/`rgba()`/`hsl()`/
/// `hsla()`, and the space-separated `/ alpha` syntax of those functions and
/// of `hwb()`, `lab()`, `lch()`, `oklab()` and `oklch()`. Values are trimmed
/// and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorTheme(String);

impl ColorTheme {
    /// Validate and normalise a color string.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidColor`] for anything that is not one
    /// of the accepted notations.
    pub fn parse(value: &str) -> SettingsResult<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if is_hex_color(&normalized)
            || NAMED_COLORS.binary_search(&normalized.as_str()).is_ok()
            || is_functional_color(&normalized)
        {
            Ok(Self(normalized))
        } else {
            Err(SettingsError::InvalidColor {
                value: value.to_string(),
            })
        }
    }

    /// Wrap a compile-time constant known to be a lowercase hex color.
    pub(crate) fn trusted(value: &'static str) -> Self {
        Self(value.to_string())
    }

    /// Borrow the normalised color string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
    })
}

fn is_functional_color(value: &str) -> bool {
    let Some((name, rest)) = value.split_once('(') else {
        return false;
    };
    let Some(arguments) = rest.strip_suffix(')') else {
        return false;
    };
    if arguments.contains(['(', ')']) {
        return false;
    }
    let name = name.trim_end();
    if arguments.contains(',') {
        LEGACY_FUNCTIONS.contains(&name) && is_legacy_arguments(arguments)
    } else {
        MODERN_FUNCTIONS.contains(&name) && is_modern_arguments(arguments)
    }
}

fn is_legacy_arguments(arguments: &str) -> bool {
    let channels: Vec<&str> = arguments.split(',').map(str::trim).collect();
    matches!(channels.len(), 3 | 4) && channels.iter().all(|channel| CHANNEL.is_match(channel))
}

fn is_modern_arguments(arguments: &str) -> bool {
    let (channels, alpha) = match arguments.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (arguments, None),
    };
    let channels: Vec<&str> = channels.split_whitespace().collect();
    let modern_channel = |token: &str| token == "none" || CHANNEL.is_match(token);
    channels.len() == 3
        && channels.iter().copied().all(modern_channel)
        && alpha.is_none_or(modern_channel)
}

impl FromStr for ColorTheme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorTheme {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorTheme> for String {
    fn from(color: ColorTheme) -> Self {
        color.0
    }
}

impl Display for ColorTheme {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
