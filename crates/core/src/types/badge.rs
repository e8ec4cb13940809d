//! Badge records and their appearance enums.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::BadgeId;

/// Errors that can occur when parsing a [`BadgeColor`] or [`BadgeStyle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBadgeError {
    /// The input does not name a known color.
    #[error("unknown badge color: {0}")]
    UnknownColor(String),
    /// The input does not name a known style.
    #[error("unknown badge style: {0}")]
    UnknownStyle(String),
}

/// The closed set of colors a badge segment can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Simple,
    Slate,
    Seabed,
    Subterranean,
    Savannah,
    Sahara,
    Sunset,
}

impl BadgeColor {
    /// Every color, in palette order.
    pub const ALL: [Self; 7] = [
        Self::Simple,
        Self::Slate,
        Self::Seabed,
        Self::Subterranean,
        Self::Savannah,
        Self::Sahara,
        Self::Sunset,
    ];

    /// The display color used when painting a segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use maintained_core::BadgeColor;
    ///
    /// assert_eq!(BadgeColor::Savannah.hex(), "#AB2");
    /// ```
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Simple => "#555",
            Self::Slate => "#556",
            Self::Seabed => "#013",
            Self::Subterranean => "#111",
            Self::Savannah => "#AB2",
            Self::Sahara => "#F80",
            Self::Sunset => "#F20",
        }
    }

    /// Lowercase name, as used in JSON and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Slate => "slate",
            Self::Seabed => "seabed",
            Self::Subterranean => "subterranean",
            Self::Savannah => "savannah",
            Self::Sahara => "sahara",
            Self::Sunset => "sunset",
        }
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BadgeColor {
    type Err = ParseBadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseBadgeError::UnknownColor(s.to_string()))
    }
}

/// Rendering variant of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    /// Gradient overlay with rounded corners.
    #[default]
    Plastic,
    /// Solid rectangles with square corners.
    Flat,
}

impl fmt::Display for BadgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plastic => write!(f, "plastic"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for BadgeStyle {
    type Err = ParseBadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plastic" => Ok(Self::Plastic),
            "flat" => Ok(Self::Flat),
            _ => Err(ParseBadgeError::UnknownStyle(s.to_string())),
        }
    }
}

/// A badge as persisted inside a project.
///
/// Widths are stored alongside the text so an edit to one half does not
/// require re-measuring the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Unique within the owning project.
    pub id: BadgeId,
    /// Left-hand label.
    pub title: String,
    /// Width of the left segment in pixels.
    pub title_width: f64,
    pub title_color: BadgeColor,
    /// Right-hand text, shown unless the badge is mono.
    pub value: String,
    /// Width of the right segment in pixels.
    pub value_width: f64,
    /// URL whose body replaces `value` at render time.
    #[serde(default)]
    pub value_source: Option<String>,
    pub value_color: BadgeColor,
    pub style: BadgeStyle,
    /// Single-segment badge showing only the title.
    #[serde(default)]
    pub is_mono: bool,
}

impl Badge {
    /// Create a two-segment plastic badge in the default slate/savannah colors.
    #[must_use]
    pub fn new(
        id: BadgeId,
        title: impl Into<String>,
        title_width: f64,
        value: impl Into<String>,
        value_width: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            title_width,
            title_color: BadgeColor::Slate,
            value: value.into(),
            value_width,
            value_source: None,
            value_color: BadgeColor::Savannah,
            style: BadgeStyle::Plastic,
            is_mono: false,
        }
    }

    /// Apply an appearance change wholesale.
    ///
    /// An empty `value_source` clears the live value source.
    pub fn apply_appearance(&mut self, appearance: BadgeAppearance) {
        self.title_color = appearance.title_color;
        self.value_color = appearance.value_color;
        self.style = appearance.style;
        self.is_mono = appearance.is_mono;
        self.value_source = appearance
            .value_source
            .filter(|source| !source.trim().is_empty());
    }
}

/// The non-text settings of a badge, edited together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeAppearance {
    pub title_color: BadgeColor,
    pub value_color: BadgeColor,
    #[serde(default)]
    pub style: BadgeStyle,
    #[serde(default)]
    pub value_source: Option<String>,
    #[serde(default)]
    pub is_mono: bool,
}
