//! Segment geometry for a badge.

use maintained_core::Badge;

/// Approximate advance of one character at the badge font size.
const CHAR_WIDTH: f64 = 5.2;
/// Horizontal padding around a segment's text.
const SEGMENT_PADDING: f64 = 30.0;

/// Estimate the segment width needed to show `text`.
#[must_use]
// Unfused multiply-add keeps widths bit-identical to previously rendered badges.
#[allow(clippy::suboptimal_flops)]
pub fn estimate_text_width(text: &str) -> f64 {
    // Badge text is short; the count always fits an f64 exactly.
    #[allow(clippy::cast_precision_loss)]
    let chars = text.chars().count() as f64;
    chars * CHAR_WIDTH + SEGMENT_PADDING
}

/// Computed widths and text anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeLayout {
    /// Width of the title segment.
    pub title_width: f64,
    /// Width of the value segment; `None` for mono badges.
    pub value_width: Option<f64>,
}

impl BadgeLayout {
    /// Lay out a badge, with the live value when one was fetched.
    ///
    /// A live value sizes the value segment from its own text; otherwise the
    /// persisted width is used.
    #[must_use]
    pub fn new(badge: &Badge, live_value: Option<&str>) -> Self {
        let value_width = if badge.is_mono {
            None
        } else {
            Some(live_value.map_or(badge.value_width, estimate_text_width))
        };

        Self {
            title_width: badge.title_width,
            value_width,
        }
    }

    /// Overall image width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.title_width + self.value_width.unwrap_or(0.0)
    }

    /// Horizontal center of the title text.
    #[must_use]
    pub fn title_x(&self) -> f64 {
        self.title_width / 2.0
    }

    /// Horizontal center of the value text.
    #[must_use]
    pub fn value_x(&self) -> f64 {
        self.title_width + self.value_width.unwrap_or(0.0) / 2.0
    }
}
