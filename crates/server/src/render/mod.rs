//! Badge rendering: a [`Badge`] in, an SVG document out.
//!
//! # Layout
//!
//! A badge is one or two 20px high segments. The title segment is
//! `title_width` wide and painted with the title color; unless the badge is
//! mono, the value segment follows it, painted with the value color. Every
//! label is drawn twice, a faint dark copy at `y=15` under the white text at
//! `y=14`, each centered in its segment.
//!
//! # Styles
//!
//! - **Plastic** - rounded corners and a light-to-transparent gradient overlay
//! - **Flat** - square, solid segments
//!
//! # Live values
//!
//! When a non-mono badge has a `value_source`, [`BadgeRenderer::render`]
//! fetches it once (bounded by a timeout) and shows the fetched text instead
//! of the stored value, sizing the value segment with
//! [`estimate_text_width`]. Any failure silently falls back to the stored
//! value and width.

mod fetch;
mod layout;

use std::time::Duration;

use askama::Template;
use thiserror::Error;
use tracing::instrument;

use maintained_core::{Badge, BadgeStyle};

pub use fetch::{MAX_LIVE_VALUE_CHARS, ValueFetcher};
pub use layout::{BadgeLayout, estimate_text_width};

/// MIME type of rendered badges.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Errors that can occur while setting up or running the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The SVG template failed to render.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// The HTTP client for live values could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Renders badges, fetching live values when configured.
#[derive(Clone)]
pub struct BadgeRenderer {
    fetcher: ValueFetcher,
}

impl BadgeRenderer {
    /// Create a renderer whose live value fetches time out after `fetch_timeout`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Client` if the HTTP client cannot be built.
    pub fn new(fetch_timeout: Duration) -> Result<Self, RenderError> {
        Ok(Self {
            fetcher: ValueFetcher::new(fetch_timeout)?,
        })
    }

    /// Render a badge to SVG.
    ///
    /// Issues at most one outbound request, for a non-mono badge with a
    /// `value_source`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if the template fails to render. A
    /// failed live value fetch is not an error.
    #[instrument(skip(self, badge), fields(badge_id = %badge.id, style = %badge.style))]
    pub async fn render(&self, badge: &Badge) -> Result<String, RenderError> {
        let live_value = match badge.value_source.as_deref() {
            Some(url) if !badge.is_mono => self.fetcher.fetch(url).await,
            _ => None,
        };

        render_with_value(badge, live_value.as_deref())
    }
}

/// Render a badge without touching the network.
///
/// `live_value` stands in for text fetched from the badge's value source.
/// Output is a pure function of the arguments.
///
/// # Errors
///
/// Returns `RenderError::Template` if the template fails to render.
pub fn render_with_value(badge: &Badge, live_value: Option<&str>) -> Result<String, RenderError> {
    let layout = BadgeLayout::new(badge, live_value);
    let view = BadgeView::new(badge, &layout, live_value);

    let svg = match badge.style {
        BadgeStyle::Plastic => PlasticTemplate { badge: view }.render()?,
        BadgeStyle::Flat => FlatTemplate { badge: view }.render()?,
    };
    Ok(svg)
}

// =============================================================================
// Templates
// =============================================================================

/// Values interpolated into the SVG templates.
struct BadgeView<'a> {
    width: f64,
    title_width: f64,
    title_x: f64,
    title_color: &'static str,
    title: &'a str,
    value: Option<ValueView<'a>>,
}

struct ValueView<'a> {
    width: f64,
    x: f64,
    color: &'static str,
    text: &'a str,
}

impl<'a> BadgeView<'a> {
    fn new(badge: &'a Badge, layout: &BadgeLayout, live_value: Option<&'a str>) -> Self {
        let value = layout.value_width.map(|width| ValueView {
            width,
            x: layout.value_x(),
            color: badge.value_color.hex(),
            text: live_value.unwrap_or(&badge.value),
        });

        Self {
            width: layout.width(),
            title_width: layout.title_width,
            title_x: layout.title_x(),
            title_color: badge.title_color.hex(),
            title: &badge.title,
            value,
        }
    }
}

#[derive(Template)]
#[template(path = "badge/plastic.svg", escape = "html")]
struct PlasticTemplate<'a> {
    badge: BadgeView<'a>,
}

#[derive(Template)]
#[template(path = "badge/flat.svg", escape = "html")]
struct FlatTemplate<'a> {
    badge: BadgeView<'a>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use maintained_core::{BadgeColor, BadgeId};

    use super::*;

    fn badge() -> Badge {
        Badge::new(BadgeId::new(0), "Welcome to", 90.0, "Maintained", 90.0)
    }

    #[test]
    fn test_plastic_two_segments() {
        let svg = render_with_value(&badge(), None).unwrap();

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="180" height="20">"#));
        assert!(svg.contains("<linearGradient"));
        assert!(svg.contains(r##"<rect rx="3" width="180" height="20" fill="#556"/>"##));
        assert!(svg.contains(r##"<rect rx="3" x="90" width="90" height="20" fill="#AB2"/>"##));
        assert!(svg.contains(r##"<text x="45" y="15" fill="#010101" fill-opacity=".3">Welcome to</text>"##));
        assert!(svg.contains(r#"<text x="45" y="14">Welcome to</text>"#));
        assert!(svg.contains(r#"<text x="135" y="14">Maintained</text>"#));
    }

    #[test]
    fn test_flat_has_no_gradient_or_corners() {
        let mut flat = badge();
        flat.style = BadgeStyle::Flat;
        flat.title_color = BadgeColor::Seabed;

        let svg = render_with_value(&flat, None).unwrap();
        assert!(!svg.contains("linearGradient"));
        assert!(!svg.contains("rx="));
        assert!(svg.contains(r##"<rect width="180" height="20" fill="#013"/>"##));
        assert!(svg.contains(r##"<rect x="90" width="90" height="20" fill="#AB2"/>"##));
    }

    #[test]
    fn test_mono_renders_title_only() {
        let mut mono = badge();
        mono.is_mono = true;

        for style in [BadgeStyle::Plastic, BadgeStyle::Flat] {
            mono.style = style;
            let svg = render_with_value(&mono, Some("live")).unwrap();
            assert!(svg.contains(r#"width="90" height="20">"#));
            assert!(!svg.contains("Maintained"));
            assert!(!svg.contains("live"));
            assert_eq!(svg.matches("<text").count(), 2);
        }
    }

    #[test]
    fn test_live_value_resizes_value_segment() {
        let svg = render_with_value(&badge(), Some("v2.0")).unwrap();

        // 4 chars * 5.2 + 30 = 50.8
        assert!(svg.contains(r#"width="140.8" height="20">"#));
        assert!(svg.contains(r#"x="90" width="50.8""#));
        assert!(svg.contains(">v2.0</text>"));
        assert!(!svg.contains("Maintained"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut hostile = badge();
        hostile.title = r#"<script>alert("x")</script>"#.to_string();
        hostile.value = "a & b".to_string();

        let svg = render_with_value(&hostile, None).unwrap();
        assert!(!svg.contains("<script>"));
        assert!(!svg.contains("a & b"));
        assert!(svg.contains("&#60;script&#62;alert(&#34;x&#34;)&#60;/script&#62;"));
        assert!(svg.contains("a &#38; b"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = render_with_value(&badge(), None).unwrap();
        let second = render_with_value(&badge(), None).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_render_without_source_matches_pure_render() {
        let renderer = BadgeRenderer::new(Duration::from_secs(1)).unwrap();
        let svg = renderer.render(&badge()).await.unwrap();
        assert_eq!(svg, render_with_value(&badge(), None).unwrap());
    }

    #[tokio::test]
    async fn test_mono_badge_skips_fetch() {
        let renderer = BadgeRenderer::new(Duration::from_millis(200)).unwrap();
        let mut mono = badge();
        mono.is_mono = true;
        mono.value_source = Some("http://127.0.0.1:9/never".to_string());

        let svg = renderer.render(&mono).await.unwrap();
        assert_eq!(svg, render_with_value(&mono, None).unwrap());
    }
}
