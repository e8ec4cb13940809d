//! Offline badge rendering.
//!
//! Builds a throwaway badge from command-line flags and renders it with the
//! same renderer the server uses. Widths are estimated from the text.

use std::path::Path;
use std::time::Duration;

use maintained_core::{Badge, BadgeAppearance, BadgeColor, BadgeId, BadgeStyle};
use maintained_server::render::{BadgeRenderer, RenderError, estimate_text_width};
use thiserror::Error;

/// Errors that can occur while rendering from the command line.
#[derive(Debug, Error)]
pub enum RenderCommandError {
    /// The timeout was zero.
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    /// The renderer failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Writing the output file failed.
    #[error("Could not write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Badge flags collected from the command line.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub value: String,
    pub title_color: BadgeColor,
    pub value_color: BadgeColor,
    pub style: BadgeStyle,
    pub mono: bool,
    pub source: Option<String>,
    pub timeout_ms: u64,
}

impl RenderOptions {
    /// Build the badge these options describe.
    pub fn badge(&self) -> Badge {
        let mut badge = Badge::new(
            BadgeId::new(0),
            self.title.clone(),
            estimate_text_width(&self.title),
            self.value.clone(),
            estimate_text_width(&self.value),
        );
        badge.apply_appearance(BadgeAppearance {
            title_color: self.title_color,
            value_color: self.value_color,
            style: self.style,
            value_source: self.source.clone(),
            is_mono: self.mono,
        });
        badge
    }
}

/// Render the badge and write it to `output`, or stdout when absent.
///
/// # Errors
///
/// Returns an error if the timeout is zero, rendering fails, or the output
/// cannot be written. A failed live value fetch falls back to `--value`.
pub async fn run(options: RenderOptions, output: Option<&Path>) -> Result<(), RenderCommandError> {
    if options.timeout_ms == 0 {
        return Err(RenderCommandError::ZeroTimeout);
    }

    let renderer = BadgeRenderer::new(Duration::from_millis(options.timeout_ms))?;
    let svg = renderer.render(&options.badge()).await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, svg).await?;
            tracing::info!("Wrote badge to {}", path.display());
        }
        None => print_svg(&svg),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_svg(svg: &str) {
    println!("{svg}");
}
