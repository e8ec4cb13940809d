//! Maintained CLI - Offline badge tools.
//!
//! # Usage
//!
//! ```bash
//! # Render a badge to stdout
//! maintained render --title build --value passing --value-color savannah
//!
//! # Render a flat badge with a live value to a file
//! maintained render --title version --source https://example.com/version.txt \
//!     --style flat --output version.svg
//!
//! # List the color palette
//! maintained palette
//! ```
//!
//! # Commands
//!
//! - `render` - Render one badge as SVG
//! - `palette` - Print every badge color with its hex value

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use maintained_core::{BadgeColor, BadgeStyle};

mod commands;

#[derive(Parser)]
#[command(name = "maintained")]
#[command(author, version, about = "Maintained badge tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a badge as SVG
    Render {
        /// Left-hand label
        #[arg(short, long)]
        title: String,

        /// Right-hand value (replaced by the live value when `--source` succeeds)
        #[arg(short, long, default_value = "")]
        value: String,

        /// Title segment color
        #[arg(long, default_value = "slate")]
        title_color: BadgeColor,

        /// Value segment color
        #[arg(long, default_value = "savannah")]
        value_color: BadgeColor,

        /// Visual style (`plastic` or `flat`)
        #[arg(long, default_value = "plastic")]
        style: BadgeStyle,

        /// Render the title only
        #[arg(long)]
        mono: bool,

        /// URL whose response body becomes the value
        #[arg(long)]
        source: Option<String>,

        /// Live value fetch timeout in milliseconds
        #[arg(long, default_value_t = 3000)]
        timeout_ms: u64,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the badge color palette
    Palette,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered SVG on stdout stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Render {
            title,
            value,
            title_color,
            value_color,
            style,
            mono,
            source,
            timeout_ms,
            output,
        } => {
            let options = commands::render::RenderOptions {
                title,
                value,
                title_color,
                value_color,
                style,
                mono,
                source,
                timeout_ms,
            };
            commands::render::run(options, output.as_deref()).await?;
        }
        Commands::Palette => commands::palette::run(),
    }
    Ok(())
}
