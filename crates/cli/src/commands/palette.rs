//! Color palette listing.

use maintained_core::BadgeColor;

/// One `name hex` line per palette color.
pub fn lines() -> Vec<String> {
    BadgeColor::ALL
        .iter()
        .map(|color| format!("{:<14}{}", color.name(), color.hex()))
        .collect()
}

/// Print the palette to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    for line in lines() {
        println!("{line}");
    }
}
