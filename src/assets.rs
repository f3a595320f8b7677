//! Bundled stylesheet

use anyhow::Result;
use std::path::Path;

use crate::output::write_page_if_absent;

const STYLE: &str = include_str!("../assets/style.css");

/// Writes the bundled `style.css` into the output directory
///
/// An existing stylesheet is left untouched so site owners can customize
/// it. Returns `true` when the file was created.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_style(output: &Path) -> Result<bool> {
    write_page_if_absent(&output.join("style.css"), STYLE)
}
