//! Output module
//! Renders backend responses for the terminal, JSON consumers, and Markdown reports

pub mod formatter;
pub mod report;

pub use formatter::{formatter_for, OutputFormatter};

use crate::error::Result;
use std::path::Path;

/// Save rendered output to a file
pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
