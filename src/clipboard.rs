//! Clipboard access for exporting line profiles.

use arboard::Clipboard;

use crate::error::Result;

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    tracing::debug!(lines = text.lines().count(), "copied to clipboard");
    Ok(())
}
