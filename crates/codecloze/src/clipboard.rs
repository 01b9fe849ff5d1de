//! System clipboard access.
//!
//! A fresh `arboard::Clipboard` is opened per operation; the handle is not
//! kept across the conversion.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Read text from the clipboard.
pub fn read_text() -> Result<String> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => {
            bail!("Clipboard is empty or does not contain text")
        }
        Err(e) => Err(e).context("Failed to read clipboard"),
    }
}

/// Replace the clipboard contents with `text`.
///
/// On X11 the contents are owned by this process, so they may be lost when it
/// exits unless a clipboard manager picks them up.
pub fn write_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to write to clipboard")
}
