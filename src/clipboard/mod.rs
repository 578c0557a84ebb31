//! Copying source links and summaries to the system clipboard

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::models::ResearchSource;

/// Largest payload accepted for the clipboard (1MB); summaries are far below this
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Seam over the system clipboard so tests never touch the real one
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Nothing to copy");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }

    Ok(())
}

/// Sources only ever come from http(s) links; anything else is refused
fn validate_source_uri(uri: &str) -> Result<()> {
    if !(uri.starts_with("http://") || uri.starts_with("https://")) {
        bail!("Refusing to copy non-http link: {}", uri);
    }
    Ok(())
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Copy text to the system clipboard.
///
/// Validation runs before the clipboard is opened, so bad input is reported
/// even on headless machines. Fails when the clipboard is unavailable
/// (no display server, permissions) or locked.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    validate_clipboard_text(text)?;
    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(text, &mut clipboard)
}

/// Copy a source's uri to the system clipboard
pub fn copy_source(source: &ResearchSource) -> Result<()> {
    validate_source_uri(&source.uri)?;
    copy_to_clipboard(&source.uri)
}
