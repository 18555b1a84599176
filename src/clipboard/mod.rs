pub mod processor;
pub mod watcher;

use arboard::Clipboard as Arboard;
use std::sync::{Arc, Mutex};

use crate::{MacClipError, Result};

/// Text access to a clipboard.
///
/// A failed read covers everything that is not readable text: an empty
/// clipboard, an image, or a backend that went away.
pub trait ClipboardBackend: Send + Sync {
    fn read_text(&self) -> Result<String>;
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The system clipboard.
pub struct ClipboardManager {
    clipboard: Arc<Mutex<Arboard>>,
}

impl ClipboardManager {
    pub fn new() -> Result<Self> {
        let clipboard = Arboard::new().map_err(|e| MacClipError::Clipboard(e.to_string()))?;

        Ok(Self {
            clipboard: Arc::new(Mutex::new(clipboard)),
        })
    }
}

impl ClipboardBackend for ClipboardManager {
    fn read_text(&self) -> Result<String> {
        let mut clipboard = self
            .clipboard
            .lock()
            .map_err(|e| MacClipError::Clipboard(format!("Lock error: {e}")))?;

        clipboard
            .get_text()
            .map_err(|e| MacClipError::Clipboard(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = self
            .clipboard
            .lock()
            .map_err(|e| MacClipError::Clipboard(format!("Lock error: {e}")))?;

        clipboard
            .set_text(text)
            .map_err(|e| MacClipError::Clipboard(e.to_string()))
    }
}

/// In-process clipboard for headless runs and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: Mutex::new(Some(text.to_string())),
        }
    }

    /// Empties the clipboard, as if it held something that is not text.
    pub fn clear(&self) {
        if let Ok(mut content) = self.content.lock() {
            *content = None;
        }
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn read_text(&self) -> Result<String> {
        let content = self
            .content
            .lock()
            .map_err(|e| MacClipError::Clipboard(format!("Lock error: {e}")))?;

        content
            .clone()
            .ok_or_else(|| MacClipError::Clipboard("No text in clipboard".to_string()))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut content = self
            .content
            .lock()
            .map_err(|e| MacClipError::Clipboard(format!("Lock error: {e}")))?;

        *content = Some(text.to_string());
        Ok(())
    }
}
