//! Clipboard access for copying the selected message.
//!
//! The navigation controller only sees the [`Clipboard`] trait. The terminal
//! shell installs a [`SystemClipboard`]; tests install a recording fake.

use thiserror::Error;

/// Errors raised while writing to the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened or written.
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

/// Destination for copied text.
pub trait Clipboard {
    /// Replace the clipboard contents with `contents`.
    fn set(&mut self, contents: &str) -> Result<(), ClipboardError>;
}

/// System clipboard using arboard.
///
/// The platform handle is opened on first use, so starting without a display
/// server only fails when something is actually copied.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Create a clipboard handle without opening it.
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.inner.insert(clipboard))
    }
}

impl Clipboard for SystemClipboard {
    fn set(&mut self, contents: &str) -> Result<(), ClipboardError> {
        let clipboard = self.ensure()?;
        clipboard.set_text(contents.to_string())?;
        Ok(())
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}
