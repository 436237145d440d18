//! Clipboard capability used to hand generated prompts to the user.
//!
//! The core never talks to a platform clipboard directly; shells provide an
//! implementation.

use std::cell::RefCell;

/// Best-effort text sink. Implementations report success as a boolean.
pub trait Clipboard {
    fn copy(&self, text: &str) -> bool;
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct BufferClipboard {
    contents: RefCell<Option<String>>,
}

impl BufferClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for BufferClipboard {
    fn copy(&self, text: &str) -> bool {
        *self.contents.borrow_mut() = Some(text.to_string());
        true
    }
}
