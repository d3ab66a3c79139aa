//! Single-line input prompt shown on the message line.

use crate::key::Key;

/// What the prompt's answer will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// File name for a buffer that has none yet.
    SaveAs,
    /// Search query.
    Search,
}

/// Result of feeding one key to a [`Prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Still collecting input.
    Pending,
    /// Escape was pressed.
    Cancelled,
    /// Enter was pressed with non-empty input.
    Submitted(String),
}

/// An active prompt and the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
}

impl Prompt {
    /// Open an empty prompt.
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    /// Kind of prompt.
    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    /// Text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Feed one key.
    pub fn handle_key(&mut self, key: Key) -> PromptEvent {
        match key {
            Key::Backspace | Key::Delete | Key::Ctrl('h') => {
                self.input.pop();
                PromptEvent::Pending
            }
            Key::Escape => PromptEvent::Cancelled,
            Key::Enter if !self.input.is_empty() => {
                PromptEvent::Submitted(std::mem::take(&mut self.input))
            }
            _ => {
                if let Some(c) = key.printable() {
                    self.input.push(c);
                }
                PromptEvent::Pending
            }
        }
    }

    /// Text for the message line.
    pub fn display(&self) -> String {
        match self.kind {
            PromptKind::SaveAs => format!("Save as: {}", self.input),
            PromptKind::Search => format!("Search: {} (ESC to cancel)", self.input),
        }
    }
}
