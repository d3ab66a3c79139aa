//! Editor modes

use std::fmt;

/// The active modal state of the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Navigation and single-key commands (initial mode).
    #[default]
    Normal,
    /// Text entry.
    Insert,
    /// Leader commands (entered with space): quit, save, help, search.
    Command,
    /// Accumulating a numeric prefix, e.g. `12g`.
    NumberPrefix(u32),
}

impl Mode {
    /// Name shown in the status bar.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Insert => "Insert",
            Mode::Command => "Command",
            Mode::NumberPrefix(_) => "Number Command",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
