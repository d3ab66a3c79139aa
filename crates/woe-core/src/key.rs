//! Symbolic keys delivered by the host, one per read.

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Forward delete.
    Delete,
    /// Backspace (DEL, 0x7f).
    Backspace,
    /// Escape.
    Escape,
    /// Enter (carriage return).
    Enter,
    /// Ctrl + a lowercase ASCII letter. Tab arrives as `Ctrl('i')`.
    Ctrl(char),
    /// A printable ASCII character (space through `~`).
    Char(char),
}

impl Key {
    /// Decode a single raw terminal byte.
    ///
    /// Escape sequences (arrows, paging) are multi-byte and must be decoded by the host.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x7F => Some(Key::Backspace),
            b'\r' => Some(Key::Enter),
            0x01..=0x1A => Some(Key::Ctrl(char::from(b'a' + byte - 1))),
            0x20..=0x7E => Some(Key::Char(char::from(byte))),
            _ => None,
        }
    }

    /// Returns `true` for keys that behave the same in every non-Command mode (motion, paging
    /// and deletion).
    pub fn is_special_move(&self) -> bool {
        matches!(
            self,
            Key::Left
                | Key::Right
                | Key::Up
                | Key::Down
                | Key::PageUp
                | Key::PageDown
                | Key::Home
                | Key::End
                | Key::Delete
                | Key::Backspace
                | Key::Ctrl('h')
        )
    }

    /// Returns `true` for the keys that leave Insert/NumberPrefix mode.
    pub fn is_cancel(&self) -> bool {
        matches!(self, Key::Escape | Key::Ctrl('l') | Key::Ctrl('c'))
    }

    /// The printable ASCII character carried by this key, if any.
    pub fn printable(&self) -> Option<char> {
        match *self {
            Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => Some(c),
            _ => None,
        }
    }
}
