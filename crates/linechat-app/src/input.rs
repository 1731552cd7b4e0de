//! Terminal-agnostic keyboard input.

/// Keys the application reacts to.
///
/// Frontends translate their native key events into this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Space bar.
    Space,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Delete the character before the cursor.
    Backspace,
    /// Submit the input line.
    Enter,
    /// Quit without logging out.
    Esc,
    /// Cycle to the next input mode.
    NextMode,
    /// Show the raw connection log.
    ShowConnectionLog,
}
