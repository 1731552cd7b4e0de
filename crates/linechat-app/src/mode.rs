//! Input modes.

use std::fmt;

/// How a submitted line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Lines go to the server verbatim.
    #[default]
    Direct,
    /// `open <id>` / `close <id>` room management.
    Room,
    /// Lines are shouted into the current room.
    Chat,
    /// Member list of the current room; input is ignored.
    Member,
}

impl Mode {
    /// The mode after this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Direct => Self::Room,
            Self::Room => Self::Chat,
            Self::Chat => Self::Member,
            Self::Member => Self::Direct,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::Room => "room",
            Self::Chat => "chat",
            Self::Member => "member",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_returns_to_start() {
        let mut mode = Mode::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }

        assert_eq!(seen, [Mode::Room, Mode::Chat, Mode::Member, Mode::Direct]);
    }
}
