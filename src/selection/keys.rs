//! Keyboard input, normalized from DOM `KeyboardEvent.key` values.

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the grid reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    F2,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Anything else (function keys, modifiers alone, IME composition, ...)
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "F2" => Self::F2,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// Row/column step for arrow keys
    pub fn arrow_delta(self) -> Option<(i64, i64)> {
        match self {
            Self::ArrowUp => Some((-1, 0)),
            Self::ArrowDown => Some((1, 0)),
            Self::ArrowLeft => Some((0, -1)),
            Self::ArrowRight => Some((0, 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a", Key::Char('a'))]
    #[test_case(" ", Key::Char(' '))]
    #[test_case("é", Key::Char('é'))]
    #[test_case("Enter", Key::Enter)]
    #[test_case("Esc", Key::Escape)]
    #[test_case("Delete", Key::Delete)]
    #[test_case("ArrowLeft", Key::ArrowLeft)]
    #[test_case("Shift", Key::Other)]
    #[test_case("F5", Key::Other)]
    #[test_case("", Key::Other)]
    fn test_from_dom(raw: &str, expected: Key) {
        assert_eq!(Key::from_dom(raw), expected);
    }

    #[test]
    fn test_command_modifier() {
        assert!(Modifiers::CTRL.command());
        assert!(Modifiers {
            meta: true,
            ..Modifiers::NONE
        }
        .command());
        assert!(!Modifiers::SHIFT.command());
    }
}
