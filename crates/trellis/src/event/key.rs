//! Core primitives to represent keyboard input.
use std::ops::{Add, BitOr};

/// Modifier key state. Combine with `|`, attach to a key with `+`:
/// `(Mods::CTRL | Mods::SHIFT) + 'x'`.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Mods {
    /// No modifiers held.
    pub const NONE: Mods = Mods {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift alone.
    pub const SHIFT: Mods = Mods {
        shift: true,
        ..Mods::NONE
    };

    /// Control alone.
    pub const CTRL: Mods = Mods {
        ctrl: true,
        ..Mods::NONE
    };

    /// Alt alone.
    pub const ALT: Mods = Mods {
        alt: true,
        ..Mods::NONE
    };
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, other: char) -> Self::Output {
        Key {
            mods: self,
            key: other.into(),
        }
    }
}

impl BitOr for Mods {
    type Output = Self;

    fn bitor(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
        }
    }
}

/// Key codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Function key.
    F(u8),
    /// Character key.
    Char(char),
    /// Escape key.
    Esc,
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        KeyCode::Char(c)
    }
}

/// A keystroke: a key code plus the modifier state at the time it was
/// pressed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Active modifiers.
    pub mods: Mods,
    /// The key pressed.
    pub key: KeyCode,
}

impl Key {
    /// Construct a keystroke with no modifiers.
    pub fn new(key: impl Into<KeyCode>) -> Self {
        Key {
            mods: Mods::NONE,
            key: key.into(),
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::new(c)
    }
}

impl From<KeyCode> for Key {
    fn from(key: KeyCode) -> Self {
        Key::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_sugar() {
        assert_eq!(
            Mods::CTRL + 'x',
            Key {
                mods: Mods::CTRL,
                key: KeyCode::Char('x'),
            }
        );
        assert_eq!(Mods::CTRL | Mods::SHIFT, Mods {
            shift: true,
            ctrl: true,
            alt: false
        });
        assert_eq!(Key::new('a').mods, Mods::NONE);
    }
}
