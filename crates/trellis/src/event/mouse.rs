//! Pointer button types.

use std::ops::Add;

use crate::event::key;

/// Mouse button codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// A button press or drag specification: which button, with which
/// modifiers held.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Click {
    /// The button involved.
    pub button: Button,
    /// Keyboard modifiers active at the time.
    pub mods: key::Mods,
}

/// Synthesize a Click specification from a button and a modifier state.
impl Add<key::Mods> for Button {
    type Output = Click;

    fn add(self, other: key::Mods) -> Self::Output {
        Click {
            button: self,
            mods: other,
        }
    }
}

impl Add<Button> for key::Mods {
    type Output = Click;

    fn add(self, other: Button) -> Self::Output {
        other + self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_sugar() {
        let c = Button::Left + key::Mods::CTRL;
        assert_eq!(c.button, Button::Left);
        assert!(c.mods.ctrl);
        assert_eq!(c, key::Mods::CTRL + Button::Left);
    }
}
