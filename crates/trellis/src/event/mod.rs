//! Input event types routed through the widget tree.

pub mod key;
pub mod mouse;

use geom::{Offset, Point};

/// The kind of an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A pointer button press.
    Click(mouse::Click),
    /// The pointer moved with no button held.
    Moved,
    /// The pointer moved with a button held.
    Dragged(mouse::Click),
    /// Scroll wheel movement. The delta is in device units.
    Scroll(Offset),
    /// A keystroke.
    Key(key::Key),
    /// Committed text input.
    Text(String),
}

impl EventKind {
    /// Pointer-driven kinds carry a meaningful position; Key and Text are
    /// delivered at the position of the pointer for containment routing.
    pub fn is_pointer(&self) -> bool {
        !matches!(self, EventKind::Key(_) | EventKind::Text(_))
    }

    /// Scroll events route children-first so inner scrollable regions win.
    pub(crate) fn is_post_order(&self) -> bool {
        matches!(self, EventKind::Scroll(_))
    }

    /// Whether the focused widget is offered this event before tree
    /// dispatch. Plain pointer motion never bypasses.
    pub(crate) fn bypasses_to_focus(&self) -> bool {
        !matches!(self, EventKind::Moved | EventKind::Dragged(_))
    }
}

/// An input event travelling through the tree.
///
/// The position is rewritten into each widget's local frame as dispatch
/// descends, and restored on the way back out.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Position in the current widget's local frame.
    pub pos: Point,
}

impl Event {
    /// Construct an event at a position in root coordinates.
    pub fn new(kind: EventKind, pos: impl Into<Point>) -> Self {
        Event {
            kind,
            pos: pos.into(),
        }
    }

    /// A left click at the given position.
    pub fn click(pos: impl Into<Point>) -> Self {
        Event::new(
            EventKind::Click(mouse::Click {
                button: mouse::Button::Left,
                mods: key::Mods::NONE,
            }),
            pos,
        )
    }

    /// A keystroke, positioned at the origin.
    pub fn key(k: impl Into<key::Key>) -> Self {
        Event::new(EventKind::Key(k.into()), Point::zero())
    }

    /// Committed text, positioned at the origin.
    pub fn text(s: impl Into<String>) -> Self {
        Event::new(EventKind::Text(s.into()), Point::zero())
    }

    /// A scroll by the given delta at the given position.
    pub fn scroll(delta: impl Into<Offset>, pos: impl Into<Point>) -> Self {
        Event::new(EventKind::Scroll(delta.into()), pos)
    }
}
