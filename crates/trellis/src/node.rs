//! Arena node storage.

use std::any::{Any, TypeId};

use geom::{AlignPair, Offset, Padding, Rect, Size};

use crate::{layout::PreferredSize, state::WidgetName, widget::Widget, WidgetId};

/// A single arena slot: the widget behavior plus all per-widget state the
/// tree manages on its behalf (links, geometry, flags).
///
/// The widget box is held in an `Option` so it can be checked out during
/// hook dispatch and returned afterwards. The slot is only ever empty while
/// a hook on this widget is running.
pub(crate) struct Node {
    /// The widget behavior. Empty only while checked out for a hook call.
    pub widget: Option<Box<dyn Widget>>,
    /// Concrete type of the widget, cached so type lookups work while the
    /// widget is checked out.
    pub type_id: TypeId,
    /// Cached widget name, maintained on insert and on rename.
    pub name: WidgetName,
    /// Style classes for group lookup.
    pub classes: Vec<String>,

    /// Parent link. None for roots and detached widgets.
    pub parent: Option<WidgetId>,
    /// First child in document order.
    pub first_child: Option<WidgetId>,
    /// Next sibling in document order.
    pub next_sibling: Option<WidgetId>,
    /// Previous sibling in document order.
    pub prev_sibling: Option<WidgetId>,

    /// Whether the parent owns this widget's lifetime. Owned widgets are
    /// destroyed with their parent; external widgets are detached instead.
    pub owned_by_parent: bool,

    /// Assigned size in device units.
    pub size: Size,
    /// Position of the widget's origin in the parent's frame.
    pub offset: Offset,
    /// Inner padding applied when placing children.
    pub padding: Padding,
    /// Alignment within the parent's content box.
    pub align: AlignPair,
    /// Hidden widgets are skipped by layout, drawing and pointer dispatch.
    pub hidden: bool,

    /// Cached preferred size, valid when `preferred_stale` is false.
    pub preferred: PreferredSize,
    /// The preferred size cache must be recomputed.
    pub preferred_stale: bool,

    /// This widget must run a layout pass.
    pub needs_relayout: bool,
    /// Some descendant must run a layout pass.
    pub child_needs_relayout: bool,
    /// This widget must be redrawn.
    pub needs_redraw: bool,
    /// Some descendant must be redrawn.
    pub child_needs_redraw: bool,

    /// This widget holds the input focus.
    pub focused: bool,
    /// The focused widget is somewhere in this widget's subtree.
    pub child_focused: bool,
}

impl Node {
    /// Create a detached node around a widget box. All dirty flags start
    /// set so a fresh widget is measured, laid out and drawn on the next
    /// pass.
    pub fn new(widget: Box<dyn Widget>) -> Self {
        let type_id = (&*widget as &dyn Any).type_id();
        let name = widget.name();
        Node {
            widget: Some(widget),
            type_id,
            name,
            classes: Vec::new(),
            parent: None,
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
            owned_by_parent: true,
            size: Size::zero(),
            offset: Offset::zero(),
            padding: Padding::zero(),
            align: AlignPair::default(),
            hidden: false,
            preferred: PreferredSize::default(),
            preferred_stale: true,
            needs_relayout: true,
            child_needs_relayout: false,
            needs_redraw: true,
            child_needs_redraw: false,
            focused: false,
            child_focused: false,
        }
    }

    /// The widget's box in its parent's coordinate frame.
    pub fn rect(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.size.w, self.size.h)
    }
}
