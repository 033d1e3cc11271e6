//! The widget behavior trait and event outcome types.

use std::any::{Any, type_name};

use geom::{Rect, Size};

use crate::{
    attr::Attr,
    context::Context,
    event::Event,
    focus::FocusSource,
    layout::PreferredSize,
    render::Canvas,
    state::WidgetName,
    WidgetId,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handle,
    /// The event was not handled and routing continues.
    Ignore,
}

impl EventOutcome {
    /// Did the handler handle the event?
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handle)
    }
}

/// Widgets are the behavior attached to nodes in the tree arena.
///
/// Every method has a default, so the minimal widget is an empty struct. The
/// tree drives these hooks; widgets never call each other's hooks directly.
pub trait Widget: Any + Send {
    /// Name used for lookup and debug paths.
    fn name(&self) -> WidgetName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        WidgetName::convert(short)
    }

    /// Compute this widget's layout demand. Only called when the cached
    /// preferred size is stale. The default is the composite policy: a
    /// bounding box around the children at their resting positions.
    fn on_calc_preferred_size(&mut self, ctx: &mut Context) -> PreferredSize {
        ctx.box_around_children()
    }

    /// Assign size and offset to each child. Called during a relayout pass
    /// once this widget's own size has been resolved. The default places
    /// each child according to its alignment and this widget's padding.
    fn on_layout(&mut self, ctx: &mut Context) {
        ctx.align_children();
    }

    /// The widget's size was assigned during layout.
    fn on_resized(&mut self, _old: Size, _ctx: &mut Context) {}

    /// Render this widget's own background content, in local coordinates.
    /// Children are drawn by the tree after this returns.
    fn on_draw(&mut self, _canvas: &mut dyn Canvas, _ctx: &mut Context) {}

    /// Render foreground content on top of the children.
    fn on_draw_over(&mut self, _canvas: &mut dyn Canvas, _ctx: &mut Context) {}

    /// Handle an input event. The event position is in this widget's local
    /// frame.
    fn on_event(&mut self, _event: &mut Event, _ctx: &mut Context) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Focus transition. `gained` distinguishes acquisition from release;
    /// returning false vetoes the transition. The default declines to take
    /// focus and never refuses to give it up.
    fn on_focus(&mut self, gained: bool, _source: FocusSource, _ctx: &mut Context) -> bool {
        !gained
    }

    /// A descendant acquired focus. `area` is the descendant's box in this
    /// widget's local coordinates, for scroll-into-view behavior.
    fn on_descendant_focused(&mut self, _area: Rect, _descendant: WidgetId, _ctx: &mut Context) {}

    /// This widget was attached under a new parent.
    fn on_added_to(&mut self, _ctx: &mut Context) {}

    /// A child was appended or spliced under this widget.
    fn on_child_added(&mut self, _child: WidgetId, _ctx: &mut Context) {}

    /// This widget was removed from its parent (loud removal only).
    fn on_removed_from(&mut self, _ctx: &mut Context) {}

    /// A child was removed from this widget (loud removal only).
    fn on_child_removed(&mut self, _child: WidgetId, _ctx: &mut Context) {}

    /// A child's preferred size was invalidated.
    fn on_child_preferred_size_changed(&mut self, _child: WidgetId, _ctx: &mut Context) {}

    /// Set a widget-specific attribute. Return false for unrecognized names
    /// so the caller can log or ignore. Attributes handled by the tree
    /// (name, class, offset, padding, align, hidden) never reach this.
    fn set_attribute(&mut self, _name: &str, _value: &str, _ctx: &mut Context) -> bool {
        false
    }

    /// Push widget-specific attributes into the visitor.
    fn attributes(&self, _visit: &mut dyn FnMut(Attr)) {}
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
