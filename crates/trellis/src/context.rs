//! The view of the tree handed to widget hooks.

use geom::{Align, Offset, Padding, Rect, Size};

use crate::{
    error::Result,
    focus::FocusSource,
    layout::{PreferredSize, SizeAccumulator},
    resource::{FontData, ImageData},
    task::TaskSender,
    tree::Tree,
    WidgetId,
};

/// Hook-time access to the tree on behalf of one widget.
///
/// While a hook runs, the widget itself is checked out of the arena, so the
/// context can hand out the rest of the tree freely; only reentrant access
/// to the same widget fails. Accessors are infallible and fall back to
/// zero values if the widget was destroyed mid-hook.
pub struct Context<'a> {
    tree: &'a mut Tree,
    id: WidgetId,
}

impl<'a> Context<'a> {
    pub(crate) fn new(tree: &'a mut Tree, id: WidgetId) -> Self {
        Context { tree, id }
    }

    /// The id of the widget this hook runs for.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Full tree access, for structural work from inside a hook.
    pub fn tree(&mut self) -> &mut Tree {
        self.tree
    }

    /// The widget's assigned size.
    pub fn size(&self) -> Size {
        self.tree.arena.get(self.id).map(|n| n.size).unwrap_or_default()
    }

    /// The widget's box at the origin of its own frame.
    pub fn local_rect(&self) -> Rect {
        self.size().rect()
    }

    /// The widget's inner padding.
    pub fn padding(&self) -> Padding {
        self.tree
            .arena
            .get(self.id)
            .map(|n| n.padding)
            .unwrap_or_else(Padding::zero)
    }

    /// The widget's parent, if attached.
    pub fn parent(&self) -> Option<WidgetId> {
        self.tree.arena.get(self.id).and_then(|n| n.parent)
    }

    /// Children in document order.
    pub fn children(&self) -> Vec<WidgetId> {
        self.tree.children(self.id).unwrap_or_default()
    }

    /// Does this widget hold focus?
    pub fn is_focused(&self) -> bool {
        self.tree.is_focused(self.id)
    }

    // ------------------------------------------------------------------
    // Scheduling

    /// Mark this widget for relayout.
    pub fn request_relayout(&mut self) {
        self.tree.request_relayout(self.id);
    }

    /// Mark this widget for redraw.
    pub fn request_redraw(&mut self) {
        self.tree.request_redraw(self.id);
    }

    /// Invalidate this widget's preferred size, e.g. after its content
    /// changed.
    pub fn preferred_size_changed(&mut self) {
        self.tree.preferred_size_changed(self.id);
    }

    // ------------------------------------------------------------------
    // Layout helpers

    /// A child's layout demand, computing it if stale.
    pub fn child_preferred_size(&mut self, child: WidgetId) -> Result<PreferredSize> {
        self.tree.preferred_size(child)
    }

    /// Assign a child's size during layout. No-op below the size epsilon;
    /// otherwise the child is marked for relayout and its resize hook
    /// fires.
    pub fn set_child_size(&mut self, child: WidgetId, size: Size) -> Result<()> {
        self.tree.assign_size(child, size)
    }

    /// Place a child during layout. Unlike [`Tree::set_offset`], this does
    /// not invalidate the composite preferred size, since placement is a
    /// consequence of layout rather than an input to it.
    pub fn set_child_offset(&mut self, child: WidgetId, offset: Offset) -> Result<()> {
        let node = self.tree.node_mut(child)?;
        if node.offset != offset {
            node.offset = offset;
            node.needs_redraw = true;
        }
        Ok(())
    }

    /// The composite demand policy: a bounding box around the visible
    /// children at their resting offsets, grown by this widget's padding.
    pub fn box_around_children(&mut self) -> PreferredSize {
        let padding = self.padding();
        let mut acc = SizeAccumulator::new();
        for child in self.children() {
            let Some(node) = self.tree.arena.get(child) else {
                continue;
            };
            if node.hidden {
                continue;
            }
            let dx = node.offset.x.max(0.0);
            let dy = node.offset.y.max(0.0);
            let Ok(p) = self.tree.preferred_size(child) else {
                continue;
            };
            acc.add(PreferredSize {
                min: Size::new(p.min.w + dx, p.min.h + dy),
                pref: Size::new(p.pref.w + dx, p.pref.h + dy),
                max: Size::new(p.max.w + dx, p.max.h + dy),
            });
        }
        let b = acc.finish();
        let hp = padding.horizontal();
        let vp = padding.vertical();
        PreferredSize {
            min: Size::new(b.min.w + hp, b.min.h + vp),
            pref: Size::new(b.pref.w + hp, b.pref.h + vp),
            max: Size::new(b.max.w + hp, b.max.h + vp),
        }
        .sanitize()
    }

    /// The default layout policy: size and place each visible child from
    /// its alignment, within this widget's padded content box.
    pub fn align_children(&mut self) {
        let (size, padding) = match self.tree.arena.get(self.id) {
            Some(n) => (n.size, n.padding),
            None => return,
        };
        for child in self.children() {
            let Some(node) = self.tree.arena.get(child) else {
                continue;
            };
            if node.hidden {
                continue;
            }
            let align = node.align;
            let resting = node.offset;
            let Ok(p) = self.tree.preferred_size(child) else {
                continue;
            };
            let (w, x) = align_axis(
                align.x,
                resting.x,
                (p.pref.w, p.min.w, p.max.w),
                size.w,
                padding.left,
                padding.right,
            );
            let (h, y) = align_axis(
                align.y,
                resting.y,
                (p.pref.h, p.min.h, p.max.h),
                size.h,
                padding.top,
                padding.bottom,
            );
            let _ = self.set_child_size(child, Size::new(w, h));
            let _ = self.set_child_offset(child, Offset::new(x, y));
        }
    }

    // ------------------------------------------------------------------
    // Focus

    /// Ask for focus. The request is deferred to the next update pass, so
    /// it is safe to call from any hook, including this widget's own focus
    /// hook. The outcome is observable via [`Context::is_focused`] after
    /// the pass; refusals are logged, not escalated.
    pub fn request_focus(&mut self, source: FocusSource) {
        let id = self.id;
        self.tree.sender().defer_owned(id, move |tree| {
            match tree.request_focus(id, source) {
                Ok(true) => (),
                Ok(false) => tracing::debug!(?id, "deferred focus request refused"),
                Err(e) => tracing::warn!(?id, error = %e, "deferred focus request failed"),
            }
        });
    }

    /// Give up focus on the next update pass.
    pub fn release_focus(&mut self, source: FocusSource) {
        let id = self.id;
        self.tree.sender().defer_owned(id, move |tree| {
            if let Err(e) = tree.remove_focus(id, source) {
                tracing::warn!(?id, error = %e, "deferred focus release failed");
            }
        });
    }

    // ------------------------------------------------------------------
    // Deferred work and resources

    /// Queue work to run with full tree access on the next update pass.
    /// The closure is dropped unrun if this widget is destroyed first.
    pub fn defer<F>(&mut self, work: F)
    where
        F: FnOnce(&mut Tree) + Send + 'static,
    {
        let id = self.id;
        self.tree.sender().defer_owned(id, work);
    }

    /// A sender for queueing work from other threads.
    pub fn sender(&self) -> TaskSender {
        self.tree.sender()
    }

    /// Load an image in the background; the completion closure runs on the
    /// UI thread and is dropped if this widget is destroyed first.
    pub fn load_image<F>(&mut self, path: &str, done: F)
    where
        F: FnOnce(&mut Tree, Result<ImageData>) + Send + 'static,
    {
        self.tree.load_image(self.id, path, done);
    }

    /// Load a font in the background, with the same lifetime rules as
    /// [`Context::load_image`].
    pub fn load_font<F>(&mut self, path: &str, done: F)
    where
        F: FnOnce(&mut Tree, Result<FontData>) + Send + 'static,
    {
        self.tree.load_font(self.id, path, done);
    }
}

/// One axis of the default placement math. Returns (size, position).
fn align_axis(
    align: Align,
    resting: f32,
    (pref, min, max): (f32, f32, f32),
    extent: f32,
    pad_lo: f32,
    pad_hi: f32,
) -> (f32, f32) {
    match align {
        Align::None => (pref.clamp(min, max), resting),
        Align::Min => (pref.clamp(min, max), pad_lo),
        Align::Fill => ((extent - pad_lo - pad_hi).max(0.0).clamp(min, max), pad_lo),
        Align::Max => {
            let s = pref.clamp(min, max);
            (s, extent - pad_hi - s)
        }
        Align::Center => {
            let s = pref.clamp(min, max);
            (s, ((pad_lo + extent - pad_hi - s) / 2.0).round())
        }
    }
}
