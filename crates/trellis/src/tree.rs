//! The widget tree: an arena of nodes plus the structural, traversal and
//! scheduling operations that drive it.

use std::any::{Any, TypeId};
use std::sync::Arc;

use slotmap::SlotMap;

use geom::{AlignPair, Offset, Padding, Size};

use crate::{
    error::{Error, Result},
    event::Event,
    focus::FocusSource,
    node::Node,
    resource::{FileLoader, FontData, ImageData, ResourceLoader},
    state::WidgetName,
    task::{TaskQueue, TaskSender},
    widget::{EventOutcome, Widget},
    WidgetId,
};

/// Walk is the return value from traversal closures.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Walk<T> {
    /// Skip the rest of this subtree and continue walking.
    Skip,
    /// Stop walking with a value.
    Handle(T),
    /// Continue walking.
    Continue,
}

impl<T> Walk<T> {
    /// The handle value of the traversal, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Handle(v) => Some(v),
            _ => None,
        }
    }

    /// Did the traversal return Handle?
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handle(_))
    }
}

/// Receipt for a widget whose ownership has been handed back to the caller
/// by a removal operation. The subtree stays alive but detached; the holder
/// is responsible for re-attaching it with [`Tree::insert_id`] or disposing
/// of it with [`Tree::destroy`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a removed owned widget must be re-attached or destroyed"]
pub struct OwnedWidget {
    id: WidgetId,
}

impl OwnedWidget {
    /// The detached widget's id.
    pub fn id(&self) -> WidgetId {
        self.id
    }
}

/// A retained widget tree.
///
/// The tree owns every widget in a slotmap arena and exposes all mutation
/// through ids. It is single-threaded by design: structural changes, layout,
/// drawing and event dispatch all happen on the thread driving
/// [`Tree::update`]. The only cross-thread surface is the deferred task
/// queue, reachable through [`Tree::sender`].
pub struct Tree {
    pub(crate) arena: SlotMap<WidgetId, Node>,
    pub(crate) root: WidgetId,
    /// Cached id of the focus holder. The focused/child_focused flags on
    /// nodes are kept consistent with this.
    pub(crate) focus: Option<WidgetId>,
    /// Widget receiving pointer events directly, bypassing routing.
    capture: Option<WidgetId>,
    pub(crate) tasks: TaskQueue,
    loader: Arc<dyn ResourceLoader>,
}

impl Tree {
    /// Create a tree around a root widget, loading resources from the
    /// filesystem.
    pub fn new(root: impl Into<Box<dyn Widget>>) -> Self {
        Self::with_loader(root, Arc::new(FileLoader))
    }

    /// Create a tree with a custom resource loader.
    pub fn with_loader(root: impl Into<Box<dyn Widget>>, loader: Arc<dyn ResourceLoader>) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new(root.into()));
        Tree {
            arena,
            root,
            focus: None,
            capture: None,
            tasks: TaskQueue::new(),
            loader,
        }
    }

    /// The root widget's id.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Is this id alive in the arena?
    pub fn is_valid(&self, id: WidgetId) -> bool {
        self.arena.contains_key(id)
    }

    /// A handle for queueing deferred work from any thread.
    pub fn sender(&self) -> TaskSender {
        self.tasks.sender()
    }

    pub(crate) fn node(&self, id: WidgetId) -> Result<&Node> {
        self.arena.get(id).ok_or(Error::InvalidNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node> {
        self.arena.get_mut(id).ok_or(Error::InvalidNode(id))
    }

    /// Run a closure against a widget's behavior object.
    ///
    /// The widget box is checked out of its slot for the duration, so the
    /// closure has simultaneous access to the widget and the rest of the
    /// tree through a [`crate::Context`]. Fails if the widget is already
    /// checked out, which only happens on reentrant access to the same
    /// widget. If the widget is destroyed while checked out, the box is
    /// dropped instead of returned to the slot.
    pub fn with_widget_mut<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut crate::Context) -> R,
    ) -> Result<R> {
        let node = self.arena.get_mut(id).ok_or(Error::InvalidNode(id))?;
        let mut widget = node
            .widget
            .take()
            .ok_or_else(|| Error::InvalidOperation("widget is checked out".into()))?;
        let result = {
            let mut ctx = crate::Context::new(self, id);
            f(widget.as_mut(), &mut ctx)
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(result)
    }

    /// Borrow a widget's concrete type immutably. Fails if the id is stale,
    /// the widget is checked out, or the type does not match.
    pub fn widget_ref<T: Widget>(&self, id: WidgetId) -> Result<&T> {
        let node = self.node(id)?;
        let w = node
            .widget
            .as_deref()
            .ok_or_else(|| Error::InvalidOperation("widget is checked out".into()))?;
        (w as &dyn Any)
            .downcast_ref::<T>()
            .ok_or_else(|| Error::InvalidOperation("widget type mismatch".into()))
    }

    /// Borrow a widget's concrete type mutably.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Result<&mut T> {
        let node = self.node_mut(id)?;
        let w = node
            .widget
            .as_deref_mut()
            .ok_or_else(|| Error::InvalidOperation("widget is checked out".into()))?;
        (w as &mut dyn Any)
            .downcast_mut::<T>()
            .ok_or_else(|| Error::InvalidOperation("widget type mismatch".into()))
    }

    // ------------------------------------------------------------------
    // Links and link queries

    /// The widget's parent, if attached.
    pub fn parent(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children in document order: first added first. The last child draws
    /// topmost.
    pub fn children(&self, id: WidgetId) -> Result<Vec<WidgetId>> {
        let mut out = Vec::new();
        let mut cursor = self.node(id)?.first_child;
        while let Some(c) = cursor {
            out.push(c);
            cursor = self.node(c)?.next_sibling;
        }
        Ok(out)
    }

    /// Number of children.
    pub fn child_count(&self, id: WidgetId) -> Result<usize> {
        Ok(self.children(id)?.len())
    }

    /// Next sibling in document order.
    pub fn next_sibling(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(id)?.next_sibling)
    }

    /// Previous sibling in document order.
    pub fn prev_sibling(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(id)?.prev_sibling)
    }

    /// Is `ancestor` strictly above `id` on its parent chain?
    pub fn is_ancestor_of(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cursor = self.arena.get(id).and_then(|n| n.parent);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.arena.get(p).and_then(|n| n.parent);
        }
        false
    }

    /// The offset of this widget's origin in root-parent coordinates.
    pub fn abs_offset(&self, id: WidgetId) -> Result<Offset> {
        let mut off = self.node(id)?.offset;
        let mut cursor = self.node(id)?.parent;
        while let Some(p) = cursor {
            let n = self.node(p)?;
            off = off + n.offset;
            cursor = n.parent;
        }
        Ok(off)
    }

    // ------------------------------------------------------------------
    // Structural operations

    /// Append a widget as the last child of `parent`. The tree owns the
    /// widget: it is destroyed along with its parent.
    pub fn insert(&mut self, parent: WidgetId, widget: impl Into<Box<dyn Widget>>) -> Result<WidgetId> {
        let id = self.arena.insert(Node::new(widget.into()));
        self.attach_last(parent, id, true)?;
        Ok(id)
    }

    /// Append a widget whose lifetime the caller manages. When the parent
    /// is destroyed, the widget is detached instead of destroyed.
    pub fn insert_unowned(
        &mut self,
        parent: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        let id = self.arena.insert(Node::new(widget.into()));
        self.attach_last(parent, id, false)?;
        Ok(id)
    }

    /// Attach an already-built detached widget as the last child of
    /// `parent`. Widgets still attached elsewhere are quietly removed
    /// from their prior parent first, so a move fires only the attach
    /// hooks. Ownership reverts to the tree.
    pub fn insert_id(&mut self, parent: WidgetId, id: WidgetId) -> Result<()> {
        self.attach_last(parent, id, true)
    }

    /// Insert a new owned widget immediately before `anchor` in its
    /// parent's child list.
    pub fn insert_prev_sibling(
        &mut self,
        anchor: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        let parent = self.node(anchor)?.parent.ok_or(Error::RootSibling)?;
        let id = self.arena.insert(Node::new(widget.into()));
        self.attach_before(parent, anchor, id, true)?;
        Ok(id)
    }

    /// Insert a new owned widget immediately after `anchor` in its
    /// parent's child list.
    pub fn insert_next_sibling(
        &mut self,
        anchor: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        let parent = self.node(anchor)?.parent.ok_or(Error::RootSibling)?;
        let id = self.arena.insert(Node::new(widget.into()));
        let next = self.node(anchor)?.next_sibling;
        match next {
            Some(next) => self.attach_before(parent, next, id, true)?,
            None => self.attach_last(parent, id, true)?,
        }
        Ok(id)
    }

    /// Interpose a new widget between `anchor` and its parent: the new
    /// widget takes `anchor`'s place in the child list and `anchor` becomes
    /// its only child. The new widget inherits `anchor`'s position,
    /// alignment and ownership; `anchor` becomes owned by the new widget.
    pub fn insert_as_parent(
        &mut self,
        anchor: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        let parent = self.node(anchor)?.parent.ok_or(Error::RootSibling)?;
        let id = self.arena.insert(Node::new(widget.into()));
        let anchor_owned = self.node(anchor)?.owned_by_parent;
        let (offset, align) = {
            let n = self.node(anchor)?;
            (n.offset, n.align)
        };
        self.attach_before(parent, anchor, id, anchor_owned)?;
        {
            let n = self.node_mut(id)?;
            n.offset = offset;
            n.align = align;
        }
        self.attach_last(id, anchor, true)?;
        {
            let n = self.node_mut(anchor)?;
            n.offset = Offset::zero();
            n.align = AlignPair::default();
        }
        Ok(id)
    }

    /// Detach a widget from its parent, firing removal hooks.
    ///
    /// Removing an owned widget hands its ownership back as a receipt. An
    /// already-detached widget is a no-op returning `None`, so removal is
    /// idempotent. The root cannot be removed.
    pub fn remove(&mut self, id: WidgetId) -> Result<Option<OwnedWidget>> {
        self.remove_inner(id, true)
    }

    /// Detach a widget without firing any hooks. Focus held inside the
    /// subtree is dropped silently.
    pub fn remove_quiet(&mut self, id: WidgetId) -> Result<Option<OwnedWidget>> {
        self.remove_inner(id, false)
    }

    fn remove_inner(&mut self, id: WidgetId, loud: bool) -> Result<Option<OwnedWidget>> {
        if id == self.root {
            return Err(Error::InvalidOperation("cannot remove the root widget".into()));
        }
        let node = self.node(id)?;
        if node.parent.is_none() {
            return Ok(None);
        }
        let owned = node.owned_by_parent;
        self.detach(id, loud)?;
        self.debug_check_invariants();
        Ok(owned.then_some(OwnedWidget { id }))
    }

    /// Detach every child of `id` in order, firing removal hooks, and hand
    /// back receipts for the children the tree owned.
    pub fn clear_children(&mut self, id: WidgetId) -> Result<Vec<OwnedWidget>> {
        self.clear_children_inner(id, true)
    }

    /// Like [`Tree::clear_children`], without firing any hooks.
    pub fn clear_children_quiet(&mut self, id: WidgetId) -> Result<Vec<OwnedWidget>> {
        self.clear_children_inner(id, false)
    }

    fn clear_children_inner(&mut self, id: WidgetId, loud: bool) -> Result<Vec<OwnedWidget>> {
        let mut receipts = Vec::new();
        while let Some(child) = self.node(id)?.first_child {
            if let Some(r) = self.remove_inner(child, loud)? {
                receipts.push(r);
            }
        }
        Ok(receipts)
    }

    /// Remove a widget but splice its children into its place, preserving
    /// sibling order. The promoted children keep their ownership flags and
    /// are shifted by the extracted widget's offset so they stay put
    /// visually; no hooks fire for them. Removal hooks fire for the
    /// extracted widget itself, and a receipt is returned if it was owned.
    pub fn extract(&mut self, id: WidgetId) -> Result<Option<OwnedWidget>> {
        if id == self.root {
            return Err(Error::InvalidOperation("cannot extract the root widget".into()));
        }
        let node = self.node(id)?;
        let parent = node
            .parent
            .ok_or_else(|| Error::InvalidOperation("cannot extract a detached widget".into()))?;
        let owned = node.owned_by_parent;
        let shift = node.offset;

        // Focus on the extracted widget itself is dropped; focus below it
        // survives the promotion since the holder stays in the tree.
        if self.node(id)?.focused {
            self.clear_focus_flags(id);
        }

        let children = self.children(id)?;
        let prev = self.node(id)?.prev_sibling;
        let next = self.node(id)?.next_sibling;

        // Unlink the extracted widget.
        self.unlink(id)?;

        // Splice the children into the vacated position, in order.
        let mut left = prev;
        for &child in &children {
            {
                let n = self.node_mut(child)?;
                n.parent = Some(parent);
                n.prev_sibling = left;
                n.next_sibling = next;
                n.offset = n.offset + shift;
            }
            match left {
                Some(l) => self.node_mut(l)?.next_sibling = Some(child),
                None => self.node_mut(parent)?.first_child = Some(child),
            }
            left = Some(child);
        }
        if let Some(l) = left {
            self.node_mut(l)?.next_sibling = next;
        }
        if let Some(n) = next {
            self.node_mut(n)?.prev_sibling = left;
        }
        // The extracted widget keeps no child links, and with its
        // children gone it can no longer sit on the focus path. Its
        // ancestors stay correct: a promoted holder remains under the
        // same parent.
        {
            let n = self.node_mut(id)?;
            n.first_child = None;
            n.child_focused = false;
        }

        self.structure_changed(parent);
        let _ = self.with_widget_mut(id, |w, ctx| w.on_removed_from(ctx));
        let _ = self.with_widget_mut(parent, |w, ctx| w.on_child_removed(id, ctx));
        self.debug_check_invariants();
        Ok(owned.then_some(OwnedWidget { id }))
    }

    /// Destroy a widget and its owned descendants.
    ///
    /// The widget is loudly removed from its parent first. Owned
    /// descendants are freed with it; unowned descendants are quietly
    /// detached and survive as detached subtrees. The root cannot be
    /// destroyed.
    pub fn destroy(&mut self, id: WidgetId) -> Result<()> {
        if id == self.root {
            return Err(Error::InvalidOperation("cannot destroy the root widget".into()));
        }
        if self.node(id)?.parent.is_some() {
            self.detach(id, true)?;
        }
        self.destroy_subtree(id);
        self.debug_check_invariants();
        Ok(())
    }

    fn destroy_subtree(&mut self, id: WidgetId) {
        let Ok(children) = self.children(id) else {
            return;
        };
        for child in children {
            let owned = self
                .arena
                .get(child)
                .map(|n| n.owned_by_parent)
                .unwrap_or(false);
            if owned {
                self.destroy_subtree(child);
            } else {
                self.forget_focus_in(child);
                let _ = self.unlink(child);
            }
        }
        self.forget_focus_in(id);
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.arena.remove(id);
    }

    /// Attach `id` as the last child of `parent`.
    fn attach_last(&mut self, parent: WidgetId, id: WidgetId, owned: bool) -> Result<()> {
        self.pre_attach(parent, id)?;
        let last = {
            let mut last = None;
            let mut cursor = self.node(parent)?.first_child;
            while let Some(c) = cursor {
                last = Some(c);
                cursor = self.node(c)?.next_sibling;
            }
            last
        };
        {
            let n = self.node_mut(id)?;
            n.parent = Some(parent);
            n.prev_sibling = last;
            n.next_sibling = None;
            n.owned_by_parent = owned;
        }
        match last {
            Some(l) => self.node_mut(l)?.next_sibling = Some(id),
            None => self.node_mut(parent)?.first_child = Some(id),
        }
        self.post_attach(parent, id)
    }

    /// Attach `id` immediately before `anchor` under `parent`.
    fn attach_before(
        &mut self,
        parent: WidgetId,
        anchor: WidgetId,
        id: WidgetId,
        owned: bool,
    ) -> Result<()> {
        self.pre_attach(parent, id)?;
        let prev = self.node(anchor)?.prev_sibling;
        {
            let n = self.node_mut(id)?;
            n.parent = Some(parent);
            n.prev_sibling = prev;
            n.next_sibling = Some(anchor);
            n.owned_by_parent = owned;
        }
        self.node_mut(anchor)?.prev_sibling = Some(id);
        match prev {
            Some(p) => self.node_mut(p)?.next_sibling = Some(id),
            None => self.node_mut(parent)?.first_child = Some(id),
        }
        self.post_attach(parent, id)
    }

    /// Validation and auto-detach shared by all attach paths.
    fn pre_attach(&mut self, parent: WidgetId, id: WidgetId) -> Result<()> {
        self.node(parent)?;
        self.node(id)?;
        if id == parent || self.is_ancestor_of(id, parent) {
            return Err(Error::WouldCreateCycle { parent, child: id });
        }
        if id == self.root {
            return Err(Error::InvalidOperation("cannot attach the root widget".into()));
        }
        // Re-adding moves the widget: detach quietly from the prior
        // parent first, so a move fires only the attach hooks.
        if self.node(id)?.parent.is_some() {
            self.detach(id, false)?;
        }
        Ok(())
    }

    fn post_attach(&mut self, parent: WidgetId, id: WidgetId) -> Result<()> {
        self.structure_changed(parent);
        {
            let n = self.node_mut(id)?;
            n.preferred_stale = true;
            n.needs_relayout = true;
            n.needs_redraw = true;
        }
        let _ = self.with_widget_mut(id, |w, ctx| w.on_added_to(ctx));
        let _ = self.with_widget_mut(parent, |w, ctx| w.on_child_added(id, ctx));
        self.debug_check_invariants();
        Ok(())
    }

    /// Unlink from the parent and fire removal hooks when loud. Focus held
    /// in the subtree is silently dropped: a detached subtree cannot hold
    /// the tree's focus.
    fn detach(&mut self, id: WidgetId, loud: bool) -> Result<()> {
        let parent = self
            .node(id)?
            .parent
            .ok_or_else(|| Error::InvalidOperation("widget has no parent".into()))?;
        self.forget_focus_in(id);
        self.forget_capture_in(id);
        self.unlink(id)?;
        self.structure_changed(parent);
        if loud {
            let _ = self.with_widget_mut(id, |w, ctx| w.on_removed_from(ctx));
            let _ = self.with_widget_mut(parent, |w, ctx| w.on_child_removed(id, ctx));
        }
        Ok(())
    }

    /// Splice a widget out of its sibling list, clearing its links.
    fn unlink(&mut self, id: WidgetId) -> Result<()> {
        let (parent, prev, next) = {
            let n = self.node(id)?;
            (n.parent, n.prev_sibling, n.next_sibling)
        };
        if let Some(p) = prev {
            self.node_mut(p)?.next_sibling = next;
        } else if let Some(parent) = parent {
            self.node_mut(parent)?.first_child = next;
        }
        if let Some(n) = next {
            self.node_mut(n)?.prev_sibling = prev;
        }
        let n = self.node_mut(id)?;
        n.parent = None;
        n.prev_sibling = None;
        n.next_sibling = None;
        Ok(())
    }

    /// Dirty bookkeeping after a child list change.
    fn structure_changed(&mut self, parent: WidgetId) {
        self.preferred_size_changed(parent);
        self.request_relayout(parent);
        self.request_redraw(parent);
    }

    // ------------------------------------------------------------------
    // Traversal

    /// Pre-order traversal: the widget first, then its subtree. Skip
    /// prunes the subtree; Handle stops the walk.
    pub fn preorder<R>(
        &mut self,
        id: WidgetId,
        f: &mut dyn FnMut(&mut Tree, WidgetId) -> Result<Walk<R>>,
    ) -> Result<Walk<R>> {
        match f(self, id)? {
            Walk::Skip => return Ok(Walk::Continue),
            Walk::Handle(v) => return Ok(Walk::Handle(v)),
            Walk::Continue => (),
        }
        for child in self.children(id)? {
            if !self.is_valid(child) {
                continue;
            }
            if let Walk::Handle(v) = self.preorder(child, f)? {
                return Ok(Walk::Handle(v));
            }
        }
        Ok(Walk::Continue)
    }

    /// Post-order traversal: the subtree first, then the widget. A child
    /// returning Skip stops further children but still visits the widget
    /// itself; Handle stops the walk.
    pub fn postorder<R>(
        &mut self,
        id: WidgetId,
        f: &mut dyn FnMut(&mut Tree, WidgetId) -> Result<Walk<R>>,
    ) -> Result<Walk<R>> {
        for child in self.children(id)? {
            if !self.is_valid(child) {
                continue;
            }
            match self.postorder(child, f)? {
                Walk::Skip => break,
                Walk::Handle(v) => return Ok(Walk::Handle(v)),
                Walk::Continue => (),
            }
        }
        f(self, id)
    }

    /// Ids of the subtree rooted at `id` in pre-order.
    pub fn descendant_ids(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if !self.is_valid(cur) {
                continue;
            }
            out.push(cur);
            if let Ok(mut children) = self.children(cur) {
                children.reverse();
                stack.extend(children);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Lookup

    /// Find the first widget in pre-order under `start` with the given
    /// name.
    pub fn find_name(&self, start: WidgetId, name: &str) -> Option<WidgetId> {
        self.descendant_ids(start)
            .into_iter()
            .find(|&id| self.arena.get(id).map(|n| n.name == name).unwrap_or(false))
    }

    /// Like [`Tree::find_name`], but an absent widget is an error.
    pub fn require_name(&self, start: WidgetId, name: &str) -> Result<WidgetId> {
        self.find_name(start, name)
            .ok_or_else(|| Error::WidgetNotFound(name.into()))
    }

    /// Find the first widget in pre-order under `start` with the given
    /// concrete type.
    pub fn find_type<T: Widget>(&self, start: WidgetId) -> Option<WidgetId> {
        let want = TypeId::of::<T>();
        self.descendant_ids(start)
            .into_iter()
            .find(|&id| self.arena.get(id).map(|n| n.type_id == want).unwrap_or(false))
    }

    /// Like [`Tree::find_type`], but an absent widget is an error.
    pub fn require_type<T: Widget>(&self, start: WidgetId) -> Result<WidgetId> {
        self.find_type::<T>(start)
            .ok_or_else(|| Error::WidgetNotFound(std::any::type_name::<T>().into()))
    }

    /// Walk up the parent chain looking for a widget of the given type.
    pub fn find_ancestor_type<T: Widget>(&self, id: WidgetId) -> Option<WidgetId> {
        let want = TypeId::of::<T>();
        let mut cursor = self.arena.get(id).and_then(|n| n.parent);
        while let Some(p) = cursor {
            let n = self.arena.get(p)?;
            if n.type_id == want {
                return Some(p);
            }
            cursor = n.parent;
        }
        None
    }

    /// All widgets under `start` carrying the given class, in pre-order.
    pub fn find_class(&self, start: WidgetId, class: &str) -> Vec<WidgetId> {
        self.descendant_ids(start)
            .into_iter()
            .filter(|&id| {
                self.arena
                    .get(id)
                    .map(|n| n.classes.iter().any(|c| c == class))
                    .unwrap_or(false)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Names, classes and geometry state

    /// The widget's name.
    pub fn name(&self, id: WidgetId) -> Result<WidgetName> {
        Ok(self.node(id)?.name.clone())
    }

    /// Rename a widget. The name must be a valid widget name.
    pub fn set_name(&mut self, id: WidgetId, name: &str) -> Result<()> {
        let name = WidgetName::try_from(name)?;
        self.node_mut(id)?.name = name;
        Ok(())
    }

    /// Add a style class.
    pub fn add_class(&mut self, id: WidgetId, class: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a style class.
    pub fn remove_class(&mut self, id: WidgetId, class: &str) -> Result<()> {
        self.node_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Does the widget carry this class?
    pub fn has_class(&self, id: WidgetId, class: &str) -> Result<bool> {
        Ok(self.node(id)?.classes.iter().any(|c| c == class))
    }

    /// The widget's classes.
    pub fn classes(&self, id: WidgetId) -> Result<Vec<String>> {
        Ok(self.node(id)?.classes.clone())
    }

    /// Assigned size.
    pub fn size(&self, id: WidgetId) -> Result<Size> {
        Ok(self.node(id)?.size)
    }

    /// Offset in the parent's frame.
    pub fn offset(&self, id: WidgetId) -> Result<Offset> {
        Ok(self.node(id)?.offset)
    }

    /// Move the widget within its parent. Affects the parent's composite
    /// preferred size.
    pub fn set_offset(&mut self, id: WidgetId, offset: Offset) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.offset == offset {
            return Ok(());
        }
        node.offset = offset;
        let parent = node.parent;
        if let Some(p) = parent {
            self.preferred_size_changed(p);
            self.request_redraw(p);
        }
        Ok(())
    }

    /// Inner padding.
    pub fn padding(&self, id: WidgetId) -> Result<Padding> {
        Ok(self.node(id)?.padding)
    }

    /// Set the inner padding, invalidating the widget's own demand.
    pub fn set_padding(&mut self, id: WidgetId, padding: Padding) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.padding == padding {
            return Ok(());
        }
        node.padding = padding;
        self.preferred_size_changed(id);
        self.request_relayout(id);
        Ok(())
    }

    /// Alignment within the parent's content box.
    pub fn align(&self, id: WidgetId) -> Result<AlignPair> {
        Ok(self.node(id)?.align)
    }

    /// Set alignment. The parent decides placement, so it relayouts.
    pub fn set_align(&mut self, id: WidgetId, align: AlignPair) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.align == align {
            return Ok(());
        }
        node.align = align;
        if let Some(p) = node.parent {
            self.request_relayout(p);
        }
        Ok(())
    }

    /// Is the widget hidden?
    pub fn hidden(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.hidden)
    }

    /// Hide or show a widget. Hidden widgets are skipped by layout,
    /// drawing and pointer dispatch, and drop any focus they hold.
    pub fn set_hidden(&mut self, id: WidgetId, hidden: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.hidden == hidden {
            return Ok(());
        }
        node.hidden = hidden;
        let parent = node.parent;
        if hidden {
            self.forget_focus_in(id);
            self.forget_capture_in(id);
        }
        if let Some(p) = parent {
            self.preferred_size_changed(p);
            self.request_redraw(p);
        } else {
            self.request_redraw(id);
        }
        Ok(())
    }

    /// Is the tree's owner responsible for this widget's lifetime?
    pub fn owned_by_parent(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.owned_by_parent)
    }

    /// Is this widget marked for relayout?
    pub fn needs_relayout(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.needs_relayout)
    }

    /// Is some descendant of this widget marked for relayout?
    pub fn child_needs_relayout(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.child_needs_relayout)
    }

    /// Is this widget marked for redraw?
    pub fn needs_redraw(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.needs_redraw)
    }

    /// Is some descendant of this widget marked for redraw?
    pub fn child_needs_redraw(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.child_needs_redraw)
    }

    // ------------------------------------------------------------------
    // Dirty-flag scheduling

    /// Mark a widget as needing layout, and mark the path to it. The
    /// ancestor walk stops at the first ancestor already marked, so bursts
    /// of requests stay cheap.
    pub fn request_relayout(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.needs_relayout = true;
        let mut cursor = node.parent;
        while let Some(anc) = cursor {
            let Some(n) = self.arena.get_mut(anc) else {
                break;
            };
            if n.child_needs_relayout {
                break;
            }
            n.child_needs_relayout = true;
            cursor = n.parent;
        }
    }

    /// Mark a widget as needing redraw, with the same early-stopping
    /// ancestor walk as [`Tree::request_relayout`].
    pub fn request_redraw(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.needs_redraw = true;
        let mut cursor = node.parent;
        while let Some(anc) = cursor {
            let Some(n) = self.arena.get_mut(anc) else {
                break;
            };
            if n.child_needs_redraw {
                break;
            }
            n.child_needs_redraw = true;
            cursor = n.parent;
        }
    }

    /// Invalidate the widget's preferred size cache and everything that
    /// depends on it. Each ancestor's cache goes stale in turn and its
    /// hook is told which child changed; the walk stops early once it
    /// reaches an ancestor already invalidated.
    pub fn preferred_size_changed(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.preferred_stale = true;
        node.needs_relayout = true;
        let mut cursor = (id, node.parent);
        while let Some(parent) = cursor.1 {
            let child = cursor.0;
            let Some(n) = self.arena.get_mut(parent) else {
                break;
            };
            if n.preferred_stale && n.needs_relayout {
                break;
            }
            n.preferred_stale = true;
            n.needs_relayout = true;
            let next = n.parent;
            let _ = self.with_widget_mut(parent, |w, ctx| {
                w.on_child_preferred_size_changed(child, ctx)
            });
            cursor = (parent, next);
        }
        self.request_relayout(id);
    }

    // ------------------------------------------------------------------
    // The update pass

    /// Drain the deferred task queue and resolve layout. Call once per
    /// frame from the UI thread. Returns whether any work was done, so a
    /// driver can decide whether a redraw is worth it.
    ///
    /// Tasks tied to a destroyed widget are dropped unrun. Tasks queued by
    /// the running batch run on the next update.
    pub fn update(&mut self) -> Result<bool> {
        let mut worked = false;
        for task in self.tasks.drain() {
            if let Some(owner) = task.owner {
                if !self.arena.contains_key(owner) {
                    tracing::trace!(?owner, "dropping task for destroyed widget");
                    continue;
                }
            }
            (task.work)(self);
            worked = true;
        }
        let root = self.root;
        {
            let n = self.node(root)?;
            worked |= n.needs_relayout || n.child_needs_relayout;
        }
        self.update_layout(root)?;
        Ok(worked)
    }

    /// Start an asynchronous image load tied to a widget's lifetime. The
    /// completion closure runs on the UI thread during a later update; it
    /// never runs if the widget is destroyed first.
    pub fn load_image<F>(&self, owner: WidgetId, path: &str, done: F)
    where
        F: FnOnce(&mut Tree, Result<ImageData>) + Send + 'static,
    {
        let sender = self.tasks.sender();
        self.loader.load_image(
            path,
            Box::new(move |result| {
                sender.defer_owned(owner, move |tree| done(tree, result));
            }),
        );
    }

    /// Start an asynchronous font load tied to a widget's lifetime.
    pub fn load_font<F>(&self, owner: WidgetId, path: &str, done: F)
    where
        F: FnOnce(&mut Tree, Result<FontData>) + Send + 'static,
    {
        let sender = self.tasks.sender();
        self.loader.load_font(
            path,
            Box::new(move |result| {
                sender.defer_owned(owner, move |tree| done(tree, result));
            }),
        );
    }

    // ------------------------------------------------------------------
    // Event dispatch

    /// Start delivering pointer events directly to this widget, skipping
    /// positional routing. Used for drag interactions that must keep
    /// receiving motion after the pointer leaves the widget's box.
    pub fn capture_pointer(&mut self, id: WidgetId) -> Result<()> {
        self.node(id)?;
        self.capture = Some(id);
        Ok(())
    }

    /// End pointer capture.
    pub fn release_pointer(&mut self) {
        self.capture = None;
    }

    /// The widget currently capturing pointer events, if any.
    pub fn pointer_captured(&self) -> Option<WidgetId> {
        self.capture
    }

    /// Drop pointer capture if the capturing widget sits in this subtree.
    fn forget_capture_in(&mut self, id: WidgetId) {
        if let Some(cap) = self.capture {
            if cap == id || self.is_ancestor_of(id, cap) {
                self.capture = None;
            }
        }
    }

    /// Route an input event through the tree.
    ///
    /// A pointer-capturing widget receives all pointer events directly,
    /// with the position translated into its frame and no fallback
    /// routing. Otherwise the focused widget gets first refusal on
    /// everything except plain pointer motion; if it declines, normal
    /// dispatch runs from the root: pre-order with position translation
    /// for most kinds, children-first for scroll.
    pub fn dispatch_event(&mut self, ev: &mut Event) -> Result<EventOutcome> {
        if ev.kind.is_pointer() {
            if let Some(cap) = self.capture {
                if !self.is_valid(cap) {
                    self.capture = None;
                } else {
                    let abs = self.abs_offset(cap)?;
                    let saved = ev.pos;
                    ev.pos = saved - abs;
                    let out = self.with_widget_mut(cap, |w, ctx| w.on_event(ev, ctx))?;
                    ev.pos = saved;
                    return Ok(out);
                }
            }
        }
        if ev.kind.bypasses_to_focus() {
            if let Some(holder) = self.focus {
                let abs = self.abs_offset(holder)?;
                let saved = ev.pos;
                ev.pos = saved - abs;
                let out = self.with_widget_mut(holder, |w, ctx| w.on_event(ev, ctx))?;
                ev.pos = saved;
                if out.is_handled() {
                    return Ok(EventOutcome::Handle);
                }
            }
        }
        let root = self.root;
        self.dispatch_to(root, ev)
    }

    /// Dispatch to a widget with `ev.pos` in the widget's parent frame.
    fn dispatch_to(&mut self, id: WidgetId, ev: &mut Event) -> Result<EventOutcome> {
        let node = self.node(id)?;
        if node.hidden {
            return Ok(EventOutcome::Ignore);
        }
        if !node.rect().contains(ev.pos) {
            return Ok(EventOutcome::Ignore);
        }
        let offset = node.offset;
        let saved = ev.pos;
        ev.pos = saved - offset;

        let out = if ev.kind.is_post_order() {
            // Children first; the widget itself only if no child handled.
            if self.dispatch_children(id, ev)?.is_handled() {
                EventOutcome::Handle
            } else {
                self.with_widget_mut(id, |w, ctx| w.on_event(ev, ctx))?
            }
        } else {
            let own = self.with_widget_mut(id, |w, ctx| w.on_event(ev, ctx))?;
            if own.is_handled() {
                own
            } else {
                self.dispatch_children(id, ev)?
            }
        };

        ev.pos = saved;
        Ok(out)
    }

    /// Offer the event to children back-to-front: the topmost (last added)
    /// child is tried first.
    fn dispatch_children(&mut self, id: WidgetId, ev: &mut Event) -> Result<EventOutcome> {
        let mut children = self.children(id)?;
        children.reverse();
        for child in children {
            if !self.is_valid(child) {
                continue;
            }
            if self.dispatch_to(child, ev)?.is_handled() {
                return Ok(EventOutcome::Handle);
            }
        }
        Ok(EventOutcome::Ignore)
    }

    // ------------------------------------------------------------------
    // Invariant checks

    /// Full-tree structural sweep, compiled into debug builds only and run
    /// after every structural mutation.
    pub(crate) fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let mut focused_count = 0;
            for (id, node) in &self.arena {
                // Sibling links are symmetric and children point home.
                let mut cursor = node.first_child;
                let mut prev: Option<WidgetId> = None;
                while let Some(c) = cursor {
                    let cn = self.arena.get(c).unwrap_or_else(|| {
                        panic!("child link {c:?} of {id:?} is dead");
                    });
                    debug_assert_eq!(cn.parent, Some(id), "child {c:?} parent link mismatch");
                    debug_assert_eq!(cn.prev_sibling, prev, "prev link mismatch at {c:?}");
                    prev = Some(c);
                    cursor = cn.next_sibling;
                }
                if node.focused {
                    focused_count += 1;
                    debug_assert_eq!(self.focus, Some(id), "focus cache out of sync");
                }
                if node.child_focused {
                    let holder = self.focus.unwrap_or_else(|| {
                        panic!("{id:?} has child_focused but nothing holds focus")
                    });
                    debug_assert!(
                        self.is_ancestor_of(id, holder),
                        "{id:?} has child_focused but holder is elsewhere"
                    );
                }
            }
            debug_assert!(focused_count <= 1, "more than one widget holds focus");
            if let Some(holder) = self.focus {
                debug_assert!(
                    self.arena.get(holder).map(|n| n.focused).unwrap_or(false),
                    "focus cache points at an unfocused widget"
                );
            }
        }
    }
}
