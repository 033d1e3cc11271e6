//! The focus state machine.
//!
//! At most one widget holds focus. Ancestors of the holder carry the
//! `child_focused` flag, so subtrees with no focused descendant can be
//! short-circuited. All transitions are negotiated: widgets veto gaining or
//! losing focus by returning false from their focus hook, and a refused
//! transition is a normal boolean outcome rather than an error.

use crate::{error::Result, tree::Tree, Error, WidgetId};

/// Why a focus transition is happening. Passed to the focus hook so
/// widgets can treat, say, pointer focus differently from tab traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusSource {
    /// A pointer interaction.
    Pointer,
    /// Keyboard traversal.
    Keyboard,
    /// A direct programmatic request.
    Code,
}

impl Tree {
    /// The widget currently holding focus, if any.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus
    }

    /// Does this widget hold focus?
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.arena.get(id).map(|n| n.focused).unwrap_or(false)
    }

    /// Is the focus holder somewhere strictly below this widget?
    pub fn has_focused_descendant(&self, id: WidgetId) -> bool {
        self.arena.get(id).map(|n| n.child_focused).unwrap_or(false)
    }

    /// Ask a widget to take focus.
    ///
    /// Already-focused widgets succeed as a no-op. Otherwise the widget is
    /// offered focus first; if it accepts, the current holder is asked to
    /// yield. A refusal on either side fails the request and leaves focus
    /// where it was, with the accepting widget given a balancing release
    /// call so its gained/lost hooks stay paired.
    pub fn request_focus(&mut self, id: WidgetId, source: FocusSource) -> Result<bool> {
        let node = self.arena.get(id).ok_or(Error::InvalidNode(id))?;
        if node.focused {
            return Ok(true);
        }
        let accepted = self.with_widget_mut(id, |w, ctx| w.on_focus(true, source, ctx))?;
        if !accepted {
            return Ok(false);
        }
        if let Some(holder) = self.focus {
            let yielded = self.with_widget_mut(holder, |w, ctx| w.on_focus(false, source, ctx))?;
            if !yielded {
                let _ = self.with_widget_mut(id, |w, ctx| w.on_focus(false, source, ctx));
                return Ok(false);
            }
            self.clear_focus_flags(holder);
        }
        self.set_focus_flags(id);
        self.notify_focus_ancestors(id);
        tracing::debug!(?id, ?source, "focus acquired");
        Ok(true)
    }

    /// Ask a widget to give up focus. Fails as a no-op if the widget does
    /// not hold focus, or if its hook refuses the release.
    pub fn remove_focus(&mut self, id: WidgetId, source: FocusSource) -> Result<bool> {
        let node = self.arena.get(id).ok_or(Error::InvalidNode(id))?;
        if !node.focused {
            return Ok(false);
        }
        let yielded = self.with_widget_mut(id, |w, ctx| w.on_focus(false, source, ctx))?;
        if !yielded {
            return Ok(false);
        }
        self.clear_focus_flags(id);
        tracing::debug!(?id, ?source, "focus released");
        Ok(true)
    }

    /// Remove focus from whichever widget holds it, wherever it is.
    pub fn clear_focus(&mut self, source: FocusSource) -> Result<bool> {
        match self.focus {
            Some(holder) => self.remove_focus(holder, source),
            None => Ok(false),
        }
    }

    /// Remove focus if the holder is within this widget's subtree,
    /// including the widget itself. Subtrees with no focused descendant
    /// return false without walking anything.
    pub fn clear_focus_in(&mut self, id: WidgetId, source: FocusSource) -> Result<bool> {
        let node = self.arena.get(id).ok_or(Error::InvalidNode(id))?;
        if node.focused {
            return self.remove_focus(id, source);
        }
        if !node.child_focused {
            return Ok(false);
        }
        let mut cursor = node.first_child;
        while let Some(child) = cursor {
            let cn = self.arena.get(child).ok_or(Error::InvalidNode(child))?;
            if cn.focused || cn.child_focused {
                return self.clear_focus_in(child, source);
            }
            cursor = cn.next_sibling;
        }
        Ok(false)
    }

    /// Set the focused flag and mark the ancestor chain. Any prior holder
    /// must already have been cleared.
    fn set_focus_flags(&mut self, id: WidgetId) {
        self.focus = Some(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.focused = true;
        }
        let mut cursor = self.arena.get(id).and_then(|n| n.parent);
        while let Some(anc) = cursor {
            let Some(node) = self.arena.get_mut(anc) else {
                break;
            };
            node.child_focused = true;
            cursor = node.parent;
        }
        self.request_redraw(id);
    }

    /// Clear the focused flag and unwind `child_focused` up the chain,
    /// stopping at an ancestor that is itself focused or still has some
    /// other focused descendant.
    pub(crate) fn clear_focus_flags(&mut self, id: WidgetId) {
        if self.focus == Some(id) {
            self.focus = None;
        }
        let parent = match self.arena.get_mut(id) {
            Some(node) => {
                node.focused = false;
                node.parent
            }
            None => None,
        };
        let mut cursor = parent;
        while let Some(anc) = cursor {
            if self.subtree_holds_focus(anc) {
                break;
            }
            let Some(node) = self.arena.get_mut(anc) else {
                break;
            };
            node.child_focused = false;
            cursor = node.parent;
        }
        self.request_redraw(id);
    }

    /// Drop focus state inside a subtree without running any hooks. Used
    /// when the subtree is being detached or destroyed.
    pub(crate) fn forget_focus_in(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if node.focused {
            self.clear_focus_flags(id);
        } else if node.child_focused {
            if let Some(holder) = self.focus {
                if self.is_ancestor_of(id, holder) {
                    self.clear_focus_flags(holder);
                    if let Some(node) = self.arena.get_mut(id) {
                        node.child_focused = false;
                    }
                }
            }
        }
    }

    fn subtree_holds_focus(&self, id: WidgetId) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        if node.focused {
            return true;
        }
        let mut cursor = node.first_child;
        while let Some(child) = cursor {
            let Some(cn) = self.arena.get(child) else {
                break;
            };
            if cn.focused || cn.child_focused {
                return true;
            }
            cursor = cn.next_sibling;
        }
        false
    }

    /// Tell each ancestor where the newly focused widget sits, with the
    /// area translated into that ancestor's local frame as we walk up.
    fn notify_focus_ancestors(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let mut area = node.rect();
        let mut cursor = node.parent;
        while let Some(anc) = cursor {
            let _ = self.with_widget_mut(anc, |w, ctx| w.on_descendant_focused(area, id, ctx));
            let Some(node) = self.arena.get(anc) else {
                break;
            };
            area = area.shift(node.offset);
            cursor = node.parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Result;
    use crate::testing::{get_path, reset_state, ttree, La, Lb};

    use super::FocusSource;

    #[test]
    fn hooks_pair_on_transitions() -> Result<()> {
        let mut tt = ttree();
        assert!(tt.tree.request_focus(tt.la, FocusSource::Code)?);
        assert_eq!(
            get_path(),
            vec!["la.focus_gained", "ba.descendant_focused", "r.descendant_focused"]
        );

        reset_state();
        assert!(tt.tree.request_focus(tt.lc, FocusSource::Code)?);
        assert_eq!(
            get_path(),
            vec![
                "lc.focus_gained",
                "la.focus_lost",
                "bb.descendant_focused",
                "r.descendant_focused"
            ]
        );
        assert_eq!(tt.tree.focused(), Some(tt.lc));
        Ok(())
    }

    #[test]
    fn refused_offer_changes_nothing() -> Result<()> {
        let mut tt = ttree();
        tt.tree.widget_mut::<Lb>(tt.lb)?.accept_focus = false;
        reset_state();
        assert!(!tt.tree.request_focus(tt.lb, FocusSource::Keyboard)?);
        assert_eq!(get_path(), vec!["lb.focus_gained"]);
        assert_eq!(tt.tree.focused(), None);
        Ok(())
    }

    #[test]
    fn sticky_holder_gets_a_balancing_release() -> Result<()> {
        let mut tt = ttree();
        tt.tree.request_focus(tt.la, FocusSource::Code)?;
        tt.tree.widget_mut::<La>(tt.la)?.release_focus = false;

        reset_state();
        assert!(!tt.tree.request_focus(tt.lb, FocusSource::Code)?);
        assert_eq!(
            get_path(),
            vec!["lb.focus_gained", "la.focus_lost", "lb.focus_lost"]
        );
        assert_eq!(tt.tree.focused(), Some(tt.la));
        Ok(())
    }

    #[test]
    fn clear_focus_in_short_circuits() -> Result<()> {
        let mut tt = ttree();
        tt.tree.request_focus(tt.ld, FocusSource::Code)?;

        // The other branch has no focused descendant to find.
        assert!(!tt.tree.clear_focus_in(tt.ba, FocusSource::Code)?);
        assert_eq!(tt.tree.focused(), Some(tt.ld));

        assert!(tt.tree.clear_focus_in(tt.bb, FocusSource::Code)?);
        assert_eq!(tt.tree.focused(), None);
        assert!(!tt.tree.has_focused_descendant(tt.r));
        Ok(())
    }
}
