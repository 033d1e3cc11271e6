use trellis::{Context, FocusSource, Result, Tree, Widget};

struct Root;
impl Widget for Root {}

struct List;
impl Widget for List {}

/// A focusable leaf. `sticky` refuses to give focus up again.
struct FLeaf {
    sticky: bool,
}

impl FLeaf {
    fn new() -> Self {
        FLeaf { sticky: false }
    }
}

impl Widget for FLeaf {
    fn on_focus(&mut self, gained: bool, _source: FocusSource, _ctx: &mut Context) -> bool {
        if gained { true } else { !self.sticky }
    }
}

#[test]
fn focus_flow_through_ancestors() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let l = t.insert(r, List)?;
    let w = t.insert(l, FLeaf::new())?;

    assert!(t.request_focus(w, FocusSource::Code)?);
    assert_eq!(t.focused(), Some(w));
    assert!(t.is_focused(w));
    assert!(t.has_focused_descendant(l));
    assert!(t.has_focused_descendant(r));

    assert!(t.remove_focus(w, FocusSource::Code)?);
    assert_eq!(t.focused(), None);
    assert!(!t.is_focused(w));
    assert!(!t.has_focused_descendant(l));
    assert!(!t.has_focused_descendant(r));
    Ok(())
}

#[test]
fn refocus_is_a_noop() -> Result<()> {
    let mut t = Tree::new(Root);
    let w = t.insert(t.root(), FLeaf::new())?;
    assert!(t.request_focus(w, FocusSource::Code)?);
    assert!(t.request_focus(w, FocusSource::Code)?);
    assert_eq!(t.focused(), Some(w));
    Ok(())
}

#[test]
fn containers_decline_focus() -> Result<()> {
    let mut t = Tree::new(Root);
    let l = t.insert(t.root(), List)?;
    assert!(!t.request_focus(l, FocusSource::Code)?);
    assert_eq!(t.focused(), None);
    Ok(())
}

#[test]
fn focus_moves_between_widgets() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let a = t.insert(r, FLeaf::new())?;
    let b = t.insert(r, FLeaf::new())?;

    assert!(t.request_focus(a, FocusSource::Pointer)?);
    assert!(t.request_focus(b, FocusSource::Pointer)?);
    assert_eq!(t.focused(), Some(b));
    assert!(!t.is_focused(a));
    assert!(t.has_focused_descendant(r));
    Ok(())
}

#[test]
fn sticky_holder_blocks_new_requests() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let a = t.insert(r, FLeaf { sticky: true })?;
    let b = t.insert(r, FLeaf::new())?;

    assert!(t.request_focus(a, FocusSource::Code)?);
    assert!(!t.request_focus(b, FocusSource::Code)?);
    assert_eq!(t.focused(), Some(a), "a refused request leaves focus put");

    assert!(!t.remove_focus(a, FocusSource::Code)?);
    assert_eq!(t.focused(), Some(a));
    Ok(())
}

#[test]
fn remove_focus_without_focus_fails_quietly() -> Result<()> {
    let mut t = Tree::new(Root);
    let w = t.insert(t.root(), FLeaf::new())?;
    assert!(!t.remove_focus(w, FocusSource::Code)?);
    Ok(())
}

#[test]
fn clear_focus_finds_the_holder() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let l = t.insert(r, List)?;
    let w = t.insert(l, FLeaf::new())?;

    assert!(!t.clear_focus(FocusSource::Code)?, "nothing held focus yet");
    assert!(t.request_focus(w, FocusSource::Code)?);
    assert!(t.clear_focus_in(l, FocusSource::Code)?);
    assert_eq!(t.focused(), None);

    assert!(t.request_focus(w, FocusSource::Code)?);
    let other = t.insert(r, List)?;
    assert!(
        !t.clear_focus_in(other, FocusSource::Code)?,
        "subtrees without the holder are short-circuited"
    );
    assert_eq!(t.focused(), Some(w));
    Ok(())
}

#[test]
fn detaching_the_holder_drops_focus() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let l = t.insert(r, List)?;
    let w = t.insert(l, FLeaf::new())?;

    assert!(t.request_focus(w, FocusSource::Code)?);
    let receipt = t.remove(l)?.expect("receipt");
    assert_eq!(t.focused(), None);
    assert!(!t.has_focused_descendant(r));
    t.destroy(receipt.id())?;
    Ok(())
}

#[test]
fn hiding_the_holder_drops_focus() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let w = t.insert(r, FLeaf::new())?;

    assert!(t.request_focus(w, FocusSource::Code)?);
    t.set_hidden(w, true)?;
    assert_eq!(t.focused(), None);
    assert!(!t.has_focused_descendant(r));
    Ok(())
}

#[test]
fn destroying_the_holder_drops_focus() -> Result<()> {
    let mut t = Tree::new(Root);
    let r = t.root();
    let w = t.insert(r, FLeaf::new())?;
    assert!(t.request_focus(w, FocusSource::Code)?);
    t.destroy(w)?;
    assert_eq!(t.focused(), None);
    assert!(!t.has_focused_descendant(r));
    Ok(())
}
