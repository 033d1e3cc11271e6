use trellis::{Error, Result, Tree, Widget};

struct Leaf;
impl Widget for Leaf {}

struct Panel;
impl Widget for Panel {}

struct RootW;
impl Widget for RootW {}

fn three_children() -> Result<(Tree, trellis::WidgetId, [trellis::WidgetId; 3])> {
    let mut t = Tree::new(RootW);
    let r = t.root();
    let a = t.insert(r, Leaf)?;
    let b = t.insert(r, Panel)?;
    let c = t.insert(r, Leaf)?;
    Ok((t, r, [a, b, c]))
}

#[test]
fn child_chain_order() -> Result<()> {
    let (t, r, [a, b, c]) = three_children()?;
    assert_eq!(t.children(r)?, vec![a, b, c]);
    assert_eq!(t.next_sibling(a)?, Some(b));
    assert_eq!(t.next_sibling(b)?, Some(c));
    assert_eq!(t.next_sibling(c)?, None);
    assert_eq!(t.prev_sibling(a)?, None);
    assert_eq!(t.prev_sibling(c)?, Some(b));
    assert_eq!(t.parent(b)?, Some(r));
    Ok(())
}

#[test]
fn remove_middle_child() -> Result<()> {
    let (mut t, r, [a, b, c]) = three_children()?;
    let receipt = t.remove(b)?.expect("owned child yields a receipt");
    assert_eq!(receipt.id(), b);
    assert_eq!(t.children(r)?, vec![a, c]);
    assert_eq!(t.next_sibling(a)?, Some(c));
    assert_eq!(t.prev_sibling(c)?, Some(a));
    assert_eq!(t.parent(b)?, None);
    assert_eq!(t.next_sibling(b)?, None);
    assert_eq!(t.prev_sibling(b)?, None);
    t.destroy(b)?;
    assert!(!t.is_valid(b));
    Ok(())
}

#[test]
fn remove_is_idempotent() -> Result<()> {
    let (mut t, _r, [_a, b, _c]) = three_children()?;
    let first = t.remove(b)?;
    assert!(first.is_some());
    let second = t.remove(b)?;
    assert!(second.is_none());
    t.destroy(b)?;
    Ok(())
}

#[test]
fn insert_next_sibling_splices() -> Result<()> {
    let (mut t, r, [a, b, c]) = three_children()?;
    let n = t.insert_next_sibling(b, Leaf)?;
    assert_eq!(t.children(r)?, vec![a, b, n, c]);
    assert_eq!(t.next_sibling(b)?, Some(n));
    assert_eq!(t.next_sibling(n)?, Some(c));
    assert_eq!(t.parent(n)?, Some(r));
    Ok(())
}

#[test]
fn insert_prev_sibling_splices() -> Result<()> {
    let (mut t, r, [a, b, c]) = three_children()?;
    let n = t.insert_prev_sibling(a, Leaf)?;
    assert_eq!(t.children(r)?, vec![n, a, b, c]);
    assert!(matches!(
        t.insert_prev_sibling(r, Leaf),
        Err(Error::RootSibling)
    ));
    Ok(())
}

#[test]
fn extract_promotes_children_in_order() -> Result<()> {
    let (mut t, r, [a, b, c]) = three_children()?;
    let x = t.insert(b, Leaf)?;
    let y = t.insert(b, Leaf)?;

    let receipt = t.extract(b)?.expect("owned widget yields a receipt");
    assert_eq!(t.children(r)?, vec![a, x, y, c]);
    assert_eq!(t.parent(x)?, Some(r));
    assert_eq!(t.parent(y)?, Some(r));
    assert_eq!(t.parent(b)?, None);
    assert!(t.children(b)?.is_empty());
    t.destroy(receipt.id())?;
    assert!(t.is_valid(x), "promoted children outlive the extraction");
    Ok(())
}

#[test]
fn insert_as_parent_interposes() -> Result<()> {
    let (mut t, r, [a, b, c]) = three_children()?;
    let w = t.insert_as_parent(b, Panel)?;
    assert_eq!(t.children(r)?, vec![a, w, c]);
    assert_eq!(t.children(w)?, vec![b]);
    assert_eq!(t.parent(b)?, Some(w));
    Ok(())
}

#[test]
fn cycles_are_rejected() -> Result<()> {
    let (mut t, r, [_a, b, _c]) = three_children()?;
    let x = t.insert(b, Leaf)?;
    assert!(matches!(
        t.insert_id(x, b),
        Err(Error::WouldCreateCycle { .. })
    ));
    assert!(matches!(
        t.insert_id(b, b),
        Err(Error::WouldCreateCycle { .. })
    ));
    assert!(t.insert_id(r, b).is_ok(), "legal reattachment still works");
    Ok(())
}

#[test]
fn reinsert_moves_between_parents() -> Result<()> {
    let (mut t, r, [a, b, _c]) = three_children()?;
    let x = t.insert(a, Leaf)?;
    t.insert_id(b, x)?;
    assert_eq!(t.parent(x)?, Some(b));
    assert!(t.children(a)?.is_empty());
    assert_eq!(t.children(r)?.len(), 3);
    Ok(())
}

#[test]
fn clear_children_returns_owned_receipts() -> Result<()> {
    let (mut t, r, [a, _b, _c]) = three_children()?;
    let u = t.insert_unowned(r, Leaf)?;
    let receipts = t.clear_children(r)?;
    assert!(t.children(r)?.is_empty());
    assert_eq!(receipts.len(), 3, "the unowned child yields no receipt");
    assert_eq!(t.parent(u)?, None);
    assert!(t.is_valid(a));
    for r in receipts {
        t.destroy(r.id())?;
    }
    Ok(())
}

#[test]
fn clear_children_quietly_fires_no_hooks() -> Result<()> {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    struct Noisy {
        removals: Arc<AtomicU32>,
    }
    impl Widget for Noisy {
        fn on_removed_from(&mut self, _ctx: &mut trellis::Context) {
            self.removals.fetch_add(1, Ordering::SeqCst);
        }
    }

    let removals = Arc::new(AtomicU32::new(0));
    let mut t = Tree::new(RootW);
    let r = t.root();
    for _ in 0..3 {
        t.insert(
            r,
            Noisy {
                removals: Arc::clone(&removals),
            },
        )?;
    }

    let receipts = t.clear_children_quiet(r)?;
    assert_eq!(receipts.len(), 3);
    assert_eq!(removals.load(Ordering::SeqCst), 0);
    for receipt in receipts {
        t.destroy(receipt.id())?;
    }
    Ok(())
}

#[test]
fn destroy_cascades_through_owned_descendants() -> Result<()> {
    let (mut t, _r, [_a, b, _c]) = three_children()?;
    let owned = t.insert(b, Leaf)?;
    let grandchild = t.insert(owned, Leaf)?;
    let external = t.insert_unowned(b, Leaf)?;

    t.destroy(b)?;
    assert!(!t.is_valid(b));
    assert!(!t.is_valid(owned));
    assert!(!t.is_valid(grandchild));
    assert!(t.is_valid(external), "unowned widgets survive their parent");
    assert_eq!(t.parent(external)?, None);
    Ok(())
}

#[test]
fn root_is_immovable() -> Result<()> {
    let (mut t, r, [a, _b, _c]) = three_children()?;
    assert!(t.remove(r).is_err());
    assert!(t.destroy(r).is_err());
    assert!(t.extract(r).is_err());
    assert!(t.insert_id(a, r).is_err());
    Ok(())
}

#[test]
fn lookup_by_name_type_and_class() -> Result<()> {
    let (mut t, r, [a, b, _c]) = three_children()?;
    t.set_name(a, "header")?;
    t.add_class(a, "chrome")?;
    t.add_class(b, "chrome")?;

    assert_eq!(t.find_name(r, "header"), Some(a));
    assert_eq!(t.require_name(r, "header")?, a);
    assert!(matches!(
        t.require_name(r, "missing"),
        Err(Error::WidgetNotFound(_))
    ));

    let x = t.insert(b, Leaf)?;
    assert_eq!(t.find_type::<Panel>(r), Some(b));
    assert_eq!(t.find_ancestor_type::<Panel>(x), Some(b));
    assert_eq!(t.find_class(r, "chrome"), vec![a, b]);
    Ok(())
}

#[test]
fn stale_ids_fail_validation() -> Result<()> {
    let (mut t, _r, [a, _b, _c]) = three_children()?;
    let receipt = t.remove(a)?.expect("receipt");
    t.destroy(receipt.id())?;
    assert!(matches!(t.children(a), Err(Error::InvalidNode(_))));
    assert!(matches!(t.remove(a), Err(Error::InvalidNode(_))));
    Ok(())
}

#[test]
fn typed_widget_access() -> Result<()> {
    struct Counter {
        clicks: u32,
    }
    impl Widget for Counter {}

    let mut t = Tree::new(RootW);
    let r = t.root();
    let c = t.insert(r, Counter { clicks: 0 })?;
    t.widget_mut::<Counter>(c)?.clicks = 3;
    assert_eq!(t.widget_ref::<Counter>(c)?.clicks, 3);
    assert!(t.widget_ref::<Leaf>(c).is_err());
    Ok(())
}
