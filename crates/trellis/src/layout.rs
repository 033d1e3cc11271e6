//! Layout demand types and the accumulation rules composite widgets use to
//! derive demand from their children.

use geom::Size;

use crate::{error::Result, tree::Tree, Error, WidgetId};

/// A widget's layout demand: the sizes it can usefully occupy.
///
/// Invariant after [`PreferredSize::sanitize`]: `min <= pref <= max`
/// componentwise, and all components are non-negative whole units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferredSize {
    /// Smallest size at which the widget remains usable.
    pub min: Size,
    /// The size the widget would take given free rein.
    pub pref: Size,
    /// Largest size the widget can make use of.
    pub max: Size,
}

impl Default for PreferredSize {
    fn default() -> Self {
        Self {
            min: Size::zero(),
            pref: Size::zero(),
            max: Size::infinite(),
        }
    }
}

impl PreferredSize {
    /// A fixed demand: min, pref and max all equal.
    pub fn fixed(size: Size) -> Self {
        Self {
            min: size,
            pref: size,
            max: size,
        }
    }

    /// An exact preference that can shrink to zero but not grow.
    pub fn at_most(size: Size) -> Self {
        Self {
            min: Size::zero(),
            pref: size,
            max: size,
        }
    }

    /// Enforce the ordering invariant and round everything up to whole
    /// device units. `pref` is clamped into `[min, max]` after `max` is
    /// raised to at least `min`.
    pub fn sanitize(mut self) -> Self {
        self.min = self.min.ceil();
        self.max = self.max.max(self.min).ceil();
        self.pref = self.pref.clamp(self.min, self.max).ceil();
        self
    }

    /// Clamp an assigned size into this demand's range.
    pub fn clamp(&self, size: Size) -> Size {
        size.clamp(self.min, self.max)
    }
}

/// Accumulates child demands into a composite demand.
///
/// Minimums combine by taking the maximum, maximums by taking the minimum,
/// and preferences by taking the maximum, which is the overlay rule: the
/// composite must be big enough for every child and no bigger than any
/// child's hard ceiling.
#[derive(Debug, Clone, Copy)]
pub struct SizeAccumulator {
    acc: Option<PreferredSize>,
}

impl SizeAccumulator {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self { acc: None }
    }

    /// Fold one child demand into the composite.
    pub fn add(&mut self, child: PreferredSize) {
        self.acc = Some(match self.acc {
            None => child,
            Some(acc) => PreferredSize {
                min: acc.min.max(child.min),
                pref: acc.pref.max(child.pref),
                max: Size::new(acc.max.w.min(child.max.w), acc.max.h.min(child.max.h)),
            },
        });
    }

    /// The composite demand, sanitized. Empty accumulators yield the
    /// default unconstrained demand.
    pub fn finish(self) -> PreferredSize {
        self.acc.unwrap_or_default().sanitize()
    }
}

impl Default for SizeAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// The widget's layout demand, recomputing through its hook only when
    /// the cached value is stale.
    pub fn preferred_size(&mut self, id: WidgetId) -> Result<PreferredSize> {
        let node = self.node(id)?;
        if !node.preferred_stale {
            return Ok(node.preferred);
        }
        let computed = self
            .with_widget_mut(id, |w, ctx| w.on_calc_preferred_size(ctx))?
            .sanitize();
        let node = self.node_mut(id)?;
        node.preferred = computed;
        node.preferred_stale = false;
        Ok(computed)
    }

    /// Incremental layout driver: full relayout where `needs_relayout` is
    /// set, descent where only `child_needs_relayout` is set, nothing
    /// where the subtree is clean. Cost follows the dirty frontier.
    pub fn update_layout(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node(id)?;
        if node.hidden {
            return Ok(());
        }
        if node.needs_relayout {
            return self.force_relayout(id);
        }
        if node.child_needs_relayout {
            self.node_mut(id)?.child_needs_relayout = false;
            for child in self.children(id)? {
                if self.is_valid(child) {
                    self.update_layout(child)?;
                }
            }
        }
        Ok(())
    }

    /// Unconditionally lay out this widget's subtree. A widget with no
    /// parent and no assigned size resolves its own size to its preference
    /// first; an externally assigned size, e.g. from [`Tree::resize`], is
    /// kept as-is. Attached widgets are sized by their parent before this
    /// is called.
    pub fn force_relayout(&mut self, id: WidgetId) -> Result<()> {
        if self.node(id)?.parent.is_none() && self.node(id)?.size.is_zero() {
            let pref = self.preferred_size(id)?.pref;
            self.assign_size(id, pref)?;
        }
        {
            let node = self.node_mut(id)?;
            node.needs_relayout = false;
            node.child_needs_relayout = false;
        }
        self.with_widget_mut(id, |w, ctx| w.on_layout(ctx))?;
        for child in self.children(id)? {
            if self.is_valid(child) {
                self.update_layout(child)?;
            }
        }
        Ok(())
    }

    /// Give a widget its size. Sub-unit changes are no-ops so resize
    /// notifications cannot ping-pong; real changes mark the widget for
    /// relayout and redraw and fire its resize hook.
    pub(crate) fn assign_size(&mut self, id: WidgetId, size: Size) -> Result<()> {
        let node = self.node_mut(id)?;
        let old = node.size;
        if old.near(size) {
            return Ok(());
        }
        node.size = size;
        node.needs_relayout = true;
        node.needs_redraw = true;
        let _ = self.with_widget_mut(id, |w, ctx| w.on_resized(old, ctx));
        Ok(())
    }

    /// Resize from outside, e.g. when the backing window changes. Only
    /// meaningful on a widget that has no parent.
    pub fn resize(&mut self, id: WidgetId, size: Size) -> Result<()> {
        if self.node(id)?.parent.is_some() {
            return Err(Error::InvalidOperation(
                "only a root widget can be resized directly".into(),
            ));
        }
        self.assign_size(id, size)?;
        self.request_relayout(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_orders_components() {
        let p = PreferredSize {
            min: Size::new(10.0, 10.0),
            pref: Size::new(5.0, 50.0),
            max: Size::new(40.0, 20.0),
        }
        .sanitize();
        assert_eq!(p.min, Size::new(10.0, 10.0));
        assert_eq!(p.pref, Size::new(10.0, 20.0));
        assert_eq!(p.max, Size::new(40.0, 20.0));
    }

    #[test]
    fn sanitize_rounds_up() {
        let p = PreferredSize::fixed(Size::new(10.2, 10.8)).sanitize();
        assert_eq!(p.pref, Size::new(11.0, 11.0));
    }

    #[test]
    fn accumulator_overlay_rule() {
        let mut acc = SizeAccumulator::new();
        acc.add(PreferredSize {
            min: Size::new(10.0, 5.0),
            pref: Size::new(30.0, 10.0),
            max: Size::new(100.0, 100.0),
        });
        acc.add(PreferredSize {
            min: Size::new(5.0, 20.0),
            pref: Size::new(20.0, 40.0),
            max: Size::new(80.0, 200.0),
        });
        let p = acc.finish();
        assert_eq!(p.min, Size::new(10.0, 20.0));
        assert_eq!(p.pref, Size::new(30.0, 40.0));
        assert_eq!(p.max, Size::new(80.0, 100.0));
    }

    #[test]
    fn empty_accumulator_is_unconstrained() {
        let p = SizeAccumulator::new().finish();
        assert_eq!(p.min, Size::zero());
        assert_eq!(p.pref, Size::zero());
    }
}
