/*! This module defines a standard tree of instrumented widgets for testing. */
use std::cell::RefCell;

use geom::{Offset, Point, Rect, Size};

use crate::{
    context::Context,
    event::{Event, EventKind},
    focus::FocusSource,
    layout::PreferredSize,
    render::{Canvas, Color},
    resource::ImageData,
    state::WidgetName,
    tree::Tree,
    widget::{EventOutcome, Widget},
    WidgetId,
};

/// Thread-local state tracked by test widgets.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct State {
    /// Recorded event path entries.
    pub path: Vec<String>,
}

impl State {
    /// Construct a new empty state.
    pub fn new() -> Self {
        Self { path: vec![] }
    }

    /// Clear recorded events.
    pub fn reset(&mut self) {
        self.path = vec![];
    }

    /// Record a widget event.
    pub fn add_event(&mut self, n: &WidgetName, evt: &str, result: &EventOutcome) {
        let outcome = match result {
            EventOutcome::Handle => "handle",
            EventOutcome::Ignore => "ignore",
        };
        self.path.push(format!("{n}@{evt}->{outcome}"))
    }

    /// Record a lifecycle or focus hook.
    pub fn add_hook(&mut self, n: &WidgetName, hook: &str) {
        self.path.push(format!("{n}.{hook}"))
    }
}

thread_local! {
    pub(crate) static TSTATE: RefCell<State> = RefCell::new(State::new());
}

/// Clear the global test state.
pub fn reset_state() {
    TSTATE.with(|s| {
        s.borrow_mut().reset();
    });
}

/// Get the current test state.
pub fn get_state() -> State {
    TSTATE.with(|s| s.borrow().clone())
}

/// The recorded path entries since the last reset.
pub fn get_path() -> Vec<String> {
    get_state().path
}

fn event_tag(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Click(_) => "click",
        EventKind::Moved => "moved",
        EventKind::Dragged(_) => "dragged",
        EventKind::Scroll(_) => "scroll",
        EventKind::Key(_) => "key",
        EventKind::Text(_) => "text",
    }
}

/// Generate a test leaf widget type with instrumentation hooks. Leaves
/// accept focus and report a fixed 10x10 preferred size unless overridden.
macro_rules! leaf {
    ($a:ident) => {
        /// Test leaf widget with instrumented behavior.
        pub struct $a {
            /// Next event outcome override.
            pub next_outcome: Option<EventOutcome>,
            /// Reported preferred size.
            pub pref: PreferredSize,
            /// Whether to accept focus when offered.
            pub accept_focus: bool,
            /// Whether to allow focus to be taken away.
            pub release_focus: bool,
        }

        impl $a {
            /// Construct a new leaf widget.
            pub fn new() -> Self {
                $a {
                    next_outcome: None,
                    pref: PreferredSize::fixed(Size::new(10.0, 10.0)),
                    accept_focus: true,
                    release_focus: true,
                }
            }

            fn handle(&mut self, evt: &str) -> EventOutcome {
                let ret = self.next_outcome.take().unwrap_or(EventOutcome::Ignore);
                TSTATE.with(|s| {
                    s.borrow_mut().add_event(&Widget::name(self), evt, &ret);
                });
                ret
            }
        }

        impl Default for $a {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Widget for $a {
            fn name(&self) -> WidgetName {
                WidgetName::convert(stringify!($a))
            }

            fn on_calc_preferred_size(&mut self, _ctx: &mut Context) -> PreferredSize {
                self.pref
            }

            fn on_event(&mut self, event: &mut Event, _ctx: &mut Context) -> EventOutcome {
                self.handle(event_tag(&event.kind))
            }

            fn on_focus(&mut self, gained: bool, _source: FocusSource, _ctx: &mut Context) -> bool {
                let hook = if gained { "focus_gained" } else { "focus_lost" };
                TSTATE.with(|s| s.borrow_mut().add_hook(&Widget::name(self), hook));
                if gained {
                    self.accept_focus
                } else {
                    self.release_focus
                }
            }

            fn on_added_to(&mut self, _ctx: &mut Context) {
                TSTATE.with(|s| s.borrow_mut().add_hook(&Widget::name(self), "added_to"));
            }

            fn on_removed_from(&mut self, _ctx: &mut Context) {
                TSTATE.with(|s| s.borrow_mut().add_hook(&Widget::name(self), "removed_from"));
            }
        }
    };
}

/// Generate a test branch widget type with instrumentation hooks. Branches
/// decline focus and use the default composite layout.
macro_rules! branch {
    ($a:ident) => {
        /// Test branch widget with instrumented behavior.
        pub struct $a {
            /// Next event outcome override.
            pub next_outcome: Option<EventOutcome>,
        }

        impl $a {
            /// Construct a new branch widget.
            pub fn new() -> Self {
                $a { next_outcome: None }
            }

            fn handle(&mut self, evt: &str) -> EventOutcome {
                let ret = self.next_outcome.take().unwrap_or(EventOutcome::Ignore);
                TSTATE.with(|s| {
                    s.borrow_mut().add_event(&Widget::name(self), evt, &ret);
                });
                ret
            }
        }

        impl Default for $a {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Widget for $a {
            fn name(&self) -> WidgetName {
                WidgetName::convert(stringify!($a))
            }

            fn on_event(&mut self, event: &mut Event, _ctx: &mut Context) -> EventOutcome {
                self.handle(event_tag(&event.kind))
            }

            fn on_child_added(&mut self, _child: WidgetId, _ctx: &mut Context) {
                TSTATE.with(|s| s.borrow_mut().add_hook(&Widget::name(self), "child_added"));
            }

            fn on_child_removed(&mut self, _child: WidgetId, _ctx: &mut Context) {
                TSTATE.with(|s| s.borrow_mut().add_hook(&Widget::name(self), "child_removed"));
            }

            fn on_descendant_focused(
                &mut self,
                _area: Rect,
                _descendant: WidgetId,
                _ctx: &mut Context,
            ) {
                TSTATE.with(|s| {
                    s.borrow_mut().add_hook(&Widget::name(self), "descendant_focused")
                });
            }
        }
    };
}

leaf!(La);
leaf!(Lb);
leaf!(Lc);
leaf!(Ld);
branch!(Ba);
branch!(Bb);
branch!(R);

/// A standard two-branch tree with ids captured for direct assertion:
///
/// ```text
/// r
/// ├── ba
/// │   ├── la
/// │   └── lb
/// └── bb
///     ├── lc
///     └── ld
/// ```
pub struct TestTree {
    /// The tree under test.
    pub tree: Tree,
    /// Root id.
    pub r: WidgetId,
    /// First branch.
    pub ba: WidgetId,
    /// First leaf under `ba`.
    pub la: WidgetId,
    /// Second leaf under `ba`.
    pub lb: WidgetId,
    /// Second branch.
    pub bb: WidgetId,
    /// First leaf under `bb`.
    pub lc: WidgetId,
    /// Second leaf under `bb`.
    pub ld: WidgetId,
}

/// Build the standard test tree and reset the recorded path.
pub fn ttree() -> TestTree {
    let mut tree = Tree::new(R::new());
    let r = tree.root();
    let ba = tree.insert(r, Ba::new()).unwrap();
    let la = tree.insert(ba, La::new()).unwrap();
    let lb = tree.insert(ba, Lb::new()).unwrap();
    let bb = tree.insert(r, Bb::new()).unwrap();
    let lc = tree.insert(bb, Lc::new()).unwrap();
    let ld = tree.insert(bb, Ld::new()).unwrap();
    reset_state();
    TestTree {
        tree,
        r,
        ba,
        la,
        lb,
        bb,
        lc,
        ld,
    }
}

/// A canvas that records the operations performed against it as strings,
/// for asserting on draw order and clipping.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    /// Recorded operations in call order.
    pub ops: Vec<String>,
}

impl RecordingCanvas {
    /// An empty recording canvas.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn push_frame(&mut self, offset: Offset, clip: Rect) {
        self.ops.push(format!("push {offset} clip {clip}"));
    }

    fn pop_frame(&mut self) {
        self.ops.push("pop".into());
    }

    fn solid_rect(&mut self, rect: Rect, _color: Color) {
        self.ops.push(format!("solid {rect}"));
    }

    fn frame_rect(&mut self, rect: Rect, _color: Color) {
        self.ops.push(format!("frame {rect}"));
    }

    fn round_rect(&mut self, rect: Rect, radius: f32, _color: Color) {
        self.ops.push(format!("round {rect} r{radius}"));
    }

    fn polygon(&mut self, points: &[Point], _color: Color) {
        self.ops.push(format!("polygon {}pts", points.len()));
    }

    fn lines(&mut self, points: &[Point], closed: bool, _color: Color) {
        self.ops.push(format!("lines {}pts closed={closed}", points.len()));
    }

    fn text(&mut self, pos: Point, text: &str, _color: Color) {
        self.ops.push(format!("text {pos} {text:?}"));
    }

    fn image(&mut self, rect: Rect, image: &ImageData) {
        self.ops.push(format!("image {rect} {}x{}", image.width, image.height));
    }
}
