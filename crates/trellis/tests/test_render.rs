use geom::{Offset, Point, Rect, Size};
use trellis::layout::PreferredSize;
use trellis::render::{Canvas, Color};
use trellis::resource::ImageData;
use trellis::{Context, Result, Tree, Widget};

#[derive(Default)]
struct RecCanvas {
    ops: Vec<String>,
}

impl Canvas for RecCanvas {
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
        self.ops.push(format!("text {pos} {text}"));
    }
    fn image(&mut self, rect: Rect, _image: &ImageData) {
        self.ops.push(format!("image {rect}"));
    }
}

/// Fills its box and frames it over its children.
struct Framed;

impl Widget for Framed {
    fn on_draw(&mut self, canvas: &mut dyn Canvas, ctx: &mut Context) {
        canvas.solid_rect(ctx.local_rect(), Color::WHITE);
    }
    fn on_draw_over(&mut self, canvas: &mut dyn Canvas, ctx: &mut Context) {
        canvas.frame_rect(ctx.local_rect(), Color::BLACK);
    }
}

/// A fixed-size filled box.
struct Box10;

impl Widget for Box10 {
    fn on_calc_preferred_size(&mut self, _ctx: &mut Context) -> PreferredSize {
        PreferredSize::fixed(Size::new(10.0, 10.0))
    }
    fn on_draw(&mut self, canvas: &mut dyn Canvas, ctx: &mut Context) {
        canvas.solid_rect(ctx.local_rect(), Color::BLACK);
    }
}

fn framed_pair() -> Result<(Tree, [trellis::WidgetId; 3])> {
    let mut t = Tree::new(Framed);
    let r = t.root();
    let a = t.insert(r, Box10)?;
    t.set_offset(a, (0.0, 0.0).into())?;
    let b = t.insert(r, Box10)?;
    t.set_offset(b, (20.0, 0.0).into())?;
    t.resize(r, Size::new(100.0, 100.0))?;
    Ok((t, [r, a, b]))
}

#[test]
fn draw_order_background_children_foreground() -> Result<()> {
    let (mut t, _) = framed_pair()?;
    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;
    assert_eq!(
        c.ops,
        vec![
            "solid 0 0 100 100",
            "push 0 0 clip 0 0 10 10",
            "solid 0 0 10 10",
            "pop",
            "push 20 0 clip 0 0 10 10",
            "solid 0 0 10 10",
            "pop",
            "frame 0 0 100 100",
        ]
    );
    Ok(())
}

#[test]
fn minimal_draw_skips_clean_subtrees() -> Result<()> {
    let (mut t, [_r, _a, b]) = framed_pair()?;
    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;

    // Everything is clean now: a minimal pass draws nothing.
    let mut c = RecCanvas::default();
    t.draw(&mut c, true)?;
    assert!(c.ops.is_empty());

    // Dirty one child: only its subtree is repainted.
    t.request_redraw(b);
    let mut c = RecCanvas::default();
    t.draw(&mut c, true)?;
    assert_eq!(
        c.ops,
        vec!["push 20 0 clip 0 0 10 10", "solid 0 0 10 10", "pop"]
    );
    Ok(())
}

#[test]
fn full_draw_repaints_everything() -> Result<()> {
    let (mut t, _) = framed_pair()?;
    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;

    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;
    assert_eq!(c.ops.len(), 8, "a full pass ignores the dirty flags");
    Ok(())
}

#[test]
fn redraw_flags_clear_after_drawing() -> Result<()> {
    let (mut t, [r, a, _b]) = framed_pair()?;
    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;
    assert!(!t.needs_redraw(r)?);
    assert!(!t.child_needs_redraw(r)?);
    assert!(!t.needs_redraw(a)?);

    t.request_redraw(a);
    assert!(t.child_needs_redraw(r)?);
    let mut c = RecCanvas::default();
    t.draw(&mut c, true)?;
    assert!(!t.needs_redraw(a)?);
    assert!(!t.child_needs_redraw(r)?);
    Ok(())
}

#[test]
fn hidden_subtrees_are_not_drawn() -> Result<()> {
    let (mut t, [_r, a, _b]) = framed_pair()?;
    t.set_hidden(a, true)?;
    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;
    assert_eq!(
        c.ops,
        vec![
            "solid 0 0 100 100",
            "push 20 0 clip 0 0 10 10",
            "solid 0 0 10 10",
            "pop",
            "frame 0 0 100 100",
        ]
    );
    Ok(())
}

#[test]
fn dirty_parent_repaints_its_children() -> Result<()> {
    let (mut t, [r, _a, _b]) = framed_pair()?;
    let mut c = RecCanvas::default();
    t.draw(&mut c, false)?;

    // The root repainting its background forces the children to repaint
    // even though their own flags are clean.
    t.request_redraw(r);
    let mut c = RecCanvas::default();
    t.draw(&mut c, true)?;
    assert_eq!(c.ops.len(), 8);
    Ok(())
}
