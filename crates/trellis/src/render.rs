//! The drawing abstraction and the tree's draw pass.
//!
//! The tree does not render anything itself. Backends implement [`Canvas`]
//! and the draw pass walks the tree, wrapping each child in a frame push so
//! widgets always draw in their own local coordinates.

use geom::{Offset, Point, Rect};

use crate::{error::Result, resource::ImageData, tree::Tree, Error, WidgetId};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// An opaque color from red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// A color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// The surface widgets draw onto.
///
/// Coordinates passed to the primitives are in the local frame of the
/// widget currently being drawn. The tree brackets each child's drawing in
/// a `push_frame`/`pop_frame` pair carrying the child's offset and clip
/// box, so implementations maintain a transform/clip stack.
pub trait Canvas {
    /// Enter a child frame: translate by `offset` and clip to `clip`
    /// (expressed in the new frame).
    fn push_frame(&mut self, offset: Offset, clip: Rect);

    /// Leave the innermost frame.
    fn pop_frame(&mut self);

    /// Fill a rectangle with a solid color.
    fn solid_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle.
    fn frame_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rectangle with rounded corners.
    fn round_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Fill a convex polygon.
    fn polygon(&mut self, points: &[Point], color: Color);

    /// Stroke a line strip through `points`; `closed` joins the last point
    /// back to the first.
    fn lines(&mut self, points: &[Point], closed: bool, color: Color);

    /// Draw a run of text with its baseline origin at `pos`.
    fn text(&mut self, pos: Point, text: &str, color: Color);

    /// Draw a decoded image scaled into `rect`.
    fn image(&mut self, rect: Rect, image: &ImageData);
}

impl Tree {
    /// Draw the tree onto a canvas. Layout is resolved first, so the pass
    /// always draws current geometry.
    ///
    /// With `minimal` set, subtrees whose redraw flags are all clear are
    /// skipped. A widget that does draw forces its whole subtree to draw
    /// with it, since its background has just been repainted. Both redraw
    /// flags are cleared on everything drawn.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, minimal: bool) -> Result<()> {
        let root = self.root();
        self.update_layout(root)?;
        self.draw_widget(root, canvas, minimal)
    }

    fn draw_widget(&mut self, id: WidgetId, canvas: &mut dyn Canvas, minimal: bool) -> Result<()> {
        let node = self.arena.get(id).ok_or(Error::InvalidNode(id))?;
        if node.hidden {
            return Ok(());
        }
        if minimal && !node.needs_redraw && !node.child_needs_redraw {
            return Ok(());
        }
        let full = !minimal || node.needs_redraw;

        if full {
            self.with_widget_mut(id, |w, ctx| w.on_draw(canvas, ctx))?;
        }
        // A repainted parent invalidates everything above it, so its
        // children draw in full.
        let child_minimal = !full && minimal;
        for child in self.children(id)? {
            let cnode = self.arena.get(child).ok_or(Error::InvalidNode(child))?;
            if cnode.hidden {
                continue;
            }
            if child_minimal && !cnode.needs_redraw && !cnode.child_needs_redraw {
                continue;
            }
            canvas.push_frame(cnode.offset, cnode.size.rect());
            let res = self.draw_widget(child, canvas, child_minimal);
            canvas.pop_frame();
            res?;
        }
        if full {
            self.with_widget_mut(id, |w, ctx| w.on_draw_over(canvas, ctx))?;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.needs_redraw = false;
            node.child_needs_redraw = false;
        }
        Ok(())
    }
}
