//! The renderer contract every backend satisfies, plus the shared state
//! machine and style bookkeeping backends embed.
//!
//! All drawing operations receive diagram-space geometry and a [`Color`];
//! the backend alone applies its [`crate::transform::Transform`] before
//! emitting native calls. Interactive backends additionally implement
//! [`InteractiveRenderer`] for pixel-exact UI chrome that bypasses the
//! transform.

use tracing::warn;

use crate::error::Result;
use crate::geometry::{BezPoint, Color, Point, Rectangle};
use crate::style::{Alignment, FillStyle, FontDesc, LineCaps, LineJoin, LineStyle};

/// Raw RGBA image handed to `draw_image`. Length of `data` is
/// `width * height * 4`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Render bracket state. A renderer only accepts drawing operations between
/// `begin_render` and `end_render`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Ready,
    Rendering,
}

/// State every backend embeds: the begin/end bracket, the pen flag, and the
/// current line/fill/font attributes as set by the `set_*` family.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub phase: Phase,
    /// While up, draw operations are accepted but emit nothing. Driven
    /// explicitly by the caller (which knows selection state); the renderer
    /// never inspects the diagram.
    pub pen_up: bool,
    /// Diagram units.
    pub line_width: f64,
    pub line_caps: LineCaps,
    pub line_join: LineJoin,
    pub line_style: LineStyle,
    /// Diagram units; backends derive device dash patterns from it.
    pub dash_length: f64,
    pub fill_style: FillStyle,
    pub font: FontDesc,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            phase: Phase::Ready,
            pen_up: false,
            line_width: 0.1,
            line_caps: LineCaps::default(),
            line_join: LineJoin::default(),
            line_style: LineStyle::default(),
            dash_length: 1.0,
            fill_style: FillStyle::default(),
            font: FontDesc::default(),
        }
    }
}

impl RenderState {
    /// Misuse of the bracket is a programming error, fatal in debug builds
    /// and tolerated in release.
    pub fn begin(&mut self) {
        debug_assert_eq!(self.phase, Phase::Ready, "begin_render while rendering");
        self.phase = Phase::Rendering;
    }

    pub fn end(&mut self) {
        debug_assert_eq!(self.phase, Phase::Rendering, "end_render without begin");
        self.phase = Phase::Ready;
    }

    /// True when a draw operation should emit output. Asserts the bracket in
    /// debug builds; pen-up suppresses output without being an error.
    pub fn can_draw(&self) -> bool {
        debug_assert_eq!(self.phase, Phase::Rendering, "draw outside render bracket");
        self.phase == Phase::Rendering && !self.pen_up
    }
}

/// The drawing capability table. One implementation per backend; callers
/// dispatch through `&mut dyn Renderer`.
///
/// Provided methods build the compound primitives out of simpler ones the
/// same way for every backend; backends with a better native equivalent
/// (polylines, rectangles) override them.
pub trait Renderer {
    fn begin_render(&mut self) -> Result<()>;
    fn end_render(&mut self) -> Result<()>;

    fn set_line_width(&mut self, width: f64) -> Result<()>;
    fn set_line_caps(&mut self, caps: LineCaps) -> Result<()>;
    fn set_line_join(&mut self, join: LineJoin) -> Result<()>;
    fn set_line_style(&mut self, style: LineStyle) -> Result<()>;
    fn set_dash_length(&mut self, length: f64) -> Result<()>;
    fn set_fill_style(&mut self, style: FillStyle) -> Result<()>;
    fn set_font(&mut self, font: &FontDesc) -> Result<()>;

    /// Raises or lowers the pen. Callers use this to suppress guide
    /// decoration of unselected objects; drawing while the pen is up is
    /// accepted and emits nothing.
    fn set_pen(&mut self, up: bool) -> Result<()>;

    fn draw_line(&mut self, start: Point, end: Point, color: Color) -> Result<()>;

    fn draw_polyline(&mut self, points: &[Point], color: Color) -> Result<()> {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color)?;
        }
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        self.draw_polyline(points, color)?;
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            if last != first {
                self.draw_line(last, first, color)?;
            }
        }
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()>;

    fn draw_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if rect.is_degenerate() {
            return Ok(());
        }
        let ul = Point::new(rect.left, rect.top);
        let ur = Point::new(rect.right, rect.top);
        let lr = Point::new(rect.right, rect.bottom);
        let ll = Point::new(rect.left, rect.bottom);
        self.draw_line(ul, ur, color)?;
        self.draw_line(ur, lr, color)?;
        self.draw_line(lr, ll, color)?;
        self.draw_line(ll, ul, color)
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<()>;

    /// Arc of the ellipse inscribed in `width` x `height` around `center`.
    /// Angles in degrees, counter-clockwise, 0 pointing right.
    fn draw_arc(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        angle1: f64,
        angle2: f64,
        color: Color,
    ) -> Result<()>;

    fn fill_arc(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        angle1: f64,
        angle2: f64,
        color: Color,
    ) -> Result<()>;

    fn draw_ellipse(&mut self, center: Point, width: f64, height: f64, color: Color) -> Result<()> {
        self.draw_arc(center, width, height, 0.0, 360.0, color)
    }

    fn fill_ellipse(&mut self, center: Point, width: f64, height: f64, color: Color) -> Result<()> {
        self.fill_arc(center, width, height, 0.0, 360.0, color)
    }

    /// Strokes a bezier path. The path should begin with a single move-to;
    /// malformed paths are logged and repaired, never rejected.
    fn draw_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()>;

    /// Fills a closed bezier path (last point coincides with the first).
    fn fill_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()>;

    fn draw_string(
        &mut self,
        text: &str,
        pos: Point,
        alignment: Alignment,
        color: Color,
    ) -> Result<()>;

    /// Draws `image` with its upper-left corner at `point`, scaled to
    /// `width` x `height` diagram units.
    fn draw_image(&mut self, point: Point, width: f64, height: f64, image: &ImageData)
    -> Result<()>;

    fn draw_rounded_rect(&mut self, rect: Rectangle, color: Color, radius: f64) -> Result<()> {
        if rect.is_degenerate() {
            return Ok(());
        }
        let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
        if radius <= 0.0 {
            return self.draw_rect(rect, color);
        }
        let (l, t, r, b) = (rect.left, rect.top, rect.right, rect.bottom);

        self.draw_line(Point::new(l + radius, t), Point::new(r - radius, t), color)?;
        self.draw_line(Point::new(l + radius, b), Point::new(r - radius, b), color)?;
        self.draw_line(Point::new(l, t + radius), Point::new(l, b - radius), color)?;
        self.draw_line(Point::new(r, t + radius), Point::new(r, b - radius), color)?;

        let d = 2.0 * radius;
        self.draw_arc(Point::new(l + radius, t + radius), d, d, 90.0, 180.0, color)?;
        self.draw_arc(Point::new(r - radius, t + radius), d, d, 0.0, 90.0, color)?;
        self.draw_arc(Point::new(l + radius, b - radius), d, d, 180.0, 270.0, color)?;
        self.draw_arc(Point::new(r - radius, b - radius), d, d, 270.0, 360.0, color)
    }

    fn fill_rounded_rect(&mut self, rect: Rectangle, color: Color, radius: f64) -> Result<()> {
        if rect.is_degenerate() {
            return Ok(());
        }
        let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
        if radius <= 0.0 {
            return self.fill_rect(rect, color);
        }
        let (l, t, r, b) = (rect.left, rect.top, rect.right, rect.bottom);

        self.fill_rect(Rectangle::new(l + radius, t, r - radius, b), color)?;
        self.fill_rect(Rectangle::new(l, t + radius, r, b - radius), color)?;

        let d = 2.0 * radius;
        self.fill_arc(Point::new(l + radius, t + radius), d, d, 90.0, 180.0, color)?;
        self.fill_arc(Point::new(r - radius, t + radius), d, d, 0.0, 90.0, color)?;
        self.fill_arc(Point::new(l + radius, b - radius), d, d, 180.0, 270.0, color)?;
        self.fill_arc(Point::new(r - radius, b - radius), d, d, 270.0, 360.0, color)
    }
}

/// Extension for interactive (screen) backends: size queries, clip regions,
/// and pixel-space primitives for UI chrome that must be pixel-exact at any
/// zoom. Callers check for the capability via a trait-object query instead of
/// assuming every renderer has it.
pub trait InteractiveRenderer: Renderer {
    fn width_pixels(&self) -> u32;
    fn height_pixels(&self) -> u32;

    /// Advance width of `text` in device pixels using the current font.
    fn get_text_width(&self, text: &str) -> f64;

    fn clip_region_clear(&mut self);

    /// Extends the clip region to also cover the diagram-space `rect`.
    fn clip_region_add_rect(&mut self, rect: &Rectangle);

    fn draw_pixel_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<()>;

    fn draw_pixel_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<()>;

    fn fill_pixel_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<()>;
}

/// Emits an unsupported-fill warning and keeps rendering with solid fill.
/// Shared by backends that only know [`FillStyle::Solid`].
pub(crate) fn check_fill_style(backend: &str, style: FillStyle) {
    match style {
        FillStyle::Solid => {}
        #[allow(unreachable_patterns)]
        _ => warn!("{backend}: unsupported fill mode, falling back to solid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal backend that records line/arc/fill calls and leans on every
    /// provided method, so the defaults themselves are under test.
    #[derive(Default)]
    struct LineOnly {
        state: RenderState,
        lines: Vec<(Point, Point)>,
        arcs: usize,
        fills: usize,
    }

    impl Renderer for LineOnly {
        fn begin_render(&mut self) -> Result<()> {
            self.state.begin();
            Ok(())
        }

        fn end_render(&mut self) -> Result<()> {
            self.state.end();
            Ok(())
        }

        fn set_line_width(&mut self, width: f64) -> Result<()> {
            self.state.line_width = width;
            Ok(())
        }

        fn set_line_caps(&mut self, caps: LineCaps) -> Result<()> {
            self.state.line_caps = caps;
            Ok(())
        }

        fn set_line_join(&mut self, join: LineJoin) -> Result<()> {
            self.state.line_join = join;
            Ok(())
        }

        fn set_line_style(&mut self, style: LineStyle) -> Result<()> {
            self.state.line_style = style;
            Ok(())
        }

        fn set_dash_length(&mut self, length: f64) -> Result<()> {
            self.state.dash_length = length;
            Ok(())
        }

        fn set_fill_style(&mut self, style: FillStyle) -> Result<()> {
            self.state.fill_style = style;
            Ok(())
        }

        fn set_font(&mut self, font: &FontDesc) -> Result<()> {
            self.state.font = font.clone();
            Ok(())
        }

        fn set_pen(&mut self, up: bool) -> Result<()> {
            self.state.pen_up = up;
            Ok(())
        }

        fn draw_line(&mut self, start: Point, end: Point, _color: Color) -> Result<()> {
            if self.state.can_draw() {
                self.lines.push((start, end));
            }
            Ok(())
        }

        fn fill_polygon(&mut self, _points: &[Point], _color: Color) -> Result<()> {
            self.fills += 1;
            Ok(())
        }

        fn fill_rect(&mut self, rect: Rectangle, _color: Color) -> Result<()> {
            if rect.is_degenerate() {
                return Ok(());
            }
            self.fills += 1;
            Ok(())
        }

        fn draw_arc(
            &mut self,
            _center: Point,
            _width: f64,
            _height: f64,
            _angle1: f64,
            _angle2: f64,
            _color: Color,
        ) -> Result<()> {
            self.arcs += 1;
            Ok(())
        }

        fn fill_arc(
            &mut self,
            _center: Point,
            _width: f64,
            _height: f64,
            _angle1: f64,
            _angle2: f64,
            _color: Color,
        ) -> Result<()> {
            self.arcs += 1;
            Ok(())
        }

        fn draw_bezier(&mut self, _path: &[BezPoint], _color: Color) -> Result<()> {
            Ok(())
        }

        fn fill_bezier(&mut self, _path: &[BezPoint], _color: Color) -> Result<()> {
            Ok(())
        }

        fn draw_string(
            &mut self,
            _text: &str,
            _pos: Point,
            _alignment: Alignment,
            _color: Color,
        ) -> Result<()> {
            Ok(())
        }

        fn draw_image(
            &mut self,
            _point: Point,
            _width: f64,
            _height: f64,
            _image: &ImageData,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn ready() -> LineOnly {
        let mut r = LineOnly::default();
        r.begin_render().unwrap();
        r
    }

    #[test]
    fn default_polyline_draws_segment_per_pair() {
        let mut r = ready();
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        r.draw_polyline(&pts, Color::BLACK).unwrap();
        assert_eq!(r.lines.len(), 2);
    }

    #[test]
    fn default_polygon_closes_the_outline() {
        let mut r = ready();
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 2.0),
        ];
        r.draw_polygon(&pts, Color::BLACK).unwrap();
        assert_eq!(r.lines.len(), 3);
        assert_eq!(r.lines[2].1, pts[0]);
    }

    #[test]
    fn degenerate_rect_is_a_no_op() {
        let mut r = ready();
        r.draw_rect(Rectangle::new(5.0, 0.0, 1.0, 2.0), Color::BLACK)
            .unwrap();
        r.fill_rect(Rectangle::new(0.0, 9.0, 2.0, 1.0), Color::BLACK)
            .unwrap();
        assert!(r.lines.is_empty());
        assert_eq!(r.fills, 0);
    }

    #[test]
    fn rect_default_draws_four_edges() {
        let mut r = ready();
        r.draw_rect(Rectangle::new(0.0, 0.0, 2.0, 1.0), Color::BLACK)
            .unwrap();
        assert_eq!(r.lines.len(), 4);
    }

    #[test]
    fn pen_up_suppresses_output_but_not_state() {
        let mut r = ready();
        r.set_pen(true).unwrap();
        r.set_line_width(0.4).unwrap();
        r.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Color::BLACK)
            .unwrap();
        assert!(r.lines.is_empty());
        assert_eq!(r.state.line_width, 0.4);

        r.set_pen(false).unwrap();
        r.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Color::BLACK)
            .unwrap();
        assert_eq!(r.lines.len(), 1);
    }

    #[test]
    fn rounded_rect_splits_into_lines_and_arcs() {
        let mut r = ready();
        r.draw_rounded_rect(Rectangle::new(0.0, 0.0, 10.0, 6.0), Color::BLACK, 1.0)
            .unwrap();
        assert_eq!(r.lines.len(), 4);
        assert_eq!(r.arcs, 4);
    }

    #[test]
    fn rounded_rect_with_zero_radius_is_plain_rect() {
        let mut r = ready();
        r.fill_rounded_rect(Rectangle::new(0.0, 0.0, 4.0, 4.0), Color::BLACK, 0.0)
            .unwrap();
        assert_eq!(r.fills, 1);
        assert_eq!(r.arcs, 0);
    }

    #[test]
    #[should_panic(expected = "draw outside render bracket")]
    #[cfg(debug_assertions)]
    fn drawing_before_begin_is_fatal_in_debug() {
        let mut r = LineOnly::default();
        let _ = r.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Color::BLACK);
    }

    #[test]
    fn ellipse_defaults_to_full_arc() {
        let mut r = ready();
        r.draw_ellipse(Point::new(0.0, 0.0), 2.0, 1.0, Color::BLACK)
            .unwrap();
        r.fill_ellipse(Point::new(0.0, 0.0), 2.0, 1.0, Color::BLACK)
            .unwrap();
        assert_eq!(r.arcs, 2);
    }
}
