//! Recording backend: captures every dispatched operation together with a
//! snapshot of the renderer state instead of producing output.
//!
//! Used by tests to assert the dispatch contract, and handy as a display
//! list for replaying a scene onto another backend.

use crate::api::{ImageData, InteractiveRenderer, RenderState, Renderer, check_fill_style};
use crate::error::Result;
use crate::geometry::{BezPoint, Color, Point, Rectangle};
use crate::style::{Alignment, FillStyle, FontDesc, LineCaps, LineJoin, LineStyle};
use crate::transform::Transform;

/// Style attributes in effect when an operation was recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub line_width: f64,
    pub line_caps: LineCaps,
    pub line_join: LineJoin,
    pub line_style: LineStyle,
    pub dash_length: f64,
    pub fill_style: FillStyle,
    pub font: FontDesc,
}

impl From<&RenderState> for Snapshot {
    fn from(state: &RenderState) -> Self {
        Self {
            line_width: state.line_width,
            line_caps: state.line_caps,
            line_join: state.line_join,
            line_style: state.line_style,
            dash_length: state.dash_length,
            fill_style: state.fill_style,
            font: state.font.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Line {
        start: Point,
        end: Point,
        color: Color,
        state: Snapshot,
    },
    Polyline {
        points: Vec<Point>,
        color: Color,
        state: Snapshot,
    },
    Polygon {
        points: Vec<Point>,
        fill: bool,
        color: Color,
        state: Snapshot,
    },
    Rect {
        rect: Rectangle,
        fill: bool,
        color: Color,
        state: Snapshot,
    },
    Arc {
        center: Point,
        width: f64,
        height: f64,
        angle1: f64,
        angle2: f64,
        fill: bool,
        color: Color,
        state: Snapshot,
    },
    Ellipse {
        center: Point,
        width: f64,
        height: f64,
        fill: bool,
        color: Color,
        state: Snapshot,
    },
    Bezier {
        path: Vec<BezPoint>,
        fill: bool,
        color: Color,
        state: Snapshot,
    },
    Text {
        text: String,
        pos: Point,
        alignment: Alignment,
        color: Color,
        state: Snapshot,
    },
    Image {
        point: Point,
        width: f64,
        height: f64,
        source_width: u32,
        source_height: u32,
        state: Snapshot,
    },
    ClipClear,
    ClipAddRect {
        rect: Rectangle,
    },
    PixelLine {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    },
    PixelRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        fill: bool,
        color: Color,
    },
}

/// A renderer that records instead of drawing. Implements the interactive
/// extension too, so callers exercising pixel-space chrome can be tested
/// against it.
pub struct RecordingRenderer {
    state: RenderState,
    transform: Transform,
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingRenderer {
    pub fn new(transform: Transform, width: u32, height: u32) -> Self {
        Self {
            state: RenderState::default(),
            transform,
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    fn record(&mut self, op: DrawOp) {
        if self.state.can_draw() {
            self.ops.push(op);
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }
}

impl Renderer for RecordingRenderer {
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
        check_fill_style("recording_renderer", style);
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

    fn draw_line(&mut self, start: Point, end: Point, color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Line {
            start,
            end,
            color,
            state,
        });
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Polyline {
            points: points.to_vec(),
            color,
            state,
        });
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Polygon {
            points: points.to_vec(),
            fill: false,
            color,
            state,
        });
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Polygon {
            points: points.to_vec(),
            fill: true,
            color,
            state,
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if rect.is_degenerate() {
            return Ok(());
        }
        let state = self.snapshot();
        self.record(DrawOp::Rect {
            rect,
            fill: false,
            color,
            state,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if rect.is_degenerate() {
            return Ok(());
        }
        let state = self.snapshot();
        self.record(DrawOp::Rect {
            rect,
            fill: true,
            color,
            state,
        });
        Ok(())
    }

    fn draw_arc(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        angle1: f64,
        angle2: f64,
        color: Color,
    ) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Arc {
            center,
            width,
            height,
            angle1,
            angle2,
            fill: false,
            color,
            state,
        });
        Ok(())
    }

    fn fill_arc(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        angle1: f64,
        angle2: f64,
        color: Color,
    ) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Arc {
            center,
            width,
            height,
            angle1,
            angle2,
            fill: true,
            color,
            state,
        });
        Ok(())
    }

    fn draw_ellipse(&mut self, center: Point, width: f64, height: f64, color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Ellipse {
            center,
            width,
            height,
            fill: false,
            color,
            state,
        });
        Ok(())
    }

    fn fill_ellipse(&mut self, center: Point, width: f64, height: f64, color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Ellipse {
            center,
            width,
            height,
            fill: true,
            color,
            state,
        });
        Ok(())
    }

    fn draw_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Bezier {
            path: path.to_vec(),
            fill: false,
            color,
            state,
        });
        Ok(())
    }

    fn fill_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Bezier {
            path: path.to_vec(),
            fill: true,
            color,
            state,
        });
        Ok(())
    }

    fn draw_string(
        &mut self,
        text: &str,
        pos: Point,
        alignment: Alignment,
        color: Color,
    ) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Text {
            text: text.to_owned(),
            pos,
            alignment,
            color,
            state,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        point: Point,
        width: f64,
        height: f64,
        image: &ImageData,
    ) -> Result<()> {
        let state = self.snapshot();
        self.record(DrawOp::Image {
            point,
            width,
            height,
            source_width: image.width,
            source_height: image.height,
            state,
        });
        Ok(())
    }
}

impl InteractiveRenderer for RecordingRenderer {
    fn width_pixels(&self) -> u32 {
        self.width
    }

    fn height_pixels(&self) -> u32 {
        self.height
    }

    fn get_text_width(&self, text: &str) -> f64 {
        // Same estimate the raster backend uses, so chrome layout tested
        // against the recorder transfers.
        let height = self.transform.length_to_device(self.state.font.height);
        text.chars().count() as f64 * height * 0.54
    }

    fn clip_region_clear(&mut self) {
        self.ops.push(DrawOp::ClipClear);
    }

    fn clip_region_add_rect(&mut self, rect: &Rectangle) {
        self.ops.push(DrawOp::ClipAddRect { rect: *rect });
    }

    fn draw_pixel_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<()> {
        self.record(DrawOp::PixelLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
        Ok(())
    }

    fn draw_pixel_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<()> {
        self.record(DrawOp::PixelRect {
            x,
            y,
            width,
            height,
            fill: false,
            color,
        });
        Ok(())
    }

    fn fill_pixel_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<()> {
        self.record(DrawOp::PixelRect {
            x,
            y,
            width,
            height,
            fill: true,
            color,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> RecordingRenderer {
        let transform = Transform::new(10.0, Point::new(0.0, 0.0)).unwrap();
        let mut r = RecordingRenderer::new(transform, 100, 100);
        r.begin_render().unwrap();
        r
    }

    #[test]
    fn records_ops_with_current_style() {
        let mut r = recorder();
        r.set_line_width(0.2).unwrap();
        r.set_line_style(LineStyle::Dashed).unwrap();
        r.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Color::BLACK)
            .unwrap();
        r.end_render().unwrap();

        match &r.ops()[0] {
            DrawOp::Line { state, .. } => {
                assert_eq!(state.line_width, 0.2);
                assert_eq!(state.line_style, LineStyle::Dashed);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn pen_up_drops_draw_ops() {
        let mut r = recorder();
        r.set_pen(true).unwrap();
        r.draw_ellipse(Point::new(1.0, 1.0), 2.0, 2.0, Color::BLACK)
            .unwrap();
        r.set_pen(false).unwrap();
        r.draw_ellipse(Point::new(1.0, 1.0), 2.0, 2.0, Color::BLACK)
            .unwrap();
        r.end_render().unwrap();
        assert_eq!(r.ops().len(), 1);
    }

    #[test]
    fn degenerate_rects_record_nothing() {
        let mut r = recorder();
        r.draw_rect(Rectangle::new(4.0, 0.0, 1.0, 2.0), Color::BLACK)
            .unwrap();
        r.fill_rect(Rectangle::new(0.0, 5.0, 2.0, 1.0), Color::BLACK)
            .unwrap();
        r.end_render().unwrap();
        assert!(r.ops().is_empty());
    }

    #[test]
    fn interactive_extension_records_pixel_ops() {
        let mut r = recorder();
        r.clip_region_add_rect(&Rectangle::new(0.0, 0.0, 5.0, 5.0));
        r.draw_pixel_line(0, 0, 10, 0, Color::BLACK).unwrap();
        r.fill_pixel_rect(1, 1, 3, 3, Color::WHITE).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.ops().len(), 3);
        assert_eq!(r.width_pixels(), 100);
    }

    #[test]
    fn text_width_scales_with_zoom_and_font() {
        let mut r = recorder();
        let font = FontDesc {
            family: "sans".into(),
            height: 1.0,
        };
        r.set_font(&font).unwrap();
        r.end_render().unwrap();
        let w = r.get_text_width("abcd");
        assert!((w - 4.0 * 10.0 * 0.54).abs() < 1e-9);
    }
}
