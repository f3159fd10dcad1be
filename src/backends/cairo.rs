//! Cairo export backend behind the optional `cairo` feature.
//!
//! Cairo draws curves and dashes natively, so this backend translates each
//! operation directly instead of flattening. The caller owns the surface;
//! the renderer only takes a [`Context`].

use cairo::{Context, Format, ImageSurface, LineCap as CairoLineCap, LineJoin as CairoLineJoin};
use tracing::warn;

use crate::api::{ImageData, RenderState, Renderer, check_fill_style};
use crate::error::{RenderError, Result};
use crate::geometry::{BezPoint, Color, Point, Rectangle};
use crate::style::{Alignment, DashLengths, FillStyle, FontDesc, LineCaps, LineJoin, LineStyle};
use crate::transform::Transform;

pub struct CairoRenderer {
    ctx: Context,
    state: RenderState,
    transform: Transform,
    /// Device-space dash pattern; empty means solid.
    dash: Vec<f64>,
}

impl CairoRenderer {
    pub fn new(ctx: Context, transform: Transform) -> Self {
        Self {
            ctx,
            state: RenderState::default(),
            transform,
            dash: Vec::new(),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_source(&self, color: Color) {
        self.ctx
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }

    fn rebuild_dash(&mut self) {
        let lengths = DashLengths::derive(self.transform.length_to_device(self.state.dash_length));
        self.dash = lengths.pattern(self.state.line_style);
        self.ctx.set_dash(&self.dash, 0.0);
    }

    fn apply_stroke_attrs(&self) {
        self.ctx
            .set_line_width(self.transform.length_to_device(self.state.line_width));
        self.ctx.set_line_cap(match self.state.line_caps {
            LineCaps::Butt => CairoLineCap::Butt,
            LineCaps::Round => CairoLineCap::Round,
            LineCaps::Projecting => CairoLineCap::Square,
        });
        self.ctx.set_line_join(match self.state.line_join {
            LineJoin::Miter => CairoLineJoin::Miter,
            LineJoin::Round => CairoLineJoin::Round,
            LineJoin::Bevel => CairoLineJoin::Bevel,
        });
    }

    fn path_polyline(&self, points: &[Point], close: bool) {
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            let (x, y) = self.transform.to_device(*first);
            self.ctx.move_to(x, y);
        }
        for p in iter {
            let (x, y) = self.transform.to_device(*p);
            self.ctx.line_to(x, y);
        }
        if close {
            self.ctx.close_path();
        }
    }

    fn path_bezier(&self, path: &[BezPoint]) {
        for (i, segment) in path.iter().enumerate() {
            match *segment {
                BezPoint::MoveTo(p) => {
                    let (x, y) = self.transform.to_device(p);
                    if i == 0 {
                        self.ctx.move_to(x, y);
                    } else {
                        warn!("only the first bezier path segment may be a move-to");
                        self.ctx.line_to(x, y);
                    }
                }
                BezPoint::LineTo(p) => {
                    let (x, y) = self.transform.to_device(p);
                    self.ctx.line_to(x, y);
                }
                BezPoint::CurveTo(p1, p2, p3) => {
                    let (x1, y1) = self.transform.to_device(p1);
                    let (x2, y2) = self.transform.to_device(p2);
                    let (x3, y3) = self.transform.to_device(p3);
                    self.ctx.curve_to(x1, y1, x2, y2, x3, y3);
                }
            }
        }
    }

    /// Builds an elliptical arc path. Angles in degrees, counter-clockwise
    /// with y growing downwards, which maps to cairo's negative direction.
    fn path_arc(&self, center: Point, width: f64, height: f64, angle1: f64, angle2: f64) -> Result<()> {
        let (cx, cy) = self.transform.to_device(center);
        let rx = self.transform.length_to_device(width / 2.0);
        let ry = self.transform.length_to_device(height / 2.0);

        self.ctx.save()?;
        self.ctx.translate(cx, cy);
        self.ctx.scale(rx, ry);
        self.ctx
            .arc_negative(0.0, 0.0, 1.0, -angle1.to_radians(), -angle2.to_radians());
        self.ctx.restore()?;
        Ok(())
    }

    fn device_rect(&self, rect: Rectangle) -> (f64, f64, f64, f64) {
        let (x, y) = self.transform.to_device(Point::new(rect.left, rect.top));
        let w = self.transform.length_to_device(rect.width());
        let h = self.transform.length_to_device(rect.height());
        (x, y, w, h)
    }

    fn apply_font(&self) {
        self.ctx.select_font_face(
            &self.state.font.family,
            cairo::FontSlant::Normal,
            cairo::FontWeight::Normal,
        );
        self.ctx
            .set_font_size(self.transform.length_to_device(self.state.font.height));
    }

    fn image_surface(&self, image: &ImageData) -> Result<ImageSurface> {
        let expected = (image.width as usize)
            .checked_mul(image.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| RenderError::InvalidParam("image dimensions overflow".into()))?;
        if image.data.len() < expected {
            return Err(RenderError::InvalidParam(
                "image data shorter than its dimensions".into(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, image.width as i32, image.height as i32)
            .map_err(RenderError::from)?;
        {
            let mut data = surface.data().map_err(RenderError::backend)?;
            // Cairo wants premultiplied BGRA in native endianness.
            for (dst, src) in data.chunks_exact_mut(4).zip(image.data.chunks_exact(4)) {
                let (r, g, b, a) = (src[0] as u32, src[1] as u32, src[2] as u32, src[3] as u32);
                let px = (a << 24) | ((r * a / 255) << 16) | ((g * a / 255) << 8) | (b * a / 255);
                dst.copy_from_slice(&px.to_ne_bytes());
            }
        }
        Ok(surface)
    }
}

impl Renderer for CairoRenderer {
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
        self.rebuild_dash();
        Ok(())
    }

    fn set_dash_length(&mut self, length: f64) -> Result<()> {
        self.state.dash_length = length;
        self.rebuild_dash();
        Ok(())
    }

    fn set_fill_style(&mut self, style: FillStyle) -> Result<()> {
        check_fill_style("cairo_renderer", style);
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
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_stroke_attrs();
        let (x1, y1) = self.transform.to_device(start);
        let (x2, y2) = self.transform.to_device(end);
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke()?;
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_stroke_attrs();
        self.path_polyline(points, false);
        self.ctx.stroke()?;
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_stroke_attrs();
        self.path_polyline(points, true);
        self.ctx.stroke()?;
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.path_polyline(points, true);
        self.ctx.fill()?;
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if !self.state.can_draw() || rect.is_degenerate() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_stroke_attrs();
        let (x, y, w, h) = self.device_rect(rect);
        self.ctx.rectangle(x, y, w, h);
        self.ctx.stroke()?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if !self.state.can_draw() || rect.is_degenerate() {
            return Ok(());
        }
        self.set_source(color);
        let (x, y, w, h) = self.device_rect(rect);
        self.ctx.rectangle(x, y, w, h);
        self.ctx.fill()?;
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
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_stroke_attrs();
        self.path_arc(center, width, height, angle1, angle2)?;
        self.ctx.stroke()?;
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
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.path_arc(center, width, height, angle1, angle2)?;
        let (cx, cy) = self.transform.to_device(center);
        self.ctx.line_to(cx, cy);
        self.ctx.close_path();
        self.ctx.fill()?;
        Ok(())
    }

    fn draw_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_stroke_attrs();
        self.path_bezier(path);
        self.ctx.stroke()?;
        Ok(())
    }

    fn fill_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.path_bezier(path);
        self.ctx.close_path();
        self.ctx.fill()?;
        Ok(())
    }

    fn draw_string(
        &mut self,
        text: &str,
        pos: Point,
        alignment: Alignment,
        color: Color,
    ) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.set_source(color);
        self.apply_font();
        let (x, y) = self.transform.to_device(pos);
        let extents = self.ctx.text_extents(text)?;
        let x = match alignment {
            Alignment::Left => x,
            Alignment::Center => x - extents.width() / 2.0,
            Alignment::Right => x - extents.width(),
        };
        self.ctx.move_to(x, y);
        self.ctx.show_text(text)?;
        Ok(())
    }

    fn draw_image(
        &mut self,
        point: Point,
        width: f64,
        height: f64,
        image: &ImageData,
    ) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let surface = self.image_surface(image)?;
        let (x, y) = self.transform.to_device(point);
        let dev_w = self.transform.length_to_device(width);
        let dev_h = self.transform.length_to_device(height);
        if dev_w <= 0.0 || dev_h <= 0.0 {
            return Ok(());
        }

        self.ctx.save()?;
        self.ctx.translate(x, y);
        self.ctx
            .scale(dev_w / image.width as f64, dev_h / image.height as f64);
        self.ctx.set_source_surface(&surface, 0.0, 0.0)?;
        self.ctx.paint()?;
        self.ctx.restore()?;
        Ok(())
    }
}
