//! Software raster backend: renders into an in-memory RGB buffer
//! (3 bytes per pixel, row-major) without any display system.
//!
//! Curves are flattened through the shared subdivision algorithm, lines are
//! stepped with an integer DDA, polygons are filled by even-odd scanline.
//! This is the backend the banded PNG exporter drives.

use tracing::warn;

use crate::api::{ImageData, InteractiveRenderer, RenderState, Renderer, check_fill_style};
use crate::bezier::flatten_path;
use crate::error::{RenderError, Result};
use crate::geometry::{BezPoint, Color, IntRectangle, Point, Rectangle};
use crate::style::{Alignment, DashLengths, FillStyle, FontDesc, LineCaps, LineJoin, LineStyle};
use crate::transform::Transform;

/// Rough advance-width per character as a fraction of the font height, for
/// text-width queries without a font engine.
const GLYPH_ADVANCE_RATIO: f64 = 0.54;

pub struct RasterRenderer {
    state: RenderState,
    transform: Transform,
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    clip: Option<IntRectangle>,
    /// Device-pixel on/off dash pattern; empty means solid.
    dash: Vec<u32>,
    /// Scratch buffer reused across curve flattenings.
    flattened: Vec<Point>,
    warned_text: bool,
}

impl RasterRenderer {
    pub fn new(transform: Transform, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidParam(format!(
                "raster surface must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            state: RenderState::default(),
            transform,
            width,
            height,
            buffer: vec![0xff; (width * height * 3) as usize],
            clip: None,
            dash: Vec::new(),
            flattened: Vec::new(),
            warned_text: false,
        })
    }

    /// Resizes the surface, discarding its contents. The banded exporter
    /// reuses one renderer with a band-sized surface.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidParam(format!(
                "raster surface must be non-empty, got {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        self.buffer = vec![0xff; (width * height * 3) as usize];
        Ok(())
    }

    /// Fills the whole surface with `color`, ignoring the clip region.
    pub fn clear(&mut self, color: Color) {
        let (r, g, b) = color.to_rgb8();
        for px in self.buffer.chunks_exact_mut(3) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Row-major RGB pixel data, 3 bytes per pixel.
    pub fn rgb_data(&self) -> &[u8] {
        &self.buffer
    }

    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * self.width + x) * 3) as usize;
        (self.buffer[i], self.buffer[i + 1], self.buffer[i + 2])
    }

    fn put_pixel(&mut self, x: i32, y: i32, rgb: (u8, u8, u8)) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        if let Some(clip) = &self.clip {
            if !clip.contains(x, y) {
                return;
            }
        }
        let i = ((y as u32 * self.width + x as u32) * 3) as usize;
        self.buffer[i] = rgb.0;
        self.buffer[i + 1] = rgb.1;
        self.buffer[i + 2] = rgb.2;
    }

    fn line_width_pixels(&self) -> i32 {
        // 0 means hairline; anything below one pixel still draws.
        let w = self
            .transform
            .length_to_device(self.state.line_width)
            .round() as i32;
        w.max(1)
    }

    /// Integer DDA with the current dash pattern. `dashed` is false for
    /// pixel-space chrome, which always draws solid.
    fn stroke_device_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        dashed: bool,
    ) {
        let rgb = color.to_rgb8();
        let width = self.line_width_pixels();
        let dx = x2 - x1;
        let dy = y2 - y1;
        let steps = dx.abs().max(dy.abs());
        // Offset extra thickness along the minor axis.
        let across_x = dx.abs() < dy.abs();

        let pattern = if dashed {
            std::mem::take(&mut self.dash)
        } else {
            Vec::new()
        };
        let mut dash = DashCursor::new(&pattern);
        for i in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                i as f64 / steps as f64
            };
            let x = x1 + (dx as f64 * t).round() as i32;
            let y = y1 + (dy as f64 * t).round() as i32;
            if dash.on() {
                for off in offsets(width) {
                    if across_x {
                        self.put_pixel(x + off, y, rgb);
                    } else {
                        self.put_pixel(x, y + off, rgb);
                    }
                }
            }
            dash.advance();
        }
        if dashed {
            self.dash = pattern;
        }
    }

    fn stroke_device_polyline(&mut self, points: &[(i32, i32)], color: Color) {
        for pair in points.windows(2) {
            let (x1, y1) = pair[0];
            let (x2, y2) = pair[1];
            self.stroke_device_line(x1, y1, x2, y2, color, true);
        }
    }

    /// Even-odd scanline fill over real-valued device coordinates.
    fn fill_device_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let rgb = color.to_rgb8();
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max);
        if !min_y.is_finite() || !max_y.is_finite() {
            warn!("non-finite polygon coordinates, skipping fill");
            return;
        }

        let y_start = (min_y.floor() as i32).max(0);
        let y_end = (max_y.ceil() as i32).min(self.height as i32 - 1);
        let mut crossings: Vec<f64> = Vec::new();

        for y in y_start..=y_end {
            let scan = y as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.1 <= scan && b.1 > scan) || (b.1 <= scan && a.1 > scan) {
                    let t = (scan - a.1) / (b.1 - a.1);
                    crossings.push(a.0 + t * (b.0 - a.0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let x0 = span[0].round() as i32;
                let x1 = span[1].round() as i32;
                for x in x0..=x1 {
                    self.put_pixel(x, y, rgb);
                }
            }
        }
    }

    fn to_pixels(&self, p: Point) -> (i32, i32) {
        self.transform.to_device_pixels(p)
    }

    /// Polyline along an arc of the ellipse `width` x `height` at `center`.
    /// Angles in degrees, counter-clockwise; y grows downwards so the sine
    /// is negated.
    fn arc_points(
        &self,
        center: Point,
        width: f64,
        height: f64,
        angle1: f64,
        angle2: f64,
    ) -> Vec<(f64, f64)> {
        let (cx, cy) = self.transform.to_device(center);
        let rx = self.transform.length_to_device(width / 2.0);
        let ry = self.transform.length_to_device(height / 2.0);

        let mut sweep = angle2 - angle1;
        if sweep < 0.0 {
            sweep += 360.0;
        }
        if sweep == 0.0 {
            sweep = 360.0;
        }

        // Segment count proportional to the arc size on screen.
        let steps = ((rx.max(ry) * sweep.to_radians()).abs().ceil() as usize).clamp(8, 720);
        (0..=steps)
            .map(|i| {
                let a = (angle1 + sweep * i as f64 / steps as f64).to_radians();
                (cx + rx * a.cos(), cy - ry * a.sin())
            })
            .collect()
    }

    fn rebuild_dash(&mut self) {
        let lengths = DashLengths::derive(self.transform.length_to_device(self.state.dash_length));
        self.dash = lengths.pattern_pixels(self.state.line_style);
    }

    fn device_rect(&self, rect: Rectangle) -> Option<(i32, i32, i32, i32)> {
        let (left, top) = self.to_pixels(Point::new(rect.left, rect.top));
        let (right, bottom) = self.to_pixels(Point::new(rect.right, rect.bottom));
        if left > right || top > bottom {
            return None;
        }
        Some((left, top, right, bottom))
    }
}

/// Symmetric pixel offsets for a stroke `width` pixels wide.
fn offsets(width: i32) -> impl Iterator<Item = i32> {
    let lo = -(width - 1) / 2;
    lo..lo + width
}

struct DashCursor<'a> {
    pattern: &'a [u32],
    index: usize,
    remaining: u32,
}

impl<'a> DashCursor<'a> {
    fn new(pattern: &'a [u32]) -> Self {
        Self {
            pattern,
            index: 0,
            remaining: pattern.first().copied().unwrap_or(0),
        }
    }

    fn on(&self) -> bool {
        // Even entries are ink, odd entries are holes.
        self.pattern.is_empty() || self.index % 2 == 0
    }

    fn advance(&mut self) {
        if self.pattern.is_empty() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        while self.remaining == 0 {
            self.index = (self.index + 1) % self.pattern.len();
            self.remaining = self.pattern[self.index];
        }
    }
}

impl Renderer for RasterRenderer {
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
        // Caps beyond butt need a real stroker; nearest behavior is butt.
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
        check_fill_style("raster_renderer", style);
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
        let (x1, y1) = self.to_pixels(start);
        let (x2, y2) = self.to_pixels(end);
        self.stroke_device_line(x1, y1, x2, y2, color, true);
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let device: Vec<(i32, i32)> = points.iter().map(|p| self.to_pixels(*p)).collect();
        self.stroke_device_polyline(&device, color);
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let mut device: Vec<(i32, i32)> = points.iter().map(|p| self.to_pixels(*p)).collect();
        if let Some(&first) = device.first() {
            device.push(first);
        }
        self.stroke_device_polyline(&device, color);
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let device: Vec<(f64, f64)> = points.iter().map(|p| self.transform.to_device(*p)).collect();
        self.fill_device_polygon(&device, color);
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if !self.state.can_draw() || rect.is_degenerate() {
            return Ok(());
        }
        if let Some((l, t, r, b)) = self.device_rect(rect) {
            self.stroke_device_line(l, t, r, t, color, true);
            self.stroke_device_line(r, t, r, b, color, true);
            self.stroke_device_line(r, b, l, b, color, true);
            self.stroke_device_line(l, b, l, t, color, true);
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if !self.state.can_draw() || rect.is_degenerate() {
            return Ok(());
        }
        if let Some((l, t, r, b)) = self.device_rect(rect) {
            let rgb = color.to_rgb8();
            for y in t..=b {
                for x in l..=r {
                    self.put_pixel(x, y, rgb);
                }
            }
        }
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
        let device: Vec<(i32, i32)> = self
            .arc_points(center, width, height, angle1, angle2)
            .into_iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        self.stroke_device_polyline(&device, color);
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
        // Pie slice: arc outline closed through the center.
        let mut device = self.arc_points(center, width, height, angle1, angle2);
        device.push(self.transform.to_device(center));
        self.fill_device_polygon(&device, color);
        Ok(())
    }

    fn draw_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let transform = self.transform;
        let mut flattened = std::mem::take(&mut self.flattened);
        flattened.clear();
        flatten_path(
            path,
            |p| {
                let (x, y) = transform.to_device(p);
                Point::new(x, y)
            },
            &mut flattened,
        );
        let device: Vec<(i32, i32)> = flattened
            .iter()
            .map(|p| (p.x.round() as i32, p.y.round() as i32))
            .collect();
        self.stroke_device_polyline(&device, color);
        self.flattened = flattened;
        Ok(())
    }

    fn fill_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let transform = self.transform;
        let mut flattened = std::mem::take(&mut self.flattened);
        flattened.clear();
        flatten_path(
            path,
            |p| {
                let (x, y) = transform.to_device(p);
                Point::new(x, y)
            },
            &mut flattened,
        );
        let device: Vec<(f64, f64)> = flattened.iter().map(|p| (p.x, p.y)).collect();
        self.fill_device_polygon(&device, color);
        self.flattened = flattened;
        Ok(())
    }

    fn draw_string(
        &mut self,
        _text: &str,
        _pos: Point,
        _alignment: Alignment,
        _color: Color,
    ) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        if !self.warned_text {
            warn!("raster_renderer: text rendering not supported, strings are skipped");
            self.warned_text = true;
        }
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
        if image.data.len() < (image.width * image.height * 4) as usize {
            warn!("raster_renderer: image data shorter than its dimensions, skipping");
            return Ok(());
        }
        let (left, top) = self.to_pixels(point);
        let dev_w = self.transform.length_to_device(width).round() as i32;
        let dev_h = self.transform.length_to_device(height).round() as i32;
        if dev_w <= 0 || dev_h <= 0 {
            return Ok(());
        }
        // Nearest-neighbor sampling with straight-alpha blending over the
        // existing pixel.
        for dy in 0..dev_h {
            for dx in 0..dev_w {
                let sx = (dx as u32 * image.width) / dev_w as u32;
                let sy = (dy as u32 * image.height) / dev_h as u32;
                let i = ((sy * image.width + sx) * 4) as usize;
                let (sr, sg, sb, sa) = (
                    image.data[i],
                    image.data[i + 1],
                    image.data[i + 2],
                    image.data[i + 3],
                );
                let x = left + dx;
                let y = top + dy;
                if sa == 0xff {
                    self.put_pixel(x, y, (sr, sg, sb));
                } else if sa > 0 {
                    if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                        continue;
                    }
                    let (dr, dg, db) = self.pixel(x as u32, y as u32);
                    let blend = |s: u8, d: u8| {
                        ((s as u32 * sa as u32 + d as u32 * (255 - sa as u32)) / 255) as u8
                    };
                    self.put_pixel(x, y, (blend(sr, dr), blend(sg, dg), blend(sb, db)));
                }
            }
        }
        Ok(())
    }
}

impl InteractiveRenderer for RasterRenderer {
    fn width_pixels(&self) -> u32 {
        self.width
    }

    fn height_pixels(&self) -> u32 {
        self.height
    }

    fn get_text_width(&self, text: &str) -> f64 {
        let height = self.transform.length_to_device(self.state.font.height);
        text.chars().count() as f64 * height * GLYPH_ADVANCE_RATIO
    }

    fn clip_region_clear(&mut self) {
        self.clip = None;
    }

    fn clip_region_add_rect(&mut self, rect: &Rectangle) {
        let (left, top) = self.to_pixels(Point::new(rect.left, rect.top));
        let (right, bottom) = self.to_pixels(Point::new(rect.right, rect.bottom));
        let pixel_rect = IntRectangle::new(left, top, right, bottom);
        match &mut self.clip {
            Some(clip) => clip.union(&pixel_rect),
            None => self.clip = Some(pixel_rect),
        }
    }

    fn draw_pixel_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        self.stroke_device_line(x1, y1, x2, y2, color, false);
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
        if !self.state.can_draw() || width < 0 || height < 0 {
            return Ok(());
        }
        let (r, b) = (x + width, y + height);
        self.stroke_device_line(x, y, r, y, color, false);
        self.stroke_device_line(r, y, r, b, color, false);
        self.stroke_device_line(r, b, x, b, color, false);
        self.stroke_device_line(x, b, x, y, color, false);
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
        if !self.state.can_draw() || width < 0 || height < 0 {
            return Ok(());
        }
        let rgb = color.to_rgb8();
        for py in y..y + height {
            for px in x..x + width {
                self.put_pixel(px, py, rgb);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(1.0, 0.0, 0.0);

    fn renderer(zoom: f64, width: u32, height: u32) -> RasterRenderer {
        let transform = Transform::new(zoom, Point::new(0.0, 0.0)).unwrap();
        let mut r = RasterRenderer::new(transform, width, height).unwrap();
        r.clear(Color::WHITE);
        r.begin_render().unwrap();
        r
    }

    #[test]
    fn horizontal_line_paints_pixels() {
        let mut r = renderer(1.0, 20, 20);
        r.draw_line(Point::new(2.0, 5.0), Point::new(10.0, 5.0), RED)
            .unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(2, 5), (255, 0, 0));
        assert_eq!(r.pixel(10, 5), (255, 0, 0));
        assert_eq!(r.pixel(2, 6), (255, 255, 255));
    }

    #[test]
    fn fill_rect_covers_interior() {
        let mut r = renderer(1.0, 20, 20);
        r.fill_rect(Rectangle::new(3.0, 3.0, 8.0, 8.0), RED).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(5, 5), (255, 0, 0));
        assert_eq!(r.pixel(3, 3), (255, 0, 0));
        assert_eq!(r.pixel(9, 9), (255, 255, 255));
    }

    #[test]
    fn degenerate_rect_leaves_surface_untouched() {
        let mut r = renderer(1.0, 10, 10);
        r.fill_rect(Rectangle::new(8.0, 0.0, 2.0, 5.0), RED).unwrap();
        r.draw_rect(Rectangle::new(0.0, 8.0, 5.0, 2.0), RED).unwrap();
        r.end_render().unwrap();
        assert!(r.rgb_data().iter().all(|&b| b == 0xff));
    }

    #[test]
    fn fill_polygon_even_odd() {
        let mut r = renderer(1.0, 20, 20);
        let pts = [
            Point::new(2.0, 2.0),
            Point::new(12.0, 2.0),
            Point::new(12.0, 12.0),
            Point::new(2.0, 12.0),
        ];
        r.fill_polygon(&pts, RED).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(7, 7), (255, 0, 0));
        assert_eq!(r.pixel(15, 7), (255, 255, 255));
    }

    #[test]
    fn dotted_line_leaves_holes() {
        let mut r = renderer(1.0, 40, 10);
        r.set_dash_length(10.0).unwrap();
        r.set_line_style(LineStyle::Dotted).unwrap();
        r.draw_line(Point::new(0.0, 5.0), Point::new(30.0, 5.0), RED)
            .unwrap();
        r.end_render().unwrap();
        let painted: usize = (0..=30)
            .filter(|&x| r.pixel(x, 5) == (255, 0, 0))
            .count();
        assert!(painted > 5, "dots missing, painted {painted}");
        assert!(painted < 31, "no holes, painted {painted}");
    }

    #[test]
    fn clip_region_bounds_pixel_writes() {
        let mut r = renderer(1.0, 20, 20);
        r.clip_region_add_rect(&Rectangle::new(0.0, 0.0, 5.0, 5.0));
        r.fill_rect(Rectangle::new(0.0, 0.0, 15.0, 15.0), RED).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(3, 3), (255, 0, 0));
        assert_eq!(r.pixel(10, 10), (255, 255, 255));

        r.begin_render().unwrap();
        r.clip_region_clear();
        r.fill_rect(Rectangle::new(0.0, 0.0, 15.0, 15.0), RED).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(10, 10), (255, 0, 0));
    }

    #[test]
    fn bezier_stroke_touches_curve_extremes() {
        let mut r = renderer(1.0, 120, 90);
        let path = [
            BezPoint::MoveTo(Point::new(10.0, 80.0)),
            BezPoint::CurveTo(
                Point::new(10.0, 10.0),
                Point::new(110.0, 10.0),
                Point::new(110.0, 80.0),
            ),
        ];
        r.draw_bezier(&path, RED).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(10, 80), (255, 0, 0));
        assert_eq!(r.pixel(110, 80), (255, 0, 0));
        // Curve apex lies at y = 80 - 0.75 * 70 = 27.5.
        let apex_hit = (26..30).any(|y| r.pixel(60, y) == (255, 0, 0));
        assert!(apex_hit);
    }

    #[test]
    fn fill_ellipse_covers_center_not_corners() {
        let mut r = renderer(1.0, 40, 40);
        r.fill_ellipse(Point::new(20.0, 20.0), 20.0, 20.0, RED).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(20, 20), (255, 0, 0));
        assert_eq!(r.pixel(2, 2), (255, 255, 255));
    }

    #[test]
    fn pixel_ops_bypass_the_transform() {
        let mut r = renderer(10.0, 30, 30);
        r.fill_pixel_rect(1, 1, 3, 3, RED).unwrap();
        r.end_render().unwrap();
        // At zoom 10 a diagram-space call would land elsewhere; pixel ops
        // must not scale.
        assert_eq!(r.pixel(1, 1), (255, 0, 0));
        assert_eq!(r.pixel(3, 3), (255, 0, 0));
        assert_eq!(r.pixel(4, 4), (255, 255, 255));
    }

    #[test]
    fn image_draws_opaque_pixels() {
        let mut r = renderer(1.0, 10, 10);
        let image = ImageData {
            width: 2,
            height: 2,
            data: vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 0, 0, 0,
            ],
        };
        r.draw_image(Point::new(0.0, 0.0), 2.0, 2.0, &image).unwrap();
        r.end_render().unwrap();
        assert_eq!(r.pixel(0, 0), (255, 0, 0));
        assert_eq!(r.pixel(1, 0), (0, 255, 0));
        // Fully transparent source pixel leaves the background.
        assert_eq!(r.pixel(1, 1), (255, 255, 255));
    }

    #[test]
    fn text_is_skipped_without_error() {
        let mut r = renderer(1.0, 10, 10);
        r.draw_string("hello", Point::new(1.0, 5.0), Alignment::Left, RED)
            .unwrap();
        r.end_render().unwrap();
        assert!(r.rgb_data().iter().all(|&b| b == 0xff));
        assert!(r.get_text_width("hello") > 0.0);
    }
}
