//! SVG export backend using a streaming XML writer.
//!
//! Coordinates are written in device space without pixel rounding, so the
//! output scales cleanly. Curves and arcs use the native SVG path commands
//! instead of the shared flattening.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use png::{ColorType, Encoder as PngEncoder};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::api::{ImageData, RenderState, Renderer, check_fill_style};
use crate::error::Result;
use crate::geometry::{BezPoint, Color, Point, Rectangle};
use crate::style::{
    Alignment, DashLengths, FillStyle, FontDesc, LineCaps, LineJoin, LineStyle,
};
use crate::transform::Transform;

/// Streaming SVG renderer writing into `W`.
pub struct SvgRenderer<W: Write> {
    writer: Writer<W>,
    open_root: bool,
    state: RenderState,
    transform: Transform,
    /// Device-space dash pattern; empty means solid.
    dash: Vec<f64>,
}

/// Formats a device coordinate the way a hand-written SVG would, with
/// trailing float noise trimmed off.
fn coord(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn hex_color(color: Color) -> String {
    let (r, g, b) = color.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

impl<W: Write> SvgRenderer<W> {
    /// Creates the renderer and emits the XML declaration and the root
    /// `<svg>` element sized `width` x `height` device pixels.
    pub fn new(inner: W, transform: Transform, width: u32, height: u32) -> Result<Self> {
        let mut writer = Writer::new_with_indent(inner, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let width_attr = width.to_string();
        let height_attr = height.to_string();
        let view_box_attr = format!("0 0 {width} {height}");

        let mut start = BytesStart::new("svg");
        start.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        start.push_attribute(("version", "1.1"));
        start.push_attribute(("width", width_attr.as_str()));
        start.push_attribute(("height", height_attr.as_str()));
        start.push_attribute(("viewBox", view_box_attr.as_str()));
        writer.write_event(Event::Start(start))?;

        Ok(Self {
            writer,
            open_root: true,
            state: RenderState::default(),
            transform,
            dash: Vec::new(),
        })
    }

    /// Closes the root element and returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        if self.open_root {
            self.writer.write_event(Event::End(BytesEnd::new("svg")))?;
            self.open_root = false;
        }
        Ok(self.writer.into_inner())
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    fn write_empty(&mut self, elem: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn rebuild_dash(&mut self) {
        let lengths = DashLengths::derive(self.transform.length_to_device(self.state.dash_length));
        self.dash = lengths.pattern(self.state.line_style);
    }

    fn push_stroke_attrs(&self, elem: &mut BytesStart<'_>, color: Color) {
        elem.push_attribute(("fill", "none"));

        let stroke = hex_color(color);
        elem.push_attribute(("stroke", stroke.as_str()));
        if color.alpha < 1.0 {
            let opacity = coord(color.alpha);
            elem.push_attribute(("stroke-opacity", opacity.as_str()));
        }

        let width = coord(self.transform.length_to_device(self.state.line_width));
        elem.push_attribute(("stroke-width", width.as_str()));

        match self.state.line_caps {
            LineCaps::Butt => {}
            LineCaps::Round => elem.push_attribute(("stroke-linecap", "round")),
            LineCaps::Projecting => elem.push_attribute(("stroke-linecap", "square")),
        }
        match self.state.line_join {
            LineJoin::Miter => {}
            LineJoin::Round => elem.push_attribute(("stroke-linejoin", "round")),
            LineJoin::Bevel => elem.push_attribute(("stroke-linejoin", "bevel")),
        }

        if !self.dash.is_empty() {
            let dash = self
                .dash
                .iter()
                .map(|v| coord(*v))
                .collect::<Vec<_>>()
                .join(",");
            elem.push_attribute(("stroke-dasharray", dash.as_str()));
        }
    }

    fn push_fill_attrs(&self, elem: &mut BytesStart<'_>, color: Color) {
        let fill = hex_color(color);
        elem.push_attribute(("fill", fill.as_str()));
        if color.alpha < 1.0 {
            let opacity = coord(color.alpha);
            elem.push_attribute(("fill-opacity", opacity.as_str()));
        }
        elem.push_attribute(("stroke", "none"));
    }

    fn polyline_points(&self, points: &[Point]) -> String {
        points
            .iter()
            .map(|p| {
                let (x, y) = self.transform.to_device(*p);
                format!("{},{}", coord(x), coord(y))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Path data for a bezier path, device space, native curve commands.
    fn path_data(&self, path: &[BezPoint], close: bool) -> String {
        let mut d = String::new();
        for (i, segment) in path.iter().enumerate() {
            if !d.is_empty() {
                d.push(' ');
            }
            match *segment {
                BezPoint::MoveTo(p) => {
                    let (x, y) = self.transform.to_device(p);
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    d.push_str(&format!("{} {} {}", cmd, coord(x), coord(y)));
                }
                BezPoint::LineTo(p) => {
                    let (x, y) = self.transform.to_device(p);
                    d.push_str(&format!("L {} {}", coord(x), coord(y)));
                }
                BezPoint::CurveTo(p1, p2, p3) => {
                    let (x1, y1) = self.transform.to_device(p1);
                    let (x2, y2) = self.transform.to_device(p2);
                    let (x3, y3) = self.transform.to_device(p3);
                    d.push_str(&format!(
                        "C {} {} {} {} {} {}",
                        coord(x1),
                        coord(y1),
                        coord(x2),
                        coord(y2),
                        coord(x3),
                        coord(y3)
                    ));
                }
            }
        }
        if close {
            d.push_str(" Z");
        }
        d
    }

    /// Path data for an elliptical arc. Angles in degrees, counter-clockwise
    /// with y growing downwards, so the SVG sweep flag is always 0.
    fn arc_path(&self, center: Point, width: f64, height: f64, angle1: f64, angle2: f64) -> String {
        let (cx, cy) = self.transform.to_device(center);
        let rx = self.transform.length_to_device(width / 2.0);
        let ry = self.transform.length_to_device(height / 2.0);

        let mut sweep = angle2 - angle1;
        if sweep < 0.0 {
            sweep += 360.0;
        }

        let a1 = angle1.to_radians();
        let a2 = angle2.to_radians();
        let sx = cx + rx * a1.cos();
        let sy = cy - ry * a1.sin();
        let ex = cx + rx * a2.cos();
        let ey = cy - ry * a2.sin();
        let large_arc = i32::from(sweep > 180.0);

        format!(
            "M {} {} A {} {} 0 {} 0 {} {}",
            coord(sx),
            coord(sy),
            coord(rx),
            coord(ry),
            large_arc,
            coord(ex),
            coord(ey)
        )
    }

    fn encode_image_as_data_uri(&self, image: &ImageData) -> Result<String> {
        let mut png_bytes = Vec::new();
        let mut encoder = PngEncoder::new(&mut png_bytes, image.width, image.height);
        encoder.set_color(ColorType::Rgba);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.data)?;
        writer.finish()?;

        let encoded = BASE64_STANDARD.encode(png_bytes);
        Ok(format!("data:image/png;base64,{encoded}"))
    }
}

impl<W: Write> Renderer for SvgRenderer<W> {
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
        check_fill_style("svg_renderer", style);
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
        let (x1, y1) = self.transform.to_device(start);
        let (x2, y2) = self.transform.to_device(end);
        let (x1, y1, x2, y2) = (coord(x1), coord(y1), coord(x2), coord(y2));

        let mut elem = BytesStart::new("line");
        elem.push_attribute(("x1", x1.as_str()));
        elem.push_attribute(("y1", y1.as_str()));
        elem.push_attribute(("x2", x2.as_str()));
        elem.push_attribute(("y2", y2.as_str()));
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let pts = self.polyline_points(points);
        let mut elem = BytesStart::new("polyline");
        elem.push_attribute(("points", pts.as_str()));
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let pts = self.polyline_points(points);
        let mut elem = BytesStart::new("polygon");
        elem.push_attribute(("points", pts.as_str()));
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let pts = self.polyline_points(points);
        let mut elem = BytesStart::new("polygon");
        elem.push_attribute(("points", pts.as_str()));
        self.push_fill_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn draw_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if !self.state.can_draw() || rect.is_degenerate() {
            return Ok(());
        }
        let mut elem = self.rect_element(rect);
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<()> {
        if !self.state.can_draw() || rect.is_degenerate() {
            return Ok(());
        }
        let mut elem = self.rect_element(rect);
        self.push_fill_attrs(&mut elem, color);
        self.write_empty(elem)
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
        let d = self.arc_path(center, width, height, angle1, angle2);
        let mut elem = BytesStart::new("path");
        elem.push_attribute(("d", d.as_str()));
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
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
        // Pie slice, closed through the center.
        let (cx, cy) = self.transform.to_device(center);
        let d = format!(
            "{} L {} {} Z",
            self.arc_path(center, width, height, angle1, angle2),
            coord(cx),
            coord(cy)
        );
        let mut elem = BytesStart::new("path");
        elem.push_attribute(("d", d.as_str()));
        self.push_fill_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn draw_ellipse(&mut self, center: Point, width: f64, height: f64, color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let mut elem = self.ellipse_element(center, width, height);
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn fill_ellipse(&mut self, center: Point, width: f64, height: f64, color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let mut elem = self.ellipse_element(center, width, height);
        self.push_fill_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn draw_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let d = self.path_data(path, false);
        let mut elem = BytesStart::new("path");
        elem.push_attribute(("d", d.as_str()));
        self.push_stroke_attrs(&mut elem, color);
        self.write_empty(elem)
    }

    fn fill_bezier(&mut self, path: &[BezPoint], color: Color) -> Result<()> {
        if !self.state.can_draw() {
            return Ok(());
        }
        let d = self.path_data(path, true);
        let mut elem = BytesStart::new("path");
        elem.push_attribute(("d", d.as_str()));
        self.push_fill_attrs(&mut elem, color);
        self.write_empty(elem)
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
        let (x, y) = self.transform.to_device(pos);
        let (x, y) = (coord(x), coord(y));
        let size = coord(self.transform.length_to_device(self.state.font.height));
        let fill = hex_color(color);

        let mut elem = BytesStart::new("text");
        elem.push_attribute(("x", x.as_str()));
        elem.push_attribute(("y", y.as_str()));
        elem.push_attribute(("fill", fill.as_str()));
        elem.push_attribute(("font-family", self.state.font.family.as_str()));
        elem.push_attribute(("font-size", size.as_str()));
        elem.push_attribute((
            "text-anchor",
            match alignment {
                Alignment::Left => "start",
                Alignment::Center => "middle",
                Alignment::Right => "end",
            },
        ));
        self.writer.write_event(Event::Start(elem))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new("text")))?;
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
        let href = self.encode_image_as_data_uri(image)?;
        let (x, y) = self.transform.to_device(point);
        let (x, y) = (coord(x), coord(y));
        let w = coord(self.transform.length_to_device(width));
        let h = coord(self.transform.length_to_device(height));

        let mut elem = BytesStart::new("image");
        elem.push_attribute(("x", x.as_str()));
        elem.push_attribute(("y", y.as_str()));
        elem.push_attribute(("width", w.as_str()));
        elem.push_attribute(("height", h.as_str()));
        elem.push_attribute(("href", href.as_str()));
        elem.push_attribute(("preserveAspectRatio", "none"));
        self.write_empty(elem)
    }
}

impl<W: Write> SvgRenderer<W> {
    fn rect_element(&self, rect: Rectangle) -> BytesStart<'static> {
        let (x, y) = self.transform.to_device(Point::new(rect.left, rect.top));
        let w = self.transform.length_to_device(rect.width());
        let h = self.transform.length_to_device(rect.height());
        let (x, y, w, h) = (coord(x), coord(y), coord(w), coord(h));

        let mut elem = BytesStart::new("rect");
        elem.push_attribute(("x", x.as_str()));
        elem.push_attribute(("y", y.as_str()));
        elem.push_attribute(("width", w.as_str()));
        elem.push_attribute(("height", h.as_str()));
        elem
    }

    fn ellipse_element(&self, center: Point, width: f64, height: f64) -> BytesStart<'static> {
        let (cx, cy) = self.transform.to_device(center);
        let rx = self.transform.length_to_device(width / 2.0);
        let ry = self.transform.length_to_device(height / 2.0);
        let (cx, cy, rx, ry) = (coord(cx), coord(cy), coord(rx), coord(ry));

        let mut elem = BytesStart::new("ellipse");
        elem.push_attribute(("cx", cx.as_str()));
        elem.push_attribute(("cy", cy.as_str()));
        elem.push_attribute(("rx", rx.as_str()));
        elem.push_attribute(("ry", ry.as_str()));
        elem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svg_output<F>(zoom: f64, f: F) -> String
    where
        F: FnOnce(&mut SvgRenderer<Vec<u8>>) -> Result<()>,
    {
        let transform = Transform::new(zoom, Point::new(0.0, 0.0)).expect("transform");
        let mut svg =
            SvgRenderer::new(Vec::new(), transform, 100, 100).expect("create svg renderer");
        svg.begin_render().expect("begin");
        f(&mut svg).expect("draw operations");
        svg.end_render().expect("end");
        let out = svg.finish().expect("finish svg");
        String::from_utf8(out).expect("utf8")
    }

    const RED: Color = Color::new(1.0, 0.0, 0.0);

    #[test]
    fn writes_root_element_with_view_box() {
        let out = svg_output(1.0, |_| Ok(()));
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("viewBox=\"0 0 100 100\""));
        assert!(out.ends_with("</svg>"));
    }

    #[test]
    fn line_is_written_in_device_coordinates() {
        let out = svg_output(10.0, |svg| {
            svg.set_line_width(0.2)?;
            svg.draw_line(Point::new(1.0, 2.0), Point::new(3.0, 4.0), RED)
        });
        assert!(out.contains("<line x1=\"10\" y1=\"20\" x2=\"30\" y2=\"40\""));
        assert!(out.contains("stroke=\"#ff0000\""));
        assert!(out.contains("stroke-width=\"2\""));
    }

    #[test]
    fn dashed_stroke_carries_fractional_dash_array() {
        let out = svg_output(1.0, |svg| {
            svg.set_dash_length(10.0)?;
            svg.set_line_style(LineStyle::DashDot)?;
            svg.draw_line(Point::new(0.0, 0.0), Point::new(50.0, 0.0), RED)
        });
        assert!(out.contains("stroke-dasharray=\"10,4.5,1,4.5\""));
    }

    #[test]
    fn solid_stroke_has_no_dash_array() {
        let out = svg_output(1.0, |svg| {
            svg.draw_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0), RED)
        });
        assert!(!out.contains("stroke-dasharray"));
    }

    #[test]
    fn fill_rect_uses_fill_attributes() {
        let out = svg_output(2.0, |svg| {
            svg.fill_rect(Rectangle::new(1.0, 1.0, 4.0, 3.0), Color::BLACK)
        });
        assert!(out.contains("<rect x=\"2\" y=\"2\" width=\"6\" height=\"4\""));
        assert!(out.contains("fill=\"#000000\""));
        assert!(out.contains("stroke=\"none\""));
    }

    #[test]
    fn degenerate_rect_emits_nothing() {
        let out = svg_output(1.0, |svg| {
            svg.draw_rect(Rectangle::new(5.0, 0.0, 1.0, 2.0), RED)?;
            svg.fill_rect(Rectangle::new(0.0, 7.0, 2.0, 1.0), RED)
        });
        assert!(!out.contains("<rect"));
    }

    #[test]
    fn translucent_color_adds_opacity() {
        let out = svg_output(1.0, |svg| {
            svg.fill_rect(Rectangle::new(0.0, 0.0, 1.0, 1.0), RED.with_alpha(0.5))
        });
        assert!(out.contains("fill-opacity=\"0.5\""));
    }

    #[test]
    fn bezier_uses_native_curve_commands() {
        let path = [
            BezPoint::MoveTo(Point::new(0.0, 0.0)),
            BezPoint::CurveTo(
                Point::new(1.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(4.0, 0.0),
            ),
        ];
        let out = svg_output(1.0, |svg| svg.draw_bezier(&path, RED));
        assert!(out.contains("d=\"M 0 0 C 1 2 3 2 4 0\""));
    }

    #[test]
    fn fill_bezier_closes_the_path() {
        let path = [
            BezPoint::MoveTo(Point::new(0.0, 0.0)),
            BezPoint::LineTo(Point::new(4.0, 0.0)),
            BezPoint::LineTo(Point::new(0.0, 4.0)),
        ];
        let out = svg_output(1.0, |svg| svg.fill_bezier(&path, RED));
        assert!(out.contains("d=\"M 0 0 L 4 0 L 0 4 Z\""));
    }

    #[test]
    fn arc_sweep_flag_follows_visual_direction() {
        // Quarter arc from 0 to 90 degrees counter-clockwise; y-down device
        // space makes that sweep flag 0 and small-arc.
        let out = svg_output(1.0, |svg| {
            svg.draw_arc(Point::new(10.0, 10.0), 10.0, 10.0, 0.0, 90.0, RED)
        });
        assert!(out.contains("A 5 5 0 0 0"));

        let out = svg_output(1.0, |svg| {
            svg.draw_arc(Point::new(10.0, 10.0), 10.0, 10.0, 0.0, 270.0, RED)
        });
        assert!(out.contains("A 5 5 0 1 0"));
    }

    #[test]
    fn ellipse_element_carries_radii() {
        let out = svg_output(1.0, |svg| {
            svg.fill_ellipse(Point::new(5.0, 5.0), 8.0, 4.0, Color::BLACK)
        });
        assert!(out.contains("<ellipse cx=\"5\" cy=\"5\" rx=\"4\" ry=\"2\""));
    }

    #[test]
    fn text_anchor_follows_alignment() {
        let out = svg_output(1.0, |svg| {
            svg.set_font(&FontDesc {
                family: "serif".into(),
                height: 2.0,
            })?;
            svg.draw_string("hi", Point::new(3.0, 4.0), Alignment::Center, Color::BLACK)
        });
        assert!(out.contains("text-anchor=\"middle\""));
        assert!(out.contains("font-family=\"serif\""));
        assert!(out.contains("font-size=\"2\""));
        assert!(out.contains(">hi</text>"));
    }

    #[test]
    fn image_is_inlined_as_png_data_uri() {
        let image = ImageData {
            width: 1,
            height: 1,
            data: vec![255, 0, 0, 255],
        };
        let out = svg_output(1.0, |svg| {
            svg.draw_image(Point::new(2.0, 3.0), 4.0, 4.0, &image)
        });
        assert!(out.contains("<image x=\"2\" y=\"3\" width=\"4\" height=\"4\""));
        assert!(out.contains("href=\"data:image/png;base64,"));
    }

    #[test]
    fn pen_up_emits_nothing() {
        let out = svg_output(1.0, |svg| {
            svg.set_pen(true)?;
            svg.draw_line(Point::new(0.0, 0.0), Point::new(5.0, 5.0), RED)?;
            svg.fill_rect(Rectangle::new(0.0, 0.0, 2.0, 2.0), RED)
        });
        assert!(!out.contains("<line"));
        assert!(!out.contains("<rect"));
    }

    #[test]
    fn line_caps_and_join_map_to_svg_names() {
        let out = svg_output(1.0, |svg| {
            svg.set_line_caps(LineCaps::Projecting)?;
            svg.set_line_join(LineJoin::Bevel)?;
            svg.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), RED)
        });
        assert!(out.contains("stroke-linecap=\"square\""));
        assert!(out.contains("stroke-linejoin=\"bevel\""));
    }
}
