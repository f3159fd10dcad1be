//! PNG export through the raster backend.
//!
//! Rendering happens in horizontal bands so the pixel buffer stays small no
//! matter how large the output image is; each band re-renders the diagram
//! with the origin advanced and streams its rows straight into the encoder.

use std::io::Write;

use crate::api::{InteractiveRenderer, Renderer};
use crate::backends::raster::RasterRenderer;
use crate::error::{RenderError, Result};
use crate::geometry::{Color, Point, Rectangle};
use crate::transform::Transform;

/// Rows rendered per band.
const BAND_HEIGHT: u32 = 50;

/// Renders the diagram area `extents` into a `width` x `height` PNG written
/// to `out`. `draw` is invoked once per band with a renderer that is already
/// inside its render bracket positioned on that band; it should replay the
/// whole diagram each time and rely on clipping by the band edges.
pub fn render_png<W, F>(
    out: W,
    extents: &Rectangle,
    width: u32,
    height: u32,
    background: Color,
    mut draw: F,
) -> Result<()>
where
    W: Write,
    F: FnMut(&mut RasterRenderer) -> Result<()>,
{
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidParam(format!(
            "png output must be non-empty, got {width}x{height}"
        )));
    }
    if extents.is_degenerate() || extents.width() <= 0.0 {
        return Err(RenderError::InvalidParam(format!(
            "png export extents are degenerate: {extents:?}"
        )));
    }

    let zoom = width as f64 / extents.width();
    let transform = Transform::new(zoom, Point::new(extents.left, extents.top))?;

    let mut encoder = png::Encoder::new(out, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    let mut stream = writer.stream_writer()?;

    let mut renderer = RasterRenderer::new(transform, width, BAND_HEIGHT.min(height))?;
    let mut row = 0u32;
    while row < height {
        let rows = BAND_HEIGHT.min(height - row);
        if rows != renderer.height_pixels() {
            renderer.set_size(width, rows)?;
        }
        renderer
            .transform_mut()
            .set_origo(Point::new(extents.left, extents.top + row as f64 / zoom));

        renderer.clear(background);
        renderer.begin_render()?;
        draw(&mut renderer)?;
        renderer.end_render()?;

        stream.write_all(renderer.rgb_data())?;
        row += rows;
    }
    stream.finish()?;
    Ok(())
}
