//! Diagram rendering core: a backend-neutral drawing contract plus the
//! geometry, coordinate transform, and curve flattening that back it.
//!
//! Drawing code talks to a [`Renderer`] in diagram space; each backend owns a
//! [`Transform`] that maps diagram coordinates to its device space. Shipped
//! backends: a software rasterizer, a streaming SVG writer (feature `svg`),
//! a cairo adapter (feature `cairo`), and an op-recording test double.

pub mod api;
pub mod backends;
pub mod bezier;
pub mod error;
#[cfg(feature = "png")]
pub mod export;
pub mod geometry;
pub mod style;
pub mod transform;

pub use api::{ImageData, InteractiveRenderer, RenderState, Renderer};
pub use error::{RenderError, Result};
pub use geometry::{BezPoint, Color, IntRectangle, Point, Rectangle};
pub use style::{Alignment, FillStyle, FontDesc, LineCaps, LineJoin, LineStyle};
pub use transform::Transform;
