//! Renderer backends. Every backend embeds a [`crate::api::RenderState`] and
//! a [`crate::transform::Transform`] and differs only in where the output
//! goes.

#[cfg(feature = "cairo")]
pub mod cairo;
pub mod raster;
pub mod recording;
#[cfg(feature = "svg")]
pub mod svg;
