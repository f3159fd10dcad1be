//! Line, fill and text style attributes plus the dash-pattern derivation
//! shared by all backends.
//!
//! Backends get a single `dash_length` knob; the dot length is 10% of it and
//! both are clamped to the 1..=255 device-pixel range before patterns are
//! built.

/// Logical line style; backends translate this to native dash patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
    DashDotDot,
    Dotted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCaps {
    #[default]
    Butt,
    Round,
    Projecting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Only solid fills exist; backends warn on anything else they may grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillStyle {
    #[default]
    Solid,
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Font request for `draw_string`. Height is in diagram units.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDesc {
    pub family: String,
    pub height: f64,
}

impl Default for FontDesc {
    fn default() -> Self {
        Self {
            family: "sans".into(),
            height: 1.0,
        }
    }
}

/// Dash and dot lengths in device pixels, clamped to `1..=255`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashLengths {
    pub dash: f64,
    pub dot: f64,
}

impl DashLengths {
    /// `length` is the requested dash length already in device units.
    /// The dot is 10% of the dash.
    pub fn derive(length: f64) -> Self {
        let clamp = |v: f64| (v + 0.5).floor().clamp(1.0, 255.0);
        Self {
            dash: clamp(length),
            dot: clamp(length * 0.1),
        }
    }

    /// On/off dash pattern for a line style; empty means solid. Hole widths
    /// stay fractional, which vector backends emit as-is; raster backends
    /// round via [`DashLengths::pattern_pixels`].
    pub fn pattern(&self, style: LineStyle) -> Vec<f64> {
        match style {
            LineStyle::Solid => Vec::new(),
            LineStyle::Dashed => vec![self.dash, self.dash],
            LineStyle::DashDot => {
                let hole = ((self.dash - self.dot) / 2.0).max(1.0);
                vec![self.dash, hole, self.dot, hole]
            }
            LineStyle::DashDotDot => {
                let hole = ((self.dash - 2.0 * self.dot) / 3.0).max(1.0);
                vec![self.dash, hole, self.dot, hole, self.dot, hole]
            }
            LineStyle::Dotted => vec![self.dot, self.dot],
        }
    }

    /// Integer pattern for pixel backends; every entry at least one pixel.
    pub fn pattern_pixels(&self, style: LineStyle) -> Vec<u32> {
        self.pattern(style)
            .into_iter()
            .map(|v| (v.round() as u32).max(1))
            .collect()
    }
}
