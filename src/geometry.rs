//! Diagram-space geometry primitives: points, rectangles, bezier path
//! segments, and colors. Coordinate system is x rightwards, y downwards.

/// A two dimensional position in diagram space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the cross product, positive when `other` lies
    /// counter-clockwise of `self`.
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - other.x * self.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Midpoint between two control points, used by bezier subdivision.
    pub fn midpoint(self, other: Point) -> Point {
        self.add(other).scale(0.5)
    }

    /// Scales to unit length. A zero-length point is left untouched.
    pub fn normalize(self) -> Point {
        let len = self.length();
        if len > 0.0 { self.scale(1.0 / len) } else { self }
    }

    pub fn distance(self, other: Point) -> f64 {
        self.sub(other).length()
    }
}

/// Axis-aligned rectangle given by upper-left and lower-right corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rectangle {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// A rectangle is degenerate when the corners are crossed; drawing ops
    /// treat such rectangles as no-ops.
    pub fn is_degenerate(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Grows `self` in place to also cover `other`.
    pub fn union(&mut self, other: &Rectangle) {
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Shrinks `self` in place to the overlap with `other`. A disjoint pair
    /// leaves a degenerate rectangle behind.
    pub fn intersection(&mut self, other: &Rectangle) {
        self.left = self.left.max(other.left);
        self.top = self.top.max(other.top);
        self.right = self.right.min(other.right);
        self.bottom = self.bottom.min(other.bottom);
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.top > other.bottom
            || self.bottom < other.top)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// Euclidean distance from `point` to the rectangle, zero inside.
    pub fn distance_point(&self, point: Point) -> f64 {
        let dx = (self.left - point.x).max(0.0).max(point.x - self.right);
        let dy = (self.top - point.y).max(0.0).max(point.y - self.bottom);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel-space rectangle used by interactive backends for clip regions and
/// pixel-exact chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntRectangle {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRectangle {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn union(&mut self, other: &IntRectangle) {
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// One segment of a bezier path. A well-formed path starts with exactly one
/// `MoveTo`; renderers log and repair paths that violate this.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BezPoint {
    MoveTo(Point),
    LineTo(Point),
    /// Curve to the third point, using the first two as control points.
    CurveTo(Point, Point, Point),
}

/// Color with normalized channels. Copied by value everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// 8-bit channel triple, the form raster buffers and hex strings want.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let conv = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (conv(self.red), conv(self.green), conv(self.blue))
    }
}

/// Distance from `point` to the segment `start`..`end`, reduced by half the
/// line width (i.e. distance to the stroked outline, zero when inside it).
pub fn distance_line_point(start: Point, end: Point, line_width: f64, point: Point) -> f64 {
    let dir = end.sub(start);
    let len_sq = dir.dot(dir);

    let dist = if len_sq < 1e-12 {
        start.distance(point)
    } else {
        let t = point.sub(start).dot(dir) / len_sq;
        let t = t.clamp(0.0, 1.0);
        start.add(dir.scale(t)).distance(point)
    };

    (dist - line_width / 2.0).max(0.0)
}
