//! Flattening of cubic bezier curves into polylines, for backends without a
//! native curve primitive and for hit-testing.
//!
//! Works entirely in device space on a caller-owned output buffer, so it is
//! reentrant and unit-testable without any backend.

use tracing::warn;

use crate::geometry::{BezPoint, Point};

/// Maximum perpendicular deviation, in device pixels, between the curve and
/// its polyline approximation.
pub const SUBDIVIDE_LIMIT: f64 = 0.03;
const SUBDIVIDE_LIMIT_SQ: f64 = SUBDIVIDE_LIMIT * SUBDIVIDE_LIMIT;

/// Control points closer than this are considered coincident.
const DEGENERATE_EPSILON: f64 = 0.00001;

/// Chord lengths below this are clamped before the flatness division.
const MIN_CHORD_LEN_SQ: f64 = 1e-6;

/// Recursion bound; pathological control points get the best approximation
/// found so far instead of a stack overflow.
const MAX_DEPTH: u32 = 20;

/// Squared perpendicular deviation of `interior` from the chord `from`..`to`.
/// Returns `None` when the computation degenerates to NaN.
fn chord_deviation_sq(interior: Point, from: Point, to: Point) -> Option<f64> {
    let u = interior.sub(from);
    let v = to.sub(from);
    let mut v_len_sq = v.dot(v);
    if v_len_sq.is_nan() {
        return None;
    }
    if v_len_sq < MIN_CHORD_LEN_SQ {
        v_len_sq = MIN_CHORD_LEN_SQ;
    }
    let projection = v.scale(u.dot(v) / v_len_sq);
    let offset = u.sub(projection);
    Some(offset.dot(offset))
}

fn subdivide(curve: [Point; 4], out: &mut Vec<Point>, depth: u32) {
    let [p0, p1, p2, p3] = curve;

    // Check if almost flat: both interior control points must sit on the
    // chord within the tolerance.
    let Some(delta1) = chord_deviation_sq(p1, p0, p3) else {
        warn!("NaN flatness while flattening bezier curve, dropping remainder");
        return;
    };
    if delta1 < SUBDIVIDE_LIMIT_SQ {
        let Some(delta2) = chord_deviation_sq(p2, p3, p0) else {
            warn!("NaN flatness while flattening bezier curve, dropping remainder");
            return;
        };
        if delta2 < SUBDIVIDE_LIMIT_SQ {
            out.push(p3);
            return;
        }
    }

    if depth >= MAX_DEPTH {
        out.push(p3);
        return;
    }

    // Split at the curve midpoint by successive control-polygon averages.
    let middle = p1.midpoint(p2);

    let l1 = p0.midpoint(p1);
    let l2 = l1.midpoint(middle);

    let r2 = p2.midpoint(p3);
    let r1 = r2.midpoint(middle);

    let l3 = l2.midpoint(r1);

    subdivide([p0, l1, l2, l3], out, depth + 1);
    subdivide([l3, r1, r2, p3], out, depth + 1);
}

/// Appends a polyline approximation of the cubic curve `p0..p3` to `out`.
///
/// The starting point `p0` is not emitted; callers seed the polyline with it
/// (or with the preceding path point). A curve degenerated to a single point
/// contributes exactly one point, `p3`.
pub fn flatten_curve(curve: [Point; 4], out: &mut Vec<Point>) {
    let [p0, p1, p2, p3] = curve;

    if p0.distance(p1) < DEGENERATE_EPSILON
        && p2.distance(p3) < DEGENERATE_EPSILON
        && p0.distance(p3) < DEGENERATE_EPSILON
    {
        out.push(p3);
        return;
    }

    subdivide(curve, out, 0);
}

/// Walks a bezier path, mapping every control point through `map` (typically
/// a diagram-to-device transform) and flattening curve segments into `out`.
///
/// Malformed paths are repaired rather than rejected: a missing leading
/// move-to is logged and the first point used as the start anyway, and a
/// stray mid-path move-to is logged and treated as a line-to.
pub fn flatten_path<F>(path: &[BezPoint], mut map: F, out: &mut Vec<Point>)
where
    F: FnMut(Point) -> Point,
{
    let Some(first) = path.first() else {
        return;
    };

    let mut current = match *first {
        BezPoint::MoveTo(p) => p,
        BezPoint::LineTo(p) => {
            warn!("bezier path must start with a move-to");
            p
        }
        BezPoint::CurveTo(_, _, p3) => {
            warn!("bezier path must start with a move-to");
            p3
        }
    };
    out.push(map(current));

    for segment in &path[1..] {
        match *segment {
            BezPoint::MoveTo(p) => {
                warn!("only the first bezier path segment may be a move-to");
                out.push(map(p));
                current = p;
            }
            BezPoint::LineTo(p) => {
                out.push(map(p));
                current = p;
            }
            BezPoint::CurveTo(p1, p2, p3) => {
                flatten_curve([map(current), map(p1), map(p2), map(p3)], out);
                current = p3;
            }
        }
    }
}
