//! Interpolation helpers:
//! - lerp_* (component-wise, unclamped t)
//! - cubic_bezier_ease (cubic-bezier timing curve, x solved by bisection)

use crate::geometry::{Point, Rect, Size};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(lerp_f32(a.x, b.x, t), lerp_f32(a.y, b.y, t))
}

/// Sizes are clamped at zero, so extrapolating past either end never
/// produces an inverted rect.
#[inline]
pub fn lerp_size(a: Size, b: Size, t: f32) -> Size {
    Size::new(
        lerp_f32(a.width, b.width, t),
        lerp_f32(a.height, b.height, t),
    )
}

#[inline]
pub fn lerp_rect(a: Rect, b: Rect, t: f32) -> Rect {
    Rect {
        origin: lerp_point(a.origin, b.origin, t),
        size: lerp_size(a.size, b.size, t),
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
pub fn cubic_bezier_ease(t: f32, ctrl: [f32; 4]) -> f32 {
    let [x1, y1, x2, y2] = ctrl;
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // x must stay monotonic, which holds for x1/x2 in [0,1]
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
