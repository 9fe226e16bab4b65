//! Interpolation helpers:
//! - lerp (exact at both endpoints)
//! - step_value (step semantics)
//! - interpolate (unit-aware blend of property values)
//! - cubic_bezier_ease (timing curve inversion)

use crate::value::PropertyValue;

/// Linear interpolation of scalars. Returns `a` at `t == 0` and `b` at `t == 1` exactly.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Step interpolation: hold the start value until the segment completes.
#[inline]
pub fn step_value(a: &PropertyValue, b: &PropertyValue, t: f64) -> PropertyValue {
    if t >= 1.0 {
        b.clone()
    } else {
        a.clone()
    }
}

/// Blend two property values by eased weight `t`.
///
/// Numbers blend directly. Dimensions blend when their units agree, or when one
/// side has no unit (or is a unit-bearing zero); the result carries the
/// non-empty unit of the destination. Everything else steps.
pub fn interpolate(a: &PropertyValue, b: &PropertyValue, t: f64) -> PropertyValue {
    use PropertyValue::{Dimension, Number};

    match (a, b) {
        (Number(va), Number(vb)) => Number(lerp(*va, *vb, t)),
        (Dimension { value: va, unit: ua }, Dimension { value: vb, unit: ub })
            if ua == ub || *va == 0.0 =>
        {
            PropertyValue::dimension(lerp(*va, *vb, t), ub.clone())
        }
        (Number(va), Dimension { value: vb, unit }) => {
            PropertyValue::dimension(lerp(*va, *vb, t), unit.clone())
        }
        (Dimension { value: va, unit }, Number(vb)) => {
            PropertyValue::dimension(lerp(*va, *vb, t), unit.clone())
        }
        _ => step_value(a, b, t),
    }
}

#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Evaluate a CSS-style cubic-bezier timing curve (P0=(0,0), P3=(1,1)) at x = `t`
/// by inverting the x polynomial with bisection.
pub fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if x1 == y1 && x2 == y2 {
        return t;
    }
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = t;
    for _ in 0..40 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-9 {
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
