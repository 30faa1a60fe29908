//! Pure geometric helpers over [`Point`] coordinates.
//!
//! Angles are returned in radians. Dihedrals follow the IUPAC sign convention: looking
//! down the central bond from its first atom, a clockwise rotation of the near
//! substituent onto the far one is positive.

use crate::model::types::Point;
use nalgebra::Vector3;

/// Length below which a vector is treated as degenerate.
const DEGENERATE: f64 = 1e-6;

pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(a, b)
}

pub fn distance_squared(a: &Point, b: &Point) -> f64 {
    nalgebra::distance_squared(a, b)
}

pub fn norm(v: &Vector3<f64>) -> f64 {
    v.norm()
}

pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Angle `a-b-c` at the central point `b`, in `[0, π]`.
///
/// Returns `0.0` when either arm is degenerate.
pub fn angle(a: &Point, b: &Point, c: &Point) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let (la, lc) = (ba.norm(), bc.norm());
    if la < DEGENERATE || lc < DEGENERATE {
        return 0.0;
    }
    (ba.dot(&bc) / (la * lc)).clamp(-1.0, 1.0).acos()
}

/// Signed torsion `a-b-c-d` about the `b-c` axis, in `(-π, π]`.
///
/// Returns `0.0` when three consecutive points are collinear.
pub fn dihedral(a: &Point, b: &Point, c: &Point, d: &Point) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    if n1.norm() < DEGENERATE || n2.norm() < DEGENERATE {
        return 0.0;
    }

    let y = b2.norm() * b1.dot(&n2);
    let x = n1.dot(&n2);
    y.atan2(x)
}

/// Arithmetic mean of the supplied points; the origin for an empty input.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point>) -> Point {
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(acc, n), p| (acc + p.coords, n + 1));
    if count == 0 {
        Point::origin()
    } else {
        Point::from(sum / count as f64)
    }
}
