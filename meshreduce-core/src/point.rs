//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Supporting plane of the triangle `(a, b, c)` as a unit normal and the
/// offset `d` such that `normal · p + d = 0` for every point `p` on it.
///
/// Returns `None` when the triangle has zero area.
pub fn triangle_plane(a: &Point3d, b: &Point3d, c: &Point3d) -> Option<(Vector3d, f64)> {
    let normal = (b - a).cross(&(c - a)).try_normalize(f64::EPSILON)?;
    if !normal.iter().all(|x| x.is_finite()) {
        return None;
    }
    let d = -normal.dot(&a.coords);
    Some((normal, d))
}
