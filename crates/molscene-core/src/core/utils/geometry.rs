use nalgebra::{Point3, Rotation3, Unit, Vector3};
use std::f64::consts::PI;

/// Relative tolerance below which two directions are treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// The direction along which unrotated cylinder primitives are built (+Z).
pub fn canonical_axis() -> Unit<Vector3<f64>> {
    Vector3::z_axis()
}

/// Returns a unit vector perpendicular to `v`.
pub fn any_perpendicular(v: &Vector3<f64>) -> Unit<Vector3<f64>> {
    let helper = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    Unit::new_normalize(helper - v * (v.dot(&helper) / v.norm_squared()))
}

/// Rotation that turns `from` onto the direction of `to`.
///
/// The axis is `from x to` and the angle `atan2(|from x to|, from . to)`, which
/// stays accurate near 0 and pi. When the two are parallel the identity is
/// returned; when they are antiparallel the result is a half turn about a
/// vector perpendicular to `from`. A zero-length `to` gives the identity.
pub fn rotation_to_align(from: &Unit<Vector3<f64>>, to: &Vector3<f64>) -> Rotation3<f64> {
    let cross = from.cross(to);
    let sin = cross.norm();
    let cos = from.dot(to);

    if sin <= PARALLEL_TOLERANCE * to.norm() {
        return if cos >= 0.0 {
            Rotation3::identity()
        } else {
            Rotation3::from_axis_angle(&any_perpendicular(from), PI)
        };
    }
    Rotation3::from_axis_angle(&Unit::new_unchecked(cross / sin), sin.atan2(cos))
}

/// Placement of a segment between two points: midpoint, length and the rotation
/// that turns the canonical axis onto the segment direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPlacement {
    pub center: Point3<f64>,
    pub length: f64,
    pub rotation: Rotation3<f64>,
}

pub fn segment_placement(start: &Point3<f64>, end: &Point3<f64>) -> SegmentPlacement {
    let delta = end - start;
    SegmentPlacement {
        center: nalgebra::center(start, end),
        length: delta.norm(),
        rotation: rotation_to_align(&canonical_axis(), &delta),
    }
}
