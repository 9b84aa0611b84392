pub mod bounds;
pub mod intersect_3d;
pub mod polygon_3d;
pub mod ray;

pub use bounds::Aabb;
pub use ray::{PointStatus, Ray};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion used for arbitrary rotations.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance below which a point counts as lying on a plane.
///
/// Brush coordinates live on an editor grid measured in whole units, so this
/// is much coarser than [`TOLERANCE`].
pub const PLANE_EPSILON: f64 = 1e-6;

/// Distance below which a computed coordinate is snapped to the nearest integer.
///
/// Only absorbs floating-point noise from intersections; it stays well below
/// [`PLANE_EPSILON`] so snapping never moves a point off its plane.
pub const SNAP_EPSILON: f64 = 1e-8;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of this axis into a point or vector.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes in cyclic order, so that `u × v` points along `self`.
    #[must_use]
    pub fn cyclic_pair(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (2, 0),
            Axis::Z => (0, 1),
        }
    }

    /// Unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Rounds every coordinate that lies within `epsilon` of an integer.
#[must_use]
pub fn snap_point(point: &Point3, epsilon: f64) -> Point3 {
    point.map(|c| {
        let rounded = c.round();
        if (c - rounded).abs() < epsilon {
            rounded
        } else {
            c
        }
    })
}

/// Arithmetic mean of a set of points, or the origin for an empty set.
#[must_use]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    Point3::from(sum / points.len() as f64)
}
