use super::{Point3, Vector3, TOLERANCE};

/// A half-line `origin + t * direction` with `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Vector3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// Returns `None` if `direction` is zero-length.
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Option<Self> {
        let direction = direction.try_normalize(TOLERANCE)?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Position of a point, or a set of points, relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStatus {
    /// On the side the plane normal points to.
    Above,
    /// On the opposite side of the normal.
    Below,
    /// On the plane, or (for point sets) on both sides.
    Inside,
}

impl PointStatus {
    /// Classifies a signed distance.
    #[must_use]
    pub fn from_distance(distance: f64, epsilon: f64) -> Self {
        if distance > epsilon {
            PointStatus::Above
        } else if distance < -epsilon {
            PointStatus::Below
        } else {
            PointStatus::Inside
        }
    }
}
