use crate::math::{Point3, PointStatus, Vector3, PLANE_EPSILON, TOLERANCE};

/// Classifies a point set against the plane through a ray origin, facing
/// along the ray direction.
///
/// Points on the plane do not count. The set is [`PointStatus::Above`] or
/// [`PointStatus::Below`] if every remaining point lies on that side, and
/// [`PointStatus::Inside`] if it straddles the plane or touches it only.
pub struct VertexStatusFromRay {
    origin: Point3,
    direction: Vector3,
}

impl VertexStatusFromRay {
    /// Creates a new `VertexStatusFromRay` query.
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Executes the query. A zero direction classifies everything as `Inside`.
    #[must_use]
    pub fn execute(&self, points: &[Point3]) -> PointStatus {
        let Some(normal) = self.direction.try_normalize(TOLERANCE) else {
            return PointStatus::Inside;
        };

        let mut above = false;
        let mut below = false;
        for point in points {
            match PointStatus::from_distance(normal.dot(&(point - self.origin)), PLANE_EPSILON) {
                PointStatus::Above => above = true,
                PointStatus::Below => below = true,
                PointStatus::Inside => {}
            }
            if above && below {
                return PointStatus::Inside;
            }
        }
        match (above, below) {
            (true, false) => PointStatus::Above,
            (false, true) => PointStatus::Below,
            _ => PointStatus::Inside,
        }
    }
}
