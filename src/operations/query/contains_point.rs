use crate::math::{Point3, PLANE_EPSILON};
use crate::topology::Polyhedron;

/// Point-in-convex-polyhedron test.
///
/// A point is contained if it lies behind or on every side plane, within
/// the epsilon. The empty polyhedron contains nothing.
pub struct ContainsPoint {
    point: Point3,
    epsilon: f64,
}

impl ContainsPoint {
    /// Creates a new `ContainsPoint` query.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            epsilon: PLANE_EPSILON,
        }
    }

    /// Overrides how far in front of a side the point may lie.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, poly: &Polyhedron) -> bool {
        if poly.is_empty() || !poly.bounds().contains(&self.point, self.epsilon) {
            return false;
        }
        poly.sides().all(|(id, _)| {
            poly.side_plane(id)
                .is_ok_and(|plane| plane.signed_distance(&self.point) <= self.epsilon)
        })
    }
}
