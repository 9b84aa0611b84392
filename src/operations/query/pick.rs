use crate::error::Result;
use crate::math::intersect_3d::ray_plane_front_hit;
use crate::math::polygon_3d::point_in_polygon_3d;
use crate::math::{Point3, Ray};
use crate::topology::{Polyhedron, SideId};

/// A ray hit on one side of a polyhedron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideHit {
    /// The side that was hit.
    pub side: SideId,
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    /// Hit point on the side.
    pub point: Point3,
}

/// Intersects a ray with a single side.
///
/// Only the front of a side can be hit: the ray must travel against the
/// side's outward normal. The hit point must fall inside or on the side
/// polygon.
pub struct PickSide {
    side: SideId,
    ray: Ray,
}

impl PickSide {
    /// Creates a new `PickSide` query.
    #[must_use]
    pub fn new(side: SideId, ray: Ray) -> Self {
        Self { side, ray }
    }

    /// Executes the query. Returns `None` when the ray misses.
    ///
    /// # Errors
    ///
    /// Returns an error if the side does not exist or has no area.
    pub fn execute(&self, poly: &Polyhedron) -> Result<Option<SideHit>> {
        let plane = poly.side_plane(self.side)?;
        let Some(distance) = ray_plane_front_hit(&self.ray, &plane) else {
            return Ok(None);
        };
        let point = self.ray.point_at(distance);
        let polygon = poly.side_points(self.side)?;
        if !point_in_polygon_3d(&point, &polygon, &plane) {
            return Ok(None);
        }
        Ok(Some(SideHit {
            side: self.side,
            distance,
            point,
        }))
    }
}

/// Finds the side of a polyhedron nearest along a ray.
pub struct Pick {
    ray: Ray,
}

impl Pick {
    /// Creates a new `Pick` query.
    #[must_use]
    pub fn new(ray: Ray) -> Self {
        Self { ray }
    }

    /// Executes the query. Degenerate sides are skipped.
    #[must_use]
    pub fn execute(&self, poly: &Polyhedron) -> Option<SideHit> {
        poly.sides()
            .filter_map(|(id, _)| PickSide::new(id, self.ray).execute(poly).ok().flatten())
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
