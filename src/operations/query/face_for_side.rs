use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Face, FaceAttributes, Plane};
use crate::math::{Aabb, PLANE_EPSILON, TOLERANCE};
use crate::topology::{Polyhedron, SideId};

/// Rebuilds a face definition from the current geometry of a side.
///
/// The plane passes through the three consecutive corners that span the
/// largest angle, which keeps it well conditioned after vertex drags. The
/// attributes are copied from the side's face, or defaulted if it has none.
pub struct FaceForSide {
    side: SideId,
    world_bounds: Aabb,
}

impl FaceForSide {
    /// Creates a new `FaceForSide` query.
    #[must_use]
    pub fn new(side: SideId, world_bounds: Aabb) -> Self {
        Self { side, world_bounds }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the side is missing, has no three non-collinear
    /// corners, or lies partly outside the world bounds.
    pub fn execute(&self, poly: &Polyhedron) -> Result<Face> {
        let side = poly.side(self.side)?;
        let points = poly.side_points(self.side)?;
        if points
            .iter()
            .any(|p| !self.world_bounds.contains(p, PLANE_EPSILON))
        {
            return Err(OperationError::InvalidInput("side leaves the world bounds".into()).into());
        }

        let n = points.len();
        let mut best: Option<(usize, f64)> = None;
        for i in 0..n {
            let (prev, curr, next) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            let (Some(a), Some(b)) = (
                (prev - curr).try_normalize(TOLERANCE),
                (next - curr).try_normalize(TOLERANCE),
            ) else {
                continue;
            };
            let sin = b.cross(&a).norm();
            if best.is_none_or(|(_, s)| sin > s) {
                best = Some((i, sin));
            }
        }

        let (i, _) = best
            .filter(|&(_, sin)| sin > TOLERANCE)
            .ok_or_else(|| GeometryError::Degenerate("side has no three non-collinear corners".into()))?;
        let plane = Plane::from_points(&points[i], &points[(i + 1) % n], &points[(i + n - 1) % n])?;
        let attributes = side
            .face
            .as_ref()
            .map_or_else(FaceAttributes::default, |face| face.attributes.clone());
        Ok(Face::new(plane, attributes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn world() -> Aabb {
        Aabb::new(p(-100.0, -100.0, -100.0), p(100.0, 100.0, 100.0))
    }

    #[test]
    fn face_matches_side_plane_and_attributes() {
        let poly = MakeBox::new(Aabb::new(p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0)))
            .with_attributes(FaceAttributes::with_texture("metal"))
            .execute()
            .unwrap();
        for (id, _) in poly.sides() {
            let face = FaceForSide::new(id, world()).execute(&poly).unwrap();
            let side_plane = poly.side_plane(id).unwrap();
            assert_relative_eq!(*face.plane.normal(), *side_plane.normal(), epsilon = 1e-12);
            assert_relative_eq!(face.plane.signed_distance(side_plane.origin()), 0.0, epsilon = 1e-9);
            assert_eq!(face.attributes.texture, "metal");
        }
    }

    #[test]
    fn faceless_side_gets_default_attributes() {
        let poly = MakeBox::new(Aabb::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)))
            .execute()
            .unwrap();
        let (id, _) = poly.sides().next().unwrap();
        let face = FaceForSide::new(id, world()).execute(&poly).unwrap();
        assert_eq!(face.attributes, FaceAttributes::default());
        assert_relative_eq!(*face.plane.normal(), *poly.side_plane(id).unwrap().normal(), epsilon = 1e-12);
    }

    #[test]
    fn side_outside_world_is_rejected() {
        let poly = MakeBox::new(Aabb::new(p(0.0, 0.0, 0.0), p(500.0, 1.0, 1.0)))
            .execute()
            .unwrap();
        let (id, _) = poly
            .sides()
            .find(|(_, side)| (side.center - Point3::new(500.0, 0.5, 0.5)).norm() < 1e-9)
            .unwrap();
        assert!(FaceForSide::new(id, world()).execute(&poly).is_err());
    }
}
