use crate::math::{Axis, Point3};
use crate::topology::Polyhedron;

/// Mirrors a polyhedron across the plane orthogonal to an axis through a center.
///
/// A reflection inverts orientation, so every edge is flipped and every
/// side's winding reversed to keep the sides facing outward.
pub struct Mirror {
    axis: Axis,
    center: Point3,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(axis: Axis, center: Point3) -> Self {
        Self { axis, center }
    }

    /// Executes the mirror, modifying the polyhedron in-place.
    pub fn execute(&self, poly: &mut Polyhedron) {
        let (i, center) = (self.axis.index(), self.center);
        poly.map_geometry(
            |p| {
                let mut q = *p;
                q[i] = 2.0 * center[i] - q[i];
                q
            },
            |plane| plane.mirrored(self.axis, &center),
        );
        poly.invert_orientation();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{Face, FaceAttributes, Plane};
    use crate::math::{Aabb, Vector3};
    use crate::operations::clip::Cut;
    use crate::operations::creation::MakeBox;
    use crate::operations::query::IsValid;
    use crate::operations::transform::tests::assert_faces_follow_sides;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Box with one corner cut off, so mirroring is visible.
    fn wedge() -> Polyhedron {
        let mut poly = MakeBox::new(Aabb::new(p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0)))
            .with_attributes(FaceAttributes::default())
            .execute()
            .unwrap();
        let face = Face::new(
            Plane::from_normal(p(10.0, 10.0, 5.0), Vector3::new(1.0, 1.0, 1.0)).unwrap(),
            FaceAttributes::with_texture("corner"),
        );
        Cut::new(face).execute(&mut poly);
        poly
    }

    fn corner_normal(poly: &Polyhedron) -> Vector3 {
        let (id, _) = poly
            .sides()
            .find(|(_, s)| s.face.as_ref().is_some_and(|f| f.attributes.texture == "corner"))
            .unwrap();
        *poly.side_plane(id).unwrap().normal()
    }

    #[test]
    fn mirror_reflects_and_stays_valid() {
        let mut poly = wedge();
        Mirror::new(Axis::X, Point3::origin()).execute(&mut poly);

        assert_eq!(poly.bounds().min, p(-10.0, 0.0, 0.0));
        assert_eq!(poly.bounds().max, p(0.0, 10.0, 10.0));
        assert!(IsValid::new().execute(&poly));
        assert_faces_follow_sides(&poly);

        let expected = Vector3::new(-1.0, 1.0, 1.0).normalize();
        assert_relative_eq!(corner_normal(&poly), expected, epsilon = 1e-12);
    }

    #[test]
    fn side_normals_point_outward_after_mirror() {
        let mut poly = wedge();
        Mirror::new(Axis::Z, p(0.0, 0.0, 20.0)).execute(&mut poly);
        for (id, side) in poly.sides() {
            let plane = poly.side_plane(id).unwrap();
            assert!(plane.signed_distance(poly.center()) < 0.0);
            assert_relative_eq!(plane.signed_distance(&side.center), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn mirror_twice_is_identity() {
        let original = wedge();
        let mut poly = original.clone();
        Mirror::new(Axis::Y, p(0.0, 3.0, 0.0)).execute(&mut poly);
        Mirror::new(Axis::Y, p(0.0, 3.0, 0.0)).execute(&mut poly);

        for (id, vertex) in original.vertices() {
            assert_eq!(poly.vertex(id).unwrap().position, vertex.position);
        }
        for (id, edge) in original.edges() {
            assert_eq!(poly.edge(id).unwrap(), edge);
        }
        for (id, side) in original.sides() {
            let restored = poly.side(id).unwrap();
            assert_eq!(restored.vertices, side.vertices);
            assert_eq!(restored.edges, side.edges);
        }
    }
}
