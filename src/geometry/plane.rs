use crate::error::{GeometryError, Result};
use crate::math::{Axis, Point3, PointStatus, UnitQuaternion, Vector3, TOLERANCE};

/// An infinite oriented plane in 3D space.
///
/// Stored as an origin point, a unit normal, and two orthogonal in-plane
/// directions (`u_dir`, `v_dir`) with `u_dir × v_dir = normal`. The in-plane
/// basis gives each plane its own 2D coordinate system for polygon tests.
///
/// For brush faces the normal points out of the solid: points with a
/// positive signed distance are outside, negative ones are inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let normal = normal
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        Ok(Self::from_unit_normal(origin, normal))
    }

    /// Creates the plane through three points.
    ///
    /// The normal is `(b - a) × (c - a)`, so points listed counter-clockwise
    /// as seen from outside produce an outward-facing plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or coincident.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        let normal = normal
            .try_normalize(TOLERANCE)
            .ok_or_else(|| GeometryError::Degenerate("plane points are collinear".into()))?;
        Ok(Self::from_unit_normal(*a, normal))
    }

    /// Builds the in-plane basis for an already normalized normal.
    pub(crate) fn from_unit_normal(origin: Point3, normal: Vector3) -> Self {
        // Choose a reference vector not parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };

        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Self {
            origin,
            u_dir,
            v_dir,
            normal,
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Distance of the plane from the world origin along its normal.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.normal.dot(&self.origin.coords)
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Classifies `point` as above, below, or on the plane.
    #[must_use]
    pub fn point_status(&self, point: &Point3, epsilon: f64) -> PointStatus {
        PointStatus::from_distance(self.signed_distance(point), epsilon)
    }

    /// Returns `true` if both planes describe the same oriented plane.
    #[must_use]
    pub fn is_equivalent(&self, other: &Plane, epsilon: f64) -> bool {
        (self.normal - other.normal).norm() < epsilon
            && (self.distance() - other.distance()).abs() < epsilon
    }

    /// Returns the same plane facing the other way.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self::from_unit_normal(self.origin, -self.normal)
    }

    /// Returns the plane shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: &Vector3) -> Self {
        Self {
            origin: self.origin + delta,
            ..self.clone()
        }
    }

    /// Returns the plane rotated by `rotation` about `center`.
    #[must_use]
    pub fn rotated(&self, rotation: &UnitQuaternion, center: &Point3) -> Self {
        let origin = center + rotation * (self.origin - center);
        Self {
            origin,
            u_dir: rotation * self.u_dir,
            v_dir: rotation * self.v_dir,
            normal: rotation * self.normal,
        }
    }

    /// Returns the plane with every point and direction passed through an orthogonal map.
    ///
    /// `map_point` and `map_vector` must describe the same rigid or
    /// reflective transform. The in-plane basis is rebuilt afterwards so it
    /// stays right-handed even when the map is a reflection.
    #[must_use]
    pub fn mapped(
        &self,
        map_point: impl Fn(&Point3) -> Point3,
        map_vector: impl Fn(&Vector3) -> Vector3,
    ) -> Self {
        Self::from_unit_normal(map_point(&self.origin), map_vector(&self.normal))
    }

    /// Returns the plane mirrored across the plane orthogonal to `axis` through `center`.
    #[must_use]
    pub fn mirrored(&self, axis: Axis, center: &Point3) -> Self {
        let i = axis.index();
        self.mapped(
            |p| {
                let mut q = *p;
                q[i] = 2.0 * center[i] - q[i];
                q
            },
            |n| {
                let mut m = *n;
                m[i] = -m[i];
                m
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn from_points_uses_counter_clockwise_winding() {
        let plane = Plane::from_points(&p(0.0, 0.0, 3.0), &p(1.0, 0.0, 3.0), &p(0.0, 1.0, 3.0)).unwrap();
        assert_relative_eq!(*plane.normal(), v(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.distance(), 3.0);
    }

    #[test]
    fn collinear_points_are_rejected() {
        assert!(Plane::from_points(&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0), &p(2.0, 2.0, 2.0)).is_err());
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::zeros()).is_err());
    }

    #[test]
    fn basis_is_right_handed() {
        for n in [v(1.0, 0.0, 0.0), v(0.0, -1.0, 0.0), v(1.0, 2.0, 3.0)] {
            let plane = Plane::from_normal(p(0.0, 0.0, 0.0), n).unwrap();
            assert_relative_eq!(plane.u_dir().cross(plane.v_dir()), *plane.normal(), epsilon = 1e-12);
        }
    }

    #[test]
    fn point_status_classifies_both_sides() {
        let plane = Plane::from_normal(p(5.0, 0.0, 0.0), v(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(plane.point_status(&p(6.0, 0.0, 0.0), 1e-6), PointStatus::Above);
        assert_eq!(plane.point_status(&p(4.0, 9.0, 0.0), 1e-6), PointStatus::Below);
        assert_eq!(plane.point_status(&p(5.0, 3.0, 3.0), 1e-6), PointStatus::Inside);
    }

    #[test]
    fn mirrored_plane_flips_normal_component() {
        let plane = Plane::from_normal(p(5.0, 0.0, 0.0), v(1.0, 0.0, 0.0)).unwrap();
        let mirrored = plane.mirrored(Axis::X, &p(2.0, 0.0, 0.0));
        assert_relative_eq!(*mirrored.normal(), v(-1.0, 0.0, 0.0));
        assert_relative_eq!(mirrored.signed_distance(&p(-1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn equivalent_planes_ignore_origin_choice() {
        let a = Plane::from_normal(p(0.0, 0.0, 2.0), v(0.0, 0.0, 1.0)).unwrap();
        let b = Plane::from_normal(p(7.0, -3.0, 2.0), v(0.0, 0.0, 4.0)).unwrap();
        assert!(a.is_equivalent(&b, 1e-9));
        assert!(!a.is_equivalent(&b.flipped(), 1e-9));
    }
}
