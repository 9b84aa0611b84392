use crate::geometry::Plane;

use super::{Point3, Ray, Vector3, TOLERANCE};

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// Line intersects the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of a line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.normal();
    let denom = normal.dot(dir);
    let numer = -plane.signed_distance(origin);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        LinePlaneRelation::Point {
            point: origin + dir * t,
            t,
        }
    }
}

/// Intersection of the segment `start..end` with a plane the segment crosses.
///
/// Interpolates by the endpoints' signed distances, which is exact at
/// both ends and stays inside the segment even for nearly parallel edges.
/// Returns `None` when both endpoints lie on the same side.
#[must_use]
pub fn segment_plane_intersect(start: &Point3, end: &Point3, plane: &Plane) -> Option<Point3> {
    let ds = plane.signed_distance(start);
    let de = plane.signed_distance(end);
    if ds * de > 0.0 || (ds - de).abs() < TOLERANCE {
        return None;
    }
    let t = ds / (ds - de);
    Some(start + (end - start) * t)
}

/// Distance along `ray` to the plane, if the ray hits the plane's front.
///
/// Back-facing and parallel planes, and hits behind the origin, yield `None`.
#[must_use]
pub fn ray_plane_front_hit(ray: &Ray, plane: &Plane) -> Option<f64> {
    if plane.normal().dot(&ray.direction) > -TOLERANCE {
        return None;
    }
    match line_plane_intersect(&ray.origin, &ray.direction, plane) {
        LinePlaneRelation::Point { t, .. } if t >= 0.0 => Some(t),
        _ => None,
    }
}
