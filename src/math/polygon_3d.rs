use nalgebra::Point2;

use crate::geometry::Plane;

use super::{Point3, Vector3, PLANE_EPSILON, TOLERANCE};

/// Coordinates of `point` in the `(u, v)` basis of `plane`.
fn plane_coords(point: &Point3, plane: &Plane) -> Point2<f64> {
    let offset = point - plane.origin();
    Point2::new(offset.dot(plane.u_dir()), offset.dot(plane.v_dir()))
}

/// Point-in-polygon test for a point lying in the polygon's plane.
///
/// Points within [`PLANE_EPSILON`] of the outline count as inside, so edges
/// and corners are never lost between two adjacent polygons.
#[must_use]
pub fn point_in_polygon_3d(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let q = plane_coords(point, plane);
    let outline: Vec<Point2<f64>> = polygon.iter().map(|p| plane_coords(p, plane)).collect();
    let segments = || outline.iter().zip(outline.iter().cycle().skip(1));

    if segments().any(|(a, b)| distance_to_segment(&q, a, b) <= PLANE_EPSILON) {
        return true;
    }

    // Even-odd crossings of the ray from `q` towards +u.
    let mut inside = false;
    for (a, b) in segments() {
        if (a.y > q.y) != (b.y > q.y) {
            let u = a.x + (q.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if u > q.x {
                inside = !inside;
            }
        }
    }
    inside
}

fn distance_to_segment(q: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    let t = if len_sq > TOLERANCE * TOLERANCE {
        ((q - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (q - (a + ab * t)).norm()
}

/// Newell normal of a polygon loop, or `None` when the loop has no area.
///
/// The result is unit length and follows the right-hand rule, so a loop
/// wound counter-clockwise seen from outside yields the outward normal.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Option<Vector3> {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal.try_normalize(TOLERANCE)
}

/// Shape of a polygon loop seen along its normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonShape {
    /// Simple and convex, wound counter-clockwise around the normal.
    Convex,
    /// Anything else: reflex corners, self-intersection, wrong winding, or fewer than three corners.
    Concave,
}

/// Classifies an ordered vertex loop as convex or concave with respect to `normal`.
///
/// Collinear corners are tolerated. Every turn must bend the same way
/// around `normal` and the turns must add up to exactly one revolution,
/// which rules out star-shaped loops that wind more than once.
#[must_use]
pub fn polygon_shape(points: &[Point3], normal: &Vector3) -> PolygonShape {
    let n = points.len();
    if n < 3 {
        return PolygonShape::Concave;
    }

    let mut total_turn = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let incoming = b - a;
        let outgoing = c - b;
        if incoming.norm() < TOLERANCE || outgoing.norm() < TOLERANCE {
            return PolygonShape::Concave;
        }
        let sin = incoming.cross(&outgoing).dot(normal);
        let cos = incoming.dot(&outgoing);
        let scale = incoming.norm() * outgoing.norm();
        if sin < -TOLERANCE * scale {
            return PolygonShape::Concave;
        }
        total_turn += sin.atan2(cos);
    }

    if (total_turn - std::f64::consts::TAU).abs() < 1e-6 {
        PolygonShape::Convex
    } else {
        PolygonShape::Concave
    }
}
