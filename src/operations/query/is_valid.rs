use std::collections::HashSet;

use slotmap::SecondaryMap;
use tracing::trace;

use crate::math::polygon_3d::{polygon_shape, PolygonShape};
use crate::math::PLANE_EPSILON;
use crate::topology::{EdgeId, Polyhedron, SideId};

/// Validates the topological and geometric consistency of a polyhedron.
///
/// A valid polyhedron is a closed, manifold, convex solid:
/// - every edge has two distinct sides, one traversing it in each direction,
/// - every side is a closed loop of at least three edges matching its vertices,
/// - every side is planar and convex, and no vertex lies in front of any side,
/// - every vertex is a corner of some side, and `V - E + F = 2`.
///
/// The empty polyhedron is not valid.
pub struct IsValid {
    epsilon: f64,
}

impl Default for IsValid {
    fn default() -> Self {
        Self::new()
    }
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epsilon: PLANE_EPSILON,
        }
    }

    /// Overrides the planarity and convexity tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Executes the validation, returning `true` if the polyhedron is valid.
    #[must_use]
    pub fn execute(&self, poly: &Polyhedron) -> bool {
        if poly.is_empty() {
            return false;
        }
        let valid = check_edges(poly) && check_sides(poly) && check_euler(poly) && self.check_geometry(poly);
        if !valid {
            trace!("polyhedron failed validation");
        }
        valid
    }

    fn check_geometry(&self, poly: &Polyhedron) -> bool {
        for (side_id, _) in poly.sides() {
            let (Ok(plane), Ok(points)) = (poly.side_plane(side_id), poly.side_points(side_id)) else {
                return false;
            };
            if points.iter().any(|p| plane.signed_distance(p).abs() > self.epsilon) {
                return false;
            }
            if polygon_shape(&points, plane.normal()) != PolygonShape::Convex {
                return false;
            }
            if poly
                .vertices()
                .any(|(_, v)| plane.signed_distance(&v.position) > self.epsilon)
            {
                return false;
            }
        }
        true
    }
}

fn check_edges(poly: &Polyhedron) -> bool {
    poly.edges().all(|(_, edge)| {
        let (Some(left), Some(right)) = (edge.left, edge.right) else {
            return false;
        };
        left != right
            && edge.start != edge.end
            && poly.vertex(edge.start).is_ok()
            && poly.vertex(edge.end).is_ok()
            && poly.side(left).is_ok()
            && poly.side(right).is_ok()
    })
}

fn check_sides(poly: &Polyhedron) -> bool {
    let mut uses: SecondaryMap<EdgeId, Vec<SideId>> = SecondaryMap::new();
    let mut corners = HashSet::new();

    for (side_id, side) in poly.sides() {
        let n = side.vertices.len();
        if n < 3 || side.edges.len() != n {
            return false;
        }
        for i in 0..n {
            let edge_id = side.edges[i];
            let (Ok(start), Ok(end)) = (
                poly.side_start_vertex(edge_id, side_id),
                poly.side_end_vertex(edge_id, side_id),
            ) else {
                return false;
            };
            if start != side.vertices[i] || end != side.vertices[(i + 1) % n] {
                return false;
            }
            if let Some(sides) = uses.get_mut(edge_id) {
                sides.push(side_id);
            } else {
                uses.insert(edge_id, vec![side_id]);
            }
        }
        corners.extend(side.vertices.iter().copied());
    }

    poly.edges()
        .all(|(id, _)| uses.get(id).is_some_and(|sides| sides.len() == 2))
        && poly.vertices().all(|(id, _)| corners.contains(&id))
}

fn check_euler(poly: &Polyhedron) -> bool {
    poly.vertex_count() + poly.side_count() == poly.edge_count() + 2
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Aabb, Point3};
    use crate::operations::creation::MakeBox;
    use crate::topology::{EdgeData, VertexData};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_box() -> Polyhedron {
        MakeBox::new(Aabb::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)))
            .execute()
            .unwrap()
    }

    #[test]
    fn box_is_valid() {
        assert!(IsValid::new().execute(&unit_box()));
    }

    #[test]
    fn empty_polyhedron_is_invalid() {
        assert!(!IsValid::new().execute(&Polyhedron::new()));
    }

    #[test]
    fn missing_side_is_invalid() {
        let mut poly = unit_box();
        let (sid, _) = poly.sides().next().unwrap();
        poly.remove_side(sid).unwrap();
        assert!(!IsValid::new().execute(&poly));
    }

    #[test]
    fn stray_vertex_is_invalid() {
        let mut poly = unit_box();
        poly.add_vertex(VertexData::new(p(0.5, 0.5, 0.5)));
        assert!(!IsValid::new().execute(&poly));
    }

    #[test]
    fn dangling_edge_is_invalid() {
        let mut poly = unit_box();
        let ids: Vec<_> = poly.vertices().map(|(id, _)| id).take(2).collect();
        poly.add_edge(EdgeData::new(ids[0], ids[1]));
        assert!(!IsValid::new().execute(&poly));
    }

    #[test]
    fn reversed_side_is_invalid() {
        let mut poly = unit_box();
        let (sid, _) = poly.sides().next().unwrap();
        poly.flip_side(sid).unwrap();
        assert!(!IsValid::new().execute(&poly));
    }

    #[test]
    fn dented_vertex_is_invalid() {
        let mut poly = unit_box();
        let (vid, _) = poly
            .vertices()
            .find(|(_, v)| v.position == p(1.0, 1.0, 1.0))
            .unwrap();
        poly.vertex_mut(vid).unwrap().position = p(0.9, 0.9, 0.9);
        assert!(!IsValid::new().execute(&poly));
    }
}
