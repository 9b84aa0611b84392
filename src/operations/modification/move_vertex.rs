use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{Face, FaceAttributes, Plane};
use crate::math::{Aabb, Point3, Vector3, PLANE_EPSILON, TOLERANCE};
use crate::operations::clip::{Cut, CutResult};
use crate::operations::creation::MakeBox;
use crate::operations::query::IsValid;
use crate::topology::{Polyhedron, VertexId};

/// Outcome of a [`TranslateVertex`].
#[derive(Debug, Clone, PartialEq)]
pub struct VertexMove {
    /// The dragged vertex in the resulting solid, or `None` if it was
    /// absorbed into an edge or side.
    pub vertex: Option<VertexId>,
    /// Faces created for sides the drag introduced.
    pub new_faces: Vec<Face>,
    /// Faces whose sides the drag removed.
    pub removed_faces: Vec<Face>,
}

impl VertexMove {
    fn unchanged(vertex: VertexId) -> Self {
        Self {
            vertex: Some(vertex),
            new_faces: Vec::new(),
            removed_faces: Vec::new(),
        }
    }
}

/// Drags one vertex and rebuilds the solid around its new position.
///
/// The result is the convex hull of the moved vertex and all others. A
/// drag is rejected, leaving the solid untouched, if the new position lies
/// strictly inside that hull or the hull is flat. Landing on another vertex
/// merges the two.
///
/// All handles of the solid are replaced when a drag is accepted.
pub struct TranslateVertex {
    vertex: VertexId,
    delta: Vector3,
    epsilon: f64,
}

/// A side of the solid before the drag.
struct OldSide {
    plane: Plane,
    face: Option<Face>,
    touches_vertex: bool,
}

impl TranslateVertex {
    /// Creates a new `TranslateVertex` operation.
    #[must_use]
    pub fn new(vertex: VertexId, delta: Vector3) -> Self {
        Self {
            vertex,
            delta,
            epsilon: PLANE_EPSILON,
        }
    }

    /// Overrides the distance used for merging vertices and matching planes.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Executes the drag, modifying the polyhedron in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist or a side of the
    /// current solid is degenerate.
    pub fn execute(&self, poly: &mut Polyhedron) -> Result<VertexMove> {
        let target = poly.vertex(self.vertex)?.position + self.delta;
        if self.delta.norm() < TOLERANCE {
            return Ok(VertexMove::unchanged(self.vertex));
        }

        let mut points: Vec<Point3> = poly
            .vertices()
            .filter(|&(id, _)| id != self.vertex)
            .map(|(_, v)| v.position)
            .collect();
        let merged = points.iter().any(|p| (p - target).norm() <= self.epsilon);
        if !merged {
            points.push(target);
        }

        let Some(planes) = hull_planes(&points, self.epsilon) else {
            warn!("vertex drag would flatten the solid");
            return Ok(VertexMove::unchanged(self.vertex));
        };

        let old_sides = poly
            .sides()
            .map(|(id, side)| {
                Ok(OldSide {
                    plane: poly.side_plane(id)?,
                    face: side.face.clone(),
                    touches_vertex: side.vertices.contains(&self.vertex),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut matched = vec![false; old_sides.len()];
        let mut faces = Vec::with_capacity(planes.len());
        let mut faceless = Vec::new();
        let mut new_faces = Vec::new();
        for plane in planes {
            if let Some(i) = old_sides
                .iter()
                .position(|side| side.plane.is_equivalent(&plane, self.epsilon))
            {
                matched[i] = true;
                if let Some(face) = &old_sides[i].face {
                    faces.push(face.clone());
                } else {
                    faceless.push(plane.clone());
                    faces.push(Face::new(plane, FaceAttributes::default()));
                }
            } else {
                let attributes = self.attributes_for(&old_sides, &plane);
                let face = Face::new(plane, attributes);
                new_faces.push(face.clone());
                faces.push(face);
            }
        }

        let Some(mut hull) = self.build_hull(&points, &faces)? else {
            warn!("vertex drag produced an invalid solid");
            return Ok(VertexMove::unchanged(self.vertex));
        };

        let vertex = hull
            .vertices()
            .find(|(_, v)| (v.position - target).norm() <= self.epsilon)
            .map(|(id, _)| id);
        if vertex.is_none() && !self.on_boundary(&hull, &target) {
            warn!("vertex drag would make the solid concave");
            return Ok(VertexMove::unchanged(self.vertex));
        }

        let stripped: Vec<_> = hull
            .sides()
            .filter(|(_, side)| {
                side.face
                    .as_ref()
                    .is_some_and(|f| faceless.iter().any(|p| p.is_equivalent(&f.plane, self.epsilon)))
            })
            .map(|(id, _)| id)
            .collect();
        for id in stripped {
            hull.side_mut(id)?.face = None;
        }

        let removed_faces: Vec<Face> = old_sides
            .into_iter()
            .zip(matched)
            .filter(|&(_, kept)| !kept)
            .filter_map(|(side, _)| side.face)
            .collect();

        debug!(
            merged,
            absorbed = vertex.is_none(),
            new_faces = new_faces.len(),
            removed_faces = removed_faces.len(),
            "dragged vertex"
        );
        *poly = hull;
        Ok(VertexMove {
            vertex,
            new_faces,
            removed_faces,
        })
    }

    /// Attributes of the old side around the dragged vertex that faces most like `plane`.
    fn attributes_for(&self, old_sides: &[OldSide], plane: &Plane) -> FaceAttributes {
        old_sides
            .iter()
            .filter(|side| side.touches_vertex)
            .max_by(|a, b| {
                let a = a.plane.normal().dot(plane.normal());
                let b = b.plane.normal().dot(plane.normal());
                a.total_cmp(&b)
            })
            .and_then(|side| side.face.as_ref())
            .map_or_else(FaceAttributes::default, |face| face.attributes.clone())
    }

    /// Cuts a box around `points` by every face. `None` if the result is not a valid closed solid.
    fn build_hull(&self, points: &[Point3], faces: &[Face]) -> Result<Option<Polyhedron>> {
        let Some(bounds) = Aabb::from_points(points) else {
            return Ok(None);
        };
        let mut hull = MakeBox::new(bounds.expanded(1.0)).execute()?;
        for face in faces {
            let outcome = Cut::new(face.clone())
                .with_epsilon(self.epsilon)
                .execute(&mut hull);
            if outcome.result == CutResult::Null {
                return Ok(None);
            }
        }

        let closed = hull.sides().all(|(_, side)| side.face.is_some());
        let valid = IsValid::new()
            .with_epsilon(self.epsilon.max(PLANE_EPSILON))
            .execute(&hull);
        Ok((closed && valid).then_some(hull))
    }

    fn on_boundary(&self, hull: &Polyhedron, point: &Point3) -> bool {
        hull.sides().any(|(id, _)| {
            hull.side_plane(id)
                .is_ok_and(|plane| plane.signed_distance(point).abs() <= self.epsilon)
        })
    }
}

/// Supporting planes of the convex hull of `points`, facing outward.
///
/// Every plane through three of the points with no point in front of it is
/// a side plane of the hull. Returns `None` if the points are coplanar.
fn hull_planes(points: &[Point3], epsilon: f64) -> Option<Vec<Plane>> {
    let n = points.len();
    if n < 4 {
        return None;
    }

    let mut planes: Vec<Plane> = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let origin = points[i];
                let Some(normal) = (points[j] - origin)
                    .cross(&(points[k] - origin))
                    .try_normalize(epsilon)
                else {
                    continue;
                };

                let distances: Vec<f64> = points.iter().map(|p| normal.dot(&(p - origin))).collect();
                if distances.iter().all(|d| d.abs() <= epsilon) {
                    return None;
                }
                let normal = if distances.iter().all(|&d| d <= epsilon) {
                    normal
                } else if distances.iter().all(|&d| d >= -epsilon) {
                    -normal
                } else {
                    continue;
                };

                let plane = Plane::from_unit_normal(origin, normal);
                if !planes.iter().any(|p| p.is_equivalent(&plane, epsilon)) {
                    planes.push(plane);
                }
            }
        }
    }
    (planes.len() >= 4).then_some(planes)
}
