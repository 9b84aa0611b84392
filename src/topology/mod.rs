pub mod edge;
pub mod side;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use side::{SideData, SideId};
pub use vertex::{VertexData, VertexId};

use slotmap::SlotMap;

use crate::error::{GeometryError, TopologyError};
use crate::geometry::{Face, Plane};
use crate::math::polygon_3d::newell_normal;
use crate::math::{centroid, Aabb, Point3, Ray, Vector3};

/// Boundary representation of one convex solid.
///
/// Owns the vertex, edge and side arenas. Entities reference each other
/// through typed keys (generational indices), so cloning a polyhedron yields
/// a fully independent graph and a removed entity can never be reached
/// through a stale key.
///
/// Keys are only stable between mutating calls: cutting, dragging a vertex
/// or removing entities may invalidate them.
#[derive(Debug, Clone, Default)]
pub struct Polyhedron {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    sides: SlotMap<SideId, SideData>,
    bounds: Aabb,
    center: Point3,
}

impl Polyhedron {
    /// Creates a new, empty polyhedron.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the polyhedron has no sides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Cached bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Cached centroid of all vertices.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of sides.
    #[must_use]
    pub fn side_count(&self) -> usize {
        self.sides.len()
    }

    /// Iterates over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Iterates over all edges with their IDs.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// Iterates over all sides with their IDs.
    pub fn sides(&self) -> impl Iterator<Item = (SideId, &SideData)> {
        self.sides.iter()
    }

    /// Faces carried by the sides, in arena order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.sides.values().filter_map(|s| s.face.as_ref())
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Removes a vertex that no edge refers to.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist or an edge still uses it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<VertexData, TopologyError> {
        if self.edges.values().any(|e| e.has_vertex(id)) {
            return Err(TopologyError::StillReferenced("vertex".into()));
        }
        self.vertices
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Removes an edge that no side lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge does not exist or a side still uses it.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeData, TopologyError> {
        if self.sides.values().any(|s| s.edges.contains(&id)) {
            return Err(TopologyError::StillReferenced("edge".into()));
        }
        self.edges
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    // --- Side operations ---

    /// Inserts a side as-is and returns its ID. Edge links are not touched.
    pub fn add_side(&mut self, data: SideData) -> SideId {
        self.sides.insert(data)
    }

    /// Creates a side from a closed loop of edges and links it into them.
    ///
    /// Each entry is an edge and whether the side traverses it reversed
    /// (`end → start`). A forward edge gets the new side as its right
    /// side, a reversed one as its left side.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge is missing, the loop has fewer than three
    /// edges or is not closed, or an edge already has a side in that slot.
    pub fn add_side_from_edges(
        &mut self,
        loop_edges: &[(EdgeId, bool)],
        face: Option<Face>,
    ) -> Result<SideId, TopologyError> {
        let n = loop_edges.len();
        if n < 3 {
            return Err(TopologyError::InvalidTopology(format!(
                "a side needs at least three edges, got {n}"
            )));
        }

        let mut vertices = Vec::with_capacity(n);
        for (i, &(edge_id, reversed)) in loop_edges.iter().enumerate() {
            let edge = self.edge(edge_id)?;
            let (from, to, slot) = if reversed {
                (edge.end, edge.start, edge.left)
            } else {
                (edge.start, edge.end, edge.right)
            };
            if slot.is_some() {
                return Err(TopologyError::InvalidTopology(
                    "edge already has a side in that direction".into(),
                ));
            }

            let (next_id, next_reversed) = loop_edges[(i + 1) % n];
            let next = self.edge(next_id)?;
            let next_from = if next_reversed { next.end } else { next.start };
            if to != next_from {
                return Err(TopologyError::InvalidTopology("side loop is not closed".into()));
            }
            vertices.push(from);
        }

        let edges = loop_edges.iter().map(|&(e, _)| e).collect();
        let side_id = self.sides.insert(SideData::new(vertices, edges, face));
        for &(edge_id, reversed) in loop_edges {
            let edge = self.edge_mut(edge_id)?;
            if reversed {
                edge.left = Some(side_id);
            } else {
                edge.right = Some(side_id);
            }
        }
        self.refresh_side_center(side_id)?;
        Ok(side_id)
    }

    /// Returns a reference to the side data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn side(&self, id: SideId) -> Result<&SideData, TopologyError> {
        self.sides
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("side".into()))
    }

    /// Returns a mutable reference to the side data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn side_mut(&mut self, id: SideId) -> Result<&mut SideData, TopologyError> {
        self.sides
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("side".into()))
    }

    /// Removes a side and unlinks it from every edge that refers to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the side does not exist.
    pub fn remove_side(&mut self, id: SideId) -> Result<SideData, TopologyError> {
        let side = self
            .sides
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("side".into()))?;
        for edge in self.edges.values_mut() {
            edge.replace_side(id, None);
        }
        Ok(side)
    }

    /// Removes every vertex, edge and side.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.sides.clear();
        self.bounds = Aabb::default();
        self.center = Point3::origin();
    }

    /// Removes vertices that are not a corner of any side. Returns how many were removed.
    pub fn remove_unused_vertices(&mut self) -> usize {
        let sides = &self.sides;
        let before = self.vertices.len();
        self.vertices
            .retain(|id, _| sides.values().any(|s| s.vertices.contains(&id)));
        before - self.vertices.len()
    }

    // --- Geometry ---

    /// Recomputes the bounding box, the center and every side center.
    pub fn update_bounds(&mut self) {
        let positions: Vec<Point3> = self.vertices.values().map(|v| v.position).collect();
        self.bounds = Aabb::from_points(&positions).unwrap_or_default();
        self.center = centroid(&positions);

        let vertices = &self.vertices;
        for side in self.sides.values_mut() {
            let corners: Vec<Point3> = side
                .vertices
                .iter()
                .filter_map(|&v| vertices.get(v).map(|v| v.position))
                .collect();
            side.center = centroid(&corners);
        }
    }

    fn refresh_side_center(&mut self, id: SideId) -> Result<(), TopologyError> {
        let center = self.center_of_vertices(&self.side(id)?.vertices)?;
        self.side_mut(id)?.center = center;
        Ok(())
    }

    /// Centroid of the given vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex is not found.
    pub fn center_of_vertices(&self, ids: &[VertexId]) -> Result<Point3, TopologyError> {
        let points = ids
            .iter()
            .map(|&v| self.vertex(v).map(|v| v.position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(centroid(&points))
    }

    /// Vector from an edge's start to its end.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its vertices is not found.
    pub fn edge_vector(&self, id: EdgeId) -> Result<Vector3, TopologyError> {
        let edge = self.edge(id)?;
        Ok(self.vertex(edge.end)?.position - self.vertex(edge.start)?.position)
    }

    /// Corner positions of a side in winding order.
    ///
    /// # Errors
    ///
    /// Returns an error if the side or one of its vertices is not found.
    pub fn side_points(&self, id: SideId) -> Result<Vec<Point3>, TopologyError> {
        self.side(id)?
            .vertices
            .iter()
            .map(|&v| self.vertex(v).map(|v| v.position))
            .collect()
    }

    /// Plane fitted to a side's corners, facing out of the solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the side is missing or has no area.
    pub fn side_plane(&self, id: SideId) -> crate::Result<Plane> {
        let points = self.side_points(id)?;
        let normal = newell_normal(&points)
            .ok_or_else(|| GeometryError::Degenerate("side has no area".into()))?;
        Ok(Plane::from_unit_normal(centroid(&points), normal))
    }

    /// Reverses the endpoints of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn flip_edge(&mut self, id: EdgeId) -> Result<(), TopologyError> {
        self.edge_mut(id)?.flip();
        Ok(())
    }

    /// Reverses the winding of a side.
    ///
    /// Leaves the edges alone; flipping a whole solid also flips every edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the side is not found.
    pub fn flip_side(&mut self, id: SideId) -> Result<(), TopologyError> {
        self.side_mut(id)?.reverse();
        Ok(())
    }

    /// Vertex at which `side` enters `edge`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found or `side` is not adjacent to it.
    pub fn side_start_vertex(&self, edge: EdgeId, side: SideId) -> Result<VertexId, TopologyError> {
        self.edge(edge)?
            .start_for(side)
            .ok_or_else(|| TopologyError::InvalidTopology("side is not adjacent to edge".into()))
    }

    /// Vertex at which `side` leaves `edge`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found or `side` is not adjacent to it.
    pub fn side_end_vertex(&self, edge: EdgeId, side: SideId) -> Result<VertexId, TopologyError> {
        self.edge(edge)?
            .end_for(side)
            .ok_or_else(|| TopologyError::InvalidTopology("side is not adjacent to edge".into()))
    }

    /// Position of `vertex` in the winding of `side`.
    ///
    /// # Errors
    ///
    /// Returns an error if the side is not found.
    pub fn vertex_index(&self, side: SideId, vertex: VertexId) -> Result<Option<usize>, TopologyError> {
        Ok(self.side(side)?.vertex_index(vertex))
    }

    /// The side of `edge` that faces the viewer of `ray`.
    ///
    /// Of the two adjacent sides, the one whose normal points most against
    /// the ray direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing, not linked to two sides, or a
    /// side is degenerate.
    pub fn front_side_of_edge(&self, edge: EdgeId, ray: &Ray) -> crate::Result<SideId> {
        let (front, _) = self.sides_of_edge_by_facing(edge, ray)?;
        Ok(front)
    }

    /// The side of `edge` that faces away from the viewer of `ray`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing, not linked to two sides, or a
    /// side is degenerate.
    pub fn back_side_of_edge(&self, edge: EdgeId, ray: &Ray) -> crate::Result<SideId> {
        let (_, back) = self.sides_of_edge_by_facing(edge, ray)?;
        Ok(back)
    }

    fn sides_of_edge_by_facing(&self, edge: EdgeId, ray: &Ray) -> crate::Result<(SideId, SideId)> {
        let data = self.edge(edge)?;
        let (Some(left), Some(right)) = (data.left, data.right) else {
            return Err(TopologyError::InvalidTopology("edge is missing a side".into()).into());
        };
        let left_dot = self.side_plane(left)?.normal().dot(&ray.direction);
        let right_dot = self.side_plane(right)?.normal().dot(&ray.direction);
        if left_dot <= right_dot {
            Ok((left, right))
        } else {
            Ok((right, left))
        }
    }

    /// Moves every vertex and side center through `map`, and every face plane
    /// through `map_plane`, then refreshes the cached bounds.
    pub(crate) fn map_geometry(
        &mut self,
        map: impl Fn(&Point3) -> Point3,
        map_plane: impl Fn(&Plane) -> Plane,
    ) {
        for vertex in self.vertices.values_mut() {
            vertex.position = map(&vertex.position);
        }
        for side in self.sides.values_mut() {
            if let Some(face) = side.face.as_mut() {
                face.plane = map_plane(&face.plane);
            }
        }
        self.update_bounds();
    }

    /// Flips every edge and reverses every side, inverting the orientation of the solid.
    pub(crate) fn invert_orientation(&mut self) {
        for edge in self.edges.values_mut() {
            edge.flip();
        }
        for side in self.sides.values_mut() {
            side.reverse();
        }
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

    /// Unit right-angled tetrahedron built by hand through the store API.
    fn tetrahedron() -> Polyhedron {
        let mut poly = Polyhedron::new();
        let a = poly.add_vertex(VertexData::new(p(0.0, 0.0, 0.0)));
        let b = poly.add_vertex(VertexData::new(p(1.0, 0.0, 0.0)));
        let c = poly.add_vertex(VertexData::new(p(0.0, 1.0, 0.0)));
        let d = poly.add_vertex(VertexData::new(p(0.0, 0.0, 1.0)));

        let ab = poly.add_edge(EdgeData::new(a, b));
        let ac = poly.add_edge(EdgeData::new(a, c));
        let ad = poly.add_edge(EdgeData::new(a, d));
        let bc = poly.add_edge(EdgeData::new(b, c));
        let bd = poly.add_edge(EdgeData::new(b, d));
        let cd = poly.add_edge(EdgeData::new(c, d));

        poly.add_side_from_edges(&[(ac, false), (bc, true), (ab, true)], None)
            .unwrap();
        poly.add_side_from_edges(&[(ab, false), (bd, false), (ad, true)], None)
            .unwrap();
        poly.add_side_from_edges(&[(ad, false), (cd, true), (ac, true)], None)
            .unwrap();
        poly.add_side_from_edges(&[(bc, false), (cd, false), (bd, true)], None)
            .unwrap();
        poly.update_bounds();
        poly
    }

    #[test]
    fn hand_built_tetrahedron_is_closed() {
        let poly = tetrahedron();
        assert_eq!(poly.vertex_count(), 4);
        assert_eq!(poly.edge_count(), 6);
        assert_eq!(poly.side_count(), 4);
        for (_, edge) in poly.edges() {
            assert!(edge.left.is_some() && edge.right.is_some());
        }
        assert_eq!(poly.bounds().max, p(1.0, 1.0, 1.0));
        assert_relative_eq!(*poly.center(), p(0.25, 0.25, 0.25));
    }

    #[test]
    fn side_planes_face_outward() {
        let poly = tetrahedron();
        for (id, side) in poly.sides() {
            let plane = poly.side_plane(id).unwrap();
            assert!(plane.signed_distance(poly.center()) < 0.0);
            assert_relative_eq!(plane.signed_distance(&side.center), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn side_traversal_matches_winding() {
        let poly = tetrahedron();
        for (side_id, side) in poly.sides() {
            let n = side.vertices.len();
            for i in 0..n {
                let e = side.edges[i];
                assert_eq!(poly.side_start_vertex(e, side_id).unwrap(), side.vertices[i]);
                assert_eq!(poly.side_end_vertex(e, side_id).unwrap(), side.vertices[(i + 1) % n]);
            }
        }
    }

    #[test]
    fn referenced_vertex_cannot_be_removed() {
        let mut poly = tetrahedron();
        let (vid, _) = poly.vertices().next().unwrap();
        assert!(matches!(
            poly.remove_vertex(vid),
            Err(TopologyError::StillReferenced(_))
        ));
        assert_eq!(poly.vertex_count(), 4);
    }

    #[test]
    fn referenced_edge_cannot_be_removed() {
        let mut poly = tetrahedron();
        let (eid, _) = poly.edges().next().unwrap();
        assert!(poly.remove_edge(eid).is_err());
    }

    #[test]
    fn removing_side_unlinks_edges() {
        let mut poly = tetrahedron();
        let (sid, _) = poly.sides().next().unwrap();
        let removed = poly.remove_side(sid).unwrap();
        for eid in removed.edges {
            let edge = poly.edge(eid).unwrap();
            assert!(edge.left != Some(sid) && edge.right != Some(sid));
            assert!(edge.left.is_none() || edge.right.is_none());
        }
        // The edges are unreferenced once every side is gone.
        let remaining: Vec<SideId> = poly.sides().map(|(id, _)| id).collect();
        for sid in remaining {
            poly.remove_side(sid).unwrap();
        }
        let edges: Vec<EdgeId> = poly.edges().map(|(id, _)| id).collect();
        for eid in edges {
            poly.remove_edge(eid).unwrap();
        }
        assert_eq!(poly.remove_unused_vertices(), 4);
    }

    #[test]
    fn open_loop_is_rejected() {
        let mut poly = Polyhedron::new();
        let a = poly.add_vertex(VertexData::new(p(0.0, 0.0, 0.0)));
        let b = poly.add_vertex(VertexData::new(p(1.0, 0.0, 0.0)));
        let c = poly.add_vertex(VertexData::new(p(0.0, 1.0, 0.0)));
        let d = poly.add_vertex(VertexData::new(p(0.0, 0.0, 1.0)));
        let ab = poly.add_edge(EdgeData::new(a, b));
        let bc = poly.add_edge(EdgeData::new(b, c));
        let cd = poly.add_edge(EdgeData::new(c, d));
        assert!(poly
            .add_side_from_edges(&[(ab, false), (bc, false), (cd, false)], None)
            .is_err());
        assert_eq!(poly.side_count(), 0);
    }

    #[test]
    fn occupied_slot_is_rejected() {
        let mut poly = tetrahedron();
        let (eid, edge) = poly.edges().next().unwrap();
        let (start, end) = (edge.start, edge.end);
        let extra = poly.add_vertex(VertexData::new(p(5.0, 5.0, 5.0)));
        let e1 = poly.add_edge(EdgeData::new(end, extra));
        let e2 = poly.add_edge(EdgeData::new(extra, start));
        assert!(poly
            .add_side_from_edges(&[(eid, false), (e1, false), (e2, false)], None)
            .is_err());
    }

    #[test]
    fn clone_is_independent() {
        let original = tetrahedron();
        let mut copy = original.clone();
        let (vid, _) = copy.vertices().next().unwrap();
        copy.vertex_mut(vid).unwrap().position = p(9.0, 9.0, 9.0);
        copy.clear();
        assert!(copy.is_empty());
        assert_eq!(original.vertex_count(), 4);
        assert_ne!(original.vertex(vid).unwrap().position, p(9.0, 9.0, 9.0));
    }

    #[test]
    fn flip_side_keeps_edge_alignment() {
        let mut poly = tetrahedron();
        let (sid, _) = poly.sides().next().unwrap();
        let before = poly.side(sid).unwrap().clone();
        poly.flip_side(sid).unwrap();
        let after = poly.side(sid).unwrap();
        let n = after.vertices.len();
        for i in 0..n {
            let edge = poly.edge(after.edges[i]).unwrap();
            assert!(edge.connects(after.vertices[i], after.vertices[(i + 1) % n]));
        }
        poly.flip_side(sid).unwrap();
        assert_eq!(poly.side(sid).unwrap(), &before);
    }

    #[test]
    fn front_and_back_side_of_edge() {
        let poly = tetrahedron();
        // Edge a-b lies between the z = 0 and y = 0 sides.
        let (ab, _) = poly
            .edges()
            .find(|(_, e)| {
                let s = poly.vertex(e.start).unwrap().position;
                let t = poly.vertex(e.end).unwrap().position;
                s == p(0.0, 0.0, 0.0) && t == p(1.0, 0.0, 0.0)
            })
            .unwrap();
        let ray = Ray::new(p(0.5, -5.0, -1.0), Vector3::new(0.0, 1.0, 0.1)).unwrap();
        let front = poly.front_side_of_edge(ab, &ray).unwrap();
        let back = poly.back_side_of_edge(ab, &ray).unwrap();
        assert_relative_eq!(*poly.side_plane(front).unwrap().normal(), Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(*poly.side_plane(back).unwrap().normal(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn edge_queries_follow_the_winding() {
        let mut poly = Polyhedron::new();
        let a = poly.add_vertex(VertexData::new(p(0.0, 0.0, 0.0)));
        let b = poly.add_vertex(VertexData::new(p(1.0, 0.0, 0.0)));
        let c = poly.add_vertex(VertexData::new(p(0.0, 1.0, 0.0)));
        let d = poly.add_vertex(VertexData::new(p(0.0, 0.0, 1.0)));
        let ab = poly.add_edge(EdgeData::new(a, b));
        let bc = poly.add_edge(EdgeData::new(b, c));
        let ca = poly.add_edge(EdgeData::new(c, a));
        let top = poly
            .add_side_from_edges(&[(ab, false), (bc, false), (ca, false)], None)
            .unwrap();
        let bottom = poly
            .add_side_from_edges(&[(ca, true), (bc, true), (ab, true)], None)
            .unwrap();

        assert_eq!(poly.edge(ab).unwrap().other_side(top), Some(bottom));
        assert_eq!(poly.edge(ab).unwrap().other_side(bottom), Some(top));
        assert_eq!(poly.vertex_index(top, c).unwrap(), Some(2));
        assert_eq!(poly.vertex_index(bottom, c).unwrap(), Some(1));
        assert_eq!(poly.vertex_index(top, d).unwrap(), None);

        assert_relative_eq!(poly.edge_vector(ab).unwrap(), Vector3::new(1.0, 0.0, 0.0));
        poly.flip_edge(ab).unwrap();
        assert_relative_eq!(poly.edge_vector(ab).unwrap(), Vector3::new(-1.0, 0.0, 0.0));
        // The link slots stay put, so the side now runs the edge backwards.
        assert_eq!(poly.side_start_vertex(ab, top).unwrap(), b);
        assert_eq!(poly.side_end_vertex(ab, top).unwrap(), a);
    }

    #[test]
    fn add_side_leaves_edges_untouched() {
        let mut poly = tetrahedron();
        let vertices: Vec<VertexId> = poly.vertices().map(|(id, _)| id).take(3).collect();
        let edges: Vec<EdgeId> = poly.edges().map(|(id, _)| id).take(3).collect();
        let before: Vec<EdgeData> = edges.iter().map(|&e| poly.edge(e).unwrap().clone()).collect();

        let sid = poly.add_side(SideData::new(vertices.clone(), edges.clone(), None));
        assert_eq!(poly.side_count(), 5);
        assert_eq!(poly.side(sid).unwrap().vertices, vertices);
        for (e, old) in edges.iter().zip(&before) {
            assert_eq!(poly.edge(*e).unwrap(), old);
            assert_eq!(old.other_side(sid), None);
        }
    }
}
