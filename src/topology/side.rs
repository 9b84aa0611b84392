use crate::geometry::Face;
use crate::math::Point3;

use super::edge::EdgeId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a side in a polyhedron.
    pub struct SideId;
}

/// A planar convex polygon on the boundary of a polyhedron.
///
/// `edges[i]` joins `vertices[i]` and `vertices[(i + 1) % n]`. Vertices wind
/// counter-clockwise as seen from outside the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct SideData {
    /// Corner vertices in winding order.
    pub vertices: Vec<VertexId>,
    /// Boundary edges; `edges[i]` follows `vertices[i]`.
    pub edges: Vec<EdgeId>,
    /// Centroid of the corner positions.
    pub center: Point3,
    /// The face definition this side was produced by, if any.
    pub face: Option<Face>,
}

impl SideData {
    /// Creates a side from a closed loop of vertices and edges.
    #[must_use]
    pub fn new(vertices: Vec<VertexId>, edges: Vec<EdgeId>, face: Option<Face>) -> Self {
        Self {
            vertices,
            edges,
            center: Point3::origin(),
            face,
        }
    }

    /// Position of `vertex` in the winding, if it is a corner of this side.
    #[must_use]
    pub fn vertex_index(&self, vertex: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    /// Reverses the winding of the loop.
    ///
    /// Edge `i` must keep joining vertex `i` to vertex `i + 1`, so all but
    /// the closing edge are reversed along with the vertices.
    pub fn reverse(&mut self) {
        let n = self.edges.len();
        self.vertices.reverse();
        if n > 1 {
            self.edges[..n - 1].reverse();
        }
    }
}
