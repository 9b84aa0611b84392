use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a polyhedron.
    pub struct VertexId;
}

/// Data associated with a polyhedron vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexData {
    /// The 3D position of the vertex.
    pub position: Point3,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self { position }
    }
}
