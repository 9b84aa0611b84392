use super::side::SideId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in a polyhedron.
    pub struct EdgeId;
}

/// Data associated with a polyhedron edge.
///
/// The right side traverses the edge from `start` to `end`, the left side
/// from `end` to `start`. In a finished polyhedron both sides are set.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// Side that traverses the edge from `end` to `start`.
    pub left: Option<SideId>,
    /// Side that traverses the edge from `start` to `end`.
    pub right: Option<SideId>,
}

impl EdgeData {
    /// Creates an edge with no adjacent sides yet.
    #[must_use]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self {
            start,
            end,
            left: None,
            right: None,
        }
    }

    /// Returns `true` if the edge joins `a` and `b`, in either direction.
    #[must_use]
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[must_use]
    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// The side across the edge from `side`, if `side` is adjacent.
    #[must_use]
    pub fn other_side(&self, side: SideId) -> Option<SideId> {
        if self.left == Some(side) {
            self.right
        } else if self.right == Some(side) {
            self.left
        } else {
            None
        }
    }

    /// Vertex at which `side` enters the edge.
    #[must_use]
    pub fn start_for(&self, side: SideId) -> Option<VertexId> {
        if self.right == Some(side) {
            Some(self.start)
        } else if self.left == Some(side) {
            Some(self.end)
        } else {
            None
        }
    }

    /// Vertex at which `side` leaves the edge.
    #[must_use]
    pub fn end_for(&self, side: SideId) -> Option<VertexId> {
        if self.right == Some(side) {
            Some(self.end)
        } else if self.left == Some(side) {
            Some(self.start)
        } else {
            None
        }
    }

    /// Replaces the link to `old` with `new`. Returns `false` if `old` was not linked.
    pub fn replace_side(&mut self, old: SideId, new: Option<SideId>) -> bool {
        if self.left == Some(old) {
            self.left = new;
            true
        } else if self.right == Some(old) {
            self.right = new;
            true
        } else {
            false
        }
    }

    /// Swaps the endpoints, which also swaps the traversal direction of both sides.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }
}
