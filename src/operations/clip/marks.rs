//! Per-cut classification of vertices, edges and sides.
//!
//! Marks only exist for the duration of one [`Cut`](super::Cut) and are
//! stored in secondary maps keyed by entity ID. An entity without an entry
//! has not been classified yet.

use slotmap::SecondaryMap;

use crate::geometry::Plane;
use crate::math::PointStatus;
use crate::topology::{EdgeId, Polyhedron, SideId, VertexId};

/// Classification of a vertex against the cutting plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexMark {
    /// Strictly inside the kept half-space.
    Keep,
    /// Strictly outside; removed by the cut.
    Drop,
    /// On the cutting plane; survives and is never duplicated.
    Undecided,
    /// Created by the cut where an edge crosses the plane.
    New,
}

impl VertexMark {
    /// Mark for a vertex with the given status relative to the cut plane.
    #[must_use]
    pub fn from_status(status: PointStatus) -> Self {
        match status {
            PointStatus::Above => VertexMark::Drop,
            PointStatus::Below => VertexMark::Keep,
            PointStatus::Inside => VertexMark::Undecided,
        }
    }
}

/// Classification of an edge, derived from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMark {
    /// No dropped endpoint and at least one kept endpoint.
    Keep,
    /// No kept endpoint and at least one dropped endpoint.
    Drop,
    /// One kept and one dropped endpoint; the plane crosses the edge.
    Split,
    /// Both endpoints lie on the cutting plane.
    Undecided,
    /// Closing edge created by the cut.
    New,
}

impl EdgeMark {
    /// Mark for an edge whose endpoints carry the given marks.
    #[must_use]
    pub fn from_vertices(start: VertexMark, end: VertexMark) -> Self {
        use VertexMark::{Drop, Keep, Undecided};
        match (start, end) {
            (Keep, Drop) | (Drop, Keep) => EdgeMark::Split,
            (Undecided, Undecided) => EdgeMark::Undecided,
            (Drop, _) | (_, Drop) => EdgeMark::Drop,
            _ => EdgeMark::Keep,
        }
    }
}

/// Classification of a side, derived from its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideMark {
    /// Entirely inside the kept half-space (touching the plane at most).
    Keep,
    /// Nothing of the side survives. Includes sides lying on the plane.
    Drop,
    /// Partly kept; the side is cut down and closed along the plane.
    Split,
}

impl SideMark {
    /// Mark for a side whose edges carry the given marks.
    #[must_use]
    pub fn from_edges(marks: impl IntoIterator<Item = EdgeMark>) -> Self {
        let mut kept = false;
        let mut dropped = false;
        for mark in marks {
            match mark {
                EdgeMark::Keep | EdgeMark::New => kept = true,
                EdgeMark::Drop => dropped = true,
                EdgeMark::Split => {
                    kept = true;
                    dropped = true;
                }
                EdgeMark::Undecided => {}
            }
        }
        match (kept, dropped) {
            (true, true) => SideMark::Split,
            (true, false) => SideMark::Keep,
            (false, _) => SideMark::Drop,
        }
    }
}

/// Marks every vertex of `poly` against `plane`.
#[must_use]
pub fn mark_vertices(poly: &Polyhedron, plane: &Plane, epsilon: f64) -> SecondaryMap<VertexId, VertexMark> {
    poly.vertices()
        .map(|(id, v)| (id, VertexMark::from_status(plane.point_status(&v.position, epsilon))))
        .collect()
}

/// Marks every edge of `poly` from its endpoint marks.
#[must_use]
pub fn mark_edges(
    poly: &Polyhedron,
    vertex_marks: &SecondaryMap<VertexId, VertexMark>,
) -> SecondaryMap<EdgeId, EdgeMark> {
    poly.edges()
        .map(|(id, e)| (id, EdgeMark::from_vertices(vertex_marks[e.start], vertex_marks[e.end])))
        .collect()
}

/// Marks every side of `poly` from its edge marks.
#[must_use]
pub fn mark_sides(
    poly: &Polyhedron,
    edge_marks: &SecondaryMap<EdgeId, EdgeMark>,
) -> SecondaryMap<SideId, SideMark> {
    poly.sides()
        .map(|(id, s)| (id, SideMark::from_edges(s.edges.iter().map(|&e| edge_marks[e]))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_marks_follow_endpoints() {
        use VertexMark::{Drop, Keep, Undecided};
        assert_eq!(EdgeMark::from_vertices(Keep, Keep), EdgeMark::Keep);
        assert_eq!(EdgeMark::from_vertices(Keep, Undecided), EdgeMark::Keep);
        assert_eq!(EdgeMark::from_vertices(Drop, Drop), EdgeMark::Drop);
        assert_eq!(EdgeMark::from_vertices(Undecided, Drop), EdgeMark::Drop);
        assert_eq!(EdgeMark::from_vertices(Drop, Keep), EdgeMark::Split);
        assert_eq!(EdgeMark::from_vertices(Undecided, Undecided), EdgeMark::Undecided);
    }

    #[test]
    fn side_marks_follow_edges() {
        use EdgeMark::{Drop, Keep, Split, Undecided};
        assert_eq!(SideMark::from_edges([Keep, Keep, Undecided]), SideMark::Keep);
        assert_eq!(SideMark::from_edges([Drop, Undecided, Drop]), SideMark::Drop);
        assert_eq!(SideMark::from_edges([Keep, Split, Drop, Split]), SideMark::Split);
        // A diagonal cut through two corners splits without crossing an edge.
        assert_eq!(SideMark::from_edges([Keep, Keep, Drop, Drop]), SideMark::Split);
        // A side lying on the plane is replaced by the new side.
        assert_eq!(SideMark::from_edges([Undecided; 4]), SideMark::Drop);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn box_marks_against_middle_plane() {
        use crate::math::{Aabb, Point3, Vector3};
        use crate::operations::creation::MakeBox;

        let poly = MakeBox::new(Aabb::new(Point3::origin(), Point3::new(10.0, 10.0, 10.0)))
            .execute()
            .unwrap();
        let plane = Plane::from_normal(Point3::new(10.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0)).unwrap();

        let vertices = mark_vertices(&poly, &plane, 1e-6);
        let count = |mark| vertices.values().filter(|&&m| m == mark).count();
        assert_eq!(count(VertexMark::Keep), 2);
        assert_eq!(count(VertexMark::Undecided), 4);
        assert_eq!(count(VertexMark::Drop), 2);

        let edges = mark_edges(&poly, &vertices);
        assert_eq!(edges.values().filter(|&&m| m == EdgeMark::Undecided).count(), 2);
        assert_eq!(edges.values().filter(|&&m| m == EdgeMark::Split).count(), 0);

        let sides = mark_sides(&poly, &edges);
        assert_eq!(sides.values().filter(|&&m| m == SideMark::Split).count(), 2);
        assert_eq!(sides.values().filter(|&&m| m == SideMark::Drop).count(), 2);
        assert_eq!(sides.values().filter(|&&m| m == SideMark::Keep).count(), 2);
    }
}
