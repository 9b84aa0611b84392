use std::collections::HashMap;

use slotmap::SecondaryMap;
use tracing::{debug, error, instrument, warn};

use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::Face;
use crate::math::intersect_3d::segment_plane_intersect;
use crate::math::{snap_point, PLANE_EPSILON, SNAP_EPSILON};
use crate::operations::query::IsValid;
use crate::topology::{EdgeData, EdgeId, Polyhedron, SideId, VertexData, VertexId};

use super::marks::{mark_edges, mark_sides, mark_vertices, EdgeMark, SideMark, VertexMark};

/// Outcome class of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutResult {
    /// The face does not cut the solid and need not be added to it.
    Redundant,
    /// The face removed the entire solid.
    Null,
    /// The face now bounds the solid.
    Split,
}

/// Result of a [`Cut`], including faces it displaced.
#[derive(Debug, Clone, PartialEq)]
pub struct CutOutcome {
    /// What happened to the solid.
    pub result: CutResult,
    /// Faces whose sides were removed or taken over by the new face.
    pub dropped_faces: Vec<Face>,
}

impl CutOutcome {
    fn redundant() -> Self {
        Self {
            result: CutResult::Redundant,
            dropped_faces: Vec::new(),
        }
    }
}

/// Intersects a polyhedron with the half-space behind a face's plane.
///
/// Vertices in front of the plane are removed, crossing edges and sides are
/// cut back to the plane, and a new side carrying the face closes the hole.
/// The cut never fails: degenerate inputs resolve to
/// [`CutResult::Redundant`] or [`CutResult::Null`].
pub struct Cut {
    face: Face,
    epsilon: f64,
}

impl Cut {
    /// Creates a new `Cut` operation.
    #[must_use]
    pub fn new(face: Face) -> Self {
        Self {
            face,
            epsilon: PLANE_EPSILON,
        }
    }

    /// Overrides the distance below which a vertex counts as on the plane.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Executes the cut, modifying the polyhedron in-place.
    #[instrument(level = "trace", skip_all, fields(sides = poly.side_count()), ret)]
    pub fn execute(&self, poly: &mut Polyhedron) -> CutOutcome {
        let vertex_marks = mark_vertices(poly, &self.face.plane, self.epsilon);
        let keep = count(&vertex_marks, VertexMark::Keep);
        let drop = count(&vertex_marks, VertexMark::Drop);
        debug!(
            keep,
            drop,
            undecided = vertex_marks.len() - keep - drop,
            "classified vertices against cut plane"
        );

        if drop == 0 {
            return self.take_over_coplanar_side(poly, &vertex_marks);
        }
        if keep == 0 {
            return annihilate(poly);
        }

        let snapshot = poly.clone();
        match self.split(poly, vertex_marks, keep, drop) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug_assert!(false, "cut left the polyhedron inconsistent: {err}");
                error!(%err, "cut failed, restoring previous geometry");
                *poly = snapshot;
                CutOutcome::redundant()
            }
        }
    }

    /// Handles a cut that removes nothing.
    ///
    /// If a side lies on the cutting plane, the new face replaces that side's
    /// face and the old one is reported as dropped. Otherwise the face is
    /// redundant.
    fn take_over_coplanar_side(
        &self,
        poly: &mut Polyhedron,
        vertex_marks: &SecondaryMap<VertexId, VertexMark>,
    ) -> CutOutcome {
        let coplanar = poly
            .sides()
            .find(|(_, side)| {
                side.vertices
                    .iter()
                    .all(|&v| vertex_marks.get(v) == Some(&VertexMark::Undecided))
            })
            .map(|(id, _)| id);

        let Some(side_id) = coplanar else {
            debug!("cut is redundant");
            return CutOutcome::redundant();
        };
        let Ok(side) = poly.side_mut(side_id) else {
            return CutOutcome::redundant();
        };

        debug!("cut face takes over a coplanar side");
        let previous = side.face.replace(self.face.clone());
        CutOutcome {
            result: CutResult::Split,
            dropped_faces: previous.into_iter().collect(),
        }
    }

    fn split(
        &self,
        poly: &mut Polyhedron,
        mut vertex_marks: SecondaryMap<VertexId, VertexMark>,
        keep: usize,
        drop: usize,
    ) -> Result<CutOutcome> {
        let mut edge_marks = mark_edges(poly, &vertex_marks);
        let side_marks = mark_sides(poly, &edge_marks);

        let dropped = |side: Option<SideId>| side.is_some_and(|s| side_marks[s] == SideMark::Drop);

        let split_sides = count(&side_marks, SideMark::Split);
        let relinked = poly
            .edges()
            .filter(|&(id, e)| {
                edge_marks[id] == EdgeMark::Undecided && dropped(e.left) != dropped(e.right)
            })
            .count();
        if split_sides + relinked < 3 {
            warn!(keep, drop, "cut would leave a degenerate side");
            if keep >= drop {
                return Ok(CutOutcome::redundant());
            }
            return Ok(annihilate(poly));
        }

        self.settle_undecided(poly, &vertex_marks)?;
        let split_vertices = self.split_edges(poly, &mut vertex_marks, &edge_marks)?;

        let mut boundary: Vec<(EdgeId, bool)> = Vec::with_capacity(split_sides + relinked);
        let split_side_ids: Vec<SideId> = side_marks
            .iter()
            .filter(|&(_, &m)| m == SideMark::Split)
            .map(|(id, _)| id)
            .collect();
        for side_id in split_side_ids {
            let closing = split_side(poly, side_id, &vertex_marks, &edge_marks, &split_vertices)?;
            edge_marks.insert(closing, EdgeMark::New);
            boundary.push((closing, true));
        }

        // On-plane edges between a surviving and a dropped side border the new side.
        let undecided: Vec<EdgeId> = edge_marks
            .iter()
            .filter(|&(_, &m)| m == EdgeMark::Undecided)
            .map(|(id, _)| id)
            .collect();
        for edge_id in undecided {
            let edge = poly.edge_mut(edge_id)?;
            match (dropped(edge.left), dropped(edge.right)) {
                (true, true) => {
                    edge_marks.insert(edge_id, EdgeMark::Drop);
                }
                (true, false) => {
                    edge.left = None;
                    boundary.push((edge_id, true));
                }
                (false, true) => {
                    edge.right = None;
                    boundary.push((edge_id, false));
                }
                (false, false) => {}
            }
        }

        let mut dropped_faces = Vec::new();
        for (side_id, &mark) in &side_marks {
            if mark == SideMark::Drop {
                dropped_faces.extend(poly.remove_side(side_id)?.face);
            }
        }
        for (edge_id, &mark) in &edge_marks {
            if mark == EdgeMark::Drop {
                poly.remove_edge(edge_id)?;
            }
        }

        let ordered = chain_boundary(poly, &boundary)?;
        poly.add_side_from_edges(&ordered, Some(self.face.clone()))?;
        let removed_vertices = poly.remove_unused_vertices();
        poly.update_bounds();

        debug!(
            new_vertices = split_vertices.len(),
            removed_vertices,
            dropped_faces = dropped_faces.len(),
            "cut split the polyhedron"
        );
        debug_assert!(
            IsValid::new()
                .with_epsilon(self.epsilon.max(PLANE_EPSILON))
                .execute(poly),
            "cut broke the manifold invariant"
        );

        Ok(CutOutcome {
            result: CutResult::Split,
            dropped_faces,
        })
    }

    /// Moves vertices classified as on the plane exactly onto it, since they
    /// become corners of the new side.
    fn settle_undecided(
        &self,
        poly: &mut Polyhedron,
        vertex_marks: &SecondaryMap<VertexId, VertexMark>,
    ) -> Result<()> {
        let plane = &self.face.plane;
        for (id, &mark) in vertex_marks {
            if mark != VertexMark::Undecided {
                continue;
            }
            let vertex = poly.vertex_mut(id)?;
            let distance = plane.signed_distance(&vertex.position);
            if distance.abs() > SNAP_EPSILON {
                vertex.position -= plane.normal() * distance;
            }
        }
        Ok(())
    }

    /// Inserts a vertex where the plane crosses each split edge and moves the
    /// edge's dropped endpoint onto it. Returns the new vertex per split edge.
    fn split_edges(
        &self,
        poly: &mut Polyhedron,
        vertex_marks: &mut SecondaryMap<VertexId, VertexMark>,
        edge_marks: &SecondaryMap<EdgeId, EdgeMark>,
    ) -> Result<SecondaryMap<EdgeId, VertexId>> {
        let plane = &self.face.plane;
        let snap_limit = PLANE_EPSILON.min(self.epsilon);
        let mut split_vertices = SecondaryMap::new();
        for (edge_id, &mark) in edge_marks {
            if mark != EdgeMark::Split {
                continue;
            }
            let edge = poly.edge(edge_id)?;
            let (start, end) = (edge.start, edge.end);
            let point = segment_plane_intersect(
                &poly.vertex(start)?.position,
                &poly.vertex(end)?.position,
                plane,
            )
            .ok_or_else(|| GeometryError::Degenerate("split edge does not cross the plane".into()))?;

            let snapped = snap_point(&point, SNAP_EPSILON);
            let point = if plane.signed_distance(&snapped).abs() <= snap_limit {
                snapped
            } else {
                point
            };

            let vertex = poly.add_vertex(VertexData::new(point));
            vertex_marks.insert(vertex, VertexMark::New);
            let edge = poly.edge_mut(edge_id)?;
            if vertex_marks[start] == VertexMark::Drop {
                edge.start = vertex;
            } else {
                edge.end = vertex;
            }
            split_vertices.insert(edge_id, vertex);
        }
        Ok(split_vertices)
    }
}

/// Cuts a side back to its kept vertices plus the crossing points, and closes
/// it with a new edge along the plane. Returns the closing edge.
fn split_side(
    poly: &mut Polyhedron,
    side_id: SideId,
    vertex_marks: &SecondaryMap<VertexId, VertexMark>,
    edge_marks: &SecondaryMap<EdgeId, EdgeMark>,
    split_vertices: &SecondaryMap<EdgeId, VertexId>,
) -> Result<EdgeId> {
    let side = poly.side(side_id)?;
    let old_edges = side.edges.clone();

    let mut vertices = Vec::with_capacity(side.vertices.len() + 1);
    for (&vertex, &edge) in side.vertices.iter().zip(&side.edges) {
        if vertex_marks[vertex] != VertexMark::Drop {
            vertices.push(vertex);
        }
        if let Some(&new_vertex) = split_vertices.get(edge) {
            vertices.push(new_vertex);
        }
    }

    let n = vertices.len();
    let mut edges = Vec::with_capacity(n);
    let mut closing = None;
    for i in 0..n {
        let (a, b) = (vertices[i], vertices[(i + 1) % n]);
        let existing = old_edges.iter().copied().find(|&e| {
            edge_marks[e] != EdgeMark::Drop && poly.edge(e).is_ok_and(|edge| edge.connects(a, b))
        });
        let edge = match existing {
            Some(edge) => edge,
            None => {
                if closing.is_some() {
                    return Err(TopologyError::InvalidTopology(
                        "split side needs more than one closing edge".into(),
                    )
                    .into());
                }
                let mut data = EdgeData::new(a, b);
                data.right = Some(side_id);
                let edge = poly.add_edge(data);
                closing = Some(edge);
                edge
            }
        };
        edges.push(edge);
    }

    let closing = closing
        .ok_or_else(|| TopologyError::InvalidTopology("split side was not opened by the cut".into()))?;
    let side = poly.side_mut(side_id)?;
    side.vertices = vertices;
    side.edges = edges;
    Ok(closing)
}

/// Orders the new side's boundary edges into one closed loop.
///
/// Each entry is traversed opposite to the surviving side next to it, so
/// linking every edge's end to the next edge's start reproduces the
/// cross-section polygon wound counter-clockwise around the plane normal.
fn chain_boundary(poly: &Polyhedron, boundary: &[(EdgeId, bool)]) -> Result<Vec<(EdgeId, bool)>> {
    let directed = boundary
        .iter()
        .map(|&(id, reversed)| -> Result<(VertexId, VertexId)> {
            let edge = poly.edge(id)?;
            Ok(if reversed {
                (edge.end, edge.start)
            } else {
                (edge.start, edge.end)
            })
        })
        .collect::<Result<Vec<(VertexId, VertexId)>>>()?;

    let by_start: HashMap<VertexId, usize> = directed
        .iter()
        .enumerate()
        .map(|(i, &(from, _))| (from, i))
        .collect();
    if by_start.len() != directed.len() {
        return Err(TopologyError::InvalidTopology("cut boundary branches".into()).into());
    }

    let mut ordered = Vec::with_capacity(boundary.len());
    let mut current = 0;
    for _ in 0..boundary.len() {
        ordered.push(boundary[current]);
        let (_, to) = directed[current];
        current = *by_start
            .get(&to)
            .ok_or_else(|| TopologyError::InvalidTopology("cut boundary is open".into()))?;
        if current == 0 {
            break;
        }
    }
    if ordered.len() != boundary.len() || current != 0 {
        return Err(TopologyError::InvalidTopology("cut boundary is not a single loop".into()).into());
    }
    Ok(ordered)
}

/// Empties the polyhedron, reporting every face it carried.
fn annihilate(poly: &mut Polyhedron) -> CutOutcome {
    let dropped_faces = poly.faces().cloned().collect();
    poly.clear();
    debug!("cut removed the whole polyhedron");
    CutOutcome {
        result: CutResult::Null,
        dropped_faces,
    }
}

fn count<K: slotmap::Key, M: PartialEq>(marks: &SecondaryMap<K, M>, mark: M) -> usize {
    marks.values().filter(|&m| *m == mark).count()
}
