use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Face;
use crate::math::Aabb;
use crate::operations::clip::{Cut, CutResult};
use crate::topology::Polyhedron;

use super::MakeBox;

/// A brush built from faces, plus the faces that did not end up on it.
#[derive(Debug, Clone)]
pub struct BrushBuild {
    /// The resulting solid.
    pub polyhedron: Polyhedron,
    /// Redundant faces and faces displaced by later coplanar ones.
    pub dropped_faces: Vec<Face>,
}

/// Builds a brush by cutting a world-sized box with each face in turn.
pub struct MakeBrush {
    world_bounds: Aabb,
    faces: Vec<Face>,
}

impl MakeBrush {
    /// Creates a new `MakeBrush` operation.
    #[must_use]
    pub fn new(world_bounds: Aabb, faces: Vec<Face>) -> Self {
        Self {
            world_bounds,
            faces,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::EmptyResult`] if a face removes the whole
    /// solid, and [`OperationError::InvalidInput`] if the world bounds have no
    /// volume or the faces leave the brush open towards the world bounds.
    pub fn execute(&self) -> Result<BrushBuild> {
        let mut polyhedron = MakeBox::new(self.world_bounds).execute()?;
        let mut dropped_faces = Vec::new();

        for face in &self.faces {
            let outcome = Cut::new(face.clone()).execute(&mut polyhedron);
            match outcome.result {
                CutResult::Split => dropped_faces.extend(outcome.dropped_faces),
                CutResult::Redundant => dropped_faces.push(face.clone()),
                CutResult::Null => return Err(OperationError::EmptyResult.into()),
            }
        }

        if polyhedron.sides().any(|(_, side)| side.face.is_none()) {
            return Err(OperationError::InvalidInput("faces do not enclose a bounded brush".into()).into());
        }

        debug!(
            faces = self.faces.len(),
            sides = polyhedron.side_count(),
            dropped = dropped_faces.len(),
            "built brush from faces"
        );
        Ok(BrushBuild {
            polyhedron,
            dropped_faces,
        })
    }
}
