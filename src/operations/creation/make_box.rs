use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::geometry::{Face, FaceAttributes, Plane};
use crate::math::{Aabb, Point3, TOLERANCE};
use crate::topology::{EdgeData, EdgeId, Polyhedron, VertexData};

/// Corner loops of the six box sides, counter-clockwise seen from outside.
///
/// Corner `i` takes `max` on X if bit 0 is set, on Y for bit 1, on Z for bit 2.
const SIDE_CORNERS: [[usize; 4]; 6] = [
    [0, 4, 6, 2], // -X
    [1, 3, 7, 5], // +X
    [0, 1, 5, 4], // -Y
    [2, 6, 7, 3], // +Y
    [0, 2, 3, 1], // -Z
    [4, 5, 7, 6], // +Z
];

/// Creates the canonical six-sided box polyhedron from a bounding box.
pub struct MakeBox {
    bounds: Aabb,
    attributes: Option<FaceAttributes>,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation. The sides carry no faces.
    #[must_use]
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            attributes: None,
        }
    }

    /// Gives every side a face with the side's plane and these attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: FaceAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Executes the operation, building 8 vertices, 12 edges and 6 sides.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds have no volume.
    pub fn execute(&self) -> Result<Polyhedron> {
        if self.bounds.is_flat(TOLERANCE) {
            return Err(OperationError::InvalidInput("box bounds must have volume".into()).into());
        }

        let (min, max) = (self.bounds.min, self.bounds.max);
        let positions: Vec<Point3> = (0..8)
            .map(|i| {
                Point3::new(
                    if i & 1 == 0 { min.x } else { max.x },
                    if i & 2 == 0 { min.y } else { max.y },
                    if i & 4 == 0 { min.z } else { max.z },
                )
            })
            .collect();

        let mut poly = Polyhedron::new();
        let corners: Vec<_> = positions
            .iter()
            .map(|&p| poly.add_vertex(VertexData::new(p)))
            .collect();

        let mut edges: HashMap<(usize, usize), EdgeId> = HashMap::new();
        for side in &SIDE_CORNERS {
            let mut loop_edges = Vec::with_capacity(4);
            for i in 0..4 {
                let (a, b) = (side[i], side[(i + 1) % 4]);
                if let Some(&edge) = edges.get(&(b, a)) {
                    loop_edges.push((edge, true));
                } else {
                    let edge = poly.add_edge(EdgeData::new(corners[a], corners[b]));
                    edges.insert((a, b), edge);
                    loop_edges.push((edge, false));
                }
            }

            let face = match &self.attributes {
                Some(attributes) => Some(Face::new(
                    Plane::from_points(&positions[side[0]], &positions[side[1]], &positions[side[2]])?,
                    attributes.clone(),
                )),
                None => None,
            };
            poly.add_side_from_edges(&loop_edges, face)?;
        }

        poly.update_bounds();
        Ok(poly)
    }
}
