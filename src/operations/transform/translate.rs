use crate::math::Vector3;
use crate::topology::Polyhedron;

/// Translates a polyhedron by a displacement vector.
pub struct Translate {
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector3) -> Self {
        Self { displacement }
    }

    /// Executes the translation, modifying the polyhedron in-place.
    pub fn execute(&self, poly: &mut Polyhedron) {
        let delta = self.displacement;
        poly.map_geometry(|p| p + delta, |plane| plane.translated(&delta));
    }
}
