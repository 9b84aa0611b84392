use crate::math::{Axis, Point3, UnitQuaternion, Vector3};
use crate::topology::Polyhedron;

/// Turning direction of a quarter turn, seen looking down the positive axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Rotates a polyhedron by a quarter turn about an axis through a center.
///
/// Coordinates are permuted and negated rather than multiplied by a
/// rotation matrix, so grid-aligned geometry stays exactly on the grid.
pub struct Rotate90 {
    axis: Axis,
    direction: RotationDirection,
    center: Point3,
}

impl Rotate90 {
    /// Creates a new `Rotate90` operation.
    #[must_use]
    pub fn new(axis: Axis, direction: RotationDirection, center: Point3) -> Self {
        Self {
            axis,
            direction,
            center,
        }
    }

    /// Executes the rotation, modifying the polyhedron in-place.
    pub fn execute(&self, poly: &mut Polyhedron) {
        let center = self.center;
        let turn = |v: &Vector3| quarter_turn(self.axis, self.direction, v);
        poly.map_geometry(
            |p| center + turn(&(p - center)),
            |plane| plane.mapped(|p| center + turn(&(p - center)), turn),
        );
    }
}

/// Turns `v` a quarter about `axis`: clockwise maps `(u, v)` to `(v, -u)` in the axis' cyclic plane.
fn quarter_turn(axis: Axis, direction: RotationDirection, v: &Vector3) -> Vector3 {
    let (u_index, v_index) = axis.cyclic_pair();
    let (u, w) = (v[u_index], v[v_index]);
    let mut turned = *v;
    match direction {
        RotationDirection::Clockwise => {
            turned[u_index] = w;
            turned[v_index] = -u;
        }
        RotationDirection::CounterClockwise => {
            turned[u_index] = -w;
            turned[v_index] = u;
        }
    }
    turned
}

/// Rotates a polyhedron by an arbitrary rotation about a center.
pub struct Rotate {
    rotation: UnitQuaternion,
    center: Point3,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    #[must_use]
    pub fn new(rotation: UnitQuaternion, center: Point3) -> Self {
        Self { rotation, center }
    }

    /// Executes the rotation, modifying the polyhedron in-place.
    ///
    /// Side winding is preserved since a rotation keeps orientation.
    pub fn execute(&self, poly: &mut Polyhedron) {
        let (rotation, center) = (self.rotation, self.center);
        poly.map_geometry(
            |p| center + rotation * (p - center),
            |plane| plane.rotated(&rotation, &center),
        );
    }
}
