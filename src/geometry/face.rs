use crate::error::Result;
use crate::math::Point3;

use super::Plane;

/// Surface attributes carried by a face.
///
/// The kernel never interprets these; they travel with the side a face
/// produced and come back to the caller when the face is displaced.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAttributes {
    /// Texture or material name.
    pub texture: String,
    pub x_offset: f64,
    pub y_offset: f64,
    /// Texture rotation in degrees.
    pub rotation: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl Default for FaceAttributes {
    fn default() -> Self {
        Self {
            texture: String::new(),
            x_offset: 0.0,
            y_offset: 0.0,
            rotation: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
        }
    }
}

impl FaceAttributes {
    /// Default attributes with the given texture name.
    #[must_use]
    pub fn with_texture(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            ..Self::default()
        }
    }
}

/// A face definition: a bounding plane plus its surface attributes.
///
/// The plane normal points out of the brush; cutting a solid by a face
/// keeps the half-space behind the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// The bounding plane.
    pub plane: Plane,
    /// Surface attributes.
    pub attributes: FaceAttributes,
}

impl Face {
    /// Creates a face from a plane and attributes.
    #[must_use]
    pub fn new(plane: Plane, attributes: FaceAttributes) -> Self {
        Self { plane, attributes }
    }

    /// Creates a face through three points listed counter-clockwise as seen from outside.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3, attributes: FaceAttributes) -> Result<Self> {
        Ok(Self::new(Plane::from_points(a, b, c)?, attributes))
    }
}
