pub mod face;
pub mod plane;

pub use face::{Face, FaceAttributes};
pub use plane::Plane;
