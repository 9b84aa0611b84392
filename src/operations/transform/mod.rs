mod mirror;
mod rotate;
mod translate;

pub use mirror::Mirror;
pub use rotate::{Rotate, Rotate90, RotationDirection};
pub use translate::Translate;
