mod contains_point;
mod face_for_side;
mod is_valid;
mod pick;
mod vertex_status;

pub use contains_point::ContainsPoint;
pub use face_for_side::FaceForSide;
pub use is_valid::IsValid;
pub use pick::{Pick, PickSide, SideHit};
pub use vertex_status::VertexStatusFromRay;

pub use crate::math::polygon_3d::{polygon_shape, PolygonShape};
