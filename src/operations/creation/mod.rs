mod make_box;
mod make_brush;

pub use make_box::MakeBox;
pub use make_brush::{BrushBuild, MakeBrush};
