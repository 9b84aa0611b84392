mod move_vertex;

pub use move_vertex::{TranslateVertex, VertexMove};
