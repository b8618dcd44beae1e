//! Rendering module
//!
//! `scene` computes what to draw in logical pixels, `shapes` turns it into
//! triangles and `pipeline` pushes them through WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, Paint, build_scene};
pub use shapes::tessellate;
pub use vertex::Vertex;
