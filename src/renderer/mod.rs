//! WebGPU rendering module
//!
//! The world is flattened into colored triangles each frame and drawn with a
//! single pass-through pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
