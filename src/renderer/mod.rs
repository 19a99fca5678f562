//! WebGPU rendering module
//!
//! Everything is tessellated into colored triangles on the CPU and drawn in
//! a single pass; the scene is tiny enough that rebuilding the vertex list
//! each frame is the simplest correct approach.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
