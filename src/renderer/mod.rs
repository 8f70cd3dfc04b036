//! WebGPU rendering module
//!
//! Turns each frame's [`Snapshot`](crate::snapshot::Snapshot) into a flat-colored
//! triangle list and draws it in one pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
