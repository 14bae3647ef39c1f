//! WebGPU rendering module
//!
//! The scene is built on the CPU as a draw list, tessellated into triangles
//! and drawn with a single textured pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprite;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCmd, Scene};
pub use sprite::SpriteImage;
