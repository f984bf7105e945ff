//! wgpu render backend for the pathmotion demos.
//!
//! Draws lit (optionally textured) meshes for the animated objects and a
//! single line list for Bezier paths and cube outlines, on a white background.
//!
//! # Invariants
//! - The renderer only reads [`Frame`](pathmotion_scene::Frame)s.
//! - Any GPU initialization failure is surfaced as [`RenderError`]; nothing
//!   retries.

mod context;
mod error;
mod gpu;
mod shaders;

pub use context::GpuContext;
pub use error::RenderError;
pub use gpu::WgpuRenderer;
