//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read a [`Frame`](pathmotion_scene::Frame), never scene state.
//! - Mesh and texture data are plain CPU buffers; backends upload them.

mod camera;
pub mod mesh;
mod renderer;
pub mod texture;

pub use camera::{Camera, ZOOM_SCALE};
pub use mesh::{LineVertex, MeshData, MeshVertex};
pub use renderer::{DebugTextRenderer, Renderer};
pub use texture::{TextureData, checkerboard_texture};

pub fn crate_info() -> &'static str {
    "pathmotion-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
