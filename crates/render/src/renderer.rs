use std::fmt::Write;

use pathmotion_scene::{Frame, Shape};

use crate::camera::Camera;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a finished [`Frame`] and the camera; it never touches the
/// scene state that produced the frame.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &Frame, camera: &Camera) -> Self::Output;
}

/// Produces a human-readable description of a frame.
///
/// Used by the headless CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn shape_label(shape: &Shape) -> String {
    match shape {
        Shape::Cube(style) => format!("cube({style:?})"),
        Shape::Pyramid => "pyramid".to_string(),
        Shape::Sphere { radius, segments } => format!("sphere(r={radius}, seg={segments})"),
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame, camera: &Camera) -> String {
        let mut out = String::new();
        let eye = camera.eye();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame {} (time={:.2}, t={:.4}) ===",
            frame.index, frame.movement_time, frame.t
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) zoom={} fov={:.0}",
            eye.x,
            eye.y,
            eye.z,
            camera.zoom,
            camera.fov.to_degrees()
        );
        let _ = writeln!(out, "Paths: {}", frame.paths.len());
        for strip in &frame.paths {
            let world = frame.world_path(strip);
            if let (Some(first), Some(last)) = (world.first(), world.last()) {
                let _ = writeln!(
                    out,
                    "  {} pts ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})",
                    world.len(),
                    first.x,
                    first.y,
                    first.z,
                    last.x,
                    last.y,
                    last.z
                );
            }
        }
        let _ = writeln!(out, "Objects: {}", frame.objects.len());
        for o in &frame.objects {
            let p = o.position;
            let _ = writeln!(
                out,
                "  [{}] {} pos=({:.3}, {:.3}, {:.3})",
                o.name,
                shape_label(&o.shape),
                p.x,
                p.y,
                p.z
            );
        }
        out
    }
}
