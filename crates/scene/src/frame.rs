use glam::{DVec3, Mat4, Vec3};
use pathmotion_common::Color;

use crate::preset::{Material, Shape};

/// A sampled path, in curve space. Draw it through [`Frame::scene_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathStrip {
    pub points: Vec<Vec3>,
    pub color: Color,
}

/// One animated object as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
    pub name: &'static str,
    pub shape: Shape,
    pub material: Material,
    /// Evaluated point on the object's path at this frame's `t`.
    pub position: DVec3,
    /// Full model matrix, scene rotation included.
    pub model: Mat4,
}

/// Everything a renderer needs to draw one frame. Rebuilt every step.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub movement_time: f64,
    /// Curve parameter shared by every object this frame.
    pub t: f64,
    /// Rotation applied to the whole scene, identity when rotation targets the object.
    pub scene_matrix: Mat4,
    /// Empty when paths are hidden.
    pub paths: Vec<PathStrip>,
    pub objects: Vec<ObjectInstance>,
    pub camera_distance: f32,
    pub zoom: i32,
    pub show_overlay: bool,
}

impl Frame {
    /// Path points with the scene rotation applied.
    pub fn world_path(&self, strip: &PathStrip) -> Vec<Vec3> {
        strip
            .points
            .iter()
            .map(|p| self.scene_matrix.transform_point3(*p))
            .collect()
    }

    pub fn object(&self, name: &str) -> Option<&ObjectInstance> {
        self.objects.iter().find(|o| o.name == name)
    }
}
