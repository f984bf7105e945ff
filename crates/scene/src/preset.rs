use glam::{Mat4, Quat, Vec3};
use pathmotion_common::{Color, Transform};
use pathmotion_curve::{BezierCurve, CurveError, PATH_SEGMENTS, oscillating_parameter};
use thiserror::Error;

use crate::frame::{Frame, ObjectInstance, PathStrip};
use crate::state::{SceneState, TIME_STEP};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid path for {object}: {source}")]
    Path {
        object: &'static str,
        #[source]
        source: CurveError,
    },
}

/// The two compiled-in demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    /// One lit cube. Arrow keys rotate the cube about its own center.
    Cube,
    /// Textured cube, pyramid and sphere. Arrow keys rotate the whole scene.
    Trio,
}

impl ScenePreset {
    pub fn name(&self) -> &'static str {
        match self {
            ScenePreset::Cube => "cube",
            ScenePreset::Trio => "trio",
        }
    }
}

/// What the user's rotation accumulators act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationTarget {
    /// Rotate each object in place; paths stay fixed.
    Object,
    /// Rotate the scene, paths included.
    Scene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeStyle {
    /// Per-face palette colors.
    ColoredFaces,
    /// Checkerboard texture on every face.
    Textured,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cube(CubeStyle),
    Pyramid,
    Sphere { radius: f32, segments: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Multiplied with vertex colors.
    pub tint: Color,
    pub lit: bool,
    pub textured: bool,
    /// Draw black edges around the faces.
    pub outlined: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            lit: true,
            textured: false,
            outlined: false,
        }
    }
}

/// An object that moves along a Bezier path.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub shape: Shape,
    pub material: Material,
    pub path: BezierCurve,
    /// Spin axis for the time-driven self rotation, if any.
    pub spin_axis: Option<Vec3>,
    pub scale: f32,
}

/// Immutable scene description built once at startup.
#[derive(Debug, Clone)]
pub struct Scene {
    pub preset: ScenePreset,
    pub camera_distance: f32,
    /// Degrees added to the yaw accumulator per frame while auto-rotating.
    pub auto_rotate_step: f32,
    pub rotation_target: RotationTarget,
    /// Spin rate in degrees per unit of movement time.
    pub spin_rate: f32,
    pub objects: Vec<SceneObject>,
}

fn path(object: &'static str, points: [[f64; 3]; 4]) -> Result<BezierCurve, SceneError> {
    BezierCurve::from_array(points).map_err(|source| SceneError::Path { object, source })
}

impl Scene {
    pub fn new(preset: ScenePreset) -> Result<Self, SceneError> {
        let scene = match preset {
            ScenePreset::Cube => Self::cube()?,
            ScenePreset::Trio => Self::trio()?,
        };
        tracing::info!(
            preset = preset.name(),
            objects = scene.objects.len(),
            camera_distance = scene.camera_distance,
            "scene built"
        );
        Ok(scene)
    }

    fn cube() -> Result<Self, SceneError> {
        Ok(Self {
            preset: ScenePreset::Cube,
            camera_distance: 10.0,
            auto_rotate_step: 1.0,
            rotation_target: RotationTarget::Object,
            spin_rate: 0.0,
            objects: vec![SceneObject {
                name: "cube",
                shape: Shape::Cube(CubeStyle::ColoredFaces),
                material: Material {
                    outlined: true,
                    ..Material::default()
                },
                path: path(
                    "cube",
                    [
                        [-4.0, -2.0, 0.0],
                        [-2.0, 2.0, 0.0],
                        [2.0, 2.0, 0.0],
                        [4.0, -2.0, 0.0],
                    ],
                )?,
                spin_axis: None,
                scale: 1.0,
            }],
        })
    }

    fn trio() -> Result<Self, SceneError> {
        Ok(Self {
            preset: ScenePreset::Trio,
            camera_distance: 20.0,
            auto_rotate_step: 0.5,
            rotation_target: RotationTarget::Scene,
            spin_rate: 30.0,
            objects: vec![
                SceneObject {
                    name: "cube",
                    shape: Shape::Cube(CubeStyle::Textured),
                    material: Material {
                        textured: true,
                        outlined: true,
                        ..Material::default()
                    },
                    path: path(
                        "cube",
                        [
                            [-4.0, -2.0, 0.0],
                            [-2.0, 2.0, 0.0],
                            [2.0, 2.0, 0.0],
                            [4.0, -2.0, 0.0],
                        ],
                    )?,
                    spin_axis: Some(Vec3::new(1.0, 1.0, 0.0)),
                    scale: 1.0,
                },
                SceneObject {
                    name: "pyramid",
                    shape: Shape::Pyramid,
                    material: Material::default(),
                    path: path(
                        "pyramid",
                        [
                            [-4.0, 2.0, -2.0],
                            [-2.0, -2.0, -2.0],
                            [2.0, -2.0, -2.0],
                            [4.0, 2.0, -2.0],
                        ],
                    )?,
                    spin_axis: Some(Vec3::new(0.0, 1.0, 1.0)),
                    scale: 0.8,
                },
                SceneObject {
                    name: "sphere",
                    shape: Shape::Sphere {
                        radius: 0.8,
                        segments: 16,
                    },
                    material: Material {
                        tint: Color::LIGHT_BLUE,
                        ..Material::default()
                    },
                    path: path(
                        "sphere",
                        [
                            [-4.0, 0.0, 2.0],
                            [-2.0, 0.0, -2.0],
                            [2.0, 0.0, -2.0],
                            [4.0, 0.0, 2.0],
                        ],
                    )?,
                    spin_axis: Some(Vec3::new(1.0, 0.0, 1.0)),
                    scale: 1.0,
                },
            ],
        })
    }

    /// Advance one frame and describe what to draw.
    ///
    /// Time advances first, the frame is built with the current rotation,
    /// then auto-rotate feeds the next frame.
    pub fn step(&self, state: &mut SceneState) -> Frame {
        state.movement_time += TIME_STEP;
        state.frame += 1;
        let t = oscillating_parameter(state.movement_time);

        let user_rotation = Quat::from_rotation_x(state.rot_x.to_radians())
            * Quat::from_rotation_y(state.rot_y.to_radians());
        let (scene_matrix, object_rotation) = match self.rotation_target {
            RotationTarget::Scene => (Mat4::from_quat(user_rotation), Quat::IDENTITY),
            RotationTarget::Object => (Mat4::IDENTITY, user_rotation),
        };

        let paths = if state.show_path {
            self.objects
                .iter()
                .map(|o| PathStrip {
                    points: o
                        .path
                        .sample(PATH_SEGMENTS)
                        .into_iter()
                        .map(|p| p.as_vec3())
                        .collect(),
                    color: Color::PATH_GRAY,
                })
                .collect()
        } else {
            Vec::new()
        };

        let spin_angle = (state.movement_time as f32 * self.spin_rate).to_radians();
        let objects = self
            .objects
            .iter()
            .map(|o| {
                let position = o.path.point_at(t);
                let spin = o
                    .spin_axis
                    .map(|axis| Quat::from_axis_angle(axis.normalize(), spin_angle))
                    .unwrap_or(Quat::IDENTITY);
                let local = Transform {
                    position: position.as_vec3(),
                    rotation: object_rotation * spin,
                    scale: Vec3::splat(o.scale),
                };
                ObjectInstance {
                    name: o.name,
                    shape: o.shape,
                    material: o.material,
                    position,
                    model: scene_matrix * local.to_matrix(),
                }
            })
            .collect();

        let frame = Frame {
            index: state.frame,
            movement_time: state.movement_time,
            t,
            scene_matrix,
            paths,
            objects,
            camera_distance: self.camera_distance,
            zoom: state.zoom,
            show_overlay: state.show_overlay,
        };

        if state.auto_rotate {
            state.rot_y += self.auto_rotate_step;
        }

        tracing::trace!(frame = frame.index, t, "scene stepped");
        frame
    }
}
