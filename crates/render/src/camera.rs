use glam::{Mat4, Vec3};
use pathmotion_scene::Frame;

/// Camera translation per zoom step.
pub const ZOOM_SCALE: f32 = 0.1;

/// Fixed perspective camera looking down -Z at the origin.
///
/// The view is a pure translation: the camera backs off by `distance` and
/// each zoom step moves it [`ZOOM_SCALE`] units closer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub zoom: i32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 10.0,
            zoom: 0,
            fov: 45.0_f32.to_radians(),
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 50.0,
        }
    }
}

impl Camera {
    pub fn new(distance: f32, aspect: f32) -> Self {
        Self {
            distance,
            aspect,
            ..Self::default()
        }
    }

    /// Pick up the distance and zoom a frame was built with.
    pub fn follow(&mut self, frame: &Frame) {
        self.distance = frame.camera_distance;
        self.zoom = frame.zoom;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance - self.zoom as f32 * ZOOM_SCALE)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.eye())
    }

    /// Map a point given relative to the camera into world space.
    pub fn eye_to_world(&self, point: Vec3) -> Vec3 {
        self.view_matrix().inverse().transform_point3(point)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_space_points_follow_the_camera() {
        let mut cam = Camera::new(20.0, 1.0);
        let p = cam.eye_to_world(Vec3::new(5.0, 5.0, 5.0));
        assert!((p - Vec3::new(5.0, 5.0, 25.0)).length() < 1e-5);
        assert!((cam.view_matrix().transform_point3(p) - Vec3::splat(5.0)).length() < 1e-5);

        cam.zoom = 10;
        let p = cam.eye_to_world(Vec3::new(5.0, 5.0, 5.0));
        assert!((p - Vec3::new(5.0, 5.0, 24.0)).length() < 1e-5);
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.eye(), Vec3::new(0.0, 0.0, 10.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn zoom_moves_camera_closer() {
        let mut cam = Camera::new(20.0, 1.0);
        cam.zoom = 5;
        assert!((cam.eye().z - 19.5).abs() < 1e-6);
        cam.zoom = -10;
        assert!((cam.eye().z - 21.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::default();
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_viewport(0, 0);
        assert_eq!(cam.aspect, 1.0);
    }
}
