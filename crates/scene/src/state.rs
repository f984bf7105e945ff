use pathmotion_input::Action;

/// Animation time added per frame.
pub const TIME_STEP: f64 = 0.01;

/// Whether the render loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Mutable per-frame scene state, accumulated across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Pitch accumulator, degrees.
    pub rot_x: f32,
    /// Yaw accumulator, degrees.
    pub rot_y: f32,
    /// Zoom accumulator. Each step moves the camera 0.1 units.
    pub zoom: i32,
    pub auto_rotate: bool,
    pub show_path: bool,
    pub show_overlay: bool,
    /// Oscillator input; the curve parameter is `(sin(movement_time) + 1) / 2`.
    pub movement_time: f64,
    /// Frames stepped so far.
    pub frame: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            rot_x: 0.0,
            rot_y: 0.0,
            zoom: 0,
            auto_rotate: false,
            show_path: true,
            show_overlay: true,
            movement_time: 0.0,
            frame: 0,
        }
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one input action.
    pub fn apply(&mut self, action: &Action) -> Flow {
        match *action {
            Action::Rotate { pitch, yaw } => {
                self.rot_x += pitch;
                self.rot_y += yaw;
            }
            Action::ToggleAutoRotate => self.auto_rotate = !self.auto_rotate,
            Action::TogglePath => self.show_path = !self.show_path,
            Action::Zoom(steps) => self.zoom += steps,
            Action::ToggleOverlay => self.show_overlay = !self.show_overlay,
            Action::Quit => {
                tracing::info!("quit requested");
                return Flow::Exit;
            }
        }
        tracing::debug!(
            rot_x = self.rot_x,
            rot_y = self.rot_y,
            zoom = self.zoom,
            auto_rotate = self.auto_rotate,
            show_path = self.show_path,
            "scene state updated"
        );
        Flow::Continue
    }
}
