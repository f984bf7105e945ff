/// Degrees added to a rotation accumulator per arrow keypress.
pub const ROTATE_STEP_DEGREES: f32 = 5.0;

/// Zoom accumulator change per keypress.
pub const ZOOM_STEP: i32 = 1;

/// A high-level action produced from a keypress.
///
/// The scene state consumes actions, so the desktop app and the headless
/// CLI drive identical logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Add to the rotation accumulators, in degrees.
    Rotate { pitch: f32, yaw: f32 },
    /// Flip the auto-rotate flag.
    ToggleAutoRotate,
    /// Show or hide the Bezier paths.
    TogglePath,
    /// Move the zoom accumulator by this many steps.
    Zoom(i32),
    /// Show or hide the on-screen help overlay.
    ToggleOverlay,
    /// Leave the render loop.
    Quit,
}
