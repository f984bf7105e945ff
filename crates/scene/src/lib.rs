//! Scene: compiled-in presets and the single-threaded frame step.
//!
//! # Invariants
//! - [`SceneState`] is the only mutable state. The app owns it and lends it
//!   `&mut` to [`Scene::step`] once per frame.
//! - Animation is frame-locked: every step advances time by a fixed amount,
//!   independent of wall-clock time.
//! - Object positions come from the same curve evaluator as the drawn paths.

mod clock;
mod frame;
mod preset;
mod state;

pub use clock::FrameClock;
pub use frame::{Frame, ObjectInstance, PathStrip};
pub use preset::{
    CubeStyle, Material, RotationTarget, Scene, SceneError, SceneObject, ScenePreset, Shape,
};
pub use state::{Flow, SceneState, TIME_STEP};
