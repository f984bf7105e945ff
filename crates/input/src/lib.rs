//! Input mapping: window-system keys become scene actions.
//!
//! # Invariants
//! - The scene consumes [`Action`]s, never raw window events.
//! - Both demos share one key table.

pub mod action;
mod bindings;

pub use action::{Action, ROTATE_STEP_DEGREES, ZOOM_STEP};
pub use bindings::{Key, action_for, controls_help};
