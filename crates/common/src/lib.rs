//! Shared value types used by every pathmotion crate.

pub mod types;

pub use types::{Color, Transform};
