//! Curve Evaluator: Bezier curves in Bernstein-polynomial form.
//!
//! # Invariants
//! - For `t` in `[0, 1]` the evaluated point lies in the convex hull of the
//!   control points.
//! - The drawn path and the animated position go through the same
//!   [`evaluate`], so an object never leaves its drawn path.
//! - Outside `[0, 1]` evaluation extrapolates. It is not an error.

mod bezier;

pub use bezier::{
    BezierCurve, CurveError, PATH_SEGMENTS, binomial, evaluate, oscillating_parameter,
};
