use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Segments used when sampling a path for drawing (101 points).
pub const PATH_SEGMENTS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("a Bezier curve needs at least one control point")]
    Empty,
}

/// Binomial coefficient `C(n, k)` as a Bernstein weight.
///
/// Runs the multiplicative form in exact `u128` arithmetic while the
/// products fit, then finishes in `f64`. Never truncates or overflows;
/// returns 0 when `k > n`.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut exact: u128 = 1;
    for i in 0..k {
        match exact.checked_mul((n - i) as u128) {
            // C(n, i) * (n - i) is always divisible by i + 1.
            Some(product) => exact = product / (i + 1) as u128,
            None => {
                return (i..k).fold(exact as f64, |acc, j| {
                    acc * (n - j) as f64 / (j + 1) as f64
                });
            }
        }
    }
    exact as f64
}

/// Point on the Bezier curve defined by `points` at parameter `t`.
///
/// Direct Bernstein sum: `sum C(n,i) (1-t)^(n-i) t^i P_i` with `n = len - 1`.
/// `points` must be non-empty. `t` is not clamped.
pub fn evaluate(points: &[DVec3], t: f64) -> DVec3 {
    debug_assert!(!points.is_empty(), "evaluate called with no control points");
    let n = points.len().saturating_sub(1);
    let s = 1.0 - t;
    points.iter().enumerate().fold(DVec3::ZERO, |acc, (i, p)| {
        let weight = binomial(n, i) * s.powi((n - i) as i32) * t.powi(i as i32);
        acc + *p * weight
    })
}

/// Curve parameter driven by elapsed time: `(sin(time) + 1) / 2`.
///
/// Always inside `[0, 1]`, so callers never need to clamp.
pub fn oscillating_parameter(time: f64) -> f64 {
    (time.sin() + 1.0) / 2.0
}

/// An immutable, non-empty control point sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DVec3>", into = "Vec<DVec3>")]
pub struct BezierCurve {
    points: Vec<DVec3>,
}

impl BezierCurve {
    pub fn new(points: Vec<DVec3>) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }
        Ok(Self { points })
    }

    /// Convenience constructor for compiled-in scene constants.
    pub fn from_array<const N: usize>(points: [[f64; 3]; N]) -> Result<Self, CurveError> {
        Self::new(points.iter().map(|p| DVec3::from_array(*p)).collect())
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    pub fn start(&self) -> DVec3 {
        self.points[0]
    }

    pub fn end(&self) -> DVec3 {
        self.points[self.points.len() - 1]
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        evaluate(&self.points, t)
    }

    /// `segments + 1` points at `t = i / segments`, endpoints included.
    pub fn sample(&self, segments: usize) -> Vec<DVec3> {
        let segments = segments.max(1);
        tracing::trace!(degree = self.degree(), segments, "sampling curve");
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }

    /// Per-axis bounds of the control points. The curve stays inside them for `t` in `[0, 1]`.
    pub fn hull_bounds(&self) -> (DVec3, DVec3) {
        self.points.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        )
    }
}

impl TryFrom<Vec<DVec3>> for BezierCurve {
    type Error = CurveError;

    fn try_from(points: Vec<DVec3>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<BezierCurve> for Vec<DVec3> {
    fn from(curve: BezierCurve) -> Self {
        curve.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn cubic() -> BezierCurve {
        BezierCurve::from_array([
            [-4.0, -2.0, 0.0],
            [-2.0, 2.0, 0.0],
            [2.0, 2.0, 0.0],
            [4.0, -2.0, 0.0],
        ])
        .unwrap()
    }

    fn fixtures() -> Vec<BezierCurve> {
        vec![
            cubic(),
            BezierCurve::from_array([[1.0, 2.0, 3.0]]).unwrap(),
            BezierCurve::from_array([[0.0, 0.0, 0.0], [3.0, -1.0, 7.0]]).unwrap(),
            BezierCurve::from_array([
                [-4.0, 2.0, -2.0],
                [-2.0, -2.0, -2.0],
                [2.0, -2.0, -2.0],
                [4.0, 2.0, -2.0],
            ])
            .unwrap(),
            BezierCurve::from_array([
                [0.3, -9.0, 1.5],
                [12.0, 4.0, -3.0],
                [-7.5, 0.0, 8.0],
                [2.0, 2.0, 2.0],
                [5.0, -6.0, 0.0],
                [-1.0, 11.0, -4.0],
                [9.0, 3.0, 6.5],
            ])
            .unwrap(),
        ]
    }

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    fn constant_curve(degree: usize) -> Vec<DVec3> {
        vec![DVec3::new(1.0, -2.0, 3.5); degree + 1]
    }

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(0, 0), 1.0);
        assert_eq!(binomial(3, 0), 1.0);
        assert_eq!(binomial(3, 1), 3.0);
        assert_eq!(binomial(3, 2), 3.0);
        assert_eq!(binomial(3, 3), 1.0);
        assert_eq!(binomial(10, 5), 252.0);
        assert_eq!(binomial(2, 3), 0.0);
    }

    #[test]
    fn binomial_large_degree() {
        assert_eq!(binomial(60, 30), 118_264_581_564_861_424_u128 as f64);
        assert_eq!(binomial(68, 34), 28_453_041_475_240_576_740_u128 as f64);
        assert_eq!(binomial(40, 3), binomial(40, 37));

        // C(200, 100) no longer fits in u128 arithmetic.
        let expected = 9.054_851_465_610_328e58;
        assert!((binomial(200, 100) - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn binomial_rows_sum_to_power_of_two() {
        for n in [70_usize, 150, 300] {
            let sum: f64 = (0..=n).map(|k| binomial(n, k)).sum();
            let expected = 2f64.powi(n as i32);
            assert!((sum - expected).abs() / expected < 1e-12, "n = {n}");
        }
    }

    #[test]
    fn high_degree_constant_curve_stays_constant() {
        for degree in [70, 150, 300] {
            let points = constant_curve(degree);
            for t in [0.0, 0.1, 0.5, 0.77, 1.0] {
                let p = evaluate(&points, t);
                assert!(
                    (p - points[0]).abs().max_element() < 1e-9,
                    "degree {degree}, t {t}: {p}"
                );
            }
        }
    }

    #[test]
    fn empty_curve_is_rejected() {
        assert_eq!(BezierCurve::new(Vec::new()), Err(CurveError::Empty));
    }

    #[test]
    fn deserializing_empty_curve_is_rejected() {
        assert!(serde_json::from_str::<BezierCurve>("[]").is_err());

        let curve: BezierCurve =
            serde_json::from_str("[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]").unwrap();
        assert_eq!(curve.degree(), 1);
        assert_eq!(curve.end(), DVec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn endpoints_are_interpolated() {
        for curve in fixtures() {
            assert!(close(curve.point_at(0.0), curve.start()));
            assert!(close(curve.point_at(1.0), curve.end()));
        }
    }

    #[test]
    fn stays_inside_convex_hull() {
        for curve in fixtures() {
            let (lo, hi) = curve.hull_bounds();
            for i in 0..=200 {
                let p = curve.point_at(i as f64 / 200.0);
                assert!(p.cmpge(lo - EPS).all(), "{p} below {lo}");
                assert!(p.cmple(hi + EPS).all(), "{p} above {hi}");
            }
        }
    }

    #[test]
    fn linear_curve_is_lerp() {
        let a = DVec3::new(1.0, -2.0, 0.5);
        let b = DVec3::new(-3.0, 4.0, 2.0);
        for t in [-0.5, 0.0, 0.25, 0.5, 0.9, 1.0, 1.75] {
            assert!(close(evaluate(&[a, b], t), a + t * (b - a)));
        }
    }

    #[test]
    fn palindromic_curve_is_direction_independent() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 3.0, -1.0),
            DVec3::new(2.0, -1.0, 4.0),
            DVec3::new(1.0, 3.0, -1.0),
            DVec3::new(0.0, 0.0, 0.0),
        ];
        let mut reversed = points;
        reversed.reverse();
        assert_eq!(points, reversed);
        assert!(close(evaluate(&points, 0.5), evaluate(&reversed, 0.5)));
    }

    #[test]
    fn reversing_points_mirrors_parameter() {
        for curve in fixtures() {
            let mut reversed = curve.points().to_vec();
            reversed.reverse();
            for t in [0.0, 0.1, 0.37, 0.5, 0.8, 1.0] {
                assert!(close(curve.point_at(t), evaluate(&reversed, 1.0 - t)));
            }
        }
    }

    #[test]
    fn cubic_scenario_values() {
        let curve = cubic();
        assert_eq!(curve.degree(), 3);
        assert!(close(curve.point_at(0.0), DVec3::new(-4.0, -2.0, 0.0)));
        assert!(close(curve.point_at(1.0), DVec3::new(4.0, -2.0, 0.0)));
        assert!(close(curve.point_at(0.5), DVec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn extrapolates_outside_unit_interval() {
        let curve = cubic();
        // (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3 at t = 2
        let p = curve.point_at(2.0);
        assert!(close(p, DVec3::new(0.0, -26.0, 0.0)));
    }

    #[test]
    fn sampled_path_matches_single_evaluation() {
        let curve = cubic();
        let path = curve.sample(PATH_SEGMENTS);
        assert_eq!(path.len(), 101);
        for (i, p) in path.iter().enumerate() {
            let t = i as f64 / 100.0;
            assert_eq!(*p, curve.point_at(t));
            assert_eq!(*p, evaluate(curve.points(), t));
        }
    }

    #[test]
    fn oscillating_parameter_stays_in_range() {
        assert!((oscillating_parameter(0.0) - 0.5).abs() < EPS);
        assert!((oscillating_parameter(std::f64::consts::FRAC_PI_2) - 1.0).abs() < EPS);
        for i in 0..10_000 {
            let t = oscillating_parameter(i as f64 * 0.01);
            assert!((0.0..=1.0).contains(&t));
        }
    }
}
