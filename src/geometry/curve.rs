//! Cubic Bezier curve model
//!
//! Path commands are normalized to cubic segments so that evaluation,
//! sampling and anchor matching deal with a single curve type:
//!
//! - lines become degenerate cubics (`p0 == p1`, `p2 == p3`)
//! - `Z` synthesizes a closing line back to the subpath start
//! - elliptical arcs are approximated by one cubic per ≤90° sweep
//!
//! Points returned by [`point_at`] are rounded to two decimals so that
//! coordinates stay stable when paths are serialized and parsed again.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::types::{Bezier, Point};
use crate::path::{to_absolute, CommandKind, PathCommand};

/// Elliptical arc parameters as written in path data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x-axis, in degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

impl ArcParams {
    /// Read the first five arguments of an `A` command
    pub fn from_args(args: &[f64]) -> Self {
        Self {
            rx: args[0],
            ry: args[1],
            x_axis_rotation: args[2],
            large_arc: args[3] != 0.0,
            sweep: args[4] != 0.0,
        }
    }
}

/// Convert path commands into cubic Bezier segments.
///
/// Relative commands are resolved first; `M` starts a new subpath and emits
/// no segment.
pub fn to_beziers(commands: &[PathCommand]) -> Vec<Bezier> {
    let mut result = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = current;

    for cmd in to_absolute(commands) {
        match cmd.kind {
            CommandKind::MoveTo => {
                current = Point::new(cmd.args[0], cmd.args[1]);
                subpath_start = current;
            }
            // to_absolute lowers H/V to L
            CommandKind::LineTo | CommandKind::Horizontal | CommandKind::Vertical => {
                let to = Point::new(cmd.args[0], cmd.args[1]);
                result.push(Bezier::line(current, to));
                current = to;
            }
            CommandKind::CurveTo => {
                let a = &cmd.args;
                let bezier = Bezier::new(
                    current,
                    Point::new(a[0], a[1]),
                    Point::new(a[2], a[3]),
                    Point::new(a[4], a[5]),
                );
                current = bezier.p3;
                result.push(bezier);
            }
            CommandKind::Arc => {
                let to = Point::new(cmd.args[5], cmd.args[6]);
                result.extend(arc_to_beziers(current, &ArcParams::from_args(&cmd.args), to));
                current = to;
            }
            CommandKind::Close => {
                result.push(Bezier::line(current, subpath_start));
                current = subpath_start;
            }
        }
    }

    result
}

/// Approximate an elliptical arc with cubic Bezier segments.
///
/// Uses the endpoint-to-center conversion of the SVG implementation notes.
/// Identical endpoints yield no segment, a zero radius yields a straight
/// segment, and radii too small to span the endpoints are scaled up.
pub fn arc_to_beziers(from: Point, arc: &ArcParams, to: Point) -> Vec<Bezier> {
    if from == to {
        return Vec::new();
    }

    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return vec![Bezier::line(from, to)];
    }

    let (sin_phi, cos_phi) = arc.x_axis_rotation.to_radians().sin_cos();

    // Endpoint offset in the ellipse's own frame
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;

    // Clamped at zero: scaled radii put the discriminant at 0 up to rounding
    let discriminant = ((rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2) / (rx2 * y1p2 + ry2 * x1p2)).max(0.0);
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let coef = sign * discriminant.sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = -coef * (ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let mut delta = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx) - theta1;
    if !arc.sweep && delta > 0.0 {
        delta -= TAU;
    } else if arc.sweep && delta < 0.0 {
        delta += TAU;
    }

    let ellipse_point = |theta: f64| {
        let (sin_t, cos_t) = theta.sin_cos();
        Point::new(
            cx + rx * cos_phi * cos_t - ry * sin_phi * sin_t,
            cy + rx * sin_phi * cos_t + ry * cos_phi * sin_t,
        )
    };
    let ellipse_derivative = |theta: f64| {
        let (sin_t, cos_t) = theta.sin_cos();
        Point::new(
            -rx * cos_phi * sin_t - ry * sin_phi * cos_t,
            -rx * sin_phi * sin_t + ry * cos_phi * cos_t,
        )
    };

    // The small epsilon keeps an exact quarter turn from splitting in two
    let segments = ((delta.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
    let step = delta / segments as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    (0..segments)
        .map(|i| {
            let t1 = theta1 + i as f64 * step;
            let t2 = t1 + step;
            let p0 = if i == 0 { from } else { ellipse_point(t1) };
            let p3 = if i + 1 == segments { to } else { ellipse_point(t2) };
            Bezier::new(
                p0,
                p0 + ellipse_derivative(t1) * k,
                p3 - ellipse_derivative(t2) * k,
                p3,
            )
        })
        .collect()
}

/// Evaluate a segment at parameter `t`, rounded to two decimals.
///
/// The endpoints are returned exactly.
pub fn point_at(bezier: &Bezier, t: f64) -> Point {
    if t <= 0.0 {
        return bezier.p0;
    }
    if t >= 1.0 {
        return bezier.p3;
    }
    let mt = 1.0 - t;
    let b0 = mt * mt * mt;
    let b1 = 3.0 * mt * mt * t;
    let b2 = 3.0 * mt * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * bezier.p0.x + b1 * bezier.p1.x + b2 * bezier.p2.x + b3 * bezier.p3.x,
        b0 * bezier.p0.y + b1 * bezier.p1.y + b2 * bezier.p2.y + b3 * bezier.p3.y,
    )
    .rounded()
}

/// First derivative of the segment at `t`
pub fn derivative_at(bezier: &Bezier, t: f64) -> Point {
    let mt = 1.0 - t;
    (bezier.p1 - bezier.p0) * (3.0 * mt * mt)
        + (bezier.p2 - bezier.p1) * (6.0 * mt * t)
        + (bezier.p3 - bezier.p2) * (3.0 * t * t)
}

/// Direction of travel at `t`, in degrees, as `atan2(dy, dx)`.
///
/// Degenerate segments whose derivative vanishes (line ends) fall back to
/// the chord direction.
pub fn tangent_angle_at(bezier: &Bezier, t: f64) -> f64 {
    let mut d = derivative_at(bezier, t);
    if d.length() < 1e-9 {
        d = bezier.p3 - bezier.p0;
    }
    d.y.atan2(d.x).to_degrees()
}

/// Upper bound on steps per segment when sampling
pub const MAX_SAMPLES: usize = 10_000;

/// Sample a segment at a fixed parametric step, endpoints included.
///
/// The step is snapped to the nearest divisor of 1 so `t` never accumulates
/// floating-point drift. At most [`MAX_SAMPLES`] steps are taken per segment.
pub fn sample(bezier: &Bezier, step: f64) -> impl Iterator<Item = (f64, Point)> + '_ {
    let count = (1.0 / step).round().clamp(1.0, MAX_SAMPLES as f64) as usize;
    (0..=count).map(move |i| {
        let t = i as f64 / count as f64;
        (t, point_at(bezier, t))
    })
}

/// All sample points of a set of segments
pub fn sample_points(beziers: &[Bezier], step: f64) -> Vec<Point> {
    beziers
        .iter()
        .flat_map(|b| sample(b, step).map(|(_, p)| p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse;

    const EPSILON: f64 = 1e-3;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn beziers(d: &str) -> Vec<Bezier> {
        to_beziers(&parse(d).unwrap())
    }

    #[test]
    fn test_single_curve() {
        let bzs = beziers("M 130 10 C 120 20, 180 20, 170 10");
        assert_eq!(bzs.len(), 1);
        assert_eq!(bzs[0].p0, Point::new(130.0, 10.0));
        assert_eq!(bzs[0].p3, Point::new(170.0, 10.0));
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let bzs = beziers("M 10 10 C 120 20, 180 20, 170 10 Z");
        assert_eq!(bzs.len(), 2);
        assert_eq!(bzs[1], Bezier::line(Point::new(170.0, 10.0), Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_relative_curves_counted() {
        let d = "m 0 0 c 2.384706 -3.8247189 9.090522 -2.8303014 13.419508 -2.9698914 4.328986 -0.13959 8.777591 -0.1227708 12.099557 1.8699314 z";
        let bzs = beziers(d);
        assert_eq!(bzs.len(), 3);
        assert!(approx_eq(bzs[1].p3.x, 13.419508 + 12.099557));
        assert_eq!(bzs[2].p3, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_line_midpoint() {
        let bzs = beziers("M 0,0 L 10,0");
        assert_eq!(bzs.len(), 1);
        assert_eq!(point_at(&bzs[0], 0.5), Point::new(5.0, 0.0));
    }

    #[test]
    fn test_point_at_endpoints_exact() {
        let b = Bezier::new(
            Point::new(0.123456, 1.987654),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.000001, -0.333333),
        );
        assert_eq!(point_at(&b, 0.0), b.p0);
        assert_eq!(point_at(&b, 1.0), b.p3);
    }

    #[test]
    fn test_point_at_bernstein() {
        let b = Bezier::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(point_at(&b, 0.5), Point::new(5.0, 7.5));
    }

    #[test]
    fn test_tangent_angle() {
        let b = Bezier::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        assert!(approx_eq(tangent_angle_at(&b, 0.0), 90.0));
        assert!(approx_eq(tangent_angle_at(&b, 0.5), 0.0));
        assert!(approx_eq(tangent_angle_at(&b, 1.0), -90.0));
    }

    #[test]
    fn test_tangent_angle_of_line_endpoints() {
        let b = Bezier::line(Point::new(0.0, 0.0), Point::new(0.0, -5.0));
        assert!(approx_eq(tangent_angle_at(&b, 0.0), -90.0));
        assert!(approx_eq(tangent_angle_at(&b, 1.0), -90.0));
    }

    #[test]
    fn test_degenerate_arc_has_no_segments() {
        let bzs = beziers("M 10 10 A 5 5 0 0 1 10 10");
        assert!(bzs.is_empty());
    }

    #[test]
    fn test_zero_radius_arc_is_line() {
        let bzs = beziers("M 0 0 A 0 5 0 0 1 10 0");
        assert_eq!(bzs, vec![Bezier::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0))]);
    }

    #[test]
    fn test_quarter_arc_control_points() {
        let bzs = beziers("M 10 0 A 10 10 0 0 1 0 10");
        assert_eq!(bzs.len(), 1);
        let b = bzs[0];
        let k = 10.0 * 4.0 / 3.0 * (std::f64::consts::PI / 8.0).tan();
        assert!(approx_eq(b.p1.x, 10.0), "p1: {:?}", b.p1);
        assert!(approx_eq(b.p1.y, k), "p1: {:?}", b.p1);
        assert!(approx_eq(b.p2.x, k), "p2: {:?}", b.p2);
        assert!(approx_eq(b.p2.y, 10.0), "p2: {:?}", b.p2);
        // Midpoint of the approximation lies on the circle
        let mid = point_at(&b, 0.5);
        assert!((mid.length() - 10.0).abs() < 0.05, "mid: {:?}", mid);
    }

    #[test]
    fn test_half_circle_splits_in_two() {
        let bzs = beziers("M 0 0 A 5 5 0 0 1 10 0");
        assert_eq!(bzs.len(), 2);
        assert_eq!(bzs[0].p0, Point::new(0.0, 0.0));
        assert_eq!(bzs[1].p3, Point::new(10.0, 0.0));
        // sweep=1 runs clockwise in y-down space: through the top (y = -5)
        let joint = bzs[0].p3;
        assert!(approx_eq(joint.x, 5.0), "joint: {:?}", joint);
        assert!(approx_eq(joint.y, -5.0), "joint: {:?}", joint);
    }

    #[test]
    fn test_large_arc_uses_more_segments() {
        let small = beziers("M 10 0 A 10 10 0 0 1 0 10");
        let large = beziers("M 10 0 A 10 10 0 1 0 0 10");
        assert_eq!(small.len(), 1);
        assert_eq!(large.len(), 3);
    }

    #[test]
    fn test_undersized_radii_are_scaled() {
        // Radius 1 cannot span 10 units; it is scaled to a half circle of radius 5
        let bzs = beziers("M 0 0 A 1 1 0 0 1 10 0");
        assert_eq!(bzs.len(), 2);
        assert!(approx_eq(bzs[0].p3.y.abs(), 5.0), "joint: {:?}", bzs[0].p3);
    }

    #[test]
    fn test_sample_includes_endpoints() {
        let b = Bezier::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let samples: Vec<_> = sample(&b, 0.1).collect();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], (0.0, Point::new(0.0, 0.0)));
        assert_eq!(samples[10], (1.0, Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_tiny_step_is_capped() {
        let b = Bezier::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(sample(&b, 1e-300).count(), MAX_SAMPLES + 1);
        assert_eq!(sample(&b, 5.0).count(), 2);
    }
}
