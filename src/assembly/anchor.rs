//! Coarse closest-point search on outline curves
//!
//! Anchors and outlines are authored together, so an anchor lands within a
//! few units of some curve sample. The search walks segments in order,
//! samples each at a fixed parametric step and returns the first sample
//! whose Manhattan distance to the target is within tolerance.

use crate::geometry::curve::sample;
use crate::geometry::types::round2;
use crate::geometry::{Bezier, Point};

/// A sample on an outline that matched a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// Index of the matching segment
    pub segment: usize,
    /// Parameter on that segment, rounded to two decimals
    pub t: f64,
    pub point: Point,
}

/// Find the first curve sample within `tolerance` of `target`
///
/// Returns `None` when no sample qualifies.
pub fn closest_point(
    curves: &[Bezier],
    target: Point,
    tolerance: f64,
    step: f64,
) -> Option<ClosestPoint> {
    curves.iter().enumerate().find_map(|(segment, bezier)| {
        sample(bezier, step)
            .find(|(_, p)| p.manhattan(target) <= tolerance)
            .map(|(t, point)| ClosestPoint {
                segment,
                t: round2(t),
                point,
            })
    })
}
