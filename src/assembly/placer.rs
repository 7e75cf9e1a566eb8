//! Placing parts onto a body
//!
//! A part's attachment point sits at its local origin and its outward axis
//! is local `(0, -1)`. Placement rotates the part to follow the body outline
//! at the anchor, then moves it onto the anchor.
//!
//! The tangent alone is ambiguous by 180° (it depends on which way the
//! outline was drawn). After rotating by `θ` the outward axis becomes
//! `n(θ) = (sin θ, -cos θ)`; when `n(θ)` points towards the body centroid,
//! i.e. `n(θ) · (P - C) < 0`, the angle is flipped by 180°.

use crate::assembly::anchor::closest_point;
use crate::assembly::types::{Anchor, Body, BodyPart};
use crate::config::MixerConfig;
use crate::geometry::curve::{sample_points, tangent_angle_at};
use crate::geometry::{apply, Bezier, Point, Transformation};
use crate::shape::Group;

/// Where and how a part lands on a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    /// Degrees in `[0, 360)`
    pub rotation: f64,
    /// False when the anchor matched no outline sample
    pub resolved: bool,
}

/// Outline geometry of one body, computed once and reused for every anchor
#[derive(Debug, Clone)]
pub struct Placer<'a> {
    body: &'a Body,
    config: &'a MixerConfig,
    outline: Vec<Bezier>,
    centroid: Point,
}

impl<'a> Placer<'a> {
    pub fn new(body: &'a Body, config: &'a MixerConfig) -> Self {
        let outline = body.tree.outline();
        let centroid = centroid(&outline, &body.anchors, config.sample_step);
        Self {
            body,
            config,
            outline,
            centroid,
        }
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Resolve an anchor against the body outline
    ///
    /// Unresolved anchors fall back to the raw position with no rotation.
    pub fn resolve(&self, anchor: &Anchor) -> Placement {
        let hit = closest_point(
            &self.outline,
            anchor.position,
            self.config.tolerance,
            self.config.sample_step,
        );

        match hit {
            Some(hit) => {
                let tangent = tangent_angle_at(&self.outline[hit.segment], hit.t);
                Placement {
                    position: hit.point,
                    rotation: outward_angle(tangent, hit.point, self.centroid),
                    resolved: true,
                }
            }
            None => {
                tracing::warn!(
                    body = %self.body.id,
                    part_type = %anchor.part_type,
                    x = anchor.position.x,
                    y = anchor.position.y,
                    "anchor is not on the body outline, placing part unrotated"
                );
                Placement {
                    position: anchor.position,
                    rotation: 0.0,
                    resolved: false,
                }
            }
        }
    }

    /// Place `part` at `anchor`, returning `tree` with the part appended
    ///
    /// The appended group is labeled with the slot it fills, which may differ
    /// from the part's own type (an arm1 sprite in the arm2 slot). `ordinal`
    /// distinguishes several placements of the same part (two eyes) in the
    /// appended group's id.
    pub fn place(&self, tree: &Group, part: &BodyPart, anchor: &Anchor, ordinal: usize) -> Group {
        let placement = self.resolve(anchor);
        tracing::trace!(
            body = %self.body.id,
            part = %part.id,
            rotation = placement.rotation,
            "placing part"
        );

        let transform = Transformation::new(placement.rotation, placement.position);
        let mut placed = apply(&part.tree, &transform);
        placed.id = format!("{}-{}", part.id, ordinal);
        placed.label = anchor.part_type.as_str().to_string();

        let mut merged = tree.clone();
        merged.groups.push(placed);
        merged
    }
}

/// Place one part on one anchor of a body
pub fn place(body: &Body, part: &BodyPart, anchor: &Anchor, config: &MixerConfig) -> Group {
    Placer::new(body, config).place(&body.tree, part, anchor, 0)
}

/// Correct a tangent angle so the part's outward axis points away from
/// `centroid`, normalized to `[0, 360)`
pub fn outward_angle(tangent: f64, point: Point, centroid: Point) -> f64 {
    let (sin_t, cos_t) = tangent.to_radians().sin_cos();
    let normal = Point::new(sin_t, -cos_t);
    let angle = if normal.dot(point - centroid) < 0.0 {
        tangent + 180.0
    } else {
        tangent
    };
    angle.rem_euclid(360.0)
}

/// Mean of the outline samples, else the mean of the anchors, else the origin
pub fn centroid(outline: &[Bezier], anchors: &[Anchor], step: f64) -> Point {
    let samples = sample_points(outline, step);
    if !samples.is_empty() {
        return mean(&samples);
    }
    let positions: Vec<Point> = anchors.iter().map(|a| a.position).collect();
    if !positions.is_empty() {
        return mean(&positions);
    }
    Point::default()
}

fn mean(points: &[Point]) -> Point {
    let sum = points.iter().fold(Point::default(), |acc, p| acc + *p);
    sum * (1.0 / points.len() as f64)
}
