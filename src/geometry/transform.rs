//! Rigid transforms applied to whole shape trees.
//!
//! A [`Transformation`] rotates about the coordinate origin and THEN
//! translates. Placing a part therefore only requires its attachment point to
//! sit at the local origin: rotate it in place, then move it onto the anchor.
//!
//! Transforms are applied by rewriting coordinates: every path is made
//! absolute and every point it carries (including both Bezier control points
//! of a `C`) is mapped. Arcs keep their radii and flags; their endpoint is
//! mapped and the rotation is added to their x-axis rotation, which keeps
//! elliptical arcs exact under rotation.
//!
//! Rotation follows the SVG convention: degrees, clockwise positive in the
//! y-down coordinate system.

use crate::geometry::types::Point;
use crate::path::{to_absolute, CommandKind, PathCommand};
use crate::shape::{Circle, Ellipse, Group, PathElement};

/// Rotation about the origin followed by a translation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transformation {
    /// Rotation angle in degrees (clockwise positive)
    pub rotation: f64,
    pub translation: Point,
}

impl Transformation {
    pub fn new(rotation: f64, translation: Point) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self::new(degrees, Point::default())
    }

    pub fn translation(offset: Point) -> Self {
        Self::new(0.0, offset)
    }

    /// Map a single point: rotate about the origin, then translate
    pub fn apply_point(&self, point: Point) -> Point {
        point.rotate(self.rotation) + self.translation
    }
}

/// Apply a transform to a whole tree, returning a new tree
pub fn apply(group: &Group, t: &Transformation) -> Group {
    Group {
        id: group.id.clone(),
        label: group.label.clone(),
        groups: group.groups.iter().map(|g| apply(g, t)).collect(),
        paths: group.paths.iter().map(|p| apply_path(p, t)).collect(),
        ellipses: group.ellipses.iter().map(|e| apply_ellipse(e, t)).collect(),
        circles: group.circles.iter().map(|c| apply_circle(c, t)).collect(),
    }
}

fn apply_path(path: &PathElement, t: &Transformation) -> PathElement {
    PathElement {
        id: path.id.clone(),
        label: path.label.clone(),
        style: path.style.clone(),
        commands: apply_commands(&path.commands, t),
    }
}

/// Transform path commands; the result is always absolute
pub fn apply_commands(commands: &[PathCommand], t: &Transformation) -> Vec<PathCommand> {
    to_absolute(commands)
        .into_iter()
        .map(|cmd| match cmd.kind {
            CommandKind::Arc => {
                let mut args = cmd.args;
                let end = t.apply_point(Point::new(args[5], args[6]));
                args[2] += t.rotation;
                args[5] = end.x;
                args[6] = end.y;
                PathCommand::absolute(CommandKind::Arc, args)
            }
            CommandKind::Close => cmd,
            _ => {
                let args = cmd
                    .args
                    .chunks_exact(2)
                    .flat_map(|pair| {
                        let p = t.apply_point(Point::new(pair[0], pair[1]));
                        [p.x, p.y]
                    })
                    .collect();
                PathCommand::absolute(cmd.kind, args)
            }
        })
        .collect()
}

fn apply_ellipse(ellipse: &Ellipse, t: &Transformation) -> Ellipse {
    let center = t.apply_point(ellipse.center());
    Ellipse {
        cx: center.x,
        cy: center.y,
        angle: ellipse.angle + t.rotation,
        ..ellipse.clone()
    }
}

fn apply_circle(circle: &Circle, t: &Transformation) -> Circle {
    let center = t.apply_point(circle.center());
    Circle {
        cx: center.x,
        cy: center.y,
        ..circle.clone()
    }
}
