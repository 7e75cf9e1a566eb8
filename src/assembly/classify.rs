//! Turning authored characters into bodies and parts
//!
//! Each character in a [`Document`] is a group whose direct sub-groups are
//! labeled `body` or with a part type:
//!
//! - In a body, every ellipse or circle labeled with a part type marks an
//!   anchor. Markers are removed from the body's tree.
//! - In a part, the first ellipse or circle labeled with the part's own type
//!   marks the attachment point. The tree is moved so that point sits at the
//!   origin, and limbs are turned so they hang along local -y.

use crate::assembly::error::ClassifyError;
use crate::assembly::types::{Anchor, Body, BodyPart, PartType};
use crate::document::Document;
use crate::geometry::curve::sample_points;
use crate::geometry::{apply, Point, Transformation};
use crate::shape::Group;

/// Label of body sub-groups
pub const BODY_LABEL: &str = "body";

/// Bodies and parts of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    pub bodies: Vec<Body>,
    pub parts: Vec<BodyPart>,
}

/// Classify every character of a document
pub fn classify(document: &Document, sample_step: f64) -> Result<Library, ClassifyError> {
    let mut library = Library::default();

    for character in &document.characters {
        for group in &character.groups {
            let id = qualified_id(character, group);
            if group.label == BODY_LABEL {
                let body = classify_body(id, group);
                tracing::debug!(body = %body.id, anchors = body.anchors.len(), "classified body");
                library.bodies.push(body);
                continue;
            }

            let part_type: PartType =
                group.label.parse().map_err(|_| ClassifyError::UnknownLabel {
                    character: character.id.clone(),
                    group: group.id.clone(),
                    label: group.label.clone(),
                })?;
            let part = classify_part(id, part_type, group, sample_step).ok_or_else(|| {
                ClassifyError::MissingAttachment {
                    character: character.id.clone(),
                    group: group.id.clone(),
                    part_type,
                }
            })?;
            tracing::debug!(part = %part.id, %part_type, "classified part");
            library.parts.push(part);
        }
    }

    Ok(library)
}

fn qualified_id(character: &Group, group: &Group) -> String {
    match (character.id.is_empty(), group.id.is_empty()) {
        (_, true) => format!("{}/{}", character.id, group.label),
        (true, false) => group.id.clone(),
        (false, false) => format!("{}/{}", character.id, group.id),
    }
}

/// Build a body, lifting part-type markers out of the tree as anchors
pub fn classify_body(id: String, group: &Group) -> Body {
    let mut anchors = Vec::new();
    let tree = strip_anchors(group, &mut anchors);
    Body::new(id, tree, anchors)
}

fn strip_anchors(group: &Group, anchors: &mut Vec<Anchor>) -> Group {
    let mut stripped = Group::new(group.id.clone(), group.label.clone());
    stripped.paths = group.paths.clone();

    for ellipse in &group.ellipses {
        match ellipse.label.parse::<PartType>() {
            Ok(part_type) => anchors.push(Anchor::new(part_type, ellipse.center())),
            Err(_) => stripped.ellipses.push(ellipse.clone()),
        }
    }
    for circle in &group.circles {
        match circle.label.parse::<PartType>() {
            Ok(part_type) => anchors.push(Anchor::new(part_type, circle.center())),
            Err(_) => stripped.circles.push(circle.clone()),
        }
    }
    stripped.groups = group
        .groups
        .iter()
        .map(|g| strip_anchors(g, anchors))
        .collect();
    stripped
}

/// Build a part normalized to its attachment point
///
/// Returns `None` when the group has no attachment marker.
pub fn classify_part(
    id: String,
    part_type: PartType,
    group: &Group,
    sample_step: f64,
) -> Option<BodyPart> {
    let attachment = group.find_marker(part_type.as_str())?;
    let cleaned = group.without_label(part_type.as_str());
    let mut tree = apply(&cleaned, &Transformation::translation(Point::default() - attachment));

    if part_type.is_limb() {
        if let Some(tail) = farthest_sample(&tree, sample_step) {
            let heading = tail.y.atan2(tail.x).to_degrees();
            tree = apply(&tree, &Transformation::rotation(-90.0 - heading));
        }
    }

    Some(BodyPart::new(id, part_type, tree))
}

/// Outline sample farthest from the origin
fn farthest_sample(tree: &Group, step: f64) -> Option<Point> {
    sample_points(&tree.outline(), step)
        .into_iter()
        .filter(|p| p.length() > 0.0)
        .max_by(|a, b| a.length().total_cmp(&b.length()))
}
