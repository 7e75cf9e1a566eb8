//! Shape trees: nested groups of paths, ellipses and circles
//!
//! All coordinates are absolute within the tree's frame. There is no
//! transform attribute anywhere in the model; transforms are applied by
//! rewriting coordinates (see [`crate::geometry::transform`]).

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::geometry::curve::to_beziers;
use crate::geometry::{Bezier, Point};
use crate::path::{parse, serialize, PathCommand};

/// A group of shapes with nested sub-groups
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub groups: Vec<Group>,
    pub paths: Vec<PathElement>,
    pub ellipses: Vec<Ellipse>,
    pub circles: Vec<Circle>,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_path(mut self, path: PathElement) -> Self {
        self.paths.push(path);
        self
    }

    pub fn with_ellipse(mut self, ellipse: Ellipse) -> Self {
        self.ellipses.push(ellipse);
        self
    }

    pub fn with_circle(mut self, circle: Circle) -> Self {
        self.circles.push(circle);
        self
    }

    /// Every path in this group and its descendants, depth-first
    pub fn all_paths(&self) -> Vec<&PathElement> {
        let mut paths: Vec<&PathElement> = self.paths.iter().collect();
        for group in &self.groups {
            paths.extend(group.all_paths());
        }
        paths
    }

    /// Cubic segments of every path in the tree
    pub fn outline(&self) -> Vec<Bezier> {
        self.all_paths()
            .into_iter()
            .flat_map(|p| p.beziers())
            .collect()
    }

    /// Center of the first ellipse or circle labeled `label`, depth-first
    ///
    /// Ellipses are searched before circles at each level, then sub-groups.
    pub fn find_marker(&self, label: &str) -> Option<Point> {
        self.ellipses
            .iter()
            .find(|e| e.label == label)
            .map(Ellipse::center)
            .or_else(|| {
                self.circles
                    .iter()
                    .find(|c| c.label == label)
                    .map(Circle::center)
            })
            .or_else(|| self.groups.iter().find_map(|g| g.find_marker(label)))
    }

    /// Copy of the tree with every element labeled `label` removed
    pub fn without_label(&self, label: &str) -> Group {
        Group {
            id: self.id.clone(),
            label: self.label.clone(),
            groups: self.groups.iter().map(|g| g.without_label(label)).collect(),
            paths: self
                .paths
                .iter()
                .filter(|p| p.label != label)
                .cloned()
                .collect(),
            ellipses: self
                .ellipses
                .iter()
                .filter(|e| e.label != label)
                .cloned()
                .collect(),
            circles: self
                .circles
                .iter()
                .filter(|c| c.label != label)
                .cloned()
                .collect(),
        }
    }
}

/// A path element with pre-parsed path data
///
/// Serializes with its path data as a `d` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "PathRecord")]
pub struct PathElement {
    pub id: String,
    pub label: String,
    pub style: String,
    pub commands: Vec<PathCommand>,
}

impl PathElement {
    /// Parse path data into a new element
    pub fn parse(
        id: impl Into<String>,
        label: impl Into<String>,
        d: &str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            id: id.into(),
            label: label.into(),
            style: String::new(),
            commands: parse(d)?,
        })
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Path data for this element
    pub fn d(&self) -> String {
        serialize(&self.commands)
    }

    pub fn beziers(&self) -> Vec<Bezier> {
        to_beziers(&self.commands)
    }
}

#[derive(Serialize)]
struct PathRecord {
    id: String,
    label: String,
    d: String,
    style: String,
}

impl From<PathElement> for PathRecord {
    fn from(path: PathElement) -> Self {
        PathRecord {
            d: path.d(),
            id: path.id,
            label: path.label,
            style: path.style,
        }
    }
}

/// An ellipse; `angle` is the rotation of its x-axis in degrees
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ellipse {
    pub id: String,
    pub label: String,
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub angle: f64,
}

impl Ellipse {
    pub fn new(label: impl Into<String>, cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            label: label.into(),
            cx,
            cy,
            rx,
            ry,
            ..Default::default()
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Circle {
    pub id: String,
    pub label: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(label: impl Into<String>, cx: f64, cy: f64, r: f64) -> Self {
        Self {
            label: label.into(),
            cx,
            cy,
            r,
            ..Default::default()
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Group {
        Group::new("root", "body")
            .with_path(PathElement::parse("outline", "body", "M 0 0 L 10 0 L 10 10 Z").unwrap())
            .with_circle(Circle::new("mouth", 5.0, 8.0, 1.0))
            .with_group(
                Group::new("inner", "")
                    .with_path(PathElement::parse("detail", "", "M 2 2 L 3 3").unwrap())
                    .with_ellipse(Ellipse::new("eye", 3.0, 2.0, 1.0, 0.5)),
            )
    }

    #[test]
    fn test_all_paths_recurses() {
        let tree = sample_tree();
        let ids: Vec<_> = tree.all_paths().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["outline", "detail"]);
        assert_eq!(tree.outline().len(), 4);
    }

    #[test]
    fn test_find_marker_depth_first() {
        let tree = sample_tree();
        assert_eq!(tree.find_marker("mouth"), Some(Point::new(5.0, 8.0)));
        assert_eq!(tree.find_marker("eye"), Some(Point::new(3.0, 2.0)));
        assert_eq!(tree.find_marker("leg1"), None);
    }

    #[test]
    fn test_without_label_leaves_input_untouched() {
        let tree = sample_tree();
        let cleaned = tree.without_label("eye");
        assert_eq!(cleaned.groups[0].ellipses.len(), 0);
        assert_eq!(tree.groups[0].ellipses.len(), 1);
        assert_eq!(cleaned.groups[0].paths.len(), 1);
        assert_eq!(cleaned.circles.len(), 1);
    }

    #[test]
    fn test_path_d_is_normalized() {
        let path = PathElement::parse("p", "", "M0,0 L10,0 10,10").unwrap();
        assert_eq!(path.d(), "M 0 0 L 10 0 L 10 10");
    }
}
