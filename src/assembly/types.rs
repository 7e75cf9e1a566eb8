//! Assembly entities: part vocabulary, bodies, parts and composites

use std::fmt;
use std::str::FromStr;

use crate::geometry::Point;
use crate::shape::Group;

/// Closed vocabulary of attachable part types
///
/// Declaration order is the canonical order used for anchors and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartType {
    Eye,
    Mouth,
    Arm1,
    Arm2,
    Leg1,
    Leg2,
}

/// Family of slots that share one sprite (left/right arm, both eyes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Eye,
    Mouth,
    Arm,
    Leg,
}

impl PartType {
    pub const ALL: [PartType; 6] = [
        PartType::Eye,
        PartType::Mouth,
        PartType::Arm1,
        PartType::Arm2,
        PartType::Leg1,
        PartType::Leg2,
    ];

    pub fn category(self) -> Category {
        match self {
            PartType::Eye => Category::Eye,
            PartType::Mouth => Category::Mouth,
            PartType::Arm1 | PartType::Arm2 => Category::Arm,
            PartType::Leg1 | PartType::Leg2 => Category::Leg,
        }
    }

    /// Label used in documents and composite names
    pub fn as_str(self) -> &'static str {
        match self {
            PartType::Eye => "eye",
            PartType::Mouth => "mouth",
            PartType::Arm1 => "arm1",
            PartType::Arm2 => "arm2",
            PartType::Leg1 => "leg1",
            PartType::Leg2 => "leg2",
        }
    }

    /// Limbs are normalized to hang along the local -y axis
    pub fn is_limb(self) -> bool {
        matches!(self.category(), Category::Arm | Category::Leg)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown part type '{}'", s))
    }
}

/// A point on a body where a part of the given type attaches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub part_type: PartType,
    pub position: Point,
}

impl Anchor {
    pub fn new(part_type: PartType, position: Point) -> Self {
        Self {
            part_type,
            position,
        }
    }
}

/// A base shape with anchors
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: String,
    pub tree: Group,
    /// Sorted in canonical part-type order
    pub anchors: Vec<Anchor>,
}

impl Body {
    /// Create a body; anchors are sorted canonically, ties keep their order
    pub fn new(id: impl Into<String>, tree: Group, mut anchors: Vec<Anchor>) -> Self {
        anchors.sort_by_key(|a| a.part_type);
        Self {
            id: id.into(),
            tree,
            anchors,
        }
    }

    /// Distinct part types this body has anchors for, in canonical order
    pub fn required_types(&self) -> Vec<PartType> {
        let mut types: Vec<PartType> = self.anchors.iter().map(|a| a.part_type).collect();
        types.dedup();
        types
    }

    pub fn anchors_of(&self, part_type: PartType) -> impl Iterator<Item = &Anchor> + '_ {
        self.anchors.iter().filter(move |a| a.part_type == part_type)
    }
}

/// An attachable part; its attachment point sits at the local origin
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPart {
    pub id: String,
    pub part_type: PartType,
    pub tree: Group,
}

impl BodyPart {
    pub fn new(id: impl Into<String>, part_type: PartType, tree: Group) -> Self {
        Self {
            id: id.into(),
            part_type,
            tree,
        }
    }
}

/// Which part fills a slot of a composite
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub part_type: PartType,
    pub part_id: String,
}

/// A body with every required slot filled
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCharacter {
    pub body_id: String,
    /// In canonical part-type order
    pub bindings: Vec<Binding>,
    pub tree: Group,
}

impl CompositeCharacter {
    /// Name in the form `<body>:eye=<id>+mouth=<id>+...`
    pub fn label(&self) -> String {
        let parts = self
            .bindings
            .iter()
            .map(|b| format!("{}={}", b.part_type, b.part_id))
            .collect::<Vec<_>>()
            .join("+");
        format!("{}:{}", self.body_id, parts)
    }

    pub fn part_for(&self, part_type: PartType) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.part_type == part_type)
            .map(|b| b.part_id.as_str())
    }
}
