//! Authoring documents: libraries of characters stored as TOML
//!
//! A document is a list of top-level character groups. Each character's
//! direct sub-groups are labeled either `body` or with a part type; see
//! [`crate::assembly::classify`] for how they are interpreted.
//!
//! ```toml
//! name = "critters"
//!
//! [[characters]]
//! id = "blob"
//!
//! [[characters.groups]]
//! id = "blob-body"
//! label = "body"
//!
//! [[characters.groups.paths]]
//! id = "outline"
//! d = "M 0 0 C 10 -20, 30 -20, 40 0 Z"
//!
//! [[characters.groups.ellipses]]
//! label = "eye"
//! cx = 20.0
//! cy = -15.0
//! rx = 1.0
//! ry = 1.0
//! ```
//!
//! Path data is parsed while loading, so a malformed `d` fails the whole
//! document and names the offending element.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ParseError;
use crate::shape::{Circle, Ellipse, Group, PathElement};

/// Errors that can occur when loading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse document TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid path data in `{id}`: {source}")]
    Path {
        id: String,
        source: ParseError,
        /// The offending path data, kept for error reporting
        d: String,
    },
}

impl DocumentError {
    /// Render a path-data error as a source report, other errors as text
    pub fn report(&self) -> String {
        match self {
            DocumentError::Path { id, source, d } => source.format(d, id),
            other => other.to_string(),
        }
    }
}

/// A library of authored characters
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub characters: Vec<Group>,
}

/// TOML structure for deserializing documents
#[derive(Deserialize)]
struct TomlDocument {
    name: Option<String>,
    #[serde(default)]
    characters: Vec<TomlGroup>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlGroup {
    id: String,
    label: String,
    groups: Vec<TomlGroup>,
    paths: Vec<TomlPath>,
    ellipses: Vec<Ellipse>,
    circles: Vec<Circle>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlPath {
    id: String,
    label: String,
    d: String,
    style: String,
}

impl TomlGroup {
    fn into_group(self) -> Result<Group, DocumentError> {
        Ok(Group {
            id: self.id,
            label: self.label,
            groups: self
                .groups
                .into_iter()
                .map(TomlGroup::into_group)
                .collect::<Result<_, _>>()?,
            paths: self
                .paths
                .into_iter()
                .map(TomlPath::into_path)
                .collect::<Result<_, _>>()?,
            ellipses: self.ellipses,
            circles: self.circles,
        })
    }
}

impl TomlPath {
    fn into_path(self) -> Result<PathElement, DocumentError> {
        match PathElement::parse(self.id.clone(), self.label, &self.d) {
            Ok(path) => Ok(path.with_style(self.style)),
            Err(source) => Err(DocumentError::Path {
                id: self.id,
                source,
                d: self.d,
            }),
        }
    }
}

impl Document {
    pub fn new(characters: Vec<Group>) -> Self {
        Self {
            name: None,
            characters,
        }
    }

    /// Load document from TOML file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load document from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        let parsed: TomlDocument = toml::from_str(content)?;

        Ok(Document {
            name: parsed.name,
            characters: parsed
                .characters
                .into_iter()
                .map(TomlGroup::into_group)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Write the document back as TOML, with normalized path data
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Look up a character by id
    pub fn character(&self, id: &str) -> Option<&Group> {
        self.characters.iter().find(|c| c.id == id)
    }
}
