//! Sprite Mixer - procedural assembly of vector character sprites
//!
//! This library docks interchangeable body parts (eyes, mouth, arms, legs)
//! onto the anchors of vector bodies and enumerates every valid composite.
//! It provides a path-data codec, a cubic Bezier curve model, rigid
//! transforms over shape trees, anchor resolution and the assembly search.
//!
//! # Example
//!
//! ```rust
//! use sprite_mixer::{generate, MixerConfig};
//!
//! let library = r#"
//! [[characters]]
//! id = "blob"
//!
//! [[characters.groups]]
//! id = "body"
//! label = "body"
//!
//! [[characters.groups.paths]]
//! d = "M -10 -10 L 10 -10 L 10 10 L -10 10 Z"
//!
//! [[characters.groups.circles]]
//! label = "eye"
//! cx = 0.0
//! cy = -10.0
//! r = 1.0
//!
//! [[characters.groups]]
//! id = "dot"
//! label = "eye"
//!
//! [[characters.groups.circles]]
//! label = "eye"
//! cx = 0.0
//! cy = 0.0
//! r = 2.0
//! "#;
//!
//! let composites = generate(library, &MixerConfig::default()).unwrap();
//! assert_eq!(composites.len(), 1);
//! assert_eq!(composites[0].label(), "blob/body:eye=blob/dot");
//! ```

pub mod assembly;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod path;
pub mod shape;

pub use assembly::{
    classify, Anchor, Binding, Body, BodyPart, ClassifyError, CompositeCharacter, Library, Mixer,
    PartType,
};
pub use config::{ConfigError, MixerConfig};
pub use document::{Document, DocumentError};
pub use error::ParseError;
pub use geometry::{Bezier, Point, Transformation};
pub use path::{parse, serialize, PathCommand};
pub use shape::{Circle, Ellipse, Group, PathElement};

use thiserror::Error;

/// Errors that can occur during the generate pipeline
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Error while loading the document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Error while classifying characters
    #[error("classify error: {0}")]
    Classify(#[from] ClassifyError),

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Assemble every composite of a set of bodies and parts
///
/// Bodies with no anchors, or with a required type no part can fill,
/// produce no composites.
///
/// # Example
///
/// ```rust
/// use sprite_mixer::{mix, Anchor, Body, BodyPart, Group, MixerConfig, PartType, PathElement, Point};
///
/// let outline = PathElement::parse("outline", "", "M 0 0 L 10 0").unwrap();
/// let body = Body::new(
///     "line",
///     Group::new("line", "body").with_path(outline),
///     vec![Anchor::new(PartType::Mouth, Point::new(5.0, 0.0))],
/// );
/// let parts = vec![
///     BodyPart::new("smile", PartType::Mouth, Group::default()),
///     BodyPart::new("frown", PartType::Mouth, Group::default()),
/// ];
///
/// let composites = mix(&[body], &parts, &MixerConfig::default());
/// assert_eq!(composites.len(), 2);
/// ```
#[tracing::instrument(skip_all, fields(bodies = bodies.len(), parts = parts.len()))]
pub fn mix(bodies: &[Body], parts: &[BodyPart], config: &MixerConfig) -> Vec<CompositeCharacter> {
    Mixer::new(bodies, parts, config).run()
}

/// Load a TOML library, classify it and assemble every composite
pub fn generate(source: &str, config: &MixerConfig) -> Result<Vec<CompositeCharacter>, GenerateError> {
    config.validate()?;

    // Load the document, parsing all path data
    let document = Document::from_str(source)?;

    // Split characters into bodies and normalized parts
    let library = classify(&document, config.sample_step)?;

    Ok(mix(&library.bodies, &library.parts, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_empty_library() {
        let composites = generate("", &MixerConfig::default()).unwrap();
        assert!(composites.is_empty());
    }

    #[test]
    fn test_generate_reports_bad_path() {
        let source = r#"
[[characters]]
id = "x"

[[characters.groups]]
label = "body"

[[characters.groups.paths]]
id = "bad"
d = "M 0 0 L 1"
"#;
        let err = generate(source, &MixerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Document(DocumentError::Path { ref id, .. }) if id == "bad"
        ));
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = MixerConfig::default().with_sample_step(2.0);
        assert!(matches!(generate("", &config), Err(GenerateError::Config(_))));
    }
}
