//! Part assembly: anchors, placement, search and classification

pub mod anchor;
pub mod classify;
pub mod error;
pub mod mixer;
pub mod placer;
pub mod types;

pub use anchor::{closest_point, ClosestPoint};
pub use classify::{classify, Library};
pub use error::ClassifyError;
pub use mixer::Mixer;
pub use placer::{place, Placement, Placer};
pub use types::{Anchor, Binding, Body, BodyPart, Category, CompositeCharacter, PartType};
