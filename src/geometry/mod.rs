//! Geometry: points, cubic segments and rigid transforms

pub mod curve;
pub mod transform;
pub mod types;

pub use curve::{point_at, tangent_angle_at, to_beziers};
pub use transform::{apply, Transformation};
pub use types::{Bezier, Point};
