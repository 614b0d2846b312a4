//! Concrete [`Surface`]s: mirrors and refractive blocks.

mod block;
mod mirror;

pub use block::*;
pub use mirror::*;

use refract::{nalgebra::Vector2, Boundary, Float, GeometryError, RefractiveIndex, Response, Segment, Surface};
