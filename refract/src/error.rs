use thiserror::Error;

use crate::Float;

/// Top-level error type of the tracing engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rejected scene geometry. These never reach the tracer: surfaces and
/// emitters can only be built from valid input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    #[error("segment endpoints coincide at ({x}, {y})")]
    DegenerateSegment { x: Float, y: Float },

    #[error("a block needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("refractive index must be positive and finite, got {0}")]
    InvalidRefractiveIndex(Float),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Rejected tracing parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("{parameter} must be positive and finite, got {value}")]
    NotPositive {
        parameter: &'static str,
        value: Float,
    },
}

impl ConfigError {
    /// Checks that `value` is a strictly positive, finite number.
    pub(crate) fn check_positive(parameter: &'static str, value: Float) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { parameter, value })
        }
    }
}

/// Convenience type alias for results using [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
