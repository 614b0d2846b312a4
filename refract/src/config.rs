use crate::{ConfigError, Float};

/// Tunable parameters of the stepping tracer.
///
/// The defaults reproduce the reference behaviour: half-unit steps, a beam
/// that fades to white at an intensity of 250, and a two-step push through
/// every block boundary the beam interacts with.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraceConfig {
    /// Distance travelled per step. Smaller steps detect collisions more
    /// accurately at the cost of more iterations. No boundary segment should
    /// be shorter than this, or the beam may tunnel through it.
    pub step_length: Float,
    /// Accumulated intensity beyond which the beam is considered faded.
    pub intensity_ceiling: Float,
    /// Extra distance, in steps, moved along the new heading after a block
    /// boundary event, so the next proximity test doesn't fire on the same
    /// boundary again. Empirically tuned.
    pub boundary_nudge_steps: Float,
}

impl TraceConfig {
    pub const DEFAULT_STEP_LENGTH: Float = 0.5;
    pub const DEFAULT_INTENSITY_CEILING: Float = 250.0;
    pub const DEFAULT_BOUNDARY_NUDGE_STEPS: Float = 2.0;

    /// Checks every parameter is strictly positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("step_length", self.step_length)?;
        ConfigError::check_positive("intensity_ceiling", self.intensity_ceiling)?;
        ConfigError::check_positive("boundary_nudge_steps", self.boundary_nudge_steps)
    }

    /// Distance below which the beam interacts with a segment.
    #[inline]
    #[must_use]
    pub fn contact_distance(&self) -> Float {
        self.step_length * 0.5
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            step_length: Self::DEFAULT_STEP_LENGTH,
            intensity_ceiling: Self::DEFAULT_INTENSITY_CEILING,
            boundary_nudge_steps: Self::DEFAULT_BOUNDARY_NUDGE_STEPS,
        }
    }
}
