use nalgebra::Vector2;

use crate::{
    ConfigError, Error, Float, GeometryError, Heading, RayState, Surface, Trace, TraceConfig,
    Viewport,
};

/// A laser: a point source firing a single beam along a fixed heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emitter {
    origin: Vector2<Float>,
    heading: Heading,
    /// Intensity added to the beam at every step.
    decay: Float,
    on: bool,
}

impl Emitter {
    pub const DEFAULT_DECAY: Float = 0.5;
    /// Used while the emitter is still being aimed, so the preview beam stays short.
    pub const PREVIEW_DECAY: Float = 1.0;
    /// Used once an emitter is placed in a scene.
    pub const PLACED_DECAY: Float = 0.01;

    /// Creates an emitter that is switched on.
    ///
    /// `decay` must be positive and finite, otherwise a beam trapped inside a
    /// block would be traced forever.
    pub fn new(
        origin: impl Into<Vector2<Float>>,
        heading: Heading,
        decay: Float,
    ) -> Result<Self, Error> {
        let origin = origin.into();

        if !origin.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("emitter origin").into());
        }

        ConfigError::check_positive("decay", decay)?;

        Ok(Self {
            origin,
            heading,
            decay,
            on: true,
        })
    }

    /// An emitter at `origin` pointing at `target`.
    pub fn aimed_at(
        origin: impl Into<Vector2<Float>>,
        target: impl Into<Vector2<Float>>,
        decay: Float,
    ) -> Result<Self, Error> {
        let (origin, target) = (origin.into(), target.into());
        Self::new(origin, Heading::towards(&origin, &target), decay)
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> &Vector2<Float> {
        &self.origin
    }

    #[inline]
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Degrees clockwise from north, as shown to the user.
    #[inline]
    #[must_use]
    pub fn bearing_degrees(&self) -> Float {
        self.heading.to_bearing_degrees()
    }

    #[inline]
    #[must_use]
    pub const fn decay(&self) -> Float {
        self.decay
    }

    #[inline]
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    #[inline]
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    #[inline]
    pub fn toggle(&mut self) {
        self.on = !self.on;
    }

    /// Starts tracing this emitter's beam through `surfaces`, or returns `None`
    /// if it is switched off.
    #[must_use]
    pub fn trace<'a, S: Surface + ?Sized>(
        &self,
        surfaces: &'a S,
        viewport: Viewport,
        config: &TraceConfig,
    ) -> Option<Trace<'a, S>> {
        self.on.then(|| {
            Trace::new(
                surfaces,
                RayState::new(self.origin, self.heading),
                self.decay,
                viewport,
                *config,
            )
        })
    }
}
