use nalgebra::Vector2;

use crate::{Float, GeometryError};

/// A straight boundary element between two distinct points.
///
/// Used for mirrors and for the edges of refractive blocks alike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    start: Vector2<Float>,
    end: Vector2<Float>,
    /// `end - start`
    delta: Vector2<Float>,
    /// Squared length, garanteed to be strictly positive.
    length_sq: Float,
}

impl Segment {
    /// Returns an error if the endpoints coincide (the segment would have
    /// no length to project onto) or if any coordinate is not finite.
    #[inline]
    pub fn try_new(
        start: impl Into<Vector2<Float>>,
        end: impl Into<Vector2<Float>>,
    ) -> Result<Self, GeometryError> {
        let (start, end) = (start.into(), end.into());

        if !(start.iter().chain(end.iter()).all(|c| c.is_finite())) {
            return Err(GeometryError::NonFinite("segment endpoint"));
        }

        let delta = end - start;
        let length_sq = delta.norm_squared();

        if length_sq > 0.0 {
            Ok(Self {
                start,
                end,
                delta,
                length_sq,
            })
        } else {
            Err(GeometryError::DegenerateSegment {
                x: start.x,
                y: start.y,
            })
        }
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if the endpoints coincide or aren't finite
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Vector2<Float>>, end: impl Into<Vector2<Float>>) -> Self {
        Self::try_new(start, end).expect("segment endpoints must be distinct and finite")
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> &Vector2<Float> {
        &self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> &Vector2<Float> {
        &self.end
    }

    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> [Vector2<Float>; 2] {
        [self.start, self.end]
    }

    #[inline]
    #[must_use]
    pub const fn delta(&self) -> &Vector2<Float> {
        &self.delta
    }

    #[inline]
    #[must_use]
    pub const fn length_squared(&self) -> Float {
        self.length_sq
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        self.length_sq.sqrt()
    }

    /// The same segment, traversed the other way.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            delta: -self.delta,
            length_sq: self.length_sq,
        }
    }

    /// Returns the point of `self` closest to `p`.
    ///
    /// `p` is projected onto the supporting line, then the projection
    /// parameter is clamped to `[0, 1]` so the result stays on the segment.
    #[inline]
    #[must_use]
    pub fn closest_point(&self, p: &Vector2<Float>) -> Vector2<Float> {
        let u = ((p - self.start).dot(&self.delta) / self.length_sq).clamp(0.0, 1.0);
        self.start + self.delta * u
    }

    /// Euclidean distance between `p` and the closest point of `self`.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, p: &Vector2<Float>) -> Float {
        (self.closest_point(p) - p).norm()
    }
}

impl<U: Into<Vector2<Float>>> TryFrom<[U; 2]> for Segment {
    type Error = GeometryError;

    #[inline]
    fn try_from([start, end]: [U; 2]) -> Result<Self, Self::Error> {
        Self::try_new(start, end)
    }
}
