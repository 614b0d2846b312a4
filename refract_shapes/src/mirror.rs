use core::slice;

use super::*;

/// A double-sided flat mirror.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mirror {
    segment: Segment,
}

impl Mirror {
    /// Attempts to create a mirror going from `start` to `end`.
    ///
    /// Returns an error if they coincide, or aren't finite.
    #[inline]
    pub fn try_new(
        start: impl Into<Vector2<Float>>,
        end: impl Into<Vector2<Float>>,
    ) -> Result<Self, GeometryError> {
        Segment::try_new(start, end).map(Self::from)
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `start` and `end` coincide, or aren't finite
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Vector2<Float>>, end: impl Into<Vector2<Float>>) -> Self {
        Segment::new(start, end).into()
    }

    #[inline]
    #[must_use]
    pub const fn segment(&self) -> &Segment {
        &self.segment
    }

    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> [Vector2<Float>; 2] {
        self.segment.endpoints()
    }
}

impl From<Segment> for Mirror {
    #[inline]
    fn from(segment: Segment) -> Self {
        Self { segment }
    }
}

impl<U: Into<Vector2<Float>>> TryFrom<[U; 2]> for Mirror {
    type Error = GeometryError;

    #[inline]
    fn try_from([start, end]: [U; 2]) -> Result<Self, Self::Error> {
        Self::try_new(start, end)
    }
}

impl Surface for Mirror {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        f(Boundary {
            segments: slice::from_ref(&self.segment),
            response: Response::Reflect,
        });
    }
}
