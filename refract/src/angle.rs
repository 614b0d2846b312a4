use core::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::{Unit, Vector2};

use crate::Float;

/// Wraps `radians` into `[0, 2π)`.
#[inline]
#[must_use]
pub fn normalize_angle(radians: Float) -> Float {
    let wrapped = radians.rem_euclid(TAU);
    // tiny negative inputs round up to exactly `TAU`
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A direction of travel in the plane.
///
/// Stored in radians, counterclockwise from the positive x axis, and
/// garanteed to lie in `[0, 2π)`.
///
/// User-facing code shows *bearings* instead: degrees, clockwise from the
/// positive y axis ("north"). Convert with [`Self::from_bearing_degrees`]
/// and [`Self::to_bearing_degrees`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Float", into = "Float"))]
pub struct Heading(Float);

impl Heading {
    pub const EAST: Self = Self(0.0);
    pub const NORTH: Self = Self(FRAC_PI_2);

    #[inline]
    #[must_use]
    pub fn new(radians: Float) -> Self {
        Self(normalize_angle(radians))
    }

    /// The heading pointing from `from` to `to`.
    ///
    /// Coincident points yield [`Self::EAST`].
    #[inline]
    #[must_use]
    pub fn towards(from: &Vector2<Float>, to: &Vector2<Float>) -> Self {
        let d = to - from;
        Self::new(d.y.atan2(d.x))
    }

    #[inline]
    #[must_use]
    pub fn from_bearing_degrees(degrees: Float) -> Self {
        Self::new((90.0 - degrees).to_radians())
    }

    /// Degrees clockwise from north, in `[0, 360)`.
    #[inline]
    #[must_use]
    pub fn to_bearing_degrees(self) -> Float {
        let degrees = (90.0 - self.0.to_degrees()).rem_euclid(360.0);
        if degrees >= 360.0 {
            0.0
        } else {
            degrees
        }
    }

    #[inline]
    #[must_use]
    pub const fn radians(self) -> Float {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn direction(self) -> Unit<Vector2<Float>> {
        let (sin, cos) = self.0.sin_cos();
        Unit::new_unchecked(Vector2::new(cos, sin))
    }

    /// Rotates clockwise by `angle` (counterclockwise if `angle` is negative).
    #[inline]
    #[must_use]
    pub fn turned_right(self, angle: Float) -> Self {
        Self::new(self.0 - angle)
    }
}

impl From<Float> for Heading {
    #[inline]
    fn from(radians: Float) -> Self {
        Self::new(radians)
    }
}

impl From<Heading> for Float {
    #[inline]
    fn from(heading: Heading) -> Self {
        heading.0
    }
}
