//! A stepping ray-optics engine for flat scenes.
//!
//! A point particle is advanced in small, fixed steps from an [`Emitter`].
//! Whenever it comes close enough to a boundary [`Segment`] of a [`Surface`],
//! its heading is updated: mirrors reflect it, refractive blocks bend it
//! according to Snell's law (or reflect it, past the critical angle).
//! The visited positions, with a fading colour, form the beam's [`Trace`].

use core::{fmt, ops::Deref};
use std::{rc::Rc, sync::Arc};

pub use nalgebra;

mod angle;
mod config;
mod emitter;
mod error;
mod segment;
mod tracer;

pub use angle::*;
pub use config::*;
pub use emitter::*;
pub use error::*;
pub use segment::*;
pub use tracer::*;

pub type Float = f64;

/// The refractive index of a medium. Garanteed to be positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RefractiveIndex(Float);

impl RefractiveIndex {
    /// The ambient medium every beam starts in.
    pub const AIR: Self = Self(1.0);
    /// Typical window glass, used for every block placed in the editor.
    pub const CROWN_GLASS: Self = Self(1.52);

    #[inline]
    pub fn new(n: Float) -> Result<Self, GeometryError> {
        if n.is_finite() && n > 0.0 {
            Ok(Self(n))
        } else {
            Err(GeometryError::InvalidRefractiveIndex(n))
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> Float {
        self.0
    }
}

impl Default for RefractiveIndex {
    fn default() -> Self {
        Self::AIR
    }
}

impl fmt::Display for RefractiveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<Float> for RefractiveIndex {
    type Error = GeometryError;

    #[inline]
    fn try_from(n: Float) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

/// What happens to a beam touching a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Response {
    /// Double-sided mirror.
    Reflect,
    /// Boundary of a region with the given refractive index.
    Refract(RefractiveIndex),
}

/// An ordered run of segments that all respond to the beam the same way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary<'a> {
    pub segments: &'a [Segment],
    pub response: Response,
}

/// The core trait of this library.
///
/// A surface is anything the beam can interact with: a single mirror, a
/// refractive block, or any collection of those. Surfaces are read-only for
/// the duration of a trace.
pub trait Surface {
    /// Passes every boundary of this surface to `f`, in a fixed order.
    ///
    /// This method is expected to be deterministic, i. e. calling it any
    /// number of times (without modifying `self` in between) must report the
    /// exact same boundaries, in the same order. Traces rely on this to be
    /// restartable.
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>));
}

use impl_trait_for_tuples::impl_for_tuples;

#[impl_for_tuples(1, 16)]
impl Surface for T {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        for_tuples!( #( T.boundaries(f); )* );
    }
}

impl<T: Surface> Surface for [T] {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.iter().for_each(|surface| surface.boundaries(f));
    }
}

impl<const N: usize, T: Surface> Surface for [T; N] {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.as_slice().boundaries(f);
    }
}

impl<T: Surface> Surface for Option<T> {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        if let Some(surface) = self {
            surface.boundaries(f);
        }
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all types implementing `Deref`
// makes it impossible to implement it for new types downstream.
impl<T: Surface + ?Sized> Surface for Box<T> {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.deref().boundaries(f);
    }
}

impl<T: Surface + ?Sized> Surface for Arc<T> {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.deref().boundaries(f);
    }
}

impl<T: Surface + ?Sized> Surface for Rc<T> {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.deref().boundaries(f);
    }
}

impl<T: Surface> Surface for Vec<T> {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.as_slice().boundaries(f);
    }
}

impl<T: Surface + ?Sized> Surface for &T {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        (*self).boundaries(f);
    }
}

impl<T: Surface + ?Sized> Surface for &mut T {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        self.deref().boundaries(f);
    }
}
