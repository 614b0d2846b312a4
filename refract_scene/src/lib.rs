//! Interactive scene building.
//!
//! A [`Scene`] holds the committed emitters, mirrors and blocks, plus at most
//! one [`Pending`] object that follows the pointer until it is placed. Objects
//! are placed through a small state machine, driven by [`Scene::select`],
//! [`Scene::pointer_moved`] and [`Scene::click`].

mod editor;

pub use editor::*;

use refract::{
    nalgebra::Vector2, Boundary, Emitter, Error, Float, GeometryError, Heading, RefractiveIndex,
    Surface, TraceConfig, TracedPath, Viewport,
};
use refract_shapes::{Block, Mirror};

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    emitters: Vec<Emitter>,
    mirrors: Vec<Mirror>,
    blocks: Vec<Block>,
    pending: Option<Pending>,
    placement: Placement,
    /// Last known pointer position.
    pointer: Vector2<Float>,
}

/// Every beam of a scene, traced once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// One path per emitter that is switched on, committed ones first.
    pub paths: Vec<TracedPath>,
}

impl Frame {
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.paths.iter().map(|path| path.samples.len()).sum()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            emitters: Vec::new(),
            mirrors: Vec::new(),
            blocks: Vec::new(),
            pending: None,
            placement: Placement::Idle,
            pointer: Vector2::zeros(),
        }
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    #[must_use]
    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// Lets emitters be switched on and off.
    #[inline]
    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    #[inline]
    #[must_use]
    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    #[inline]
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    #[must_use]
    pub const fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Traces every beam through the whole scene, preview included.
    #[must_use]
    pub fn trace_frame(&self, viewport: Viewport, config: &TraceConfig) -> Frame {
        let pending = match &self.pending {
            Some(Pending::Emitter(emitter)) => Some(emitter),
            _ => None,
        };

        let paths = self
            .emitters
            .iter()
            .chain(pending)
            .filter_map(|emitter| emitter.trace(self, viewport, config))
            .map(|trace| trace.run())
            .collect();

        Frame { paths }
    }
}

impl Surface for Scene {
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        (self.mirrors.as_slice(), self.blocks.as_slice(), &self.pending).boundaries(f);
    }
}
