use core::{f64::consts::TAU, iter};

use refract::{nalgebra::Vector2, Emitter, Float, Heading, RefractiveIndex, Viewport};
use refract_shapes::{Block, Mirror};

pub use rand;

pub trait Random: Sized {
    /// Generate a randomized object lying within `area`, using the provided `rng`
    ///
    /// This method must not fail. If creating the object is faillible, keep trying until success.
    ///
    /// Implementations may panic if `area` has no surface.
    fn random(rng: &mut (impl rand::Rng + ?Sized), area: &Viewport) -> Self;
}

impl Random for Heading {
    fn random(rng: &mut (impl rand::Rng + ?Sized), _area: &Viewport) -> Self {
        Self::new(rng.gen_range(0.0..TAU))
    }
}

impl Random for Mirror {
    fn random(rng: &mut (impl rand::Rng + ?Sized), area: &Viewport) -> Self {
        loop {
            if let Ok(mirror) = Self::try_new(rand_point(rng, area), rand_point(rng, area)) {
                break mirror;
            }
        }
    }
}

impl Random for Block {
    /// A random convex polygon, inscribed in a circle that fits in `area`.
    fn random(rng: &mut (impl rand::Rng + ?Sized), area: &Viewport) -> Self {
        const MIN_NUM_VERTICES: usize = 3;
        const MAX_NUM_VERTICES: usize = 9;

        let extent = area.width.min(area.height);
        let radius = rng.gen_range(extent / 20.0..extent / 6.0);
        let center = Vector2::new(
            rng.gen_range(radius..area.width - radius),
            rng.gen_range(radius..area.height - radius),
        );
        let index = RefractiveIndex::new(rng.gen_range(1.1..2.0)).unwrap_or_default();

        loop {
            let n = rng.gen_range(MIN_NUM_VERTICES..MAX_NUM_VERTICES);
            let mut angles: Vec<Float> = iter::repeat_with(|| rng.gen_range(0.0..TAU))
                .take(n)
                .collect();
            angles.sort_by(Float::total_cmp);

            let vertices = angles
                .into_iter()
                .map(|a| center + Heading::new(a).direction().into_inner() * radius);

            if let Ok(block) = Self::try_new(vertices, index) {
                break block;
            }
        }
    }
}

impl Random for Emitter {
    fn random(rng: &mut (impl rand::Rng + ?Sized), area: &Viewport) -> Self {
        loop {
            let origin = rand_point(rng, area);
            let heading = Heading::random(rng, area);
            if let Ok(emitter) = Self::new(origin, heading, rng.gen_range(0.05..1.0)) {
                break emitter;
            }
        }
    }
}

/// The surfaces of a random scene: `(mirrors, blocks)`.
pub type RandomSurfaces = (Vec<Mirror>, Vec<Block>);

pub fn random_simulation(
    rng: &mut (impl rand::Rng + ?Sized),
    area: &Viewport,
) -> (RandomSurfaces, Vec<Emitter>) {
    const MAX_NUM_MIRRORS: usize = 8;
    const MAX_NUM_BLOCKS: usize = 4;
    const MIN_NUM_EMITTERS: usize = 1;
    const MAX_NUM_EMITTERS: usize = 6;

    let num_mirrors = rng.gen_range(0..MAX_NUM_MIRRORS);
    let num_blocks = rng.gen_range(0..MAX_NUM_BLOCKS);
    let num_emitters = rng.gen_range(MIN_NUM_EMITTERS..MAX_NUM_EMITTERS);

    (
        (
            gen_random(num_mirrors, rng, area),
            gen_random(num_blocks, rng, area),
        ),
        gen_random(num_emitters, rng, area),
    )
}

pub fn gen_random<T: Random>(
    n: usize,
    rng: &mut (impl rand::Rng + ?Sized),
    area: &Viewport,
) -> Vec<T> {
    iter::repeat_with(|| T::random(rng, area)).take(n).collect()
}

/// A point strictly inside `area`.
pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), area: &Viewport) -> Vector2<Float> {
    // the rng generates floats in 0.0..1.0, keep away from the edges
    Vector2::new(
        rng.gen_range(Float::EPSILON..1.0) * area.width,
        rng.gen_range(Float::EPSILON..1.0) * area.height,
    )
}
