use core::{f64::consts::PI, iter::FusedIterator};

use nalgebra::{Rotation2, Vector2};

use crate::{
    Boundary, Float, Heading, RefractiveIndex, Response, Segment, Surface, TraceConfig,
};

/// The drawable area. Beams are traced until they leave it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: Float,
    pub height: Float,
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    /// Whether `p` lies strictly inside this viewport.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Vector2<Float>) -> bool {
        0.0 < p.x && p.x < self.width && 0.0 < p.y && p.y < self.height
    }
}

/// An 8-bit RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    /// The colour of the beam after it has accumulated `intensity`: red at
    /// first, fading towards white, and pure white once past `ceiling`.
    #[inline]
    #[must_use]
    pub fn beam(intensity: Float, ceiling: Float) -> Self {
        if intensity > ceiling {
            return Self::WHITE;
        }
        // truncation is fine, `fade` is already clamped to the `u8` range
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fade = intensity.clamp(0.0, 255.0) as u8;
        Self {
            r: 255,
            g: fade,
            b: fade,
        }
    }
}

/// One observation of the beam: where it was after a step, and how faded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceSample {
    pub position: Vector2<Float>,
    pub intensity: Float,
    pub color: Rgb,
}

/// Where a trace is at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TraceState {
    #[default]
    InFlight,
    /// The beam left the viewport.
    ExitedBounds,
    /// The beam faded past the intensity ceiling.
    FullyDecayed,
}

impl TraceState {
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InFlight)
    }
}

/// The state of the traced particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayState {
    position: Vector2<Float>,
    heading: Heading,
    medium: RefractiveIndex,
    intensity: Float,
}

impl RayState {
    /// A fresh particle, in air, at full brightness.
    #[inline]
    #[must_use]
    pub fn new(position: impl Into<Vector2<Float>>, heading: Heading) -> Self {
        Self {
            position: position.into(),
            heading,
            medium: RefractiveIndex::AIR,
            intensity: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> &Vector2<Float> {
        &self.position
    }

    #[inline]
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// The refractive index of the medium the particle is travelling in.
    #[inline]
    #[must_use]
    pub const fn medium(&self) -> RefractiveIndex {
        self.medium
    }

    #[inline]
    #[must_use]
    pub const fn intensity(&self) -> Float {
        self.intensity
    }

    /// Moves forward (or backward if `t < 0.0`) by `t` along the current heading.
    #[inline]
    pub fn advance(&mut self, t: Float) {
        self.position += self.heading.direction().as_ref() * t;
    }

    #[inline]
    fn turn_right(&mut self, angle: Float) {
        self.heading = self.heading.turned_right(angle);
    }
}

/// How a boundary segment is oriented relative to the particle's travel.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Incidence {
    /// Signed angle between the travel direction and the segment's normal.
    angle: Float,
    /// Whether the endpoint the angle was measured against lies
    /// behind the particle (or level with it).
    behind: bool,
}

impl Incidence {
    /// Measures `segment` from the particle's frame of reference.
    ///
    /// Both endpoints are rotated so that the particle travels along the local
    /// `x` axis; the first one lying strictly to the left of the travel
    /// direction is used. Returns `None` if neither does, which happens when
    /// the particle travels (nearly) parallel to `segment`.
    #[inline]
    fn measure(segment: &Segment, ray: &RayState) -> Option<Self> {
        let frame = Rotation2::new(-ray.heading.radians());

        segment
            .endpoints()
            .into_iter()
            .map(|p| frame * (p - ray.position))
            .find(|local| local.y > 0.0)
            .map(|local| Self {
                // zero for a head-on hit
                angle: (local.x / -local.y).atan(),
                behind: local.x <= 0.0,
            })
    }
}

/// `asin`, with its argument clamped against roundoff near `±1`.
#[inline]
fn clamped_asin(x: Float) -> Float {
    x.clamp(-1.0, 1.0).asin()
}

/// A beam being traced through a scene.
///
/// This is a lazy, finite iterator over the beam's [`TraceSample`]s: every call
/// to [`next`](Iterator::next) advances the particle by one step. It ends once
/// the particle leaves the viewport or fades out, see [`Self::state`].
///
/// Cloning a trace, or calling [`Self::restart`], replays the exact same
/// steps, as long as the surfaces' [`boundaries`](Surface::boundaries) are
/// deterministic.
#[derive(Debug)]
pub struct Trace<'a, S: ?Sized> {
    surfaces: &'a S,
    viewport: Viewport,
    config: TraceConfig,
    decay: Float,
    start: RayState,
    ray: RayState,
    state: TraceState,
    steps: usize,
}

impl<S: ?Sized> Clone for Trace<'_, S> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, S: Surface + ?Sized> Trace<'a, S> {
    /// Starts tracing `ray` through `surfaces`.
    ///
    /// `decay` is added to the beam's intensity at every step. `config` must
    /// be [valid](TraceConfig::validate), and `decay` positive, for the trace
    /// to be garanteed to terminate.
    #[inline]
    #[must_use]
    pub fn new(
        surfaces: &'a S,
        ray: RayState,
        decay: Float,
        viewport: Viewport,
        config: TraceConfig,
    ) -> Self {
        let mut trace = Self {
            surfaces,
            viewport,
            config,
            decay,
            start: ray,
            ray,
            state: TraceState::InFlight,
            steps: 0,
        };
        trace.restart();
        trace
    }

    /// Rewinds to the first step.
    #[inline]
    pub fn restart(&mut self) {
        self.ray = self.start;
        self.steps = 0;
        self.state = if self.viewport.contains(&self.ray.position) {
            TraceState::InFlight
        } else {
            TraceState::ExitedBounds
        };
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> TraceState {
        self.state
    }

    /// The particle, as of the last emitted sample.
    #[inline]
    #[must_use]
    pub const fn ray(&self) -> &RayState {
        &self.ray
    }

    /// Number of steps taken so far.
    #[inline]
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Runs this trace to completion.
    #[must_use]
    pub fn run(mut self) -> TracedPath {
        let samples = self.by_ref().collect();
        TracedPath {
            samples,
            end: self.state,
            steps: self.steps,
        }
    }

    fn reflect(ray: &mut RayState, segment: &Segment) {
        let Some(incidence) = Incidence::measure(segment, ray) else {
            log::trace!("grazing mirror at {:?}, going straight", ray.position);
            return;
        };

        ray.turn_right(PI - 2.0 * incidence.angle);
        log::trace!("reflected at {:?}, heading {:?}", ray.position, ray.heading);
    }

    fn refract(ray: &mut RayState, segment: &Segment, block: RefractiveIndex, nudge: Float) {
        // the particle can only be inside one block at a time
        let current = ray.medium;
        let mut next = if current == block {
            RefractiveIndex::AIR
        } else {
            block
        };

        let Some(incidence) = Incidence::measure(segment, ray) else {
            log::trace!("grazing block at {:?}, going straight", ray.position);
            return;
        };

        let theta1 = incidence.angle.abs();
        let (n1, n2) = (current.get(), next.get());

        let turn = if next < current && theta1 > clamped_asin(n2 / n1) {
            log::trace!("total internal reflection at {:?}", ray.position);
            next = current;
            let turn = PI - 2.0 * theta1;
            if incidence.behind {
                turn
            } else {
                -turn
            }
        } else {
            let theta2 = clamped_asin(n1 * theta1.sin() / n2);
            log::trace!("refracted at {:?}, n: {current} -> {next}", ray.position);
            if incidence.behind {
                theta2 - theta1
            } else {
                theta1 - theta2
            }
        };

        ray.turn_right(turn);
        ray.medium = next;
        // push through so the same boundary isn't hit again on the next step
        ray.advance(nudge);
    }

    /// Applies every interaction at the current position, then moves one step.
    fn step(&mut self) {
        let contact = self.config.contact_distance();
        let nudge = self.config.boundary_nudge_steps * self.config.step_length;
        let ray = &mut self.ray;

        self.surfaces.boundaries(&mut |Boundary { segments, response }| {
            if response == Response::Reflect {
                for segment in segments {
                    if segment.distance_to(&ray.position) <= contact {
                        Self::reflect(ray, segment);
                    }
                }
            }
        });

        self.surfaces.boundaries(&mut |Boundary { segments, response }| {
            if let Response::Refract(n) = response {
                for segment in segments {
                    // the position may have moved since the last segment
                    if segment.distance_to(&ray.position) < contact {
                        Self::refract(ray, segment, n, nudge);
                    }
                }
            }
        });

        ray.advance(self.config.step_length);
        ray.intensity += self.decay;
        self.steps += 1;
    }
}

impl<S: Surface + ?Sized> Iterator for Trace<'_, S> {
    type Item = TraceSample;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.state.is_terminal() {
            return None;
        }

        self.step();

        let ray = &self.ray;
        let ceiling = self.config.intensity_ceiling;

        let sample = TraceSample {
            position: ray.position,
            intensity: ray.intensity,
            color: Rgb::beam(ray.intensity, ceiling),
        };

        if ray.intensity > ceiling {
            self.state = TraceState::FullyDecayed;
        } else if !self.viewport.contains(&ray.position) {
            self.state = TraceState::ExitedBounds;
        }

        if self.state.is_terminal() {
            log::debug!("trace ended: {:?} after {} steps", self.state, self.steps);
        }

        Some(sample)
    }
}

impl<S: Surface + ?Sized> FusedIterator for Trace<'_, S> {}

/// A completed trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TracedPath {
    pub samples: Vec<TraceSample>,
    /// Either [`TraceState::ExitedBounds`] or [`TraceState::FullyDecayed`].
    pub end: TraceState,
    pub steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::FRAC_PI_4;

    struct Wall(Segment, Response);

    impl Surface for Wall {
        fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
            f(Boundary {
                segments: core::slice::from_ref(&self.0),
                response: self.1,
            });
        }
    }

    const VIEW: Viewport = Viewport::new(1000.0, 1000.0);

    const NOTHING: [Wall; 0] = [];

    fn trace_through<S: Surface + ?Sized>(
        surfaces: &S,
        origin: [Float; 2],
        heading: Heading,
        decay: Float,
    ) -> Trace<'_, S> {
        Trace::new(
            surfaces,
            RayState::new(origin, heading),
            decay,
            VIEW,
            TraceConfig::default(),
        )
    }

    #[test]
    fn beam_colour_fades_to_white() {
        assert_eq!(Rgb::beam(0.0, 250.0), Rgb::RED);
        assert_eq!(Rgb::beam(100.4, 250.0), Rgb { r: 255, g: 100, b: 100 });
        assert_eq!(Rgb::beam(250.0, 250.0), Rgb { r: 255, g: 250, b: 250 });
        assert_eq!(Rgb::beam(250.5, 250.0), Rgb::WHITE);
    }

    #[test]
    fn viewport_bounds_are_exclusive() {
        assert!(VIEW.contains(&Vector2::new(0.5, 999.5)));
        assert!(!VIEW.contains(&Vector2::new(0.0, 10.0)));
        assert!(!VIEW.contains(&Vector2::new(10.0, 1000.0)));
    }

    #[test]
    fn starting_outside_produces_nothing() {
        let mut trace = trace_through(&NOTHING, [-5.0, 10.0], Heading::EAST, 1.0);
        assert_eq!(trace.state(), TraceState::ExitedBounds);
        assert_eq!(trace.next(), None);

        let path = trace.run();
        assert!(path.samples.is_empty());
        assert_eq!(path.end, TraceState::ExitedBounds);
        assert_eq!(path.steps, 0);
    }

    #[test]
    fn free_flight_runs_until_the_edge() {
        let path = trace_through(&NOTHING, [10.0, 500.0], Heading::EAST, 0.01).run();

        assert_eq!(path.end, TraceState::ExitedBounds);
        // 10 -> 1000 in steps of 0.5
        assert_eq!(path.steps, 1980);
        assert_relative_eq!(path.samples[0].position, Vector2::new(10.5, 500.0));
        assert_relative_eq!(path.samples.last().unwrap().position.x, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn fades_out_at_the_first_step_past_the_ceiling() {
        // 100, 200, 300: the ceiling of 250 is passed at step 3
        let path = trace_through(&NOTHING, [10.0, 500.0], Heading::EAST, 100.0).run();

        assert_eq!(path.end, TraceState::FullyDecayed);
        assert_eq!(path.steps, 3);
        assert_eq!(path.samples.len(), 3);
        assert_eq!(path.samples[1].color, Rgb { r: 255, g: 200, b: 200 });
        assert_eq!(path.samples[2].color, Rgb::WHITE);
    }

    #[test]
    fn head_on_mirror_sends_the_beam_back() {
        let mirror = Wall(Segment::new([100.0, 50.0], [100.0, 150.0]), Response::Reflect);
        let mut trace = trace_through(&mirror, [10.0, 100.0], Heading::EAST, 0.01);

        // 10 + 0.5 * 180 lands exactly on the mirror
        let hit = trace.by_ref().nth(179).unwrap();
        assert_relative_eq!(hit.position, Vector2::new(100.0, 100.0));
        assert_relative_eq!(trace.ray().heading().radians(), 0.0);

        let bounced = trace.next().unwrap();
        assert_relative_eq!(trace.ray().heading().radians(), PI);
        assert_relative_eq!(bounced.position, Vector2::new(99.5, 100.0), epsilon = 1e-9);

        let path = trace.run();
        assert_eq!(path.end, TraceState::ExitedBounds);
        assert!(path.samples.last().unwrap().position.x <= 0.0);
    }

    #[test]
    fn angle_of_reflection_equals_angle_of_incidence() {
        let mirror = Wall(Segment::new([0.0, 300.0], [1000.0, 300.0]), Response::Reflect);

        // heading down and to the right, starting on the mirror itself
        let mut trace = trace_through(&mirror, [500.0, 300.0], Heading::new(-FRAC_PI_4), 0.01);
        trace.next().unwrap();

        let heading = trace.ray().heading();
        assert_relative_eq!(heading.radians(), FRAC_PI_4, epsilon = 1e-6);

        let d = heading.direction();
        assert!(d.x > 0.0, "x direction must be kept");
        assert!(d.y > 0.0, "y direction must be reversed");
    }

    #[test]
    fn grazing_a_mirror_goes_straight() {
        // travelling along the mirror's supporting line, both endpoints are dead ahead/behind
        let mirror = Wall(Segment::new([20.0, 100.0], [60.0, 100.0]), Response::Reflect);
        let path = trace_through(&mirror, [10.0, 100.0], Heading::EAST, 0.01).run();

        assert_eq!(path.end, TraceState::ExitedBounds);
        assert!(path.samples.iter().all(|s| s.position.y == 100.0));
    }

    #[test]
    fn grazing_a_block_edge_keeps_the_medium() {
        let edge = Wall(
            Segment::new([20.0, 100.0], [60.0, 100.0]),
            Response::Refract(RefractiveIndex::CROWN_GLASS),
        );
        let mut trace = trace_through(&edge, [10.0, 100.0], Heading::EAST, 0.01);

        // no nudge either: every step is exactly one step length
        let mut x = 10.0;
        while let Some(sample) = trace.next() {
            x += 0.5;
            assert_eq!(sample.position, Vector2::new(x, 100.0));
            assert_eq!(trace.ray().medium(), RefractiveIndex::AIR);
            assert_eq!(trace.ray().heading(), Heading::EAST);
        }
        assert_eq!(trace.state(), TraceState::ExitedBounds);
    }

    #[test]
    fn restarting_replays_the_same_samples() {
        let mirror = Wall(Segment::new([0.0, 300.0], [1000.0, 300.0]), Response::Reflect);
        let mut trace = trace_through(&mirror, [500.0, 320.0], Heading::new(-1.2), 0.5);

        let first: Vec<_> = trace.clone().collect();
        let partial: Vec<_> = trace.by_ref().take(10).collect();
        assert_eq!(partial, first[..10]);

        trace.restart();
        assert_eq!(trace.steps(), 0);
        assert_eq!(trace.collect::<Vec<_>>(), first);
    }
}
