use refract::Heading;

use super::*;

/// A closed polygonal region of uniform refractive index.
///
/// The particle changes medium every time it crosses one of the edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    vertices: Vec<Vector2<Float>>,
    /// `edges[i]` goes from `vertices[i]` to `vertices[(i + 1) % n]`
    edges: Vec<Segment>,
    index: RefractiveIndex,
}

impl Block {
    /// Angular spacing of the vertices approximating the arc of a [semicircle](Self::semicircle).
    pub const ARC_STEP: Float = 0.1;

    /// Attempts to create a block bounded by the polygon going through `vertices`, in order.
    ///
    /// The polygon is closed automatically. Returns an error if there are less than three
    /// vertices, or if two consecutive ones (including the last and the first) coincide.
    pub fn try_new(
        vertices: impl IntoIterator<Item = impl Into<Vector2<Float>>>,
        index: RefractiveIndex,
    ) -> Result<Self, GeometryError> {
        let vertices: Vec<Vector2<Float>> = vertices.into_iter().map(Into::into).collect();
        let n = vertices.len();

        if n < 3 {
            return Err(GeometryError::TooFewVertices(n));
        }

        let edges = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| Segment::try_new(a, b))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            vertices,
            edges,
            index,
        })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if there are less than three vertices, two consecutive ones coincide, or aren't finite
    #[must_use]
    pub fn new(
        vertices: impl IntoIterator<Item = impl Into<Vector2<Float>>>,
        index: RefractiveIndex,
    ) -> Self {
        Self::try_new(vertices, index).expect("invalid block outline")
    }

    /// A half-disk, approximated by a polygon.
    ///
    /// `orientation` points from `center` to one end of the flat side, the other end
    /// lies opposite. The curved side sweeps clockwise from there, sampled every
    /// [`Self::ARC_STEP`] radians. A non-positive `radius` is replaced by `1.0`.
    pub fn semicircle(
        center: impl Into<Vector2<Float>>,
        radius: Float,
        orientation: Heading,
        index: RefractiveIndex,
    ) -> Result<Self, GeometryError> {
        let center = center.into();
        let radius = if radius > 0.0 { radius } else { 1.0 };
        let chord = orientation.direction().into_inner() * radius;

        let arc = (1..)
            .map(|k| Float::from(k) * Self::ARC_STEP)
            .take_while(|&sweep| sweep < core::f64::consts::PI)
            .map(|sweep| center + orientation.turned_right(sweep).direction().into_inner() * radius);

        let vertices: Vec<_> = [center - chord, center + chord].into_iter().chain(arc).collect();

        log::trace!("semicircle at {center:?}, r = {radius}: {} vertices", vertices.len());

        Self::try_new(vertices, index)
    }

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vector2<Float>] {
        &self.vertices
    }

    /// The boundary of this block, one segment per vertex.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> RefractiveIndex {
        self.index
    }
}

impl Surface for Block {
    #[inline]
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        f(Boundary {
            segments: &self.edges,
            response: Response::Refract(self.index),
        });
    }
}
