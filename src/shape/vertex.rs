//! A mesh vertex with its shading attributes.

use crate::math::{Point, Real, TexCoord, Vector};

/// A vertex position together with the attributes interpolated across a cut.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SurfaceVertex {
    /// The vertex position.
    pub position: Point<Real>,
    /// The vertex normal.
    pub normal: Vector<Real>,
    /// The vertex texture coordinates.
    pub uv: TexCoord<Real>,
    /// The index of the source-mesh vertex this vertex was copied from, or
    /// `None` if it was created by cutting.
    pub source: Option<u32>,
}

impl SurfaceVertex {
    /// Creates a new vertex.
    #[inline]
    pub fn new(
        position: Point<Real>,
        normal: Vector<Real>,
        uv: TexCoord<Real>,
        source: Option<u32>,
    ) -> Self {
        Self {
            position,
            normal,
            uv,
            source,
        }
    }

    /// Linearly interpolates every attribute between `self` (at `t = 0`) and
    /// `other` (at `t = 1`).
    ///
    /// The normal is renormalized when possible. The source index is kept
    /// only if both vertices share it.
    pub fn lerp(&self, other: &Self, t: Real) -> Self {
        let normal = self.normal.lerp(&other.normal, t);
        let source = if self.source == other.source {
            self.source
        } else {
            None
        };

        Self {
            position: Point::from(self.position.coords.lerp(&other.position.coords, t)),
            normal: normal.try_normalize(Real::EPSILON).unwrap_or(normal),
            uv: TexCoord::from(self.uv.coords.lerp(&other.uv.coords, t)),
            source,
        }
    }
}
