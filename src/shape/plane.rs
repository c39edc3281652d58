//! Definition of the cutting plane.

use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::SurfaceVertex;
use crate::utils;

/// The location of a point relative to a plane, up to a tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PlaneSide {
    /// The point is strictly below the plane.
    Negative,
    /// The point is within the tolerance of the plane.
    OnPlane,
    /// The point is strictly above the plane.
    Positive,
}

/// An infinite plane splitting the space into two half-spaces.
///
/// A point `p` lies on the plane iff `normal · p + distance == 0`. The
/// positive half-space is the one `normal` points toward.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The plane's unit normal, pointing toward the positive half-space.
    pub normal: UnitVector<Real>,
    /// The signed distance term of the plane equation.
    pub distance: Real,
}

impl Plane {
    /// Builds a plane from its normal and the signed distance term of its equation.
    #[inline]
    pub fn new(normal: UnitVector<Real>, distance: Real) -> Self {
        Self { normal, distance }
    }

    /// Builds the plane with the given normal and passing through `point`.
    #[inline]
    pub fn from_point_normal(point: &Point<Real>, normal: &UnitVector<Real>) -> Self {
        Self::new(*normal, -normal.dot(&point.coords))
    }

    /// Builds the plane passing through three points.
    ///
    /// The normal follows the counter-clockwise orientation of `a`, `b`, `c`.
    /// Returns `None` if the points are collinear.
    pub fn from_points(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Option<Self> {
        utils::ccw_face_normal([a, b, c]).map(|n| Self::from_point_normal(a, &n))
    }

    /// The same plane with its half-spaces swapped.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self::new(-self.normal, -self.distance)
    }

    /// The signed distance from `pt` to this plane, positive on the positive half-space.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) + self.distance
    }

    /// Strict half-space test: `true` if `pt` is on the positive half-space or
    /// exactly on the plane.
    #[inline]
    pub fn side(&self, pt: &Point<Real>) -> bool {
        self.signed_distance(pt) >= 0.0
    }

    /// Classifies `pt` against this plane, treating every point closer than
    /// `epsilon` as lying on it.
    #[inline]
    pub fn classify(&self, pt: &Point<Real>, epsilon: Real) -> PlaneSide {
        let dist = self.signed_distance(pt);

        if dist > epsilon {
            PlaneSide::Positive
        } else if dist < -epsilon {
            PlaneSide::Negative
        } else {
            PlaneSide::OnPlane
        }
    }

    /// The orthogonal projection of `pt` on this plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - *self.normal * self.signed_distance(pt)
    }

    /// Two orthonormal vectors spanning this plane.
    #[inline]
    pub fn basis(&self) -> [Vector<Real>; 2] {
        utils::orthonormal_basis(&self.normal)
    }

    /// Intersects the edge `a → b` with this plane and interpolates its
    /// vertex attributes at the intersection point.
    ///
    /// The intersection parameter is computed from the signed distances of both
    /// ends, so it always lies in `[0, 1]`. Texture coordinates and normals are
    /// interpolated linearly; callers slicing a mesh overwrite the normal with
    /// the one of the face the new vertex ends up in. The result has no source
    /// vertex.
    ///
    /// Returns `None` if both ends lie strictly on the same side, or if the
    /// whole edge lies on the plane.
    pub fn intersect(&self, a: &SurfaceVertex, b: &SurfaceVertex) -> Option<SurfaceVertex> {
        let da = self.signed_distance(&a.position);
        let db = self.signed_distance(&b.position);

        if da * db > 0.0 || da == db {
            return None;
        }

        let t = (da / (da - db)).clamp(0.0, 1.0);
        let mut vertex = a.lerp(b, t);
        vertex.source = None;
        Some(vertex)
    }
}
