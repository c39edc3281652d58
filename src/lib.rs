/*!
cleave3d
========

**cleave3d** slices triangle meshes with a plane. Each slice produces two new
meshes, one per half-space, with split triangles re-wound, texture coordinates
interpolated along the cut, optional caps closing the cross-section, and, for
skinned meshes, bone weights and bind poses carried over to the positive piece.

The crate is pure geometry: it consumes a [`shape::TriMesh`] (and optionally a
[`skinning::Skeleton`] with [`skinning::BoneWeights`]) and hands back owned
meshes. Instantiating renderers, colliders or rigid bodies for the pieces is
left to the host.

```
# use cleave3d::math::{Point, Vector};
# use cleave3d::shape::{Plane, TriMesh};
# use cleave3d::transformation::{slice_mesh, SliceOptions};
let vertices = vec![
    Point::new(0.0, 0.0, 0.0),
    Point::new(1.0, 0.0, 0.0),
    Point::new(0.0, 1.0, 0.0),
    Point::new(0.0, 0.0, 1.0),
];
let indices = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
let tetrahedron = TriMesh::with_smooth_normals(vertices, indices).unwrap();

let plane = Plane::from_point_normal(&Point::new(0.25, 0.0, 0.0), &Vector::x_axis());
let pieces = slice_mesh(&plane, &tetrahedron, &SliceOptions::default()).unwrap();

assert!(pieces.positive.num_cap_triangles > 0);
assert!(pieces.negative.num_cap_triangles > 0);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod query;
pub mod shape;
pub mod skinning;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Matrix4, Point2, Point3, Translation3, UnitVector3, Vector2, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The rigid transformation type used for bones and skeleton roots.
    pub use Isometry3 as Isometry;

    /// The homogeneous matrix type used for bind poses.
    pub use Matrix4 as Matrix;

    /// The texture coordinate type.
    pub use Point2 as TexCoord;
}
