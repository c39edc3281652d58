//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::{ccw_face_normal, scaled_face_normal};
pub use self::orthonormal_basis::orthonormal_basis;
pub use self::sorted_pair::SortedPair;
pub use self::spatial_hash::SpatialHash;

mod ccw_face_normal;
pub mod hashmap;
mod orthonormal_basis;
mod sorted_pair;
mod spatial_hash;
