//! Splitting triangles with a plane.

pub use self::split_triangle::{split_triangle, CutSegment, MeshSide, SplitPiece, TriangleSplit};

mod split_triangle;
