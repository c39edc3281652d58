//! Non-persistent geometric queries.
//!
//! The splitting primitives exported here operate on a single triangle and are
//! pure: [`split_triangle`] can run on any number of triangles in parallel.

pub use self::split::{split_triangle, CutSegment, MeshSide, SplitPiece, TriangleSplit};

mod split;
