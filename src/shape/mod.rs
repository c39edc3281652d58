//! Geometric primitives and the mesh type consumed and produced by slicing.

pub use self::plane::{Plane, PlaneSide};
pub use self::segment::Segment;
pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};
pub use self::vertex::SurfaceVertex;

mod plane;
mod segment;
mod triangle;
mod trimesh;
mod vertex;
