pub use self::cap_builder::{build_cap_loops, fan_cap, CapLoop};
pub use self::mesh_slicing::{slice, slice_mesh, MeshSlice, Sliceable, SlicedMeshes, SlicedObject};
pub use self::side_accumulator::SideAccumulator;
pub use self::skin_transplant::{slice_skinned_mesh, SkinnedMesh, SkinnedSlice};
pub use self::slice_error::SliceError;
pub use self::slice_options::{
    CutVertexBinding, ExecutionStrategy, SkinOptions, SliceFlags, SliceOptions,
    DEFAULT_SLICE_EPSILON,
};

mod cap_builder;
mod mesh_slicing;
mod post_process;
mod side_accumulator;
mod skin_transplant;
mod slice_error;
mod slice_options;
