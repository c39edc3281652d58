//! Transformation of meshes: slicing a mesh into two pieces with a plane.

pub use self::mesh_slicing::{
    build_cap_loops, fan_cap, slice, slice_mesh, slice_skinned_mesh, CapLoop, CutVertexBinding,
    ExecutionStrategy, MeshSlice, SideAccumulator, SkinOptions, SkinnedMesh, SkinnedSlice,
    SliceError, SliceFlags, SliceOptions, Sliceable, SlicedMeshes, SlicedObject,
    DEFAULT_SLICE_EPSILON,
};

mod mesh_slicing;
