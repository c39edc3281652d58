use crate::math::Real;
use crate::shape::TriMeshBuilderError;
use crate::skinning::{BoneWeightsError, SkeletonError};

#[cfg(doc)]
use crate::transformation::{slice, slice_mesh, slice_skinned_mesh, CutVertexBinding, SliceOptions};

/// Errors that can occur when slicing a mesh with [`slice_mesh`], [`slice_skinned_mesh`]
/// or [`slice`].
///
/// Every error is detected before any geometry is produced: a slice either
/// completes or fails without partial output. None of them is worth retrying
/// with the same input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SliceError {
    /// The object to slice exposes no surface, or a surface without triangles.
    #[error("the object has no sliceable surface")]
    UnsupportedInput,

    /// The tolerance given by [`SliceOptions::epsilon`] is negative or not finite.
    #[error("invalid slicing tolerance {0}, expected a finite non-negative value")]
    InvalidTolerance(Real),

    /// The source mesh has inconsistent buffers.
    #[error(transparent)]
    InvalidMesh(#[from] TriMeshBuilderError),

    /// The bone weights of the source mesh are inconsistent with the mesh or
    /// its skeleton.
    #[error(transparent)]
    InvalidBoneWeights(#[from] BoneWeightsError),

    /// The skeleton of the source mesh is malformed.
    #[error(transparent)]
    InvalidSkeleton(#[from] SkeletonError),

    /// The bone given by [`CutVertexBinding::Fixed`] doesn't exist.
    #[error("cut vertices are bound to bone {bone} but the skeleton only has {num_bones} bones")]
    FallbackBoneOutOfRange {
        /// The requested bone.
        bone: u32,
        /// The number of bones of the skeleton.
        num_bones: usize,
    },
}
