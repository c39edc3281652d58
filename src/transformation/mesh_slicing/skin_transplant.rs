use crate::shape::{Plane, TriMesh};
use crate::skinning::{BoneWeight, BoneWeights, Skeleton};
use crate::transformation::{
    slice_mesh, CutVertexBinding, MeshSlice, SkinOptions, SliceError, SliceOptions, Sliceable,
};

/// The pieces of a skinned mesh sliced by [`slice_skinned_mesh`].
///
/// Only the positive piece stays skinned; the negative one is a static mesh.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkinnedSlice {
    /// The piece on the half-space the plane normal points toward.
    pub positive: MeshSlice,
    /// The skeleton driving the positive piece, with recomputed bind poses.
    pub positive_skeleton: Skeleton,
    /// The bone weights of every vertex of the positive piece, indexing
    /// `positive_skeleton`.
    pub positive_bone_weights: BoneWeights,
    /// The piece on the other half-space.
    pub negative: MeshSlice,
}

/// A mesh bundled with its skeleton and bone weights.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkinnedMesh {
    /// The surface of the mesh.
    pub mesh: TriMesh,
    /// The skeleton driving the mesh.
    pub skeleton: Skeleton,
    /// The bone weights of every vertex of the mesh.
    pub bone_weights: BoneWeights,
}

impl Sliceable for SkinnedMesh {
    fn surface(&self) -> Option<&TriMesh> {
        Some(&self.mesh)
    }

    fn skin(&self) -> Option<(&Skeleton, &BoneWeights)> {
        Some((&self.skeleton, &self.bone_weights))
    }
}

/// Slices a skinned mesh with `plane` and carries its skinning over to the
/// positive piece.
///
/// The slice itself is identical to [`slice_mesh`]. Vertices of the positive
/// piece copied from the source mesh keep their bone weights; vertices created
/// by the cut are bound to a single bone, with a weight of 1, chosen by
/// [`SkinOptions::cut_vertex_binding`]. The positive skeleton is a copy of
/// `skeleton`, re-parented by bone name and pruned to the bones actually used if
/// [`SkinOptions::prune_unused_bones`] is set, with its bind poses recomputed
/// from the rest transforms. `skeleton` itself is left untouched.
///
/// A mesh without triangles fails with [`SliceError::UnsupportedInput`] before
/// anything else is checked. The bone weights are validated next: they must be
/// sorted by decreasing weight and sum to one for every vertex.
pub fn slice_skinned_mesh(
    plane: &Plane,
    mesh: &TriMesh,
    skeleton: &Skeleton,
    bone_weights: &BoneWeights,
    options: &SliceOptions,
    skin_options: &SkinOptions,
) -> Result<SkinnedSlice, SliceError> {
    if mesh.is_empty() {
        return Err(SliceError::UnsupportedInput);
    }

    let num_bones = skeleton.num_bones();
    bone_weights.validate(mesh.vertices().len(), num_bones)?;

    if let CutVertexBinding::Fixed(bone) = skin_options.cut_vertex_binding {
        if bone as usize >= num_bones {
            return Err(SliceError::FallbackBoneOutOfRange { bone, num_bones });
        }
    }

    let pieces = slice_mesh(plane, mesh, options)?;
    let positive = pieces.positive;
    let mut weights = BoneWeights::default();

    for (i, source) in positive.provenance.iter().enumerate() {
        match source {
            Some(source) => weights.push_vertex(bone_weights.vertex_weights(*source as usize)),
            None => {
                let bone = match skin_options.cut_vertex_binding {
                    CutVertexBinding::Fixed(bone) => bone,
                    CutVertexBinding::NearestBone => skeleton
                        .nearest_bone(&positive.mesh.vertices()[i])
                        .unwrap_or(0),
                };
                weights.push_vertex(&[BoneWeight::new(bone, 1.0)]);
            }
        }
    }

    let mut used = vec![!skin_options.prune_unused_bones; num_bones];
    for w in weights.weights() {
        used[w.bone as usize] = true;
    }

    let (positive_skeleton, remap) = skeleton.subset(&used);
    weights.remap_bones(&remap);

    log::debug!(
        "transplanted the skin of {} vertices onto {} bones out of {}",
        weights.num_vertices(),
        positive_skeleton.num_bones(),
        num_bones
    );

    Ok(SkinnedSlice {
        positive,
        positive_skeleton,
        positive_bone_weights: weights,
        negative: pieces.negative,
    })
}
