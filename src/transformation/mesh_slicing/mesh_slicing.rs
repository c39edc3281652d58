use super::cap_builder::{build_cap_loops, fan_cap};
use super::post_process;
use crate::query::{split_triangle, MeshSide, TriangleSplit};
use crate::shape::{Plane, TriMesh};
use crate::skinning::{BoneWeights, Skeleton};
use crate::transformation::{
    slice_skinned_mesh, ExecutionStrategy, SideAccumulator, SkinOptions, SkinnedSlice, SliceError,
    SliceOptions,
};

/// One piece of a sliced mesh.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshSlice {
    /// The geometry of the piece.
    pub mesh: TriMesh,
    /// For each vertex of `mesh`, the index of the source vertex it was copied
    /// from, or `None` if it was created by the cut.
    pub provenance: Vec<Option<u32>>,
    /// The number of cap triangles. They are the first triangles of `mesh`.
    pub num_cap_triangles: usize,
}

impl MeshSlice {
    /// Whether this piece has no triangle, i.e., the source mesh doesn't reach
    /// its half-space.
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// The indices of the triangles that aren't caps.
    pub fn surface_indices(&self) -> &[[u32; 3]] {
        &self.mesh.indices()[self.num_cap_triangles..]
    }

    /// The indices of the cap triangles.
    pub fn cap_indices(&self) -> &[[u32; 3]] {
        &self.mesh.indices()[..self.num_cap_triangles]
    }
}

/// The two pieces of a mesh sliced by [`slice_mesh`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SlicedMeshes {
    /// The piece on the half-space the plane normal points toward.
    pub positive: MeshSlice,
    /// The piece on the other half-space.
    pub negative: MeshSlice,
}

/// An object that can be sliced.
///
/// Hosts implement this once for their own object type, so capabilities are
/// resolved at the boundary rather than looked up during slicing.
pub trait Sliceable {
    /// The surface to slice, if the object has one.
    fn surface(&self) -> Option<&TriMesh>;

    /// The skeleton and per-vertex bone weights of the surface, if it is skinned.
    fn skin(&self) -> Option<(&Skeleton, &BoneWeights)> {
        None
    }
}

impl Sliceable for TriMesh {
    fn surface(&self) -> Option<&TriMesh> {
        Some(self)
    }
}

/// The result of [`slice`].
#[derive(Clone, Debug, PartialEq)]
pub enum SlicedObject {
    /// The object wasn't skinned.
    Static(SlicedMeshes),
    /// The object was skinned; the positive piece carries a skeleton.
    Skinned(SkinnedSlice),
}

/// Slices any [`Sliceable`] object, dispatching to [`slice_mesh`] or
/// [`slice_skinned_mesh`] depending on whether it is skinned.
///
/// Fails with [`SliceError::UnsupportedInput`] if the object has no surface or
/// if its surface has no triangle.
pub fn slice<S: Sliceable + ?Sized>(
    plane: &Plane,
    object: &S,
    options: &SliceOptions,
    skin_options: &SkinOptions,
) -> Result<SlicedObject, SliceError> {
    let mesh = object.surface().ok_or(SliceError::UnsupportedInput)?;

    match object.skin() {
        Some((skeleton, weights)) => {
            slice_skinned_mesh(plane, mesh, skeleton, weights, options, skin_options)
                .map(SlicedObject::Skinned)
        }
        None => slice_mesh(plane, mesh, options).map(SlicedObject::Static),
    }
}

/// Slices `mesh` with `plane` into two pieces, one per half-space.
///
/// Every source triangle is copied to the piece containing it, or split along
/// the plane with its texture coordinates interpolated. With
/// [`SliceFlags::SOLID`](crate::transformation::SliceFlags::SOLID), the
/// cross-section is closed on both pieces by cap triangles placed before every
/// other triangle. A piece the mesh doesn't reach is returned empty.
///
/// Fails with [`SliceError::UnsupportedInput`] if `mesh` has no triangle and
/// with [`SliceError::InvalidTolerance`] if the tolerance of `options` is
/// invalid.
pub fn slice_mesh(
    plane: &Plane,
    mesh: &TriMesh,
    options: &SliceOptions,
) -> Result<SlicedMeshes, SliceError> {
    options.validate()?;

    if mesh.is_empty() {
        return Err(SliceError::UnsupportedInput);
    }

    let splits = split_triangles(plane, mesh, options);
    let weld = options.share_vertices();
    let mut positive = SideAccumulator::new(options.epsilon);
    let mut negative = SideAccumulator::new(options.epsilon);
    let mut cuts = vec![];

    for split in splits {
        for piece in split.pieces {
            let side = match piece.side {
                MeshSide::Positive => &mut positive,
                MeshSide::Negative => &mut negative,
            };
            side.add_triangle(piece.vertices, weld, false);
        }

        cuts.extend(split.cut);
    }

    let mut num_loops = 0;
    let mut num_cap_triangles = 0;

    // A mesh merely touching the plane has nothing to close.
    if options.is_solid() && !positive.is_empty() && !negative.is_empty() {
        for cap in build_cap_loops(&cuts, options.epsilon) {
            if !cap.closed {
                log::warn!(
                    "open cut loop with {} points while capping a solid mesh",
                    cap.points.len()
                );
            }

            num_loops += 1;
            num_cap_triangles += fan_cap(&cap, plane, &mut positive, &mut negative);
        }
    }

    let mut result = SlicedMeshes {
        positive: MeshSlice {
            mesh: positive.to_mesh()?,
            provenance: positive.provenance(),
            num_cap_triangles,
        },
        negative: MeshSlice {
            mesh: negative.to_mesh()?,
            provenance: negative.provenance(),
            num_cap_triangles,
        },
    };

    for piece in [&mut result.positive, &mut result.negative] {
        if !options.is_solid() && options.reverse_winding() {
            post_process::append_reversed_copy(piece)?;
        }

        if options.smooth_normals() {
            post_process::smooth_normals(piece);
        }
    }

    log::debug!(
        "sliced {} triangles into {} positive and {} negative ones, {} cut segments, {} cap loops ({:?})",
        mesh.num_triangles(),
        result.positive.mesh.num_triangles(),
        result.negative.mesh.num_triangles(),
        cuts.len(),
        num_loops,
        options.strategy
    );

    Ok(result)
}

fn split_triangles(plane: &Plane, mesh: &TriMesh, options: &SliceOptions) -> Vec<TriangleSplit> {
    let num_triangles = mesh.num_triangles() as u32;
    let epsilon = options.epsilon;

    match options.strategy {
        ExecutionStrategy::Sequential => (0..num_triangles)
            .map(|i| split_triangle(plane, mesh, i, epsilon))
            .collect(),
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel {
            min_triangles_per_task,
        } => {
            use rayon::prelude::*;

            (0..num_triangles)
                .into_par_iter()
                .with_min_len(min_triangles_per_task.max(1))
                .map(|i| split_triangle(plane, mesh, i, epsilon))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        ExecutionStrategy::Parallel { .. } => {
            log::warn!("parallel slicing requested without the `parallel` feature, slicing sequentially");
            (0..num_triangles)
                .map(|i| split_triangle(plane, mesh, i, epsilon))
                .collect()
        }
    }
}
