use crate::shape::{TriMesh, TriMeshBuilderError};
use crate::transformation::MeshSlice;

/// Appends to `slice` a copy of all its triangles with reversed winding and
/// flipped normals, so both faces of an open piece are visible.
///
/// Copied vertices keep the provenance of their original.
pub(crate) fn append_reversed_copy(slice: &mut MeshSlice) -> Result<(), TriMeshBuilderError> {
    let mut flipped = slice.mesh.clone();
    flipped.reverse();

    let (mut vertices, mut normals, mut uvs, mut indices) =
        std::mem::take(&mut slice.mesh).into_parts();
    let base = vertices.len() as u32;
    let (flipped_vertices, flipped_normals, flipped_uvs, flipped_indices) = flipped.into_parts();

    vertices.extend(flipped_vertices);
    normals.extend(flipped_normals);
    uvs.extend(flipped_uvs);
    indices.extend(
        flipped_indices
            .into_iter()
            .map(|[a, b, c]| [a + base, b + base, c + base]),
    );

    slice.provenance.extend_from_within(..);
    slice.mesh = TriMesh::new(vertices, normals, uvs, indices)?;
    Ok(())
}

/// Recomputes the normals of `slice` from its faces, caps included.
pub(crate) fn smooth_normals(slice: &mut MeshSlice) {
    slice.mesh.recompute_smooth_normals();
}
