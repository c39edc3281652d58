use crate::math::{Point, Real, TexCoord, Vector};
use crate::shape::{SurfaceVertex, Triangle};
use crate::utils;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A per-vertex attribute buffer doesn't have one entry per vertex.
    #[error("the {attribute} buffer has {found} entries, expected {expected} (one per vertex)")]
    AttributeLengthMismatch {
        /// The name of the offending attribute.
        attribute: &'static str,
        /// The number of vertices.
        expected: usize,
        /// The length of the attribute buffer.
        found: usize,
    },
    /// A triangle references a vertex that doesn't exist.
    #[error("triangle {triangle} references vertex {index} but the mesh only has {num_vertices} vertices")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
}

/// A triangle mesh carrying per-vertex normals and texture coordinates.
///
/// The vertex, normal and uv buffers are parallel: they always have the same
/// length and are indexed by the same vertex ids. Triangles are wound
/// counter-clockwise when seen from the side their face points to.
///
/// Unlike a collision mesh, an empty `TriMesh` (no vertices, no triangles) is
/// valid: it is what slicing returns for a half-space the source doesn't reach.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    normals: Vec<Vector<Real>>,
    uvs: Vec<TexCoord<Real>>,
    indices: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Creates a new triangle mesh from its vertex attribute buffers and index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        normals: Vec<Vector<Real>>,
        uvs: Vec<TexCoord<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        let num_vertices = vertices.len();

        for (attribute, found) in [("normal", normals.len()), ("uv", uvs.len())] {
            if found != num_vertices {
                return Err(TriMeshBuilderError::AttributeLengthMismatch {
                    attribute,
                    expected: num_vertices,
                    found,
                });
            }
        }

        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i as usize >= num_vertices) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle,
                    index: *index,
                    num_vertices,
                });
            }
        }

        Ok(Self {
            vertices,
            normals,
            uvs,
            indices,
        })
    }

    /// Creates a triangle mesh with zero texture coordinates and smooth
    /// vertex normals computed from its faces.
    ///
    /// Vertices shared by several triangles get the area-weighted average of
    /// their face normals.
    pub fn with_smooth_normals(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        let n = vertices.len();
        let mut mesh = Self::new(vertices, vec![Vector::zeros(); n], vec![TexCoord::origin(); n], indices)?;
        mesh.recompute_smooth_normals();
        Ok(mesh)
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The per-vertex normals of this mesh.
    pub fn normals(&self) -> &[Vector<Real>] {
        &self.normals
    }

    /// The per-vertex texture coordinates of this mesh.
    pub fn uvs(&self) -> &[TexCoord<Real>] {
        &self.uvs
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles forming this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Whether this mesh has no triangle.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Gets the `i`-th vertex of this mesh together with its attributes.
    ///
    /// The returned vertex's `source` is `i` itself.
    pub fn vertex(&self, i: u32) -> SurfaceVertex {
        let k = i as usize;
        SurfaceVertex::new(self.vertices[k], self.normals[k], self.uvs[k], Some(i))
    }

    /// Get the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// The total surface area of this mesh.
    pub fn area(&self) -> Real {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Replaces every vertex normal by the normalized sum of the scaled face
    /// normals of the triangles touching it.
    ///
    /// Vertices that aren't referenced by any non-degenerate triangle end up
    /// with a zero normal.
    pub fn recompute_smooth_normals(&mut self) {
        accumulate_smooth_normals(&self.vertices, &self.indices, &mut self.normals);
    }

    /// Reverse the orientation of the triangle mesh.
    ///
    /// Normals are flipped too.
    pub fn reverse(&mut self) {
        self.indices.iter_mut().for_each(|idx| idx.swap(0, 1));
        self.normals.iter_mut().for_each(|n| *n = -*n);
    }

    /// Splits this mesh into its buffers `(vertices, normals, uvs, indices)`.
    pub fn into_parts(
        self,
    ) -> (
        Vec<Point<Real>>,
        Vec<Vector<Real>>,
        Vec<TexCoord<Real>>,
        Vec<[u32; 3]>,
    ) {
        (self.vertices, self.normals, self.uvs, self.indices)
    }
}

/// Zeroes `normals`, accumulates the unnormalized face normal of every
/// triangle onto its three vertices, then normalizes the sums.
pub(crate) fn accumulate_smooth_normals(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
    normals: &mut [Vector<Real>],
) {
    normals.iter_mut().for_each(|n| *n = Vector::zeros());

    for idx in indices {
        let face = utils::scaled_face_normal([
            &vertices[idx[0] as usize],
            &vertices[idx[1] as usize],
            &vertices[idx[2] as usize],
        ]);

        for i in idx {
            normals[*i as usize] += face;
        }
    }

    for n in normals.iter_mut() {
        *n = n.try_normalize(0.0).unwrap_or_else(Vector::zeros);
    }
}
