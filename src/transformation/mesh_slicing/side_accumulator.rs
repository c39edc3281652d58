use crate::math::{Point, Real, TexCoord, Vector};
use crate::shape::{SurfaceVertex, TriMesh, TriMeshBuilderError};
use crate::utils::SpatialHash;

/// Growable buffers collecting the triangles of one piece of a sliced mesh.
///
/// Triangles are either appended, or prepended in front of every triangle added
/// so far. A prepended triangle always gets three fresh vertices placed in front
/// of the vertex buffer, so the indices of the triangles behind it are shifted
/// by three. Cap triangles are prepended so that cap vertices occupy the front of
/// the vertex buffer.
///
/// Every vertex remembers the index of the source vertex it was copied from, or
/// `None` if it was created by the cut.
#[derive(Clone, Debug)]
pub struct SideAccumulator {
    welder: SpatialHash,
    vertices: Vec<Point<Real>>,
    normals: Vec<Vector<Real>>,
    uvs: Vec<TexCoord<Real>>,
    provenance: Vec<Option<u32>>,
    indices: Vec<[u32; 3]>,
    // Prepended triangles in insertion order. They are laid out in reverse
    // order in front of the other triangles when the mesh is built.
    front: Vec<[SurfaceVertex; 3]>,
}

impl SideAccumulator {
    /// Creates an empty accumulator merging welded vertices closer than
    /// `weld_distance`.
    pub fn new(weld_distance: Real) -> Self {
        Self {
            welder: SpatialHash::new(weld_distance),
            vertices: vec![],
            normals: vec![],
            uvs: vec![],
            provenance: vec![],
            indices: vec![],
            front: vec![],
        }
    }

    /// Adds a triangle.
    ///
    /// If `weld` is `true`, each of its vertices copied from the source mesh
    /// reuses an existing welded vertex at the same position, if any. Vertices
    /// created by the cut are never welded since their normals belong to a single
    /// face. If `prepend` is `true`, the triangle is inserted before every
    /// triangle added so far and `weld` is ignored.
    pub fn add_triangle(&mut self, vertices: [SurfaceVertex; 3], weld: bool, prepend: bool) {
        if prepend {
            self.front.push(vertices);
        } else {
            let idx = vertices.map(|v| self.push_vertex(&v, weld));
            self.indices.push(idx);
        }
    }

    fn push_vertex(&mut self, vertex: &SurfaceVertex, weld: bool) -> u32 {
        let weld = weld && vertex.source.is_some();

        if weld {
            if let Some(id) = self.welder.find(&vertex.position, &self.vertices) {
                return id;
            }
        }

        let id = self.vertices.len() as u32;
        self.vertices.push(vertex.position);
        self.normals.push(vertex.normal);
        self.uvs.push(vertex.uv);
        self.provenance.push(vertex.source);

        if weld {
            self.welder.insert(id, &vertex.position);
        }

        id
    }

    /// The number of triangles added so far.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() + self.front.len()
    }

    /// The number of prepended triangles.
    pub fn num_prepended(&self) -> usize {
        self.front.len()
    }

    /// The number of vertices the built mesh will have.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() + 3 * self.front.len()
    }

    /// Whether no triangle was added yet.
    pub fn is_empty(&self) -> bool {
        self.num_triangles() == 0
    }

    /// For each vertex of the built mesh, the index of the source vertex it
    /// was copied from.
    pub fn provenance(&self) -> Vec<Option<u32>> {
        let mut result = Vec::with_capacity(self.num_vertices());
        for tri in self.front.iter().rev() {
            result.extend(tri.iter().map(|v| v.source));
        }
        result.extend_from_slice(&self.provenance);
        result
    }

    /// Builds the mesh made of all the triangles added so far.
    ///
    /// The accumulator is left untouched, so calling this again without adding
    /// triangles returns an identical mesh.
    pub fn to_mesh(&self) -> Result<TriMesh, TriMeshBuilderError> {
        let num_front = self.front.len();
        let num_vertices = self.num_vertices();
        let mut vertices = Vec::with_capacity(num_vertices);
        let mut normals = Vec::with_capacity(num_vertices);
        let mut uvs = Vec::with_capacity(num_vertices);
        let mut indices = Vec::with_capacity(self.num_triangles());

        for (k, tri) in self.front.iter().rev().enumerate() {
            for v in tri {
                vertices.push(v.position);
                normals.push(v.normal);
                uvs.push(v.uv);
            }

            let base = 3 * k as u32;
            indices.push([base, base + 1, base + 2]);
        }

        vertices.extend_from_slice(&self.vertices);
        normals.extend_from_slice(&self.normals);
        uvs.extend_from_slice(&self.uvs);

        let offset = 3 * num_front as u32;
        indices.extend(self.indices.iter().map(|idx| idx.map(|i| i + offset)));

        TriMesh::new(vertices, normals, uvs, indices)
    }
}
