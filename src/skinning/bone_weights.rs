use crate::math::Real;

/// The tolerance on the sum of the weights of a single vertex.
pub const WEIGHT_SUM_TOLERANCE: Real = 1.0e-3;

/// Error indicating that a set of bone weights is inconsistent.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum BoneWeightsError {
    /// There isn't exactly one weight run per mesh vertex.
    #[error("bone weights are given for {found} vertices, but the mesh has {expected}")]
    VertexCountMismatch {
        /// The number of mesh vertices.
        expected: usize,
        /// The number of weight runs.
        found: usize,
    },
    /// The per-vertex bone counts don't add up to the number of weights.
    #[error("the per-vertex bone counts add up to {expected} weights, but {found} were given")]
    RunLengthMismatch {
        /// The sum of the per-vertex bone counts.
        expected: usize,
        /// The length of the weight buffer.
        found: usize,
    },
    /// The weights of a vertex aren't sorted by decreasing weight.
    #[error("the bone weights of vertex {vertex} are not sorted by decreasing weight")]
    UnsortedWeights {
        /// The offending vertex.
        vertex: usize,
    },
    /// The weights of a vertex don't sum to one.
    #[error("the bone weights of vertex {vertex} sum to {sum} instead of 1")]
    WeightSum {
        /// The offending vertex.
        vertex: usize,
        /// The actual sum of its weights.
        sum: Real,
    },
    /// A weight references a bone that doesn't exist.
    #[error("vertex {vertex} is bound to bone {bone} but the skeleton only has {num_bones} bones")]
    BoneOutOfRange {
        /// The offending vertex.
        vertex: usize,
        /// The out-of-range bone index.
        bone: u32,
        /// The number of bones of the skeleton.
        num_bones: usize,
    },
}

/// The influence of one bone on one vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoneWeight {
    /// The index of the bone in its skeleton.
    pub bone: u32,
    /// The weight of the bone, in `[0, 1]`.
    pub weight: Real,
}

impl BoneWeight {
    /// Creates a new bone weight.
    pub fn new(bone: u32, weight: Real) -> Self {
        Self { bone, weight }
    }
}

/// Variable-length per-vertex bone weights.
///
/// The weights of every vertex are stored contiguously: vertex `i` owns the
/// `bones_per_vertex[i]` weights following those of vertex `i - 1`. Within a
/// run, weights are expected sorted by decreasing weight and to sum to one;
/// [`BoneWeights::validate`] checks this.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoneWeights {
    bones_per_vertex: Vec<u8>,
    weights: Vec<BoneWeight>,
    // Start of the run of each vertex, plus one past the end.
    offsets: Vec<usize>,
}

impl Default for BoneWeights {
    fn default() -> Self {
        Self {
            bones_per_vertex: vec![],
            weights: vec![],
            offsets: vec![0],
        }
    }
}

impl BoneWeights {
    /// Creates a set of bone weights from per-vertex bone counts and the
    /// concatenated runs of weights.
    pub fn new(bones_per_vertex: Vec<u8>, weights: Vec<BoneWeight>) -> Result<Self, BoneWeightsError> {
        let mut offsets = Vec::with_capacity(bones_per_vertex.len() + 1);
        let mut total = 0;
        offsets.push(0);

        for count in &bones_per_vertex {
            total += *count as usize;
            offsets.push(total);
        }

        if total != weights.len() {
            return Err(BoneWeightsError::RunLengthMismatch {
                expected: total,
                found: weights.len(),
            });
        }

        Ok(Self {
            bones_per_vertex,
            weights,
            offsets,
        })
    }

    /// Bone weights binding every one of `num_vertices` vertices to `bone` alone.
    pub fn rigid(num_vertices: usize, bone: u32) -> Self {
        let mut result = Self::default();
        for _ in 0..num_vertices {
            result.push_vertex(&[BoneWeight::new(bone, 1.0)]);
        }
        result
    }

    /// Appends the weights of one more vertex.
    pub fn push_vertex(&mut self, weights: &[BoneWeight]) {
        self.bones_per_vertex.push(weights.len() as u8);
        self.weights.extend_from_slice(weights);
        self.offsets.push(self.weights.len());
    }

    /// The number of vertices these weights are given for.
    pub fn num_vertices(&self) -> usize {
        self.bones_per_vertex.len()
    }

    /// The number of bones influencing each vertex.
    pub fn bones_per_vertex(&self) -> &[u8] {
        &self.bones_per_vertex
    }

    /// All the weights, vertex after vertex.
    pub fn weights(&self) -> &[BoneWeight] {
        &self.weights
    }

    /// The weights of the `i`-th vertex.
    pub fn vertex_weights(&self, i: usize) -> &[BoneWeight] {
        &self.weights[self.offsets[i]..self.offsets[i + 1]]
    }

    /// The sum of the weights of the `i`-th vertex.
    pub fn weight_sum(&self, i: usize) -> Real {
        self.vertex_weights(i).iter().map(|w| w.weight).sum()
    }

    /// Checks these weights against a mesh with `num_vertices` vertices and a
    /// skeleton with `num_bones` bones.
    pub fn validate(&self, num_vertices: usize, num_bones: usize) -> Result<(), BoneWeightsError> {
        if self.num_vertices() != num_vertices {
            return Err(BoneWeightsError::VertexCountMismatch {
                expected: num_vertices,
                found: self.num_vertices(),
            });
        }

        for vertex in 0..num_vertices {
            let run = self.vertex_weights(vertex);

            if let Some(w) = run.iter().find(|w| w.bone as usize >= num_bones) {
                return Err(BoneWeightsError::BoneOutOfRange {
                    vertex,
                    bone: w.bone,
                    num_bones,
                });
            }

            if run.windows(2).any(|w| w[0].weight < w[1].weight) {
                return Err(BoneWeightsError::UnsortedWeights { vertex });
            }

            let sum = self.weight_sum(vertex);
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(BoneWeightsError::WeightSum { vertex, sum });
            }
        }

        Ok(())
    }

    /// Replaces every bone index `b` by `remap[b]`.
    ///
    /// Every referenced bone must be mapped to `Some`.
    pub(crate) fn remap_bones(&mut self, remap: &[Option<u32>]) {
        for w in &mut self.weights {
            if let Some(new_id) = remap[w.bone as usize] {
                w.bone = new_id;
            }
        }
    }
}
