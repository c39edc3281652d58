use crate::math::Real;
use crate::transformation::SliceError;

/// The tolerance used by [`SliceOptions::default`].
pub const DEFAULT_SLICE_EPSILON: Real = 1.0e-5;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
/// Controls how the pieces of a sliced mesh are completed.
pub struct SliceFlags(u8);

bitflags::bitflags! {
    impl SliceFlags: u8 {
        /// If set, the mesh is assumed to bound a volume and the cross-section
        /// is closed with cap triangles on both pieces.
        const SOLID = 1;
        /// If set and [`SliceFlags::SOLID`] isn't, every piece is duplicated
        /// with a reversed winding so its inside remains visible.
        const REVERSE_WINDING = 1 << 1;
        /// If set, vertices copied from the source mesh that end up at the same
        /// position are merged. Vertices created by the cut are never merged.
        const SHARE_VERTICES = 1 << 2;
        /// If set, the normals of both pieces are recomputed from their faces
        /// once all triangles, caps included, are emitted.
        const SMOOTH_NORMALS = 1 << 3;
    }
}

impl Default for SliceFlags {
    fn default() -> Self {
        SliceFlags::SOLID
    }
}

/// How the per-triangle splitting phase is scheduled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ExecutionStrategy {
    /// Split triangles one after the other on the calling thread.
    #[default]
    Sequential,
    /// Split triangles on the `rayon` thread pool, in chunks of at least
    /// `min_triangles_per_task` triangles.
    ///
    /// The output is identical to the sequential one. Requires the `parallel`
    /// feature; without it, slicing falls back to [`ExecutionStrategy::Sequential`].
    Parallel {
        /// The smallest number of triangles handled by a single task.
        min_triangles_per_task: usize,
    },
}

/// Options of a slicing operation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SliceOptions {
    /// How pieces are completed.
    pub flags: SliceFlags,
    /// The distance under which a vertex is considered on the cutting plane.
    ///
    /// It is also the distance under which cut points are chained into the
    /// same cap loop and under which source vertices are merged with
    /// [`SliceFlags::SHARE_VERTICES`].
    pub epsilon: Real,
    /// How the per-triangle phase is scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            flags: SliceFlags::default(),
            epsilon: DEFAULT_SLICE_EPSILON,
            strategy: ExecutionStrategy::Sequential,
        }
    }
}

impl SliceOptions {
    /// Replaces the flags of these options.
    pub fn with_flags(mut self, flags: SliceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replaces the tolerance of these options.
    pub fn with_epsilon(mut self, epsilon: Real) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Replaces the execution strategy of these options.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Is the sliced mesh capped?
    pub fn is_solid(&self) -> bool {
        self.flags.contains(SliceFlags::SOLID)
    }

    /// Are the pieces of an open mesh doubled with reversed faces?
    pub fn reverse_winding(&self) -> bool {
        self.flags.contains(SliceFlags::REVERSE_WINDING)
    }

    /// Are identical source vertices merged?
    pub fn share_vertices(&self) -> bool {
        self.flags.contains(SliceFlags::SHARE_VERTICES)
    }

    /// Are the normals smoothed after slicing?
    pub fn smooth_normals(&self) -> bool {
        self.flags.contains(SliceFlags::SMOOTH_NORMALS)
    }

    pub(crate) fn validate(&self) -> Result<(), SliceError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(SliceError::InvalidTolerance(self.epsilon));
        }

        Ok(())
    }
}

/// The bone a vertex created by the cut is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CutVertexBinding {
    /// Every cut vertex is bound with a weight of 1 to the given bone.
    Fixed(u32),
    /// Every cut vertex is bound with a weight of 1 to the bone whose bind-space
    /// origin is the closest to it.
    NearestBone,
}

impl Default for CutVertexBinding {
    fn default() -> Self {
        CutVertexBinding::Fixed(0)
    }
}

/// Options specific to the slicing of skinned meshes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkinOptions {
    /// The bone vertices created by the cut are bound to.
    pub cut_vertex_binding: CutVertexBinding,
    /// If set, the skeleton of the positive piece only keeps the bones its
    /// vertices are bound to, plus their ancestors.
    pub prune_unused_bones: bool,
}

impl SkinOptions {
    /// Replaces the binding of cut vertices.
    pub fn with_cut_vertex_binding(mut self, binding: CutVertexBinding) -> Self {
        self.cut_vertex_binding = binding;
        self
    }

    /// Sets whether unused bones are removed from the positive skeleton.
    pub fn with_pruned_bones(mut self, prune: bool) -> Self {
        self.prune_unused_bones = prune;
        self
    }
}
