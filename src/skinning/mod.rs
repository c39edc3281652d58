//! Skeletons and per-vertex bone weights of skinned meshes.

pub use self::bone_weights::{BoneWeight, BoneWeights, BoneWeightsError, WEIGHT_SUM_TOLERANCE};
pub use self::skeleton::{Bone, Skeleton, SkeletonError};

mod bone_weights;
mod skeleton;
