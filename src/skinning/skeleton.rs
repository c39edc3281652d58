use crate::math::{Isometry, Matrix, Point, Real};
use crate::utils::hashmap::HashMap;
use ordered_float::OrderedFloat;

/// Error indicating that a bone hierarchy is malformed.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SkeletonError {
    /// A bone's parent index doesn't refer to a bone of the skeleton.
    #[error("bone {bone} has parent {parent}, which is out of range")]
    ParentOutOfRange {
        /// The offending bone.
        bone: u32,
        /// Its out-of-range parent index.
        parent: u32,
    },
    /// Following the parents of a bone leads back to itself.
    #[error("bone {bone} is its own ancestor")]
    Cycle {
        /// A bone on the cycle.
        bone: u32,
    },
    /// The number of bind poses doesn't match the number of bones.
    #[error("{found} bind poses were given for {expected} bones")]
    BindPoseCount {
        /// The number of bones.
        expected: usize,
        /// The number of bind poses given.
        found: usize,
    },
    /// Two bones share the same name, so they can't be matched by name.
    #[error("several bones are named {name:?}")]
    DuplicateName {
        /// The shared name.
        name: String,
    },
}

/// A bone of a [`Skeleton`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bone {
    /// The unique name of the bone.
    pub name: String,
    /// The index of the parent bone, or `None` for bones attached to the root.
    pub parent: Option<u32>,
    /// The rest transform of the bone relative to its parent (or to the root).
    pub local: Isometry<Real>,
    /// The matrix mapping mesh-space points to this bone's space at rest.
    pub bind_pose: Matrix<Real>,
}

impl Bone {
    /// Creates a bone with an identity bind pose.
    pub fn new(name: impl Into<String>, parent: Option<u32>, local: Isometry<Real>) -> Self {
        Self {
            name: name.into(),
            parent,
            local,
            bind_pose: Matrix::identity(),
        }
    }
}

/// A bone hierarchy attached to a root transform.
///
/// The root transform places the skinned mesh in the world. Bones may be listed
/// in any order but their parent links must form a forest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Skeleton {
    root: Isometry<Real>,
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Creates a skeleton after checking that its hierarchy is well-formed and
    /// its bone names are unique.
    pub fn new(root: Isometry<Real>, bones: Vec<Bone>) -> Result<Self, SkeletonError> {
        {
            // Borrows `bones`, so it must be gone before `bones` moves into `Self`.
            let mut names = HashMap::default();

            for (i, bone) in bones.iter().enumerate() {
                if names.insert(bone.name.as_str(), i).is_some() {
                    return Err(SkeletonError::DuplicateName {
                        name: bone.name.clone(),
                    });
                }

                if let Some(parent) = bone.parent {
                    if parent as usize >= bones.len() {
                        return Err(SkeletonError::ParentOutOfRange {
                            bone: i as u32,
                            parent,
                        });
                    }
                }
            }
        }

        // A chain longer than the number of bones must loop.
        for i in 0..bones.len() {
            let mut curr = bones[i].parent;
            let mut steps = 0;

            while let Some(parent) = curr {
                steps += 1;
                if steps > bones.len() {
                    return Err(SkeletonError::Cycle { bone: i as u32 });
                }
                curr = bones[parent as usize].parent;
            }
        }

        Ok(Self { root, bones })
    }

    /// The transform of the skeleton's root in world space.
    pub fn root(&self) -> &Isometry<Real> {
        &self.root
    }

    /// The bones of this skeleton.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// The number of bones of this skeleton.
    pub fn num_bones(&self) -> usize {
        self.bones.len()
    }

    /// The index of the bone named `name`.
    pub fn find_bone(&self, name: &str) -> Option<u32> {
        self.bones.iter().position(|b| b.name == name).map(|i| i as u32)
    }

    /// The bind poses of every bone, in bone order.
    pub fn bind_poses(&self) -> Vec<Matrix<Real>> {
        self.bones.iter().map(|b| b.bind_pose).collect()
    }

    /// Replaces the bind poses of every bone.
    pub fn set_bind_poses(&mut self, bind_poses: &[Matrix<Real>]) -> Result<(), SkeletonError> {
        if bind_poses.len() != self.bones.len() {
            return Err(SkeletonError::BindPoseCount {
                expected: self.bones.len(),
                found: bind_poses.len(),
            });
        }

        for (bone, pose) in self.bones.iter_mut().zip(bind_poses) {
            bone.bind_pose = *pose;
        }

        Ok(())
    }

    /// The world-space transform of every bone at rest.
    ///
    /// A bone's world transform is its parent's world transform (the root for
    /// top-level bones) followed by its local transform.
    pub fn world_transforms(&self) -> Vec<Isometry<Real>> {
        let mut result: Vec<Option<Isometry<Real>>> = vec![None; self.bones.len()];
        let mut chain = vec![];

        for i in 0..self.bones.len() {
            // Climb to the first ancestor with a known transform, then go back down.
            let mut curr = Some(i as u32);
            while let Some(id) = curr {
                if result[id as usize].is_some() {
                    break;
                }
                chain.push(id);
                curr = self.bones[id as usize].parent;
            }

            let mut parent_world = curr.and_then(|id| result[id as usize]).unwrap_or(self.root);

            while let Some(id) = chain.pop() {
                parent_world *= self.bones[id as usize].local;
                result[id as usize] = Some(parent_world);
            }
        }

        result.into_iter().map(|pos| pos.unwrap_or(self.root)).collect()
    }

    /// Computes, without storing them, the bind poses matching the current rest
    /// transforms: `inverse(bone_world) * root_world` for every bone.
    pub fn compute_bind_poses(&self) -> Vec<Matrix<Real>> {
        self.world_transforms()
            .iter()
            .map(|world| (world.inverse() * self.root).to_homogeneous())
            .collect()
    }

    /// Overwrites the stored bind poses with [`Skeleton::compute_bind_poses`].
    pub fn recompute_bind_poses(&mut self) {
        let poses = self.compute_bind_poses();
        for (bone, pose) in self.bones.iter_mut().zip(poses) {
            bone.bind_pose = pose;
        }
    }

    /// The bone whose origin, read from its bind pose, is the closest to `pt`
    /// given in mesh space.
    ///
    /// Bones with a non-invertible bind pose are ignored.
    pub fn nearest_bone(&self, pt: &Point<Real>) -> Option<u32> {
        self.bones
            .iter()
            .enumerate()
            .filter_map(|(i, bone)| {
                let origin = bone.bind_pose.try_inverse()?.transform_point(&Point::origin());
                Some((i as u32, na::distance_squared(&origin, pt)))
            })
            .min_by_key(|(_, dist)| OrderedFloat(*dist))
            .map(|(i, _)| i)
    }

    /// Extracts the bones flagged in `keep` together with all their ancestors.
    ///
    /// Retained bones keep their relative order. Their parents are re-resolved
    /// by name in the copy and their bind poses are recomputed from the rest
    /// transforms. Returns the new skeleton and, for every original bone, its
    /// index in the new one.
    pub fn subset(&self, keep: &[bool]) -> (Skeleton, Vec<Option<u32>>) {
        let mut retained = vec![false; self.bones.len()];

        for (i, flag) in keep.iter().enumerate().take(self.bones.len()) {
            let mut curr = if *flag { Some(i as u32) } else { None };
            while let Some(id) = curr {
                if retained[id as usize] {
                    break;
                }
                retained[id as usize] = true;
                curr = self.bones[id as usize].parent;
            }
        }

        let mut remap = vec![None; self.bones.len()];
        let mut bones = vec![];

        for (i, bone) in self.bones.iter().enumerate() {
            if retained[i] {
                remap[i] = Some(bones.len() as u32);
                bones.push(bone.clone());
            }
        }

        let new_ids: HashMap<&str, u32> = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.as_str(), i as u32))
            .collect();
        let parents: Vec<_> = bones
            .iter()
            .map(|b| {
                b.parent
                    .and_then(|p| new_ids.get(self.bones[p as usize].name.as_str()).copied())
            })
            .collect();
        drop(new_ids);

        for (bone, parent) in bones.iter_mut().zip(parents) {
            bone.parent = parent;
        }

        let mut result = Skeleton {
            root: self.root,
            bones,
        };
        result.recompute_bind_poses();
        (result, remap)
    }
}
