mod meshes;
mod slice_disjoint_cubes;
mod slice_random_planes;
mod slice_skinned;
mod slice_without_caps;
