use crate::geometry::meshes::{prism, random_plane};
use cleave3d::math::{Isometry, Vector};
use cleave3d::shape::Plane;
use cleave3d::skinning::{Bone, BoneWeight, BoneWeights, Skeleton};
use cleave3d::transformation::{
    slice, CutVertexBinding, SkinOptions, SkinnedMesh, SliceOptions, SlicedObject,
};

// A prism driven by a base bone at its bottom and a top bone at its top, with
// a spare bone far away that no vertex uses.
fn skinned_prism() -> SkinnedMesh {
    let mesh = prism(8);
    let mut skeleton = Skeleton::new(
        Isometry::identity(),
        vec![
            Bone::new("base", None, Isometry::translation(0.0, 0.0, -1.0)),
            Bone::new("top", Some(0), Isometry::translation(0.0, 0.0, 2.0)),
            Bone::new("spare", Some(0), Isometry::translation(10.0, 0.0, 0.0)),
        ],
    )
    .unwrap();
    skeleton.recompute_bind_poses();

    let mut bone_weights = BoneWeights::default();
    for pt in mesh.vertices() {
        if pt.z > 0.0 {
            bone_weights.push_vertex(&[BoneWeight::new(1, 0.75), BoneWeight::new(0, 0.25)]);
        } else {
            bone_weights.push_vertex(&[BoneWeight::new(0, 1.0)]);
        }
    }

    SkinnedMesh {
        mesh,
        skeleton,
        bone_weights,
    }
}

#[test]
fn transplanted_weights_stay_normalized() {
    let object = skinned_prism();
    let mut rng = oorandom::Rand32::new(11);
    let skin_options = SkinOptions::default()
        .with_cut_vertex_binding(CutVertexBinding::NearestBone)
        .with_pruned_bones(true);

    for _ in 0..30 {
        let plane = random_plane(&mut rng, 0.5);
        let SlicedObject::Skinned(result) =
            slice(&plane, &object, &SliceOptions::default(), &skin_options).unwrap()
        else {
            panic!("skinned meshes yield skinned slices");
        };

        let skeleton = &result.positive_skeleton;
        let weights = &result.positive_bone_weights;
        let num_vertices = result.positive.mesh.vertices().len();

        assert_eq!(skeleton.find_bone("spare"), None);
        assert!(skeleton.num_bones() <= 2);
        assert_eq!(skeleton.find_bone("base"), Some(0));
        assert_eq!(weights.validate(num_vertices, skeleton.num_bones()), Ok(()));

        for i in 0..num_vertices {
            assert_relative_eq!(weights.weight_sum(i), 1.0, epsilon = 1.0e-5);
        }

        for bone in skeleton.bones() {
            let original = object.skeleton.find_bone(&bone.name).unwrap();
            assert_relative_eq!(
                bone.bind_pose,
                object.skeleton.bones()[original as usize].bind_pose,
                epsilon = 1.0e-5
            );
        }
    }
}

#[test]
fn cut_vertices_bind_to_the_nearest_bone() {
    let object = skinned_prism();
    // Keep the top half, cut right below the top bone.
    let plane = Plane::new(Vector::z_axis(), -0.9);
    let skin_options = SkinOptions::default().with_cut_vertex_binding(CutVertexBinding::NearestBone);
    let SlicedObject::Skinned(result) =
        slice(&plane, &object, &SliceOptions::default(), &skin_options).unwrap()
    else {
        panic!("skinned meshes yield skinned slices");
    };

    assert_eq!(result.positive_skeleton.num_bones(), 3);

    for (i, source) in result.positive.provenance.iter().enumerate() {
        let weights = result.positive_bone_weights.vertex_weights(i);
        match source {
            Some(s) => assert_eq!(weights, object.bone_weights.vertex_weights(*s as usize)),
            None => assert_eq!(weights, &[BoneWeight::new(1, 1.0)]),
        }
    }

    // The negative piece is left static but still complete.
    assert!(result.negative.num_cap_triangles > 0);
    assert_eq!(
        result.negative.num_cap_triangles,
        result.positive.num_cap_triangles
    );
}

#[test]
fn fixed_binding_with_the_unused_bone_keeps_it() {
    let object = skinned_prism();
    let plane = Plane::new(Vector::z_axis(), 0.0);
    let skin_options = SkinOptions::default()
        .with_cut_vertex_binding(CutVertexBinding::Fixed(2))
        .with_pruned_bones(true);
    let SlicedObject::Skinned(result) =
        slice(&plane, &object, &SliceOptions::default(), &skin_options).unwrap()
    else {
        panic!("skinned meshes yield skinned slices");
    };

    let spare = result.positive_skeleton.find_bone("spare").unwrap();
    assert_eq!(result.positive_skeleton.num_bones(), 3);
    assert!(result
        .positive_bone_weights
        .weights()
        .iter()
        .any(|w| w.bone == spare));
}
