use crate::geometry::meshes::{cube, prism, surface_area};
use cleave3d::math::Vector;
use cleave3d::shape::Plane;
use cleave3d::transformation::{
    slice_mesh, ExecutionStrategy, SliceError, SliceFlags, SliceOptions,
};

#[test]
fn hollow_slices_stay_open() {
    let mesh = prism(10);
    let plane = Plane::new(Vector::z_axis(), -0.3);
    let options = SliceOptions::default().with_flags(SliceFlags::empty());
    let pieces = slice_mesh(&plane, &mesh, &options).unwrap();

    assert_eq!(pieces.positive.num_cap_triangles, 0);
    assert_eq!(pieces.negative.num_cap_triangles, 0);
    assert!(pieces.positive.cap_indices().is_empty());

    let total = pieces.positive.mesh.area() + pieces.negative.mesh.area();
    assert_relative_eq!(total, mesh.area(), max_relative = 1.0e-5);
    assert!(pieces
        .positive
        .mesh
        .vertices()
        .iter()
        .all(|pt| pt.z >= 0.3 - 1.0e-5));
}

#[test]
fn reversed_copies_face_the_other_way() {
    let mesh = cube();
    let plane = Plane::new(Vector::x_axis(), -0.5);
    let plain = slice_mesh(
        &plane,
        &mesh,
        &SliceOptions::default().with_flags(SliceFlags::empty()),
    )
    .unwrap();
    let doubled = slice_mesh(
        &plane,
        &mesh,
        &SliceOptions::default().with_flags(SliceFlags::REVERSE_WINDING),
    )
    .unwrap();

    for (single, double) in [
        (&plain.positive, &doubled.positive),
        (&plain.negative, &doubled.negative),
    ] {
        let n = single.mesh.vertices().len();
        let m = single.mesh.num_triangles();
        assert_eq!(double.mesh.vertices().len(), 2 * n);
        assert_eq!(double.mesh.num_triangles(), 2 * m);
        assert_eq!(double.provenance[..n], double.provenance[n..]);
        assert_eq!(double.provenance[..n], single.provenance[..]);
        assert_relative_eq!(
            surface_area(&double.mesh, double.mesh.indices()),
            2.0 * single.mesh.area(),
            max_relative = 1.0e-5
        );

        for i in 0..n {
            assert_eq!(double.mesh.vertices()[i], double.mesh.vertices()[i + n]);
            assert_eq!(double.mesh.normals()[i], -double.mesh.normals()[i + n]);
        }

        for (tri, copy) in double.mesh.triangles().take(m).zip(double.mesh.triangles().skip(m)) {
            if let (Some(a), Some(b)) = (tri.normal(), copy.normal()) {
                assert_relative_eq!(a.into_inner(), -b.into_inner(), epsilon = 1.0e-5);
            }
        }
    }
}

#[test]
fn invalid_tolerances_are_rejected() {
    let plane = Plane::new(Vector::x_axis(), 0.0);

    for epsilon in [-1.0, f32::NAN, f32::INFINITY] {
        let options = SliceOptions::default().with_epsilon(epsilon);
        assert!(matches!(
            slice_mesh(&plane, &cube(), &options),
            Err(SliceError::InvalidTolerance(_))
        ));
    }
}

#[test]
fn parallel_strategy_falls_back_or_matches() {
    let mesh = prism(16);
    let plane = Plane::new(Vector::y_axis(), 0.1);
    let sequential = slice_mesh(&plane, &mesh, &SliceOptions::default()).unwrap();
    let strategy = ExecutionStrategy::Parallel {
        min_triangles_per_task: 4,
    };
    let parallel = slice_mesh(
        &plane,
        &mesh,
        &SliceOptions::default().with_strategy(strategy),
    )
    .unwrap();

    assert_eq!(sequential, parallel);
}
