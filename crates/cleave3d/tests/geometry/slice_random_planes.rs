use crate::geometry::meshes::{
    assert_closed_and_oriented, assert_faces_outward, cube, prism, random_plane, surface_area,
};
use cleave3d::math::{Point, Vector};
use cleave3d::shape::TriMesh;
use cleave3d::transformation::{slice_mesh, MeshSlice, SliceFlags, SliceOptions};

fn check_solid_slices(mesh: &TriMesh, seed: u64, options: &SliceOptions) {
    let mut rng = oorandom::Rand32::new(seed);
    let area = mesh.area();

    for _ in 0..50 {
        let plane = random_plane(&mut rng, 0.5);
        let pieces = slice_mesh(&plane, mesh, options).unwrap();
        let normal: Vector<f32> = plane.normal.into_inner();

        assert!(!pieces.positive.is_empty());
        assert!(!pieces.negative.is_empty());
        assert!(pieces.positive.num_cap_triangles > 0);

        let surfaces = surface_area(&pieces.positive.mesh, pieces.positive.surface_indices())
            + surface_area(&pieces.negative.mesh, pieces.negative.surface_indices());
        assert_relative_eq!(surfaces, area, max_relative = 1.0e-4);

        let positive_cap = surface_area(&pieces.positive.mesh, pieces.positive.cap_indices());
        let negative_cap = surface_area(&pieces.negative.mesh, pieces.negative.cap_indices());
        assert_relative_eq!(positive_cap, negative_cap, max_relative = 1.0e-4);

        for (piece, sign) in [(&pieces.positive, 1.0), (&pieces.negative, -1.0)] {
            assert_closed_and_oriented(&piece.mesh);
            assert_faces_outward(&piece.mesh, piece.surface_indices(), &Point::origin());
            assert_eq!(piece.provenance.len(), piece.mesh.vertices().len());

            for pt in piece.mesh.vertices() {
                assert!(sign * plane.signed_distance(pt) >= -1.0e-4);
            }

            check_caps(piece, &(-sign * normal));
        }
    }
}

fn check_caps(piece: &MeshSlice, expected: &Vector<f32>) {
    for idx in piece.cap_indices() {
        let [a, b, c] = idx.map(|i| piece.mesh.vertices()[i as usize]);
        let face = (b - a).cross(&(c - a));

        if face.norm() > 1.0e-5 {
            assert!(face.dot(expected) > 0.0);
        }

        for i in idx {
            assert_eq!(piece.provenance[*i as usize], None);
            assert_relative_eq!(piece.mesh.normals()[*i as usize], *expected, epsilon = 1.0e-6);
        }
    }
}

#[test]
fn random_slices_of_a_cube_are_closed() {
    check_solid_slices(&cube(), 0, &SliceOptions::default());
}

#[test]
fn random_slices_of_a_prism_are_closed() {
    check_solid_slices(&prism(12), 42, &SliceOptions::default());
}

#[test]
fn random_slices_with_shared_vertices_are_closed() {
    let options = SliceOptions::default().with_flags(SliceFlags::SOLID | SliceFlags::SHARE_VERTICES);
    check_solid_slices(&prism(8), 7, &options);
}

#[test]
fn texture_coordinates_are_interpolated_along_edges() {
    let mut rng = oorandom::Rand32::new(3);
    let mesh = prism(6);

    for _ in 0..20 {
        let plane = random_plane(&mut rng, 0.5);
        let options = SliceOptions::default().with_flags(SliceFlags::empty());
        let pieces = slice_mesh(&plane, &mesh, &options).unwrap();

        for piece in [&pieces.positive, &pieces.negative] {
            for (i, source) in piece.provenance.iter().enumerate() {
                if let Some(source) = source {
                    let source = *source as usize;
                    assert_eq!(piece.mesh.vertices()[i], mesh.vertices()[source]);
                    assert_eq!(piece.mesh.uvs()[i], mesh.uvs()[source]);
                }
            }
        }
    }
}
