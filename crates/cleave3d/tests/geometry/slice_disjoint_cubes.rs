use crate::geometry::meshes::{assert_closed_and_oriented, cube, surface_area};
use cleave3d::math::{Point, Vector};
use cleave3d::shape::{Plane, TriMesh};
use cleave3d::transformation::{slice_mesh, SliceOptions};

/// Two copies of the cube, centered at `x = -3` and `x = 3`.
fn two_cubes() -> TriMesh {
    let (vertices, _, _, indices) = cube().into_parts();
    let base = vertices.len() as u32;
    let mut all_vertices = vec![];
    let mut all_indices = vec![];

    for (k, shift) in [-3.0, 3.0].into_iter().enumerate() {
        all_vertices.extend(vertices.iter().map(|pt| pt + Vector::x() * shift));
        all_indices.extend(indices.iter().map(|idx| idx.map(|i| i + base * k as u32)));
    }

    TriMesh::with_smooth_normals(all_vertices, all_indices).unwrap()
}

#[test]
fn disjoint_cross_sections_get_one_cap_each() {
    let mesh = two_cubes();
    let plane = Plane::from_point_normal(&Point::new(0.0, 0.0, 0.3), &Vector::z_axis());
    let pieces = slice_mesh(&plane, &mesh, &SliceOptions::default()).unwrap();

    let sides = [
        (&pieces.positive, -Vector::z()),
        (&pieces.negative, Vector::z()),
    ];

    for (piece, cap_normal) in sides {
        assert_closed_and_oriented(&piece.mesh);
        assert_relative_eq!(
            surface_area(&piece.mesh, piece.cap_indices()),
            8.0,
            epsilon = 1.0e-4
        );

        let (left, right): (Vec<[u32; 3]>, Vec<[u32; 3]>) = piece
            .cap_indices()
            .iter()
            .copied()
            .partition(|idx| piece.mesh.vertices()[idx[0] as usize].x < 0.0);
        assert_relative_eq!(surface_area(&piece.mesh, &left), 4.0, epsilon = 1.0e-4);
        assert_relative_eq!(surface_area(&piece.mesh, &right), 4.0, epsilon = 1.0e-4);

        for idx in piece.cap_indices() {
            let [a, b, c] = idx.map(|i| piece.mesh.vertices()[i as usize]);
            assert_relative_eq!(a.z, 0.3, epsilon = 1.0e-5);
            assert!((b - a).cross(&(c - a)).dot(&cap_normal) > -1.0e-5);
        }
    }
}
