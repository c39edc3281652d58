use cleave3d::math::{Point, Real, TexCoord, Vector};
use cleave3d::shape::{Plane, TriMesh};
use na::Unit;
use std::collections::HashMap;

pub fn cube() -> TriMesh {
    let vertices = vec![
        Point::new(-1.0, -1.0, -1.0),
        Point::new(1.0, -1.0, -1.0),
        Point::new(1.0, 1.0, -1.0),
        Point::new(-1.0, 1.0, -1.0),
        Point::new(-1.0, -1.0, 1.0),
        Point::new(1.0, -1.0, 1.0),
        Point::new(1.0, 1.0, 1.0),
        Point::new(-1.0, 1.0, 1.0),
    ];
    let indices = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    TriMesh::with_smooth_normals(vertices, indices).unwrap()
}

pub fn tetrahedron() -> TriMesh {
    let vertices = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ];
    let indices = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    TriMesh::with_smooth_normals(vertices, indices).unwrap()
}

/// A closed prism of unit radius around the z axis, spanning `z` in `[-1, 1]`.
pub fn prism(num_sides: u32) -> TriMesh {
    let mut vertices = vec![Point::new(0.0, 0.0, -1.0), Point::new(0.0, 0.0, 1.0)];
    let mut indices = vec![];

    for i in 0..num_sides {
        let angle = i as Real * std::f32::consts::TAU / num_sides as Real;
        let (s, c) = angle.sin_cos();
        vertices.push(Point::new(c, s, -1.0));
        vertices.push(Point::new(c, s, 1.0));
    }

    for i in 0..num_sides {
        let bottom = 2 + 2 * i;
        let top = bottom + 1;
        let next_bottom = 2 + 2 * ((i + 1) % num_sides);
        let next_top = next_bottom + 1;

        indices.push([0, next_bottom, bottom]);
        indices.push([1, top, next_top]);
        indices.push([bottom, next_bottom, next_top]);
        indices.push([bottom, next_top, top]);
    }

    // Cylindrical texture mapping.
    let uvs = vertices
        .iter()
        .map(|pt| TexCoord::new(pt.y.atan2(pt.x), pt.z))
        .collect();
    let (vertices, normals, _, indices) = TriMesh::with_smooth_normals(vertices, indices)
        .unwrap()
        .into_parts();
    TriMesh::new(vertices, normals, uvs, indices).unwrap()
}

pub fn random_plane(rng: &mut oorandom::Rand32, extent: Real) -> Plane {
    let mut signed = || 2.0 * rng.rand_float() - 1.0;

    loop {
        let dir = Vector::new(signed(), signed(), signed());
        if let Some(normal) = Unit::try_new(dir, 1.0e-3) {
            let point = Point::new(signed(), signed(), signed()) * extent;
            return Plane::from_point_normal(&point, &normal);
        }
    }
}

fn key(pt: &Point<Real>) -> [u32; 3] {
    [pt.x.to_bits(), pt.y.to_bits(), pt.z.to_bits()]
}

/// Asserts that every directed edge of `mesh`, identified by the exact
/// positions of its ends, is matched by exactly as many opposite edges.
pub fn assert_closed_and_oriented(mesh: &TriMesh) {
    let mut edges: HashMap<([u32; 3], [u32; 3]), usize> = HashMap::new();

    for idx in mesh.indices() {
        for k in 0..3 {
            let a = key(&mesh.vertices()[idx[k] as usize]);
            let b = key(&mesh.vertices()[idx[(k + 1) % 3] as usize]);
            if a != b {
                *edges.entry((a, b)).or_default() += 1;
            }
        }
    }

    for ((a, b), count) in &edges {
        let opposite = edges.get(&(*b, *a)).copied().unwrap_or(0);
        assert_eq!(
            *count, opposite,
            "unmatched edge {:?} -> {:?}",
            a, b
        );
    }
}

pub fn surface_area(mesh: &TriMesh, indices: &[[u32; 3]]) -> Real {
    indices
        .iter()
        .map(|idx| {
            let [a, b, c] = idx.map(|i| mesh.vertices()[i as usize]);
            (b - a).cross(&(c - a)).norm() / 2.0
        })
        .sum()
}

/// Asserts that the non-degenerate triangles of the surface of a convex mesh
/// centered at `center` face outward.
pub fn assert_faces_outward(mesh: &TriMesh, indices: &[[u32; 3]], center: &Point<Real>) {
    for idx in indices {
        let [a, b, c] = idx.map(|i| mesh.vertices()[i as usize]);
        let face = (b - a).cross(&(c - a));

        if face.norm() > 1.0e-5 {
            let inside = na::center(&na::center(&a, &b), &c);
            assert!(
                face.dot(&(inside - center)) > 0.0,
                "inward triangle {:?}",
                [a, b, c]
            );
        }
    }
}
