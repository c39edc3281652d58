use crate::math::Real;
use crate::shape::{Plane, PlaneSide, Segment, SurfaceVertex, TriMesh};
use crate::utils::{self, SortedPair};
use arrayvec::ArrayVec;

/// One of the two half-spaces a sliced mesh is partitioned into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum MeshSide {
    /// The half-space the plane normal points toward.
    Positive,
    /// The other half-space.
    Negative,
}

impl MeshSide {
    /// The other side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            MeshSide::Positive => MeshSide::Negative,
            MeshSide::Negative => MeshSide::Positive,
        }
    }

    fn of(side: PlaneSide) -> Option<Self> {
        match side {
            PlaneSide::Positive => Some(MeshSide::Positive),
            PlaneSide::Negative => Some(MeshSide::Negative),
            PlaneSide::OnPlane => None,
        }
    }
}

/// A triangle emitted by splitting a source triangle, wound like its source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SplitPiece {
    /// The side this triangle belongs to.
    pub side: MeshSide,
    /// The three corners of the triangle.
    pub vertices: [SurfaceVertex; 3],
}

/// An edge of the cross-section, created where the plane crosses a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CutSegment {
    /// The segment, lying on the cutting plane.
    pub segment: Segment,
    /// The source triangle it was cut from.
    pub triangle: u32,
}

/// The outcome of splitting a single triangle with a plane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSplit {
    /// The triangles to add to each side, in emission order.
    pub pieces: ArrayVec<SplitPiece, 3>,
    /// The part of the cross-section boundary contributed by this triangle.
    pub cut: Option<CutSegment>,
}

impl TriangleSplit {
    fn whole(side: MeshSide, vertices: [SurfaceVertex; 3]) -> Self {
        let mut result = Self::default();
        result.pieces.push(SplitPiece { side, vertices });
        result
    }

    fn push_piece(&mut self, side: MeshSide, mut vertices: [SurfaceVertex; 3]) {
        // New vertices get the normal of the face they end up in.
        if let Some(n) = utils::ccw_face_normal([
            &vertices[0].position,
            &vertices[1].position,
            &vertices[2].position,
        ]) {
            for v in vertices.iter_mut().filter(|v| v.source.is_none()) {
                v.normal = n.into_inner();
            }
        }

        self.pieces.push(SplitPiece { side, vertices });
    }
}

/// Splits the `triangle`-th triangle of `mesh` with `plane`.
///
/// Vertices closer than `epsilon` to the plane are considered on it:
/// - a triangle without any vertex strictly below the plane is kept whole on the
///   positive side, and one without any vertex strictly above it on the negative
///   side;
/// - a triangle with one vertex on each side of the plane is split in three: the
///   lone vertex keeps one triangle, the two others keep two;
/// - a triangle with one vertex on the plane and the two others on opposite sides
///   is split through the on-plane vertex into one triangle per side;
/// - a triangle lying entirely on the plane goes to the side its face points away
///   from, the piece it closes.
///
/// Every piece keeps the winding of the source triangle. The intersection of a
/// source edge with the plane is always computed in the same direction whatever
/// the triangle it is read from, so adjacent triangles produce bit-identical
/// cut points.
pub fn split_triangle(plane: &Plane, mesh: &TriMesh, triangle: u32, epsilon: Real) -> TriangleSplit {
    let idx = mesh.indices()[triangle as usize];
    let verts = idx.map(|i| mesh.vertex(i));
    let sides = verts.map(|v| plane.classify(&v.position, epsilon));

    let count = |s: PlaneSide| sides.iter().filter(|side| **side == s).count();
    let num_positive = count(PlaneSide::Positive);
    let num_negative = count(PlaneSide::Negative);

    match (num_positive, num_negative) {
        (0, 0) => {
            let face = utils::scaled_face_normal([
                &verts[0].position,
                &verts[1].position,
                &verts[2].position,
            ]);
            let side = if plane.normal.dot(&face) > 0.0 {
                MeshSide::Negative
            } else {
                MeshSide::Positive
            };
            TriangleSplit::whole(side, verts)
        }
        (_, 0) => TriangleSplit::whole(MeshSide::Positive, verts),
        (0, _) => {
            let mut result = TriangleSplit::whole(MeshSide::Negative, verts);

            // An edge lying on the plane is part of the cross-section. Only the
            // negative triangle of the pair sharing it reports it.
            if num_negative == 1 {
                let k = sides
                    .iter()
                    .position(|s| *s == PlaneSide::Negative)
                    .unwrap_or(0);
                let a = &verts[(k + 1) % 3];
                let b = &verts[(k + 2) % 3];
                result.cut = Some(CutSegment {
                    segment: Segment::new(a.position, b.position),
                    triangle,
                });
            }

            result
        }
        (1, 1) => {
            let k = sides
                .iter()
                .position(|s| *s == PlaneSide::OnPlane)
                .unwrap_or(0);
            let (o, x, y) = (verts[k], verts[(k + 1) % 3], verts[(k + 2) % 3]);
            let (Some(x_side), Some(y_side)) =
                (MeshSide::of(sides[(k + 1) % 3]), MeshSide::of(sides[(k + 2) % 3]))
            else {
                unreachable!()
            };
            let i = edge_intersection(plane, &x, &y);

            let mut result = TriangleSplit::default();
            result.push_piece(x_side, [o, x, i]);
            result.push_piece(y_side, [o, i, y]);
            result.cut = Some(CutSegment {
                segment: Segment::new(o.position, i.position),
                triangle,
            });
            result
        }
        _ => {
            // Two vertices on one side, one on the other.
            let lone_side = if num_positive == 1 {
                PlaneSide::Positive
            } else {
                PlaneSide::Negative
            };
            let k = sides.iter().position(|s| *s == lone_side).unwrap_or(0);
            let (l, a, b) = (verts[k], verts[(k + 1) % 3], verts[(k + 2) % 3]);
            let Some(l_side) = MeshSide::of(lone_side) else {
                unreachable!()
            };
            let ia = edge_intersection(plane, &l, &a);
            let ib = edge_intersection(plane, &l, &b);

            let mut result = TriangleSplit::default();
            result.push_piece(l_side, [l, ia, ib]);
            result.push_piece(l_side.opposite(), [a, b, ib]);
            result.push_piece(l_side.opposite(), [a, ib, ia]);
            result.cut = Some(CutSegment {
                segment: Segment::new(ia.position, ib.position),
                triangle,
            });
            result
        }
    }
}

/// Intersects the edge `a - b`, known to cross the plane, from its
/// lexicographically smallest end.
fn edge_intersection(plane: &Plane, a: &SurfaceVertex, b: &SurfaceVertex) -> SurfaceVertex {
    let key = |v: &SurfaceVertex| [v.position.x, v.position.y, v.position.z];
    let (_, swapped) = SortedPair::new_with_order(key(a), key(b));
    let (from, to) = if swapped { (b, a) } else { (a, b) };

    plane.intersect(from, to).unwrap_or_else(|| {
        let mut mid = from.lerp(to, 0.5);
        mid.source = None;
        mid
    })
}
