//! Closing the cross-section of a sliced mesh.

use crate::math::{Point, Real, TexCoord, Vector};
use crate::query::CutSegment;
use crate::shape::{Plane, SurfaceVertex};
use crate::transformation::SideAccumulator;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::{self, SortedPair, SpatialHash};
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

// Fan triangles whose angle at the center has a smaller sine are oriented like
// the whole fan.
const DEGENERATE_SINE: Real = 1.0e-4;

/// An ordered chain of cut points bounding part of the cross-section.
#[derive(Clone, Debug, PartialEq)]
pub struct CapLoop {
    /// The points of the chain, in traversal order.
    pub points: Vec<Point<Real>>,
    /// Whether the last point is connected back to the first.
    pub closed: bool,
}

impl CapLoop {
    /// The segments of this loop, including the closing one if any.
    pub fn edges(&self) -> impl Iterator<Item = (Point<Real>, Point<Real>)> + '_ {
        let closing = if self.closed && self.points.len() > 2 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };

        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// The fan center of this loop: the midpoint between its first point and
    /// the point farthest from it.
    ///
    /// This is the true centroid only for centrally symmetric sections; fanning
    /// around it is exact for convex ones.
    pub fn halfway_point(&self) -> Option<Point<Real>> {
        let first = self.points.first()?;
        let farthest = self
            .points
            .iter()
            .max_by_key(|pt| OrderedFloat(na::distance_squared(first, pt)))?;
        Some(na::center(first, farthest))
    }
}

/// Chains unordered cut segments into loops.
///
/// Segment ends closer than `epsilon` are considered identical. Segments
/// shorter than `epsilon` and repeated segments are ignored. Chains that can't
/// be closed, e.g. when slicing an open mesh, are returned with `closed` set to
/// `false`.
pub fn build_cap_loops(segments: &[CutSegment], epsilon: Real) -> Vec<CapLoop> {
    let mut nodes = vec![];
    let mut hash = SpatialHash::new(epsilon);
    let mut adjacency: Vec<SmallVec<[u32; 2]>> = vec![];
    // Edge between two nodes → whether it was walked already.
    let mut edges: HashMap<SortedPair<u32>, bool> = HashMap::default();

    for cut in segments {
        let seg = &cut.segment;

        if seg.length() <= epsilon {
            log::trace!(
                "ignoring zero-length cut segment of triangle {} at {:?}",
                cut.triangle,
                seg.a
            );
            continue;
        }

        let (a, _) = hash.find_or_insert(seg.a, &mut nodes);
        let (b, _) = hash.find_or_insert(seg.b, &mut nodes);
        adjacency.resize(nodes.len(), SmallVec::new());

        if a == b {
            log::trace!(
                "ignoring cut segment of triangle {} with merged ends",
                cut.triangle
            );
            continue;
        }

        if let Entry::Vacant(e) = edges.entry(SortedPair::new(a, b)) {
            let _ = e.insert(false);
            adjacency[a as usize].push(b);
            adjacency[b as usize].push(a);
        }
    }

    let mut loops = vec![];

    // Walk open chains from their ends first, so they aren't started midway.
    let ends = (0..nodes.len() as u32).filter(|i| adjacency[*i as usize].len() != 2);
    let others = 0..nodes.len() as u32;

    for start in ends.chain(others) {
        while let Some(chain) = walk(start, &nodes, &adjacency, &mut edges) {
            loops.push(chain);
        }
    }

    loops
}

fn walk(
    start: u32,
    nodes: &[Point<Real>],
    adjacency: &[SmallVec<[u32; 2]>],
    edges: &mut HashMap<SortedPair<u32>, bool>,
) -> Option<CapLoop> {
    let next_unwalked = |from: u32, edges: &mut HashMap<SortedPair<u32>, bool>| {
        adjacency[from as usize].iter().copied().find(|to| {
            let walked = edges.entry(SortedPair::new(from, *to)).or_insert(true);
            if *walked {
                false
            } else {
                *walked = true;
                true
            }
        })
    };

    let mut curr = next_unwalked(start, edges)?;
    let mut points = vec![nodes[start as usize]];
    let mut closed = false;

    loop {
        if curr == start {
            closed = true;
            break;
        }

        points.push(nodes[curr as usize]);

        match next_unwalked(curr, edges) {
            Some(next) => curr = next,
            None => break,
        }
    }

    Some(CapLoop { points, closed })
}

/// Triangulates `cap` as a fan around its halfway point and prepends the
/// triangles to both pieces.
///
/// Each fan triangle goes to the piece it faces away from: the positive piece
/// gets the triangles whose normal opposes the plane normal, with vertex normals
/// set to `-normal`; the negative piece gets the mirrored triangles with vertex
/// normals set to `normal`. Texture coordinates are the planar projection of the
/// cap points on the plane, relative to the halfway point.
///
/// Degenerate fan triangles are kept, oriented like the whole fan: they close
/// the T-junction created when the halfway point lies on the boundary. Returns
/// the number of triangles added to each piece.
pub fn fan_cap(
    cap: &CapLoop,
    plane: &Plane,
    positive: &mut SideAccumulator,
    negative: &mut SideAccumulator,
) -> usize {
    let Some(center) = cap.halfway_point() else {
        return 0;
    };

    if cap.points.len() < 2 {
        return 0;
    }

    let [u, v] = plane.basis();
    let uv = |pt: &Point<Real>| {
        let dpt = pt - center;
        TexCoord::new(dpt.dot(&u), dpt.dot(&v))
    };
    let normal: Vector<Real> = plane.normal.into_inner();
    let make = |pt: &Point<Real>, n: Vector<Real>| SurfaceVertex::new(*pt, n, uv(pt), None);

    // Orientation of the whole fan, for triangles too thin to have their own.
    let fan_normal: Vector<Real> = cap
        .edges()
        .map(|(a, b)| utils::scaled_face_normal([&center, &a, &b]))
        .sum();
    let fan_faces_negative = fan_normal.dot(&normal) < 0.0;
    let mut count = 0;

    for (a, b) in cap.edges() {
        let face = utils::scaled_face_normal([&center, &a, &b]);
        let alignment = face.dot(&normal);
        let faces_negative =
            if alignment.abs() > DEGENERATE_SINE * (a - center).norm() * (b - center).norm() {
                alignment < 0.0
            } else {
                log::trace!("degenerate cap triangle at {:?}", center);
                fan_faces_negative
            };

        let (pos, neg) = if faces_negative {
            ([center, a, b], [center, b, a])
        } else {
            ([center, b, a], [center, a, b])
        };

        positive.add_triangle(pos.map(|p| make(&p, -normal)), false, true);
        negative.add_triangle(neg.map(|p| make(&p, normal)), false, true);
        count += 1;
    }

    count
}
