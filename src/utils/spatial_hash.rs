//! Tolerance-bucketed lookup of points by position.

use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::utils::hashmap::HashMap;
use smallvec::SmallVec;

type CellKey = [i64; 3];

/// A uniform grid of buckets mapping quantised positions to point ids.
///
/// Two points match when they are within `tolerance` of each other. The cell
/// size equals the tolerance so that any match lies in the 3×3×3 block of cells
/// around the query point. Only ids are stored; positions are read from the
/// caller's own buffer, so the hash can index vertex buffers that are grown
/// in place.
#[derive(Clone, Debug)]
pub struct SpatialHash {
    tolerance: Real,
    cell_size: Real,
    cells: HashMap<CellKey, SmallVec<[u32; 4]>>,
}

impl SpatialHash {
    /// Creates an empty hash matching points within `tolerance` of each other.
    pub fn new(tolerance: Real) -> Self {
        Self {
            tolerance,
            cell_size: tolerance.max(DEFAULT_EPSILON),
            cells: HashMap::default(),
        }
    }

    /// The matching distance of this hash.
    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// The number of ids stored.
    pub fn len(&self) -> usize {
        self.cells.values().map(|bucket| bucket.len()).sum()
    }

    /// Whether no id was inserted yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn cell(&self, pt: &Point<Real>) -> CellKey {
        [
            (pt.x / self.cell_size).floor() as i64,
            (pt.y / self.cell_size).floor() as i64,
            (pt.z / self.cell_size).floor() as i64,
        ]
    }

    /// Registers the point `points[id]` under `id`.
    pub fn insert(&mut self, id: u32, pt: &Point<Real>) {
        let key = self.cell(pt);
        self.cells.entry(key).or_default().push(id);
    }

    /// Finds the smallest id whose point, read from `points`, lies within the
    /// tolerance of `pt`.
    pub fn find(&self, pt: &Point<Real>, points: &[Point<Real>]) -> Option<u32> {
        let center = self.cell(pt);
        let tol_sq = self.tolerance * self.tolerance;
        let mut best: Option<u32> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [center[0] + dx, center[1] + dy, center[2] + dz];
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };

                    for id in bucket {
                        if best.is_some_and(|b| b <= *id) {
                            continue;
                        }

                        if na::distance_squared(&points[*id as usize], pt) <= tol_sq {
                            best = Some(*id);
                        }
                    }
                }
            }
        }

        best
    }

    /// Returns the id of a point of `points` matching `pt`, or pushes `pt` to
    /// `points` and registers it under a fresh id.
    ///
    /// The boolean is `true` if the point was inserted.
    pub fn find_or_insert(&mut self, pt: Point<Real>, points: &mut Vec<Point<Real>>) -> (u32, bool) {
        if let Some(id) = self.find(&pt, points) {
            return (id, false);
        }

        let id = points.len() as u32;
        points.push(pt);
        self.insert(id, &pt);
        (id, true)
    }
}
