//! Spatial index keyed by position and direction.
//!
//! Buckets entries into a hash grid over the unit cube (cell size equal to
//! the configured position tolerance) and stores the entry direction
//! alongside. Queries return payload ids whose position lies within the
//! tolerance of the query position and whose direction makes an angle with
//! the query direction close to a requested cosine.
//!
//! The index is a bucketed pre-filter: both the positional and the angular
//! tests here are approximate by contract, and callers must re-verify
//! survivors against original coordinates.

use std::collections::HashMap;

use crate::core::Point3D;

/// Smallest usable cell size. Guards against zero/denormal tolerances
/// producing unbounded cell coordinates.
const MIN_CELL_SIZE: f32 = 1e-6;

#[derive(Debug, Clone)]
struct Entry {
    position: Point3D,
    direction: Point3D,
    id: usize,
}

/// Hash-grid index over (position, direction) entries.
#[derive(Debug, Clone)]
pub struct IndexedPositionNormalSet {
    epsilon: f32,
    epsilon_sq: f32,
    inv_cell: f32,
    direction_slack: f32,
    cells: HashMap<(i32, i32, i32), Vec<Entry>>,
}

impl IndexedPositionNormalSet {
    /// Create an empty set with the given position tolerance and a cosine
    /// slack for the direction pre-filter.
    ///
    /// `epsilon` is expected in the same (normalized) space as the
    /// positions that will be inserted.
    pub fn new(epsilon: f32, direction_slack: f32) -> Self {
        let cell = epsilon.max(MIN_CELL_SIZE);
        Self {
            epsilon: cell,
            epsilon_sq: cell * cell,
            inv_cell: 1.0 / cell,
            direction_slack,
            cells: HashMap::new(),
        }
    }

    /// Position tolerance of this set.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn cell_of(&self, position: &Point3D) -> (i32, i32, i32) {
        (
            (position.x * self.inv_cell).floor() as i32,
            (position.y * self.inv_cell).floor() as i32,
            (position.z * self.inv_cell).floor() as i32,
        )
    }

    /// Insert an entry with a unit `direction` and an opaque payload id.
    pub fn add(&mut self, position: Point3D, direction: Point3D, id: usize) {
        let key = self.cell_of(&position);
        self.cells.entry(key).or_default().push(Entry {
            position,
            direction,
            id,
        });
    }

    /// Collect ids of entries within the position tolerance of `position`
    /// whose direction makes an angle with `direction` of cosine close to
    /// `target_cos`. Results are appended to `out` (not cleared).
    pub fn query_into(
        &self,
        position: &Point3D,
        direction: &Point3D,
        target_cos: f32,
        out: &mut Vec<usize>,
    ) {
        let (cx, cy, cz) = self.cell_of(position);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(entries) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for entry in entries {
                        if entry.position.distance_squared(position) > self.epsilon_sq {
                            continue;
                        }
                        let cos = entry.direction.dot(direction);
                        if (cos - target_cos).abs() > self.direction_slack {
                            continue;
                        }
                        out.push(entry.id);
                    }
                }
            }
        }
    }
}
