use std::collections::HashSet;

use log::trace;
use metrohash::MetroBuildHasher;

use crate::{pos, Pos, SimError};

pub use neighbors::NeighborCounts;
mod neighbors;

/// the live-cell set of one generation; every position not in the set is dead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct World {
    cells: HashSet<Pos, MetroBuildHasher>,
}

impl World {
    pub fn is_alive(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn actives(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// smallest and largest corner (both inclusive) of the live cells.
    pub fn bounds(&self) -> Option<(Pos, Pos)> {
        let mut actives = self.actives();
        let first = actives.next()?;
        Some(actives.fold((first, first), |(min, max), p| {
            (
                pos!(min.x.min(p.x), min.y.min(p.y)),
                pos!(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    /// the same pattern moved by `offset`.
    #[cfg(test)]
    pub fn translated(&self, offset: Pos) -> Self {
        self.actives()
            .map(|p| pos!(p.x + offset.x, p.y + offset.y))
            .collect()
    }

    /// computes the next generation.
    ///
    /// a position with three live neighbors is alive next, one with two stays
    /// alive only if it already was, everything else is dead. fails only when
    /// a live cell lies on the border of the `i32` range.
    pub fn step(&self) -> Result<World, SimError> {
        let counts = NeighborCounts::of(self)?;
        let cells: HashSet<Pos, MetroBuildHasher> = counts
            .iter()
            .filter_map(|(pos, count)| match (count, self.is_alive(pos)) {
                (3, _) | (2, true) => Some(pos),
                _ => None,
            })
            .collect();
        trace!("step: {} candidates, {} -> {} alive", counts.len(), self.len(), cells.len());
        Ok(World { cells })
    }
}

impl FromIterator<Pos> for World {
    fn from_iter<T: IntoIterator<Item = Pos>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
