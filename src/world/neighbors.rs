use std::collections::HashMap;

use metrohash::MetroBuildHasher;

use crate::{pos, Pos, SimError, World};

/// offsets of the Moore neighborhood, the center excluded.
const OFFSETS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(0, -1),
    pos!(1, -1),
    pos!(-1, 0),
    pos!(1, 0),
    pos!(-1, 1),
    pos!(0, 1),
    pos!(1, 1),
];

/// for every position next to at least one live cell, how many live cells touch it.
#[derive(Debug, Default)]
pub struct NeighborCounts {
    counts: HashMap<Pos, usize, MetroBuildHasher>,
}

impl NeighborCounts {
    pub fn of(world: &World) -> Result<Self, SimError> {
        // every neighbor of every live cell, duplicates included
        let mut neighbors = Vec::with_capacity(world.len() * OFFSETS.len());
        for active in world.actives() {
            for offset in OFFSETS {
                let neighbor = active
                    .checked_add(offset)
                    .ok_or(SimError::CoordinateOutOfRange(active))?;
                neighbors.push(neighbor);
            }
        }

        let mut counts = HashMap::default();
        for neighbor in neighbors {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
        Ok(Self { counts })
    }

    #[cfg(test)]
    pub fn get(&self, pos: Pos) -> usize {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, usize)> + '_ {
        self.counts.iter().map(|(&pos, &count)| (pos, count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

#[test]
fn test_counts_around_pair() {
    let world: World = [pos!(0, 0), pos!(1, 0)].into_iter().collect();
    let counts = NeighborCounts::of(&world).unwrap();
    assert_eq!(counts.get(pos!(0, 0)), 1);
    assert_eq!(counts.get(pos!(1, 0)), 1);
    assert_eq!(counts.get(pos!(0, 1)), 2);
    assert_eq!(counts.get(pos!(1, -1)), 2);
    assert_eq!(counts.get(pos!(-1, 0)), 1);
    assert_eq!(counts.get(pos!(5, 5)), 0);
    // 3x4 box around the pair
    assert_eq!(counts.len(), 12);
}

#[test]
fn test_empty_world_has_no_candidates() {
    let counts = NeighborCounts::of(&World::default()).unwrap();
    assert_eq!(counts.len(), 0);
}
