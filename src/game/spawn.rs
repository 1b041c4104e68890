//! Round-robin spawn point selection

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{Location, Side};

/// The three spawn pools of an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPool {
    Team(Side),
    Spectators,
}

impl fmt::Display for SpawnPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnPool::Team(side) => write!(f, "{side} team"),
            SpawnPool::Spectators => f.write_str("spectator"),
        }
    }
}

/// A non-empty list of spawn points with its own cursor
#[derive(Debug, Clone)]
struct Cursor {
    points: Vec<Location>,
    next: usize,
}

impl Cursor {
    fn next(&mut self) -> Location {
        if self.next >= self.points.len() {
            self.next = 0;
        }
        let location = self.points[self.next].clone();
        self.next += 1;
        location
    }
}

/// Independent rotating cursors over the red, blue and spectator pools
#[derive(Debug, Clone)]
pub struct SpawnRotator {
    red: Cursor,
    blue: Cursor,
    spectators: Cursor,
}

impl SpawnRotator {
    /// Build a rotator with uniformly random starting offsets.
    ///
    /// Returns the first empty pool as an error.
    pub fn new<R: Rng>(
        red: Vec<Location>,
        blue: Vec<Location>,
        spectators: Vec<Location>,
        rng: &mut R,
    ) -> Result<Self, SpawnPool> {
        Ok(Self {
            red: Self::cursor(red, SpawnPool::Team(Side::Red), rng)?,
            blue: Self::cursor(blue, SpawnPool::Team(Side::Blue), rng)?,
            spectators: Self::cursor(spectators, SpawnPool::Spectators, rng)?,
        })
    }

    fn cursor<R: Rng>(points: Vec<Location>, pool: SpawnPool, rng: &mut R) -> Result<Cursor, SpawnPool> {
        if points.is_empty() {
            return Err(pool);
        }
        let next = rng.gen_range(0..points.len());
        Ok(Cursor { points, next })
    }

    /// Next spawn point of `pool`, advancing its cursor
    pub fn next(&mut self, pool: SpawnPool) -> Location {
        match pool {
            SpawnPool::Team(Side::Red) => self.red.next(),
            SpawnPool::Team(Side::Blue) => self.blue.next(),
            SpawnPool::Spectators => self.spectators.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn points(world: &str, n: usize) -> Vec<Location> {
        (0..n).map(|i| Location::new(world, i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_rotation_wraps_around() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut rotator =
            SpawnRotator::new(points("r", 3), points("b", 1), points("s", 2), &mut rng).unwrap();

        let first = rotator.next(SpawnPool::Team(Side::Red)).x as usize;
        let order: Vec<usize> = (0..5)
            .map(|_| rotator.next(SpawnPool::Team(Side::Red)).x as usize)
            .collect();
        let expected: Vec<usize> = (1..6).map(|i| (first + i) % 3).collect();
        assert_eq!(order, expected);

        // single-point pool always yields the same point
        for _ in 0..3 {
            assert_eq!(rotator.next(SpawnPool::Team(Side::Blue)).world, "b");
        }
    }

    #[test]
    fn test_pools_have_independent_cursors() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut rotator =
            SpawnRotator::new(points("r", 4), points("b", 4), points("s", 4), &mut rng).unwrap();

        let red_a = rotator.next(SpawnPool::Team(Side::Red)).x as usize;
        rotator.next(SpawnPool::Spectators);
        rotator.next(SpawnPool::Team(Side::Blue));
        let red_b = rotator.next(SpawnPool::Team(Side::Red)).x as usize;
        assert_eq!(red_b, (red_a + 1) % 4);
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = SpawnRotator::new(points("r", 2), Vec::new(), points("s", 1), &mut rng).unwrap_err();
        assert_eq!(err, SpawnPool::Team(Side::Blue));

        let err = SpawnRotator::new(points("r", 2), points("b", 1), Vec::new(), &mut rng).unwrap_err();
        assert_eq!(err, SpawnPool::Spectators);
    }
}
