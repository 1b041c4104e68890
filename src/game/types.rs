//! Shared identifiers and value types for the match engine

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One of the two fighting teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Side A; wins ties when balancing
    Red,
    /// Side B
    Blue,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Team name used in notices and outcomes
    pub fn label(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Equipment role a collaborator dresses a player for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Team(Side),
    Spectator,
}

/// What caused a hit or elimination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitCause {
    Ball,
    Grenade,
    Airstrike,
    Orbitalstrike,
    Turret,
    Mine,
    Concussion,
    Sniper,
}

/// A position in a named world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Integer block coordinates containing this location
    pub fn block(&self) -> (i64, i64, i64) {
        (
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        )
    }

    /// Euclidean distance, `None` across worlds
    pub fn distance(&self, other: &Location) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        Some((dx * dx + dy * dy + dz * dz).sqrt())
    }

    /// Same position, looking the way `facing` looks
    pub fn facing_like(&self, facing: &Location) -> Location {
        Location {
            yaw: facing.yaw,
            pitch: facing.pitch,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent_and_label() {
        assert_eq!(Side::Red.opponent(), Side::Blue);
        assert_eq!(Side::Blue.opponent(), Side::Red);
        assert_eq!(Side::Red.to_string(), "red");
    }

    #[test]
    fn test_location_block_and_distance() {
        let a = Location::new("arena", 1.5, 64.0, -0.5);
        assert_eq!(a.block(), (1, 64, -1));

        let b = Location::new("arena", 4.5, 68.0, -0.5);
        assert_eq!(a.distance(&b), Some(5.0));

        let elsewhere = Location::new("lobby", 1.5, 64.0, -0.5);
        assert_eq!(a.distance(&elsewhere), None);
    }

    #[test]
    fn test_facing_like_keeps_position() {
        let spawn = Location::new("arena", 0.0, 0.0, 0.0);
        let mut moved = Location::new("arena", 3.0, 0.0, 0.0);
        moved.yaw = 90.0;
        moved.pitch = 10.0;

        let back = spawn.facing_like(&moved);
        assert_eq!(back.block(), spawn.block());
        assert_eq!(back.yaw, 90.0);
        assert_eq!(back.pitch, 10.0);
    }
}
