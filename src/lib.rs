//! Paintball arena match engine
//!
//! `game` holds the synchronous match core: team balancing, spawn rotation,
//! lives and protection, combat resolution and the countdown/round timers.
//! `host` runs sessions on tokio tasks and fans their events out.

pub mod config;
pub mod game;
pub mod host;
pub mod util;

pub use config::{ConfigError, EngineConfig, SimConfig};
pub use game::{MatchEvent, MatchReport, MatchSession, SessionContext, SessionError};
pub use host::{spawn_match, HostError, MatchCommand, MatchHandle, MatchRegistry};
