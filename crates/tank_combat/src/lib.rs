//! # Tank Combat
//!
//! Game layer of the tank arena, built on [`tank_engine`]'s scene graph and
//! geometry queries:
//!
//! - [`physics`] pushes overlapping tanks out of walls and hands pickups to
//!   the player
//! - [`raycaster`] resolves instantaneous shots into damage
//! - [`entities`] drives the player rig, enemy AI and pickups
//! - [`game`] ties them into a fixed per-tick loop
//!
//! ```rust
//! use tank_combat::prelude::*;
//!
//! let config = GameConfig::default();
//! let mut session = GameSession::new(&config, NullSound).unwrap();
//! let status = session.tick(1.0 / 60.0, &PlayerInput::default());
//! assert_eq!(status, GameStatus::Running);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod arena;
pub mod audio;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod physics;
pub mod raycaster;

#[cfg(test)]
mod tests;

/// Common imports for game users
pub mod prelude {
    pub use crate::{
        audio::{NullSound, SoundCue, SoundManager, SoundSink},
        config::{GameConfig, TankPreset},
        entities::{Enemy, EntityManager, PathGraph, Player, PlayerInput, Powerup},
        error::{GameError, GameResult},
        game::{GameSession, GameStatus},
        physics::{CollisionReport, CollisionResolver, PlayerPart},
        raycaster::{CastOutcome, HitEffect, HitRecord, Raycaster, Shooter},
    };
    pub use tank_engine::config::Config;
}
