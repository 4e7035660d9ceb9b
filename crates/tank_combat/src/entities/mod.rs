//! Gameplay entities
//!
//! Entities drive groups of scene nodes: the player's hull/turret/camera
//! rig, enemy tanks with their wrecks, and spinning pickups.

pub mod enemy;
pub mod manager;
pub mod path;
pub mod player;
pub mod powerup;

pub use enemy::{Enemy, EnemyAction, Wreck};
pub use manager::EntityManager;
pub use path::{PathGraph, PathGraphError, PathNode};
pub use player::{Player, PlayerAction, PlayerInput};
pub use powerup::Powerup;
