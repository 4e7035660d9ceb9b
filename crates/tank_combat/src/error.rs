//! Game-level error types

use tank_engine::config::ConfigError;
use tank_engine::scene::SceneError;

use crate::entities::path::PathGraphError;

/// Errors raised while setting up a game session
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene graph could not be assembled
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Enemy route graph is malformed
    #[error("path graph error: {0}")]
    PathGraph(#[from] PathGraphError),

    /// Arena has no route nodes for enemies to follow
    #[error("arena has enemies but no path nodes")]
    NoPathNodes,
}

/// Result alias for game setup
pub type GameResult<T> = Result<T, GameError>;
