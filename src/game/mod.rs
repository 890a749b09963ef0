//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The front end drives it one tick at a time and reads the state back for drawing.

pub mod action;
pub mod config;
pub mod engine;
pub mod fruit;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{Game, StepInfo};
pub use fruit::Fruit;
pub use state::{CollisionType, Snake, Vector2, SPAWN_BODY};
