//! Grid Snake - a single-screen snake game for the terminal
//!
//! This library provides:
//! - Core game logic: movement, fruit and collisions (game module)
//! - The render step and sprite orientation, plus a terminal surface (render module)
//! - Key and swipe input translation (input module)
//! - The frame gate that paces simulation ticks (ticker module)
//! - The interactive terminal session (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod ticker;
