pub mod handler;

pub use handler::{swipe_direction, InputHandler, KeyAction};
