//! Rendering: the pure scene step, sprite orientation and the terminal surface

pub mod renderer;
pub mod scene;
pub mod sprite;
pub mod surface;

pub use renderer::{CellCanvas, Renderer, Screen};
pub use scene::SceneRenderer;
pub use sprite::{BodySprite, Sprite, SpriteMemory};
pub use surface::{present, DrawCommand, DrawSurface, RenderContext, Rgb};
