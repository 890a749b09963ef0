use super::sprite::Sprite;
use crate::game::GameConfig;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Pixel geometry of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub cell_size: i32,
    pub grid_size: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl RenderContext {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            grid_size: config.grid_size,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// One instruction for a drawing surface, in pixel coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgb,
    },
    Sprite {
        sprite: Sprite,
        x: i32,
        y: i32,
    },
    /// `y` is the text baseline
    Text {
        text: String,
        x: i32,
        y: i32,
        size_px: i32,
        color: Rgb,
    },
}

/// Anything the scene can be painted on
pub trait DrawSurface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb);
    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size_px: i32, color: Rgb);
}

impl DrawCommand {
    pub fn apply<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => surface.fill_rect(*x, *y, *width, *height, *color),
            DrawCommand::Sprite { sprite, x, y } => surface.draw_sprite(*sprite, *x, *y),
            DrawCommand::Text {
                text,
                x,
                y,
                size_px,
                color,
            } => surface.draw_text(text, *x, *y, *size_px, *color),
        }
    }
}

/// Replay a frame onto a surface, in order
pub fn present<S: DrawSurface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for command in commands {
        command.apply(surface);
    }
}
