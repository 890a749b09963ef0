use super::sprite::{Sprite, SpriteMemory};
use super::surface::{DrawCommand, RenderContext, Rgb};
use crate::game::Game;

/// Colour behind everything
pub const FIELD_COLOR: Rgb = Rgb(175, 215, 70);
/// Colour of the even checkerboard cells
pub const GRASS_COLOR: Rgb = Rgb(167, 209, 61);
pub const SCORE_COLOR: Rgb = Rgb(56, 74, 12);
pub const SCORE_SIZE_PX: i32 = 25;
/// Score baseline sits this far left of the right edge and below the top
pub const SCORE_INSET: i32 = 35;

/// Turns game state into a frame of draw commands.
///
/// Holds the last head and tail sprites between frames; never touches the game.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    sprites: SpriteMemory,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, game: &Game, ctx: &RenderContext) -> Vec<DrawCommand> {
        let mut frame = Vec::new();

        frame.push(DrawCommand::FillRect {
            x: 0,
            y: 0,
            width: ctx.canvas_width,
            height: ctx.canvas_height,
            color: FIELD_COLOR,
        });
        self.draw_background(&mut frame, ctx);
        self.draw_fruit(&mut frame, game, ctx);
        self.draw_snake(&mut frame, game, ctx);
        self.draw_score(&mut frame, game, ctx);

        frame
    }

    /// Forget carried-over sprites, e.g. when a new session starts
    pub fn reset(&mut self) {
        self.sprites = SpriteMemory::default();
    }

    fn draw_background(&self, frame: &mut Vec<DrawCommand>, ctx: &RenderContext) {
        for row in 0..ctx.grid_size {
            for col in 0..ctx.grid_size {
                if (row + col) % 2 == 0 {
                    frame.push(DrawCommand::FillRect {
                        x: col * ctx.cell_size,
                        y: row * ctx.cell_size,
                        width: ctx.cell_size,
                        height: ctx.cell_size,
                        color: GRASS_COLOR,
                    });
                }
            }
        }
    }

    fn draw_fruit(&self, frame: &mut Vec<DrawCommand>, game: &Game, ctx: &RenderContext) {
        let at = game.fruit.position * ctx.cell_size;
        frame.push(DrawCommand::Sprite {
            sprite: Sprite::Apple,
            x: at.x,
            y: at.y,
        });
    }

    fn draw_snake(&mut self, frame: &mut Vec<DrawCommand>, game: &Game, ctx: &RenderContext) {
        let snake = &game.snake;
        self.sprites.update(snake);

        for (i, segment) in snake.body.iter().enumerate() {
            // Unmatched orientations are skipped
            if let Some(sprite) = self.sprites.segment_sprite(snake, i) {
                let at = *segment * ctx.cell_size;
                frame.push(DrawCommand::Sprite {
                    sprite,
                    x: at.x,
                    y: at.y,
                });
            }
        }
    }

    fn draw_score(&self, frame: &mut Vec<DrawCommand>, game: &Game, ctx: &RenderContext) {
        frame.push(DrawCommand::Text {
            text: game.score().to_string(),
            x: ctx.canvas_width - SCORE_INSET,
            y: SCORE_INSET,
            size_px: SCORE_SIZE_PX,
            color: SCORE_COLOR,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Fruit, GameConfig, Snake, Vector2};
    use crate::render::sprite::BodySprite;

    fn game() -> Game {
        let mut game = Game::seeded(GameConfig::default(), 11);
        game.snake = Snake::with_body(
            vec![Vector2::new(6, 10), Vector2::new(5, 10), Vector2::new(4, 10)],
            Vector2::new(1, 0),
        );
        game.fruit = Fruit::at(Vector2::new(2, 3));
        game
    }

    fn sprites(frame: &[DrawCommand]) -> Vec<(Sprite, i32, i32)> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, x, y } => Some((*sprite, *x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_order() {
        let mut scene = SceneRenderer::new();
        let frame = scene.render(&game(), &RenderContext::default());

        assert!(matches!(
            frame.first(),
            Some(DrawCommand::FillRect { width: 720, height: 480, color, .. }) if *color == FIELD_COLOR
        ));
        assert!(matches!(frame.last(), Some(DrawCommand::Text { .. })));

        // 1 field fill + half of the 20x20 grid
        let fills = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count();
        assert_eq!(fills, 1 + 200);
    }

    #[test]
    fn test_checkerboard_parity() {
        let mut scene = SceneRenderer::new();
        let frame = scene.render(&game(), &RenderContext::default());

        for command in &frame[1..201] {
            match command {
                DrawCommand::FillRect { x, y, width, color, .. } => {
                    assert_eq!(*width, 40);
                    assert_eq!(*color, GRASS_COLOR);
                    assert_eq!((x / 40 + y / 40) % 2, 0);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_sprites_in_body_order() {
        let mut scene = SceneRenderer::new();
        let frame = scene.render(&game(), &RenderContext::default());

        assert_eq!(
            sprites(&frame),
            vec![
                (Sprite::Apple, 80, 120),
                (Sprite::Head(Direction::Right), 240, 400),
                (Sprite::Body(BodySprite::Horizontal), 200, 400),
                (Sprite::Tail(Direction::Left), 160, 400),
            ]
        );
    }

    #[test]
    fn test_score_text() {
        let mut scene = SceneRenderer::new();
        let mut g = game();
        g.snake.body.push(Vector2::new(3, 10));
        g.snake.body.push(Vector2::new(2, 10));

        let frame = scene.render(&g, &RenderContext::default());

        assert_eq!(
            frame.last(),
            Some(&DrawCommand::Text {
                text: "2".into(),
                x: 685,
                y: 35,
                size_px: 25,
                color: SCORE_COLOR,
            })
        );
    }

    #[test]
    fn test_render_does_not_touch_game() {
        let mut scene = SceneRenderer::new();
        let g = game();
        let before = (g.snake.clone(), g.fruit);

        scene.render(&g, &RenderContext::default());

        assert_eq!((g.snake, g.fruit), before);
    }

    #[test]
    fn test_stale_head_sprite_carries_over() {
        let mut scene = SceneRenderer::new();
        let mut g = game();
        scene.render(&g, &RenderContext::default());

        g.snake.body[0] = g.snake.body[1];
        let frame = scene.render(&g, &RenderContext::default());

        assert_eq!(sprites(&frame)[1].0, Sprite::Head(Direction::Right));

        scene.reset();
        let frame = scene.render(&g, &RenderContext::default());
        assert!(!sprites(&frame)
            .iter()
            .any(|(s, _, _)| matches!(s, Sprite::Head(_))));
    }
}
